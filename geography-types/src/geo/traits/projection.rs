/// Conversion of points between two coordinate systems.
pub trait Projection {
    /// Type of the source points.
    type InPoint;
    /// Type of the target points.
    type OutPoint;

    /// Converts a point into the target coordinate system. Returns `None` if the point lies outside of the projection
    /// domain.
    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint>;
    /// Inverse of [`Projection::project`].
    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint>;
}
