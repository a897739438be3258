//! Features created by a [`GeographyFactory`].
//!
//! Features borrow the factory that created them, and delegate all measurements to the factory's strategy.

use geography_types::geo::impls::GeoPoint2d;
use geography_types::geo::GeoPoint;
use geography_types::impls::{ClosedContour, Contour, Polygon};

use crate::error::{GeographyError, Result};
use crate::factory::GeographyFactory;
use crate::srid::SpatialReferenceId;
use crate::strategy::CoordinateStrategy;

/// Checks that two features can be measured against each other.
fn check_same_model(a: &GeographyFactory, b: &GeographyFactory) -> Result<()> {
    if std::ptr::eq(a, b) || a.kind() == b.kind() {
        Ok(())
    } else {
        Err(GeographyError::FactoryMismatch)
    }
}

/// Point feature.
#[derive(Debug, Clone, Copy)]
pub struct PointFeature<'a> {
    factory: &'a GeographyFactory,
    point: GeoPoint2d,
}

impl<'a> PointFeature<'a> {
    pub(crate) fn new(factory: &'a GeographyFactory, point: GeoPoint2d) -> Self {
        Self { factory, point }
    }

    /// Factory that created the feature.
    pub fn factory(&self) -> &'a GeographyFactory {
        self.factory
    }

    /// Spatial reference of the feature.
    pub fn srid(&self) -> SpatialReferenceId {
        self.factory.spatial_reference_id()
    }

    /// Coordinates of the point.
    pub fn point(&self) -> &GeoPoint2d {
        &self.point
    }

    /// Distance to another point in meters.
    pub fn distance(&self, other: &PointFeature) -> Result<f64> {
        check_same_model(self.factory, other.factory)?;
        self.factory
            .strategy()
            .distance(&self.point, &other.point)
    }

    /// Polygon approximating the circle of `radius` meters around the point. The number of vertices is four times
    /// the buffer resolution of the factory.
    pub fn buffer(&self, radius: f64) -> Result<PolygonFeature<'a>> {
        let ring = self
            .factory
            .strategy()
            .buffer_point(&self.point, radius)?;
        self.factory.polygon_from_ring(ring)
    }
}

impl GeoPoint for PointFeature<'_> {
    type Num = f64;

    fn lat(&self) -> f64 {
        self.point.lat()
    }

    fn lon(&self) -> f64 {
        self.point.lon()
    }
}

/// Line string feature. Can be open or closed (a linear ring).
#[derive(Debug, Clone)]
pub struct LineStringFeature<'a> {
    factory: &'a GeographyFactory,
    contour: Contour<GeoPoint2d>,
}

impl<'a> LineStringFeature<'a> {
    pub(crate) fn new(factory: &'a GeographyFactory, contour: Contour<GeoPoint2d>) -> Self {
        Self { factory, contour }
    }

    /// Factory that created the feature.
    pub fn factory(&self) -> &'a GeographyFactory {
        self.factory
    }

    /// Spatial reference of the feature.
    pub fn srid(&self) -> SpatialReferenceId {
        self.factory.spatial_reference_id()
    }

    /// Points of the line string. The first point is not repeated at the end for closed line strings.
    pub fn points(&self) -> &[GeoPoint2d] {
        self.contour.points()
    }

    /// Number of points.
    pub fn num_points(&self) -> usize {
        self.contour.len()
    }

    /// Whether the last point is connected to the first one.
    pub fn is_closed(&self) -> bool {
        geography_types::Contour::is_closed(&self.contour)
    }

    /// Length in meters.
    pub fn length(&self) -> Result<f64> {
        self.factory.strategy().length(&self.contour)
    }
}

/// Polygon feature.
#[derive(Debug, Clone)]
pub struct PolygonFeature<'a> {
    factory: &'a GeographyFactory,
    polygon: Polygon<GeoPoint2d>,
}

impl<'a> PolygonFeature<'a> {
    pub(crate) fn new(factory: &'a GeographyFactory, polygon: Polygon<GeoPoint2d>) -> Self {
        Self { factory, polygon }
    }

    /// Factory that created the feature.
    pub fn factory(&self) -> &'a GeographyFactory {
        self.factory
    }

    /// Spatial reference of the feature.
    pub fn srid(&self) -> SpatialReferenceId {
        self.factory.spatial_reference_id()
    }

    /// Outer boundary.
    pub fn exterior(&self) -> &ClosedContour<GeoPoint2d> {
        &self.polygon.outer_contour
    }

    /// Holes.
    pub fn interiors(&self) -> &[ClosedContour<GeoPoint2d>] {
        &self.polygon.inner_contours
    }

    /// Area in square meters, excluding the holes.
    pub fn area(&self) -> Result<f64> {
        self.factory.strategy().area(&self.polygon)
    }

    /// Length of all the boundaries in meters.
    pub fn perimeter(&self) -> Result<f64> {
        self.factory.strategy().perimeter(&self.polygon)
    }
}

/// Any feature created by a [`GeographyFactory`].
#[derive(Debug, Clone)]
pub enum Feature<'a> {
    /// Point.
    Point(PointFeature<'a>),
    /// Line string.
    LineString(LineStringFeature<'a>),
    /// Polygon.
    Polygon(PolygonFeature<'a>),
}

impl<'a> Feature<'a> {
    /// Factory that created the feature.
    pub fn factory(&self) -> &'a GeographyFactory {
        match self {
            Feature::Point(v) => v.factory(),
            Feature::LineString(v) => v.factory(),
            Feature::Polygon(v) => v.factory(),
        }
    }

    /// Spatial reference of the feature.
    pub fn srid(&self) -> SpatialReferenceId {
        self.factory().spatial_reference_id()
    }

    /// Area in square meters. Points and line strings have zero area.
    pub fn area(&self) -> Result<f64> {
        match self {
            Feature::Point(_) | Feature::LineString(_) => Ok(0.0),
            Feature::Polygon(v) => v.area(),
        }
    }

    /// Distance in meters. Only defined between two points.
    pub fn distance(&self, other: &Feature) -> Result<f64> {
        match (self, other) {
            (Feature::Point(a), Feature::Point(b)) => a.distance(b),
            _ => Err(GeographyError::Unsupported(
                "distance is only defined between two points",
            )),
        }
    }
}

impl<'a> From<PointFeature<'a>> for Feature<'a> {
    fn from(value: PointFeature<'a>) -> Self {
        Self::Point(value)
    }
}

impl<'a> From<LineStringFeature<'a>> for Feature<'a> {
    fn from(value: LineStringFeature<'a>) -> Self {
        Self::LineString(value)
    }
}

impl<'a> From<PolygonFeature<'a>> for Feature<'a> {
    fn from(value: PolygonFeature<'a>) -> Self {
        Self::Polygon(value)
    }
}
