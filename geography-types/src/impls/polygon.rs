use serde::{Deserialize, Serialize};

use crate::error::GeographyTypesError;
use crate::impls::contour::ClosedContour;

/// Simple implementation of the [`Polygon`](crate::Polygon) trait.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Polygon<P> {
    /// Outer contour.
    pub outer_contour: ClosedContour<P>,
    /// Inner contours.
    pub inner_contours: Vec<ClosedContour<P>>,
}

impl<P> Polygon<P> {
    /// Creates a polygon from a list of rings. The first ring is the outer contour, the rest are holes.
    pub fn from_rings(
        rings: impl IntoIterator<Item = ClosedContour<P>>,
    ) -> Result<Self, GeographyTypesError> {
        let mut rings = rings.into_iter();
        let outer_contour = rings.next().ok_or_else(|| {
            GeographyTypesError::Conversion("polygon must have an outer contour".into())
        })?;

        Ok(Self {
            outer_contour,
            inner_contours: rings.collect(),
        })
    }
}

impl<P> crate::polygon::Polygon for Polygon<P> {
    type Contour = ClosedContour<P>;

    fn outer_contour(&self) -> &Self::Contour {
        &self.outer_contour
    }

    fn inner_contours(&self) -> impl Iterator<Item = &'_ Self::Contour> {
        self.inner_contours.iter()
    }
}

impl<P> From<ClosedContour<P>> for Polygon<P> {
    fn from(value: ClosedContour<P>) -> Self {
        Self {
            outer_contour: value,
            inner_contours: vec![],
        }
    }
}
