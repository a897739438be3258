//! Computation models used by geographic features.
//!
//! A [`CoordinateStrategy`] validates coordinates and performs all measurements of the features built by a factory.
//! There are exactly two models, enumerated by [`StrategyKind`] and wrapped into the [`Strategy`] enum:
//! [`SphericalStrategy`] and [`MercatorStrategy`].

use geography_types::geo::impls::GeoPoint2d;
use geography_types::geo::GeoPoint;
use geography_types::impls::{ClosedContour, Contour, Polygon};
use geography_types::segment::Segment;
use geography_types::Contour as _;
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::config::ResolvedConfig;
use crate::error::{GeographyError, Result};

mod mercator;
mod ring;
mod spherical;

pub use mercator::{MercatorStrategy, MAX_LATITUDE, MIN_LATITUDE};
pub use spherical::SphericalStrategy;

pub(crate) use ring::strip_closing_point;

/// Radius of the sphere used for all distances and areas, in meters.
pub const MEAN_EARTH_RADIUS: f64 = 6_371_000.0;

/// Computation model of a factory.
pub trait CoordinateStrategy {
    /// Kind of the strategy.
    fn kind(&self) -> StrategyKind;

    /// Number of segments used to approximate a quarter of a circle in buffers.
    fn buffer_resolution(&self) -> u32;

    /// Checks that the point can be represented by this strategy.
    fn validate_point(&self, point: &GeoPoint2d) -> Result<()>;

    /// Checks that the ring is a valid polygon boundary: all points are valid, there are at least 3 distinct
    /// vertices, and the ring does not intersect itself.
    fn validate_ring(&self, ring: &ClosedContour<GeoPoint2d>) -> Result<()>;

    /// Distance between two points in meters.
    fn distance(&self, a: &GeoPoint2d, b: &GeoPoint2d) -> Result<f64>;

    /// Area enclosed by the ring in square meters. Winding direction of the ring does not matter.
    fn ring_area(&self, ring: &ClosedContour<GeoPoint2d>) -> Result<f64>;

    /// Closed ring approximating a circle of `radius` meters around `center`.
    fn buffer_point(&self, center: &GeoPoint2d, radius: f64) -> Result<ClosedContour<GeoPoint2d>>;

    /// Length of a contour in meters, including the closing segment of closed contours.
    fn length(&self, contour: &Contour<GeoPoint2d>) -> Result<f64> {
        contour
            .iter_segments()
            .map(|Segment(a, b)| self.distance(a, b))
            .sum()
    }

    /// Area of a polygon in square meters: area of the outer contour minus areas of the holes.
    fn area(&self, polygon: &Polygon<GeoPoint2d>) -> Result<f64> {
        let outer = self.ring_area(&polygon.outer_contour)?;
        let holes = polygon
            .inner_contours
            .iter()
            .map(|ring| self.ring_area(ring))
            .sum::<Result<f64>>()?;

        Ok((outer - holes).max(0.0))
    }

    /// Total length of all contours of a polygon in meters.
    fn perimeter(&self, polygon: &Polygon<GeoPoint2d>) -> Result<f64> {
        geography_types::Polygon::iter_segments(polygon)
            .map(|Segment(a, b)| self.distance(a, b))
            .sum()
    }
}

/// Kind of a computation model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// See [`SphericalStrategy`].
    Spherical,
    /// See [`MercatorStrategy`].
    Mercator,
}

impl StrategyKind {
    /// All strategy kinds.
    pub const ALL: [StrategyKind; 2] = [StrategyKind::Spherical, StrategyKind::Mercator];

    /// Name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Spherical => "spherical",
            StrategyKind::Mercator => "mercator",
        }
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = GeographyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GeographyError::InvalidConfig(format!("unknown factory kind: {s}")))
    }
}

/// One of the two computation models.
#[derive(Debug, Clone, Copy)]
pub enum Strategy {
    /// Spherical model.
    Spherical(SphericalStrategy),
    /// Mercator model.
    Mercator(MercatorStrategy),
}

impl Strategy {
    /// Creates the strategy of the given kind.
    pub fn new(kind: StrategyKind, config: &ResolvedConfig) -> Self {
        match kind {
            StrategyKind::Spherical => Self::Spherical(SphericalStrategy::default()),
            StrategyKind::Mercator => Self::Mercator(MercatorStrategy::new(config)),
        }
    }

    /// Returns the mercator strategy, if this is one.
    pub fn as_mercator(&self) -> Option<&MercatorStrategy> {
        match self {
            Self::Mercator(strategy) => Some(strategy),
            Self::Spherical(_) => None,
        }
    }
}

macro_rules! dispatch {
    ($self:ident, $strategy:ident => $call:expr) => {
        match $self {
            Strategy::Spherical($strategy) => $call,
            Strategy::Mercator($strategy) => $call,
        }
    };
}

impl CoordinateStrategy for Strategy {
    fn kind(&self) -> StrategyKind {
        dispatch!(self, s => s.kind())
    }

    fn buffer_resolution(&self) -> u32 {
        dispatch!(self, s => s.buffer_resolution())
    }

    fn validate_point(&self, point: &GeoPoint2d) -> Result<()> {
        dispatch!(self, s => s.validate_point(point))
    }

    fn validate_ring(&self, ring: &ClosedContour<GeoPoint2d>) -> Result<()> {
        dispatch!(self, s => s.validate_ring(ring))
    }

    fn distance(&self, a: &GeoPoint2d, b: &GeoPoint2d) -> Result<f64> {
        dispatch!(self, s => s.distance(a, b))
    }

    fn ring_area(&self, ring: &ClosedContour<GeoPoint2d>) -> Result<f64> {
        dispatch!(self, s => s.ring_area(ring))
    }

    fn buffer_point(&self, center: &GeoPoint2d, radius: f64) -> Result<ClosedContour<GeoPoint2d>> {
        dispatch!(self, s => s.buffer_point(center, radius))
    }
}

/// Checks that the coordinates are inside `[-90, 90]x[-180, 180]`.
pub(crate) fn check_coordinate(point: &GeoPoint2d) -> Result<()> {
    let (lat, lon) = (point.lat(), point.lon());
    if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
        Ok(())
    } else {
        trace!("Rejected coordinate lat={lat}, lon={lon}");
        Err(GeographyError::InvalidCoordinate { lat, lon })
    }
}

/// Checks that the buffer radius is a positive finite distance.
pub(crate) fn check_radius(radius: f64) -> Result<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(GeographyError::InvalidGeometry(format!(
            "buffer radius must be a positive number of meters, got {radius}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use geography_types::latlon;

    #[test]
    fn coordinate_range() {
        assert!(check_coordinate(&latlon!(90.0, 180.0)).is_ok());
        assert!(check_coordinate(&latlon!(-90.0, -180.0)).is_ok());
        assert_matches!(
            check_coordinate(&latlon!(90.5, 0.0)),
            Err(GeographyError::InvalidCoordinate { lat, .. }) if lat == 90.5
        );
        assert_matches!(
            check_coordinate(&latlon!(0.0, -180.1)),
            Err(GeographyError::InvalidCoordinate { .. })
        );
        assert_matches!(
            check_coordinate(&latlon!(f64::NAN, 0.0)),
            Err(GeographyError::InvalidCoordinate { .. })
        );
    }

    #[test]
    fn kind_names() {
        assert_eq!("mercator".parse::<StrategyKind>().unwrap(), StrategyKind::Mercator);
        assert_eq!("Spherical".parse::<StrategyKind>().unwrap(), StrategyKind::Spherical);
        assert_matches!(
            "lambert".parse::<StrategyKind>(),
            Err(GeographyError::InvalidConfig(_))
        );
        assert_eq!(StrategyKind::Mercator.to_string(), "mercator");
    }

    #[test]
    fn strategy_kind_matches_variant() {
        let config = ResolvedConfig::default();
        for kind in StrategyKind::ALL {
            assert_eq!(Strategy::new(kind, &config).kind(), kind);
        }
        assert!(Strategy::new(StrategyKind::Mercator, &config)
            .as_mercator()
            .is_some());
    }
}
