use geography_types::cartesian::Point2d;
use geography_types::geo::impls::projection::WebMercator;
use geography_types::geo::impls::GeoPoint2d;
use geography_types::geo::{GeoPoint, NewGeoPoint, Projection};
use geography_types::impls::ClosedContour;
use geography_types::segment::Segment;
use geography_types::Contour;
use log::trace;
use std::f64::consts::TAU;

use super::ring::check_ring;
use super::{check_coordinate, check_radius, CoordinateStrategy, StrategyKind, MEAN_EARTH_RADIUS};
use crate::config::ResolvedConfig;
use crate::error::{GeographyError, Result};

/// Largest latitude that can be represented by the mercator strategy (exclusive). At this latitude the projected
/// domain becomes a square.
pub const MAX_LATITUDE: f64 = 85.05112877980659;
/// Smallest latitude that can be represented by the mercator strategy (exclusive).
pub const MIN_LATITUDE: f64 = -MAX_LATITUDE;

/// Differences of isometric latitude below this value are treated as zero.
const PSI_EPSILON: f64 = 1e-12;
/// Overshoot of the antimeridian (in degrees) that the inverse projection can produce by rounding.
const LON_ROUNDING: f64 = 1e-9;

/// Computations in the spherical Mercator plane (EPSG:3857).
///
/// Coordinates of the points are still latitude and longitude in degrees, but the lines between the points are
/// straight lines in the projected plane (rhumb lines on the globe). Distances and areas are converted back into
/// meters on the sphere of [`MEAN_EARTH_RADIUS`] using the exact latitude-dependent scale of the projection:
///
/// * the length of a straight projected segment is the length of the rhumb line it represents;
/// * the area of a projected polygon is integrated with the area element `cos²φ`, which compensates the growth of
///   the projection scale towards the poles.
#[derive(Debug, Clone, Copy)]
pub struct MercatorStrategy {
    projection: WebMercator<GeoPoint2d, Point2d>,
    buffer_resolution: u32,
}

impl MercatorStrategy {
    /// Creates a new strategy with the buffer resolution from the configuration.
    pub fn new(config: &ResolvedConfig) -> Self {
        Self {
            projection: WebMercator::default(),
            buffer_resolution: config.buffer_resolution(),
        }
    }

    /// Projects a point into the mercator plane.
    pub fn project(&self, point: &GeoPoint2d) -> Result<Point2d> {
        Self::check_domain(point)?;
        self.projection
            .project(point)
            .ok_or(GeographyError::LatitudeOutOfDomain(point.lat()))
    }

    /// Converts a point in the mercator plane back into latitude and longitude.
    pub fn unproject(&self, point: &Point2d) -> Result<GeoPoint2d> {
        let unprojected = self.projection.unproject(point).ok_or_else(|| {
            GeographyError::InvalidGeometry(format!(
                "cannot unproject point ({}, {})",
                point.x, point.y
            ))
        })?;

        let lon = unprojected.lon();
        let unprojected = if lon.abs() > 180.0 && lon.abs() - 180.0 <= LON_ROUNDING {
            GeoPoint2d::latlon(unprojected.lat(), 180f64.copysign(lon))
        } else {
            unprojected
        };
        Self::check_domain(&unprojected)?;

        Ok(unprojected)
    }

    fn check_domain(point: &GeoPoint2d) -> Result<()> {
        check_coordinate(point)?;
        if point.lat().abs() >= MAX_LATITUDE {
            trace!("Latitude {} is outside of mercator domain", point.lat());
            return Err(GeographyError::LatitudeOutOfDomain(point.lat()));
        }

        Ok(())
    }

    fn project_ring(&self, ring: &ClosedContour<GeoPoint2d>) -> Result<ClosedContour<Point2d>> {
        ring.points
            .iter()
            .map(|p| self.project(p))
            .collect::<Result<Vec<_>>>()
            .map(ClosedContour::new)
    }

    /// Ground length (in radians of the sphere) of the rhumb line between two projected points.
    fn rhumb_angle(&self, a: &GeoPoint2d, b: &GeoPoint2d, pa: &Point2d, pb: &Point2d) -> f64 {
        let radius = self.projection.radius();
        let d_lon = (pb.x - pa.x) / radius;
        let d_psi = (pb.y - pa.y) / radius;
        let d_lat = b.lat_rad() - a.lat_rad();

        let q = if d_psi.abs() > PSI_EPSILON {
            d_lat / d_psi
        } else {
            ((a.lat_rad() + b.lat_rad()) / 2.0).cos()
        };

        (d_lat * d_lat + q * q * d_lon * d_lon).sqrt()
    }

    /// Signed area of a projected ring on the unit sphere.
    fn unit_area(&self, ring: &ClosedContour<Point2d>) -> f64 {
        let radius = self.projection.radius();
        ring.iter_segments()
            .map(|Segment(a, b)| {
                let d_lon = (b.x - a.x) / radius;
                let (psi_a, psi_b) = (a.y / radius, b.y / radius);
                let d_psi = psi_b - psi_a;

                // Integral of sin(lat) = tanh(psi) over the segment.
                let mean_sin_lat = if d_psi.abs() > PSI_EPSILON {
                    (psi_b.cosh().ln() - psi_a.cosh().ln()) / d_psi
                } else {
                    ((psi_a + psi_b) / 2.0).tanh()
                };

                d_lon * mean_sin_lat
            })
            .sum()
    }
}

impl CoordinateStrategy for MercatorStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Mercator
    }

    fn buffer_resolution(&self) -> u32 {
        self.buffer_resolution
    }

    fn validate_point(&self, point: &GeoPoint2d) -> Result<()> {
        Self::check_domain(point)
    }

    fn validate_ring(&self, ring: &ClosedContour<GeoPoint2d>) -> Result<()> {
        check_ring(&self.project_ring(ring)?)
    }

    fn distance(&self, a: &GeoPoint2d, b: &GeoPoint2d) -> Result<f64> {
        let pa = self.project(a)?;
        let pb = self.project(b)?;

        Ok(MEAN_EARTH_RADIUS * self.rhumb_angle(a, b, &pa, &pb))
    }

    fn ring_area(&self, ring: &ClosedContour<GeoPoint2d>) -> Result<f64> {
        let projected = self.project_ring(ring)?;
        check_ring(&projected)?;

        Ok(MEAN_EARTH_RADIUS * MEAN_EARTH_RADIUS * self.unit_area(&projected).abs())
    }

    fn buffer_point(&self, center: &GeoPoint2d, radius: f64) -> Result<ClosedContour<GeoPoint2d>> {
        check_radius(radius)?;
        let projected_center = self.project(center)?;

        // Scale of the projection at the center latitude is sec(lat).
        let projected_radius =
            radius / MEAN_EARTH_RADIUS * self.projection.radius() / center.lat_rad().cos();
        let count = 4 * self.buffer_resolution;

        let points = (0..count)
            .map(|i| {
                let angle = TAU * f64::from(i) / f64::from(count);
                self.unproject(&Point2d::new(
                    projected_center.x + projected_radius * angle.cos(),
                    projected_center.y + projected_radius * angle.sin(),
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ClosedContour::new(points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::SphericalStrategy;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use assert_matches::assert_matches;
    use geography_types::latlon;
    use std::f64::consts::PI;

    fn strategy() -> MercatorStrategy {
        MercatorStrategy::new(&ResolvedConfig::default())
    }

    fn ring(coords: &[(f64, f64)]) -> ClosedContour<GeoPoint2d> {
        ClosedContour::new(coords.iter().map(|&(lat, lon)| latlon!(lat, lon)).collect())
    }

    #[test]
    fn projection_round_trip() {
        let strategy = strategy();
        for lat in [-85.0, -60.5, -1e-9, 0.0, 12.25, 45.0, 85.0] {
            for lon in [-180.0, -90.0, 0.0, 33.3, 180.0] {
                let point = latlon!(lat, lon);
                let projected = strategy.project(&point).unwrap();
                let unprojected = strategy.unproject(&projected).unwrap();
                assert_abs_diff_eq!(unprojected, point, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn domain_is_open() {
        let strategy = strategy();
        for lat in [MAX_LATITUDE, MIN_LATITUDE, 86.0, -89.9] {
            assert_matches!(
                strategy.project(&latlon!(lat, 0.0)),
                Err(GeographyError::LatitudeOutOfDomain(l)) if l == lat
            );
        }
        assert!(strategy.project(&latlon!(85.0, 0.0)).is_ok());
        assert!(strategy.validate_point(&latlon!(-85.0, 0.0)).is_ok());
    }

    #[test]
    fn invalid_coordinates_are_not_wrapped() {
        let strategy = strategy();
        assert_matches!(
            strategy.project(&latlon!(0.0, 180.5)),
            Err(GeographyError::InvalidCoordinate { .. })
        );
        assert_matches!(
            strategy.project(&latlon!(95.0, 0.0)),
            Err(GeographyError::InvalidCoordinate { .. })
        );
    }

    #[test]
    fn projected_domain_is_square() {
        let strategy = strategy();
        let corner = strategy.project(&latlon!(85.0511287798, 180.0)).unwrap();
        assert_relative_eq!(corner.x, corner.y, max_relative = 1e-9);
    }

    #[test]
    fn unproject_outside_domain() {
        let strategy = strategy();
        let half_size = PI * 6_378_137.0;
        assert_matches!(
            strategy.unproject(&Point2d::new(0.0, half_size * 1.01)),
            Err(GeographyError::LatitudeOutOfDomain(_))
        );
        assert_matches!(
            strategy.unproject(&Point2d::new(half_size * 1.01, 0.0)),
            Err(GeographyError::InvalidCoordinate { .. })
        );
    }

    #[test]
    fn distance_along_meridian_and_equator_matches_sphere() {
        let mercator = strategy();
        let sphere = SphericalStrategy::default();
        for (a, b) in [
            (latlon!(0.0, 0.0), latlon!(60.0, 0.0)),
            (latlon!(-30.0, 20.0), latlon!(10.0, 20.0)),
            (latlon!(0.0, -50.0), latlon!(0.0, 40.0)),
        ] {
            assert_relative_eq!(
                mercator.distance(&a, &b).unwrap(),
                sphere.distance(&a, &b).unwrap(),
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn distance_along_parallel_is_scale_corrected() {
        // A straight projected segment along a parallel is the parallel itself: R * cos(lat) * d_lon.
        let strategy = strategy();
        let distance = strategy
            .distance(&latlon!(60.0, 0.0), &latlon!(60.0, 10.0))
            .unwrap();
        let expected = MEAN_EARTH_RADIUS * 60f64.to_radians().cos() * 10f64.to_radians();
        assert_relative_eq!(distance, expected, max_relative = 1e-9);
    }

    #[test]
    fn rhumb_line_is_longer_than_great_circle() {
        let mercator = strategy();
        let sphere = SphericalStrategy::default();
        let a = latlon!(40.71, -74.0);
        let b = latlon!(51.5, -0.13);
        let rhumb = mercator.distance(&a, &b).unwrap();
        let great_circle = sphere.distance(&a, &b).unwrap();
        assert!(rhumb > great_circle);
        assert_relative_eq!(rhumb, great_circle, max_relative = 0.05);
    }

    #[test]
    fn distance_reflexive_and_symmetric() {
        let strategy = strategy();
        let a = latlon!(10.0, 20.0);
        let b = latlon!(-45.0, 100.0);
        assert_eq!(strategy.distance(&a, &a).unwrap(), 0.0);
        assert_eq!(
            strategy.distance(&a, &b).unwrap(),
            strategy.distance(&b, &a).unwrap()
        );
    }

    #[test]
    fn distance_rejects_points_outside_domain() {
        let strategy = strategy();
        assert_matches!(
            strategy.distance(&latlon!(0.0, 0.0), &latlon!(89.0, 0.0)),
            Err(GeographyError::LatitudeOutOfDomain(_))
        );
    }

    #[test]
    fn area_of_cell_is_exact() {
        let strategy = strategy();
        for (lat, size) in [(0.0, 1.0), (60.0, 10.0), (-80.0, 4.0)] {
            let cell = ring(&[
                (lat, 0.0),
                (lat, size),
                (lat + size, size),
                (lat + size, 0.0),
            ]);
            let lat_min = f64::min(lat, lat + size).to_radians();
            let lat_max = f64::max(lat, lat + size).to_radians();
            let expected = MEAN_EARTH_RADIUS.powi(2)
                * size.to_radians()
                * (lat_max.sin() - lat_min.sin());
            assert_relative_eq!(strategy.ring_area(&cell).unwrap(), expected, max_relative = 1e-9);
        }
    }

    #[test]
    fn area_near_equator_matches_sphere() {
        let mercator = strategy();
        let sphere = SphericalStrategy::default();
        let triangle = ring(&[(0.0, 0.0), (0.5, 0.0), (0.0, 0.5)]);
        assert_relative_eq!(
            mercator.ring_area(&triangle).unwrap(),
            sphere.ring_area(&triangle).unwrap(),
            max_relative = 1e-4
        );
    }

    #[test]
    fn area_rejects_ring_outside_domain() {
        let strategy = strategy();
        let polar = ring(&[(80.0, 0.0), (80.0, 10.0), (86.0, 5.0)]);
        assert_matches!(
            strategy.ring_area(&polar),
            Err(GeographyError::LatitudeOutOfDomain(_))
        );
    }

    #[test]
    fn area_rejects_degenerate_ring() {
        let strategy = strategy();
        let triangle = ring(&[(0.0, 0.0), (1.0, 1.0), (1.0, 1.0)]);
        assert_matches!(
            strategy.ring_area(&triangle),
            Err(GeographyError::InvalidGeometry(_))
        );
    }

    #[test]
    fn buffer_uses_resolution() {
        let strategy = MercatorStrategy::new(
            &crate::FactoryConfig::default()
                .with_buffer_resolution(3)
                .resolve(StrategyKind::Mercator)
                .unwrap(),
        );
        let center = latlon!(50.0, 30.0);
        let buffer = strategy.buffer_point(&center, 500.0).unwrap();
        assert_eq!(buffer.points.len(), 12);
        for point in &buffer.points {
            assert_relative_eq!(
                strategy.distance(&center, point).unwrap(),
                500.0,
                max_relative = 1e-3
            );
        }
    }

    #[test]
    fn buffer_leaving_domain_fails() {
        let strategy = strategy();
        assert_matches!(
            strategy.buffer_point(&latlon!(85.0, 0.0), 100_000.0),
            Err(GeographyError::LatitudeOutOfDomain(_))
        );
    }
}
