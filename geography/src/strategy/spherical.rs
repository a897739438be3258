use geography_types::cartesian::Point2d;
use geography_types::geo::impls::GeoPoint2d;
use geography_types::geo::{GeoPoint, NewGeoPoint};
use geography_types::impls::ClosedContour;
use geography_types::segment::Segment;
use geography_types::Contour;
use nalgebra::Vector3;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use super::ring::check_ring;
use super::{check_coordinate, check_radius, CoordinateStrategy, StrategyKind, MEAN_EARTH_RADIUS};
use crate::config::DEFAULT_BUFFER_RESOLUTION;
use crate::error::Result;

/// Smallest cosine of the angle between a ring vertex and the ring centroid for which the ring is checked in the
/// gnomonic plane.
const MIN_GNOMONIC_COS: f64 = 1e-6;

/// Computations on a sphere: geodesics are great circle arcs.
///
/// Distances are computed with the haversine formula. Areas are computed as the spherical excess of the polygon,
/// summed edge by edge over the triangles formed by each edge and the north pole. Rings may go around a pole.
///
/// Ring topology is checked in the gnomonic projection centered at the ring centroid, where great circle arcs are
/// straight segments. Rings that do not fit into the hemisphere around their centroid are checked in the plane of
/// longitude and latitude instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalStrategy {
    radius: f64,
}

impl Default for SphericalStrategy {
    fn default() -> Self {
        Self {
            radius: MEAN_EARTH_RADIUS,
        }
    }
}

impl SphericalStrategy {
    /// Radius of the sphere in meters.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Central angle between two points in radians.
    fn central_angle(a: &GeoPoint2d, b: &GeoPoint2d) -> f64 {
        let half_d_lat = (b.lat_rad() - a.lat_rad()) / 2.0;
        let half_d_lon = (b.lon_rad() - a.lon_rad()) / 2.0;
        let h = half_d_lat.sin().powi(2)
            + a.lat_rad().cos() * b.lat_rad().cos() * half_d_lon.sin().powi(2);

        2.0 * h.sqrt().min(1.0).asin()
    }

    /// Spherical excess of a ring in steradians of the unit sphere.
    fn excess(ring: &ClosedContour<GeoPoint2d>) -> f64 {
        let (sum, d_lon_sum) = ring.iter_segments().fold(
            (0.0, 0.0),
            |(sum, d_lon_sum), Segment(a, b)| {
                let t1 = (a.lat_rad() / 2.0).tan();
                let t2 = (b.lat_rad() / 2.0).tan();
                let d_lon = normalize_angle(b.lon_rad() - a.lon_rad());
                let triangle = 2.0 * ((d_lon / 2.0).tan() * (t1 + t2)).atan2(1.0 + t1 * t2);
                (sum + triangle, d_lon_sum + d_lon)
            },
        );

        // Longitude of a ring around a pole changes by a full turn, which the pole triangles count as 2π.
        let turns = (d_lon_sum / TAU).round();
        let excess = (sum - TAU * turns).abs();
        if excess > TAU {
            2.0 * TAU - excess
        } else {
            excess
        }
    }

    /// Point at the given angular distance and bearing (both in radians) from the `origin`.
    fn destination(origin: &GeoPoint2d, angle: f64, bearing: f64) -> GeoPoint2d {
        let (lat, lon) = (origin.lat_rad(), origin.lon_rad());
        if origin.lat().abs() == 90.0 {
            // At a pole the bearing is measured from the meridian of the origin longitude.
            let dest_lat = (FRAC_PI_2 - angle).copysign(lat);
            let dest_lon = if lat > 0.0 {
                lon + PI - bearing
            } else {
                lon + bearing
            };
            return GeoPoint2d::latlon(
                dest_lat.to_degrees(),
                normalize_angle(dest_lon).to_degrees(),
            );
        }

        let dest_lat = (lat.sin() * angle.cos() + lat.cos() * angle.sin() * bearing.cos()).asin();
        let dest_lon = lon
            + (bearing.sin() * angle.sin() * lat.cos())
                .atan2(angle.cos() - lat.sin() * dest_lat.sin());

        GeoPoint2d::latlon(
            dest_lat.to_degrees(),
            normalize_angle(dest_lon).to_degrees(),
        )
    }
}

impl CoordinateStrategy for SphericalStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Spherical
    }

    fn buffer_resolution(&self) -> u32 {
        DEFAULT_BUFFER_RESOLUTION
    }

    fn validate_point(&self, point: &GeoPoint2d) -> Result<()> {
        check_coordinate(point)
    }

    fn validate_ring(&self, ring: &ClosedContour<GeoPoint2d>) -> Result<()> {
        for point in &ring.points {
            check_coordinate(point)?;
        }

        match gnomonic_ring(ring) {
            Some(plane) => check_ring(&plane),
            None => check_ring(&ClosedContour::new(
                ring.points
                    .iter()
                    .map(|p| Point2d::new(p.lon(), p.lat()))
                    .collect(),
            )),
        }
    }

    fn distance(&self, a: &GeoPoint2d, b: &GeoPoint2d) -> Result<f64> {
        check_coordinate(a)?;
        check_coordinate(b)?;

        Ok(self.radius * Self::central_angle(a, b))
    }

    fn ring_area(&self, ring: &ClosedContour<GeoPoint2d>) -> Result<f64> {
        self.validate_ring(ring)?;
        Ok(self.radius * self.radius * Self::excess(ring))
    }

    fn buffer_point(&self, center: &GeoPoint2d, radius: f64) -> Result<ClosedContour<GeoPoint2d>> {
        check_coordinate(center)?;
        check_radius(radius)?;

        let angle = radius / self.radius;
        let count = 4 * self.buffer_resolution();
        let points = (0..count)
            .map(|i| {
                let bearing = TAU * f64::from(i) / f64::from(count);
                Self::destination(center, angle, bearing)
            })
            .collect();

        Ok(ClosedContour::new(points))
    }
}

/// Position of the point on the unit sphere. All longitudes of a pole give the same vector.
fn unit_vector(point: &GeoPoint2d) -> Vector3<f64> {
    if point.lat().abs() == 90.0 {
        return Vector3::new(0.0, 0.0, point.lat().signum());
    }

    let (lat, lon) = (point.lat_rad(), point.lon_rad());
    Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

/// Gnomonic projection of the ring onto the plane touching the sphere at the ring centroid.
///
/// Returns `None` if the centroid is not defined or some vertex is too far from it.
fn gnomonic_ring(ring: &ClosedContour<GeoPoint2d>) -> Option<ClosedContour<Point2d>> {
    let vectors: Vec<Vector3<f64>> = ring.points.iter().map(unit_vector).collect();
    let center = vectors.iter().sum::<Vector3<f64>>().try_normalize(1e-12)?;

    let axis = if center.z.abs() < 0.9 {
        Vector3::z()
    } else {
        Vector3::x()
    };
    let east = axis.cross(&center).normalize();
    let north = center.cross(&east);

    vectors
        .iter()
        .map(|v| {
            let cos = v.dot(&center);
            (cos > MIN_GNOMONIC_COS).then(|| Point2d::new(v.dot(&east) / cos, v.dot(&north) / cos))
        })
        .collect::<Option<Vec<_>>>()
        .map(ClosedContour::new)
}

/// Normalizes an angle in radians into `[-PI, PI)`.
fn normalize_angle(angle: f64) -> f64 {
    (angle + PI).rem_euclid(TAU) - PI
}
