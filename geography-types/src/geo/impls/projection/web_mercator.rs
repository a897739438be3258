use crate::cartesian::NewCartesianPoint2d;
use crate::geo::datum::Datum;
use crate::geo::traits::point::NewGeoPoint;
use crate::geo::traits::projection::Projection;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use std::marker::PhantomData;

/// Spherical Mercator projection (EPSG:3857) used by most web map services.
///
/// The sphere radius is the semimajor axis of the datum. The poles are mapped to infinity, so points at (or close
/// enough to) the poles cannot be projected.
#[derive(Debug, Copy, Clone)]
pub struct WebMercator<In, Out> {
    datum: Datum,
    phantom_in: PhantomData<In>,
    phantom_out: PhantomData<Out>,
}

impl<In, Out> WebMercator<In, Out> {
    /// Creates a new projection for the given datum.
    pub fn new(datum: Datum) -> Self {
        Self {
            datum,
            phantom_in: Default::default(),
            phantom_out: Default::default(),
        }
    }

    /// Radius of the projection sphere in meters.
    pub fn radius(&self) -> f64 {
        self.datum.semimajor()
    }
}

impl<In, Out> Default for WebMercator<In, Out> {
    fn default() -> Self {
        Self::new(Datum::WGS84)
    }
}

impl<In: NewGeoPoint<f64>, Out: NewCartesianPoint2d<f64>> Projection for WebMercator<In, Out> {
    type InPoint = In;
    type OutPoint = Out;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        let x = self.radius() * input.lon_rad();
        let y = self.radius() * (FRAC_PI_4 + input.lat_rad() / 2.0).tan().ln();

        if x.is_finite() && y.is_finite() {
            Some(Self::OutPoint::new(x, y))
        } else {
            None
        }
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        if !input.x().is_finite() || !input.y().is_finite() {
            return None;
        }

        let lat = 2.0 * (input.y() / self.radius()).exp().atan() - FRAC_PI_2;
        let lon = input.x() / self.radius();

        Some(Self::InPoint::latlon(lat.to_degrees(), lon.to_degrees()))
    }
}
