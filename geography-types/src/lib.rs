//! Geometry primitives used by geographic feature factories.
//!
//! The crate provides two families of points:
//! * [`geo::GeoPoint`] - a point on the surface of the earth given by latitude and longitude in degrees,
//! * [`cartesian::CartesianPoint2d`] - a point in a projected plane.
//!
//! On top of the points there are sequences of points ([`Contour`]) and areas bounded by closed contours
//! ([`Polygon`]). Conversion between geographic and cartesian coordinates is done by a [`geo::Projection`].

pub mod cartesian;
pub mod contour;
pub mod error;
pub mod geo;
pub mod impls;
pub mod polygon;
pub mod segment;

pub use contour::{ClosedContour, Contour};
pub use polygon::Polygon;
