//! Types and functions on geometries in cartesian coordinates.

mod impls;
mod orient;
mod traits;

pub use impls::point::Point2d;
pub use orient::Orientation;
pub use traits::*;
