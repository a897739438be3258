//! Factories of geographic features bound to a computation model.
//!
//! A [`GeographyFactory`] constructs points, line strings and polygons whose coordinates are latitude and longitude
//! in degrees. Every measurement on those features (distance, length, area, buffering) is delegated to the
//! [`CoordinateStrategy`] the factory is bound to:
//!
//! * [`SphericalStrategy`] treats the earth as a sphere and geodesics as great circle arcs. Distances and areas are
//!   reported in meters and square meters. Accuracy is within about 0.5 percent of the ellipsoidal values, which is
//!   enough for most everyday calculations.
//! * [`MercatorStrategy`] performs the computations in the spherical Mercator plane used by most web maps, so a
//!   segment between two points follows a rhumb line rather than a great circle. Coordinates are still exposed in
//!   degrees and results are still in meters. Latitudes are restricted to the open range
//!   `(-85.05112877980659, 85.05112877980659)`, which makes the projected domain a square.
//!
//! Both factories report the spatial reference [`SpatialReferenceId::EPSG_4326`]. This is not strictly correct (the
//! computations are done on a sphere, and mercator computations are done in a projected plane), but the coordinates
//! of the features are latitude and longitude, and there is no EPSG code that describes the actual behaviour.
//!
//! Factories are obtained from a [`FactoryRegistry`], which creates at most one factory of each kind:
//!
//! ```
//! use geography::{mercator_factory, FactoryConfig};
//!
//! let factory = mercator_factory(Some(&FactoryConfig::default().with_buffer_resolution(8))).unwrap();
//! let moscow = factory.create_point(55.75, 37.61).unwrap();
//! let spb = factory.create_point(59.94, 30.31).unwrap();
//! assert!(moscow.distance(&spb).unwrap() > 600_000.0);
//! assert_eq!(factory.spatial_reference_id().to_string(), "EPSG:4326");
//! ```

mod config;
pub mod error;
mod factory;
pub mod feature;
mod registry;
mod srid;
pub mod strategy;

pub use config::{FactoryConfig, ResolvedConfig, DEFAULT_BUFFER_RESOLUTION};
pub use error::{GeographyError, Result};
pub use factory::GeographyFactory;
pub use feature::{Feature, LineStringFeature, PointFeature, PolygonFeature};
pub use registry::{mercator_factory, spherical_factory, FactoryRegistry};
pub use srid::SpatialReferenceId;
pub use strategy::{
    CoordinateStrategy, MercatorStrategy, SphericalStrategy, Strategy, StrategyKind,
    MEAN_EARTH_RADIUS,
};

// Reexport geography_types
pub use geography_types;
