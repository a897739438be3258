//! Implementations for the projections used by geographic features.
mod web_mercator;

pub use web_mercator::WebMercator;
