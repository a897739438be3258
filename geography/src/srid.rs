use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Identifier of the spatial reference reported by features.
///
/// The only available value is [`SpatialReferenceId::EPSG_4326`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SpatialReferenceId(u32);

impl SpatialReferenceId {
    /// WGS84 latitude and longitude.
    pub const EPSG_4326: Self = Self(4326);

    /// Numeric EPSG code.
    pub const fn code(&self) -> u32 {
        self.0
    }
}

impl Display for SpatialReferenceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epsg_4326() {
        assert_eq!(SpatialReferenceId::EPSG_4326.code(), 4326);
        assert_eq!(SpatialReferenceId::EPSG_4326.to_string(), "EPSG:4326");
    }
}
