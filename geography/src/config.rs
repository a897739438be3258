use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{GeographyError, Result};
use crate::strategy::StrategyKind;

/// Number of segments used to approximate a quarter of a circle when buffering, if the configuration does not
/// specify one.
pub const DEFAULT_BUFFER_RESOLUTION: u32 = 8;

/// Options of a [`GeographyFactory`](crate::GeographyFactory).
///
/// Unknown options are ignored when the configuration is parsed, so a configuration written for a newer version of
/// the crate can be read by an older one. Known options are validated by [`FactoryConfig::resolve`].
///
/// ```
/// use geography::{FactoryConfig, StrategyKind};
///
/// let config = FactoryConfig::from_json(r#"{"buffer_resolution": 4, "color": "red"}"#).unwrap();
/// assert_eq!(config.buffer_resolution, Some(4));
/// assert_eq!(config.resolve(StrategyKind::Mercator).unwrap().buffer_resolution(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryConfig {
    /// Number of segments approximating a quarter of a circle in buffering operations. Applies only to the
    /// mercator factory. Must be at least 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_resolution: Option<u32>,
}

impl FactoryConfig {
    /// Parses configuration from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| GeographyError::InvalidConfig(err.to_string()))
    }

    /// Sets the buffer resolution.
    pub fn with_buffer_resolution(mut self, buffer_resolution: u32) -> Self {
        self.buffer_resolution = Some(buffer_resolution);
        self
    }

    /// Validates the options relevant to the given strategy kind and applies defaults for the missing ones.
    pub fn resolve(&self, kind: StrategyKind) -> Result<ResolvedConfig> {
        let buffer_resolution = match (kind, self.buffer_resolution) {
            (StrategyKind::Mercator, Some(0)) => {
                return Err(GeographyError::InvalidConfig(
                    "buffer_resolution must be a positive integer".into(),
                ))
            }
            (StrategyKind::Mercator, Some(resolution)) => resolution,
            (StrategyKind::Spherical, Some(resolution)) => {
                warn!("buffer_resolution={resolution} is ignored by the spherical factory");
                DEFAULT_BUFFER_RESOLUTION
            }
            (_, None) => DEFAULT_BUFFER_RESOLUTION,
        };

        Ok(ResolvedConfig { buffer_resolution })
    }
}

/// Validated configuration with all defaults applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedConfig {
    buffer_resolution: u32,
}

impl ResolvedConfig {
    /// Number of segments approximating a quarter of a circle. Always at least 1.
    pub fn buffer_resolution(&self) -> u32 {
        self.buffer_resolution
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            buffer_resolution: DEFAULT_BUFFER_RESOLUTION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn defaults() {
        let resolved = FactoryConfig::default()
            .resolve(StrategyKind::Mercator)
            .unwrap();
        assert_eq!(resolved.buffer_resolution(), DEFAULT_BUFFER_RESOLUTION);
        assert_eq!(resolved, ResolvedConfig::default());
    }

    #[test]
    fn zero_resolution_is_rejected_for_mercator() {
        let config = FactoryConfig::default().with_buffer_resolution(0);
        assert_matches!(
            config.resolve(StrategyKind::Mercator),
            Err(GeographyError::InvalidConfig(_))
        );
    }

    #[test]
    fn resolution_is_ignored_for_spherical() {
        let config = FactoryConfig::default().with_buffer_resolution(0);
        assert_eq!(
            config
                .resolve(StrategyKind::Spherical)
                .unwrap()
                .buffer_resolution(),
            DEFAULT_BUFFER_RESOLUTION
        );
    }

    #[test]
    fn unknown_options_are_ignored() {
        let config = FactoryConfig::from_json(r#"{"srid": 3857, "uses_lenient_assertions": true}"#)
            .unwrap();
        assert_eq!(config, FactoryConfig::default());
    }

    #[test]
    fn malformed_known_option_is_invalid_config() {
        assert_matches!(
            FactoryConfig::from_json(r#"{"buffer_resolution": -2}"#),
            Err(GeographyError::InvalidConfig(_))
        );
        assert_matches!(
            FactoryConfig::from_json(r#"{"buffer_resolution": "eight"}"#),
            Err(GeographyError::InvalidConfig(_))
        );
    }

    #[test]
    fn null_option_means_default() {
        let config = FactoryConfig::from_json(r#"{"buffer_resolution": null}"#).unwrap();
        assert_eq!(config.buffer_resolution, None);
    }
}
