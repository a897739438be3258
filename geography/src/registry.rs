use log::debug;
use std::sync::{Arc, OnceLock};

use crate::config::{FactoryConfig, ResolvedConfig};
use crate::error::Result;
use crate::factory::GeographyFactory;
use crate::strategy::StrategyKind;

static GLOBAL: OnceLock<FactoryRegistry> = OnceLock::new();

/// Holds at most one factory of every [`StrategyKind`].
///
/// A factory is created on the first request for its kind, using the configuration of that request. Later requests
/// for the same kind return the same instance and their configuration is ignored. Concurrent first requests create
/// exactly one factory: the slot of each kind is initialized once, and reading an initialized slot does not lock.
#[derive(Debug, Default)]
pub struct FactoryRegistry {
    spherical: OnceLock<Arc<GeographyFactory>>,
    mercator: OnceLock<Arc<GeographyFactory>>,
}

impl FactoryRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry used by [`spherical_factory`] and [`mercator_factory`].
    pub fn global() -> &'static FactoryRegistry {
        GLOBAL.get_or_init(FactoryRegistry::new)
    }

    /// Returns the factory of the given kind, creating it with `config` if it does not exist yet.
    ///
    /// Fails with [`GeographyError::InvalidConfig`](crate::GeographyError::InvalidConfig) only if the factory is
    /// created by this call and `config` is not valid.
    pub fn get_factory(
        &self,
        kind: StrategyKind,
        config: Option<&FactoryConfig>,
    ) -> Result<Arc<GeographyFactory>> {
        self.get_or_create(
            kind,
            config,
            || config.cloned().unwrap_or_default().resolve(kind),
            |resolved| GeographyFactory::with_resolved_config(kind, resolved),
        )
    }

    fn get_or_create(
        &self,
        kind: StrategyKind,
        config: Option<&FactoryConfig>,
        resolve: impl FnOnce() -> Result<ResolvedConfig>,
        create: impl FnOnce(&ResolvedConfig) -> GeographyFactory,
    ) -> Result<Arc<GeographyFactory>> {
        let slot = self.slot(kind);
        if let Some(factory) = slot.get() {
            if config.is_some() {
                debug!("Factory {kind} is already initialized, ignoring configuration {config:?}");
            }
            return Ok(factory.clone());
        }

        let resolved = match resolve() {
            Ok(resolved) => resolved,
            // The slot may have been initialized by a concurrent call while the configuration was checked.
            Err(err) => {
                return match slot.get() {
                    Some(factory) => {
                        debug!("Factory {kind} is already initialized, ignoring configuration {config:?}");
                        Ok(factory.clone())
                    }
                    None => Err(err),
                }
            }
        };

        let factory = slot.get_or_init(|| {
            debug!(
                "Initializing {kind} factory with buffer resolution {}",
                resolved.buffer_resolution()
            );
            Arc::new(create(&resolved))
        });

        Ok(factory.clone())
    }

    /// Shortcut for [`FactoryRegistry::get_factory`] with [`StrategyKind::Spherical`].
    pub fn spherical(&self, config: Option<&FactoryConfig>) -> Result<Arc<GeographyFactory>> {
        self.get_factory(StrategyKind::Spherical, config)
    }

    /// Shortcut for [`FactoryRegistry::get_factory`] with [`StrategyKind::Mercator`].
    pub fn mercator(&self, config: Option<&FactoryConfig>) -> Result<Arc<GeographyFactory>> {
        self.get_factory(StrategyKind::Mercator, config)
    }

    /// Returns true if the factory of the given kind has been created.
    pub fn is_initialized(&self, kind: StrategyKind) -> bool {
        self.slot(kind).get().is_some()
    }

    fn slot(&self, kind: StrategyKind) -> &OnceLock<Arc<GeographyFactory>> {
        match kind {
            StrategyKind::Spherical => &self.spherical,
            StrategyKind::Mercator => &self.mercator,
        }
    }
}

/// Returns the process-wide spherical factory. See [`SphericalStrategy`](crate::SphericalStrategy).
pub fn spherical_factory(config: Option<&FactoryConfig>) -> Result<Arc<GeographyFactory>> {
    FactoryRegistry::global().spherical(config)
}

/// Returns the process-wide mercator factory. See [`MercatorStrategy`](crate::MercatorStrategy).
pub fn mercator_factory(config: Option<&FactoryConfig>) -> Result<Arc<GeographyFactory>> {
    FactoryRegistry::global().mercator(config)
}
