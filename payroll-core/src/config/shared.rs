use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use super::loader::{ConfigLoadError, load_rates};
use crate::RatesConfig;

/// Process-wide handle to the current rates snapshot.
///
/// Readers take an `Arc<RatesConfig>` and keep using it for as long as they
/// need; a reload swaps the whole snapshot instead of mutating it, so
/// in-flight calculations never observe a half-updated configuration.
#[derive(Debug, Clone)]
pub struct SharedRates {
    current: Arc<RwLock<Arc<RatesConfig>>>,
}

impl SharedRates {
    pub fn new(config: RatesConfig) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(config))),
        }
    }

    /// The snapshot in effect right now.
    pub fn snapshot(&self) -> Arc<RatesConfig> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Installs `config` and returns the snapshot it replaced.
    pub fn replace(
        &self,
        config: RatesConfig,
    ) -> Arc<RatesConfig> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, Arc::new(config))
    }

    /// Reloads from `path` (and the environment). On error the current
    /// snapshot stays in place.
    pub fn reload(
        &self,
        path: Option<&Path>,
    ) -> Result<(), ConfigLoadError> {
        let config = load_rates(path)?;
        self.replace(config);
        info!("rates configuration reloaded");
        Ok(())
    }
}

impl Default for SharedRates {
    fn default() -> Self {
        Self::new(RatesConfig::default())
    }
}
