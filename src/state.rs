//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::pages::{PageError, PageResolver};

/// Error type for state initialization
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Failed to initialize page resolver: {0}")]
    ResolverInit(#[from] PageError),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    resolver: PageResolver,
}

impl AppState {
    /// Create the state with a filesystem-backed resolver
    pub fn new(config: Config) -> Result<Self, StateError> {
        let resolver = PageResolver::new(config.images.clone())?;
        Ok(Self::with_resolver(config, resolver))
    }

    /// Create the state around an already configured resolver
    pub fn with_resolver(config: Config, resolver: PageResolver) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, resolver }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the page resolver
    pub fn resolver(&self) -> &PageResolver {
        &self.inner.resolver
    }
}
