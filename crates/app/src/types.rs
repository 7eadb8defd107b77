//! Main application state.

use crate::router::Router;
use anyhow::Context;
use backend::{BackendClient, PermitBackend};
use shared::settings::{self, AppSettings, BackendConfig};
use std::sync::Arc;

pub struct AppState {
    pub settings: AppSettings,
    pub backend: Arc<dyn PermitBackend>,
    pub router: Router,
}

impl AppState {
    pub fn new(settings: AppSettings, backend: Arc<dyn PermitBackend>) -> Self {
        Self {
            settings,
            backend,
            router: Router::new(),
        }
    }

    /// Settings from the config dir plus a client for this build's backend.
    pub fn load() -> anyhow::Result<Self> {
        let settings = settings::load_or_default();
        let config = BackendConfig::for_build(&settings).context("invalid backend address")?;
        tracing::info!(
            "backend {} (timeout {}s)",
            config.base_url,
            config.request_timeout.as_secs()
        );
        Ok(Self::new(settings, Arc::new(BackendClient::new(config))))
    }

    pub fn toggle_dark_mode(&mut self) {
        self.settings.dark_mode = !self.settings.dark_mode;
        let Some(path) = settings::config_path() else {
            return;
        };
        if let Err(e) = settings::save_to(&path, &self.settings) {
            tracing::warn!("could not save settings: {}", e);
        }
    }

    /// Poll outstanding requests. True while something is still in flight.
    pub fn poll(&mut self) -> bool {
        self.router.poll()
    }
}
