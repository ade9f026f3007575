//! Application state shared across handlers

use crate::config::Settings;
use crate::network::HttpClient;
use crate::providers::ProviderRegistry;
use crate::search::Relay;
use std::sync::Arc;

/// Shared application state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Route table
    pub registry: Arc<ProviderRegistry>,
    /// Search relay
    pub relay: Arc<Relay>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, registry: ProviderRegistry, client: HttpClient) -> Self {
        let settings = Arc::new(settings);
        let registry = Arc::new(registry);
        let relay = Arc::new(Relay::new(client, registry.clone()));

        Self {
            settings,
            registry,
            relay,
        }
    }

    /// Build the whole state from settings alone
    pub fn from_settings(settings: Settings) -> anyhow::Result<Self> {
        let client = HttpClient::with_settings(&settings.outgoing)?;
        let registry = ProviderRegistry::from_settings(&settings);
        Ok(Self::new(settings, registry, client))
    }

    /// Directory served as the front-end
    pub fn static_dir(&self) -> &str {
        &self.settings.server.static_dir
    }
}
