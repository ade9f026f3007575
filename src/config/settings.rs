//! Settings structures for vod-relay configuration

use crate::providers::RouteId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("provider id {0} is not a valid route (expected 1, 2 or 3)")]
    UnknownRoute(i64),

    #[error("provider id {0} is configured more than once")]
    DuplicateRoute(u8),

    #[error("provider {id} has an invalid base url: {source}")]
    InvalidBaseUrl {
        id: u8,
        #[source]
        source: url::ParseError,
    },

    #[error("request timeout must be positive, got {0}")]
    InvalidTimeout(f64),
}

/// Main settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    /// Provider overrides; routes not listed keep their built-in provider
    pub providers: Vec<ProviderConfig>,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate settings from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_yaml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Merge with environment variables (VOD_RELAY_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("VOD_RELAY_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("VOD_RELAY_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
    }

    /// Check provider overrides and timeouts
    pub fn validate(&self) -> Result<(), SettingsError> {
        let timeout = self.outgoing.request_timeout;
        if !timeout.is_finite() || timeout <= 0.0 {
            return Err(SettingsError::InvalidTimeout(timeout));
        }

        let mut seen = HashSet::new();
        for provider in &self.providers {
            let id = RouteId::try_from(provider.id)
                .map_err(|_| SettingsError::UnknownRoute(provider.id))?;
            if !seen.insert(id) {
                return Err(SettingsError::DuplicateRoute(id.get()));
            }
            url::Url::parse(&provider.base_url).map_err(|source| {
                SettingsError::InvalidBaseUrl {
                    id: id.get(),
                    source,
                }
            })?;
        }

        Ok(())
    }

    /// Find the override for a route, if any
    pub fn provider(&self, id: RouteId) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.id == i64::from(id.get()))
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Directory holding the front-end files
    pub static_dir: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: crate::DEFAULT_PORT,
            bind_address: "0.0.0.0".to_string(),
            static_dir: "public".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Per-request timeout in seconds, applied to each upstream call
    pub request_timeout: f64,
    /// User agent sent to upstream providers
    pub user_agent: String,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: crate::DEFAULT_TIMEOUT as f64,
            user_agent: format!("vod-relay/{}", crate::VERSION),
        }
    }
}

/// Upstream provider override
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Route id the provider answers for
    pub id: i64,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Base endpoint URL
    pub base_url: String,
}
