//! Route table mapping route ids to upstream catalog providers

use crate::config::Settings;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Raised when a number does not name one of the fixed routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("route {0} does not exist")]
pub struct UnknownRoute(pub i64);

/// Identifier of an upstream route. Only 1, 2 and 3 can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct RouteId(u8);

impl RouteId {
    /// Every valid route, in order
    pub const ALL: [RouteId; 3] = [RouteId(1), RouteId(2), RouteId(3)];

    pub fn get(self) -> u8 {
        self.0
    }

    /// Route to suggest when this one is unreachable. Never returns `self`.
    pub fn alternate(self) -> RouteId {
        match self.0 {
            1 => RouteId(2),
            _ => RouteId(1),
        }
    }
}

impl Default for RouteId {
    fn default() -> Self {
        RouteId(1)
    }
}

impl TryFrom<i64> for RouteId {
    type Error = UnknownRoute;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1..=3 => Ok(RouteId(value as u8)),
            _ => Err(UnknownRoute(value)),
        }
    }
}

impl From<RouteId> for u8 {
    fn from(id: RouteId) -> u8 {
        id.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An upstream video catalog provider
#[derive(Debug, Clone, Serialize)]
pub struct Provider {
    pub id: RouteId,
    pub name: String,
    #[serde(skip)]
    pub base_url: String,
}

/// Built-in providers: (id, name, base url)
const BUILTIN_PROVIDERS: [(u8, &str, &str); 3] = [
    (1, "非凡资源", "http://cj.ffzyapi.com/api.php/provide/vod/"),
    (2, "量子资源", "https://cj.lziapi.com/api.php/provide/vod/"),
    (3, "天空资源", "https://api.tiankongapi.com/api.php/provide/vod/"),
];

/// Immutable route table, built once at startup
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    /// Indexed by route id minus one
    providers: [Provider; 3],
}

impl ProviderRegistry {
    /// Registry holding only the built-in providers
    pub fn builtin() -> Self {
        let providers = BUILTIN_PROVIDERS.map(|(id, name, url)| Provider {
            id: RouteId(id),
            name: name.to_string(),
            base_url: url.to_string(),
        });

        Self { providers }
    }

    /// Built-in providers with the overrides from settings applied
    pub fn from_settings(settings: &Settings) -> Self {
        let mut registry = Self::builtin();

        for provider in registry.providers.iter_mut() {
            let Some(config) = settings.provider(provider.id) else {
                continue;
            };
            provider.base_url = config.base_url.clone();
            if let Some(ref name) = config.name {
                provider.name = name.clone();
            }
        }

        registry
    }

    /// Get the provider serving a route
    pub fn get(&self, id: RouteId) -> &Provider {
        &self.providers[usize::from(id.get()) - 1]
    }

    /// All providers, ordered by route id
    pub fn all(&self) -> &[Provider] {
        &self.providers
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
