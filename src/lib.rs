//! vod-relay: a small search relay for third-party video catalog APIs
//!
//! The browser sends a term and a route id; the relay asks the provider behind that
//! route, retries once with a simpler query if needed, and hands the provider's JSON
//! back untouched.

pub mod config;
pub mod network;
pub mod providers;
pub mod search;
pub mod web;

pub use config::Settings;
pub use providers::{ProviderRegistry, RouteId};
pub use search::{Relay, SearchRequest};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for upstream requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 10;

/// Default listening port
pub const DEFAULT_PORT: u16 = 3000;
