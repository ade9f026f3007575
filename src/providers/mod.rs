//! Upstream providers
//!
//! Each route id selects one third-party catalog API. All of them speak the same
//! `api.php/provide/vod` JSON contract.

mod registry;

pub use registry::{Provider, ProviderRegistry, RouteId, UnknownRoute};
