//! HTTP networking module
//!
//! Provides the HTTP client used to call upstream providers.

mod client;
mod error;
mod response;

pub use client::HttpClient;
pub use error::UpstreamError;
pub use response::UpstreamBody;
