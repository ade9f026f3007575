//! Search relay
//!
//! Validates incoming searches and forwards them to the selected provider.

mod executor;
mod models;
mod summary;

pub use executor::{Relay, RelayError, RelayOutcome};
pub use models::{QueryAction, SearchRequest, ValidationError, MAX_TERM_CHARS};
pub use summary::ResultSummary;
