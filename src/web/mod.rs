//! Web server module
//!
//! Provides the HTTP API and serves the front-end files.

mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
