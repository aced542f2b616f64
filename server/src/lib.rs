//! HTTP server for the GitHub profile README generator.
//!
//! Serves the single-page UI at `/`, the generation endpoint at
//! `/api/generate` and a health check at `/api/health`.

mod error;
pub mod routes;

pub use error::{status_for, ApiError};
pub use routes::{router, AppState};
