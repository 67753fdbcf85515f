//! Persisting whole section settings to the backend.
//!
//! Saves are fire-and-forget and unordered. Each save carries the full
//! settings snapshot, so whichever completes last wins.

pub mod dispatcher;
pub mod http;

pub use dispatcher::SaveDispatcher;
pub use http::HttpGateway;

use crate::section::{SectionId, SectionSettings};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Backend rejected save with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("No async runtime available: {0}")]
    NoRuntime(String),
}

#[async_trait::async_trait]
pub trait PersistenceGateway: Send + Sync {
    async fn save(&self, section_id: &SectionId, settings: &SectionSettings) -> Result<(), PersistenceError>;
}
