use std::time::Duration;

/// Failure modes of a roadmap tool call.
#[derive(Debug, thiserror::Error)]
pub enum RoadmapError {
    #[error("Invalid arguments: {0}")]
    Validation(String),
    #[error("Invalid filter expression: {0}")]
    InvalidFilter(String),
    #[error("Roadmap API did not respond within {} seconds", .0.as_secs())]
    Timeout(Duration),
    #[error("Roadmap API returned HTTP {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("Roadmap API returned a malformed body: {0}")]
    Decode(String),
    #[error("Roadmap API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Roadmap item {0} not found")]
    NotFound(String),
}
