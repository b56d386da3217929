//! Feed error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),
}

impl FeedError {
    /// True for malformed-payload failures (as opposed to relevance filtering).
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError(_) | Self::Json(_))
    }
}

pub type FeedResult<T> = Result<T, FeedError>;
