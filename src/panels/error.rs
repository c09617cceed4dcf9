use thiserror::Error;

use super::path::PanelPath;

/// Errors raised while turning JSON input into panels
#[derive(Debug, Error)]
pub enum PanelError {
    /// The input does not have the shape a panel tree needs
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Nesting went deeper than the configured limit
    #[error("panel nesting exceeds {limit} levels at '{path}'")]
    DepthExceeded { path: PanelPath, limit: usize },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl PanelError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

pub type PanelResult<T> = Result<T, PanelError>;
