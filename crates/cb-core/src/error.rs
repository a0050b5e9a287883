//! # AppError
//!
//! Centralized error handling for the community board core.
//!
//! Every operation that returns an `Err` has left state untouched, so a caller
//! that ignores the value gets the fail-closed-silently behaviour the screens
//! rely on, while tests can still tell a policy rejection from a missing post.

use thiserror::Error;

use crate::session::AuthStage;

/// The primary error type for all cb-core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Resource not found (e.g., a post id that is on no board)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Rejected by the access policy (e.g., a gendered board)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Operation is not valid from the current auth stage
    #[error("cannot {action} while {stage:?}")]
    InvalidTransition {
        stage: AuthStage,
        action: &'static str,
    },

    /// Input the core cannot interpret (e.g., unknown board name)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// An external share or report surface failed
    #[error("surface error: {0}")]
    Surface(String),
}

impl AppError {
    pub fn post_not_found(id: &str) -> Self {
        Self::NotFound("post".to_string(), id.to_string())
    }
}

/// A specialized Result type for community board logic.
pub type Result<T> = std::result::Result<T, AppError>;
