//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on the failures a request can surface to its caller
/// (validation, missing records, upstream article-service failures). Nothing
/// here is retried or swallowed; each request is isolated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. empty item list, non-positive quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found (order or article).
    #[error("not found: {0}")]
    NotFound(String),

    /// Token exchange with the article service failed. The HTTP layer mirrors
    /// the upstream status.
    #[error("could not obtain token (upstream status {status})")]
    Auth { status: u16 },

    /// An article service call failed for a reason other than not-found.
    /// `status` is absent for transport-level failures (timeouts etc.).
    #[error("article service error: {message}")]
    Upstream { status: Option<u16>, message: String },

    /// The persistence layer failed.
    #[error("store error: {0}")]
    Store(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn auth(status: u16) -> Self {
        Self::Auth { status }
    }

    pub fn upstream(status: Option<u16>, msg: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: msg.into(),
        }
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}
