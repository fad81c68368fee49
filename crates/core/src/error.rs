//! Errors raised by the basket and catalog models themselves.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Rule violations detected by the model types (baskets, order lines, ids).
///
/// Controller-level failures such as unavailable prices are `BasketError`s in
/// `basketry-basket`; those wrap these through `From`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Rejected input, e.g. an empty coupon code or an unknown address type.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Position, coupon or order that is not there.
    #[error("not found: {0}")]
    NotFound(String),

    /// Duplicate entry or stale basket version.
    #[error("conflict: {0}")]
    Conflict(String),
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

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
