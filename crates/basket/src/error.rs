//! Basket controller error model.

use thiserror::Error;

use basketry_core::{AttributeId, DomainError};
use basketry_order::AttributeGroup;

use crate::store::StoreError;

pub type BasketResult<T> = Result<T, BasketError>;

/// Failures surfaced by basket controllers and their collaborators.
///
/// Nothing is retried or swallowed: every error reaches the immediate caller
/// with the basket unchanged.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BasketError {
    /// Requested quantity is not orderable for the product.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Attribute ids that the product does not offer for the given group.
    #[error("invalid \"{group}\" references in product {product}: {ids:?}")]
    InvalidAttribute {
        group: AttributeGroup,
        product: String,
        ids: Vec<AttributeId>,
    },

    /// Product data (price, attribute, catalog item) needed for the line is missing.
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// A decorator was handed a controller of the wrong kind.
    #[error("controller mismatch: expected \"{expected}\" controller, got \"{found}\"")]
    ControllerMismatch { expected: &'static str, found: String },

    /// Input rejected by a basket rule (coupon limit, empty basket, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    /// Invalid basket configuration (unknown decorator, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DomainError> for BasketError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) => BasketError::Validation(msg),
            DomainError::InvalidId(msg) => BasketError::Validation(msg),
            DomainError::NotFound(msg) => BasketError::NotFound(msg),
            DomainError::Conflict(msg) => BasketError::Conflict(msg),
        }
    }
}
