//! Basket persistence seam.

use thiserror::Error;

use basketry_core::{DomainError, ExpectedVersion, OrderId};
use basketry_order::Basket;

pub mod in_memory;

pub use in_memory::InMemoryBasketStore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The stored basket changed since it was loaded.
    #[error("concurrency conflict: {0}")]
    Concurrency(String),
    #[error("store backend failure: {0}")]
    Backend(String),
}

impl From<DomainError> for StoreError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Conflict(msg) => StoreError::Concurrency(msg),
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// Session baskets and stored orders.
///
/// Implementations own the persistence mechanics; controllers only decide when
/// to save.
pub trait BasketStore: Send + Sync {
    /// Current session basket under `key`, if any was saved.
    fn session(&self, key: &str) -> Result<Option<Basket>, StoreError>;

    /// Saves the session basket and returns it with its new version.
    fn save(&self, key: &str, basket: Basket, expected: ExpectedVersion) -> Result<Basket, StoreError>;

    /// Persists the basket as an order and returns it with its id assigned.
    fn store_order(&self, basket: Basket) -> Result<Basket, StoreError>;

    fn load_order(&self, id: OrderId) -> Result<Option<Basket>, StoreError>;
}
