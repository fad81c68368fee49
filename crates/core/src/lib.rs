//! Shared building blocks for the basket domain.
//!
//! This crate contains **pure domain** primitives (identifiers, errors and
//! marker traits). It has no knowledge of catalogs, baskets or storage.

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{AggregateRoot, ExpectedVersion};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{AttributeId, OrderId, ProductId, ServiceId, SiteId};
pub use value_object::ValueObject;
