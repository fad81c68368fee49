//! Catalog read model consumed by the basket controllers.
//!
//! Products, prices, attributes and services as the basket sees them: already
//! loaded, with their referenced items attached. Nothing in this crate talks
//! to storage; the catalog is owned by the surrounding platform.

pub mod attribute;
pub mod price;
pub mod product;
pub mod repository;
pub mod service;

pub use attribute::{Attribute, AttributeCatalog};
pub use price::Price;
pub use product::{ListRef, Product, RefDomain, RefItem};
pub use repository::ProductCatalog;
pub use service::Service;
