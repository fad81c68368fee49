//! Basket frontend controllers.
//!
//! `StandardBasket` implements the basket operations against a session basket
//! and a `BasketStore`. Decorators (`BasketDecorator<D>`) wrap any basket
//! controller, forward every operation and let a `Decoration` override the ones
//! it cares about. `Bundle` is the decoration that expands bundle products into
//! a composite line item.
//!
//! Everything here is synchronous and request-scoped: one controller per
//! session/request, no locking inside controllers.

pub mod config;
pub mod context;
pub mod controller;
pub mod decorator;
pub mod error;
pub mod services;
pub mod standard;
pub mod store;

pub use config::BasketConfig;
pub use context::BasketContext;
pub use controller::{BasketController, Chain, FrontendController, ProductSelection};
pub use decorator::bundle::Bundle;
pub use decorator::factory::{build_controller, decorate};
pub use decorator::{BasketDecorator, Decoration};
pub use error::{BasketError, BasketResult};
pub use services::BasketServices;
pub use standard::StandardBasket;
pub use store::{BasketStore, InMemoryBasketStore, StoreError};
