//! Basket and order-line model.
//!
//! The basket is the in-progress, not-yet-ordered collection of line items for
//! a shopping session. This crate holds the data structures only; the rules for
//! putting things into a basket live in `basketry-basket`.

pub mod address;
pub mod basket;
pub mod order_product;
pub mod service;

pub use address::{Address, AddressType};
pub use basket::{Basket, BasketValues, Parts};
pub use order_product::{AttributeGroup, OrderProduct, OrderProductAttribute};
pub use service::{OrderService, ServiceType};
