//! Basket controller contract.

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use basketry_catalog::{Product, Service};
use basketry_core::{AttributeId, OrderId, SiteId};
use basketry_order::{Address, AddressType, Basket, BasketValues, Parts, ServiceType};

use crate::error::BasketResult;

/// Result of a chainable basket operation: the controller itself, so calls can
/// be strung together with `?`.
///
/// ```ignore
/// controller.add_coupon("SUMMER")?.delete_service(ServiceType::Payment)?;
/// ```
pub type Chain<'a> = BasketResult<&'a mut dyn BasketController>;

/// Any frontend controller handed around by the platform.
///
/// Decorators only accept basket controllers; `into_basket` lets them check
/// that at construction time instead of failing on first use.
pub trait FrontendController {
    /// Short name of the controller kind (`"basket"`, `"catalog"`, ...).
    fn controller_name(&self) -> &'static str;

    /// Converts into a basket controller, or `None` for other controller kinds.
    fn into_basket(self: Box<Self>) -> Option<Box<dyn BasketController>>;
}

/// What the customer picked when adding a product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSelection {
    pub quantity: f64,
    /// Variant-building attributes identifying an article of a selection product.
    pub variant: Vec<AttributeId>,
    /// Chosen configurable attributes with their quantities.
    pub config: BTreeMap<AttributeId, f64>,
    /// Free-form values keyed by attribute.
    pub custom: BTreeMap<AttributeId, String>,
    pub stock_type: String,
    /// Site the product is sold from; `None` uses the product's site.
    pub site_id: Option<SiteId>,
}

impl Default for ProductSelection {
    fn default() -> Self {
        Self {
            quantity: 1.0,
            variant: Vec::new(),
            config: BTreeMap::new(),
            custom: BTreeMap::new(),
            stock_type: "default".to_string(),
            site_id: None,
        }
    }
}

impl ProductSelection {
    pub fn new(quantity: f64) -> Self {
        Self {
            quantity,
            ..Self::default()
        }
    }

    pub fn with_variant(mut self, id: AttributeId) -> Self {
        self.variant.push(id);
        self
    }

    pub fn with_config(mut self, id: AttributeId, quantity: f64) -> Self {
        self.config.insert(id, quantity);
        self
    }

    pub fn with_custom(mut self, id: AttributeId, value: impl Into<String>) -> Self {
        self.custom.insert(id, value.into());
        self
    }

    pub fn with_stock_type(mut self, stock_type: impl Into<String>) -> Self {
        self.stock_type = stock_type.into();
        self
    }

    pub fn with_site(mut self, site_id: SiteId) -> Self {
        self.site_id = Some(site_id);
        self
    }

    pub fn custom_ids(&self) -> Vec<AttributeId> {
        self.custom.keys().copied().collect()
    }

    pub fn config_ids(&self) -> Vec<AttributeId> {
        self.config.keys().copied().collect()
    }

    /// The site override, ignoring an empty site id.
    pub fn site_override(&self) -> Option<&SiteId> {
        self.site_id.as_ref().filter(|s| !s.is_empty())
    }
}

/// Operations on the basket of the current session.
///
/// Mutating operations return the controller for chaining. `get`/`get_mut`
/// expose the current basket; `store` and `load` hand back order snapshots.
pub trait BasketController: FrontendController + core::fmt::Debug {
    /// Sets order values such as the customer comment.
    fn add(&mut self, values: BasketValues) -> Chain<'_>;

    /// Empties the basket: products, coupons, addresses and services.
    fn clear(&mut self) -> Chain<'_>;

    fn get(&self) -> &Basket;

    fn get_mut(&mut self) -> &mut Basket;

    /// Persists the current basket content.
    fn save(&mut self) -> Chain<'_>;

    /// Switches to the session basket of another type.
    fn set_type(&mut self, basket_type: &str) -> Chain<'_>;

    /// Stores the basket as an order and returns it with its id assigned.
    fn store(&mut self) -> BasketResult<Basket>;

    /// Loads a stored order. `default` restricts the lookup to the current customer.
    fn load(&self, id: OrderId, parts: Parts, default: bool) -> BasketResult<Basket>;

    fn add_product(&mut self, product: &Product, selection: ProductSelection) -> Chain<'_>;

    fn delete_product(&mut self, position: usize) -> Chain<'_>;

    fn update_product(&mut self, position: usize, quantity: f64) -> Chain<'_>;

    fn add_coupon(&mut self, code: &str) -> Chain<'_>;

    fn delete_coupon(&mut self, code: &str) -> Chain<'_>;

    /// Sets the address of the given type, or removes it for `None`.
    fn set_address(&mut self, address_type: AddressType, address: Option<Address>) -> Chain<'_>;

    fn add_service(&mut self, service: &Service, attributes: BTreeMap<String, JsonValue>) -> Chain<'_>;

    fn delete_service(&mut self, service_type: ServiceType) -> Chain<'_>;
}
