use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use basketry_core::{AggregateRoot, DomainError, DomainResult, OrderId, SiteId};

use crate::address::{Address, AddressType};
use crate::order_product::OrderProduct;
use crate::service::{OrderService, ServiceType};

/// Selects which parts of a basket are loaded from storage.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parts(u8);

impl Parts {
    pub const NONE: Parts = Parts(0);
    pub const ADDRESS: Parts = Parts(1);
    pub const COUPON: Parts = Parts(2);
    pub const PRODUCT: Parts = Parts(4);
    pub const SERVICE: Parts = Parts(8);
    pub const ALL: Parts = Parts(15);

    pub fn contains(self, other: Parts) -> bool {
        self.0 & other.0 == other.0
    }
}

impl core::ops::BitOr for Parts {
    type Output = Parts;

    fn bitor(self, rhs: Parts) -> Parts {
        Parts(self.0 | rhs.0)
    }
}

impl Default for Parts {
    fn default() -> Self {
        Parts::ALL
    }
}

/// Free-form order values a customer can set on the basket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasketValues {
    pub comment: Option<String>,
    pub customer_reference: Option<String>,
}

/// Aggregate root: Basket.
///
/// Holds the line items, coupons, addresses and services of one shopping
/// session. `version` increases with every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    id: Option<OrderId>,
    version: u64,
    basket_type: String,
    customer_id: Option<String>,
    site_id: SiteId,
    currency: String,
    comment: String,
    customer_reference: String,
    products: Vec<OrderProduct>,
    coupons: Vec<String>,
    addresses: BTreeMap<AddressType, Vec<Address>>,
    services: BTreeMap<ServiceType, Vec<OrderService>>,
    updated_at: Option<DateTime<Utc>>,
}

impl Basket {
    pub fn new(site_id: SiteId, currency: impl Into<String>) -> Self {
        Self {
            id: None,
            version: 0,
            basket_type: "default".to_string(),
            customer_id: None,
            site_id,
            currency: currency.into(),
            comment: String::new(),
            customer_reference: String::new(),
            products: Vec::new(),
            coupons: Vec::new(),
            addresses: BTreeMap::new(),
            services: BTreeMap::new(),
            updated_at: None,
        }
    }

    pub fn with_customer(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    pub fn id_typed(&self) -> Option<OrderId> {
        self.id
    }

    pub fn basket_type(&self) -> &str {
        &self.basket_type
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    pub fn site_id(&self) -> &SiteId {
        &self.site_id
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn customer_reference(&self) -> &str {
        &self.customer_reference
    }

    pub fn products(&self) -> &[OrderProduct] {
        &self.products
    }

    pub fn coupons(&self) -> &[String] {
        &self.coupons
    }

    pub fn addresses(&self, address_type: AddressType) -> &[Address] {
        self.addresses
            .get(&address_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn services(&self, service_type: ServiceType) -> &[OrderService] {
        self.services
            .get(&service_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
            && self.coupons.is_empty()
            && self.addresses.is_empty()
            && self.services.is_empty()
    }

    /// Sum of all product and service line totals, in minor units.
    pub fn total(&self) -> i64 {
        let products: i64 = self.products.iter().map(|p| p.price.total()).sum();
        let services: i64 = self
            .services
            .values()
            .flatten()
            .map(|s| s.price.total())
            .sum();
        products + services
    }

    pub fn set_values(&mut self, values: BasketValues) {
        if let Some(comment) = values.comment {
            self.comment = comment;
        }
        if let Some(reference) = values.customer_reference {
            self.customer_reference = reference;
        }
    }

    pub fn set_type(&mut self, basket_type: impl Into<String>) -> DomainResult<()> {
        let basket_type = basket_type.into();
        if basket_type.trim().is_empty() {
            return Err(DomainError::validation("basket type cannot be empty"));
        }
        self.basket_type = basket_type;
        Ok(())
    }

    /// Appends a line item and returns its position.
    pub fn add_product(&mut self, product: OrderProduct) -> usize {
        self.products.push(product);
        self.products.len() - 1
    }

    pub fn delete_product(&mut self, position: usize) -> DomainResult<OrderProduct> {
        if position >= self.products.len() {
            return Err(DomainError::not_found(format!("no product at position {position}")));
        }
        Ok(self.products.remove(position))
    }

    pub fn product_mut(&mut self, position: usize) -> DomainResult<&mut OrderProduct> {
        self.products
            .get_mut(position)
            .ok_or_else(|| DomainError::not_found(format!("no product at position {position}")))
    }

    pub fn add_coupon(&mut self, code: impl Into<String>) -> DomainResult<()> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(DomainError::validation("coupon code cannot be empty"));
        }
        if self.coupons.contains(&code) {
            return Err(DomainError::conflict(format!("coupon '{code}' is already in the basket")));
        }
        self.coupons.push(code);
        Ok(())
    }

    pub fn delete_coupon(&mut self, code: &str) -> DomainResult<()> {
        let before = self.coupons.len();
        self.coupons.retain(|c| c != code);
        if self.coupons.len() == before {
            return Err(DomainError::not_found(format!("coupon '{code}' is not in the basket")));
        }
        Ok(())
    }

    pub fn set_address(&mut self, address_type: AddressType, address: Address) {
        self.addresses.insert(address_type, vec![address]);
    }

    pub fn delete_address(&mut self, address_type: AddressType) {
        self.addresses.remove(&address_type);
    }

    /// Replaces any service of the same type; a basket has one delivery and one
    /// payment option at most.
    pub fn add_service(&mut self, service: OrderService) {
        self.services.insert(service.service_type, vec![service]);
    }

    pub fn delete_service(&mut self, service_type: ServiceType) {
        self.services.remove(&service_type);
    }

    /// Removes products, coupons, addresses, services and customer values.
    ///
    /// Identity, type, customer and site stay untouched.
    pub fn clear(&mut self) {
        self.comment.clear();
        self.customer_reference.clear();
        self.products.clear();
        self.coupons.clear();
        self.addresses.clear();
        self.services.clear();
    }

    /// Copy of this basket containing only the requested parts.
    pub fn filtered(&self, parts: Parts) -> Basket {
        let mut basket = self.clone();
        if !parts.contains(Parts::PRODUCT) {
            basket.products.clear();
        }
        if !parts.contains(Parts::COUPON) {
            basket.coupons.clear();
        }
        if !parts.contains(Parts::ADDRESS) {
            basket.addresses.clear();
        }
        if !parts.contains(Parts::SERVICE) {
            basket.services.clear();
        }
        basket
    }

    /// Records a successful save. Called by basket stores only.
    pub fn mark_saved(&mut self, at: DateTime<Utc>) {
        self.version += 1;
        self.updated_at = Some(at);
    }

    /// Assigns the order id when the basket is stored as an order.
    pub fn assign_id(&mut self, id: OrderId) {
        self.id = Some(id);
    }
}

impl AggregateRoot for Basket {
    type Id = OrderId;

    fn id(&self) -> Option<&Self::Id> {
        self.id.as_ref()
    }

    fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basketry_catalog::Price;

    fn test_basket() -> Basket {
        Basket::new(SiteId::new("1."), "EUR")
    }

    fn line(code: &str, value: i64, quantity: f64) -> OrderProduct {
        OrderProduct {
            prod_code: code.to_string(),
            quantity,
            price: Price::new("EUR", value).with_quantity(quantity),
            ..OrderProduct::empty()
        }
    }

    #[test]
    fn add_product_returns_position() {
        let mut basket = test_basket();
        assert_eq!(basket.add_product(line("A", 100, 1.0)), 0);
        assert_eq!(basket.add_product(line("B", 200, 1.0)), 1);
        assert_eq!(basket.products().len(), 2);
    }

    #[test]
    fn delete_product_rejects_unknown_position() {
        let mut basket = test_basket();
        basket.add_product(line("A", 100, 1.0));

        let err = basket.delete_product(3).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));

        let removed = basket.delete_product(0).unwrap();
        assert_eq!(removed.prod_code, "A");
        assert!(basket.products().is_empty());
    }

    #[test]
    fn coupons_are_unique() {
        let mut basket = test_basket();
        basket.add_coupon("SUMMER").unwrap();

        let err = basket.add_coupon("SUMMER").unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        basket.delete_coupon("SUMMER").unwrap();
        assert!(basket.delete_coupon("SUMMER").is_err());
    }

    #[test]
    fn service_of_same_type_is_replaced() {
        let mut basket = test_basket();
        let service = basketry_catalog::Service::new(
            basketry_core::ServiceId::new(),
            "delivery",
            "dhl",
            "DHL",
        );
        basket.add_service(OrderService::copy_from(&service, ServiceType::Delivery, Price::new("EUR", 490)));
        basket.add_service(OrderService::copy_from(&service, ServiceType::Delivery, Price::new("EUR", 590)));

        assert_eq!(basket.services(ServiceType::Delivery).len(), 1);
        assert_eq!(basket.services(ServiceType::Delivery)[0].price.value, 590);
        assert!(basket.services(ServiceType::Payment).is_empty());
    }

    #[test]
    fn total_sums_products_and_services() {
        let mut basket = test_basket();
        basket.add_product(line("A", 1000, 2.0));
        basket.add_product(line("B", 250, 1.0));
        assert_eq!(basket.total(), 2250);
    }

    #[test]
    fn clear_keeps_identity_and_type() {
        let mut basket = test_basket().with_customer("cust-1");
        basket.set_type("quote").unwrap();
        basket.assign_id(OrderId::new());
        basket.add_product(line("A", 100, 1.0));
        basket.set_values(BasketValues {
            comment: Some("ring twice".to_string()),
            customer_reference: None,
        });

        basket.clear();

        assert!(basket.is_empty());
        assert_eq!(basket.comment(), "");
        assert_eq!(basket.basket_type(), "quote");
        assert_eq!(basket.customer_id(), Some("cust-1"));
        assert!(basket.id_typed().is_some());
    }

    #[test]
    fn filtered_drops_unrequested_parts() {
        let mut basket = test_basket();
        basket.add_product(line("A", 100, 1.0));
        basket.add_coupon("X").unwrap();

        let only_products = basket.filtered(Parts::PRODUCT);
        assert_eq!(only_products.products().len(), 1);
        assert!(only_products.coupons().is_empty());

        let both = basket.filtered(Parts::PRODUCT | Parts::COUPON);
        assert_eq!(both.coupons().len(), 1);
        assert!(Parts::ALL.contains(Parts::SERVICE));
        assert!(!Parts::NONE.contains(Parts::ADDRESS));
    }

    #[test]
    fn mark_saved_bumps_version() {
        let mut basket = test_basket();
        assert_eq!(basket.version(), 0);
        basket.mark_saved(Utc::now());
        basket.mark_saved(Utc::now());
        assert_eq!(basket.version(), 2);
        assert!(basket.updated_at().is_some());
    }

    #[test]
    fn empty_basket_type_is_rejected() {
        let mut basket = test_basket();
        assert!(basket.set_type("  ").is_err());
        assert_eq!(basket.basket_type(), "default");
    }
}
