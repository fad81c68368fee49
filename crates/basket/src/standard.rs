//! Standard basket controller.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::{debug, info};

use basketry_catalog::{Product, Service};
use basketry_core::{AggregateRoot, ExpectedVersion, OrderId};
use basketry_order::{Address, AddressType, Basket, BasketValues, OrderService, Parts, ServiceType};

use crate::config::BasketConfig;
use crate::context::BasketContext;
use crate::controller::{BasketController, Chain, FrontendController, ProductSelection};
use crate::error::{BasketError, BasketResult};
use crate::services::BasketServices;
use crate::services::price::lowest_price;
use crate::store::BasketStore;

/// Basket controller working on the session basket of a `BasketContext`.
///
/// Every mutating operation saves the basket through the `BasketStore`. If the
/// save fails the in-memory basket is restored, so callers never observe a
/// change that was not persisted.
pub struct StandardBasket {
    context: BasketContext,
    config: BasketConfig,
    services: BasketServices,
    store: Arc<dyn BasketStore>,
    basket: Basket,
}

impl core::fmt::Debug for StandardBasket {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StandardBasket")
            .field("context", &self.context)
            .field("basket", &self.basket)
            .finish_non_exhaustive()
    }
}

impl StandardBasket {
    /// Opens the session basket of type `"default"`, creating an empty one if
    /// none was saved yet.
    pub fn open(
        context: BasketContext,
        config: BasketConfig,
        services: BasketServices,
        store: Arc<dyn BasketStore>,
    ) -> BasketResult<Self> {
        let basket = Self::session_basket(&context, store.as_ref(), "default")?;
        Ok(Self {
            context,
            config,
            services,
            store,
            basket,
        })
    }

    pub fn context(&self) -> &BasketContext {
        &self.context
    }

    fn session_basket(context: &BasketContext, store: &dyn BasketStore, basket_type: &str) -> BasketResult<Basket> {
        if let Some(basket) = store.session(&context.basket_key(basket_type))? {
            return Ok(basket);
        }

        let mut basket = Basket::new(context.site_id().clone(), context.currency());
        if let Some(customer) = context.customer_id() {
            basket = basket.with_customer(customer);
        }
        basket.set_type(basket_type)?;
        Ok(basket)
    }

    fn persist(&mut self) -> BasketResult<()> {
        let key = self.context.basket_key(self.basket.basket_type());
        let expected = ExpectedVersion::Exact(self.basket.version());
        self.basket = self.store.save(&key, self.basket.clone(), expected)?;
        Ok(())
    }

    /// Applies `change` to the basket and saves it; on any failure the basket is
    /// left as it was.
    fn mutate(&mut self, change: impl FnOnce(&mut Basket) -> BasketResult<()>) -> BasketResult<()> {
        let snapshot = self.basket.clone();
        let result = change(&mut self.basket).and_then(|()| self.persist());
        if result.is_err() {
            self.basket = snapshot;
        }
        result
    }
}

impl FrontendController for StandardBasket {
    fn controller_name(&self) -> &'static str {
        "basket"
    }

    fn into_basket(self: Box<Self>) -> Option<Box<dyn BasketController>> {
        Some(self)
    }
}

impl BasketController for StandardBasket {
    fn add(&mut self, values: BasketValues) -> Chain<'_> {
        self.mutate(|basket| {
            basket.set_values(values);
            Ok(())
        })?;
        Ok(self)
    }

    fn clear(&mut self) -> Chain<'_> {
        self.mutate(|basket| {
            basket.clear();
            Ok(())
        })?;
        Ok(self)
    }

    fn get(&self) -> &Basket {
        &self.basket
    }

    fn get_mut(&mut self) -> &mut Basket {
        &mut self.basket
    }

    fn save(&mut self) -> Chain<'_> {
        self.persist()?;
        Ok(self)
    }

    fn set_type(&mut self, basket_type: &str) -> Chain<'_> {
        if basket_type != self.basket.basket_type() {
            self.basket = Self::session_basket(&self.context, self.store.as_ref(), basket_type)?;
            debug!(basket_type, "switched session basket");
        }
        Ok(self)
    }

    fn store(&mut self) -> BasketResult<Basket> {
        if self.basket.products().is_empty() {
            return Err(BasketError::Validation("basket is empty".to_string()));
        }

        let order = self.store.store_order(self.basket.clone())?;
        info!(
            order_id = ?order.id_typed(),
            lines = order.products().len(),
            total = order.total(),
            "basket stored as order"
        );
        Ok(order)
    }

    fn load(&self, id: OrderId, parts: Parts, default: bool) -> BasketResult<Basket> {
        let not_found = || BasketError::NotFound(format!("order {id}"));
        let order = self.store.load_order(id)?.ok_or_else(not_found)?;

        if default && order.customer_id() != self.context.customer_id() {
            return Err(not_found());
        }
        Ok(order.filtered(parts))
    }

    fn add_product(&mut self, product: &Product, selection: ProductSelection) -> Chain<'_> {
        let services = self.services.clone();
        let quantity = services.check_selection(product, &selection)?;
        let attributes = services.selection_attributes(product, &selection)?;
        let prices = product.prices(Some("default"), Some("default"));
        let site_override = selection.site_override().cloned();

        // Variant attributes only identify the article of a selection product;
        // they are resolved before a concrete article reaches this controller.
        let line = services
            .order_products
            .copy_from(product)
            .with_quantity(quantity)
            .with_stock_type(self.config.stock_type(&selection.stock_type))
            .with_site_id(site_override.clone().unwrap_or_else(|| product.site_id().clone()))
            .with_attributes(attributes);

        let price = services.prices.calc_price(&line, &prices, quantity)?;
        let line = services.apply_price(line, price, site_override);

        debug!(product = %product.code(), quantity, "adding product");
        self.mutate(|basket| {
            basket.add_product(line);
            Ok(())
        })?;
        Ok(self)
    }

    fn delete_product(&mut self, position: usize) -> Chain<'_> {
        self.mutate(|basket| {
            basket.delete_product(position)?;
            Ok(())
        })?;
        Ok(self)
    }

    /// Re-checks the quantity against the catalog product and re-prices the
    /// line. Members of a bundle line are re-priced at the same quantity.
    fn update_product(&mut self, position: usize, quantity: f64) -> Chain<'_> {
        let services = self.services.clone();
        let line = self
            .basket
            .products()
            .get(position)
            .ok_or_else(|| BasketError::NotFound(format!("no product at position {position}")))?;
        let prod_id = line
            .prod_id
            .ok_or_else(|| BasketError::Unavailable(format!("line {position} has no product")))?;
        let product = services
            .products
            .product(&prod_id)
            .ok_or_else(|| BasketError::Unavailable(format!("product {prod_id} is not available")))?;

        let quantity = services.quantity.check_quantity(&product, quantity)?;
        let mut line = line.clone().with_quantity(quantity);
        let price = services
            .prices
            .calc_price(&line, &product.prices(Some("default"), Some("default")), quantity)?;
        line.price = price;

        let children = product.products(None, Some("default"));
        for member in &mut line.products {
            let child = children
                .iter()
                .find(|c| Some(c.id_typed()) == member.prod_id)
                .ok_or_else(|| {
                    BasketError::Unavailable(format!(
                        "member {} is no longer part of product {}",
                        member.prod_code,
                        product.code()
                    ))
                })?;
            member.price = services
                .prices
                .calc_price(member, &child.prices(Some("default"), Some("default")), quantity)?;
        }

        self.mutate(|basket| {
            *basket.product_mut(position)? = line;
            Ok(())
        })?;
        Ok(self)
    }

    fn add_coupon(&mut self, code: &str) -> Chain<'_> {
        let allowed = self.config.coupons_allowed;
        self.mutate(|basket| {
            if basket.coupons().len() >= allowed {
                return Err(BasketError::Validation(format!(
                    "number of coupon codes is limited to {allowed}"
                )));
            }
            basket.add_coupon(code)?;
            Ok(())
        })?;
        Ok(self)
    }

    fn delete_coupon(&mut self, code: &str) -> Chain<'_> {
        self.mutate(|basket| {
            basket.delete_coupon(code)?;
            Ok(())
        })?;
        Ok(self)
    }

    fn set_address(&mut self, address_type: AddressType, address: Option<Address>) -> Chain<'_> {
        self.mutate(|basket| {
            match address {
                Some(address) => {
                    address.validate()?;
                    basket.set_address(address_type, address);
                }
                None => basket.delete_address(address_type),
            }
            Ok(())
        })?;
        Ok(self)
    }

    fn add_service(&mut self, service: &Service, attributes: BTreeMap<String, JsonValue>) -> Chain<'_> {
        let service_type: ServiceType = service.service_type.parse()?;
        let price = lowest_price(&service.prices, 1.0, Some(self.context.currency()))
            .cloned()
            .ok_or_else(|| {
                BasketError::Unavailable(format!("no price available for service {}", service.code))
            })?;
        let line = OrderService::copy_from(service, service_type, price).with_attributes(attributes);

        self.mutate(|basket| {
            basket.add_service(line);
            Ok(())
        })?;
        Ok(self)
    }

    fn delete_service(&mut self, service_type: ServiceType) -> Chain<'_> {
        self.mutate(|basket| {
            basket.delete_service(service_type);
            Ok(())
        })?;
        Ok(self)
    }
}
