//! Bundle expansion.
//!
//! A bundle is a catalog product whose `default` product references are sold
//! together as one basket line. The `Bundle` decoration turns such a product
//! into a single order line carrying one member line per referenced product.
//! Everything else passes through to the wrapped controller.

use tracing::{debug, error, info, warn};

use basketry_catalog::Product;
use basketry_order::OrderProduct;

use crate::config::BasketConfig;
use crate::controller::{BasketController, ProductSelection};
use crate::decorator::Decoration;
use crate::error::BasketResult;
use crate::services::BasketServices;

/// Decoration expanding bundle products into a line with member lines.
#[derive(Debug, Clone)]
pub struct Bundle {
    services: BasketServices,
    config: BasketConfig,
}

impl Bundle {
    pub fn new(services: BasketServices, config: &BasketConfig) -> Self {
        Self {
            services,
            config: config.clone(),
        }
    }

    /// Product type tag this decoration expands.
    pub fn bundle_type(&self) -> &str {
        &self.config.bundle_type
    }

    pub fn is_bundle(&self, product: &Product) -> bool {
        product.product_type() == self.config.bundle_type
    }

    /// Member lines for the `default` product references of `bundle`, in
    /// catalog order.
    ///
    /// Each member is priced from its own tiers at the bundle quantity.
    pub fn bundle_products(
        &self,
        bundle: &Product,
        quantity: f64,
        stock_type: &str,
    ) -> BasketResult<Vec<OrderProduct>> {
        bundle
            .products(None, Some("default"))
            .into_iter()
            .map(|child| {
                let member = self
                    .services
                    .order_products
                    .copy_from(child)
                    .with_stock_type(stock_type)
                    .with_parent_product_id(bundle.id_typed());
                let prices = child.prices(Some("default"), Some("default"));
                let price = self.services.prices.calc_price(&member, &prices, quantity)?;
                Ok(member.with_price(price))
            })
            .collect()
    }

    /// Builds the complete, priced bundle line without touching any basket.
    pub fn bundle_line(&self, product: &Product, selection: &ProductSelection) -> BasketResult<OrderProduct> {
        let services = &self.services;
        let quantity = services.check_selection(product, selection)?;
        let attributes = services.selection_attributes(product, selection)?;
        let prices = product.prices(Some("default"), Some("default"));
        let site_override = selection.site_override().cloned();
        let stock_type = self.config.stock_type(&selection.stock_type);

        let members = self.bundle_products(product, quantity, stock_type)?;
        let line = services
            .order_products
            .copy_from(product)
            .with_quantity(quantity)
            .with_stock_type(stock_type)
            .with_site_id(site_override.clone().unwrap_or_else(|| product.site_id().clone()))
            .with_attributes(attributes)
            .with_products(members);

        let price = services.prices.calc_price(&line, &prices, quantity)?;
        Ok(services.apply_price(line, price, site_override))
    }
}

impl Decoration for Bundle {
    fn name(&self) -> &'static str {
        "bundle"
    }

    fn add_product(
        &self,
        inner: &mut dyn BasketController,
        product: &Product,
        selection: ProductSelection,
    ) -> BasketResult<()> {
        if !self.is_bundle(product) {
            debug!(product = %product.code(), "forwarding non-bundle product");
            inner.add_product(product, selection)?;
            return Ok(());
        }

        let line = self.bundle_line(product, &selection)?;
        let members = line.products.len();
        let quantity = line.quantity;

        let position = inner.get_mut().add_product(line);
        let saved = inner.save().map(|_| ());
        if let Err(err) = saved {
            warn!(product = %product.code(), error = %err, "saving bundle failed; removing line");
            if let Err(rollback) = inner.get_mut().delete_product(position) {
                error!(product = %product.code(), position, error = %rollback, "removing unsaved bundle line failed");
            }
            return Err(err);
        }

        info!(
            product_id = %product.id_typed(),
            members,
            quantity,
            "bundle added to basket"
        );
        Ok(())
    }
}
