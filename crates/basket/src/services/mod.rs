//! Collaborators the basket controllers delegate to.
//!
//! Each concern sits behind a narrow trait so the platform can plug in its own
//! quantity rules, attribute checks, price engine and site directory. The
//! `Standard*`/`Catalog*` types are the in-process implementations used by
//! default wiring and tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use basketry_catalog::{AttributeCatalog, Price, Product, ProductCatalog};
use basketry_core::{AttributeId, ProductId, SiteId};
use basketry_order::{AttributeGroup, OrderProduct, OrderProductAttribute};

use crate::config::BasketConfig;
use crate::context::BasketContext;
use crate::controller::ProductSelection;
use crate::error::BasketResult;

pub mod attributes;
pub mod order_product;
pub mod price;
pub mod quantity;
pub mod vendor;

pub use attributes::{CatalogAttributeChecker, CatalogAttributeResolver};
pub use order_product::DefaultOrderProductFactory;
pub use price::TierPriceCalculator;
pub use quantity::StandardQuantityChecker;
pub use vendor::SiteDirectory;

/// Validates and normalizes the requested quantity of a product.
pub trait QuantityChecker: Send + Sync {
    /// Returns the quantity to use, possibly adjusted (e.g. rounded up to the
    /// product's quantity step).
    fn check_quantity(&self, product: &Product, quantity: f64) -> BasketResult<f64>;
}

/// Checks that attribute ids are offered by the products for a group.
pub trait AttributeChecker: Send + Sync {
    fn check_attributes(
        &self,
        products: &[&Product],
        group: AttributeGroup,
        ids: &[AttributeId],
    ) -> BasketResult<()>;
}

/// Turns attribute ids into order-line attribute records.
pub trait AttributeResolver: Send + Sync {
    /// `values` holds customer input (custom group), `quantities` the chosen
    /// amounts (config group); both may be empty. Records come back in `ids` order.
    fn order_product_attributes(
        &self,
        group: AttributeGroup,
        ids: &[AttributeId],
        values: &BTreeMap<AttributeId, String>,
        quantities: &BTreeMap<AttributeId, f64>,
    ) -> BasketResult<Vec<OrderProductAttribute>>;
}

/// Computes the price of an order line from candidate price tiers.
pub trait PriceCalculator: Send + Sync {
    fn calc_price(&self, line: &OrderProduct, prices: &[&Price], quantity: f64) -> BasketResult<Price>;
}

/// Creates order lines.
pub trait OrderProductFactory: Send + Sync {
    fn create(&self) -> OrderProduct;

    fn copy_from(&self, product: &Product) -> OrderProduct;
}

/// Maps a site id to the vendor name shown on order lines.
pub trait VendorResolver: Send + Sync {
    /// Empty when the site is unknown.
    fn vendor(&self, site_id: &SiteId) -> String;
}

/// Looks up catalog products by id (used when a line is re-priced).
pub trait ProductProvider: Send + Sync {
    fn product(&self, id: &ProductId) -> Option<Product>;
}

impl ProductProvider for ProductCatalog {
    fn product(&self, id: &ProductId) -> Option<Product> {
        self.get(id).cloned()
    }
}

/// Collaborator set shared by a controller and its decorators.
#[derive(Clone)]
pub struct BasketServices {
    pub quantity: Arc<dyn QuantityChecker>,
    pub attributes: Arc<dyn AttributeChecker>,
    pub resolver: Arc<dyn AttributeResolver>,
    pub prices: Arc<dyn PriceCalculator>,
    pub order_products: Arc<dyn OrderProductFactory>,
    pub vendors: Arc<dyn VendorResolver>,
    pub products: Arc<dyn ProductProvider>,
}

impl core::fmt::Debug for BasketServices {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BasketServices").finish_non_exhaustive()
    }
}

impl BasketServices {
    /// In-process collaborators backed by the given catalog data.
    pub fn standard(
        config: &BasketConfig,
        context: &BasketContext,
        attributes: AttributeCatalog,
        products: ProductCatalog,
        sites: SiteDirectory,
    ) -> Self {
        let attributes = Arc::new(attributes);
        Self {
            quantity: Arc::new(StandardQuantityChecker::new(config.max_quantity)),
            attributes: Arc::new(CatalogAttributeChecker),
            resolver: Arc::new(CatalogAttributeResolver::new(attributes.clone())),
            prices: Arc::new(TierPriceCalculator::new(attributes).with_currency(context.currency())),
            order_products: Arc::new(DefaultOrderProductFactory),
            vendors: Arc::new(sites),
            products: Arc::new(products),
        }
    }

    /// Quantity and attribute checks that must pass before any line is built.
    ///
    /// Returns the (possibly adjusted) quantity.
    pub fn check_selection(&self, product: &Product, selection: &ProductSelection) -> BasketResult<f64> {
        let quantity = self.quantity.check_quantity(product, selection.quantity)?;
        self.attributes
            .check_attributes(&[product], AttributeGroup::Custom, &selection.custom_ids())?;
        self.attributes
            .check_attributes(&[product], AttributeGroup::Config, &selection.config_ids())?;
        Ok(quantity)
    }

    /// Sets the computed price on `line`, then its site and vendor.
    ///
    /// The site is the caller's override if given, else the price's site, else
    /// the site the line already carries (the product's).
    pub fn apply_price(&self, line: OrderProduct, price: Price, site_override: Option<SiteId>) -> OrderProduct {
        let site_id = match site_override {
            Some(site_id) => site_id,
            None if price.site_id.is_empty() => line.site_id.clone(),
            None => price.site_id.clone(),
        };
        let vendor = self.vendors.vendor(&site_id);
        line.with_price(price).with_site_id(site_id).with_vendor(vendor)
    }

    /// Custom, config and hidden attribute records of a selection, concatenated
    /// in that order. Records are not merged across groups.
    pub fn selection_attributes(
        &self,
        product: &Product,
        selection: &ProductSelection,
    ) -> BasketResult<Vec<OrderProductAttribute>> {
        let none_values = BTreeMap::new();
        let none_quantities = BTreeMap::new();
        let hidden: Vec<AttributeId> = product
            .attributes(None, Some("hidden"))
            .iter()
            .map(|a| a.id)
            .collect();

        let mut records = self.resolver.order_product_attributes(
            AttributeGroup::Custom,
            &selection.custom_ids(),
            &selection.custom,
            &none_quantities,
        )?;
        records.extend(self.resolver.order_product_attributes(
            AttributeGroup::Config,
            &selection.config_ids(),
            &none_values,
            &selection.config,
        )?);
        records.extend(self.resolver.order_product_attributes(
            AttributeGroup::Hidden,
            &hidden,
            &none_values,
            &none_quantities,
        )?);
        Ok(records)
    }
}
