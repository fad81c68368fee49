use core::str::FromStr;

use serde::{Deserialize, Serialize};

use basketry_catalog::{Price, Product};
use basketry_core::{AttributeId, DomainError, ProductId, SiteId, ValueObject};

/// Category of an attribute attached to an order line.
///
/// The categories are disjoint: the same catalog attribute can appear once per
/// group on a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeGroup {
    /// Free-form key/value pairs entered by the customer.
    Custom,
    /// Options chosen from the product's configurable attributes.
    Config,
    /// Attributes implicitly attached to the product, not shown to the customer.
    Hidden,
    /// Attributes identifying an article within a selection product.
    Variant,
}

impl AttributeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeGroup::Custom => "custom",
            AttributeGroup::Config => "config",
            AttributeGroup::Hidden => "hidden",
            AttributeGroup::Variant => "variant",
        }
    }
}

impl core::fmt::Display for AttributeGroup {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeGroup {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "custom" => Ok(AttributeGroup::Custom),
            "config" => Ok(AttributeGroup::Config),
            "hidden" => Ok(AttributeGroup::Hidden),
            "variant" => Ok(AttributeGroup::Variant),
            other => Err(DomainError::validation(format!("unknown attribute group '{other}'"))),
        }
    }
}

/// Attribute record stored on an order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderProductAttribute {
    pub attribute_id: AttributeId,
    pub group: AttributeGroup,
    /// Attribute type code of the catalog attribute (e.g. `"color"`).
    pub code: String,
    pub name: String,
    /// Customer value for custom attributes, the attribute code otherwise.
    pub value: String,
    pub quantity: f64,
}

impl ValueObject for OrderProductAttribute {}

/// Order line: one product with quantity, attributes and price inside a basket.
///
/// Bundle lines carry their members in `products`; each member points back to
/// the bundle through `parent_product_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderProduct {
    pub prod_id: Option<ProductId>,
    pub prod_code: String,
    pub name: String,
    pub product_type: String,
    pub site_id: SiteId,
    pub vendor: String,
    pub stock_type: String,
    pub quantity: f64,
    pub price: Price,
    pub attributes: Vec<OrderProductAttribute>,
    pub products: Vec<OrderProduct>,
    pub parent_product_id: Option<ProductId>,
}

impl Default for OrderProduct {
    fn default() -> Self {
        Self::empty()
    }
}

impl OrderProduct {
    /// Blank order line, not yet tied to any product.
    pub fn empty() -> Self {
        Self {
            prod_id: None,
            prod_code: String::new(),
            name: String::new(),
            product_type: "default".to_string(),
            site_id: SiteId::default(),
            vendor: String::new(),
            stock_type: "default".to_string(),
            quantity: 1.0,
            price: Price::new("", 0),
            attributes: Vec::new(),
            products: Vec::new(),
            parent_product_id: None,
        }
    }

    /// Copies the descriptive fields of a catalog product into this line.
    pub fn copy_from(mut self, product: &Product) -> Self {
        self.prod_id = Some(product.id_typed());
        self.prod_code = product.code().to_string();
        self.name = product.label().to_string();
        self.product_type = product.product_type().to_string();
        self.site_id = product.site_id().clone();
        self
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_stock_type(mut self, stock_type: impl Into<String>) -> Self {
        self.stock_type = stock_type.into();
        self
    }

    pub fn with_site_id(mut self, site_id: SiteId) -> Self {
        self.site_id = site_id;
        self
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self
    }

    pub fn with_price(mut self, price: Price) -> Self {
        self.price = price;
        self
    }

    pub fn with_attributes(mut self, attributes: Vec<OrderProductAttribute>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_products(mut self, products: Vec<OrderProduct>) -> Self {
        self.products = products;
        self
    }

    pub fn with_parent_product_id(mut self, parent: ProductId) -> Self {
        self.parent_product_id = Some(parent);
        self
    }

    /// Attribute records of one group, in insertion order.
    pub fn attributes_of(&self, group: AttributeGroup) -> impl Iterator<Item = &OrderProductAttribute> {
        self.attributes.iter().filter(move |a| a.group == group)
    }

    pub fn attribute(&self, group: AttributeGroup, code: &str) -> Option<&OrderProductAttribute> {
        self.attributes_of(group).find(|a| a.code == code)
    }

    pub fn is_bundle_member(&self) -> bool {
        self.parent_product_id.is_some()
    }
}
