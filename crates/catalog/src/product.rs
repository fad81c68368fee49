use serde::{Deserialize, Serialize};

use basketry_core::{Entity, ProductId, SiteId};

use crate::attribute::Attribute;
use crate::price::Price;

/// Domain of a referenced item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefDomain {
    Price,
    Attribute,
    Product,
}

/// Item referenced by a product (a price tier, an attribute or a child product).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "domain", rename_all = "lowercase")]
pub enum RefItem {
    Price(Price),
    Attribute(Attribute),
    Product(Box<Product>),
}

impl RefItem {
    pub fn domain(&self) -> RefDomain {
        match self {
            RefItem::Price(_) => RefDomain::Price,
            RefItem::Attribute(_) => RefDomain::Attribute,
            RefItem::Product(_) => RefDomain::Product,
        }
    }

    /// Type of the referenced item itself (price type, attribute type, product type).
    pub fn item_type(&self) -> &str {
        match self {
            RefItem::Price(p) => &p.price_type,
            RefItem::Attribute(a) => &a.attr_type,
            RefItem::Product(p) => &p.product_type,
        }
    }
}

/// Reference from a product to another item, qualified by the list type
/// (`"default"`, `"hidden"`, `"config"`, `"custom"`, `"variant"`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListRef {
    pub list_type: String,
    pub item: RefItem,
}

/// Catalog product as loaded for the basket, including its referenced items.
///
/// References keep their catalog order; every lookup returns them in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    code: String,
    label: String,
    product_type: String,
    site_id: SiteId,
    /// Smallest orderable quantity step.
    scale: f64,
    refs: Vec<ListRef>,
}

impl Product {
    pub fn new(id: ProductId, code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            label: label.into(),
            product_type: "default".to_string(),
            site_id: SiteId::default(),
            scale: 1.0,
            refs: Vec::new(),
        }
    }

    pub fn with_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = product_type.into();
        self
    }

    pub fn with_site(mut self, site_id: SiteId) -> Self {
        self.site_id = site_id;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_ref(mut self, list_type: impl Into<String>, item: RefItem) -> Self {
        self.refs.push(ListRef {
            list_type: list_type.into(),
            item,
        });
        self
    }

    pub fn with_price(self, list_type: impl Into<String>, price: Price) -> Self {
        self.with_ref(list_type, RefItem::Price(price))
    }

    pub fn with_attribute(self, list_type: impl Into<String>, attribute: Attribute) -> Self {
        self.with_ref(list_type, RefItem::Attribute(attribute))
    }

    pub fn with_product(self, list_type: impl Into<String>, product: Product) -> Self {
        self.with_ref(list_type, RefItem::Product(Box::new(product)))
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn product_type(&self) -> &str {
        &self.product_type
    }

    pub fn site_id(&self) -> &SiteId {
        &self.site_id
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn refs(&self) -> &[ListRef] {
        &self.refs
    }

    /// Referenced items of `domain`, optionally filtered by item type and list type.
    ///
    /// `None` matches any type.
    pub fn ref_items<'a, 'b>(
        &'a self,
        domain: RefDomain,
        item_type: Option<&'b str>,
        list_type: Option<&'b str>,
    ) -> impl Iterator<Item = &'a RefItem> + use<'a, 'b> {
        self.refs
            .iter()
            .filter(move |r| r.item.domain() == domain)
            .filter(move |r| item_type.is_none_or(|t| r.item.item_type() == t))
            .filter(move |r| list_type.is_none_or(|t| r.list_type == t))
            .map(|r| &r.item)
    }

    pub fn prices(&self, item_type: Option<&str>, list_type: Option<&str>) -> Vec<&Price> {
        self.ref_items(RefDomain::Price, item_type, list_type)
            .filter_map(|item| match item {
                RefItem::Price(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn attributes(&self, item_type: Option<&str>, list_type: Option<&str>) -> Vec<&Attribute> {
        self.ref_items(RefDomain::Attribute, item_type, list_type)
            .filter_map(|item| match item {
                RefItem::Attribute(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    pub fn products(&self, item_type: Option<&str>, list_type: Option<&str>) -> Vec<&Product> {
        self.ref_items(RefDomain::Product, item_type, list_type)
            .filter_map(|item| match item {
                RefItem::Product(p) => Some(p.as_ref()),
                _ => None,
            })
            .collect()
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
