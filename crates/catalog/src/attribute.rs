use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use basketry_core::{AttributeId, Entity};

use crate::price::Price;
use crate::product::Product;

/// Catalog attribute (colour, size, gift wrap, engraving text, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: AttributeId,
    pub attr_type: String,
    pub code: String,
    pub label: String,
    /// Surcharges applied when the attribute is chosen as a config option.
    #[serde(default)]
    pub prices: Vec<Price>,
}

impl Attribute {
    pub fn new(
        id: AttributeId,
        attr_type: impl Into<String>,
        code: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id,
            attr_type: attr_type.into(),
            code: code.into(),
            label: label.into(),
            prices: Vec::new(),
        }
    }

    pub fn with_price(mut self, price: Price) -> Self {
        self.prices.push(price);
        self
    }
}

impl Entity for Attribute {
    type Id = AttributeId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Lookup of attribute items by id.
///
/// The platform loads the attributes referenced by a request up front; the
/// basket only ever reads from this map.
#[derive(Debug, Clone, Default)]
pub struct AttributeCatalog {
    items: HashMap<AttributeId, Attribute>,
}

impl AttributeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, attribute: Attribute) {
        self.items.insert(attribute.id, attribute);
    }

    pub fn get(&self, id: &AttributeId) -> Option<&Attribute> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &AttributeId) -> bool {
        self.items.contains_key(id)
    }

    /// Adds every attribute referenced by `product` and by its child products.
    pub fn extend_from_product(&mut self, product: &Product) {
        for attribute in product.attributes(None, None) {
            self.insert(attribute.clone());
        }
        for child in product.products(None, None) {
            self.extend_from_product(child);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Attribute> for AttributeCatalog {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for attribute in iter {
            catalog.insert(attribute);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_keyed_by_attribute_id() {
        let red = Attribute::new(AttributeId::new(), "color", "red", "Red");
        let blue = Attribute::new(AttributeId::new(), "color", "blue", "Blue");
        let catalog: AttributeCatalog = vec![red.clone(), blue.clone()].into_iter().collect();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(&red.id).map(|a| a.code.as_str()), Some("red"));
        assert!(catalog.contains(&blue.id));
        assert!(!catalog.contains(&AttributeId::new()));
    }

    #[test]
    fn extend_from_product_walks_children() {
        use basketry_core::ProductId;

        let hidden = Attribute::new(AttributeId::new(), "weight", "500g", "500 g");
        let child_attr = Attribute::new(AttributeId::new(), "color", "red", "Red");
        let child = Product::new(ProductId::new(), "C1", "Child")
            .with_attribute("hidden", child_attr.clone());
        let bundle = Product::new(ProductId::new(), "B", "Bundle")
            .with_type("bundle")
            .with_attribute("hidden", hidden.clone())
            .with_product("default", child);

        let mut catalog = AttributeCatalog::new();
        catalog.extend_from_product(&bundle);

        assert!(catalog.contains(&hidden.id));
        assert!(catalog.contains(&child_attr.id));
    }

    #[test]
    fn reinserting_replaces_existing_item() {
        let id = AttributeId::new();
        let mut catalog = AttributeCatalog::new();
        catalog.insert(Attribute::new(id, "size", "s", "Small"));
        catalog.insert(Attribute::new(id, "size", "m", "Medium"));

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(&id).unwrap().code, "m");
    }

    #[test]
    fn relabelled_attribute_is_the_same_entity() {
        let small = Attribute::new(AttributeId::new(), "size", "s", "Small");
        let mut renamed = small.clone();
        renamed.label = "S".to_string();

        assert!(small.same_entity(&renamed));
        assert_ne!(small, renamed);
        assert!(!small.same_entity(&Attribute::new(AttributeId::new(), "size", "s", "Small")));
    }
}
