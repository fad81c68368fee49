use std::collections::HashMap;

use basketry_core::ProductId;

use crate::product::Product;

/// In-memory product lookup by id.
///
/// Intended for tests/dev and for request-scoped caches filled by the platform.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    items: HashMap<ProductId, Product>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, product: Product) {
        self.items.insert(product.id_typed(), product);
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Product> for ProductCatalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for product in iter {
            catalog.insert(product);
        }
        catalog
    }
}
