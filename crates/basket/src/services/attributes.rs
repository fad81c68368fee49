use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use tracing::warn;

use basketry_catalog::{AttributeCatalog, Product};
use basketry_core::AttributeId;
use basketry_order::{AttributeGroup, OrderProductAttribute};

use super::{AttributeChecker, AttributeResolver};
use crate::error::{BasketError, BasketResult};

/// An attribute id is valid for a group when one of the products references
/// the attribute with the group name as list type.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogAttributeChecker;

impl AttributeChecker for CatalogAttributeChecker {
    fn check_attributes(
        &self,
        products: &[&Product],
        group: AttributeGroup,
        ids: &[AttributeId],
    ) -> BasketResult<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let offered: HashSet<AttributeId> = products
            .iter()
            .flat_map(|p| p.attributes(None, Some(group.as_str())))
            .map(|a| a.id)
            .collect();
        let invalid: Vec<AttributeId> = ids
            .iter()
            .filter(|id| !offered.contains(id))
            .copied()
            .collect();

        if invalid.is_empty() {
            return Ok(());
        }

        let product = products
            .iter()
            .map(|p| p.code())
            .collect::<Vec<_>>()
            .join(", ");
        warn!(%group, %product, count = invalid.len(), "rejected attribute selection");
        Err(BasketError::InvalidAttribute {
            group,
            product,
            ids: invalid,
        })
    }
}

/// Builds attribute records from catalog attribute items.
#[derive(Debug, Clone)]
pub struct CatalogAttributeResolver {
    catalog: Arc<AttributeCatalog>,
}

impl CatalogAttributeResolver {
    pub fn new(catalog: Arc<AttributeCatalog>) -> Self {
        Self { catalog }
    }
}

impl AttributeResolver for CatalogAttributeResolver {
    fn order_product_attributes(
        &self,
        group: AttributeGroup,
        ids: &[AttributeId],
        values: &BTreeMap<AttributeId, String>,
        quantities: &BTreeMap<AttributeId, f64>,
    ) -> BasketResult<Vec<OrderProductAttribute>> {
        ids.iter()
            .map(|id| {
                let attribute = self.catalog.get(id).ok_or_else(|| {
                    BasketError::Unavailable(format!("attribute {id} is not available"))
                })?;

                Ok(OrderProductAttribute {
                    attribute_id: *id,
                    group,
                    code: attribute.attr_type.clone(),
                    name: attribute.label.clone(),
                    value: values
                        .get(id)
                        .cloned()
                        .unwrap_or_else(|| attribute.code.clone()),
                    quantity: quantities.get(id).copied().unwrap_or(1.0),
                })
            })
            .collect()
    }
}
