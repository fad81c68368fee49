use std::sync::Arc;

use basketry_catalog::{AttributeCatalog, Price};
use basketry_order::{AttributeGroup, OrderProduct};

use super::PriceCalculator;
use crate::error::{BasketError, BasketResult};

/// Lowest price among the tiers applicable to `quantity`.
///
/// A tier applies when its minimum quantity is not above `quantity` and, if a
/// currency is given, when it is in that currency. Ties keep catalog order.
pub fn lowest_price<'a>(
    prices: impl IntoIterator<Item = &'a Price>,
    quantity: f64,
    currency: Option<&str>,
) -> Option<&'a Price> {
    prices
        .into_iter()
        .filter(|p| p.quantity <= quantity)
        .filter(|p| currency.is_none_or(|c| p.currency == c))
        .fold(None, |best: Option<&Price>, p| match best {
            Some(b) if b.value <= p.value => Some(b),
            _ => Some(p),
        })
}

/// Tier-based price calculator.
///
/// Picks the lowest applicable tier for the line quantity and adds the
/// surcharges of priced config attributes.
#[derive(Debug, Clone)]
pub struct TierPriceCalculator {
    attributes: Arc<AttributeCatalog>,
    currency: Option<String>,
}

impl TierPriceCalculator {
    pub fn new(attributes: Arc<AttributeCatalog>) -> Self {
        Self {
            attributes,
            currency: None,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

impl PriceCalculator for TierPriceCalculator {
    fn calc_price(&self, line: &OrderProduct, prices: &[&Price], quantity: f64) -> BasketResult<Price> {
        let currency = self.currency.as_deref();
        let tier = lowest_price(prices.iter().copied(), quantity, currency).ok_or_else(|| {
            BasketError::Unavailable(format!(
                "no price available for product {} at quantity {quantity}",
                line.prod_code
            ))
        })?;

        let mut price = tier.clone().with_quantity(quantity);

        for record in line.attributes_of(AttributeGroup::Config) {
            let Some(attribute) = self.attributes.get(&record.attribute_id) else {
                continue;
            };
            if let Some(surcharge) = lowest_price(&attribute.prices, record.quantity, currency) {
                price.add_item(surcharge, record.quantity);
            }
        }

        Ok(price)
    }
}
