use serde::{Deserialize, Serialize};

use basketry_core::{SiteId, ValueObject};

/// Price tier or computed price.
///
/// Catalog prices act as tiers: `quantity` is the minimum amount from which the
/// tier applies. Prices handed out by a price calculator carry the ordered
/// quantity instead. All amounts are in the smallest currency unit (e.g. cents).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub price_type: String,
    pub currency: String,
    pub value: i64,
    pub costs: i64,
    pub rebate: i64,
    /// Tax rate in basis points (19% = 1900).
    pub tax_rate: u32,
    pub quantity: f64,
    pub site_id: SiteId,
}

impl ValueObject for Price {}

impl Price {
    pub fn new(currency: impl Into<String>, value: i64) -> Self {
        Self {
            price_type: "default".to_string(),
            currency: currency.into(),
            value,
            costs: 0,
            rebate: 0,
            tax_rate: 0,
            quantity: 1.0,
            site_id: SiteId::default(),
        }
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_costs(mut self, costs: i64) -> Self {
        self.costs = costs;
        self
    }

    pub fn with_rebate(mut self, rebate: i64) -> Self {
        self.rebate = rebate;
        self
    }

    pub fn with_tax_rate(mut self, tax_rate: u32) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    pub fn with_type(mut self, price_type: impl Into<String>) -> Self {
        self.price_type = price_type.into();
        self
    }

    pub fn with_site(mut self, site_id: SiteId) -> Self {
        self.site_id = site_id;
        self
    }

    /// Adds `quantity` times another price (surcharges such as priced config
    /// attributes) to this one.
    pub fn add_item(&mut self, other: &Price, quantity: f64) {
        self.value += scale(other.value, quantity);
        self.costs += scale(other.costs, quantity);
        self.rebate += scale(other.rebate, quantity);
    }

    /// Line total (value plus costs, times quantity), rounded to minor units.
    pub fn total(&self) -> i64 {
        scale(self.value + self.costs, self.quantity)
    }
}

fn scale(amount: i64, quantity: f64) -> i64 {
    (amount as f64 * quantity).round() as i64
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let sign = if self.value < 0 { "-" } else { "" };
        let abs = self.value.unsigned_abs();
        write!(f, "{sign}{}.{:02} {}", abs / 100, abs % 100, self.currency)
    }
}
