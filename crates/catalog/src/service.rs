use serde::{Deserialize, Serialize};

use basketry_core::{Entity, ServiceId, SiteId};

use crate::price::Price;

/// Delivery or payment option offered by the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    /// `"delivery"` or `"payment"`.
    pub service_type: String,
    pub code: String,
    pub label: String,
    pub site_id: SiteId,
    #[serde(default)]
    pub prices: Vec<Price>,
}

impl Service {
    pub fn new(
        id: ServiceId,
        service_type: impl Into<String>,
        code: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id,
            service_type: service_type.into(),
            code: code.into(),
            label: label.into(),
            site_id: SiteId::default(),
            prices: Vec::new(),
        }
    }

    pub fn with_price(mut self, price: Price) -> Self {
        self.prices.push(price);
        self
    }

    pub fn with_site(mut self, site_id: SiteId) -> Self {
        self.site_id = site_id;
        self
    }
}

impl Entity for Service {
    type Id = ServiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
