use core::str::FromStr;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use basketry_catalog::{Price, Service};
use basketry_core::{DomainError, ServiceId, SiteId};

/// Kind of service line in a basket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Delivery,
    Payment,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Delivery => "delivery",
            ServiceType::Payment => "payment",
        }
    }
}

impl FromStr for ServiceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delivery" => Ok(ServiceType::Delivery),
            "payment" => Ok(ServiceType::Payment),
            other => Err(DomainError::validation(format!("unknown service type '{other}'"))),
        }
    }
}

/// Delivery/payment option chosen for a basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderService {
    pub service_id: ServiceId,
    pub service_type: ServiceType,
    pub code: String,
    pub name: String,
    pub site_id: SiteId,
    pub price: Price,
    /// Values entered or selected by the customer for this option.
    #[serde(default)]
    pub attributes: BTreeMap<String, JsonValue>,
}

impl OrderService {
    pub fn copy_from(service: &Service, service_type: ServiceType, price: Price) -> Self {
        Self {
            service_id: service.id,
            service_type,
            code: service.code.clone(),
            name: service.label.clone(),
            site_id: service.site_id.clone(),
            price,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: BTreeMap<String, JsonValue>) -> Self {
        self.attributes = attributes;
        self
    }
}
