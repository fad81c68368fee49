use core::str::FromStr;

use serde::{Deserialize, Serialize};

use basketry_core::DomainError;

/// Role of an address within an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    Payment,
    Delivery,
}

impl AddressType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressType::Payment => "payment",
            AddressType::Delivery => "delivery",
        }
    }
}

impl FromStr for AddressType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "payment" => Ok(AddressType::Payment),
            "delivery" => Ok(AddressType::Delivery),
            other => Err(DomainError::validation(format!("unknown address type '{other}'"))),
        }
    }
}

/// Postal address attached to a basket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub company: String,
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    pub address2: String,
    pub postal: String,
    pub city: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country_id: String,
    pub email: String,
}

impl Address {
    /// Minimal completeness check before an address is accepted into a basket.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.last_name.trim().is_empty() {
            return Err(DomainError::validation("address last name cannot be empty"));
        }
        if !self.country_id.is_empty() && self.country_id.len() != 2 {
            return Err(DomainError::validation(format!(
                "invalid country code '{}'",
                self.country_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_type_parses_known_names() {
        assert_eq!("payment".parse::<AddressType>().unwrap(), AddressType::Payment);
        assert_eq!("delivery".parse::<AddressType>().unwrap(), AddressType::Delivery);
        assert!("billing".parse::<AddressType>().is_err());
    }

    #[test]
    fn address_requires_last_name() {
        let err = Address::default().validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn address_rejects_long_country_code() {
        let address = Address {
            last_name: "Doe".to_string(),
            country_id: "DEU".to_string(),
            ..Address::default()
        };
        assert!(address.validate().is_err());
    }
}
