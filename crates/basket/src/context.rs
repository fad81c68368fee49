use basketry_core::SiteId;

/// Request/session scope a basket controller operates in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketContext {
    session_id: String,
    site_id: SiteId,
    currency: String,
    customer_id: Option<String>,
}

impl BasketContext {
    pub fn new(session_id: impl Into<String>, site_id: SiteId, currency: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            site_id,
            currency: currency.into(),
            customer_id: None,
        }
    }

    pub fn with_customer(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn site_id(&self) -> &SiteId {
        &self.site_id
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    /// Storage key of the session basket of the given type.
    pub fn basket_key(&self, basket_type: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.session_id, self.site_id, self.currency, basket_type
        )
    }
}
