use std::collections::HashMap;

use basketry_core::SiteId;

use super::VendorResolver;

/// Site labels by site id.
#[derive(Debug, Clone, Default)]
pub struct SiteDirectory {
    labels: HashMap<SiteId, String>,
}

impl SiteDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_site(mut self, site_id: SiteId, label: impl Into<String>) -> Self {
        self.labels.insert(site_id, label.into());
        self
    }
}

impl VendorResolver for SiteDirectory {
    fn vendor(&self, site_id: &SiteId) -> String {
        self.labels.get(site_id).cloned().unwrap_or_default()
    }
}
