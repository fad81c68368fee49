use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use tracing::debug;

use basketry_core::{AggregateRoot, ExpectedVersion, OrderId};
use basketry_order::Basket;

use super::{BasketStore, StoreError};

/// In-memory basket store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryBasketStore {
    sessions: RwLock<HashMap<String, Basket>>,
    orders: RwLock<HashMap<OrderId, Basket>>,
}

impl InMemoryBasketStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_count(&self) -> usize {
        self.orders.read().map(|o| o.len()).unwrap_or(0)
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Backend("lock poisoned".to_string())
}

impl BasketStore for InMemoryBasketStore {
    fn session(&self, key: &str) -> Result<Option<Basket>, StoreError> {
        let sessions = self.sessions.read().map_err(poisoned)?;
        Ok(sessions.get(key).cloned())
    }

    fn save(&self, key: &str, mut basket: Basket, expected: ExpectedVersion) -> Result<Basket, StoreError> {
        let mut sessions = self.sessions.write().map_err(poisoned)?;

        let current = sessions.get(key).map(|b| b.version()).unwrap_or(0);
        expected.check(current)?;

        basket.mark_saved(Utc::now());
        debug!(key, version = basket.version(), lines = basket.products().len(), "basket saved");
        sessions.insert(key.to_string(), basket.clone());
        Ok(basket)
    }

    fn store_order(&self, mut basket: Basket) -> Result<Basket, StoreError> {
        let mut orders = self.orders.write().map_err(poisoned)?;

        let id = basket.id_typed().unwrap_or_default();
        basket.assign_id(id);
        basket.mark_saved(Utc::now());
        orders.insert(id, basket.clone());
        Ok(basket)
    }

    fn load_order(&self, id: OrderId) -> Result<Option<Basket>, StoreError> {
        let orders = self.orders.read().map_err(poisoned)?;
        Ok(orders.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basketry_core::SiteId;

    fn basket() -> Basket {
        Basket::new(SiteId::new("1."), "EUR")
    }

    #[test]
    fn save_bumps_version_and_is_visible_in_session() {
        let store = InMemoryBasketStore::new();
        let saved = store.save("k", basket(), ExpectedVersion::Exact(0)).unwrap();
        assert_eq!(saved.version(), 1);

        let loaded = store.session("k").unwrap().unwrap();
        assert_eq!(loaded.version(), 1);
        assert!(store.session("other").unwrap().is_none());
    }

    #[test]
    fn stale_save_is_rejected() {
        let store = InMemoryBasketStore::new();
        store.save("k", basket(), ExpectedVersion::Exact(0)).unwrap();

        let err = store.save("k", basket(), ExpectedVersion::Exact(0)).unwrap_err();
        assert!(matches!(err, StoreError::Concurrency(_)));

        assert!(store.save("k", basket(), ExpectedVersion::Any).is_ok());
    }

    #[test]
    fn store_order_assigns_id_once() {
        let store = InMemoryBasketStore::new();
        let order = store.store_order(basket()).unwrap();
        let id = order.id_typed().unwrap();

        let again = store.store_order(order).unwrap();
        assert_eq!(again.id_typed(), Some(id));
        assert_eq!(store.order_count(), 1);
        assert!(store.load_order(id).unwrap().is_some());
    }
}
