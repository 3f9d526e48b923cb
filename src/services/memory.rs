use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::cart::CatalogItem;
use crate::domain::money::Money;
use crate::domain::order::{Order, OrderStatus, PaymentMethod};

use super::{Catalog, OrderStore, PaymentGateway, PaymentError, StoreError, TransactionReceipt};

// ============================================================================
// In-Memory Collaborators
// ============================================================================
//
// Deterministic implementations used by the demo binary and the test suite.
// Failure and latency injection replace the timer-based mocks the original
// client used, so tests never depend on wall-clock behavior they did not
// ask for.
//
// ============================================================================

/// Order store backed by a HashMap behind an RwLock.
#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<Uuid, Order>>,
    failing: AtomicBool,
    latency: Option<Duration>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Artificial delay before every call, for timeout tests.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    /// Make every subsequent call fail with `Unavailable`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.orders.read().map(|orders| orders.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn check_ready(&self) -> Result<(), StoreError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected failure".into()));
        }
        Ok(())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<Uuid, Order>>, StoreError> {
        self.orders
            .read()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<Uuid, Order>>, StoreError> {
        self.orders
            .write()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn save(&self, order: &Order) -> Result<Uuid, StoreError> {
        self.check_ready().await?;
        self.write()?.insert(order.id, order.clone());
        Ok(order.id)
    }

    async fn update_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
        delivered_at: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError> {
        self.check_ready().await?;
        let mut orders = self.write()?;
        let order = orders
            .get_mut(&order_id)
            .ok_or(StoreError::NotFound(order_id))?;

        order.status = status;
        if let Some(at) = delivered_at {
            order.actual_delivery_time = Some(at);
        }
        Ok(())
    }

    async fn get(&self, order_id: Uuid) -> Result<Order, StoreError> {
        self.check_ready().await?;
        self.read()?
            .get(&order_id)
            .cloned()
            .ok_or(StoreError::NotFound(order_id))
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, StoreError> {
        self.check_ready().await?;
        let mut orders: Vec<Order> = self
            .read()?
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by_key(|o| o.placed_at);
        Ok(orders)
    }
}

/// Payment gateway that always captures, unless told to decline or stall.
#[derive(Default)]
pub struct MockPaymentGateway {
    declining: AtomicBool,
    latency: Option<Duration>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    pub fn set_declining(&self, declining: bool) {
        self.declining.store(declining, Ordering::SeqCst);
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn charge(
        &self,
        amount: Money,
        method: &PaymentMethod,
    ) -> Result<TransactionReceipt, PaymentError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.declining.load(Ordering::SeqCst) {
            return Err(PaymentError::Declined("card declined".into()));
        }

        Ok(TransactionReceipt {
            transaction_id: format!("ch_{}", Uuid::new_v4().simple()),
            amount,
            method: method.clone(),
            processed_at: Utc::now(),
        })
    }
}

/// Fixed menu, seeded with the restaurant's sample items.
pub struct StaticCatalog {
    items: HashMap<String, CatalogItem>,
}

impl StaticCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self {
            items: items.into_iter().map(|i| (i.id.clone(), i)).collect(),
        }
    }

    pub fn seeded() -> Self {
        Self::new(vec![
            CatalogItem {
                id: "burger".into(),
                name: "Classic Burger".into(),
                price: Money::from_cents(1299),
                category: "Main Course".into(),
                is_available: true,
            },
            CatalogItem {
                id: "fries".into(),
                name: "Fries".into(),
                price: Money::from_cents(499),
                category: "Appetizers".into(),
                is_available: true,
            },
            CatalogItem {
                id: "shake".into(),
                name: "Vanilla Shake".into(),
                price: Money::from_cents(599),
                category: "Beverages".into(),
                is_available: true,
            },
            CatalogItem {
                id: "cheesecake".into(),
                name: "Cheesecake".into(),
                price: Money::from_cents(699),
                category: "Desserts".into(),
                is_available: false,
            },
        ])
    }
}

#[async_trait]
impl Catalog for StaticCatalog {
    async fn item(&self, item_id: &str) -> Option<CatalogItem> {
        self.items.get(item_id).cloned()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{Address, DeliveryOption};

    fn pickup_order(user_id: Uuid) -> Order {
        Order {
            id: Uuid::new_v4(),
            user_id,
            items: vec![],
            subtotal: Money::from_cents(1299),
            tax: Money::from_cents(104),
            delivery_fee: Money::ZERO,
            total: Money::from_cents(1403),
            delivery_option: DeliveryOption::pickup(),
            payment_method: PaymentMethod::Cash,
            delivery_address: Address::new("1 Main St", "Springfield", "IL", "62704"),
            status: OrderStatus::Pending,
            placed_at: Utc::now(),
            estimated_delivery_time: None,
            actual_delivery_time: None,
        }
    }

    #[tokio::test]
    async fn test_save_and_get_round_trip() {
        let store = InMemoryOrderStore::new();
        let order = pickup_order(Uuid::new_v4());

        let id = store.save(&order).await.unwrap();
        assert_eq!(id, order.id);
        assert_eq!(store.get(order.id).await.unwrap(), order);
    }

    #[tokio::test]
    async fn test_get_unknown_order_is_not_found() {
        let store = InMemoryOrderStore::new();
        let missing = Uuid::new_v4();
        assert!(matches!(
            store.get(missing).await,
            Err(StoreError::NotFound(id)) if id == missing
        ));
    }

    #[tokio::test]
    async fn test_update_status_stamps_delivery_time() {
        let store = InMemoryOrderStore::new();
        let order = pickup_order(Uuid::new_v4());
        store.save(&order).await.unwrap();

        let delivered_at = Utc::now();
        store
            .update_status(order.id, OrderStatus::Delivered, Some(delivered_at))
            .await
            .unwrap();

        let stored = store.get(order.id).await.unwrap();
        assert_eq!(stored.status, OrderStatus::Delivered);
        assert_eq!(stored.actual_delivery_time, Some(delivered_at));
    }

    #[tokio::test]
    async fn test_list_by_user_filters_and_sorts() {
        let store = InMemoryOrderStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let mut first = pickup_order(alice);
        first.placed_at = Utc::now() - chrono::Duration::minutes(10);
        let second = pickup_order(alice);

        store.save(&second).await.unwrap();
        store.save(&first).await.unwrap();
        store.save(&pickup_order(bob)).await.unwrap();

        let orders = store.list_by_user(alice).await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, first.id);
        assert_eq!(orders[1].id, second.id);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = InMemoryOrderStore::new();
        store.set_failing(true);

        let order = pickup_order(Uuid::new_v4());
        assert!(matches!(
            store.save(&order).await,
            Err(StoreError::Unavailable(_))
        ));

        store.set_failing(false);
        assert!(store.save(&order).await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_gateway_charges_and_declines() {
        let gateway = MockPaymentGateway::new();
        let receipt = gateway
            .charge(Money::from_cents(3644), &PaymentMethod::Card)
            .await
            .unwrap();
        assert_eq!(receipt.amount, Money::from_cents(3644));
        assert!(receipt.transaction_id.starts_with("ch_"));

        gateway.set_declining(true);
        assert!(matches!(
            gateway
                .charge(Money::from_cents(100), &PaymentMethod::Card)
                .await,
            Err(PaymentError::Declined(_))
        ));
    }

    #[tokio::test]
    async fn test_seeded_catalog_lookup() {
        let catalog = StaticCatalog::seeded();

        let burger = catalog.item("burger").await.unwrap();
        assert_eq!(burger.price, Money::from_cents(1299));
        assert!(burger.is_available);

        assert!(!catalog.item("cheesecake").await.unwrap().is_available);
        assert!(catalog.item("sushi").await.is_none());
    }
}
