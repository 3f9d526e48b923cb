use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::order::{Order, OrderError, OrderStatus};
use crate::services::{OrderStore, StoreError};

// ============================================================================
// Order Lifecycle Service
// ============================================================================
//
// Guarded status transitions for persisted orders, driven by kitchen/admin
// callers. The transition rules themselves live on the Order aggregate;
// this service loads the order, applies the guard, and writes the accepted
// status back. No scheduling, no polling.
//
// ============================================================================

pub struct OrderLifecycle {
    store: Arc<dyn OrderStore>,
}

impl OrderLifecycle {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    /// Move an order to `to`, failing with `InvalidTransition` when the
    /// order's current status does not permit it. Returns the updated order.
    pub async fn transition(&self, order_id: Uuid, to: OrderStatus) -> Result<Order, OrderError> {
        let mut order = self.store.get(order_id).await.map_err(map_store_error)?;

        let from = order.status.clone();
        order.transition(to, Utc::now())?;

        self.store
            .update_status(order_id, order.status.clone(), order.actual_delivery_time)
            .await
            .map_err(map_store_error)?;

        tracing::info!(
            order_id = %order_id,
            from = ?from,
            to = ?order.status,
            "order status updated"
        );
        Ok(order)
    }

    /// Cancel an order; allowed from any pre-delivered status.
    pub async fn cancel(&self, order_id: Uuid) -> Result<Order, OrderError> {
        self.transition(order_id, OrderStatus::Cancelled).await
    }
}

fn map_store_error(e: StoreError) -> OrderError {
    match e {
        StoreError::NotFound(id) => OrderError::NotFound(id),
        other => OrderError::Persistence(other.to_string()),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::CheckoutService;
    use crate::config::CoreConfig;
    use crate::domain::cart::CartAggregate;
    use crate::domain::order::{Address, DeliveryOption, PaymentMethod};
    use crate::services::memory::{InMemoryOrderStore, MockPaymentGateway, StaticCatalog};
    use crate::services::Catalog;

    async fn placed_order(store: Arc<InMemoryOrderStore>) -> Order {
        let checkout = CheckoutService::new(
            store,
            Arc::new(MockPaymentGateway::new()),
            CoreConfig::default(),
        );
        let catalog = StaticCatalog::seeded();
        let burger = catalog.item("burger").await.unwrap();

        let mut cart = CartAggregate::new();
        cart.add_item(&burger, 1, vec![], None).unwrap();

        checkout
            .place_order(
                &mut cart,
                DeliveryOption::delivery(),
                PaymentMethod::Card,
                Address::new("1 Main St", "Springfield", "IL", "62704"),
                Uuid::new_v4(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_stepwise_path_to_delivered() {
        let store = Arc::new(InMemoryOrderStore::new());
        let order = placed_order(store.clone()).await;
        let lifecycle = OrderLifecycle::new(store.clone());

        for stage in [
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Delivered,
        ] {
            let updated = lifecycle.transition(order.id, stage.clone()).await.unwrap();
            assert_eq!(updated.status, stage);
        }

        let stored = store.get(order.id).await.unwrap();
        assert_eq!(stored.status, OrderStatus::Delivered);
        assert!(stored.actual_delivery_time.is_some());
    }

    #[tokio::test]
    async fn test_direct_jump_to_delivered_is_rejected() {
        let store = Arc::new(InMemoryOrderStore::new());
        let order = placed_order(store.clone()).await;
        let lifecycle = OrderLifecycle::new(store.clone());

        let err = lifecycle
            .transition(order.id, OrderStatus::Delivered)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition { .. }));

        // the rejected transition must not leak into the store
        assert_eq!(
            store.get(order.id).await.unwrap().status,
            OrderStatus::Pending
        );
    }

    #[tokio::test]
    async fn test_cancel_before_delivery_succeeds() {
        let store = Arc::new(InMemoryOrderStore::new());
        let order = placed_order(store.clone()).await;
        let lifecycle = OrderLifecycle::new(store.clone());

        lifecycle
            .transition(order.id, OrderStatus::Confirmed)
            .await
            .unwrap();
        lifecycle
            .transition(order.id, OrderStatus::Preparing)
            .await
            .unwrap();

        let cancelled = lifecycle.cancel(order.id).await.unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert_eq!(
            store.get(order.id).await.unwrap().status,
            OrderStatus::Cancelled
        );
    }

    #[tokio::test]
    async fn test_terminal_orders_cannot_move() {
        let store = Arc::new(InMemoryOrderStore::new());
        let order = placed_order(store.clone()).await;
        let lifecycle = OrderLifecycle::new(store.clone());

        lifecycle.cancel(order.id).await.unwrap();

        assert!(matches!(
            lifecycle.cancel(order.id).await,
            Err(OrderError::InvalidTransition { .. })
        ));
        assert!(matches!(
            lifecycle.transition(order.id, OrderStatus::Confirmed).await,
            Err(OrderError::InvalidTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_order_is_not_found() {
        let store = Arc::new(InMemoryOrderStore::new());
        let lifecycle = OrderLifecycle::new(store);

        let missing = Uuid::new_v4();
        assert!(matches!(
            lifecycle.transition(missing, OrderStatus::Confirmed).await,
            Err(OrderError::NotFound(id)) if id == missing
        ));
    }
}
