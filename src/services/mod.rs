use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::cart::CatalogItem;
use crate::domain::money::Money;
use crate::domain::order::{Order, OrderStatus, PaymentMethod};
use crate::utils::retry::IsTransient;

pub mod memory;

// ============================================================================
// External Collaborators - Persistence, Payment, Catalog
// ============================================================================
//
// The order core talks to the outside world only through these traits.
// Production wiring would put a real database and payment provider behind
// them; the in-memory implementations in `memory` back the demo binary and
// the test suite with deterministic behavior (no timer-based mocks).
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("order not found: {0}")]
    NotFound(Uuid),

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

impl IsTransient for StoreError {
    fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

/// Order persistence. `save` is an upsert keyed by the order id, so retrying
/// a save that may or may not have landed is safe.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn save(&self, order: &Order) -> Result<Uuid, StoreError>;

    /// Persist a status change; `delivered_at` accompanies the move to
    /// `Delivered` and is `None` otherwise.
    async fn update_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
        delivered_at: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError>;

    async fn get(&self, order_id: Uuid) -> Result<Order, StoreError>;

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("charge declined: {0}")]
    Declined(String),

    #[error("payment gateway unavailable: {0}")]
    GatewayUnavailable(String),
}

/// Proof of a captured charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub transaction_id: String,
    pub amount: Money,
    pub method: PaymentMethod,
    pub processed_at: DateTime<Utc>,
}

/// Payment processing. A failed charge must prevent order creation.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(
        &self,
        amount: Money,
        method: &PaymentMethod,
    ) -> Result<TransactionReceipt, PaymentError>;
}

/// Read-only menu lookup, consulted at add-to-cart time to snapshot the
/// current price and availability.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn item(&self, item_id: &str) -> Option<CatalogItem>;
}
