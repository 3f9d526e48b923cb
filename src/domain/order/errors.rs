use uuid::Uuid;

use super::value_objects::OrderStatus;

// ============================================================================
// Order Business Rule Errors
// ============================================================================
//
// Every variant is a recoverable, user-facing condition. The UI layer owns
// the messaging; nothing here should abort the host process.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Cannot place an order from an empty cart")]
    EmptyCart,

    #[error("Delivery address is missing or incomplete")]
    InvalidAddress,

    #[error("Payment failed: {0}")]
    Payment(String),

    #[error("Order could not be persisted: {0}")]
    Persistence(String),

    #[error("Timed out waiting for {0}")]
    Timeout(&'static str),

    #[error("Invalid status transition: {from:?} -> {to:?}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Order not found: {0}")]
    NotFound(Uuid),
}
