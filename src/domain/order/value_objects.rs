use serde::{Deserialize, Serialize};

use crate::domain::money::Money;

// ============================================================================
// Order Value Objects
// ============================================================================

/// Closed set of order statuses. The transition table lives here so both the
/// aggregate and its tests can reason about reachability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Delivered and cancelled orders never change status again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// The single next stage on the forward path, if any.
    pub fn next_stage(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    /// Forward transitions are strictly sequential (no stage skipping);
    /// cancellation is reachable from every non-terminal status.
    pub fn can_transition_to(&self, to: &OrderStatus) -> bool {
        if *to == OrderStatus::Cancelled {
            return !self.is_terminal();
        }
        self.next_stage().as_ref() == Some(to)
    }
}

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentMethod {
    Pickup,
    Delivery,
}

/// A delivery choice offered at checkout: pickup is free, delivery carries a
/// flat fee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryOption {
    pub id: String,
    pub name: String,
    pub window: String,
    pub fee: Money,
    pub method: FulfillmentMethod,
}

impl DeliveryOption {
    pub fn pickup() -> Self {
        Self {
            id: "pickup".into(),
            name: "Pickup".into(),
            window: "15-20 min".into(),
            fee: Money::ZERO,
            method: FulfillmentMethod::Pickup,
        }
    }

    pub fn delivery() -> Self {
        Self {
            id: "delivery".into(),
            name: "Delivery".into(),
            window: "30-45 min".into(),
            fee: Money::from_cents(299),
            method: FulfillmentMethod::Delivery,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Cash,
    Wallet,
}

/// Structured delivery address. Considered populated when street and city
/// are both non-blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl Address {
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            state: state.into(),
            postal_code: postal_code.into(),
        }
    }

    pub fn is_populated(&self) -> bool {
        !self.street.trim().is_empty() && !self.city.trim().is_empty()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
