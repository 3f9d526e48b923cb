use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::cart::LineItem;
use crate::domain::money::Money;

use super::errors::OrderError;
use super::value_objects::{Address, DeliveryOption, OrderStatus, PaymentMethod};

// ============================================================================
// Order Aggregate - Domain Logic
// ============================================================================
//
// An Order is an immutable snapshot of a cart plus the checkout choices,
// created once by the checkout service. After creation only `status` and
// `actual_delivery_time` ever change, and only through `transition`. The
// monetary fields are computed at creation and never edited.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    // Identity
    pub id: Uuid,
    pub user_id: Uuid,

    // Snapshot taken at placement time
    pub items: Vec<LineItem>,
    pub subtotal: Money,
    pub tax: Money,
    pub delivery_fee: Money,
    pub total: Money,
    pub delivery_option: DeliveryOption,
    pub payment_method: PaymentMethod,
    pub delivery_address: Address,

    // Mutable lifecycle state
    pub status: OrderStatus,

    // Timing
    pub placed_at: DateTime<Utc>,
    pub estimated_delivery_time: Option<DateTime<Utc>>,
    pub actual_delivery_time: Option<DateTime<Utc>>,
}

impl Order {
    /// Guarded status mutation. Fails when `to` is not reachable from the
    /// current status; on a successful move to `Delivered` the actual
    /// delivery time is recorded.
    pub fn transition(&mut self, to: OrderStatus, now: DateTime<Utc>) -> Result<(), OrderError> {
        if !self.status.can_transition_to(&to) {
            return Err(OrderError::InvalidTransition {
                from: self.status.clone(),
                to,
            });
        }

        if to == OrderStatus::Delivered {
            self.actual_delivery_time = Some(now);
        }
        self.status = to;
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::LineKey;

    fn sample_order() -> Order {
        let subtotal = Money::from_cents(3097);
        let tax = subtotal.percent_bps(800);
        let delivery_fee = Money::from_cents(299);

        Order {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            items: vec![LineItem {
                key: LineKey::new("burger", &[]),
                name: "Classic Burger".into(),
                unit_price: Money::from_cents(1299),
                quantity: 2,
                customizations: vec![],
                special_instructions: None,
            }],
            subtotal,
            tax,
            delivery_fee,
            total: subtotal + tax + delivery_fee,
            delivery_option: DeliveryOption::delivery(),
            payment_method: PaymentMethod::Card,
            delivery_address: Address::new("1 Main St", "Springfield", "IL", "62704"),
            status: OrderStatus::Pending,
            placed_at: Utc::now(),
            estimated_delivery_time: None,
            actual_delivery_time: None,
        }
    }

    #[test]
    fn test_full_forward_path_succeeds_stepwise() {
        let mut order = sample_order();
        let now = Utc::now();

        for stage in [
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Delivered,
        ] {
            order.transition(stage.clone(), now).unwrap();
            assert_eq!(order.status, stage);
        }

        assert_eq!(order.actual_delivery_time, Some(now));
    }

    #[test]
    fn test_skipping_to_delivered_is_rejected() {
        let mut order = sample_order();
        let err = order
            .transition(OrderStatus::Delivered, Utc::now())
            .unwrap_err();

        assert!(matches!(
            err,
            OrderError::InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Delivered,
            }
        ));
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.actual_delivery_time.is_none());
    }

    #[test]
    fn test_cancel_from_any_pre_delivered_status() {
        for advance in 0..4usize {
            let mut order = sample_order();
            let stages = [
                OrderStatus::Confirmed,
                OrderStatus::Preparing,
                OrderStatus::Ready,
            ];
            for stage in stages.iter().take(advance) {
                order.transition(stage.clone(), Utc::now()).unwrap();
            }

            order.transition(OrderStatus::Cancelled, Utc::now()).unwrap();
            assert_eq!(order.status, OrderStatus::Cancelled);
        }
    }

    #[test]
    fn test_terminal_orders_reject_all_transitions() {
        let mut delivered = sample_order();
        for stage in [
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Delivered,
        ] {
            delivered.transition(stage, Utc::now()).unwrap();
        }
        assert!(delivered
            .transition(OrderStatus::Cancelled, Utc::now())
            .is_err());

        let mut cancelled = sample_order();
        cancelled
            .transition(OrderStatus::Cancelled, Utc::now())
            .unwrap();
        assert!(cancelled
            .transition(OrderStatus::Confirmed, Utc::now())
            .is_err());
    }

    #[test]
    fn test_monetary_fields_stay_fixed_through_lifecycle() {
        let mut order = sample_order();
        let (subtotal, tax, fee, total) =
            (order.subtotal, order.tax, order.delivery_fee, order.total);

        order.transition(OrderStatus::Confirmed, Utc::now()).unwrap();
        order.transition(OrderStatus::Preparing, Utc::now()).unwrap();

        assert_eq!(order.subtotal, subtotal);
        assert_eq!(order.tax, tax);
        assert_eq!(order.delivery_fee, fee);
        assert_eq!(order.total, total);
    }

    #[test]
    fn test_order_serialization_round_trip() {
        let order = sample_order();
        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, back);
    }
}
