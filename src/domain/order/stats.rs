use serde::{Deserialize, Serialize};

use crate::domain::money::Money;

use super::aggregate::Order;
use super::value_objects::OrderStatus;

// ============================================================================
// Order Statistics - Admin Dashboard Rollup
// ============================================================================

/// Aggregate figures over a set of orders, e.g. everything a store has taken
/// today. Cancelled orders count toward volume but not revenue.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderStats {
    pub total_orders: usize,
    pub total_revenue: Money,
    pub pending_orders: usize,
    pub delivered_orders: usize,
    pub cancelled_orders: usize,
}

impl OrderStats {
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut stats = Self {
            total_orders: orders.len(),
            ..Self::default()
        };

        for order in orders {
            match order.status {
                OrderStatus::Pending => stats.pending_orders += 1,
                OrderStatus::Delivered => stats.delivered_orders += 1,
                OrderStatus::Cancelled => stats.cancelled_orders += 1,
                _ => {}
            }
            if order.status != OrderStatus::Cancelled {
                stats.total_revenue += order.total;
            }
        }

        stats
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
