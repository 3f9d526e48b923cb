use std::sync::Arc;

use chrono::Utc;
use tokio::time::timeout;
use uuid::Uuid;

use crate::config::CoreConfig;
use crate::domain::cart::CartAggregate;
use crate::domain::order::{
    Address, DeliveryOption, FulfillmentMethod, Order, OrderError, OrderStatus, PaymentMethod,
};
use crate::services::{OrderStore, PaymentGateway, StoreError};
use crate::utils::retry::{retry_on_transient, RetryResult};

// ============================================================================
// Checkout Service - Order Builder
// ============================================================================
//
// Turns a non-empty cart plus the user's delivery/payment/address choices
// into a persisted Order. Visibility is all-or-nothing: the charge happens
// before the order is built, the order is only handed out after persistence
// acknowledges it, and the cart is cleared only at that point. On any
// failure the cart is left untouched so the user can retry.
//
// Taking the cart by `&mut` means a second submission cannot start while a
// placement for the same cart is still in flight.
//
// ============================================================================

pub struct CheckoutService {
    store: Arc<dyn OrderStore>,
    payment: Arc<dyn PaymentGateway>,
    config: CoreConfig,
}

impl CheckoutService {
    pub fn new(
        store: Arc<dyn OrderStore>,
        payment: Arc<dyn PaymentGateway>,
        config: CoreConfig,
    ) -> Self {
        Self {
            store,
            payment,
            config,
        }
    }

    pub async fn place_order(
        &self,
        cart: &mut CartAggregate,
        delivery_option: DeliveryOption,
        payment_method: PaymentMethod,
        delivery_address: Address,
        user_id: Uuid,
    ) -> Result<Order, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        if !delivery_address.is_populated() {
            return Err(OrderError::InvalidAddress);
        }

        let subtotal = cart.subtotal();
        let tax = subtotal.percent_bps(self.config.tax_rate_bps);
        let delivery_fee = delivery_option.fee;
        let total = subtotal + tax + delivery_fee;

        // Charge first: a failed or hung charge must prevent order creation.
        let receipt = timeout(
            self.config.external_call_timeout,
            self.payment.charge(total, &payment_method),
        )
        .await
        .map_err(|_| OrderError::Timeout("payment gateway"))?
        .map_err(|e| OrderError::Payment(e.to_string()))?;

        tracing::info!(
            transaction_id = %receipt.transaction_id,
            amount = %receipt.amount,
            "payment captured"
        );

        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4(),
            user_id,
            items: cart.items().to_vec(),
            subtotal,
            tax,
            delivery_fee,
            total,
            estimated_delivery_time: match delivery_option.method {
                FulfillmentMethod::Delivery => {
                    Some(now + chrono::Duration::minutes(self.config.delivery_lead_minutes))
                }
                FulfillmentMethod::Pickup => None,
            },
            delivery_option,
            payment_method,
            delivery_address,
            status: OrderStatus::Pending,
            placed_at: now,
            actual_delivery_time: None,
        };

        // Save is an upsert keyed by the order id, so transient failures and
        // timeouts are retried with backoff. If the save never lands the
        // cart stays as it was.
        let saved = retry_on_transient(self.config.persistence_retry.clone(), |_attempt| {
            let store = Arc::clone(&self.store);
            let order = order.clone();
            let wait = self.config.external_call_timeout;
            async move {
                match timeout(wait, store.save(&order)).await {
                    Ok(result) => result.map(|_| ()),
                    Err(_) => Err(StoreError::Unavailable("save timed out".into())),
                }
            }
        })
        .await;

        match saved {
            RetryResult::Success(()) => {}
            RetryResult::Failed(e) | RetryResult::PermanentFailure(e) => {
                return Err(OrderError::Persistence(e.to_string()));
            }
        }

        cart.clear();
        tracing::info!(order_id = %order.id, total = %order.total, "order placed");
        Ok(order)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
