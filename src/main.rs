use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

use komeat_core::domain::cart::{CartAggregate, SelectedCustomization};
use komeat_core::domain::money::Money;
use komeat_core::domain::order::{
    Address, DeliveryOption, OrderStats, OrderStatus, PaymentMethod,
};
use komeat_core::services::memory::{InMemoryOrderStore, MockPaymentGateway, StaticCatalog};
use komeat_core::services::{Catalog, OrderStore};
use komeat_core::{CheckoutService, CoreConfig, OrderLifecycle};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging with environment-based filtering.
    // Override with e.g. RUST_LOG=debug
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,komeat_core=debug")),
        )
        .init();

    tracing::info!("🍔 KomEat order core demo");

    // === 1. Wire the collaborators ===
    let catalog = StaticCatalog::seeded();
    let store = Arc::new(InMemoryOrderStore::new());
    let payment = Arc::new(MockPaymentGateway::new());
    let config = CoreConfig::from_env();

    let checkout = CheckoutService::new(store.clone(), payment, config);
    let lifecycle = OrderLifecycle::new(store.clone());

    // === 2. Build a cart from the menu ===
    let user_id = Uuid::new_v4();
    let mut cart = CartAggregate::new();

    let burger = catalog
        .item("burger")
        .await
        .ok_or_else(|| anyhow::anyhow!("burger missing from menu"))?;
    let fries = catalog
        .item("fries")
        .await
        .ok_or_else(|| anyhow::anyhow!("fries missing from menu"))?;

    let cheese = SelectedCustomization {
        option_id: "toppings".into(),
        choice_id: "cheese".into(),
        name: "Extra Cheese".into(),
        price: Money::from_cents(100),
    };

    cart.add_item(&burger, 2, vec![cheese], Some("no onions".into()))?;
    let totals = cart.add_item(&fries, 1, vec![], None)?;
    tracing::info!(
        subtotal = %totals.subtotal,
        item_count = totals.item_count,
        "🛒 cart ready"
    );

    // === 3. Checkout ===
    let order = checkout
        .place_order(
            &mut cart,
            DeliveryOption::delivery(),
            PaymentMethod::Card,
            Address::new("1 Main St", "Springfield", "IL", "62704"),
            user_id,
        )
        .await?;
    tracing::info!(
        order_id = %order.id,
        total = %order.total,
        eta = ?order.estimated_delivery_time,
        "✅ order placed"
    );
    assert!(cart.is_empty());

    // === 4. Kitchen drives the lifecycle ===
    for stage in [
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
    ] {
        let updated = lifecycle.transition(order.id, stage).await?;
        tracing::info!(order_id = %updated.id, status = ?updated.status, "📦 kitchen update");
    }

    // === 5. Order history and rollup ===
    let history = store.list_by_user(user_id).await?;
    let stats = OrderStats::from_orders(&history);
    tracing::info!(
        orders = stats.total_orders,
        revenue = %stats.total_revenue,
        delivered = stats.delivered_orders,
        "📊 user order history"
    );

    tracing::info!("🎉 Demo complete!");
    Ok(())
}
