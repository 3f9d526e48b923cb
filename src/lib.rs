//! Cart and order core for the KomEat food-ordering app.
//!
//! The crate models three collaborating pieces:
//!
//! - [`domain::cart::CartAggregate`] — line items with price snapshots and
//!   derived totals, owned by the active session.
//! - [`checkout::CheckoutService`] — turns a non-empty cart plus delivery,
//!   payment, and address choices into a persisted, immutable
//!   [`domain::order::Order`].
//! - [`lifecycle::OrderLifecycle`] — the guarded status state machine
//!   (`pending → confirmed → preparing → ready → delivered`, cancellable
//!   until delivered).
//!
//! Persistence, payment, and catalog lookup are collaborator traits in
//! [`services`]; in-memory implementations back the demo binary and tests.
//! All money is integer cents ([`domain::money::Money`]), rounded half-up
//! at each computation stage.

pub mod checkout;
pub mod config;
pub mod domain;
pub mod lifecycle;
pub mod services;
pub mod utils;

pub use checkout::CheckoutService;
pub use config::CoreConfig;
pub use lifecycle::OrderLifecycle;
