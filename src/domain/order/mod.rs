// ============================================================================
// Order Domain - Business Logic for the Order Aggregate
// ============================================================================
//
// This module contains ALL order-specific code:
// - Value objects (OrderStatus, DeliveryOption, PaymentMethod, Address)
// - Errors (OrderError enum)
// - Aggregate (Order with the guarded status transition)
// - Statistics rollup (OrderStats)
//
// Orders are created by the checkout service and advanced by the lifecycle
// service; nothing else constructs or mutates them.
//
// ============================================================================

pub mod aggregate;
pub mod errors;
pub mod stats;
pub mod value_objects;

// Re-export for convenience
pub use aggregate::*;
pub use errors::*;
pub use stats::*;
pub use value_objects::*;
