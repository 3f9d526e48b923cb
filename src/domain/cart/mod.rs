// ============================================================================
// Cart Domain - Business Logic for the Cart Aggregate
// ============================================================================
//
// This module contains ALL cart-specific code:
// - Value objects (CatalogItem, LineItem, LineKey, SelectedCustomization)
// - Errors (CartError enum)
// - Aggregate (CartAggregate with derived totals)
//
// ============================================================================

pub mod aggregate;
pub mod errors;
pub mod value_objects;

// Re-export for convenience
pub use aggregate::*;
pub use errors::*;
pub use value_objects::*;
