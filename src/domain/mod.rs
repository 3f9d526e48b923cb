// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// This module contains the domain aggregates and shared value objects.
// Each aggregate has its own subdirectory with:
// - Value objects
// - Errors
// - Aggregate implementation
//
// This layer is pure: no I/O, no collaborator traits, no async.
//
// ============================================================================

pub mod cart;
pub mod money;
pub mod order;
