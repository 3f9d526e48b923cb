use super::value_objects::LineKey;

// ============================================================================
// Cart Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("Invalid quantity: {0} (use remove_item to take a line out)")]
    InvalidQuantity(i32),

    #[error("Menu item is currently unavailable: {0}")]
    ItemUnavailable(String),

    /// Not produced by the default no-op mutators; kept for callers that
    /// want to pre-check a line before updating it.
    #[error("No cart line with key {0:?}")]
    LineNotFound(LineKey),
}
