use serde::{Deserialize, Serialize};

use crate::domain::money::Money;

use super::errors::CartError;
use super::value_objects::{CatalogItem, LineItem, LineKey, SelectedCustomization};

// ============================================================================
// Cart Aggregate - Domain Logic
// ============================================================================
//
// Owns the line items for the active session. Subtotal and item count are
// derived: every mutator recomputes them from the lines before returning, so
// they can never drift from the collection. The aggregate is owned by one
// session and mutated synchronously; there is no concurrent writer.
//
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartAggregate {
    items: Vec<LineItem>,
    subtotal: Money,
    item_count: i32,
}

/// Derived totals returned by every mutator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Money,
    pub item_count: i32,
}

impl CartAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in insertion order (display order; totals do not depend on it).
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn item_count(&self) -> i32 {
        self.item_count
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals {
            subtotal: self.subtotal,
            item_count: self.item_count,
        }
    }

    /// Add `quantity` of a catalog item configured with `customizations`.
    ///
    /// The unit price (and customization deltas) are snapshot here; later
    /// catalog price changes do not touch lines already in the cart. If a
    /// line with the same identity already exists its quantity is
    /// incremented instead of a duplicate line being appended.
    pub fn add_item(
        &mut self,
        item: &CatalogItem,
        quantity: i32,
        customizations: Vec<SelectedCustomization>,
        special_instructions: Option<String>,
    ) -> Result<CartTotals, CartError> {
        if quantity <= 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        if !item.is_available {
            return Err(CartError::ItemUnavailable(item.id.clone()));
        }

        let key = LineKey::new(&item.id, &customizations);

        if let Some(line) = self.items.iter_mut().find(|l| l.key == key) {
            line.quantity += quantity;
        } else {
            self.items.push(LineItem {
                key,
                name: item.name.clone(),
                unit_price: item.price,
                quantity,
                customizations,
                special_instructions,
            });
        }

        tracing::debug!(item_id = %item.id, quantity, "added to cart");
        Ok(self.recompute())
    }

    /// Remove the line with this identity. No-op if absent.
    pub fn remove_item(&mut self, key: &LineKey) -> CartTotals {
        self.items.retain(|l| &l.key != key);
        self.recompute()
    }

    /// Set a line's quantity outright. A quantity <= 0 removes the line.
    /// No-op if the line does not exist; callers that need a strict check
    /// can look the line up in `items()` first.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: i32) -> CartTotals {
        if quantity <= 0 {
            return self.remove_item(key);
        }

        if let Some(line) = self.items.iter_mut().find(|l| &l.key == key) {
            line.quantity = quantity;
        }

        self.recompute()
    }

    /// Empty the cart. Called by the user, or by checkout after the order
    /// has been acknowledged by persistence.
    pub fn clear(&mut self) -> CartTotals {
        self.items.clear();
        self.recompute()
    }

    fn recompute(&mut self) -> CartTotals {
        self.subtotal = self.items.iter().map(LineItem::line_total).sum();
        self.item_count = self.items.iter().map(|l| l.quantity).sum();
        self.totals()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
