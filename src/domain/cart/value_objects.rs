use serde::{Deserialize, Serialize};

use crate::domain::money::Money;

// ============================================================================
// Cart Value Objects
// ============================================================================

/// A menu item as the catalog currently advertises it. The cart copies the
/// price out of this at add time; later catalog edits never reach lines that
/// are already in a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub price: Money,
    pub category: String,
    pub is_available: bool,
}

/// One customization picked for a line (e.g. "extra cheese"), with the price
/// delta it carries. Deltas are snapshot per line, same as the unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedCustomization {
    pub option_id: String,
    pub choice_id: String,
    pub name: String,
    pub price: Money,
}

/// Identity of a cart line: the catalog item plus a fingerprint of its
/// customization choices. A burger with cheese and a burger without are two
/// different lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub item_id: String,
    pub fingerprint: String,
}

impl LineKey {
    pub fn new(item_id: &str, customizations: &[SelectedCustomization]) -> Self {
        let mut choice_ids: Vec<&str> =
            customizations.iter().map(|c| c.choice_id.as_str()).collect();
        choice_ids.sort_unstable();

        Self {
            item_id: item_id.to_string(),
            fingerprint: choice_ids.join("+"),
        }
    }
}

/// One row in a cart or order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub key: LineKey,
    pub name: String,
    /// Price snapshot taken when the line was added. Immutable thereafter.
    pub unit_price: Money,
    /// Always >= 1; a quantity update to <= 0 removes the line instead.
    pub quantity: i32,
    pub customizations: Vec<SelectedCustomization>,
    pub special_instructions: Option<String>,
}

impl LineItem {
    /// Unit price including customization deltas.
    pub fn effective_unit_price(&self) -> Money {
        self.customizations
            .iter()
            .fold(self.unit_price, |acc, c| acc + c.price)
    }

    pub fn line_total(&self) -> Money {
        self.effective_unit_price().times(self.quantity)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
