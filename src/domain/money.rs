use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

// ============================================================================
// Money - Integer-Cent Currency Value Object
// ============================================================================
//
// All monetary arithmetic in the crate happens in whole cents. Amounts are
// rounded half-up to the cent at each computation stage (tax is rounded
// before it is summed into an order total). Dollar floats exist only at the
// catalog/display boundary.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Convert a dollar amount to cents, rounding half-up.
    pub fn from_dollars(dollars: f64) -> Self {
        Self((dollars * 100.0).round() as i64)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Apply a rate expressed in basis points (800 bps = 8%), rounding
    /// half-up to the cent.
    pub fn percent_bps(&self, bps: u32) -> Money {
        Money((self.0 * i64::from(bps) + 5_000) / 10_000)
    }

    /// Multiply by a line quantity.
    pub fn times(&self, quantity: i32) -> Money {
        Money(self.0 * i64::from(quantity))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
