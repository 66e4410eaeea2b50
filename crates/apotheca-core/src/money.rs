//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A month of revenue summed as floats drifts away from the sum of the   │
//! │  receipts that produced it.                                             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every price, line amount and total is an exact i64 count of cents.  │
//! │    Monthly revenue == Σ sale totals, always, to the cent.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use apotheca_core::money::Money;
//!
//! let price: Money = "5.00".parse().unwrap();
//! assert_eq!(price.cents(), 500);
//!
//! let line = price.checked_mul_quantity(3).unwrap();
//! assert_eq!(line.to_string(), "$15.00");
//! ```
//!
//! ## Overflow
//! A price typed in can be as large as `i64` allows, so every product of
//! price and quantity and every running total is checked:
//! ```text
//! checked_mul_quantity / checked_add / checked_sum ──► None on overflow
//!                                                      │
//!                                       callers map it to CoreError::TotalOverflow
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: typed text may be negative; `validate_price` rejects it
/// - **Single field tuple struct**: serializes as a bare integer
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► SaleLine.unit_price ──► SaleLine.amount
///                                               │
///                     Sale.total ◄──────────────┘
///                         │
///                         ├──► MonthlyAggregate.total_revenue
///                         └──► ProductStats.revenue
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use apotheca_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies money by a quantity, `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use apotheca_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// assert_eq!(unit_price.checked_mul_quantity(3), Some(Money::from_cents(897)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_mul_quantity(2), None);
    /// ```
    #[inline]
    pub const fn checked_mul_quantity(&self, qty: u32) -> Option<Self> {
        match self.0.checked_mul(qty as i64) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Sums amounts, `None` if any partial sum overflows.
    pub fn checked_sum<I: IntoIterator<Item = Money>>(iter: I) -> Option<Self> {
        iter.into_iter()
            .try_fold(Money::zero(), |total, amount| total.checked_add(amount))
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Why a piece of text could not be read as money.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMoneyError {
    /// Not a decimal number at all.
    NotANumber,
    /// More than two digits after the decimal point.
    TooManyDecimals,
}

/// Parses user-entered decimal text such as `5`, `5.5`, `5.50` or `$5.50`.
///
/// ## Rules
/// ```text
/// "12"      → 1200
/// "12.5"    → 1250
/// "$12.50"  → 1250
/// "-3.10"   → -310
/// "12.505"  → TooManyDecimals
/// "abc"     → NotANumber
/// ```
impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let s = s.strip_prefix('$').unwrap_or(s);

        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(ParseMoneyError::NotANumber);
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ParseMoneyError::NotANumber);
        }
        if frac.len() > 2 {
            return Err(ParseMoneyError::TooManyDecimals);
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| ParseMoneyError::NotANumber)?
        };
        // "5.5" means 50 cents, not 5
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| ParseMoneyError::NotANumber)? * 10,
            _ => frac.parse().map_err(|_| ParseMoneyError::NotANumber)?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .ok_or(ParseMoneyError::NotANumber)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Fixed two-decimal display: `$15.00`, `-$5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let text = format!("{}${}.{:02}", sign, self.dollars().abs(), self.cents_part());
        // pad() so receipt columns can use width specifiers
        f.pad(&text)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
