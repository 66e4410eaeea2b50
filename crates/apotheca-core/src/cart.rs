//! # Cart
//!
//! A proposed, not-yet-committed list of sale lines, and the stock check that
//! both add-to-cart and checkout run.
//!
//! ## One Check, Two Callers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Make Sale: "A100 × 3"                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Cart::add_checked ── prospective cart = cart + line ──┐               │
//! │                                                         │               │
//! │                                                         ▼               │
//! │                                                 check_stock(catalog)   │
//! │                                                         ▲               │
//! │  "done"                                                 │               │
//! │       │                                                 │               │
//! │       ▼                                                 │               │
//! │  Inventory::checkout ── whole cart ─────────────────────┘               │
//! │                                                                         │
//! │  Same rules both times, so a line accepted at add time is never        │
//! │  judged differently at checkout against unchanged stock.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Order
//! 1. `EmptyCart`
//! 2. For each distinct code, in order of first appearance:
//!    `UnknownProduct`, then `InsufficientStock` against the summed quantity.
//! 3. `TotalOverflow` when a line amount or the cart total does not fit.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Catalog;

// =============================================================================
// Cart Line
// =============================================================================

/// A requested product and quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub code: String,
    pub quantity: u32,
}

// =============================================================================
// Cart
// =============================================================================

/// Lines in the order the cashier entered them.
///
/// The same code may appear on several lines; stock is checked against their
/// sum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line without looking at stock.
    ///
    /// Only the line's own shape is checked: a code must be given and the
    /// quantity must be positive.
    pub fn add_line(&mut self, code: &str, quantity: u32) -> Result<(), ValidationError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(ValidationError::Required {
                field: "code".to_string(),
            });
        }
        if quantity == 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            });
        }

        self.lines.push(CartLine {
            code: code.to_string(),
            quantity,
        });
        Ok(())
    }

    /// Appends a line only if the resulting cart passes [`check_stock`].
    ///
    /// On failure the cart is unchanged.
    pub fn add_checked(&mut self, catalog: &Catalog, code: &str, quantity: u32) -> CoreResult<()> {
        let mut prospective = self.clone();
        prospective.add_line(code, quantity)?;
        check_stock(catalog, &prospective)?;
        *self = prospective;
        Ok(())
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Requested quantity per code, in order of first appearance.
    ///
    /// Summed as `u64`: several `u32` lines for one code may exceed `u32::MAX`.
    pub fn requested_totals(&self) -> Vec<(&str, u64)> {
        let mut totals: Vec<(&str, u64)> = Vec::new();
        for line in &self.lines {
            let quantity = u64::from(line.quantity);
            match totals.iter_mut().find(|(code, _)| *code == line.code) {
                Some((_, qty)) => *qty += quantity,
                None => totals.push((line.code.as_str(), quantity)),
            }
        }
        totals
    }

    /// Running total at current catalog prices. Unknown codes count as zero.
    ///
    /// ## Errors
    /// `TotalOverflow` when a line amount or the sum does not fit.
    pub fn preview_total(&self, catalog: &Catalog) -> CoreResult<Money> {
        let amounts = self
            .lines
            .iter()
            .filter_map(|line| catalog.get(&line.code).map(|p| (p, line.quantity)))
            .map(|(product, quantity)| {
                product
                    .price
                    .checked_mul_quantity(quantity)
                    .ok_or(CoreError::TotalOverflow)
            })
            .collect::<CoreResult<Vec<_>>>()?;

        Money::checked_sum(amounts).ok_or(CoreError::TotalOverflow)
    }
}

// =============================================================================
// Stock Check
// =============================================================================

/// Checks that every product in the cart exists and has enough stock.
///
/// ## Example
/// ```rust
/// use apotheca_core::cart::{check_stock, Cart};
/// use apotheca_core::{Catalog, CoreError, Money, Product};
///
/// let mut catalog = Catalog::new();
/// catalog.insert(Product::new("A100", "Aspirin", Money::from_cents(500), 20).unwrap()).unwrap();
///
/// let mut cart = Cart::new();
/// cart.add_line("A100", 15).unwrap();
/// cart.add_line("A100", 10).unwrap();
///
/// assert!(matches!(
///     check_stock(&catalog, &cart),
///     Err(CoreError::InsufficientStock { available: 20, requested: 25, .. })
/// ));
/// ```
pub fn check_stock(catalog: &Catalog, cart: &Cart) -> CoreResult<()> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    for (code, requested) in cart.requested_totals() {
        let product = catalog
            .get(code)
            .ok_or_else(|| CoreError::UnknownProduct(code.to_string()))?;

        if !product.can_sell(requested) {
            return Err(CoreError::InsufficientStock {
                code: code.to_string(),
                available: product.quantity,
                requested,
            });
        }
    }

    cart.preview_total(catalog)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .insert(Product::new("A100", "Aspirin", Money::from_cents(500), 20).unwrap())
            .unwrap();
        catalog
            .insert(Product::new("B200", "Bandage", Money::from_cents(250), 0).unwrap())
            .unwrap();
        catalog
    }

    #[test]
    fn test_add_line_rejects_zero_and_blank() {
        let mut cart = Cart::new();
        assert!(cart.add_line("A100", 0).is_err());
        assert!(cart.add_line("  ", 1).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_requested_totals_sums_by_code() {
        let mut cart = Cart::new();
        cart.add_line("B200", 1).unwrap();
        cart.add_line("A100", 2).unwrap();
        cart.add_line("B200", 4).unwrap();

        assert_eq!(cart.requested_totals(), vec![("B200", 5), ("A100", 2)]);
        assert_eq!(cart.len(), 3);
    }

    #[test]
    fn test_check_stock_empty_cart() {
        assert!(matches!(
            check_stock(&catalog(), &Cart::new()),
            Err(CoreError::EmptyCart)
        ));
    }

    #[test]
    fn test_check_stock_first_failing_code_wins() {
        let mut cart = Cart::new();
        cart.add_line("A100", 1).unwrap();
        cart.add_line("ZZZ", 1).unwrap();
        cart.add_line("B200", 1).unwrap();

        assert!(matches!(
            check_stock(&catalog(), &cart),
            Err(CoreError::UnknownProduct(ref code)) if code == "ZZZ"
        ));
    }

    #[test]
    fn test_check_stock_exact_quantity_is_allowed() {
        let mut cart = Cart::new();
        cart.add_line("A100", 20).unwrap();
        assert!(check_stock(&catalog(), &cart).is_ok());
    }

    #[test]
    fn test_add_checked_leaves_cart_unchanged_on_failure() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_checked(&catalog, "A100", 15).unwrap();

        let err = cart.add_checked(&catalog, "A100", 6).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 20,
                requested: 21,
                ..
            }
        ));
        assert_eq!(cart.len(), 1);

        assert!(matches!(
            cart.add_checked(&catalog, "B200", 1),
            Err(CoreError::InsufficientStock { available: 0, .. })
        ));
        assert!(matches!(
            cart.add_checked(&catalog, "NOPE", 1),
            Err(CoreError::UnknownProduct(_))
        ));
    }

    #[test]
    fn test_preview_total() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_line("A100", 3).unwrap();
        cart.add_line("B200", 2).unwrap();
        assert_eq!(cart.preview_total(&catalog).unwrap().cents(), 2000);
    }

    #[test]
    fn test_quantities_past_u32_max_are_not_capped() {
        let mut catalog = Catalog::new();
        catalog
            .insert(Product::new("C1", "Cotton", Money::from_cents(1), i64::from(u32::MAX)).unwrap())
            .unwrap();

        let mut cart = Cart::new();
        cart.add_checked(&catalog, "C1", u32::MAX).unwrap();

        let err = cart.add_checked(&catalog, "C1", 1).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock { available, requested, .. }
                if available == u32::MAX && requested == u64::from(u32::MAX) + 1
        ));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_amount_overflow_is_rejected() {
        let mut catalog = Catalog::new();
        let gold = Money::from_cents(9_223_372_036_854_775_800);
        catalog
            .insert(Product::new("X1", "Gold", gold, 5).unwrap())
            .unwrap();

        let mut cart = Cart::new();
        assert!(matches!(
            cart.add_checked(&catalog, "X1", 2),
            Err(CoreError::TotalOverflow)
        ));
        assert!(cart.is_empty());

        // One unit fits; a second line pushes the total over
        cart.add_checked(&catalog, "X1", 1).unwrap();
        assert!(matches!(
            cart.add_checked(&catalog, "X1", 1),
            Err(CoreError::TotalOverflow)
        ));
        assert_eq!(cart.len(), 1);
    }
}
