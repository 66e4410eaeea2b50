//! # Sale Commands
//!
//! Building the cart and completing the sale.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Make Sale                                            │
//! │                                                                         │
//! │  add_to_cart("A100", "3")                                               │
//! │       │   parse quantity, then check the prospective cart              │
//! │       │   against stock (same check checkout uses)                     │
//! │       ▼                                                                 │
//! │  add_to_cart("B200", "1") ... (repeat)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  checkout()                                                             │
//! │       │   AppState::commit:                                            │
//! │       │     stage    = inventory.checkout(cart, now)                   │
//! │       │     persist  = store.record_sale(current, staged, sale)        │
//! │       ▼                                                                 │
//! │  cart cleared, Receipt returned                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::CommandError;
use crate::state::AppState;
use apotheca_core::validation::{parse_integer, validate_quantity};
use apotheca_core::{CoreError, Receipt};

/// One cart line priced at the current catalog price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineDto {
    pub code: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
    pub amount_cents: i64,
}

/// The open cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartDto {
    pub lines: Vec<CartLineDto>,
    pub total_cents: i64,
}

/// Shows the open cart.
///
/// ## Errors
/// `TotalOverflow` if a line amount or the total does not fit in cents.
pub fn get_cart(state: &AppState) -> Result<CartDto, CommandError> {
    let catalog = state.inventory().catalog();
    let mut lines = Vec::with_capacity(state.cart().len());
    for line in state.cart().lines() {
        let Some(product) = catalog.get(&line.code) else {
            continue;
        };
        let amount = product
            .price
            .checked_mul_quantity(line.quantity)
            .ok_or(CoreError::TotalOverflow)?;
        lines.push(CartLineDto {
            code: line.code.clone(),
            name: product.name.clone(),
            quantity: line.quantity,
            unit_price_cents: product.price.cents(),
            amount_cents: amount.cents(),
        });
    }

    Ok(CartDto {
        lines,
        total_cents: state.cart().preview_total(catalog)?.cents(),
    })
}

/// Adds a line to the open cart if the cart would still be sellable.
///
/// ## Errors
/// - `InvalidNumericInput` / `ValidationError` for the quantity text
/// - `UnknownProduct` when the code is not in the catalog
/// - `InsufficientStock` when this line plus earlier lines for the same
///   code exceed what is on hand
pub fn add_to_cart(state: &mut AppState, code: &str, quantity: &str) -> Result<CartDto, CommandError> {
    debug!(code = %code, quantity = %quantity, "add_to_cart command");

    let quantity = validate_quantity(parse_integer("quantity", quantity)?)?;
    let (cart, catalog) = state.cart_and_catalog();
    cart.add_checked(catalog, code, quantity)?;

    get_cart(state)
}

/// Empties the open cart.
pub fn clear_cart(state: &mut AppState) {
    let (cart, _) = state.cart_and_catalog();
    cart.clear();
}

/// Completes the sale now.
pub fn checkout(state: &mut AppState) -> Result<Receipt, CommandError> {
    checkout_at(state, Local::now())
}

/// Completes the sale with an explicit timestamp.
///
/// On any error the inventory and the cart are left as they were.
pub fn checkout_at(state: &mut AppState, now: DateTime<Local>) -> Result<Receipt, CommandError> {
    let cart = state.cart().clone();
    debug!(lines = cart.len(), "checkout command");

    let sale = state.commit(
        |inv| inv.checkout(&cart, now),
        |store, before, after, sale| store.record_sale(before, after, sale),
    )?;
    clear_cart(state);

    info!(
        receipt = %sale.receipt_number,
        total = %sale.total,
        lines = sale.lines.len(),
        "Sale completed"
    );
    Ok(Receipt::from_sale(&sale, state.config().receipt_name_width))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::product::add_product;
    use crate::commands::test_support::seeded;
    use crate::error::ErrorCode;
    use apotheca_core::{Money, PeriodKey};
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn at(h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 16, h, 0, 0).unwrap()
    }

    #[test]
    fn test_add_to_cart_prices_lines() {
        let dir = TempDir::new().unwrap();
        let mut state = seeded(&dir);

        add_to_cart(&mut state, "A100", "3").unwrap();
        let cart = add_to_cart(&mut state, "B200", "2").unwrap();

        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.lines[0].amount_cents, 1500);
        assert_eq!(cart.total_cents, 2000);
    }

    #[test]
    fn test_add_to_cart_sums_same_code() {
        let dir = TempDir::new().unwrap();
        let mut state = seeded(&dir);

        add_to_cart(&mut state, "B200", "3").unwrap();
        let err = add_to_cart(&mut state, "B200", "3").unwrap_err();

        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(err.message, "Insufficient stock for B200: available 5, requested 6");
        assert_eq!(state.cart().len(), 1);
    }

    #[test]
    fn test_add_to_cart_rejects_bad_input() {
        let dir = TempDir::new().unwrap();
        let mut state = seeded(&dir);

        assert_eq!(
            add_to_cart(&mut state, "Z999", "1").unwrap_err().code,
            ErrorCode::UnknownProduct
        );
        assert_eq!(
            add_to_cart(&mut state, "A100", "x").unwrap_err().code,
            ErrorCode::InvalidNumericInput
        );
        assert_eq!(
            add_to_cart(&mut state, "A100", "0").unwrap_err().code,
            ErrorCode::ValidationError
        );
        assert!(state.cart().is_empty());
    }

    #[test]
    fn test_checkout_scenario() {
        let dir = TempDir::new().unwrap();
        let mut state = seeded(&dir);

        add_to_cart(&mut state, "A100", "3").unwrap();
        let receipt = checkout_at(&mut state, at(14)).unwrap();

        assert_eq!(receipt.receipt_number, "20261016-0001");
        assert_eq!(receipt.total, Money::from_cents(1500));
        assert!(state.cart().is_empty());

        let inv = state.inventory();
        assert_eq!(inv.catalog().get("A100").unwrap().quantity, 17);
        let month = inv.aggregate(PeriodKey::new(2026, 10).unwrap()).unwrap();
        assert_eq!(month.total_revenue, Money::from_cents(1500));
        assert_eq!(month.products_sold["A100"].quantity_sold, 3);

        // Persisted before being committed in memory
        assert_eq!(&state.store().load().unwrap(), state.inventory());
    }

    #[test]
    fn test_checkout_empty_cart() {
        let dir = TempDir::new().unwrap();
        let mut state = seeded(&dir);
        let before = state.inventory().clone();

        let err = checkout_at(&mut state, at(14)).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyCart);
        assert_eq!(state.inventory(), &before);
    }

    #[test]
    fn test_receipt_numbers_follow_the_day() {
        let dir = TempDir::new().unwrap();
        let mut state = seeded(&dir);

        for h in [9, 10] {
            add_to_cart(&mut state, "A100", "1").unwrap();
            checkout_at(&mut state, at(h)).unwrap();
        }
        add_to_cart(&mut state, "A100", "1").unwrap();
        let receipt = checkout_at(&mut state, at(11)).unwrap();

        assert_eq!(receipt.receipt_number, "20261016-0003");
    }

    #[test]
    fn test_price_too_large_to_total() {
        let dir = TempDir::new().unwrap();
        let mut state = seeded(&dir);
        add_product(&mut state, "X1", "Gold", "92233720368547758", "5").unwrap();

        let err = add_to_cart(&mut state, "X1", "2").unwrap_err();
        assert_eq!(err.code, ErrorCode::TotalOverflow);
        assert!(state.cart().is_empty());

        add_to_cart(&mut state, "X1", "1").unwrap();
        assert_eq!(
            add_to_cart(&mut state, "A100", "1").unwrap_err().code,
            ErrorCode::TotalOverflow
        );
        assert_eq!(state.cart().len(), 1);
    }

    #[test]
    fn test_failed_save_is_not_a_sale_after_restart() {
        let dir = TempDir::new().unwrap();
        let mut state = seeded(&dir);
        let before = state.inventory().clone();

        // The month document cannot be written while a directory holds its name
        let month = dir.path().join("data/monthly/2026-10.json");
        std::fs::create_dir(&month).unwrap();

        add_to_cart(&mut state, "A100", "3").unwrap();
        let err = checkout_at(&mut state, at(14)).unwrap_err();
        assert!(err.is_persistence_failure());
        assert_eq!(state.inventory(), &before);

        std::fs::remove_dir(&month).unwrap();
        let reopened = state.store().load().unwrap();
        assert_eq!(reopened, before);
        assert!(reopened.ledger().is_empty());
        assert!(reopened.monthly().is_empty());
        assert_eq!(reopened.catalog().get("A100").unwrap().quantity, 20);
    }
}
