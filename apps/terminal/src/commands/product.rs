//! # Product Commands
//!
//! Adding, listing and restocking catalog products.
//!
//! ## Add Product Checks
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_product("A100", "Aspirin", "5.00", "20")                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  code: required, format ──────────────► ValidationError                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  code already in catalog? ────────────► DuplicateProductCode            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  name: required ──────────────────────► ValidationError                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  price / quantity parse ──────────────► InvalidNumericInput             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  price > 0, quantity >= 0 ────────────► ValidationError                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  commit + save products.json                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::CommandError;
use crate::state::AppState;
use apotheca_core::validation::{
    parse_integer, parse_price, validate_code, validate_product_name, validate_quantity,
};
use apotheca_core::{CoreError, Product};

/// Product as handed to front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDto {
    pub code: String,
    pub name: String,
    pub price_cents: i64,
    pub quantity: u32,
}

impl From<&Product> for ProductDto {
    fn from(p: &Product) -> Self {
        ProductDto {
            code: p.code.clone(),
            name: p.name.clone(),
            price_cents: p.price.cents(),
            quantity: p.quantity,
        }
    }
}

/// Adds a new product from raw form text.
pub fn add_product(
    state: &mut AppState,
    code: &str,
    name: &str,
    price: &str,
    quantity: &str,
) -> Result<ProductDto, CommandError> {
    debug!(code = %code, "add_product command");

    validate_code(code)?;
    if state.inventory().catalog().contains(code.trim()) {
        return Err(CoreError::DuplicateProductCode(code.trim().to_string()).into());
    }
    validate_product_name(name)?;

    let price = parse_price(price)?;
    let quantity = parse_integer("quantity", quantity)?;
    let product = Product::new(code, name, price, quantity)?;
    let dto = ProductDto::from(&product);

    state.commit(
        |inv| inv.add_product(product),
        |store, _, inv, _| store.save_catalog(inv),
    )?;

    info!(code = %dto.code, quantity = dto.quantity, "Product added");
    Ok(dto)
}

/// Every product, in the order it was added.
pub fn list_products(state: &AppState) -> Vec<ProductDto> {
    state.inventory().catalog().iter().map(ProductDto::from).collect()
}

/// Products below `threshold`, or below the configured threshold when `None`.
pub fn low_stock(state: &AppState, threshold: Option<u32>) -> Vec<ProductDto> {
    let threshold = threshold.unwrap_or(state.config().low_stock_threshold);
    state
        .inventory()
        .low_stock(threshold)
        .into_iter()
        .map(ProductDto::from)
        .collect()
}

/// Adds received units to an existing product.
pub fn restock(state: &mut AppState, code: &str, quantity: &str) -> Result<ProductDto, CommandError> {
    debug!(code = %code, "restock command");

    let quantity = validate_quantity(parse_integer("quantity", quantity)?)?;

    let dto = state.commit(
        |inv| inv.restock(code, quantity).map(ProductDto::from),
        |store, _, inv, _| store.save_catalog(inv),
    )?;

    info!(code = %dto.code, added = quantity, on_hand = dto.quantity, "Product restocked");
    Ok(dto)
}

// =============================================================================
// Unit Tests
// =============================================================================
