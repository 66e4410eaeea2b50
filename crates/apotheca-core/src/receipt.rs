//! # Receipt
//!
//! Printable view of a completed sale.
//!
//! ```text
//! === Receipt ===
//! Receipt: 20261016-0001
//! Date: 2026-10-16 14:03:11
//!
//! Name          Qty   Price     Amount
//! ----------------------------------------
//! Aspirin       3     $5.00     $15.00
//! ----------------------------------------
//! Total Amount: $15.00
//! ```

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Sale;

const QTY_WIDTH: usize = 6;
const PRICE_WIDTH: usize = 10;
const RULE_MIN: usize = 40;

/// One printed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    /// Name cut to the display width.
    pub name: String,
    pub quantity: u32,
    #[serde(rename = "unit_price_cents")]
    pub unit_price: Money,
    #[serde(rename = "amount_cents")]
    pub amount: Money,
}

/// Receipt built from a [`Sale`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub receipt_number: String,
    pub completed_at: DateTime<Local>,
    pub lines: Vec<ReceiptLine>,
    #[serde(rename = "total_cents")]
    pub total: Money,
    /// Column width the names were cut to.
    pub name_width: usize,
}

impl Receipt {
    /// Builds the receipt, cutting names to `name_width` characters.
    pub fn from_sale(sale: &Sale, name_width: usize) -> Self {
        Receipt {
            receipt_number: sale.receipt_number.clone(),
            completed_at: sale.completed_at,
            lines: sale
                .lines
                .iter()
                .map(|line| ReceiptLine {
                    name: truncate(&line.name, name_width),
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    amount: line.amount,
                })
                .collect(),
            total: sale.total,
            name_width,
        }
    }
}

/// Cuts on character boundaries, never inside a code point.
fn truncate(name: &str, width: usize) -> String {
    name.chars().take(width).collect()
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_col = self.name_width + 2;
        let rule = "-".repeat(RULE_MIN.max(name_col + QTY_WIDTH + PRICE_WIDTH + PRICE_WIDTH));

        writeln!(f, "=== Receipt ===")?;
        writeln!(f, "Receipt: {}", self.receipt_number)?;
        writeln!(f, "Date: {}", self.completed_at.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<name_col$}{:<QTY_WIDTH$}{:<PRICE_WIDTH$}Amount",
            "Name", "Qty", "Price"
        )?;
        writeln!(f, "{}", rule)?;
        for line in &self.lines {
            writeln!(
                f,
                "{:<name_col$}{:<QTY_WIDTH$}{:<PRICE_WIDTH$}{}",
                line.name, line.quantity, line.unit_price, line.amount
            )?;
        }
        writeln!(f, "{}", rule)?;
        write!(f, "Total Amount: {}", self.total)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
