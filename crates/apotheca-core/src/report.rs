//! # Reports
//!
//! Read-only views over an [`Inventory`]: the monthly report, the all-time
//! sales summary and the per-sale history.
//!
//! ## Monthly Report
//! ```text
//! monthly_report(inventory, 2026-10)
//!      │
//!      ├── no aggregate for 2026-10 ──► NoDataForPeriod(2026-10)
//!      │
//!      └── aggregate ──► totals + top 10 of products_sold
//!                         ordered by revenue desc, then code asc
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::inventory::Inventory;
use crate::money::Money;
use crate::types::{MonthlyAggregate, PeriodKey};
use crate::TOP_PRODUCTS_LIMIT;

// =============================================================================
// Monthly Report
// =============================================================================

/// A ranked product in the monthly report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopProduct {
    pub code: String,
    pub name: String,
    pub quantity_sold: u64,
    #[serde(rename = "revenue_cents")]
    pub revenue: Money,
}

/// Summary of one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub period: PeriodKey,
    #[serde(rename = "total_revenue_cents")]
    pub total_revenue: Money,
    pub sale_count: usize,
    pub start_date: NaiveDate,
    pub top_products: Vec<TopProduct>,
}

/// Builds the report for `period`.
///
/// ## Errors
/// `NoDataForPeriod` when no sale has been recorded in that month.
pub fn monthly_report(inventory: &Inventory, period: PeriodKey) -> CoreResult<MonthlyReport> {
    let aggregate = inventory
        .aggregate(period)
        .ok_or(CoreError::NoDataForPeriod(period))?;

    // products_sold iterates code-ascending; a stable sort keeps that for ties
    let mut ranked: Vec<_> = aggregate.products_sold.iter().collect();
    ranked.sort_by(|a, b| b.1.revenue.cmp(&a.1.revenue));

    let top_products = ranked
        .into_iter()
        .take(TOP_PRODUCTS_LIMIT)
        .map(|(code, stats)| TopProduct {
            code: code.clone(),
            name: display_name(inventory, aggregate, code),
            quantity_sold: stats.quantity_sold,
            revenue: stats.revenue,
        })
        .collect();

    Ok(MonthlyReport {
        period,
        total_revenue: aggregate.total_revenue,
        sale_count: aggregate.sale_count(),
        start_date: aggregate.start_date,
        top_products,
    })
}

/// Current catalog name, else the latest name the month's sales recorded,
/// else the code itself.
fn display_name(inventory: &Inventory, aggregate: &MonthlyAggregate, code: &str) -> String {
    if let Some(product) = inventory.catalog().get(code) {
        return product.name.clone();
    }

    aggregate
        .sales
        .iter()
        .rev()
        .flat_map(|sale| sale.lines.iter())
        .find(|line| line.code == code)
        .map(|line| line.name.clone())
        .unwrap_or_else(|| code.to_string())
}

/// Periods that have data, newest first.
pub fn available_periods(inventory: &Inventory) -> Vec<PeriodKey> {
    inventory.monthly().keys().rev().copied().collect()
}

// =============================================================================
// Sales Summary & History
// =============================================================================

/// All-time totals over the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSummary {
    #[serde(rename = "total_revenue_cents")]
    pub total_revenue: Money,
    pub transaction_count: usize,
}

impl SalesSummary {
    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }
}

/// ## Errors
/// `TotalOverflow` when all-time revenue no longer fits in cents.
pub fn sales_summary(inventory: &Inventory) -> CoreResult<SalesSummary> {
    Ok(SalesSummary {
        total_revenue: inventory.ledger().total_revenue()?,
        transaction_count: inventory.ledger().len(),
    })
}

/// One row of the sales history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleHistoryEntry {
    pub receipt_number: String,
    pub completed_at: NaiveDateTime,
    pub item_count: usize,
    #[serde(rename = "total_cents")]
    pub total: Money,
}

/// Every sale, oldest first.
pub fn sales_history(inventory: &Inventory) -> Vec<SaleHistoryEntry> {
    inventory
        .ledger()
        .iter()
        .map(|sale| SaleHistoryEntry {
            receipt_number: sale.receipt_number.clone(),
            completed_at: sale.completed_at.naive_local(),
            item_count: sale.item_count(),
            total: sale.total,
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
