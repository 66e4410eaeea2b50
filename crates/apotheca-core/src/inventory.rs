//! # Inventory
//!
//! The whole in-memory state of the store: catalog, ledger and monthly
//! aggregates, owned by one value and changed only through `&mut self`.
//!
//! ## Checkout Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout(cart, at)                                                     │
//! │                                                                         │
//! │  1. check_stock(catalog, cart)        ── any error → return, no change  │
//! │  2. snapshot lines (name, unit price, amount)   ── checked amounts     │
//! │  3. work out remaining stock per code           ── checked_sub         │
//! │  4. monthly[period(at)].record(sale)  ── created on first sale         │
//! │  5. write remaining stock, ledger.append(sale)                         │
//! │                                                                         │
//! │  Steps 1-4 may fail and change nothing; step 5 cannot fail, so a       │
//! │  checkout is applied completely or not at all.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers that must also persist the result work on a clone and swap it in
//! once the write succeeds.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::cart::{check_stock, Cart};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{
    receipt_number, Catalog, Ledger, MonthlyAggregate, PeriodKey, Product, Sale, SaleLine,
};

/// Catalog, ledger and monthly aggregates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    catalog: Catalog,
    ledger: Ledger,
    monthly: BTreeMap<PeriodKey, MonthlyAggregate>,
}

impl Inventory {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reassembles state read back from storage.
    pub fn from_parts(
        catalog: Catalog,
        ledger: Ledger,
        monthly: impl IntoIterator<Item = MonthlyAggregate>,
    ) -> Self {
        Inventory {
            catalog,
            ledger,
            monthly: monthly.into_iter().map(|m| (m.period, m)).collect(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// All aggregates, oldest period first.
    pub fn monthly(&self) -> &BTreeMap<PeriodKey, MonthlyAggregate> {
        &self.monthly
    }

    pub fn aggregate(&self, period: PeriodKey) -> Option<&MonthlyAggregate> {
        self.monthly.get(&period)
    }

    // =========================================================================
    // Catalog Operations
    // =========================================================================

    /// Adds a new product. Codes are never reused.
    pub fn add_product(&mut self, product: Product) -> CoreResult<()> {
        self.catalog.insert(product)
    }

    /// Adds received units to an existing product's stock.
    pub fn restock(&mut self, code: &str, quantity: u32) -> CoreResult<&Product> {
        if quantity == 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }

        let product = self
            .catalog
            .get_mut(code.trim())
            .ok_or_else(|| CoreError::UnknownProduct(code.trim().to_string()))?;

        product.quantity = product.quantity.checked_add(quantity).ok_or_else(|| {
            ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 0,
                max: u32::MAX as i64,
            }
        })?;

        Ok(&*product)
    }

    /// Products with stock strictly below `threshold`, in catalog order.
    pub fn low_stock(&self, threshold: u32) -> Vec<&Product> {
        self.catalog
            .iter()
            .filter(|p| p.quantity < threshold)
            .collect()
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Runs the same check checkout will, without changing anything.
    pub fn check_cart(&self, cart: &Cart) -> CoreResult<()> {
        check_stock(&self.catalog, cart)
    }

    /// Completes a sale.
    ///
    /// `at` is the local completion time; it fixes the receipt number and the
    /// month the sale rolls into.
    ///
    /// ## Errors
    /// `EmptyCart`, `UnknownProduct`, `InsufficientStock` or
    /// `TotalOverflow`, with the inventory left untouched.
    pub fn checkout(&mut self, cart: &Cart, at: DateTime<Local>) -> CoreResult<Sale> {
        check_stock(&self.catalog, cart)?;

        let lines = cart
            .lines()
            .iter()
            .map(|line| {
                let product = self
                    .catalog
                    .get(&line.code)
                    .ok_or_else(|| CoreError::UnknownProduct(line.code.clone()))?;
                SaleLine::from_product(product, line.quantity)
            })
            .collect::<CoreResult<Vec<_>>>()?;

        let remaining = self.remaining_stock(cart)?;

        let date = at.date_naive();
        let total =
            Money::checked_sum(lines.iter().map(|l| l.amount)).ok_or(CoreError::TotalOverflow)?;
        let sale = Sale {
            id: Uuid::new_v4(),
            receipt_number: receipt_number(date, self.ledger.count_on(date) + 1),
            completed_at: at,
            total,
            lines,
        };

        let period = sale.period();
        match self.monthly.get_mut(&period) {
            Some(aggregate) => aggregate.record(&sale)?,
            None => {
                let mut aggregate = MonthlyAggregate::new(period, date);
                aggregate.record(&sale)?;
                self.monthly.insert(period, aggregate);
            }
        }

        for (code, quantity) in remaining {
            if let Some(product) = self.catalog.get_mut(&code) {
                product.quantity = quantity;
            }
        }
        self.ledger.append(sale.clone());

        Ok(sale)
    }

    /// Stock left per code once `cart` is taken out.
    fn remaining_stock(&self, cart: &Cart) -> CoreResult<Vec<(String, u32)>> {
        cart.requested_totals()
            .into_iter()
            .map(|(code, requested)| {
                let product = self
                    .catalog
                    .get(code)
                    .ok_or_else(|| CoreError::UnknownProduct(code.to_string()))?;
                let left = u64::from(product.quantity)
                    .checked_sub(requested)
                    .and_then(|left| u32::try_from(left).ok())
                    .ok_or_else(|| CoreError::InsufficientStock {
                        code: code.to_string(),
                        available: product.quantity,
                        requested,
                    })?;
                Ok((code.to_string(), left))
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
