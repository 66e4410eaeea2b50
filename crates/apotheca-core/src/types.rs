//! # Domain Types
//!
//! Core domain types used throughout Apotheca POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Catalog      │   │     Ledger      │   │  MonthlyAggregate   │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  code → Product │   │  [Sale, ...]    │   │  period (YYYY-MM)   │   │
//! │  │  insert order   │   │  append-only    │   │  sales (copies)     │   │
//! │  └────────┬────────┘   └────────┬────────┘   │  total_revenue      │   │
//! │           │                     │            │  products_sold      │   │
//! │  ┌────────▼────────┐   ┌────────▼────────┐   │  start_date         │   │
//! │  │    Product      │   │      Sale       │   └─────────────────────┘   │
//! │  │  ─────────────  │   │  ─────────────  │                              │
//! │  │  code (key)     │   │  id (UUID)      │   ┌─────────────────────┐   │
//! │  │  name           │   │  receipt_number │   │    ProductStats     │   │
//! │  │  price_cents    │   │  completed_at   │   │  ─────────────────  │   │
//! │  │  quantity       │   │  lines, total   │   │  quantity_sold      │   │
//! │  └─────────────────┘   └─────────────────┘   │  revenue_cents      │   │
//! │                                              └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `SaleLine` freezes the product name and unit price at the moment of
//! sale. Renaming or repricing a product later never rewrites history.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, NaiveDate};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{
    validate_code, validate_price, validate_product_name, validate_stock_quantity,
    ValidationResult,
};

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Business key, unique within the catalog and never reused.
    pub code: String,

    /// Display name shown to the cashier and on receipts.
    pub name: String,

    /// Unit price, always positive.
    #[serde(rename = "price_cents")]
    pub price: Money,

    /// Units on hand.
    pub quantity: u32,
}

impl Product {
    /// Creates a product, checking each field in turn.
    ///
    /// ## Example
    /// ```rust
    /// use apotheca_core::{Money, Product};
    ///
    /// let product = Product::new("A100", "Aspirin", Money::from_cents(500), 20).unwrap();
    /// assert_eq!(product.quantity, 20);
    ///
    /// assert!(Product::new("A100", "Aspirin", Money::zero(), 20).is_err());
    /// assert!(Product::new("A100", "Aspirin", Money::from_cents(500), -1).is_err());
    /// ```
    pub fn new(code: &str, name: &str, price: Money, quantity: i64) -> ValidationResult<Self> {
        validate_code(code)?;
        validate_product_name(name)?;
        validate_price(price)?;
        let quantity = validate_stock_quantity(quantity)?;

        Ok(Product {
            code: code.trim().to_string(),
            name: name.trim().to_string(),
            price,
            quantity,
        })
    }

    /// Re-checks the field rules on a product that did not come through
    /// [`Product::new`] (e.g. one read back from disk).
    pub fn validate(&self) -> ValidationResult<()> {
        validate_code(&self.code)?;
        validate_product_name(&self.name)?;
        validate_price(self.price)?;
        Ok(())
    }

    /// Checks whether `requested` units can be taken from stock.
    #[inline]
    pub fn can_sell(&self, requested: u64) -> bool {
        u64::from(self.quantity) >= requested
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The set of sellable products, keyed by code, in insertion order.
///
/// Serialized as a JSON object `{ "<code>": product, ... }` whose entries
/// follow insertion order, so listing order survives a save and reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product. Fails if the code is already present.
    pub fn insert(&mut self, product: Product) -> CoreResult<()> {
        if self.index.contains_key(&product.code) {
            return Err(CoreError::DuplicateProductCode(product.code));
        }
        self.index.insert(product.code.clone(), self.products.len());
        self.products.push(product);
        Ok(())
    }

    /// Looks up a product by code.
    pub fn get(&self, code: &str) -> Option<&Product> {
        self.index.get(code).map(|&i| &self.products[i])
    }

    pub(crate) fn get_mut(&mut self, code: &str) -> Option<&mut Product> {
        match self.index.get(code) {
            Some(&i) => self.products.get_mut(i),
            None => None,
        }
    }

    /// Checks if a code is taken.
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Products in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.products.len()))?;
        for product in &self.products {
            map.serialize_entry(&product.code, product)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CatalogVisitor)
    }
}

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = Catalog;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of product code to product")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Catalog, A::Error> {
        let mut catalog = Catalog::new();
        while let Some((key, product)) = access.next_entry::<String, Product>()? {
            if key != product.code {
                return Err(de::Error::custom(format!(
                    "key '{}' does not match product code '{}'",
                    key, product.code
                )));
            }
            product.validate().map_err(de::Error::custom)?;
            catalog.insert(product).map_err(de::Error::custom)?;
        }
        Ok(catalog)
    }
}

// =============================================================================
// Sale Line
// =============================================================================

/// One line of a completed sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLine {
    pub code: String,
    /// Product name at time of sale (frozen).
    pub name: String,
    pub quantity: u32,
    /// Unit price at time of sale (frozen).
    #[serde(rename = "unit_price_cents")]
    pub unit_price: Money,
    /// `quantity × unit_price`.
    #[serde(rename = "amount_cents")]
    pub amount: Money,
}

impl SaleLine {
    /// Snapshots a product into a sale line.
    ///
    /// ## Errors
    /// `TotalOverflow` when `quantity × price` does not fit in cents.
    pub fn from_product(product: &Product, quantity: u32) -> CoreResult<Self> {
        let amount = product
            .price
            .checked_mul_quantity(quantity)
            .ok_or(CoreError::TotalOverflow)?;

        Ok(SaleLine {
            code: product.code.clone(),
            name: product.name.clone(),
            quantity,
            unit_price: product.price,
            amount,
        })
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A completed sale. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    /// Unique identifier (UUID v4).
    pub id: Uuid,

    /// Human-readable number, `YYYYMMDD-NNNN` (sequence within the day).
    pub receipt_number: String,

    /// Local wall-clock time of completion.
    pub completed_at: DateTime<Local>,

    /// Lines in cart order. Never empty.
    pub lines: Vec<SaleLine>,

    /// Sum of line amounts.
    #[serde(rename = "total_cents")]
    pub total: Money,
}

impl Sale {
    /// The local calendar date the sale completed on.
    pub fn date(&self) -> NaiveDate {
        self.completed_at.date_naive()
    }

    /// The calendar month this sale rolls up into.
    pub fn period(&self) -> PeriodKey {
        PeriodKey::from_date(self.date())
    }

    /// Number of lines on the sale.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Re-checks a sale that did not come out of checkout (e.g. one read
    /// back from disk).
    ///
    /// ## Rules
    /// - At least one line, each with a positive quantity
    /// - `amount == quantity × unit_price` on every line
    /// - `total == Σ amount`
    pub fn validate(&self) -> ValidationResult<()> {
        if self.lines.is_empty() {
            return Err(ValidationError::Required {
                field: "lines".to_string(),
            });
        }

        for line in &self.lines {
            validate_code(&line.code)?;
            if line.quantity == 0 {
                return Err(ValidationError::MustBePositive {
                    field: "quantity".to_string(),
                });
            }
            if line.unit_price.checked_mul_quantity(line.quantity) != Some(line.amount) {
                return Err(ValidationError::InvalidFormat {
                    field: "amount".to_string(),
                    reason: format!("line {} does not equal quantity × unit price", line.code),
                });
            }
        }

        if Money::checked_sum(self.lines.iter().map(|l| l.amount)) != Some(self.total) {
            return Err(ValidationError::InvalidFormat {
                field: "total".to_string(),
                reason: format!("receipt {} does not equal the sum of its lines", self.receipt_number),
            });
        }

        Ok(())
    }
}

/// Formats a receipt number from the sale date and its 1-based sequence.
///
/// ```rust
/// use apotheca_core::types::receipt_number;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
/// assert_eq!(receipt_number(date, 7), "20261016-0007");
/// ```
pub fn receipt_number(date: NaiveDate, sequence: usize) -> String {
    format!("{}-{:04}", date.format("%Y%m%d"), sequence)
}

// =============================================================================
// Ledger
// =============================================================================

/// Append-only record of completed sales, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    sales: Vec<Sale>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from sales already in completion order.
    pub fn from_sales(sales: Vec<Sale>) -> Self {
        Ledger { sales }
    }

    pub(crate) fn append(&mut self, sale: Sale) {
        self.sales.push(sale);
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sale> {
        self.sales.iter()
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// Checks if a sale with this id is recorded.
    pub fn contains(&self, id: &Uuid) -> bool {
        self.sales.iter().any(|s| &s.id == id)
    }

    /// How many sales completed on `date`.
    pub fn count_on(&self, date: NaiveDate) -> usize {
        self.sales.iter().filter(|s| s.date() == date).count()
    }

    /// Revenue over the whole ledger.
    pub fn total_revenue(&self) -> CoreResult<Money> {
        Money::checked_sum(self.sales.iter().map(|s| s.total)).ok_or(CoreError::TotalOverflow)
    }
}

// =============================================================================
// Period Key
// =============================================================================

/// A calendar year-month, written `YYYY-MM`.
///
/// Field order makes the derived `Ord` chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeriodKey {
    year: i32,
    month: u32,
}

impl PeriodKey {
    /// Creates a period. Month is 1-12, year 1-9999.
    pub fn new(year: i32, month: u32) -> ValidationResult<Self> {
        if !(1..=9999).contains(&year) {
            return Err(ValidationError::OutOfRange {
                field: "year".to_string(),
                min: 1,
                max: 9999,
            });
        }
        if !(1..=12).contains(&month) {
            return Err(ValidationError::OutOfRange {
                field: "month".to_string(),
                min: 1,
                max: 12,
            });
        }
        Ok(PeriodKey { year, month })
    }

    /// The period containing `date`.
    pub fn from_date(date: impl Datelike) -> Self {
        PeriodKey {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for PeriodKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidFormat {
            field: "period".to_string(),
            reason: format!("'{}' is not YYYY-MM", s.trim()),
        };

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        PeriodKey::new(year, month)
    }
}

impl TryFrom<String> for PeriodKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PeriodKey> for String {
    fn from(period: PeriodKey) -> Self {
        period.to_string()
    }
}

// =============================================================================
// Monthly Aggregate
// =============================================================================

/// Per-product totals within one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductStats {
    pub quantity_sold: u64,
    #[serde(rename = "revenue_cents")]
    pub revenue: Money,
}

/// Rollup of every sale completed in one calendar month.
///
/// ## Invariant
/// ```text
/// total_revenue == Σ sales[*].total == Σ products_sold[*].revenue
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    pub period: PeriodKey,
    /// Copies of the month's sales, in completion order.
    pub sales: Vec<Sale>,
    #[serde(rename = "total_revenue_cents")]
    pub total_revenue: Money,
    /// Keyed by product code, so iteration is code-ascending.
    pub products_sold: BTreeMap<String, ProductStats>,
    /// Local date of the first sale of the month.
    pub start_date: NaiveDate,
}

impl MonthlyAggregate {
    /// An empty aggregate, opened by the month's first sale.
    pub fn new(period: PeriodKey, start_date: NaiveDate) -> Self {
        MonthlyAggregate {
            period,
            sales: Vec::new(),
            total_revenue: Money::zero(),
            products_sold: BTreeMap::new(),
            start_date,
        }
    }

    /// Folds a sale into the totals.
    ///
    /// Every sum is worked out before anything is written, so on
    /// `TotalOverflow` the aggregate is unchanged.
    pub fn record(&mut self, sale: &Sale) -> CoreResult<()> {
        let total_revenue = self
            .total_revenue
            .checked_add(sale.total)
            .ok_or(CoreError::TotalOverflow)?;

        let mut touched: BTreeMap<String, ProductStats> = BTreeMap::new();
        for line in &sale.lines {
            let stats = touched
                .entry(line.code.clone())
                .or_insert_with(|| self.products_sold.get(&line.code).copied().unwrap_or_default());
            stats.quantity_sold = stats
                .quantity_sold
                .checked_add(u64::from(line.quantity))
                .ok_or(CoreError::TotalOverflow)?;
            stats.revenue = stats
                .revenue
                .checked_add(line.amount)
                .ok_or(CoreError::TotalOverflow)?;
        }

        self.total_revenue = total_revenue;
        self.products_sold.extend(touched);
        self.sales.push(sale.clone());
        Ok(())
    }

    pub fn sale_count(&self) -> usize {
        self.sales.len()
    }

    /// Checks the revenue invariant.
    pub fn is_consistent(&self) -> bool {
        let by_sale = Money::checked_sum(self.sales.iter().map(|s| s.total));
        let by_product = Money::checked_sum(self.products_sold.values().map(|p| p.revenue));
        by_sale == Some(self.total_revenue) && by_product == Some(self.total_revenue)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn product(code: &str, cents: i64, qty: i64) -> Product {
        Product::new(code, &format!("Product {}", code), Money::from_cents(cents), qty).unwrap()
    }

    fn sale_at(lines: Vec<SaleLine>, y: i32, m: u32, d: u32) -> Sale {
        let completed_at = Local.with_ymd_and_hms(y, m, d, 10, 30, 0).unwrap();
        let total = Money::checked_sum(lines.iter().map(|l| l.amount)).unwrap();
        Sale {
            id: Uuid::new_v4(),
            receipt_number: receipt_number(completed_at.date_naive(), 1),
            completed_at,
            lines,
            total,
        }
    }

    #[test]
    fn test_product_new_reports_each_field() {
        assert!(matches!(
            Product::new("", "Aspirin", Money::from_cents(500), 1),
            Err(ValidationError::Required { ref field }) if field == "code"
        ));
        assert!(matches!(
            Product::new("A100", " ", Money::from_cents(500), 1),
            Err(ValidationError::Required { ref field }) if field == "name"
        ));
        assert!(matches!(
            Product::new("A100", "Aspirin", Money::zero(), 1),
            Err(ValidationError::MustBePositive { ref field }) if field == "price"
        ));
        assert!(matches!(
            Product::new("A100", "Aspirin", Money::from_cents(500), -1),
            Err(ValidationError::Negative { ref field }) if field == "quantity"
        ));
    }

    #[test]
    fn test_product_new_trims() {
        let p = Product::new(" A100 ", " Aspirin ", Money::from_cents(500), 0).unwrap();
        assert_eq!(p.code, "A100");
        assert_eq!(p.name, "Aspirin");
    }

    #[test]
    fn test_catalog_insertion_order_and_duplicates() {
        let mut catalog = Catalog::new();
        catalog.insert(product("Z9", 100, 1)).unwrap();
        catalog.insert(product("A1", 100, 1)).unwrap();

        let err = catalog.insert(product("Z9", 200, 5)).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateProductCode(ref c) if c == "Z9"));

        let codes: Vec<_> = catalog.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["Z9", "A1"]);
        assert_eq!(catalog.get("Z9").unwrap().price.cents(), 100);
    }

    #[test]
    fn test_catalog_json_keeps_order() {
        let mut catalog = Catalog::new();
        catalog.insert(product("Z9", 100, 1)).unwrap();
        catalog.insert(product("A1", 250, 7)).unwrap();

        let json = serde_json::to_string(&catalog).unwrap();
        assert!(json.starts_with(r#"{"Z9":{"code":"Z9""#));
        assert!(json.contains(r#""price_cents":250"#));

        let back: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, catalog);
    }

    #[test]
    fn test_catalog_rejects_mismatched_key() {
        let json = r#"{"X":{"code":"A1","name":"Aspirin","price_cents":500,"quantity":1}}"#;
        assert!(serde_json::from_str::<Catalog>(json).is_err());

        let json = r#"{"A1":{"code":"A1","name":"Aspirin","price_cents":0,"quantity":1}}"#;
        assert!(serde_json::from_str::<Catalog>(json).is_err());
    }

    #[test]
    fn test_period_key_parse_and_order() {
        let p: PeriodKey = "2026-03".parse().unwrap();
        assert_eq!((p.year(), p.month()), (2026, 3));
        assert_eq!(p.to_string(), "2026-03");

        assert!("2026-13".parse::<PeriodKey>().is_err());
        assert!("2026-3".parse::<PeriodKey>().is_err());
        assert!("March".parse::<PeriodKey>().is_err());

        let dec = PeriodKey::new(2025, 12).unwrap();
        assert!(dec < p);
    }

    #[test]
    fn test_period_key_serializes_as_string() {
        let p = PeriodKey::new(2026, 10).unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), r#""2026-10""#);
        assert!(serde_json::from_str::<PeriodKey>(r#""2026-00""#).is_err());
    }

    #[test]
    fn test_ledger_counts_by_date() {
        let p = product("A100", 500, 20);
        let ledger = Ledger::from_sales(vec![
            sale_at(vec![SaleLine::from_product(&p, 1).unwrap()], 2026, 10, 16),
            sale_at(vec![SaleLine::from_product(&p, 2).unwrap()], 2026, 10, 16),
            sale_at(vec![SaleLine::from_product(&p, 3).unwrap()], 2026, 10, 17),
        ]);

        let day = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(ledger.count_on(day), 2);
        assert_eq!(ledger.total_revenue().unwrap().cents(), 3000);
        assert!(ledger.contains(&ledger.sales()[1].id));
    }

    #[test]
    fn test_monthly_aggregate_record() {
        let a = product("A100", 500, 20);
        let b = product("B200", 250, 20);
        let sale = sale_at(
            vec![
                SaleLine::from_product(&a, 3).unwrap(),
                SaleLine::from_product(&b, 2).unwrap(),
            ],
            2026,
            10,
            16,
        );

        let mut agg = MonthlyAggregate::new(sale.period(), sale.date());
        agg.record(&sale).unwrap();
        agg.record(&sale).unwrap();

        assert_eq!(agg.sale_count(), 2);
        assert_eq!(agg.total_revenue.cents(), 4000);
        assert_eq!(agg.products_sold["A100"].quantity_sold, 6);
        assert_eq!(agg.products_sold["B200"].revenue.cents(), 1000);
        assert!(agg.is_consistent());
    }

    #[test]
    fn test_monthly_record_overflow_leaves_aggregate_unchanged() {
        let a = product("A100", 500, 20);
        let gold = product("X1", 9_000_000_000_000_000_000, 5);
        let small = sale_at(vec![SaleLine::from_product(&a, 1).unwrap()], 2026, 10, 1);
        let big = sale_at(vec![SaleLine::from_product(&gold, 1).unwrap()], 2026, 10, 2);

        let mut agg = MonthlyAggregate::new(small.period(), small.date());
        agg.record(&big).unwrap();
        agg.record(&small).unwrap();
        let before = agg.clone();

        assert!(matches!(agg.record(&big), Err(CoreError::TotalOverflow)));
        assert_eq!(agg, before);
        assert!(agg.is_consistent());
    }

    #[test]
    fn test_line_amount_overflow() {
        let gold = product("X1", 9_223_372_036_854_775_800, 5);
        assert!(matches!(
            SaleLine::from_product(&gold, 2),
            Err(CoreError::TotalOverflow)
        ));
    }

    #[test]
    fn test_sale_validate() {
        let p = product("A100", 500, 20);
        let sale = sale_at(vec![SaleLine::from_product(&p, 3).unwrap()], 2026, 10, 16);
        assert!(sale.validate().is_ok());

        let mut empty = sale.clone();
        empty.lines.clear();
        empty.total = Money::zero();
        assert!(matches!(
            empty.validate(),
            Err(ValidationError::Required { ref field }) if field == "lines"
        ));

        let mut wrong_total = sale.clone();
        wrong_total.total = Money::from_cents(1);
        assert!(matches!(
            wrong_total.validate(),
            Err(ValidationError::InvalidFormat { ref field, .. }) if field == "total"
        ));

        let mut wrong_amount = sale;
        wrong_amount.lines[0].amount = Money::from_cents(1);
        wrong_amount.total = Money::from_cents(1);
        assert!(matches!(
            wrong_amount.validate(),
            Err(ValidationError::InvalidFormat { ref field, .. }) if field == "amount"
        ));
    }
}
