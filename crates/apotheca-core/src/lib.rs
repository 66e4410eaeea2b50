//! # apotheca-core: Pure Business Logic for Apotheca POS
//!
//! This crate is the **heart** of Apotheca POS. It holds the catalog, the sale
//! ledger and the monthly aggregates as plain owned values, and every rule
//! that changes them. It performs no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Apotheca POS Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Terminal Menu (apps/terminal)                │   │
//! │  │    Add Product ──► Make Sale ──► Receipt ──► Monthly Report     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ command functions                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ apotheca-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   cart    │  │ inventory │  │  report   │  │   │
//! │  │   │  Product  │  │   Cart    │  │ checkout  │  │  monthly  │  │   │
//! │  │   │   Sale    │  │ check_    │  │ restock   │  │  summary  │  │   │
//! │  │   │  Period   │  │  stock    │  │ low_stock │  │  receipt  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO CLOCK READS • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 apotheca-store (Persistence)                    │   │
//! │  │          JSON documents, sale journal, atomic writes, backups   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Catalog, Sale, MonthlyAggregate, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Pending sale lines and the stock check shared with checkout
//! - [`inventory`] - The owned store state and the checkout transaction
//! - [`receipt`] - Receipt view of a completed sale
//! - [`report`] - Monthly report, sales summary and history views
//! - [`validation`] - Field validation and parsing of user-typed numbers
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use apotheca_core::{Cart, Inventory, Money, Product};
//! use chrono::Local;
//!
//! let mut inventory = Inventory::new();
//! inventory
//!     .add_product(Product::new("A100", "Aspirin", Money::from_cents(500), 20).unwrap())
//!     .unwrap();
//!
//! let mut cart = Cart::new();
//! cart.add_line("A100", 3).unwrap();
//!
//! let sale = inventory.checkout(&cart, Local::now()).unwrap();
//! assert_eq!(sale.total.cents(), 1500);
//! assert_eq!(inventory.catalog().get("A100").unwrap().quantity, 17);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod inventory;
pub mod money;
pub mod receipt;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use apotheca_core::Money` instead of
// `use apotheca_core::money::Money`

pub use cart::{Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::Inventory;
pub use money::Money;
pub use receipt::Receipt;
pub use report::{MonthlyReport, SaleHistoryEntry, SalesSummary, TopProduct};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Products with stock strictly below this level are reported as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

/// How many products the monthly report ranks.
pub const TOP_PRODUCTS_LIMIT: usize = 10;

/// Product names on a receipt are cut to this many characters.
pub const DEFAULT_RECEIPT_NAME_WIDTH: usize = 12;

/// Maximum length of a product code.
pub const MAX_CODE_LENGTH: usize = 50;

/// Maximum length of a product name.
pub const MAX_NAME_LENGTH: usize = 200;
