//! # apotheca-store: Persistence Layer for Apotheca POS
//!
//! Keeps the catalog, the sale ledger and the monthly aggregates as flat JSON
//! documents in one data directory, and takes backups of them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Apotheca POS Data Flow                            │
//! │                                                                         │
//! │  Command (make_sale)                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  apotheca-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Store      │    │  Repositories │    │   Backups    │  │   │
//! │  │   │  (store.rs)   │    │               │    │ (backup.rs)  │  │   │
//! │  │   │               │    │ Catalog       │    │              │  │   │
//! │  │   │ open / load   │◄───│ Ledger        │    │ copy, prune  │  │   │
//! │  │   │ record_sale   │    │ Monthly       │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                 all writes: write-temp-then-rename (fs.rs)     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  data/products.json  data/sales.json  data/sales.jsonl          │   │
//! │  │  data/monthly/YYYY-MM.json            backups/backup_*/         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Store handle and configuration
//! - [`repository`] - One repository per document family
//! - [`backup`] - Backup folders and retention
//! - [`fs`] - Atomic document writes
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use apotheca_store::{Store, StoreConfig};
//!
//! let store = Store::open(StoreConfig::new("./data"))?;
//! let inventory = store.load()?;
//! println!("{} products", inventory.catalog().len());
//! # Ok::<(), apotheca_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backup;
pub mod error;
pub mod fs;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use backup::BackupReport;
pub use error::{StoreError, StoreResult};
pub use store::{Store, StoreConfig};

pub use repository::{CatalogRepository, LedgerRepository, MonthlyRepository};
