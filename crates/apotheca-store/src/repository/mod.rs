//! # Repository Module
//!
//! One repository per persisted document family.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Command layer                                                         │
//! │       │                                                                 │
//! │       │  store.catalog().save(inventory.catalog())                     │
//! │       ▼                                                                 │
//! │  CatalogRepository ──► data/products.json                              │
//! │  LedgerRepository  ──► data/sales.json + data/sales.jsonl              │
//! │  MonthlyRepository ──► data/monthly/YYYY-MM.json                       │
//! │                                                                         │
//! │  File names and formats live here and nowhere else.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CatalogRepository`] - Product catalog document
//! - [`LedgerRepository`] - Ledger snapshot and sale journal
//! - [`MonthlyRepository`] - One document per month

pub mod catalog;
pub mod ledger;
pub mod monthly;

pub use catalog::CatalogRepository;
pub use ledger::LedgerRepository;
pub use monthly::MonthlyRepository;
