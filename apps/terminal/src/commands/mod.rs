//! # Commands Module
//!
//! The UI-agnostic operations behind every menu entry.
//!
//! ## Command Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Front end (menu.rs, or any other)                                     │
//! │  ─────────                                                              │
//! │  let receipt = commands::sale::checkout(&mut state)?;                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Command                                                                │
//! │  ───────                                                                │
//! │  fn checkout(                                                           │
//! │      state: &mut AppState,    ◄── single owner, no locking             │
//! │  ) -> Result<Receipt, CommandError>                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Plain data back: DTOs, Receipt, MonthlyReport (all Serialize)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Menu Mapping
//! | Menu entry          | Command                               |
//! |---------------------|---------------------------------------|
//! | 1. Add New Product  | [`product::add_product`]              |
//! | 2. View Products    | [`product::list_products`]            |
//! | 3. Make Sale        | [`sale::add_to_cart`], [`sale::checkout`] |
//! | 4. Check Stock      | [`product::low_stock`]                |
//! | 5. View Sales Report| [`report::sales_summary`]             |
//! | 6. Monthly Report   | [`report::monthly_report`]            |
//! | 7. Sales History    | [`report::sales_history`]             |
//! | 8. Restock Product  | [`product::restock`]                  |
//! | 9. Backup Now       | [`backup::backup_now`]                |

pub mod backup;
pub mod product;
pub mod report;
pub mod sale;
