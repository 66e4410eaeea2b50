//! # State Module
//!
//! Owns everything a running session holds: the inventory, the open cart,
//! the store handle and the configuration.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                          AppState                                │  │
//! │  │                                                                  │  │
//! │  │  ┌──────────────┐  ┌──────────────┐  ┌─────────┐  ┌──────────┐  │  │
//! │  │  │  Inventory   │  │    Cart      │  │  Store  │  │AppConfig │  │  │
//! │  │  │  catalog     │  │  open lines  │  │  paths  │  │ read-only│  │  │
//! │  │  │  ledger      │  │              │  │         │  │          │  │  │
//! │  │  │  monthly     │  │              │  │         │  │          │  │  │
//! │  │  └──────────────┘  └──────────────┘  └─────────┘  └──────────┘  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Single owner, passed as &mut to commands. Mutations go through        │
//! │  AppState::commit: stage on a clone, persist, then swap in.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod app;

pub use app::AppState;
