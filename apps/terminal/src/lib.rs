//! # Apotheca Terminal Library
//!
//! Core library for the Apotheca POS terminal application.
//!
//! ## Module Organization
//! ```text
//! apotheca_terminal/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── Command-line flags
//! ├── config.rs       ◄─── Layered configuration
//! ├── menu.rs         ◄─── Numbered menu + backup timer loop
//! ├── state/
//! │   ├── mod.rs      ◄─── State exports
//! │   └── app.rs      ◄─── AppState and staged commit
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Add, list, low stock, restock
//! │   ├── sale.rs     ◄─── Cart and checkout
//! │   ├── report.rs   ◄─── Summary, history, monthly report
//! │   └── backup.rs   ◄─── Backup now
//! └── error.rs        ◄─── CommandError and startup errors
//! ```
//!
//! The command functions are the whole application surface. The menu is one
//! front end over them; another (a form UI, a test) can call them directly.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod menu;
pub mod state;

pub use cli::Cli;
pub use config::AppConfig;
pub use error::{AppError, CommandError, ErrorCode};
pub use menu::Menu;
pub use state::AppState;

use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Runs the terminal application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: warn,apotheca=info; RUST_LOG overrides                   │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → apotheca.toml → APOTHECA_* → flags, then validate      │
/// │                                                                         │
/// │  3. Open Data Directory ──────────────────────────────────────────────► │
/// │     • Create data/ and data/monthly/ if missing                         │
/// │     • Load catalog, ledger (+ journal replay), monthly aggregates       │
/// │     • A corrupt document stops here                                     │
/// │                                                                         │
/// │  4. Run Menu ─────────────────────────────────────────────────────────► │
/// │     • stdin lines and backup ticks on one task                          │
/// │     • Compact the journal on exit                                       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> Result<(), AppError> {
    init_tracing();

    let mut config = AppConfig::load(cli.config.clone())?;
    cli.apply(&mut config);
    config.validate()?;

    info!(
        data_dir = %config.data_dir.display(),
        backup_dir = %config.backup.dir.display(),
        "Starting Apotheca POS"
    );

    let state = AppState::open(config)?;
    let input = BufReader::new(tokio::io::stdin());
    let mut menu = Menu::new(state, input, std::io::stdout());
    menu.run().await?;

    info!("Apotheca POS stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=apotheca_store=debug` - Per-file detail from the store
/// - Default: warnings, plus info from the apotheca crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,apotheca=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
