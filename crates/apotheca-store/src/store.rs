//! # Store Handle
//!
//! Opening the data directory and the save points the command layer calls.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Store Lifecycle                                 │
//! │                                                                         │
//! │  App Startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new(data_dir) ← Configure directories                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store::open(config) ← Create data/ and data/monthly/                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.load() ──► Inventory  (corrupt document = fatal)                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────────────── while running ───────────────────────────┐  │
//! │  │  record_sale(before, after, sale)  catalog + month + journal     │  │
//! │  │  save_catalog(inventory)        add product / restock            │  │
//! │  │  backup(ledger, now)            compact + copy + prune           │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.compact(ledger) on clean shutdown                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::backup::{create_backup, prune_backups, BackupReport};
use crate::error::StoreResult;
use crate::fs::ensure_dir;
use crate::repository::{CatalogRepository, LedgerRepository, MonthlyRepository};
use apotheca_core::{Inventory, Ledger, PeriodKey, Sale};

const PRODUCTS_FILE: &str = "products.json";
const SALES_FILE: &str = "sales.json";
const JOURNAL_FILE: &str = "sales.jsonl";
const MONTHLY_DIR: &str = "monthly";

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust
/// use apotheca_store::StoreConfig;
///
/// let config = StoreConfig::new("./data")
///     .backup_dir("./backups")
///     .max_backups(Some(24));
/// assert_eq!(config.max_backups, Some(24));
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the live documents.
    pub data_dir: PathBuf,

    /// Directory that receives `backup_*` folders.
    /// Default: `backups` next to the data directory
    pub backup_dir: PathBuf,

    /// Keep only this many backup folders. `None` keeps all.
    pub max_backups: Option<usize>,
}

impl StoreConfig {
    /// Creates a configuration rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let backup_dir = data_dir
            .parent()
            .map(|p| p.join("backups"))
            .unwrap_or_else(|| PathBuf::from("backups"));

        StoreConfig {
            data_dir,
            backup_dir,
            max_backups: None,
        }
    }

    /// Sets the backup directory.
    pub fn backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = dir.into();
        self
    }

    /// Sets backup retention.
    pub fn max_backups(mut self, max: Option<usize>) -> Self {
        self.max_backups = max;
        self
    }
}

// =============================================================================
// Store
// =============================================================================

/// Handle to an open data directory.
#[derive(Debug, Clone)]
pub struct Store {
    config: StoreConfig,
}

impl Store {
    /// Opens the data directory, creating it if needed.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        info!(path = %config.data_dir.display(), "Opening data directory");

        ensure_dir(&config.data_dir)?;
        ensure_dir(&config.data_dir.join(MONTHLY_DIR))?;

        Ok(Store { config })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Returns the catalog repository.
    pub fn catalog(&self) -> CatalogRepository {
        CatalogRepository::new(self.config.data_dir.join(PRODUCTS_FILE))
    }

    /// Returns the ledger repository.
    pub fn ledger(&self) -> LedgerRepository {
        LedgerRepository::new(
            self.config.data_dir.join(SALES_FILE),
            self.config.data_dir.join(JOURNAL_FILE),
        )
    }

    /// Returns the monthly aggregate repository.
    pub fn monthly(&self) -> MonthlyRepository {
        MonthlyRepository::new(self.config.data_dir.join(MONTHLY_DIR))
    }

    // =========================================================================
    // Whole-State Operations
    // =========================================================================

    /// Reads catalog, ledger (with journal replay) and every month.
    pub fn load(&self) -> StoreResult<Inventory> {
        let catalog = self.catalog().load()?;
        let ledger = self.ledger().load()?;
        let monthly = self.monthly().load_all()?;

        info!(
            products = catalog.len(),
            sales = ledger.len(),
            months = monthly.len(),
            "Store loaded"
        );
        Ok(Inventory::from_parts(catalog, ledger, monthly))
    }

    /// Persists a completed sale.
    ///
    /// `before` and `after` are the states either side of the checkout.
    ///
    /// ## Write Order
    /// ```text
    /// 1. products.json      ── fails: nothing written
    /// 2. monthly/YYYY-MM    ── fails: products.json put back
    /// 3. sales.jsonl line   ── fails: line cut off, both documents put back
    /// ```
    /// The journal line is the commit point. A sale the caller is told
    /// failed is never replayed on the next load.
    pub fn record_sale(&self, before: &Inventory, after: &Inventory, sale: &Sale) -> StoreResult<()> {
        let period = sale.period();
        self.catalog().save(after.catalog())?;

        let written = match after.aggregate(period) {
            Some(aggregate) => self.monthly().save(aggregate),
            None => Ok(()),
        }
        .and_then(|()| self.ledger().append(sale));

        if let Err(err) = written {
            self.restore_sale_documents(before, period);
            return Err(err);
        }

        debug!(receipt = %sale.receipt_number, "Sale persisted");
        Ok(())
    }

    /// Rewrites the catalog and `period`'s month as `before` had them.
    fn restore_sale_documents(&self, before: &Inventory, period: PeriodKey) {
        let restored = self
            .catalog()
            .save(before.catalog())
            .and_then(|()| match before.aggregate(period) {
                Some(aggregate) => self.monthly().save(aggregate),
                None => self.monthly().remove(period),
            });

        if let Err(e) = restored {
            warn!(%period, error = %e, "Could not restore documents after a failed sale");
        }
    }

    /// Rewrites the catalog after an add or restock.
    pub fn save_catalog(&self, inventory: &Inventory) -> StoreResult<()> {
        self.catalog().save(inventory.catalog())
    }

    /// Writes every document from scratch and empties the journal.
    pub fn save_all(&self, inventory: &Inventory) -> StoreResult<()> {
        self.catalog().save(inventory.catalog())?;
        let monthly = self.monthly();
        for aggregate in inventory.monthly().values() {
            monthly.save(aggregate)?;
        }
        self.ledger().compact(inventory.ledger())
    }

    /// Folds the journal into the ledger snapshot.
    pub fn compact(&self, ledger: &Ledger) -> StoreResult<()> {
        self.ledger().compact(ledger)
    }

    /// Compacts, copies every document into a new backup folder, then
    /// applies retention.
    pub fn backup(&self, ledger: &Ledger, now: DateTime<Local>) -> StoreResult<BackupReport> {
        self.compact(ledger)?;

        let mut files = vec![PathBuf::from(PRODUCTS_FILE), PathBuf::from(SALES_FILE)];
        if !self.ledger().journal_is_empty() {
            files.push(PathBuf::from(JOURNAL_FILE));
        }
        for (period, _) in self.monthly().list()? {
            files.push(Path::new(MONTHLY_DIR).join(format!("{}.json", period)));
        }

        let mut report = create_backup(&self.config.data_dir, &files, &self.config.backup_dir, now)?;

        if let Some(keep) = self.config.max_backups {
            report.pruned = prune_backups(&self.config.backup_dir, keep)?;
        }

        Ok(report)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
