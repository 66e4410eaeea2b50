//! # Ledger Repository
//!
//! The ledger lives in two files:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  sales.json    [sale, sale, ...]     full snapshot, rewritten atomically│
//! │  sales.jsonl   sale\nsale\n...        journal, one line per new sale     │
//! │                                                                         │
//! │  checkout ──► append(sale)           one line, flushed + synced         │
//! │  backup   ──► compact(ledger)        snapshot ← all, journal ← empty    │
//! │  shutdown ──► compact(ledger)                                           │
//! │                                                                         │
//! │  load:  snapshot ++ [journal sales whose id is not in the snapshot]    │
//! │                                                                         │
//! │  A crash between snapshot write and journal truncation leaves sales    │
//! │  in both files; the id check keeps them from being counted twice.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::fs::{read_json, write_json_atomic};
use apotheca_core::{Ledger, Sale};

/// Reads and writes the sale ledger.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    snapshot: PathBuf,
    journal: PathBuf,
}

impl LedgerRepository {
    pub fn new(snapshot: impl Into<PathBuf>, journal: impl Into<PathBuf>) -> Self {
        LedgerRepository {
            snapshot: snapshot.into(),
            journal: journal.into(),
        }
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot
    }

    pub fn journal_path(&self) -> &Path {
        &self.journal
    }

    /// Appends one sale to the journal.
    ///
    /// If the write fails part way, the journal is cut back to its previous
    /// length so no partial line is left behind.
    pub fn append(&self, sale: &Sale) -> StoreResult<()> {
        let line = serde_json::to_string(sale)?;
        let mark = self.journal_len();

        let write_line = || -> io::Result<()> {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.journal)?;
            writeln!(file, "{}", line)?;
            file.flush()?;
            file.sync_data()
        };
        if let Err(e) = write_line() {
            self.truncate_to(mark);
            return Err(StoreError::write(&self.journal, e));
        }

        debug!(sale_id = %sale.id, receipt = %sale.receipt_number, "Sale journaled");
        Ok(())
    }

    fn journal_len(&self) -> u64 {
        std::fs::metadata(&self.journal).map(|m| m.len()).unwrap_or(0)
    }

    fn truncate_to(&self, len: u64) {
        let cut = OpenOptions::new()
            .write(true)
            .open(&self.journal)
            .and_then(|file| file.set_len(len));

        match cut {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.journal.display(),
                error = %e,
                "Could not cut back journal after a failed append"
            ),
        }
    }

    /// Loads the snapshot and replays the journal on top of it.
    ///
    /// Every sale is re-checked with [`Sale::validate`]; one that breaks its
    /// own totals makes the load fail.
    pub fn load(&self) -> StoreResult<Ledger> {
        let mut sales: Vec<Sale> = read_json(&self.snapshot)?.unwrap_or_default();
        for sale in &sales {
            sale.validate()
                .map_err(|e| StoreError::invalid(&self.snapshot, e))?;
        }
        let mut seen: HashSet<Uuid> = sales.iter().map(|s| s.id).collect();

        let mut replayed = 0usize;
        for sale in self.read_journal()? {
            if seen.insert(sale.id) {
                sales.push(sale);
                replayed += 1;
            }
        }

        if replayed > 0 {
            info!(replayed, "Replayed journaled sales");
        }
        debug!(sales = sales.len(), "Ledger loaded");
        Ok(Ledger::from_sales(sales))
    }

    /// Sales currently in the journal, in append order.
    ///
    /// A final line that does not parse is the remains of an interrupted
    /// append and is skipped. A bad line anywhere else is corruption.
    pub fn read_journal(&self) -> StoreResult<Vec<Sale>> {
        let file = match File::open(&self.journal) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::read(&self.journal, e)),
        };

        let mut lines = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| StoreError::read(&self.journal, e))?;
            if !line.trim().is_empty() {
                lines.push(line);
            }
        }

        let last = lines.len().saturating_sub(1);
        let mut sales = Vec::with_capacity(lines.len());
        for (i, line) in lines.iter().enumerate() {
            match serde_json::from_str::<Sale>(line) {
                Ok(sale) => {
                    sale.validate()
                        .map_err(|e| StoreError::invalid(&self.journal, e))?;
                    sales.push(sale);
                }
                Err(e) if i == last => {
                    warn!(
                        path = %self.journal.display(),
                        error = %e,
                        "Skipping incomplete last journal line"
                    );
                }
                Err(e) => return Err(StoreError::corrupt(&self.journal, e)),
            }
        }

        Ok(sales)
    }

    /// True when the journal is absent or has no bytes.
    pub fn journal_is_empty(&self) -> bool {
        std::fs::metadata(&self.journal)
            .map(|m| m.len() == 0)
            .unwrap_or(true)
    }

    /// Folds the journal into the snapshot.
    ///
    /// The snapshot is written first; the journal is truncated only after the
    /// new snapshot is in place.
    pub fn compact(&self, ledger: &Ledger) -> StoreResult<()> {
        write_json_atomic(&self.snapshot, ledger)?;

        if !self.journal_is_empty() {
            File::create(&self.journal).map_err(|e| StoreError::write(&self.journal, e))?;
        }

        debug!(sales = ledger.len(), "Ledger compacted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
