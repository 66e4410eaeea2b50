//! # Application State
//!
//! ## Staged Commit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    AppState::commit(stage, persist)                     │
//! │                                                                         │
//! │  inventory ──clone──► staged                                            │
//! │                         │                                               │
//! │                         ▼                                               │
//! │                  stage(&mut staged) ──Err──► return, inventory intact   │
//! │                         │ Ok(value)                                     │
//! │                         ▼                                               │
//! │   persist(&store, &inventory, &staged, &value) ──Err──► return, intact │
//! │                         │ Ok                                            │
//! │                         ▼                                               │
//! │                  inventory = staged                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use apotheca_core::{Cart, Catalog, CoreResult, Inventory};
use apotheca_store::{Store, StoreResult};
use tracing::info;

use crate::config::AppConfig;
use crate::error::CommandError;

/// Session state for one running terminal.
#[derive(Debug)]
pub struct AppState {
    inventory: Inventory,
    cart: Cart,
    store: Store,
    config: AppConfig,
}

impl AppState {
    /// Opens the data directory named by `config` and loads it.
    ///
    /// A corrupt document fails here; the caller treats that as fatal.
    pub fn open(config: AppConfig) -> StoreResult<Self> {
        let store = Store::open(config.store_config())?;
        let inventory = store.load()?;
        Ok(AppState::new(store, inventory, config))
    }

    pub fn new(store: Store, inventory: Inventory, config: AppConfig) -> Self {
        AppState {
            inventory,
            cart: Cart::new(),
            store,
            config,
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The open cart plus the catalog it is checked against.
    pub(crate) fn cart_and_catalog(&mut self) -> (&mut Cart, &Catalog) {
        (&mut self.cart, self.inventory.catalog())
    }

    /// Stages a mutation on a copy of the inventory, persists it, and only
    /// then makes it current.
    ///
    /// `persist` sees the current inventory and the staged one, so it can put
    /// documents back if a later write fails.
    pub(crate) fn commit<T>(
        &mut self,
        stage: impl FnOnce(&mut Inventory) -> CoreResult<T>,
        persist: impl FnOnce(&Store, &Inventory, &Inventory, &T) -> StoreResult<()>,
    ) -> Result<T, CommandError> {
        let mut staged = self.inventory.clone();
        let value = stage(&mut staged)?;
        persist(&self.store, &self.inventory, &staged, &value)?;
        self.inventory = staged;
        Ok(value)
    }

    /// Folds the sale journal into `sales.json` before exit.
    pub fn shutdown(&self) -> StoreResult<()> {
        self.store.compact(self.inventory.ledger())?;
        info!(sales = self.inventory.ledger().len(), "Ledger compacted on shutdown");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apotheca_core::{CoreError, Money, Product};
    use apotheca_store::StoreError;
    use tempfile::TempDir;

    fn state(dir: &TempDir) -> AppState {
        let mut config = AppConfig::default();
        config.data_dir = dir.path().join("data");
        config.backup.dir = dir.path().join("backups");
        AppState::open(config).unwrap()
    }

    fn aspirin() -> Product {
        Product::new("A100", "Aspirin", Money::from_cents(500), 20).unwrap()
    }

    #[test]
    fn test_commit_applies_on_success() {
        let dir = TempDir::new().unwrap();
        let mut state = state(&dir);

        state
            .commit(|inv| inv.add_product(aspirin()), |store, _, inv, _| store.save_catalog(inv))
            .unwrap();

        assert!(state.inventory().catalog().contains("A100"));
        assert!(dir.path().join("data/products.json").is_file());
    }

    #[test]
    fn test_commit_keeps_state_on_stage_error() {
        let dir = TempDir::new().unwrap();
        let mut state = state(&dir);
        let before = state.inventory().clone();

        let err = state
            .commit(
                |inv| -> CoreResult<()> {
                    inv.add_product(aspirin())?;
                    Err(CoreError::EmptyCart)
                },
                |_, _, _, _| Ok(()),
            )
            .unwrap_err();

        assert_eq!(err.code, crate::error::ErrorCode::EmptyCart);
        assert_eq!(state.inventory(), &before);
    }

    #[test]
    fn test_commit_keeps_state_on_persist_error() {
        let dir = TempDir::new().unwrap();
        let mut state = state(&dir);

        let err = state
            .commit(
                |inv| inv.add_product(aspirin()),
                |_, _, _, _| {
                    let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
                    Err(StoreError::write("data/products.json", io))
                },
            )
            .unwrap_err();

        assert!(err.is_persistence_failure());
        assert!(state.inventory().catalog().is_empty());
    }
}
