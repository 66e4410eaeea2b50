//! Command-line flags. The last configuration layer.

use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;

#[derive(Parser, Debug, Default)]
#[command(name = "apotheca")]
#[command(about = "Pharmacy point-of-sale and inventory tracker")]
#[command(version)]
pub struct Cli {
    /// Config file (default: <config dir>/apotheca.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the data documents
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory receiving backup folders
    #[arg(long, value_name = "DIR")]
    pub backup_dir: Option<PathBuf>,

    /// Seconds between automatic backups
    #[arg(long, value_name = "SECS")]
    pub backup_interval: Option<u64>,

    /// Keep only this many backup folders
    #[arg(long, value_name = "N")]
    pub max_backups: Option<usize>,

    /// Low-stock threshold for Check Stock
    #[arg(long, value_name = "UNITS")]
    pub low_stock: Option<u32>,
}

impl Cli {
    /// Overrides `config` with every flag that was given.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(dir) = &self.backup_dir {
            config.backup.dir = dir.clone();
        }
        if let Some(secs) = self.backup_interval {
            config.backup.interval_secs = secs;
        }
        if let Some(max) = self.max_backups {
            config.backup.max_backups = Some(max);
        }
        if let Some(threshold) = self.low_stock {
            config.low_stock_threshold = threshold;
        }
    }
}
