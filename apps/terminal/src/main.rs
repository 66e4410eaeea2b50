//! # Apotheca Terminal Entry Point
//!
//! ```text
//! $ apotheca --data-dir ./data --backup-interval 600
//!
//! === Pharmacy Management System ===
//! 1. Add New Product
//! ...
//! 0. Exit
//! ```
//!
//! The setup lives in `lib.rs` so integration tests can drive it.

use std::process::ExitCode;

use clap::Parser;

use apotheca_terminal::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match apotheca_terminal::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
