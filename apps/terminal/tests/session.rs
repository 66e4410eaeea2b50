//! Menu sessions driven from an in-memory script against a temporary data
//! directory.

use std::path::Path;

use apotheca_terminal::{AppConfig, AppState, Menu};
use chrono::{DateTime, Local, TimeZone};
use tempfile::TempDir;

fn fixed_clock() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 10, 16, 14, 3, 11).unwrap()
}

fn config(dir: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.data_dir = dir.join("data");
    config.backup.dir = dir.join("backups");
    config
}

/// Runs one session over `script`, returning the state and everything printed.
async fn session(dir: &Path, script: &str) -> (AppState, String) {
    let state = AppState::open(config(dir)).unwrap();
    let mut menu = Menu::new(state, script.as_bytes(), Vec::new()).with_clock(fixed_clock);
    menu.run().await.unwrap();

    let (state, out) = menu.into_parts();
    (state, String::from_utf8(out).unwrap())
}

const ADD_ASPIRIN: &str = "1\nA100\nAspirin\n5.00\n20\n";

#[tokio::test]
async fn test_sale_prints_receipt() {
    let dir = TempDir::new().unwrap();
    let script = format!("{}3\nA100\n3\ndone\n0\n", ADD_ASPIRIN);

    let (state, out) = session(dir.path(), &script).await;

    let expected = "\
=== Receipt ===
Receipt: 20261016-0001
Date: 2026-10-16 14:03:11

Name          Qty   Price     Amount
----------------------------------------
Aspirin       3     $5.00     $15.00
----------------------------------------
Total Amount: $15.00";
    assert!(out.contains(expected), "receipt missing from:\n{}", out);
    assert!(out.contains("Product 'Aspirin' added successfully!"));
    assert!(out.contains("Running total: $15.00"));
    assert!(out.ends_with("Thank you for using Pharmacy Management System!\n"));

    assert_eq!(state.inventory().catalog().get("A100").unwrap().quantity, 17);
}

#[tokio::test]
async fn test_insufficient_stock_keeps_catalog() {
    let dir = TempDir::new().unwrap();
    let script = format!("{}3\nA100\n25\ndone\n0\n", ADD_ASPIRIN);

    let (state, out) = session(dir.path(), &script).await;

    assert!(out.contains("Error: Insufficient stock for A100: available 20, requested 25"));
    assert!(out.contains("No items in cart. Sale cancelled."));
    assert_eq!(state.inventory().catalog().get("A100").unwrap().quantity, 20);
    assert!(state.inventory().ledger().is_empty());
}

#[tokio::test]
async fn test_form_errors_are_reported() {
    let dir = TempDir::new().unwrap();
    let script = format!(
        "{}1\nA100\n1\nB200\nBandage\nfree\n5\n8\nA100\n0\n42\n0\n",
        ADD_ASPIRIN
    );

    let (state, out) = session(dir.path(), &script).await;

    assert!(out.contains("Error: Product code 'A100' already exists"));
    assert!(out.contains("Error: Invalid price: 'free' is not a valid number"));
    assert!(out.contains("Error: quantity must be positive"));
    assert!(out.contains("Invalid choice! Please try again."));
    assert_eq!(state.inventory().catalog().len(), 1);
}

#[tokio::test]
async fn test_reports() {
    let dir = TempDir::new().unwrap();
    let script = format!(
        "{}5\n3\nA100\n3\ndone\n5\n6\n2026\n10\n6\n2026\n2\n7\n4\n0\n",
        ADD_ASPIRIN
    );

    let (_, out) = session(dir.path(), &script).await;

    assert!(out.contains("No sales recorded yet!"));
    assert!(out.contains("Total Sales: $15.00"));
    assert!(out.contains("Number of Transactions: 1"));
    assert!(out.contains("Months with sales: 2026-10"));
    assert!(out.contains("Period: 2026-10"));
    assert!(out.contains("Start Date: 2026-10-16"));
    assert!(out.contains("A100      Aspirin       3         $15.00"));
    assert!(out.contains("Error: No data available for 2026-02"));
    assert!(out.contains("20261016-0001  2026-10-16 14:03:11  1      $15.00"));
    assert!(out.contains("All products are sufficiently stocked."));
}

#[tokio::test]
async fn test_restock_and_low_stock() {
    let dir = TempDir::new().unwrap();
    let script = "1\nC300\nCough Syrup Extra Strength\n7.25\n4\n4\n8\nC300\n10\n4\n0\n";

    let (state, out) = session(dir.path(), script).await;

    // Names are cut to the display width in listings
    assert!(out.contains("C300      Cough Syrup   4\n"));
    assert!(out.contains("'Cough Syrup Extra Strength' now has 14 in stock."));
    assert!(out.contains("All products are sufficiently stocked."));
    assert_eq!(state.inventory().catalog().get("C300").unwrap().quantity, 14);
}

#[tokio::test]
async fn test_backup_now() {
    let dir = TempDir::new().unwrap();
    let script = format!("{}9\n0\n", ADD_ASPIRIN);

    let (_, out) = session(dir.path(), &script).await;

    let backup = dir.path().join("backups").join("backup_20261016_140311");
    assert!(out.contains(&format!("Backup created: {}", backup.display())));
    assert!(backup.join("products.json").is_file());
    assert!(backup.join("sales.json").is_file());
}

#[tokio::test]
async fn test_end_of_input_saves_and_reloads() {
    let dir = TempDir::new().unwrap();
    // No "0": the script just ends, mid-way through a sale
    let script = format!("{}3\nA100\n3\ndone\n3\nA100\n", ADD_ASPIRIN);

    let (state, out) = session(dir.path(), &script).await;
    assert!(out.contains("Thank you for using"));

    // Shutdown compacted the journal into sales.json
    let data = dir.path().join("data");
    assert!(data.join("sales.json").is_file());
    let journal = data.join("sales.jsonl");
    assert!(!journal.exists() || std::fs::read_to_string(&journal).unwrap().is_empty());

    let reloaded = AppState::open(config(dir.path())).unwrap();
    assert_eq!(reloaded.inventory(), state.inventory());
    assert_eq!(reloaded.inventory().ledger().len(), 1);
    assert!(reloaded.cart().is_empty());
}
