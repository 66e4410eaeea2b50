//! # Text Menu
//!
//! The numbered menu and the backup scheduler, sharing one task.
//!
//! ## Run Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Menu::run                                       │
//! │                                                                         │
//! │  loop {                                                                 │
//! │      tokio::select! {                                                   │
//! │          backup tick ───────────► backup_at(state, now)                 │
//! │                                   (logged; never stops the menu)       │
//! │                                                                         │
//! │          next input line ───────► dispatch(choice)                      │
//! │                                   runs to completion, including its    │
//! │                                   own prompts; ticks that fall due     │
//! │                                   meanwhile are delayed, not bursted   │
//! │      }                                                                  │
//! │  }                                                                      │
//! │  "0" or end of input ───────────► compact journal, goodbye              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Input is any [`AsyncBufRead`] and output any [`Write`], so a session can
//! be driven from an in-memory script.

use std::io::{self, Write};

use chrono::{DateTime, Local};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{error, info};

use crate::commands::{backup, product, report, sale};
use crate::error::CommandError;
use crate::state::AppState;
use apotheca_core::{CoreError, Money, MonthlyReport};

const RULE_WIDTH: usize = 40;
const CODE_WIDTH: usize = 10;
const NUMBER_WIDTH: usize = 10;

/// What the menu does after an action.
enum Flow {
    Continue,
    Exit,
}

/// Interactive session over `R` (input lines) and `W` (screen).
pub struct Menu<R, W> {
    state: AppState,
    input: Lines<R>,
    out: W,
    clock: fn() -> DateTime<Local>,
}

impl<R, W> Menu<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(state: AppState, input: R, out: W) -> Self {
        Menu {
            state,
            input: input.lines(),
            out,
            clock: Local::now,
        }
    }

    /// Replaces the wall clock used for sale and backup timestamps.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Local>) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Ends the session, handing back the state and the output sink.
    pub fn into_parts(self) -> (AppState, W) {
        (self.state, self.out)
    }

    /// Runs until "0" is chosen or input ends.
    pub async fn run(&mut self) -> io::Result<()> {
        let period = self.state.config().backup_interval();
        let mut backups = tokio::time::interval_at(Instant::now() + period, period);
        backups.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(interval_secs = period.as_secs(), "Menu started");
        self.show_menu()?;

        loop {
            tokio::select! {
                // Scheduled backup
                _ = backups.tick() => {
                    self.scheduled_backup();
                }

                // Next menu choice
                line = self.input.next_line() => {
                    let Some(choice) = line? else {
                        break;
                    };
                    if let Flow::Exit = self.dispatch(choice.trim()).await? {
                        break;
                    }
                    self.show_menu()?;
                }
            }
        }

        if let Err(e) = self.state.shutdown() {
            error!(error = %e, "Could not compact ledger on exit");
            writeln!(self.out, "\nWARNING: Data may not be saved: {}", e)?;
        }
        writeln!(
            self.out,
            "\nThank you for using {}!",
            self.state.config().store_name
        )?;
        self.out.flush()
    }

    fn show_menu(&mut self) -> io::Result<()> {
        let title = &self.state.config().store_name;
        writeln!(self.out, "\n=== {} ===", title)?;
        writeln!(self.out, "1. Add New Product")?;
        writeln!(self.out, "2. View Products")?;
        writeln!(self.out, "3. Make Sale")?;
        writeln!(self.out, "4. Check Stock")?;
        writeln!(self.out, "5. View Sales Report")?;
        writeln!(self.out, "6. Monthly Report")?;
        writeln!(self.out, "7. Sales History")?;
        writeln!(self.out, "8. Restock Product")?;
        writeln!(self.out, "9. Backup Now")?;
        writeln!(self.out, "0. Exit")?;
        write!(self.out, "\nEnter your choice (0-9): ")?;
        self.out.flush()
    }

    async fn dispatch(&mut self, choice: &str) -> io::Result<Flow> {
        match choice {
            "1" => self.add_product().await,
            "2" => self.view_products().map(|_| Flow::Continue),
            "3" => self.make_sale().await,
            "4" => self.check_stock().map(|_| Flow::Continue),
            "5" => self.sales_report().map(|_| Flow::Continue),
            "6" => self.monthly_report().await,
            "7" => self.sales_history().map(|_| Flow::Continue),
            "8" => self.restock().await,
            "9" => self.backup_now().map(|_| Flow::Continue),
            "0" => Ok(Flow::Exit),
            _ => {
                writeln!(self.out, "\nInvalid choice! Please try again.")?;
                Ok(Flow::Continue)
            }
        }
    }

    // =========================================================================
    // Input Helpers
    // =========================================================================

    /// Prints `text` and reads one trimmed line. `None` at end of input.
    async fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(self
            .input
            .next_line()
            .await?
            .map(|line| line.trim().to_string()))
    }

    fn report_error(&mut self, err: &CommandError) -> io::Result<()> {
        if err.is_persistence_failure() {
            writeln!(self.out, "\nWARNING: {}", err.message)
        } else {
            writeln!(self.out, "\nError: {}", err.message)
        }
    }

    fn clip(&self, name: &str) -> String {
        name.chars().take(self.state.config().receipt_name_width).collect()
    }

    fn name_col(&self) -> usize {
        self.state.config().receipt_name_width + 2
    }

    // =========================================================================
    // Catalog Actions
    // =========================================================================

    async fn add_product(&mut self) -> io::Result<Flow> {
        writeln!(self.out, "\n=== Add New Product ===")?;

        let Some(code) = self.prompt("Enter product code: ").await? else {
            return Ok(Flow::Exit);
        };
        if self.state.inventory().catalog().contains(&code) {
            let err: CommandError = CoreError::DuplicateProductCode(code).into();
            self.report_error(&err)?;
            return Ok(Flow::Continue);
        }
        let Some(name) = self.prompt("Enter product name: ").await? else {
            return Ok(Flow::Exit);
        };
        let Some(price) = self.prompt("Enter product price: ").await? else {
            return Ok(Flow::Exit);
        };
        let Some(quantity) = self.prompt("Enter quantity: ").await? else {
            return Ok(Flow::Exit);
        };

        match product::add_product(&mut self.state, &code, &name, &price, &quantity) {
            Ok(added) => writeln!(self.out, "\nProduct '{}' added successfully!", added.name)?,
            Err(e) => self.report_error(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn view_products(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n=== Product List ===")?;
        let products = product::list_products(&self.state);
        if products.is_empty() {
            return writeln!(self.out, "No products in the catalog yet.");
        }

        let name_col = self.name_col();
        writeln!(
            self.out,
            "{:<CODE_WIDTH$}{:<name_col$}{:<NUMBER_WIDTH$}Quantity",
            "Code", "Name", "Price"
        )?;
        writeln!(self.out, "{}", "-".repeat(RULE_WIDTH))?;
        for p in &products {
            let name = self.clip(&p.name);
            writeln!(
                self.out,
                "{:<CODE_WIDTH$}{:<name_col$}{:<NUMBER_WIDTH$}{}",
                p.code,
                name,
                Money::from_cents(p.price_cents),
                p.quantity
            )?;
        }
        Ok(())
    }

    fn check_stock(&mut self) -> io::Result<()> {
        let threshold = self.state.config().low_stock_threshold;
        writeln!(self.out, "\n=== Low Stock Alert ===")?;
        writeln!(self.out, "Products with quantity less than {}:", threshold)?;

        let low = product::low_stock(&self.state, None);
        if low.is_empty() {
            return writeln!(self.out, "All products are sufficiently stocked.");
        }

        let name_col = self.name_col();
        writeln!(self.out, "{:<CODE_WIDTH$}{:<name_col$}Quantity", "Code", "Name")?;
        writeln!(self.out, "{}", "-".repeat(RULE_WIDTH))?;
        for p in &low {
            let name = self.clip(&p.name);
            writeln!(self.out, "{:<CODE_WIDTH$}{:<name_col$}{}", p.code, name, p.quantity)?;
        }
        Ok(())
    }

    async fn restock(&mut self) -> io::Result<Flow> {
        writeln!(self.out, "\n=== Restock Product ===")?;

        let Some(code) = self.prompt("Enter product code: ").await? else {
            return Ok(Flow::Exit);
        };
        let Some(quantity) = self.prompt("Enter quantity to add: ").await? else {
            return Ok(Flow::Exit);
        };

        match product::restock(&mut self.state, &code, &quantity) {
            Ok(p) => writeln!(self.out, "\n'{}' now has {} in stock.", p.name, p.quantity)?,
            Err(e) => self.report_error(&e)?,
        }
        Ok(Flow::Continue)
    }

    // =========================================================================
    // Sale
    // =========================================================================

    async fn make_sale(&mut self) -> io::Result<Flow> {
        sale::clear_cart(&mut self.state);
        writeln!(self.out, "\n=== New Sale ===")?;
        self.view_products()?;

        loop {
            let Some(code) = self
                .prompt("\nEnter product code (or 'done' to finish): ")
                .await?
            else {
                sale::clear_cart(&mut self.state);
                return Ok(Flow::Exit);
            };
            if code.eq_ignore_ascii_case("done") {
                break;
            }

            let Some(quantity) = self.prompt("Enter quantity: ").await? else {
                sale::clear_cart(&mut self.state);
                return Ok(Flow::Exit);
            };

            match sale::add_to_cart(&mut self.state, &code, &quantity) {
                Ok(cart) => writeln!(
                    self.out,
                    "Added to cart. Running total: {}",
                    Money::from_cents(cart.total_cents)
                )?,
                Err(e) => self.report_error(&e)?,
            }
        }

        if self.state.cart().is_empty() {
            writeln!(self.out, "\nNo items in cart. Sale cancelled.")?;
            return Ok(Flow::Continue);
        }

        let now = (self.clock)();
        match sale::checkout_at(&mut self.state, now) {
            Ok(receipt) => writeln!(self.out, "\n{}", receipt)?,
            Err(e) => {
                sale::clear_cart(&mut self.state);
                self.report_error(&e)?;
            }
        }
        Ok(Flow::Continue)
    }

    // =========================================================================
    // Reports
    // =========================================================================

    fn sales_report(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n=== Sales Report ===")?;
        let summary = match report::sales_summary(&self.state) {
            Ok(summary) => summary,
            Err(e) => return self.report_error(&e),
        };
        if summary.is_empty() {
            return writeln!(self.out, "No sales recorded yet!");
        }
        writeln!(self.out, "Total Sales: {}", summary.total_revenue)?;
        writeln!(self.out, "Number of Transactions: {}", summary.transaction_count)
    }

    async fn monthly_report(&mut self) -> io::Result<Flow> {
        writeln!(self.out, "\n=== Monthly Report ===")?;
        let periods = report::available_periods(&self.state);
        if periods.is_empty() {
            writeln!(self.out, "No monthly data available yet!")?;
            return Ok(Flow::Continue);
        }
        let listed: Vec<String> = periods.iter().map(|p| p.to_string()).collect();
        writeln!(self.out, "Months with sales: {}", listed.join(", "))?;

        let Some(year) = self.prompt("Enter year (YYYY): ").await? else {
            return Ok(Flow::Exit);
        };
        let Some(month) = self.prompt("Enter month (1-12): ").await? else {
            return Ok(Flow::Exit);
        };

        match report::monthly_report(&self.state, &year, &month) {
            Ok(r) => self.print_monthly(&r)?,
            Err(e) => self.report_error(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn print_monthly(&mut self, r: &MonthlyReport) -> io::Result<()> {
        writeln!(self.out, "\nPeriod: {}", r.period)?;
        writeln!(self.out, "Start Date: {}", r.start_date)?;
        writeln!(self.out, "Total Sales: {}", r.total_revenue)?;
        writeln!(self.out, "Number of Transactions: {}", r.sale_count)?;
        writeln!(self.out, "\nTop Products:")?;

        let name_col = self.name_col();
        writeln!(
            self.out,
            "{:<CODE_WIDTH$}{:<name_col$}{:<NUMBER_WIDTH$}Revenue",
            "Code", "Name", "Qty"
        )?;
        writeln!(self.out, "{}", "-".repeat(RULE_WIDTH))?;
        for top in &r.top_products {
            let name = self.clip(&top.name);
            writeln!(
                self.out,
                "{:<CODE_WIDTH$}{:<name_col$}{:<NUMBER_WIDTH$}{}",
                top.code, name, top.quantity_sold, top.revenue
            )?;
        }
        Ok(())
    }

    fn sales_history(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n=== Sales History ===")?;
        let history = report::sales_history(&self.state);
        if history.is_empty() {
            return writeln!(self.out, "No sales recorded yet!");
        }

        writeln!(
            self.out,
            "{:<15}{:<21}{:<7}Total",
            "Receipt", "Date", "Items"
        )?;
        writeln!(self.out, "{}", "-".repeat(50))?;
        for entry in &history {
            writeln!(
                self.out,
                "{:<15}{:<21}{:<7}{}",
                entry.receipt_number,
                entry.completed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                entry.item_count,
                entry.total
            )?;
        }
        Ok(())
    }

    // =========================================================================
    // Backups
    // =========================================================================

    fn backup_now(&mut self) -> io::Result<()> {
        match backup::backup_at(&self.state, (self.clock)()) {
            Ok(b) => {
                writeln!(self.out, "\nBackup created: {}", b.dir.display())?;
                if !b.skipped.is_empty() {
                    let skipped: Vec<String> =
                        b.skipped.iter().map(|p| p.display().to_string()).collect();
                    writeln!(self.out, "Skipped: {}", skipped.join(", "))?;
                }
                Ok(())
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn scheduled_backup(&mut self) {
        if let Err(e) = backup::backup_at(&self.state, (self.clock)()) {
            error!(error = %e, "Scheduled backup failed");
        }
    }
}
