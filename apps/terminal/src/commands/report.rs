//! # Report Commands
//!
//! Read-only views over the ledger and the monthly aggregates.

use tracing::debug;

use crate::error::CommandError;
use crate::state::AppState;
use apotheca_core::report;
use apotheca_core::validation::parse_integer;
use apotheca_core::{MonthlyReport, PeriodKey, SaleHistoryEntry, SalesSummary, ValidationError};

/// Total revenue and transaction count over every sale.
pub fn sales_summary(state: &AppState) -> Result<SalesSummary, CommandError> {
    Ok(report::sales_summary(state.inventory())?)
}

/// Every sale with its date, line count and total, oldest first.
pub fn sales_history(state: &AppState) -> Vec<SaleHistoryEntry> {
    report::sales_history(state.inventory())
}

/// Months that have at least one sale, newest first.
pub fn available_periods(state: &AppState) -> Vec<PeriodKey> {
    report::available_periods(state.inventory())
}

/// Report for a year and month typed by the user.
///
/// ## Errors
/// - `InvalidNumericInput` when either field is not a number
/// - `ValidationError` when the month is outside 1-12
/// - `NoDataForPeriod` when the month has no sales
pub fn monthly_report(state: &AppState, year: &str, month: &str) -> Result<MonthlyReport, CommandError> {
    let year = parse_integer("year", year)?;
    let month = parse_integer("month", month)?;

    let year = i32::try_from(year).map_err(|_| ValidationError::OutOfRange {
        field: "year".to_string(),
        min: 1,
        max: 9999,
    })?;
    let month = u32::try_from(month).map_err(|_| ValidationError::OutOfRange {
        field: "month".to_string(),
        min: 1,
        max: 12,
    })?;

    monthly_report_for(state, PeriodKey::new(year, month)?)
}

/// Report for an already-built period.
pub fn monthly_report_for(state: &AppState, period: PeriodKey) -> Result<MonthlyReport, CommandError> {
    debug!(%period, "monthly_report command");
    Ok(report::monthly_report(state.inventory(), period)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::sale::{add_to_cart, checkout_at};
    use crate::commands::test_support::{seeded, state};
    use crate::error::ErrorCode;
    use apotheca_core::Money;
    use chrono::{Local, TimeZone};
    use tempfile::TempDir;

    fn sell(state: &mut AppState, lines: &[(&str, &str)], month: u32, day: u32) {
        for (code, qty) in lines {
            add_to_cart(state, code, qty).unwrap();
        }
        let at = Local.with_ymd_and_hms(2026, month, day, 12, 0, 0).unwrap();
        checkout_at(state, at).unwrap();
    }

    #[test]
    fn test_empty_summary() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);

        assert!(sales_summary(&state).unwrap().is_empty());
        assert!(sales_history(&state).is_empty());
        assert!(available_periods(&state).is_empty());
    }

    #[test]
    fn test_summary_and_history() {
        let dir = TempDir::new().unwrap();
        let mut state = seeded(&dir);
        sell(&mut state, &[("A100", "3")], 9, 30);
        sell(&mut state, &[("A100", "1"), ("B200", "2")], 10, 1);

        let summary = sales_summary(&state).unwrap();
        assert_eq!(summary.transaction_count, 2);
        assert_eq!(summary.total_revenue, Money::from_cents(2500));

        let history = sales_history(&state);
        assert_eq!(history[1].item_count, 2);
        assert_eq!(history[1].total, Money::from_cents(1000));

        let periods: Vec<String> = available_periods(&state).iter().map(|p| p.to_string()).collect();
        assert_eq!(periods, vec!["2026-10", "2026-09"]);
    }

    #[test]
    fn test_monthly_report_ranks_by_revenue() {
        let dir = TempDir::new().unwrap();
        let mut state = seeded(&dir);
        sell(&mut state, &[("B200", "5"), ("A100", "1")], 10, 3);
        sell(&mut state, &[("A100", "1")], 10, 4);

        let report = monthly_report(&state, "2026", "10").unwrap();
        assert_eq!(report.sale_count, 2);
        assert_eq!(report.total_revenue, Money::from_cents(2250));
        assert_eq!(report.top_products[0].code, "B200");
        assert_eq!(report.top_products[0].name, "Bandage");
        assert_eq!(report.top_products[1].quantity_sold, 2);
    }

    #[test]
    fn test_monthly_report_errors() {
        let dir = TempDir::new().unwrap();
        let state = seeded(&dir);

        let err = monthly_report(&state, "2026", "2").unwrap_err();
        assert_eq!(err.code, ErrorCode::NoDataForPeriod);
        assert_eq!(err.message, "No data available for 2026-02");

        assert_eq!(
            monthly_report(&state, "2026", "13").unwrap_err().code,
            ErrorCode::ValidationError
        );
        assert_eq!(
            monthly_report(&state, "this year", "2").unwrap_err().code,
            ErrorCode::InvalidNumericInput
        );
    }
}
