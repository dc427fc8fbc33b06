//! Provider traits for fetching dashboard data.
//!
//! This module defines the core provider traits:
//!
//! - [`DataProvider`] - Base trait for all data providers
//! - [`PriceHistoryProvider`] - Daily closing prices
//! - [`StatementsProvider`] - Annual and quarterly financial statements

use async_trait::async_trait;
use chrono::{Days, Months, NaiveDate};
use std::fmt::Debug;

use crate::{
    error::Result,
    types::{FinancialStatements, PricePoint, Symbol},
};

/// Base trait for all data providers.
pub trait DataProvider: Send + Sync + Debug {
    /// Returns the name of this provider (e.g., "Quote API").
    fn name(&self) -> &str;

    /// Returns a description of this provider.
    fn description(&self) -> &str;
}

/// Provider for historical closing prices.
#[async_trait]
pub trait PriceHistoryProvider: DataProvider {
    /// Fetches closing prices for `symbol` between `from` and `to` inclusive.
    async fn fetch_price_history(
        &self,
        symbol: &Symbol,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>>;
}

/// Provider for financial statements.
#[async_trait]
pub trait StatementsProvider: DataProvider {
    /// Fetches annual and quarterly reports for `symbol`.
    async fn fetch_statements(&self, symbol: &Symbol) -> Result<FinancialStatements>;
}

/// Longest price history [`HistoryRange::last_years`] will span.
pub const MAX_HISTORY_YEARS: u32 = 100;

/// An inclusive date range for price history requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryRange {
    /// First day requested.
    pub from: NaiveDate,
    /// Last day requested.
    pub to: NaiveDate,
}

impl HistoryRange {
    /// The `years` years ending on `today`.
    ///
    /// The start is exclusive of the same calendar day `years` ago, so the
    /// range starts one day after it. `years` is clamped to
    /// `1..=MAX_HISTORY_YEARS`.
    #[must_use]
    pub fn last_years(today: NaiveDate, years: u32) -> Self {
        let years = years.clamp(1, MAX_HISTORY_YEARS);
        let from = today
            .checked_sub_months(Months::new(years * 12))
            .and_then(|d| d.checked_add_days(Days::new(1)))
            .unwrap_or(NaiveDate::MIN);
        Self { from, to: today }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_range_last_years() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let range = HistoryRange::last_years(today, 5);
        assert_eq!(range.from, NaiveDate::from_ymd_opt(2019, 6, 16).unwrap());
        assert_eq!(range.to, today);
    }

    #[test]
    fn test_history_range_zero_years_spans_one_year() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 14).unwrap();
        let range = HistoryRange::last_years(today, 0);
        assert!(range.from <= range.to);
        assert_eq!(range, HistoryRange::last_years(today, 1));
        assert_eq!(range.from, NaiveDate::from_ymd_opt(2024, 5, 15).unwrap());
    }

    #[test]
    fn test_history_range_is_capped() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 14).unwrap();
        let range = HistoryRange::last_years(today, u32::MAX);
        assert_eq!(range, HistoryRange::last_years(today, MAX_HISTORY_YEARS));
        assert_eq!(range.from, NaiveDate::from_ymd_opt(1925, 5, 15).unwrap());
    }

    #[test]
    fn test_history_range_leap_day() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let range = HistoryRange::last_years(today, 1);
        assert_eq!(range.from, NaiveDate::from_ymd_opt(2023, 3, 1).unwrap());
    }
}
