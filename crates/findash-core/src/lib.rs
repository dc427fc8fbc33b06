#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/findash/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and pure logic for the financial dashboard.
//!
//! This crate has no I/O. It provides:
//!
//! - [`PeriodicReport`](types::PeriodicReport) and friends - the statement data model
//! - [`resolve`](metric::resolve) - metric lookup across statement sections
//! - [`ReportWindow`](window::ReportWindow) - ordered, range-selected report views
//! - [`format_value`](format::format_value) - magnitude-scaled number formatting
//! - [`PriceHistoryProvider`](provider::PriceHistoryProvider) and
//!   [`StatementsProvider`](provider::StatementsProvider) - data source traits

/// Catalog of displayable metrics.
pub mod catalog;
/// Error types for dashboard operations.
pub mod error;
/// Number formatting helpers.
pub mod format;
/// Yearly/quarterly granularity.
pub mod granularity;
/// Metric resolution across statement sections.
pub mod metric;
/// Provider traits for fetching dashboard data.
pub mod provider;
/// Core data types (Symbol, PricePoint, PeriodicReport, etc.).
pub mod types;
/// Ordered, range-selected report windows.
pub mod window;

// Re-export commonly used items at crate root
pub use catalog::{DEFAULT_METRIC, MetricDefinition, definition};
pub use error::{DashboardError, Result};
pub use format::{NO_VALUE, format_value};
pub use granularity::Granularity;
pub use metric::{DerivedMetric, resolve};
pub use provider::{
    DataProvider, HistoryRange, MAX_HISTORY_YEARS, PriceHistoryProvider, StatementsProvider,
};
pub use types::{
    FieldValue, FinancialStatements, PeriodicReport, PricePoint, SectionKind, StatementSection,
    Symbol,
};
pub use window::{ReportWindow, SelectionWindow};
