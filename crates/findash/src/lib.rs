#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/findash/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Financial dashboard for a single ticker.
//!
//! This crate ties the pieces together. It re-exports the core types and
//! provider implementations, provides a [`DashboardLoader`] that fetches
//! prices and statements with placeholder fallback, and a [`Dashboard`]
//! session that keeps state and drives any [`RenderPort`] front end.
//!
//! # Features
//!
//! - `api` - HTTP provider for the quote API
//! - `mock` - Placeholder data provider used as fallback
//!
//! # Example
//!
//! ```rust,ignore
//! use findash::{Dashboard, DashboardLoader};
//!
//! #[tokio::main]
//! async fn main() -> findash::Result<()> {
//!     let loader = DashboardLoader::new()
//!         .with_api(findash::DEFAULT_BASE_URL)
//!         .with_mock_fallback(None);
//!
//!     let mut dashboard = Dashboard::new(MyRenderer::default());
//!     dashboard
//!         .open("?ticker=AAPL", &loader, chrono::Local::now().date_naive())
//!         .await?;
//!
//!     dashboard.set_granularity(findash::Granularity::Quarterly);
//!     dashboard.toggle_metric("netIncome");
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use findash_core::*;

// Providers
#[cfg(feature = "api")]
pub use findash_api::{ApiProvider, DEFAULT_BASE_URL};
#[cfg(feature = "mock")]
pub use findash_mock::MockProvider;

pub mod chart;
mod dashboard;
mod loader;
pub mod query;
mod render;
pub mod state;
pub mod table;

pub use chart::{FinancialChart, PriceChart, RangeSlider};
pub use dashboard::Dashboard;
pub use loader::{DEFAULT_HISTORY_YEARS, DashboardLoader, LoadedData};
pub use query::parse_ticker;
pub use render::RenderPort;
pub use state::{DashboardState, MetricSelection};
pub use table::FinancialTable;
