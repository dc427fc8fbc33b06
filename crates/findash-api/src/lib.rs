#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/findash/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! HTTP provider for the stock quote API.
//!
//! This crate implements the findash-core provider traits against a quote
//! API exposing two endpoints:
//!
//! - `yahoo-finance-historical?ticker=..&from=..&to=..` returning
//!   `{ "meta": {..}, "quotes": [{ "date": .., "close": .. }, ..] }`
//! - `statements?ticker=..` returning
//!   `{ "annualReports": [..], "quarterlyReports": [..] }`
//!
//! # Usage
//!
//! ```rust,ignore
//! use findash_api::ApiProvider;
//! use findash_core::{HistoryRange, PriceHistoryProvider, StatementsProvider, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = ApiProvider::default();
//!     let symbol = Symbol::new("AAPL");
//!     let range = HistoryRange::last_years(chrono::Local::now().date_naive(), 20);
//!
//!     let prices = provider.fetch_price_history(&symbol, range.from, range.to).await?;
//!     let statements = provider.fetch_statements(&symbol).await?;
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use findash_core::{
    DashboardError, DataProvider, FinancialStatements, PeriodicReport, PriceHistoryProvider,
    PricePoint, Result, StatementsProvider, Symbol, types::parse_calendar_date,
};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::form_urlencoded;

/// Default base URL of the quote API.
pub const DEFAULT_BASE_URL: &str = "https://stockquote.lionelschiepers.synology.me/api";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const PROVIDER_NAME: &str = "Quote API";

/// Quote API data provider.
///
/// Provides access to:
/// - Historical daily closing prices
/// - Annual and quarterly income statements, balance sheets and cash flows
#[derive(Clone, Debug)]
pub struct ApiProvider {
    client: Client,
    base_url: String,
}

impl Default for ApiProvider {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiProvider {
    /// Create a new provider for the API rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a new provider whose requests give up after `timeout`.
    #[must_use]
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self::with_client(client, base_url)
    }

    /// Create a new provider with a custom HTTP client.
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// The base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }

    fn history_endpoint(symbol: &Symbol, from: NaiveDate, to: NaiveDate) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("ticker", symbol.as_str())
            .append_pair("from", &from.to_string())
            .append_pair("to", &to.to_string())
            .finish();
        format!("yahoo-finance-historical?{query}")
    }

    fn statements_endpoint(symbol: &Symbol) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("ticker", symbol.as_str())
            .finish();
        format!("statements?{query}")
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint);
        tracing::debug!("Quote API request: {}", endpoint);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DashboardError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(DashboardError::Network(format!("HTTP {status}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| DashboardError::Network(e.to_string()))?;

        serde_json::from_str(&text).map_err(|e| DashboardError::Parse(e.to_string()))
    }
}

impl DataProvider for ApiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn description(&self) -> &str {
        "Stock quote API - historical prices and financial statements"
    }
}

#[async_trait]
impl PriceHistoryProvider for ApiProvider {
    async fn fetch_price_history(
        &self,
        symbol: &Symbol,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>> {
        let response: HistoricalResponse = self
            .get(&Self::history_endpoint(symbol, from, to))
            .await?;
        response.into_points()
    }
}

#[async_trait]
impl StatementsProvider for ApiProvider {
    async fn fetch_statements(&self, symbol: &Symbol) -> Result<FinancialStatements> {
        let response: StatementsResponse = self.get(&Self::statements_endpoint(symbol)).await?;
        response.into_statements()
    }
}

// ============================================================================
// Quote API Response Types
// ============================================================================

/// Historical prices response.
#[derive(Debug, Deserialize)]
struct HistoricalResponse {
    quotes: Option<Vec<Quote>>,
}

impl HistoricalResponse {
    fn into_points(self) -> Result<Vec<PricePoint>> {
        let quotes = self.quotes.ok_or_else(|| DashboardError::UnexpectedResponse {
            provider: PROVIDER_NAME.to_string(),
            detail: "missing quotes array".to_string(),
        })?;

        let total = quotes.len();
        let points: Vec<PricePoint> = quotes
            .into_iter()
            .filter_map(|q| Some(PricePoint::new(parse_calendar_date(&q.date)?, q.close?)))
            .collect();

        if points.len() < total {
            tracing::debug!(
                dropped = total - points.len(),
                "Skipped quotes without date or close"
            );
        }

        Ok(points)
    }
}

/// One historical quote. Only the fields the dashboard uses.
#[derive(Debug, Deserialize)]
struct Quote {
    date: String,
    #[serde(default)]
    close: Option<f64>,
}

/// Financial statements response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatementsResponse {
    annual_reports: Option<Vec<PeriodicReport>>,
    quarterly_reports: Option<Vec<PeriodicReport>>,
}

impl StatementsResponse {
    fn into_statements(self) -> Result<FinancialStatements> {
        if self.annual_reports.is_none() && self.quarterly_reports.is_none() {
            return Err(DashboardError::UnexpectedResponse {
                provider: PROVIDER_NAME.to_string(),
                detail: "missing annualReports and quarterlyReports".to_string(),
            });
        }
        Ok(FinancialStatements::new(
            self.annual_reports.unwrap_or_default(),
            self.quarterly_reports.unwrap_or_default(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let provider = ApiProvider::new("https://example.test/api/");
        let symbol = Symbol::new("aapl");
        let from = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        assert_eq!(provider.base_url(), "https://example.test/api");
        assert_eq!(
            provider.url(&ApiProvider::history_endpoint(&symbol, from, to)),
            "https://example.test/api/yahoo-finance-historical?ticker=AAPL&from=2020-01-02&to=2024-01-01"
        );
        assert_eq!(
            provider.url(&ApiProvider::statements_endpoint(&symbol)),
            "https://example.test/api/statements?ticker=AAPL"
        );
    }

    #[test]
    fn test_ticker_is_percent_encoded() {
        let provider = ApiProvider::new("https://example.test/api");
        let symbol = Symbol::new("BRK&B");

        assert_eq!(
            provider.url(&ApiProvider::statements_endpoint(&symbol)),
            "https://example.test/api/statements?ticker=BRK%26B"
        );
        let from = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(
            ApiProvider::history_endpoint(&symbol, from, to)
                .starts_with("yahoo-finance-historical?ticker=BRK%26B&from=")
        );
    }

    #[test]
    fn test_provider_metadata() {
        let provider = ApiProvider::default();
        assert_eq!(provider.name(), "Quote API");
        assert!(!provider.description().is_empty());
        assert_eq!(provider.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_parse_historical_response() {
        let json = r#"{
            "meta": { "currency": "USD" },
            "quotes": [
                { "date": "2024-01-02T14:30:00.000Z", "close": 185.64, "volume": 1 },
                { "date": "2024-01-03T14:30:00.000Z", "close": null },
                { "date": "2024-01-04T14:30:00.000Z", "close": 181.91 }
            ]
        }"#;
        let response: HistoricalResponse = serde_json::from_str(json).unwrap();
        let points = response.into_points().unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(points[1].close, 181.91);
    }

    #[test]
    fn test_historical_response_without_quotes_is_unexpected() {
        let response: HistoricalResponse = serde_json::from_str(r#"{ "error": "x" }"#).unwrap();
        assert!(matches!(
            response.into_points(),
            Err(DashboardError::UnexpectedResponse { .. })
        ));
    }

    #[test]
    fn test_parse_statements_response() {
        let json = r#"{
            "annualReports": [
                { "fiscalDateEnding": "2023-09-30",
                  "incomeStatement": { "totalRevenue": "383285000000" } }
            ]
        }"#;
        let response: StatementsResponse = serde_json::from_str(json).unwrap();
        let statements = response.into_statements().unwrap();
        assert_eq!(statements.annual_reports.len(), 1);
        assert!(statements.quarterly_reports.is_empty());
    }

    #[test]
    fn test_statements_response_without_reports_is_unexpected() {
        let response: StatementsResponse =
            serde_json::from_str(r#"{ "message": "rate limited" }"#).unwrap();
        assert!(matches!(
            response.into_statements(),
            Err(DashboardError::UnexpectedResponse { .. })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let provider = ApiProvider::new("http://127.0.0.1:9");
        let symbol = Symbol::new("AAPL");
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        let prices = provider.fetch_price_history(&symbol, day, day).await;
        assert!(matches!(prices, Err(DashboardError::Network(_))));

        let statements = provider.fetch_statements(&symbol).await;
        assert!(matches!(statements, Err(DashboardError::Network(_))));
    }
}
