//! Dashboard data loader with placeholder fallback.

use chrono::NaiveDate;
use findash_core::{
    FinancialStatements, HistoryRange, PriceHistoryProvider, PricePoint, StatementsProvider,
    Symbol,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Years of price history requested on load.
pub const DEFAULT_HISTORY_YEARS: u32 = 20;

/// Everything the dashboard needs to render.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadedData {
    /// Daily closing prices, oldest first.
    pub price_history: Vec<PricePoint>,
    /// Annual and quarterly reports.
    pub statements: FinancialStatements,
}

/// Loads price history and statements, substituting placeholder data on failure.
///
/// Providers are tried in registration order. When none succeeds the fallback
/// provider is used, once; its output is returned as if it came from the
/// API. Loading never fails: if even the fallback errors, the result is empty
/// and the renderers show their "no data" state.
pub struct DashboardLoader {
    price_providers: Vec<Arc<dyn PriceHistoryProvider>>,
    statements_providers: Vec<Arc<dyn StatementsProvider>>,
    price_fallback: Option<Arc<dyn PriceHistoryProvider>>,
    statements_fallback: Option<Arc<dyn StatementsProvider>>,
    history_years: u32,
}

impl Default for DashboardLoader {
    fn default() -> Self {
        Self {
            price_providers: Vec::new(),
            statements_providers: Vec::new(),
            price_fallback: None,
            statements_fallback: None,
            history_years: DEFAULT_HISTORY_YEARS,
        }
    }
}

impl fmt::Debug for DashboardLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardLoader")
            .field(
                "price_providers",
                &self
                    .price_providers
                    .iter()
                    .map(|p| p.name())
                    .collect::<Vec<_>>(),
            )
            .field(
                "statements_providers",
                &self
                    .statements_providers
                    .iter()
                    .map(|p| p.name())
                    .collect::<Vec<_>>(),
            )
            .field("price_fallback", &self.price_fallback.as_ref().map(|p| p.name()))
            .field(
                "statements_fallback",
                &self.statements_fallback.as_ref().map(|p| p.name()),
            )
            .field("history_years", &self.history_years)
            .finish()
    }
}

impl DashboardLoader {
    /// Create a loader with no providers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many years of price history to request.
    #[must_use]
    pub const fn with_history_years(mut self, years: u32) -> Self {
        self.history_years = years;
        self
    }

    /// Years of price history requested on load.
    #[must_use]
    pub const fn history_years(&self) -> u32 {
        self.history_years
    }

    /// Register a price history provider.
    pub fn register_price(&mut self, provider: Arc<dyn PriceHistoryProvider>) {
        debug!(provider = provider.name(), "Registering price provider");
        self.price_providers.push(provider);
    }

    /// Register a statements provider.
    pub fn register_statements(&mut self, provider: Arc<dyn StatementsProvider>) {
        debug!(
            provider = provider.name(),
            "Registering statements provider"
        );
        self.statements_providers.push(provider);
    }

    /// Set the provider used when every registered price provider fails.
    pub fn set_price_fallback(&mut self, provider: Arc<dyn PriceHistoryProvider>) {
        self.price_fallback = Some(provider);
    }

    /// Set the provider used when every registered statements provider fails.
    pub fn set_statements_fallback(&mut self, provider: Arc<dyn StatementsProvider>) {
        self.statements_fallback = Some(provider);
    }

    /// Fetch price history, falling back to placeholder data.
    pub async fn fetch_price_history(
        &self,
        symbol: &Symbol,
        range: HistoryRange,
    ) -> Vec<PricePoint> {
        for provider in &self.price_providers {
            debug!(
                provider = provider.name(),
                symbol = %symbol,
                from = %range.from,
                to = %range.to,
                "Fetching price history"
            );

            match provider.fetch_price_history(symbol, range.from, range.to).await {
                Ok(points) => return points,
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "Price provider failed"
                    );
                }
            }
        }

        let Some(fallback) = &self.price_fallback else {
            error!(symbol = %symbol, "No price data and no fallback configured");
            return Vec::new();
        };

        info!(
            provider = fallback.name(),
            symbol = %symbol,
            "Using placeholder data for historical prices"
        );
        match fallback.fetch_price_history(symbol, range.from, range.to).await {
            Ok(points) => points,
            Err(e) => {
                error!(provider = fallback.name(), error = %e, "Fallback provider failed");
                Vec::new()
            }
        }
    }

    /// Fetch financial statements, falling back to placeholder data.
    pub async fn fetch_statements(&self, symbol: &Symbol) -> FinancialStatements {
        for provider in &self.statements_providers {
            debug!(
                provider = provider.name(),
                symbol = %symbol,
                "Fetching financial statements"
            );

            match provider.fetch_statements(symbol).await {
                Ok(statements) => return statements,
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "Statements provider failed"
                    );
                }
            }
        }

        let Some(fallback) = &self.statements_fallback else {
            error!(symbol = %symbol, "No statements and no fallback configured");
            return FinancialStatements::default();
        };

        info!(
            provider = fallback.name(),
            symbol = %symbol,
            "Using placeholder data for financial statements"
        );
        match fallback.fetch_statements(symbol).await {
            Ok(statements) => statements,
            Err(e) => {
                error!(provider = fallback.name(), error = %e, "Fallback provider failed");
                FinancialStatements::default()
            }
        }
    }

    /// Fetch both data sets concurrently.
    ///
    /// Each fetch recovers from its own failures, so one failing never blocks
    /// the other. Returns once both have completed.
    pub async fn load(&self, symbol: &Symbol, today: NaiveDate) -> LoadedData {
        let range = HistoryRange::last_years(today, self.history_years);
        let (price_history, statements) = tokio::join!(
            self.fetch_price_history(symbol, range),
            self.fetch_statements(symbol),
        );
        debug!(
            symbol = %symbol,
            prices = price_history.len(),
            annual = statements.annual_reports.len(),
            quarterly = statements.quarterly_reports.len(),
            "Dashboard data loaded"
        );
        LoadedData {
            price_history,
            statements,
        }
    }

    // Shortcuts for the bundled providers

    /// Add the quote API provider rooted at `base_url`.
    #[cfg(feature = "api")]
    #[must_use]
    pub fn with_api(self, base_url: &str) -> Self {
        self.with_api_provider(findash_api::ApiProvider::new(base_url))
    }

    /// Add a configured quote API provider.
    #[cfg(feature = "api")]
    #[must_use]
    pub fn with_api_provider(mut self, provider: findash_api::ApiProvider) -> Self {
        let provider = Arc::new(provider);
        self.register_price(provider.clone());
        self.register_statements(provider);
        self
    }

    /// Use placeholder data as the fallback for both fetches.
    #[cfg(feature = "mock")]
    #[must_use]
    pub fn with_mock_fallback(mut self, seed: Option<u64>) -> Self {
        let provider = Arc::new(match seed {
            Some(seed) => findash_mock::MockProvider::with_seed(seed),
            None => findash_mock::MockProvider::new(),
        });
        self.set_price_fallback(provider.clone());
        self.set_statements_fallback(provider);
        self
    }
}
