//! Dashboard state container.
//!
//! [`DashboardState`] is owned by the session and mutated only through its
//! transition methods. Each transition reports whether anything changed so
//! the caller knows when to re-render.

use findash_core::{
    DEFAULT_METRIC, FinancialStatements, Granularity, PeriodicReport, PricePoint, ReportWindow,
    SelectionWindow, Symbol,
};

use crate::loader::LoadedData;

/// Ordered set of selected metric keys.
///
/// Keys are kept unique in selection order, which is also the series order of
/// the financial chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricSelection {
    keys: Vec<String>,
}

impl Default for MetricSelection {
    fn default() -> Self {
        Self {
            keys: vec![DEFAULT_METRIC.to_string()],
        }
    }
}

impl MetricSelection {
    /// An empty selection.
    #[must_use]
    pub const fn empty() -> Self {
        Self { keys: Vec::new() }
    }

    /// Returns true if `key` is selected.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Selects or deselects `key`. Returns true if the selection changed.
    pub fn set(&mut self, key: &str, selected: bool) -> bool {
        match (selected, self.keys.iter().position(|k| k == key)) {
            (true, None) => {
                self.keys.push(key.to_string());
                true
            }
            (false, Some(idx)) => {
                self.keys.remove(idx);
                true
            }
            _ => false,
        }
    }

    /// Flips membership of `key`. Returns whether it is now selected.
    pub fn toggle(&mut self, key: &str) -> bool {
        let selected = !self.contains(key);
        self.set(key, selected);
        selected
    }

    /// Selected keys in selection order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Number of selected keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for MetricSelection {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut selection = Self::empty();
        for key in iter {
            let key = key.into();
            selection.set(&key, true);
        }
        selection
    }
}

/// State of one dashboard session.
#[derive(Clone, Debug)]
pub struct DashboardState {
    ticker: Symbol,
    granularity: Granularity,
    price_history: Option<Vec<PricePoint>>,
    statements: Option<FinancialStatements>,
    selected_metrics: MetricSelection,
    selection: Option<SelectionWindow>,
}

impl DashboardState {
    /// A fresh, not yet loaded, session for `ticker`.
    #[must_use]
    pub fn new(ticker: Symbol) -> Self {
        Self {
            ticker,
            granularity: Granularity::default(),
            price_history: None,
            statements: None,
            selected_metrics: MetricSelection::default(),
            selection: None,
        }
    }

    /// Replace the initial metric selection.
    #[must_use]
    pub fn with_metrics(mut self, metrics: MetricSelection) -> Self {
        self.selected_metrics = metrics;
        self
    }

    /// Ticker of this session.
    #[must_use]
    pub const fn ticker(&self) -> &Symbol {
        &self.ticker
    }

    /// Current reporting cadence.
    #[must_use]
    pub const fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Returns true once data has been loaded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.price_history.is_some() && self.statements.is_some()
    }

    /// Loaded price history; empty before loading.
    #[must_use]
    pub fn price_history(&self) -> &[PricePoint] {
        self.price_history.as_deref().unwrap_or_default()
    }

    /// Loaded statements, if any.
    #[must_use]
    pub const fn statements(&self) -> Option<&FinancialStatements> {
        self.statements.as_ref()
    }

    /// Reports for the current granularity; empty before loading.
    #[must_use]
    pub fn reports(&self) -> &[PeriodicReport] {
        self.statements
            .as_ref()
            .map(|s| s.reports(self.granularity))
            .unwrap_or_default()
    }

    /// Selected metric keys.
    #[must_use]
    pub const fn selected_metrics(&self) -> &MetricSelection {
        &self.selected_metrics
    }

    /// The active selection window, `None` without reports.
    #[must_use]
    pub fn selection(&self) -> Option<SelectionWindow> {
        self.window().selection()
    }

    /// The report window for the current granularity and selection.
    #[must_use]
    pub fn window(&self) -> ReportWindow<'_> {
        ReportWindow::with_selection(self.reports(), self.granularity, self.selection)
    }

    /// Store loaded data and reset the window to its default.
    pub fn apply_loaded(&mut self, data: LoadedData) {
        self.price_history = Some(data.price_history);
        self.statements = Some(data.statements);
        self.reset_window();
    }

    /// Switch cadence. Resets the window to the default for the new
    /// granularity. Returns false if `granularity` was already active.
    pub fn set_granularity(&mut self, granularity: Granularity) -> bool {
        if self.granularity == granularity {
            return false;
        }
        self.granularity = granularity;
        self.reset_window();
        true
    }

    /// Switch to the other cadence.
    pub fn toggle_granularity(&mut self) {
        self.set_granularity(self.granularity.toggled());
    }

    /// Selects or deselects a metric. Returns true if the selection changed.
    pub fn set_metric(&mut self, key: &str, selected: bool) -> bool {
        self.selected_metrics.set(key, selected)
    }

    /// Flips a metric. Returns whether it is now selected.
    pub fn toggle_metric(&mut self, key: &str) -> bool {
        self.selected_metrics.toggle(key)
    }

    /// Applies a raw slider range. Indices are clamped and reordered.
    ///
    /// Returns the normalized window, `None` when there are no reports.
    pub fn set_selection(&mut self, min: i64, max: i64) -> Option<SelectionWindow> {
        self.selection = SelectionWindow::normalize(min, max, self.reports().len());
        self.selection
    }

    /// Reset the window to the last N periods of the current granularity.
    pub fn reset_window(&mut self) {
        self.selection = SelectionWindow::default_for(self.granularity, self.reports().len());
    }
}
