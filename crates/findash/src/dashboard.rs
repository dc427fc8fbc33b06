//! Dashboard session.

use chrono::NaiveDate;
use findash_core::{Granularity, Result, SelectionWindow};
use std::fmt;
use tracing::{debug, info};

use crate::chart::{FinancialChart, PriceChart, RangeSlider};
use crate::loader::DashboardLoader;
use crate::query::parse_ticker;
use crate::render::RenderPort;
use crate::state::{DashboardState, MetricSelection};
use crate::table::FinancialTable;

/// One dashboard session: state, renderer and the live chart handles.
///
/// Chart handles are destroyed before their replacement is rendered and on
/// [`teardown`](Self::teardown), which also runs on drop.
pub struct Dashboard<R: RenderPort> {
    renderer: R,
    state: Option<DashboardState>,
    initial_metrics: MetricSelection,
    initial_granularity: Granularity,
    initial_range: Option<(i64, i64)>,
    price_chart: Option<R::Chart>,
    financial_chart: Option<R::Chart>,
}

impl<R: RenderPort> Dashboard<R> {
    /// Create an idle session drawing to `renderer`.
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            state: None,
            initial_metrics: MetricSelection::default(),
            initial_granularity: Granularity::default(),
            initial_range: None,
            price_chart: None,
            financial_chart: None,
        }
    }

    /// Metrics selected when the session opens.
    #[must_use]
    pub fn with_metrics(mut self, metrics: MetricSelection) -> Self {
        self.initial_metrics = metrics;
        self
    }

    /// Cadence shown when the session opens.
    #[must_use]
    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.initial_granularity = granularity;
        self
    }

    /// Raw slider range applied when the session opens, instead of the
    /// default trailing window.
    #[must_use]
    pub fn with_range(mut self, min: i64, max: i64) -> Self {
        self.initial_range = Some((min, max));
        self
    }

    /// The session state, once a ticker has been accepted.
    #[must_use]
    pub const fn state(&self) -> Option<&DashboardState> {
        self.state.as_ref()
    }

    /// The renderer.
    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer, mutably.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Open the dashboard for the ticker in `query`.
    ///
    /// Shows the loading state, loads both data sets, then renders
    /// everything and shows the content. There is no partial render.
    ///
    /// # Errors
    ///
    /// Fails with [`DashboardError::MissingTicker`] when `query` names no
    /// ticker; the message has already been shown through the renderer and
    /// the session stays idle.
    ///
    /// [`DashboardError::MissingTicker`]: findash_core::DashboardError::MissingTicker
    pub async fn open(
        &mut self,
        query: &str,
        loader: &DashboardLoader,
        today: NaiveDate,
    ) -> Result<()> {
        let ticker = match parse_ticker(query) {
            Ok(ticker) => ticker,
            Err(e) => {
                self.renderer.show_error(&e.to_string());
                return Err(e);
            }
        };

        info!(ticker = %ticker, "Opening dashboard");
        self.renderer.show_loading(&ticker);

        let data = loader.load(&ticker, today).await;
        let mut state = DashboardState::new(ticker).with_metrics(self.initial_metrics.clone());
        state.set_granularity(self.initial_granularity);
        state.apply_loaded(data);
        if let Some((min, max)) = self.initial_range {
            state.set_selection(min, max);
        }
        self.state = Some(state);

        self.render();
        if let Some(state) = &self.state {
            self.renderer.show_content(state.ticker());
        }
        Ok(())
    }

    /// Switch cadence. Resets the window and re-renders.
    pub fn set_granularity(&mut self, granularity: Granularity) {
        if self.state_mut().is_some_and(|s| s.set_granularity(granularity)) {
            debug!(granularity = %granularity, "Granularity changed");
            self.render();
        }
    }

    /// Flip a metric. Returns whether it is now selected.
    pub fn toggle_metric(&mut self, key: &str) -> bool {
        let selected = self.state_mut().is_some_and(|s| s.toggle_metric(key));
        self.render();
        selected
    }

    /// Select or deselect a metric.
    pub fn set_metric(&mut self, key: &str, selected: bool) {
        if self.state_mut().is_some_and(|s| s.set_metric(key, selected)) {
            self.render();
        }
    }

    /// Apply a raw slider range and re-render.
    pub fn set_selection(&mut self, min: i64, max: i64) -> Option<SelectionWindow> {
        let selection = self.state_mut()?.set_selection(min, max);
        self.render();
        selection
    }

    /// Re-render every view from the current state.
    pub fn render(&mut self) {
        let Some(state) = &self.state else {
            return;
        };

        let window = state.window();
        let granularity = state.granularity();
        let slider = RangeSlider::build(&window);
        let price = PriceChart::build(state.price_history(), window.date_range());
        let financial = FinancialChart::build(&window, state.selected_metrics());
        let table = FinancialTable::build(&window, state.selected_metrics());

        if let Some(old) = self.price_chart.take() {
            self.renderer.destroy_chart(old);
        }
        self.price_chart = self.renderer.render_price_chart(&price);

        if let Some(old) = self.financial_chart.take() {
            self.renderer.destroy_chart(old);
        }
        self.financial_chart = self.renderer.render_financial_chart(&financial);

        self.renderer.render_slider(granularity, slider.as_ref());
        self.renderer.render_table(&table);
    }

    /// Destroy all live chart instances.
    pub fn teardown(&mut self) {
        for chart in [self.price_chart.take(), self.financial_chart.take()]
            .into_iter()
            .flatten()
        {
            self.renderer.destroy_chart(chart);
        }
    }

    fn state_mut(&mut self) -> Option<&mut DashboardState> {
        self.state.as_mut()
    }
}

impl<R: RenderPort + fmt::Debug> fmt::Debug for Dashboard<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dashboard")
            .field("renderer", &self.renderer)
            .field("state", &self.state)
            .field("price_chart", &self.price_chart.is_some())
            .field("financial_chart", &self.financial_chart.is_some())
            .finish_non_exhaustive()
    }
}

impl<R: RenderPort> Drop for Dashboard<R> {
    fn drop(&mut self) {
        self.teardown();
    }
}
