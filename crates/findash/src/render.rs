//! Rendering port.
//!
//! A front end implements [`RenderPort`]; the [`Dashboard`](crate::Dashboard)
//! drives it with view model snapshots and manages the chart handles it
//! returns.

use findash_core::{Granularity, Symbol};

use crate::chart::{FinancialChart, PriceChart, RangeSlider};
use crate::table::FinancialTable;

/// What a front end must be able to draw.
pub trait RenderPort {
    /// Handle to a live chart instance.
    ///
    /// Every handle returned by a `render_*_chart` call is passed back to
    /// [`destroy_chart`](Self::destroy_chart) exactly once, before a
    /// replacement for the same slot is rendered.
    type Chart;

    /// Show the loading state for `ticker`.
    fn show_loading(&mut self, ticker: &Symbol);

    /// Show a fatal, user-facing error.
    fn show_error(&mut self, message: &str);

    /// Leave the loading state and show the dashboard content.
    fn show_content(&mut self, ticker: &Symbol);

    /// Draw the price chart. Returns `None` when only a placeholder was drawn.
    fn render_price_chart(&mut self, chart: &PriceChart) -> Option<Self::Chart>;

    /// Draw the financial chart. Returns `None` when only a placeholder was
    /// drawn.
    fn render_financial_chart(&mut self, chart: &FinancialChart) -> Option<Self::Chart>;

    /// Release a chart instance.
    fn destroy_chart(&mut self, chart: Self::Chart);

    /// Draw the period range slider; `None` hides it.
    fn render_slider(&mut self, granularity: Granularity, slider: Option<&RangeSlider>);

    /// Draw the statements table.
    fn render_table(&mut self, table: &FinancialTable);
}
