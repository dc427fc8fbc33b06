//! Chart view models.
//!
//! These are owned snapshots built from the dashboard state. Renderers draw
//! them and never see the state itself.

use chrono::NaiveDate;
use findash_core::{PricePoint, ReportWindow, catalog::definition, metric::resolve_series};

use crate::state::MetricSelection;

/// Shown when there is no price history at all.
pub const NO_PRICE_DATA: &str = "No price data available";

/// Shown when price history exists but none of it falls in the period.
pub const NO_PRICE_DATA_IN_RANGE: &str = "No price data for the selected period";

/// Shown when no metric is selected.
pub const NO_METRICS_SELECTED: &str = "Select metrics from the table below to display";

/// Shown when none of the selected metrics is known.
pub const NO_METRIC_DATA: &str = "No data available for selected metrics";

/// Shown when there are no reports for the current granularity.
pub const NO_FINANCIAL_DATA: &str = "No financial data available";

/// One point of the price line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceSample {
    /// Milliseconds since the Unix epoch, midnight UTC.
    pub timestamp_ms: i64,
    /// Closing price.
    pub close: f64,
}

/// Price line chart.
#[derive(Clone, Debug, PartialEq)]
pub enum PriceChart {
    /// No price history was loaded.
    NoData,
    /// No price falls within the selected period.
    NoDataInRange,
    /// Closing prices within the selected period, oldest first.
    Line(Vec<PriceSample>),
}

impl PriceChart {
    /// Build from the full history, restricted to `range` when given.
    ///
    /// Both ends of the range are inclusive. An empty history yields
    /// [`PriceChart::NoData`], and a range that matches no points yields
    /// [`PriceChart::NoDataInRange`].
    #[must_use]
    pub fn build(history: &[PricePoint], range: Option<(NaiveDate, NaiveDate)>) -> Self {
        if history.is_empty() {
            return Self::NoData;
        }
        let samples: Vec<_> = history
            .iter()
            .filter(|p| range.is_none_or(|(from, to)| p.date >= from && p.date <= to))
            .map(|p| PriceSample {
                timestamp_ms: p.date.and_hms_opt(0, 0, 0).map_or(0, |dt| {
                    dt.and_utc().timestamp_millis()
                }),
                close: p.close,
            })
            .collect();
        if samples.is_empty() {
            return Self::NoDataInRange;
        }
        Self::Line(samples)
    }

    /// Placeholder text, if this chart has nothing to draw.
    #[must_use]
    pub const fn message(&self) -> Option<&'static str> {
        match self {
            Self::NoData => Some(NO_PRICE_DATA),
            Self::NoDataInRange => Some(NO_PRICE_DATA_IN_RANGE),
            Self::Line(_) => None,
        }
    }
}

/// One bar series of the financial chart.
#[derive(Clone, Debug, PartialEq)]
pub struct BarSeries {
    /// Metric key.
    pub key: &'static str,
    /// Display label.
    pub name: &'static str,
    /// One value per category; missing values drawn as zero.
    pub data: Vec<f64>,
}

/// Grouped bar chart of the selected metrics.
#[derive(Clone, Debug, PartialEq)]
pub struct BarChart {
    /// Period labels, oldest first.
    pub categories: Vec<String>,
    /// One series per selected metric, in selection order.
    pub series: Vec<BarSeries>,
    /// Bar column width as a percentage of the category width.
    pub column_width_pct: u32,
}

/// Financial metrics chart.
#[derive(Clone, Debug, PartialEq)]
pub enum FinancialChart {
    /// No reports for the current granularity.
    NoData,
    /// No metric selected.
    NoSelection,
    /// None of the selected metrics is catalogued.
    NoSeries,
    /// Bars to draw.
    Bars(BarChart),
}

impl FinancialChart {
    /// Build from the report window and metric selection.
    #[must_use]
    pub fn build(window: &ReportWindow<'_>, metrics: &MetricSelection) -> Self {
        if window.is_empty() {
            return Self::NoData;
        }
        if metrics.is_empty() {
            return Self::NoSelection;
        }

        let reports = window.sliced_reports();
        let series: Vec<BarSeries> = metrics
            .iter()
            .filter_map(definition)
            .map(|def| BarSeries {
                key: def.key,
                name: def.label,
                data: resolve_series(reports.iter().copied(), def.key)
                    .into_iter()
                    .map(|v| v.unwrap_or(0.0))
                    .collect(),
            })
            .collect();

        if series.is_empty() {
            return Self::NoSeries;
        }

        Self::Bars(BarChart {
            categories: window.period_labels(),
            column_width_pct: column_width_pct(series.len()),
            series,
        })
    }

    /// Placeholder text, if this chart has nothing to draw.
    #[must_use]
    pub const fn message(&self) -> Option<&'static str> {
        match self {
            Self::NoData => Some(NO_FINANCIAL_DATA),
            Self::NoSelection => Some(NO_METRICS_SELECTED),
            Self::NoSeries => Some(NO_METRIC_DATA),
            Self::Bars(_) => None,
        }
    }
}

/// Column width for `series` bars per category.
#[must_use]
pub fn column_width_pct(series: usize) -> u32 {
    if series <= 1 {
        return 60;
    }
    let n = u32::try_from(series).unwrap_or(u32::MAX);
    70u32.saturating_sub(n.saturating_mul(10)).max(40)
}

/// Range slider view: where the selection sits in the full collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeSlider {
    /// Index of the last report.
    pub max_index: usize,
    /// First selected index.
    pub start: usize,
    /// Last selected index.
    pub end: usize,
    /// Year labels under the track.
    pub year_labels: Vec<i32>,
    /// Number of indicator marks, `None` when there are too many reports.
    pub marks: Option<usize>,
}

impl RangeSlider {
    /// Build from a window. `None` for an empty window.
    #[must_use]
    pub fn build(window: &ReportWindow<'_>) -> Option<Self> {
        let selection = window.selection()?;
        Some(Self {
            max_index: window.last_index()?,
            start: selection.start(),
            end: selection.end(),
            year_labels: window.axis_year_labels(),
            marks: window.indicator_marks(),
        })
    }

    /// Start and end of the selected track segment as percentages.
    #[must_use]
    pub fn track_percent(&self) -> (f64, f64) {
        if self.max_index == 0 {
            return (0.0, 100.0);
        }
        let max = self.max_index as f64;
        (
            self.start as f64 * 100.0 / max,
            self.end as f64 * 100.0 / max,
        )
    }
}
