//! Plain-text renderer.

use findash::{
    FinancialChart, FinancialTable, Granularity, PriceChart, RangeSlider, RenderPort, Symbol,
    chart::PriceSample,
    format::{format_number, format_price},
};
use std::fmt::Write as _;
use std::io::{self, Write};
use tracing::debug;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const SPARK_WIDTH: usize = 64;
const BAR_WIDTH: usize = 40;
const TRACK_WIDTH: usize = 40;
const LABEL_WIDTH: usize = 32;
const CELL_WIDTH: usize = 11;

const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Identifies a drawn chart.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ChartId(u64);

/// Writes the dashboard as text to `W`.
///
/// Write errors don't interrupt rendering; the first one is kept and can be
/// collected with [`take_error`](Self::take_error).
#[derive(Debug)]
pub(crate) struct TerminalRenderer<W: Write> {
    out: W,
    color: bool,
    next_chart: u64,
    live_charts: usize,
    error: Option<io::Error>,
}

impl<W: Write> TerminalRenderer<W> {
    pub(crate) const fn new(out: W) -> Self {
        Self {
            out,
            color: false,
            next_chart: 0,
            live_charts: 0,
            error: None,
        }
    }

    /// Highlight negative values in red.
    pub(crate) fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Charts drawn and not yet destroyed.
    pub(crate) const fn live_charts(&self) -> usize {
        self.live_charts
    }

    /// The first write error since the last call, if any.
    pub(crate) fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    #[cfg(test)]
    pub(crate) const fn output(&self) -> &W {
        &self.out
    }

    fn emit(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|()| self.out.flush()) {
            self.error = Some(e);
        }
    }

    fn new_chart(&mut self) -> ChartId {
        self.next_chart += 1;
        self.live_charts += 1;
        ChartId(self.next_chart)
    }

    fn paint(&self, text: &str, negative: bool) -> String {
        if self.color && negative {
            format!("{RED}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

impl<W: Write> RenderPort for TerminalRenderer<W> {
    type Chart = ChartId;

    fn show_loading(&mut self, ticker: &Symbol) {
        self.emit(&format!("Loading data for {ticker}...\n"));
    }

    fn show_error(&mut self, message: &str) {
        self.emit(&format!("Error: {message}\n"));
    }

    fn show_content(&mut self, ticker: &Symbol) {
        self.emit(&format!("{ticker} loaded.\n"));
    }

    fn render_price_chart(&mut self, chart: &PriceChart) -> Option<ChartId> {
        let mut text = String::from("\nPrice\n");
        let PriceChart::Line(samples) = chart else {
            let _ = writeln!(text, "  {}", chart.message().unwrap_or_default());
            self.emit(&text);
            return None;
        };
        let _ = writeln!(text, "  {}", sparkline(samples, SPARK_WIDTH));
        if let Some(summary) = price_summary(samples) {
            let _ = writeln!(text, "  {summary}");
        }
        self.emit(&text);
        Some(self.new_chart())
    }

    fn render_financial_chart(&mut self, chart: &FinancialChart) -> Option<ChartId> {
        let mut text = String::from("\nFinancials\n");
        let FinancialChart::Bars(bars) = chart else {
            let _ = writeln!(text, "  {}", chart.message().unwrap_or_default());
            self.emit(&text);
            return None;
        };

        let max = bars
            .series
            .iter()
            .flat_map(|s| s.data.iter())
            .fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let name_width = bars.series.iter().map(|s| s.name.len()).max().unwrap_or(0);

        for (idx, category) in bars.categories.iter().enumerate() {
            let _ = writeln!(text, "  {category}");
            for series in &bars.series {
                let value = series.data.get(idx).copied().unwrap_or(0.0);
                let len = scaled(value.abs(), max, BAR_WIDTH);
                let glyph = if value < 0.0 { '░' } else { '█' };
                let bar: String = std::iter::repeat_n(glyph, len).collect();
                let number = self.paint(&format_number(value), value < 0.0);
                let _ = writeln!(
                    text,
                    "    {:<name_width$} {bar:<BAR_WIDTH$} {number}",
                    series.name
                );
            }
        }

        self.emit(&text);
        Some(self.new_chart())
    }

    fn destroy_chart(&mut self, chart: ChartId) {
        debug!(chart = chart.0, "Destroying chart");
        self.live_charts = self.live_charts.saturating_sub(1);
    }

    fn render_slider(&mut self, granularity: Granularity, slider: Option<&RangeSlider>) {
        let Some(slider) = slider else {
            return;
        };
        let (from, to) = slider.track_percent();
        let first = percent_to_cell(from, TRACK_WIDTH);
        let last = percent_to_cell(to, TRACK_WIDTH);
        let track: String = (0..TRACK_WIDTH)
            .map(|i| if (first..=last).contains(&i) { '=' } else { '-' })
            .collect();
        let years = slider
            .year_labels
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("  ");

        let mut text = String::new();
        let _ = writeln!(
            text,
            "\n{granularity} periods {}..={} of 0..={}",
            slider.start, slider.end, slider.max_index
        );
        let _ = writeln!(text, "  [{track}]");
        let _ = writeln!(text, "  {years}");
        self.emit(&text);
    }

    fn render_table(&mut self, table: &FinancialTable) {
        let mut text = String::new();
        let FinancialTable::Sections { columns, sections } = table else {
            let _ = writeln!(text, "\n{}", table.message().unwrap_or_default());
            self.emit(&text);
            return;
        };

        for section in sections {
            let _ = write!(text, "\n{:<width$}", section.title, width = LABEL_WIDTH + 4);
            for column in columns {
                let _ = write!(text, "{column:>CELL_WIDTH$}");
            }
            text.push('\n');

            for row in &section.rows {
                let check = if row.checked { "[x]" } else { "[ ]" };
                let _ = write!(text, "{check} {:<LABEL_WIDTH$}", row.label);
                for cell in &row.cells {
                    let padded = format!("{:>CELL_WIDTH$}", cell.text);
                    text.push_str(&self.paint(&padded, cell.negative));
                }
                text.push('\n');
            }
        }
        self.emit(&text);
    }
}

/// One character per bucket of samples, scaled between the lowest and
/// highest close.
fn sparkline(samples: &[PriceSample], width: usize) -> String {
    if samples.is_empty() || width == 0 {
        return String::new();
    }
    let (low, high) = bounds(samples.iter().map(|s| s.close));
    let buckets = width.min(samples.len());
    (0..buckets)
        .map(|i| {
            let close = samples[i * samples.len() / buckets].close;
            let level = if high > low {
                scaled(close - low, high - low, SPARK_LEVELS.len() - 1)
            } else {
                SPARK_LEVELS.len() / 2
            };
            SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
        })
        .collect()
}

fn price_summary(samples: &[PriceSample]) -> Option<String> {
    let first = samples.first()?.close;
    let last = samples.last()?.close;
    let (low, high) = bounds(samples.iter().map(|s| s.close));
    let change = if first == 0.0 {
        0.0
    } else {
        (last - first) / first * 100.0
    };
    Some(format!(
        "first {}  last {}  low {}  high {}  change {change:+.2}%",
        format_price(first),
        format_price(last),
        format_price(low),
        format_price(high),
    ))
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// `value / max` scaled to `0..=steps`, rounded.
fn scaled(value: f64, max: f64, steps: usize) -> usize {
    if max <= 0.0 || !value.is_finite() {
        return 0;
    }
    let ratio = (value / max).clamp(0.0, 1.0);
    (ratio * steps as f64).round() as usize
}

fn percent_to_cell(percent: f64, width: usize) -> usize {
    scaled(percent, 100.0, width.saturating_sub(1))
}
