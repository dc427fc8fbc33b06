//! Report windows.
//!
//! A [`ReportWindow`] orders a report collection chronologically and selects
//! an inclusive index range of it, the [`SelectionWindow`]. Every index pair
//! is clamped into range and reordered, so a window over a non-empty
//! collection always satisfies `0 <= start <= end <= len - 1`.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::granularity::Granularity;
use crate::types::PeriodicReport;

/// Maximum number of year labels placed under a range slider.
pub const MAX_AXIS_LABELS: usize = 5;

/// Maximum number of reports for which one indicator mark per report is drawn.
pub const MAX_INDICATOR_MARKS: usize = 20;

/// An inclusive index range into a chronologically sorted report sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionWindow {
    start: usize,
    end: usize,
}

impl SelectionWindow {
    /// Normalizes a raw index pair against a sequence of `len` items.
    ///
    /// Each bound is clamped into `[0, len - 1]` and the pair is swapped if
    /// `min > max`. Returns `None` when `len == 0`.
    #[must_use]
    pub fn normalize(min: i64, max: i64, len: usize) -> Option<Self> {
        let last = i64::try_from(len.checked_sub(1)?).unwrap_or(i64::MAX);
        let clamp = |i: i64| usize::try_from(i.clamp(0, last)).unwrap_or(0);
        let (a, b) = (clamp(min), clamp(max));
        Some(Self {
            start: a.min(b),
            end: a.max(b),
        })
    }

    /// The trailing `count` items of a sequence of `len` items.
    ///
    /// Returns `None` when `len == 0`.
    #[must_use]
    pub fn trailing(count: usize, len: usize) -> Option<Self> {
        let end = len.checked_sub(1)?;
        let start = len.saturating_sub(count.max(1));
        Some(Self { start, end })
    }

    /// Default window for a granularity: its last N periods.
    #[must_use]
    pub fn default_for(granularity: Granularity, len: usize) -> Option<Self> {
        Self::trailing(granularity.default_window_len(), len)
    }

    /// First selected index.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Last selected index (inclusive).
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Re-normalizes this selection against a sequence of `len` items.
    #[must_use]
    pub fn clamp_to(self, len: usize) -> Option<Self> {
        let to_i64 = |i: usize| i64::try_from(i).unwrap_or(i64::MAX);
        Self::normalize(to_i64(self.start), to_i64(self.end), len)
    }
}

/// Sorts reports ascending by fiscal period end.
///
/// The sort is stable: reports with the same date keep their original order.
#[must_use]
pub fn sort_reports(reports: &[PeriodicReport]) -> Vec<&PeriodicReport> {
    let mut ordered: Vec<&PeriodicReport> = reports.iter().collect();
    ordered.sort_by_key(|r| r.fiscal_date_ending);
    ordered
}

/// A chronologically ordered, range-selected view of a report collection.
#[derive(Clone, Debug)]
pub struct ReportWindow<'a> {
    granularity: Granularity,
    ordered: Vec<&'a PeriodicReport>,
    selection: Option<SelectionWindow>,
}

impl<'a> ReportWindow<'a> {
    /// Builds a window over `reports`.
    ///
    /// With no raw indices the default trailing window for the granularity is
    /// selected. Raw indices are clamped and reordered.
    #[must_use]
    pub fn build(
        reports: &'a [PeriodicReport],
        granularity: Granularity,
        raw: Option<(i64, i64)>,
    ) -> Self {
        let ordered = sort_reports(reports);
        let selection = match raw {
            Some((min, max)) => SelectionWindow::normalize(min, max, ordered.len()),
            None => SelectionWindow::default_for(granularity, ordered.len()),
        };
        Self {
            granularity,
            ordered,
            selection,
        }
    }

    /// Builds a window from an already normalized selection.
    ///
    /// The selection is re-clamped in case it was computed for a different
    /// collection.
    #[must_use]
    pub fn with_selection(
        reports: &'a [PeriodicReport],
        granularity: Granularity,
        selection: Option<SelectionWindow>,
    ) -> Self {
        let ordered = sort_reports(reports);
        let selection = match selection {
            Some(s) => s.clamp_to(ordered.len()),
            None => SelectionWindow::default_for(granularity, ordered.len()),
        };
        Self {
            granularity,
            ordered,
            selection,
        }
    }

    /// Returns true if there are no reports; callers show a "no data" state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// The granularity the window was built for.
    #[must_use]
    pub const fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// All reports in ascending date order.
    #[must_use]
    pub fn ordered_reports(&self) -> &[&'a PeriodicReport] {
        &self.ordered
    }

    /// Index of the last report, if any.
    #[must_use]
    pub fn last_index(&self) -> Option<usize> {
        self.ordered.len().checked_sub(1)
    }

    /// The normalized selection, `None` for an empty window.
    #[must_use]
    pub const fn selection(&self) -> Option<SelectionWindow> {
        self.selection
    }

    /// The selected reports, oldest first.
    #[must_use]
    pub fn sliced_reports(&self) -> &[&'a PeriodicReport] {
        match self.selection {
            Some(s) => &self.ordered[s.start()..=s.end()],
            None => &[],
        }
    }

    /// Period labels of the selected reports, oldest first.
    #[must_use]
    pub fn period_labels(&self) -> Vec<String> {
        self.sliced_reports()
            .iter()
            .map(|r| self.granularity.period_label(r.fiscal_date_ending))
            .collect()
    }

    /// Calendar dates spanned by the selected periods.
    ///
    /// The start is the day after the end of the period preceding the first
    /// selected report; the end is the last selected period end.
    #[must_use]
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let sliced = self.sliced_reports();
        let first = sliced.first()?.fiscal_date_ending;
        let last = sliced.last()?.fiscal_date_ending;
        let months = match self.granularity {
            Granularity::Yearly => 12,
            Granularity::Quarterly => 3,
        };
        let start = first
            .checked_sub_months(Months::new(months))
            .and_then(|d| d.checked_add_days(Days::new(1)))
            .unwrap_or(first);
        Some((start, last))
    }

    /// Up to [`MAX_AXIS_LABELS`] year labels evenly spaced across the
    /// distinct years of the whole collection.
    #[must_use]
    pub fn axis_year_labels(&self) -> Vec<i32> {
        let mut years: Vec<i32> = Vec::new();
        for report in &self.ordered {
            let year = report.fiscal_date_ending.year();
            if !years.contains(&year) {
                years.push(year);
            }
        }

        let count = years.len().min(MAX_AXIS_LABELS);
        (0..count)
            .map(|i| {
                let idx = if count > 1 {
                    i * (years.len() - 1) / (count - 1)
                } else {
                    0
                };
                years[idx]
            })
            .collect()
    }

    /// Number of per-report indicator marks to draw, or `None` when the
    /// collection is too large for one mark per report.
    #[must_use]
    pub fn indicator_marks(&self) -> Option<usize> {
        (self.ordered.len() <= MAX_INDICATOR_MARKS).then_some(self.ordered.len())
    }
}
