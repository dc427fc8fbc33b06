//! Reporting granularity.
//!
//! [`Granularity`] selects between annual and quarterly reports and carries
//! the presentation rules that depend on it: the default window length and
//! the period label format.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reporting cadence shown by the dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    /// Annual reports.
    #[default]
    Yearly,
    /// Quarterly reports.
    Quarterly,
}

impl Granularity {
    /// Number of trailing periods selected when the window is reset.
    ///
    /// Five years either way: 5 annual reports or 20 quarterly reports.
    #[must_use]
    pub const fn default_window_len(&self) -> usize {
        match self {
            Self::Yearly => 5,
            Self::Quarterly => 20,
        }
    }

    /// Returns the other granularity.
    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Self::Yearly => Self::Quarterly,
            Self::Quarterly => Self::Yearly,
        }
    }

    /// Formats a fiscal period end as a column or category label.
    ///
    /// Yearly periods are labelled with the calendar year, quarterly periods
    /// as `Q<n> 'YY`.
    #[must_use]
    pub fn period_label(&self, date: NaiveDate) -> String {
        match self {
            Self::Yearly => date.year().to_string(),
            Self::Quarterly => {
                let quarter = date.month0() / 3 + 1;
                format!("Q{quarter} '{:02}", date.year().rem_euclid(100))
            }
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yearly => write!(f, "Yearly"),
            Self::Quarterly => write!(f, "Quarterly"),
        }
    }
}
