//! Financial statements table view model.

use findash_core::{
    ReportWindow, SectionKind, catalog::TABLE_SECTIONS, format_value, metric::resolve,
};

use crate::chart::NO_FINANCIAL_DATA;
use crate::state::MetricSelection;

/// One formatted table cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableCell {
    /// Formatted value, `-` when missing.
    pub text: String,
    /// True for values below zero.
    pub negative: bool,
}

/// One metric row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    /// Metric key, passed back when the row's checkbox is toggled.
    pub key: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Whether the metric is charted.
    pub checked: bool,
    /// One cell per column.
    pub cells: Vec<TableCell>,
}

/// One statement section of the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSection {
    /// Which statement the rows come from.
    pub kind: SectionKind,
    /// Section heading.
    pub title: &'static str,
    /// Rows in catalog order.
    pub rows: Vec<TableRow>,
}

/// The statements table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FinancialTable {
    /// No reports for the current granularity.
    NoData,
    /// Sections to draw.
    Sections {
        /// Period labels, newest first.
        columns: Vec<String>,
        /// Income statement, balance sheet and cash flow.
        sections: Vec<TableSection>,
    },
}

impl FinancialTable {
    /// Build from the report window and metric selection.
    #[must_use]
    pub fn build(window: &ReportWindow<'_>, metrics: &MetricSelection) -> Self {
        if window.is_empty() {
            return Self::NoData;
        }

        let reports: Vec<_> = window.sliced_reports().iter().rev().copied().collect();
        let columns = reports
            .iter()
            .map(|r| window.granularity().period_label(r.fiscal_date_ending))
            .collect();

        let sections = TABLE_SECTIONS
            .iter()
            .map(|(kind, definitions)| TableSection {
                kind: *kind,
                title: kind.title(),
                rows: definitions
                    .iter()
                    .map(|def| TableRow {
                        key: def.key,
                        label: def.label,
                        checked: metrics.contains(def.key),
                        cells: reports
                            .iter()
                            .map(|r| {
                                let value = resolve(r, def.key);
                                TableCell {
                                    text: format_value(value),
                                    negative: value.is_some_and(|v| v < 0.0),
                                }
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        Self::Sections { columns, sections }
    }

    /// Placeholder text, if there is nothing to draw.
    #[must_use]
    pub const fn message(&self) -> Option<&'static str> {
        match self {
            Self::NoData => Some(NO_FINANCIAL_DATA),
            Self::Sections { .. } => None,
        }
    }
}
