//! Metric resolution.
//!
//! [`resolve`] turns a metric key into a number for one report. Lookup is
//! explicit about section priority: income statement, balance sheet, cash
//! flow, ratio. The first section holding a value that coerces to a finite
//! number wins; a key that is present but null or non-numeric does not stop
//! the scan.
//!
//! On top of raw lookup:
//!
//! - derived metrics ([`DerivedMetric`]) are computed from their operands and
//!   never fall through to raw lookup;
//! - `ebit` falls back to operating income;
//! - `ebitda` falls back to EBIT (or operating income) plus depreciation and
//!   amortization, when both operands resolve.
//!
//! A missing value is `None`. The resolver never substitutes zero.

use crate::types::PeriodicReport;

/// Metrics computed from other metrics rather than stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DerivedMetric {
    /// Operating cash flow minus capital expenditures.
    FreeCashFlow,
}

impl DerivedMetric {
    /// Every derived metric.
    pub const ALL: [Self; 1] = [Self::FreeCashFlow];

    /// Recognizes a derived metric key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.key() == key)
    }

    /// The metric key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::FreeCashFlow => "freeCashFlow",
        }
    }

    /// Computes the metric, or `None` if an operand is missing.
    #[must_use]
    pub fn compute(&self, report: &PeriodicReport) -> Option<f64> {
        match self {
            Self::FreeCashFlow => {
                let operating = lookup(report, "operatingCashflow")?;
                let capex = lookup(report, "capitalExpenditures")?;
                Some(operating - capex)
            }
        }
    }
}

/// Scans the report's sections in priority order for `key`.
///
/// Returns the first value that coerces to a finite number.
#[must_use]
pub fn lookup(report: &PeriodicReport, key: &str) -> Option<f64> {
    report
        .sections()
        .find_map(|(_, section)| section.number(key))
}

/// Resolves `key` for `report`, applying derived and fallback rules.
#[must_use]
pub fn resolve(report: &PeriodicReport, key: &str) -> Option<f64> {
    if let Some(derived) = DerivedMetric::from_key(key) {
        return derived.compute(report);
    }

    lookup(report, key).or_else(|| fallback(report, key))
}

fn fallback(report: &PeriodicReport, key: &str) -> Option<f64> {
    match key {
        "ebit" => lookup(report, "operatingIncome"),
        "ebitda" => {
            let ebit = resolve(report, "ebit")?;
            let depreciation = lookup(report, "depreciationAndAmortization")
                .or_else(|| lookup(report, "depreciationDepletionAndAmortization"))?;
            Some(ebit + depreciation)
        }
        _ => None,
    }
}

/// Resolves `key` for each report, in order.
#[must_use]
pub fn resolve_series<'a, I>(reports: I, key: &str) -> Vec<Option<f64>>
where
    I: IntoIterator<Item = &'a PeriodicReport>,
{
    reports.into_iter().map(|r| resolve(r, key)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::definition;
    use crate::types::{FieldValue, SectionKind, StatementSection};
    use chrono::NaiveDate;

    fn report() -> PeriodicReport {
        PeriodicReport::new(NaiveDate::from_ymd_opt(2024, 9, 30).unwrap())
    }

    #[test]
    fn test_derived_metrics_are_catalogued() {
        for metric in DerivedMetric::ALL {
            assert_eq!(DerivedMetric::from_key(metric.key()), Some(metric));
            assert!(definition(metric.key()).is_some(), "{metric:?} not catalogued");
        }
        assert_eq!(DerivedMetric::from_key("operatingCashflow"), None);
    }

    #[test]
    fn test_free_cash_flow() {
        let report = report().with_section(
            SectionKind::CashFlow,
            StatementSection::new()
                .with("operatingCashflow", 1000.0)
                .with("capitalExpenditures", 200.0),
        );
        assert_eq!(resolve(&report, "freeCashFlow"), Some(800.0));
    }

    #[test]
    fn test_free_cash_flow_missing_operand() {
        let report = report().with_section(
            SectionKind::CashFlow,
            StatementSection::new().with("operatingCashflow", 1000.0),
        );
        assert_eq!(resolve(&report, "freeCashFlow"), None);

        let report = report_with_capex_placeholder();
        assert_eq!(resolve(&report, "freeCashFlow"), None);
    }

    fn report_with_capex_placeholder() -> PeriodicReport {
        report().with_section(
            SectionKind::CashFlow,
            StatementSection::new()
                .with("operatingCashflow", 1000.0)
                .with("capitalExpenditures", "None"),
        )
    }

    #[test]
    fn test_derived_metric_ignores_stored_value() {
        let report = report().with_section(
            SectionKind::CashFlow,
            StatementSection::new().with("freeCashFlow", 123.0),
        );
        assert_eq!(resolve(&report, "freeCashFlow"), None);
    }

    #[test]
    fn test_ebitda_fallback() {
        let report = report().with_section(
            SectionKind::Income,
            StatementSection::new()
                .with("operatingIncome", 500.0)
                .with("depreciationAndAmortization", 100.0),
        );
        assert_eq!(resolve(&report, "ebit"), Some(500.0));
        assert_eq!(resolve(&report, "ebitda"), Some(600.0));
    }

    #[test]
    fn test_ebitda_fallback_uses_cash_flow_depreciation() {
        let report = report()
            .with_section(
                SectionKind::Income,
                StatementSection::new()
                    .with("ebit", 450.0)
                    .with("ebitda", "None"),
            )
            .with_section(
                SectionKind::CashFlow,
                StatementSection::new().with("depreciationDepletionAndAmortization", 50.0),
            );
        assert_eq!(resolve(&report, "ebitda"), Some(500.0));
    }

    #[test]
    fn test_ebitda_fallback_requires_both_operands() {
        let report = report().with_section(
            SectionKind::Income,
            StatementSection::new().with("operatingIncome", 500.0),
        );
        assert_eq!(resolve(&report, "ebitda"), None);
    }

    #[test]
    fn test_explicit_value_wins_over_fallback() {
        let report = report().with_section(
            SectionKind::Income,
            StatementSection::new()
                .with("ebitda", 999.0)
                .with("operatingIncome", 500.0)
                .with("depreciationAndAmortization", 100.0),
        );
        assert_eq!(resolve(&report, "ebitda"), Some(999.0));
    }

    #[test]
    fn test_section_priority() {
        let report = report()
            .with_section(
                SectionKind::CashFlow,
                StatementSection::new().with("netIncome", 2.0),
            )
            .with_section(
                SectionKind::Income,
                StatementSection::new().with("netIncome", 1.0),
            );
        assert_eq!(resolve(&report, "netIncome"), Some(1.0));
    }

    #[test]
    fn test_null_in_earlier_section_does_not_block() {
        let mut income = StatementSection::new();
        income.insert("netIncome", FieldValue::Null);
        let report = report()
            .with_section(SectionKind::Income, income)
            .with_section(
                SectionKind::Ratio,
                StatementSection::new().with("netIncome", "42"),
            );
        assert_eq!(resolve(&report, "netIncome"), Some(42.0));
    }

    #[test]
    fn test_missing_is_none_not_zero() {
        let report = report().with_section(
            SectionKind::Balance,
            StatementSection::new().with("totalAssets", "None"),
        );
        assert_eq!(resolve(&report, "totalAssets"), None);
        assert_eq!(resolve(&report, "goodwill"), None);
    }

    #[test]
    fn test_resolve_series() {
        let a = report().with_section(
            SectionKind::Income,
            StatementSection::new().with("totalRevenue", 10.0),
        );
        let b = report();
        assert_eq!(resolve_series([&a, &b], "totalRevenue"), vec![Some(10.0), None]);
    }
}
