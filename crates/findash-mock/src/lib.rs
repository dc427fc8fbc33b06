#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/findash/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Placeholder data provider.
//!
//! Generates a plausible price history and plausible financial statements so
//! the dashboard has something to show when the remote API is unreachable.
//! [`MockProvider`] never returns an error.
//!
//! # Example
//!
//! ```rust
//! use findash_mock::generate_price_history;
//! use chrono::NaiveDate;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let to = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
//! let prices = generate_price_history(&mut rng, from, to);
//! assert_eq!(prices.len(), 23);
//! ```

use async_trait::async_trait;
use chrono::{Datelike, Local, Months, NaiveDate, Weekday};
use findash_core::{
    DataProvider, FinancialStatements, PeriodicReport, PriceHistoryProvider, PricePoint, Result,
    SectionKind, StatementSection, StatementsProvider, Symbol,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

/// Number of annual reports generated.
pub const ANNUAL_REPORTS: usize = 5;

/// Number of quarterly reports generated.
pub const QUARTERLY_REPORTS: usize = 8;

/// Lowest price the random walk can reach.
const PRICE_FLOOR: f64 = 50.0;

/// Placeholder data provider.
#[derive(Clone, Debug, Default)]
pub struct MockProvider {
    seed: Option<u64>,
}

impl MockProvider {
    /// Create a provider producing different data on every call.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider producing the same data on every call.
    #[must_use]
    pub const fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl DataProvider for MockProvider {
    fn name(&self) -> &str {
        "Placeholder"
    }

    fn description(&self) -> &str {
        "Synthetic prices and statements for offline use"
    }
}

#[async_trait]
impl PriceHistoryProvider for MockProvider {
    async fn fetch_price_history(
        &self,
        symbol: &Symbol,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>> {
        let points = generate_price_history(&mut self.rng(), from, to);
        debug!(symbol = %symbol, count = points.len(), "Generated placeholder prices");
        Ok(points)
    }
}

#[async_trait]
impl StatementsProvider for MockProvider {
    async fn fetch_statements(&self, symbol: &Symbol) -> Result<FinancialStatements> {
        let today = Local::now().date_naive();
        debug!(symbol = %symbol, "Generated placeholder statements");
        Ok(generate_statements(&mut self.rng(), today))
    }
}

/// Generates one closing price per weekday from `from` to `to` inclusive.
///
/// A random walk starting between 150 and 200, moving at most 2.50 a day and
/// never dropping below 50. Prices are rounded to cents.
pub fn generate_price_history<R: Rng + ?Sized>(
    rng: &mut R,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<PricePoint> {
    let mut points = Vec::new();
    let mut price: f64 = 150.0 + rng.gen_range(0.0..50.0);

    for day in from.iter_days().take_while(|d| *d <= to) {
        if matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }
        price = (price + rng.gen_range(-2.5..2.5)).max(PRICE_FLOOR);
        points.push(PricePoint::new(day, (price * 100.0).round() / 100.0));
    }

    points
}

/// Shape of a generated report set.
struct Profile {
    revenue_base: f64,
    revenue_spread: f64,
    /// Balance sheet items as multiples of revenue.
    balance: &'static [(&'static str, f64)],
    /// Scale applied to revenue-based cash flow items.
    cash_scale: f64,
}

const ANNUAL: Profile = Profile {
    revenue_base: 200e9,
    revenue_spread: 50e9,
    balance: &[
        ("totalAssets", 2.0),
        ("totalLiabilities", 1.2),
        ("totalShareholderEquity", 0.8),
        ("cashAndCashEquivalentsAtCarryingValue", 0.15),
        ("totalCurrentAssets", 0.5),
        ("totalCurrentLiabilities", 0.4),
        ("shortTermInvestments", 0.25),
        ("longTermInvestments", 0.35),
        ("inventory", 0.08),
        ("currentNetReceivables", 0.12),
        ("shortLongTermDebtTotal", 0.5),
        ("longTermDebt", 0.4),
        ("shortTermDebt", 0.1),
        ("propertyPlantEquipment", 0.6),
        ("goodwill", 0.1),
        ("intangibleAssets", 0.15),
        ("retainedEarnings", 0.45),
        ("commonStock", 0.05),
    ],
    cash_scale: 1.0,
};

const QUARTERLY: Profile = Profile {
    revenue_base: 50e9,
    revenue_spread: 15e9,
    balance: &[
        ("totalAssets", 8.0),
        ("totalLiabilities", 4.8),
        ("totalShareholderEquity", 3.2),
        ("cashAndCashEquivalentsAtCarryingValue", 0.6),
        ("totalCurrentAssets", 4.0),
        ("totalCurrentLiabilities", 3.2),
        ("shortTermInvestments", 2.0),
        ("longTermInvestments", 2.8),
        ("inventory", 0.32),
        ("currentNetReceivables", 0.48),
        ("shortLongTermDebtTotal", 4.0),
        ("longTermDebt", 3.2),
        ("shortTermDebt", 0.8),
        ("propertyPlantEquipment", 4.8),
        ("goodwill", 0.8),
        ("intangibleAssets", 1.2),
        ("retainedEarnings", 1.8),
        ("commonStock", 0.2),
    ],
    cash_scale: 4.0,
};

/// Generates five annual and eight quarterly reports ending near `today`.
///
/// Annual periods end on 30 September of the current and four prior years.
/// Quarterly periods step back three months at a time from `today` and end on
/// the 30th of the quarter's last month.
pub fn generate_statements<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> FinancialStatements {
    let annual = (0..ANNUAL_REPORTS)
        .filter_map(|i| {
            let year = today.year() - i32::try_from(i).ok()?;
            NaiveDate::from_ymd_opt(year, 9, 30)
        })
        .map(|date| generate_report(&mut *rng, date, &ANNUAL))
        .collect();

    let quarterly = (0..QUARTERLY_REPORTS)
        .filter_map(|i| {
            let months = u32::try_from(i * 3).ok()?;
            let date = today.checked_sub_months(Months::new(months))?;
            quarter_end(date)
        })
        .map(|date| generate_report(&mut *rng, date, &QUARTERLY))
        .collect();

    FinancialStatements::new(annual, quarterly)
}

/// The 30th of the last month of the quarter containing `date`.
fn quarter_end(date: NaiveDate) -> Option<NaiveDate> {
    let quarter = date.month0() / 3 + 1;
    NaiveDate::from_ymd_opt(date.year(), quarter * 3, 30)
}

fn generate_report<R: Rng + ?Sized>(
    rng: &mut R,
    fiscal_date_ending: NaiveDate,
    profile: &Profile,
) -> PeriodicReport {
    let revenue = profile.revenue_base + rng.gen_range(0.0..profile.revenue_spread);
    let net_income = revenue * (0.15 + rng.gen_range(0.0..0.1));
    let operating_income = revenue * 0.25;
    let gross_profit = revenue * 0.4;
    let income_before_tax = net_income * 1.2;
    let rnd = revenue * 0.07;
    let sga = revenue * 0.12;
    let depreciation = revenue * 0.05;

    let income: StatementSection = [
        ("totalRevenue", revenue),
        ("netIncome", net_income),
        ("operatingIncome", operating_income),
        ("grossProfit", gross_profit),
        ("ebit", operating_income),
        ("ebitda", operating_income + depreciation),
        ("incomeBeforeTax", income_before_tax),
        ("incomeTaxExpense", income_before_tax - net_income),
        ("interestExpense", revenue * 0.01),
        ("researchAndDevelopment", rnd),
        ("sellingGeneralAndAdministrative", sga),
        ("depreciationAndAmortization", depreciation),
        ("costOfRevenue", revenue - gross_profit),
        ("operatingExpenses", sga + rnd),
    ]
    .into_iter()
    .map(|(k, v)| (k, v.round()))
    .collect();

    let balance: StatementSection = profile
        .balance
        .iter()
        .map(|&(k, ratio)| (k, (revenue * ratio).round()))
        .collect();

    let scaled = |ratio: f64| (revenue * ratio * profile.cash_scale).round();
    let cash_flow: StatementSection = [
        ("operatingCashflow", (net_income * 1.2).round()),
        ("capitalExpenditures", scaled(0.05)),
        ("dividendPayout", (net_income * 0.3).round()),
        ("netIncome", net_income.round()),
        ("depreciationDepletionAndAmortization", depreciation.round()),
        ("changeInReceivables", scaled(-0.02)),
        ("changeInInventory", scaled(-0.01)),
        ("changeInOperatingLiabilities", scaled(0.03)),
        ("cashflowFromInvestment", scaled(-0.08)),
        ("cashflowFromFinancing", scaled(-0.15)),
        ("stockBasedCompensation", scaled(0.03)),
    ]
    .into_iter()
    .collect();

    PeriodicReport::new(fiscal_date_ending)
        .with_section(SectionKind::Income, income)
        .with_section(SectionKind::Balance, balance)
        .with_section(SectionKind::CashFlow, cash_flow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use findash_core::{Granularity, ReportWindow, catalog, resolve};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 14).unwrap()
    }

    #[test]
    fn test_price_history_skips_weekends() {
        let mut rng = StdRng::seed_from_u64(1);
        let from = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(); // Saturday
        let to = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap(); // Sunday
        let points = generate_price_history(&mut rng, from, to);

        assert_eq!(points.len(), 5);
        assert!(
            points
                .iter()
                .all(|p| !matches!(p.date.weekday(), Weekday::Sat | Weekday::Sun))
        );
    }

    #[test]
    fn test_price_history_bounds() {
        let mut rng = StdRng::seed_from_u64(2);
        let from = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let points = generate_price_history(&mut rng, from, to);

        assert!(!points.is_empty());
        assert!(points.iter().all(|p| p.close >= PRICE_FLOOR));
        assert!(points.windows(2).all(|w| w[0].date < w[1].date));
        assert!(points.iter().all(|p| ((p.close * 100.0).round() - p.close * 100.0).abs() < 1e-6));
    }

    #[test]
    fn test_price_history_starting_level() {
        let mut rng = StdRng::seed_from_u64(5);
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let points = generate_price_history(&mut rng, day, day);

        assert_eq!(points.len(), 1);
        assert!((147.5..=202.5).contains(&points[0].close));
    }

    #[test]
    fn test_price_history_empty_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let from = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert!(generate_price_history(&mut rng, from, to).is_empty());
    }

    #[test]
    fn test_statements_dates() {
        let mut rng = StdRng::seed_from_u64(4);
        let statements = generate_statements(&mut rng, today());

        let annual: Vec<_> = statements
            .annual_reports
            .iter()
            .map(|r| r.fiscal_date_ending.to_string())
            .collect();
        assert_eq!(
            annual,
            vec!["2025-09-30", "2024-09-30", "2023-09-30", "2022-09-30", "2021-09-30"]
        );

        let quarterly: Vec<_> = statements
            .quarterly_reports
            .iter()
            .map(|r| r.fiscal_date_ending.to_string())
            .collect();
        assert_eq!(
            quarterly,
            vec![
                "2025-06-30",
                "2025-03-30",
                "2024-12-30",
                "2024-09-30",
                "2024-06-30",
                "2024-03-30",
                "2023-12-30",
                "2023-09-30",
            ]
        );
    }

    #[test]
    fn test_statements_cover_catalog() {
        let mut rng = StdRng::seed_from_u64(5);
        let statements = generate_statements(&mut rng, today());
        let report = &statements.annual_reports[0];

        for metric in catalog::all_metrics().filter(|m| m.key != "reportedEPS") {
            assert!(
                resolve(report, metric.key).is_some(),
                "no value for {}",
                metric.key
            );
        }
    }

    #[test]
    fn test_statements_relationships() {
        let mut rng = StdRng::seed_from_u64(6);
        let statements = generate_statements(&mut rng, today());

        for report in &statements.annual_reports {
            let revenue = resolve(report, "totalRevenue").unwrap();
            assert!((200e9..=250e9).contains(&revenue));
            let ebitda = resolve(report, "ebitda").unwrap();
            let ebit = resolve(report, "ebit").unwrap();
            let da = resolve(report, "depreciationAndAmortization").unwrap();
            assert!((ebitda - (ebit + da)).abs() <= 1.0);
        }

        for report in &statements.quarterly_reports {
            let revenue = resolve(report, "totalRevenue").unwrap();
            assert!((50e9..=65e9).contains(&revenue));
        }
    }

    #[test]
    fn test_statements_window_defaults() {
        let mut rng = StdRng::seed_from_u64(7);
        let statements = generate_statements(&mut rng, today());
        let window = ReportWindow::build(
            statements.reports(Granularity::Quarterly),
            Granularity::Quarterly,
            None,
        );
        let selection = window.selection().unwrap();
        assert_eq!((selection.start(), selection.end()), (0, 7));
        assert_eq!(window.period_labels().last().unwrap(), "Q2 '25");
    }

    #[tokio::test]
    async fn test_seeded_provider_is_deterministic() {
        let provider = MockProvider::with_seed(42);
        let symbol = Symbol::new("MSFT");
        let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let a = provider.fetch_price_history(&symbol, from, to).await.unwrap();
        let b = provider.fetch_price_history(&symbol, from, to).await.unwrap();
        assert_eq!(a, b);

        let statements = provider.fetch_statements(&symbol).await.unwrap();
        assert_eq!(statements.annual_reports.len(), ANNUAL_REPORTS);
        assert_eq!(statements.quarterly_reports.len(), QUARTERLY_REPORTS);
    }

    #[test]
    fn test_provider_metadata() {
        let provider = MockProvider::new();
        assert_eq!(provider.name(), "Placeholder");
        assert!(!provider.description().is_empty());
    }
}
