//! Catalog of displayable metrics.
//!
//! The table shows three statement sections, each a fixed list of metric keys
//! with labels. The same catalog names the series of the financial chart.

use crate::types::SectionKind;

/// A displayable metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MetricDefinition {
    /// Metric key as used by data sources (e.g. `totalRevenue`).
    pub key: &'static str,
    /// Display label.
    pub label: &'static str,
}

impl MetricDefinition {
    const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Metric selected when a dashboard is first opened.
pub const DEFAULT_METRIC: &str = "totalRevenue";

/// Income statement rows.
pub const INCOME_STATEMENT_METRICS: &[MetricDefinition] = &[
    MetricDefinition::new("totalRevenue", "Total Revenue"),
    MetricDefinition::new("grossProfit", "Gross Profit"),
    MetricDefinition::new("operatingIncome", "Operating Income"),
    MetricDefinition::new("ebit", "EBIT"),
    MetricDefinition::new("ebitda", "EBITDA"),
    MetricDefinition::new("incomeBeforeTax", "Income Before Tax"),
    MetricDefinition::new("incomeTaxExpense", "Income Tax Expense"),
    MetricDefinition::new("interestExpense", "Interest Expense"),
    MetricDefinition::new("netIncome", "Net Income"),
    MetricDefinition::new("reportedEPS", "EPS"),
    MetricDefinition::new("researchAndDevelopment", "R&D Expenses"),
    MetricDefinition::new("sellingGeneralAndAdministrative", "SG&A Expenses"),
    MetricDefinition::new("depreciationAndAmortization", "Depreciation & Amortization"),
    MetricDefinition::new("costOfRevenue", "Cost of Revenue"),
    MetricDefinition::new("operatingExpenses", "Operating Expenses"),
];

/// Balance sheet rows.
pub const BALANCE_SHEET_METRICS: &[MetricDefinition] = &[
    MetricDefinition::new("totalAssets", "Total Assets"),
    MetricDefinition::new("totalLiabilities", "Total Liabilities"),
    MetricDefinition::new("totalShareholderEquity", "Total Shareholder Equity"),
    MetricDefinition::new(
        "cashAndCashEquivalentsAtCarryingValue",
        "Cash and Cash Equivalents",
    ),
    MetricDefinition::new("totalCurrentAssets", "Current Assets"),
    MetricDefinition::new("totalCurrentLiabilities", "Current Liabilities"),
    MetricDefinition::new("shortTermInvestments", "Short Term Investments"),
    MetricDefinition::new("longTermInvestments", "Long Term Investments"),
    MetricDefinition::new("inventory", "Inventory"),
    MetricDefinition::new("currentNetReceivables", "Accounts Receivable"),
    MetricDefinition::new("shortLongTermDebtTotal", "Total Debt"),
    MetricDefinition::new("longTermDebt", "Long Term Debt"),
    MetricDefinition::new("shortTermDebt", "Short Term Debt"),
    MetricDefinition::new("propertyPlantEquipment", "Property, Plant & Equipment"),
    MetricDefinition::new("goodwill", "Goodwill"),
    MetricDefinition::new("intangibleAssets", "Intangible Assets"),
    MetricDefinition::new("retainedEarnings", "Retained Earnings"),
    MetricDefinition::new("commonStock", "Common Stock"),
];

/// Cash flow rows.
pub const CASH_FLOW_METRICS: &[MetricDefinition] = &[
    MetricDefinition::new("operatingCashflow", "Operating Cashflow"),
    MetricDefinition::new("capitalExpenditures", "Capital Expenditures"),
    MetricDefinition::new("freeCashFlow", "Free Cash Flow"),
    MetricDefinition::new("dividendPayout", "Dividend Payout"),
    MetricDefinition::new("netIncome", "Net Income"),
    MetricDefinition::new(
        "depreciationDepletionAndAmortization",
        "Depreciation & Amortization",
    ),
    MetricDefinition::new("changeInReceivables", "Change in Receivables"),
    MetricDefinition::new("changeInInventory", "Change in Inventory"),
    MetricDefinition::new(
        "changeInOperatingLiabilities",
        "Change in Operating Liabilities",
    ),
    MetricDefinition::new("cashflowFromInvestment", "Investing Cash Flow"),
    MetricDefinition::new("cashflowFromFinancing", "Financing Cash Flow"),
    MetricDefinition::new("stockBasedCompensation", "Stock Based Compensation"),
];

/// Table sections in display order.
pub const TABLE_SECTIONS: &[(SectionKind, &[MetricDefinition])] = &[
    (SectionKind::Income, INCOME_STATEMENT_METRICS),
    (SectionKind::Balance, BALANCE_SHEET_METRICS),
    (SectionKind::CashFlow, CASH_FLOW_METRICS),
];

/// Iterates over every catalogued metric, section by section.
///
/// Keys listed in more than one section (such as `netIncome`) appear once per
/// section.
pub fn all_metrics() -> impl Iterator<Item = &'static MetricDefinition> {
    TABLE_SECTIONS
        .iter()
        .flat_map(|(_, metrics)| metrics.iter())
}

/// Looks up the first catalog entry for `key`.
#[must_use]
pub fn definition(key: &str) -> Option<&'static MetricDefinition> {
    all_metrics().find(|m| m.key == key)
}
