//! Core data types for the dashboard.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Symbol`] - Trading symbol/ticker
//! - [`PricePoint`] - One closing price
//! - [`FieldValue`] - A raw statement value as delivered by a data source
//! - [`StatementSection`] - One statement section (income, balance, ...)
//! - [`PeriodicReport`] - All sections for one fiscal period
//! - [`FinancialStatements`] - Annual and quarterly report collections

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::granularity::Granularity;

/// A trading symbol/ticker.
///
/// Symbols are automatically uppercased on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol from a string, trimming and converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().trim().to_uppercase())
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the symbol is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Symbol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Parses a calendar date from `YYYY-MM-DD` or an ISO-8601 timestamp.
///
/// Only the first ten characters are considered, so `2024-01-02T14:30:00.000Z`
/// parses as 2024-01-02.
#[must_use]
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let head = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid calendar date: {raw}")))
}

/// A single closing price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading day.
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub date: NaiveDate,
    /// Closing price.
    pub close: f64,
}

impl PricePoint {
    /// Creates a new price point.
    #[must_use]
    pub const fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// A raw statement value.
///
/// Data sources deliver numbers, numeric strings, placeholder strings such as
/// `"None"`, or null. Nothing here is rejected at parse time; coercion happens
/// in [`FieldValue::as_number`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A JSON number.
    Number(f64),
    /// A JSON string, possibly numeric.
    Text(String),
    /// JSON null.
    Null,
    /// Any other JSON value (bool, array, object).
    Other(serde_json::Value),
}

impl FieldValue {
    /// Coerces the value to a finite number.
    ///
    /// Returns `None` for null, non-numeric text (including `"None"`) and
    /// non-finite results. Never substitutes zero.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Null | Self::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// The statement sections a report may carry, in lookup priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    /// Income statement.
    Income,
    /// Balance sheet.
    Balance,
    /// Cash flow statement.
    CashFlow,
    /// Financial ratios.
    Ratio,
}

impl SectionKind {
    /// All sections, highest lookup priority first.
    pub const PRIORITY: [Self; 4] = [Self::Income, Self::Balance, Self::CashFlow, Self::Ratio];

    /// Human-readable title of the section.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Income => "Income Statement",
            Self::Balance => "Balance Sheet",
            Self::CashFlow => "Cash Flow",
            Self::Ratio => "Ratios",
        }
    }
}

/// One statement section: a sparse map from metric key to raw value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatementSection(BTreeMap<String, FieldValue>);

impl StatementSection {
    /// Creates an empty section.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw value stored under `key`, if the key is present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    /// Returns the value under `key` coerced to a number.
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(FieldValue::as_number)
    }

    /// Inserts a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Number of keys in the section.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the section has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for StatementSection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Financials for one fiscal period.
///
/// Produced wholesale by a provider and not mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodicReport {
    /// End date of the fiscal period.
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub fiscal_date_ending: NaiveDate,
    /// Income statement items.
    #[serde(default)]
    pub income_statement: Option<StatementSection>,
    /// Balance sheet items.
    #[serde(default)]
    pub balance_sheet: Option<StatementSection>,
    /// Cash flow items.
    #[serde(default)]
    pub cash_flow: Option<StatementSection>,
    /// Ratio items.
    #[serde(default)]
    pub ratio: Option<StatementSection>,
}

impl PeriodicReport {
    /// Creates a report with no sections.
    #[must_use]
    pub const fn new(fiscal_date_ending: NaiveDate) -> Self {
        Self {
            fiscal_date_ending,
            income_statement: None,
            balance_sheet: None,
            cash_flow: None,
            ratio: None,
        }
    }

    /// Sets a section.
    #[must_use]
    pub fn with_section(mut self, kind: SectionKind, section: StatementSection) -> Self {
        let slot = match kind {
            SectionKind::Income => &mut self.income_statement,
            SectionKind::Balance => &mut self.balance_sheet,
            SectionKind::CashFlow => &mut self.cash_flow,
            SectionKind::Ratio => &mut self.ratio,
        };
        *slot = Some(section);
        self
    }

    /// Returns the requested section, if present.
    #[must_use]
    pub const fn section(&self, kind: SectionKind) -> Option<&StatementSection> {
        match kind {
            SectionKind::Income => self.income_statement.as_ref(),
            SectionKind::Balance => self.balance_sheet.as_ref(),
            SectionKind::CashFlow => self.cash_flow.as_ref(),
            SectionKind::Ratio => self.ratio.as_ref(),
        }
    }

    /// Iterates over present sections in lookup priority order.
    pub fn sections(&self) -> impl Iterator<Item = (SectionKind, &StatementSection)> {
        SectionKind::PRIORITY
            .into_iter()
            .filter_map(|kind| self.section(kind).map(|s| (kind, s)))
    }
}

/// Annual and quarterly reports for one company.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialStatements {
    /// Annual reports, in provider order.
    #[serde(default)]
    pub annual_reports: Vec<PeriodicReport>,
    /// Quarterly reports, in provider order.
    #[serde(default)]
    pub quarterly_reports: Vec<PeriodicReport>,
}

impl FinancialStatements {
    /// Creates a statements collection.
    #[must_use]
    pub const fn new(
        annual_reports: Vec<PeriodicReport>,
        quarterly_reports: Vec<PeriodicReport>,
    ) -> Self {
        Self {
            annual_reports,
            quarterly_reports,
        }
    }

    /// Returns the reports for the given granularity.
    #[must_use]
    pub fn reports(&self, granularity: Granularity) -> &[PeriodicReport] {
        match granularity {
            Granularity::Yearly => &self.annual_reports,
            Granularity::Quarterly => &self.quarterly_reports,
        }
    }

    /// Returns true if neither collection has any report.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.annual_reports.is_empty() && self.quarterly_reports.is_empty()
    }
}
