//! Command line and environment configuration.

use clap::Parser;
use findash::{
    ApiProvider, DEFAULT_BASE_URL, DEFAULT_HISTORY_YEARS, DashboardLoader, Granularity,
    MAX_HISTORY_YEARS, MetricSelection, query::TICKER_PARAM,
};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::form_urlencoded;

/// Terminal financial dashboard for a single ticker.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub(crate) struct Args {
    /// Ticker symbol, e.g. AAPL.
    #[arg(short, long, env = "FINDASH_TICKER")]
    pub(crate) ticker: Option<String>,

    /// URL or query string carrying `ticker=`, used when --ticker is absent.
    #[arg(long, conflicts_with = "ticker")]
    pub(crate) query: Option<String>,

    /// Base URL of the quote API.
    #[arg(long, env = "FINDASH_API_URL", default_value = DEFAULT_BASE_URL)]
    pub(crate) api_url: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub(crate) timeout_secs: u64,

    /// Years of price history to request.
    #[arg(
        long,
        default_value_t = DEFAULT_HISTORY_YEARS,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_HISTORY_YEARS))
    )]
    pub(crate) history_years: u32,

    /// Skip the API and show placeholder data.
    #[arg(long)]
    pub(crate) offline: bool,

    /// Seed for reproducible placeholder data.
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Start in the quarterly view.
    #[arg(long)]
    pub(crate) quarterly: bool,

    /// Metric to chart; repeat for several. Defaults to totalRevenue.
    #[arg(short, long = "metric", value_name = "KEY")]
    pub(crate) metrics: Vec<String>,

    /// Initial period range as MIN:MAX report indices.
    #[arg(long, value_name = "MIN:MAX", allow_hyphen_values = true)]
    pub(crate) range: Option<PeriodRange>,

    /// Highlight negative values with ANSI colors.
    #[arg(long)]
    pub(crate) color: bool,

    /// Read commands from stdin after the first render.
    #[arg(short, long)]
    pub(crate) interactive: bool,
}

impl Args {
    /// Query string handed to the dashboard.
    pub(crate) fn query(&self) -> String {
        match (&self.ticker, &self.query) {
            (Some(ticker), _) => form_urlencoded::Serializer::new(String::new())
                .append_pair(TICKER_PARAM, ticker)
                .finish(),
            (None, Some(query)) => query.clone(),
            (None, None) => String::new(),
        }
    }

    pub(crate) const fn granularity(&self) -> Granularity {
        if self.quarterly {
            Granularity::Quarterly
        } else {
            Granularity::Yearly
        }
    }

    pub(crate) fn metric_selection(&self) -> MetricSelection {
        if self.metrics.is_empty() {
            MetricSelection::default()
        } else {
            self.metrics.iter().map(String::as_str).collect()
        }
    }

    /// Loader with the API as primary source unless offline, and seeded
    /// placeholder data as fallback.
    pub(crate) fn loader(&self) -> DashboardLoader {
        let loader = DashboardLoader::new().with_history_years(self.history_years);
        let loader = if self.offline {
            loader
        } else {
            loader.with_api_provider(ApiProvider::with_timeout(
                self.api_url.as_str(),
                Duration::from_secs(self.timeout_secs),
            ))
        };
        loader.with_mock_fallback(self.seed)
    }
}

/// Inclusive report index range, `MIN:MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PeriodRange {
    pub(crate) min: i64,
    pub(crate) max: i64,
}

impl FromStr for PeriodRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min, max) = s
            .split_once(':')
            .ok_or_else(|| format!("expected MIN:MAX, got `{s}`"))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<i64>()
                .map_err(|e| format!("invalid index `{v}`: {e}"))
        };
        Ok(Self {
            min: parse(min)?,
            max: parse(max)?,
        })
    }
}

impl fmt::Display for PeriodRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("findash").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["--ticker", "aapl"]);
        assert_eq!(args.query(), "ticker=aapl");
        assert_eq!(args.timeout_secs, 30);
        assert_eq!(args.history_years, 20);
        assert_eq!(args.granularity(), Granularity::Yearly);
        assert_eq!(args.metric_selection(), MetricSelection::default());
        assert!(args.range.is_none());
        assert!(!args.offline);
    }

    #[test]
    fn test_query_and_options() {
        let args = parse(&[
            "--query",
            "?ticker=msft",
            "--quarterly",
            "-m",
            "netIncome",
            "--metric",
            "freeCashFlow",
            "--range",
            "-1:3",
            "--offline",
            "--seed",
            "9",
        ]);
        assert_eq!(args.query(), "?ticker=msft");
        assert_eq!(args.granularity(), Granularity::Quarterly);
        assert_eq!(
            args.metric_selection().iter().collect::<Vec<_>>(),
            vec!["netIncome", "freeCashFlow"]
        );
        assert_eq!(args.range, Some(PeriodRange { min: -1, max: 3 }));
        assert_eq!(args.seed, Some(9));
        assert!(format!("{:?}", args.loader()).contains("Placeholder"));
    }

    #[test]
    fn test_ticker_conflicts_with_query() {
        let result = Args::try_parse_from(["findash", "--ticker", "A", "--query", "ticker=B"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = Args::try_parse_from(["findash", "--timeout-secs", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_history_years_bounds() {
        assert_eq!(parse(&["--history-years", "1"]).history_years, 1);
        assert_eq!(parse(&["--history-years", "100"]).history_years, 100);
        assert!(Args::try_parse_from(["findash", "--history-years", "0"]).is_err());
        assert!(Args::try_parse_from(["findash", "--history-years", "101"]).is_err());
    }

    #[test]
    fn test_ticker_with_reserved_characters() {
        let args = parse(&["--ticker", "brk&b"]);
        assert_eq!(args.query(), "ticker=brk%26b");
        assert_eq!(
            findash::query::parse_ticker(&args.query()).unwrap().as_str(),
            "BRK&B"
        );
    }

    #[test]
    fn test_period_range() {
        assert_eq!(
            "2:7".parse::<PeriodRange>(),
            Ok(PeriodRange { min: 2, max: 7 })
        );
        assert!("7".parse::<PeriodRange>().is_err());
        assert!("a:1".parse::<PeriodRange>().is_err());
        assert_eq!(PeriodRange { min: 0, max: 4 }.to_string(), "0:4");
    }
}
