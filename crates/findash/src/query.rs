//! Ticker extraction from a URL or query string.

use findash_core::{DashboardError, Result, Symbol};
use url::{Url, form_urlencoded};

/// Query parameter carrying the ticker.
pub const TICKER_PARAM: &str = "ticker";

/// Extracts the ticker from `input`.
///
/// `input` may be a full URL (`https://host/?ticker=aapl`), a query string
/// with a leading `?`, or a bare query (`ticker=aapl&x=1`). The value is
/// percent-decoded, trimmed and uppercased.
///
/// # Errors
///
/// Returns [`DashboardError::MissingTicker`] when no non-blank `ticker`
/// parameter is present, and [`DashboardError::InvalidParameter`] when
/// `input` looks like a URL but does not parse as one.
pub fn parse_ticker(input: &str) -> Result<Symbol> {
    let input = input.trim();
    let value = if input.contains("://") {
        let url = Url::parse(input)
            .map_err(|e| DashboardError::InvalidParameter(format!("invalid URL: {e}")))?;
        find_ticker(url.query_pairs())
    } else {
        let query = input.strip_prefix('?').unwrap_or(input);
        find_ticker(form_urlencoded::parse(query.as_bytes()))
    };

    value
        .map(Symbol::new)
        .filter(|s| !s.is_empty())
        .ok_or(DashboardError::MissingTicker)
}

fn find_ticker<'a, I>(pairs: I) -> Option<String>
where
    I: IntoIterator<Item = (std::borrow::Cow<'a, str>, std::borrow::Cow<'a, str>)>,
{
    pairs
        .into_iter()
        .find(|(k, _)| k == TICKER_PARAM)
        .map(|(_, v)| v.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use findash_core::error::MISSING_TICKER_MESSAGE;

    #[test]
    fn test_parse_ticker_forms() {
        assert_eq!(parse_ticker("ticker=aapl").unwrap().as_str(), "AAPL");
        assert_eq!(parse_ticker("?ticker=msft&x=1").unwrap().as_str(), "MSFT");
        assert_eq!(
            parse_ticker("https://example.test/index.html?x=1&ticker=brk.b")
                .unwrap()
                .as_str(),
            "BRK.B"
        );
    }

    #[test]
    fn test_parse_ticker_decodes_and_trims() {
        assert_eq!(parse_ticker("?ticker=+nvda%20").unwrap().as_str(), "NVDA");
    }

    #[test]
    fn test_missing_or_blank_ticker() {
        for input in ["", "?", "?symbol=AAPL", "?ticker=", "?ticker=%20%20"] {
            let err = parse_ticker(input).unwrap_err();
            assert!(matches!(err, DashboardError::MissingTicker), "{input}");
            assert_eq!(err.to_string(), MISSING_TICKER_MESSAGE);
        }
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            parse_ticker("http://[::1"),
            Err(DashboardError::InvalidParameter(_))
        ));
    }
}
