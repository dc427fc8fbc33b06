//! Human-readable number formatting.

/// Placeholder shown for a missing value.
pub const NO_VALUE: &str = "-";

/// Formats a value with a magnitude suffix.
///
/// Values with magnitude of at least 1e9, 1e6 and 1e3 are shown as `x.xxB`,
/// `x.xxM` and `x.xxK`; smaller values with two decimals. `None` renders as
/// [`NO_VALUE`].
#[must_use]
pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format_number(v),
        _ => NO_VALUE.to_string(),
    }
}

/// Formats a finite number with a magnitude suffix.
#[must_use]
pub fn format_number(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.2}K", value / 1e3)
    } else {
        format!("{value:.2}")
    }
}

/// Formats a price as dollars with two decimals.
#[must_use]
pub fn format_price(value: f64) -> String {
    format!("${value:.2}")
}
