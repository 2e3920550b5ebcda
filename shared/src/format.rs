//! Display formatting used by tables, cards and the report page.

use chrono::DateTime;

use crate::sort::parse_timestamp;

/// Default cut-off for long text cells
pub const TRUNCATE_AT: usize = 50;

/// Group the integer digits of `digits` in threes
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `1234.5` -> `$1,234.50`; non-finite input shows as `$0.00`
pub fn format_currency(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(whole), cents)
}

/// Thousands separators for counts
pub fn format_number(value: i64) -> String {
    let digits = group_thousands(&value.unsigned_abs().to_string());
    if value < 0 {
        format!("-{}", digits)
    } else {
        digits
    }
}

/// `2025-04-15T10:30:00` -> `Apr 15, 2025, 10:30 AM`.
///
/// Missing dates show as `N/A`; anything unparseable is shown as received.
pub fn format_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return "N/A".to_string();
    };
    parse_timestamp(raw)
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.format("%b %-d, %Y, %-I:%M %p").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Cut `text` to `max` characters, ending in `...` when shortened
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.56), "$1,234.56");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(-42.5), "-$42.50");
        assert_eq!(format_currency(f64::NAN), "$0.00");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(-1234567), "-1,234,567");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(Some("2025-04-15T10:30:00")), "Apr 15, 2025, 10:30 AM");
        assert_eq!(format_date(Some("2025-04-15 22:05:00")), "Apr 15, 2025, 10:05 PM");
        assert_eq!(format_date(None), "N/A");
        assert_eq!(format_date(Some("someday")), "someday");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", TRUNCATE_AT), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("ééééé", 2), "éé...");
    }
}
