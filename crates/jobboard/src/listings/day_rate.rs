//! Day-rate extraction from free-text compensation strings.

use regex::Regex;
use std::sync::LazyLock;

// "£1,200", "$950", "€1.2k": a bare number is only an amount inside a range
static RE_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[£$€]\s*(\d{1,3}(?:,\d{3})+|\d+(?:\.\d+)?)(k\b)?").unwrap()
});

// "£800-£1,200", "700 - 900", "£1k to £1.2k"
static RE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)[£$€]?\s*(\d{1,3}(?:,\d{3})+|\d+(?:\.\d+)?)(k\b)?\s*(?:-|–|to)\s*[£$€]?\s*(\d{1,3}(?:,\d{3})+|\d+(?:\.\d+)?)(k\b)?",
    )
    .unwrap()
});

static RE_NON_DAILY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(per\s+hour|/\s*h(ou)?r|hourly|per\s+annum|/\s*(yr|year|annum)|\bp\.?a\b\.?|salary)")
        .unwrap()
});

/// Plausible band for a UK fractional day rate, in whole currency units.
pub const MIN_DAY_RATE: i64 = 100;
pub const MAX_DAY_RATE: i64 = 5_000;

/// Day rate implied by `compensation`, or `None` when it does not look like one.
///
/// Ranges ("£800-£1,200/day") resolve to their midpoint; otherwise the first
/// currency amount is used. Hourly and annual figures are rejected, and so are
/// bare numbers outside a range ("starting 2025", "2 days a week").
pub fn parse_day_rate(compensation: &str) -> Option<i64> {
    if RE_NON_DAILY.is_match(compensation) {
        return None;
    }

    let ranged = RE_RANGE.captures_iter(compensation).find_map(|c| {
        let low = in_band(amount(c.get(1)?.as_str(), c.get(2).is_some())?)?;
        let high = in_band(amount(c.get(3)?.as_str(), c.get(4).is_some())?)?;
        Some((low + high) / 2.0)
    });

    let rate = match ranged {
        Some(rate) => rate,
        None => RE_AMOUNT
            .captures_iter(compensation)
            .find_map(|c| in_band(amount(c.get(1)?.as_str(), c.get(2).is_some())?))?,
    };

    Some(rate.round() as i64)
}

fn amount(digits: &str, thousands: bool) -> Option<f64> {
    let value: f64 = digits.replace(',', "").parse().ok()?;
    Some(if thousands { value * 1_000.0 } else { value })
}

fn in_band(value: f64) -> Option<f64> {
    (MIN_DAY_RATE as f64..=MAX_DAY_RATE as f64)
        .contains(&value)
        .then_some(value)
}

/// Rounded mean of the parseable day rates, `None` when there are none.
pub fn average_day_rate<'a>(compensations: impl IntoIterator<Item = &'a str>) -> Option<i64> {
    let (sum, n) = compensations
        .into_iter()
        .filter_map(parse_day_rate)
        .fold((0_i64, 0_i64), |(sum, n), r| (sum + r, n + 1));

    (n > 0).then(|| (sum as f64 / n as f64).round() as i64)
}
