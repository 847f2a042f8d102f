/// Working hours in a year, used to annualize hourly rates.
pub const HOURS_PER_YEAR: f64 = 2080.0;

const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];
const HOURLY_MARKERS: [&str; 4] = ["/h", "per hour", "an hour", "hourly"];
// Longest first so "/hour" is not left as "our".
const SLASH_PERIODS: [&str; 8] = ["/annum", "/month", "/hour", "/year", "/hr", "/yr", "/mo", "/h"];
const PERIOD_WORDS: [&str; 9] = [
    "per hour", "an hour", "hourly", "per year", "a year", "per annum", "annually", "yearly",
    "usd",
];

/// Annualized salary bounds parsed from a free-form string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
}

/// Parses strings like `"$80k-$100k/yr"` or `"$40/hr"` into annual bounds.
///
/// Returns `None` for empty or unparseable input.
pub fn parse_salary(raw: &str) -> Option<SalaryRange> {
    let lowered = raw.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }

    let hourly = HOURLY_MARKERS.iter().any(|marker| lowered.contains(marker));

    // Period markers may follow each bound ("$80k/yr - $100k/yr").
    let mut body = lowered;
    for marker in SLASH_PERIODS {
        body = body.replace(marker, "");
    }
    for word in PERIOD_WORDS {
        body = body.replace(word, "");
    }
    let body = body.replace(" to ", "-").replace(['–', '—'], "-");
    let body: String = body
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != ',' && !c.is_whitespace())
        .collect();

    let bounds: Vec<&str> = body.split('-').filter(|part| !part.is_empty()).collect();
    let (min, max) = match bounds.as_slice() {
        [single] => {
            let value = parse_amount(single)?;
            (value, value)
        }
        [low, high] => (parse_amount(low)?, parse_amount(high)?),
        _ => return None,
    };

    let factor = if hourly { HOURS_PER_YEAR } else { 1.0 };
    Some(SalaryRange {
        min: min * factor,
        max: max * factor,
    })
}

/// Parses a salary filter threshold such as `"90000"`, `"90k"` or `"$90,000"`.
pub fn parse_threshold(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    parse_amount(&cleaned)
}

fn parse_amount(token: &str) -> Option<f64> {
    let (digits, multiplier) = match token.strip_suffix('k') {
        Some(rest) => (rest, 1000.0),
        None => (token, 1.0),
    };
    let value: f64 = digits.parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(value * multiplier)
}
