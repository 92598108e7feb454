//! Price Range Filter
//!
//! Keeps the min/max number inputs and range sliders consistent and builds the
//! filtered listing query.

use url::form_urlencoded;

pub const MIN_PARAM: &str = "price_min";
pub const MAX_PARAM: &str = "price_max";

/// Parse an input's value the way the listing form expects; blanks and non-finite values are rejected.
pub fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// New lower bound, accepted only while strictly below the upper one
pub fn sync_lower(candidate: &str, upper: &str) -> Option<f64> {
    let (value, upper) = (parse_price(candidate)?, parse_price(upper)?);
    (value < upper).then_some(value)
}

/// New upper bound, accepted only while strictly above the lower one
pub fn sync_upper(candidate: &str, lower: &str) -> Option<f64> {
    let (value, lower) = (parse_price(candidate)?, parse_price(lower)?);
    (value > lower).then_some(value)
}

/// Render a bound back into an input without a trailing `.0`
pub fn format_bound(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Text for a slider's display element
pub fn price_label(value: &str) -> String {
    format!("${value}")
}

/// Query string for the filtered listing: sets both bounds, keeps every other parameter in place
pub fn apply_query(search: &str, min: &str, max: &str) -> String {
    let mut pairs: Vec<(String, String)> = form_urlencoded::parse(search.trim_start_matches('?').as_bytes())
        .into_owned()
        .collect();
    set_param(&mut pairs, MIN_PARAM, min);
    set_param(&mut pairs, MAX_PARAM, max);
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(&pairs)
        .finish()
}

/// Replace the first `key` in place and drop later duplicates, or append when absent
fn set_param(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    let mut seen = false;
    pairs.retain_mut(|(k, v)| {
        if k != key {
            return true;
        }
        if seen {
            return false;
        }
        seen = true;
        *v = value.to_string();
        true
    });
    if !seen {
        pairs.push((key.to_string(), value.to_string()));
    }
}
