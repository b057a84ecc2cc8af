//! Price-text helpers: amount patterns, range maxima, tax-inclusive
//! conversion and the bare-number normalization used by corrections and the
//! aggregated matrix.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::text::normalize_digits;

/// An amount followed by a currency marker, e.g. `1,600 円`.
pub(crate) static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,4}(?:[,，]\d{3})*(?:\.\d+)?)\s*[円¥]").expect("valid regex")
});
/// A bare amount with optional thousands separators.
pub(crate) static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,4}(?:[,，]\d{3})*(?:\.\d+)?)").expect("valid regex"));
static FIRST_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid regex"));

/// Consumption tax multiplier, 1.1.
fn tax_rate() -> Decimal {
    Decimal::new(11, 1)
}

/// Range separators and open-ended markers seen on vendor pages.
const RANGE_MARKERS: [char; 4] = ['〜', '～', '-', '超'];

/// Parses one amount as written on a vendor page (`1,577`, `１５７７`, `12.5`).
pub(crate) fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned = normalize_digits(raw).replace([',', '，'], "");
    Decimal::from_str(cleaned.trim()).ok()
}

pub(crate) fn is_range(text: &str) -> bool {
    text.contains(RANGE_MARKERS)
}

/// The largest amount in `text`, for range listings like `1,500〜1,577円`.
pub(crate) fn max_amount(text: &str) -> Option<Decimal> {
    AMOUNT_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).and_then(|m| parse_amount(m.as_str())))
        .max()
}

/// The first amount in `text`, verbatim.
pub(crate) fn first_amount(text: &str) -> Option<&str> {
    AMOUNT_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Converts a tax-excluded amount to the tax-included integer amount.
///
/// `surcharge` is added before tax. The result is rounded to the nearest
/// integer with exact halves rounded toward zero, so `1577 → 1735` and
/// `315 → 346`.
#[must_use]
pub fn tax_inclusive(amount: Decimal, surcharge: Decimal) -> Decimal {
    ((amount + surcharge) * tax_rate())
        .round_dp_with_strategy(0, RoundingStrategy::MidpointTowardZero)
}

/// Integer part of an amount, formatted without a fraction.
pub(crate) fn format_whole(amount: Decimal) -> String {
    amount.trunc().normalize().to_string()
}

/// Reduces a price string to a bare number: thousands separators (half- and
/// full-width) are stripped and only the first numeric run is kept.
///
/// `"1,577円/kg前後"` becomes `"1577"`. Text without any digit becomes `""`.
#[must_use]
pub fn normalize_price(text: &str) -> String {
    let cleaned = normalize_digits(text).replace([',', '，'], "");
    FIRST_NUMBER_RE
        .find(&cleaned)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "price_test.rs"]
mod tests;
