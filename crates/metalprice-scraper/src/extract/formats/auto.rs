//! Generic heuristic extraction for vendors without a dedicated strategy.
//!
//! Sub-strategies run in a fixed priority order and the first one that
//! yields anything wins:
//!
//! 1. marked-value spans (`span.MP-value` by default, or the site's
//!    `value_class` hint) holding a bare number,
//! 2. table rows (first cell material, second cell price),
//! 3. list items and definition lists,
//! 4. a brute-force scan of short text nodes.

use std::fmt;
use std::sync::LazyLock;

use metalprice_core::PriceMap;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::table::extract_rows;
use crate::extract::dom::first;
use crate::price::PRICE_RE;
use crate::text::text_of;

static SPAN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span").expect("valid selector"));
static P: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").expect("valid selector"));
static IMG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("valid selector"));
static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("valid selector"));
static LIST: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("ul, ol, dl").expect("valid selector"));
static LIST_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li, dt, dd").expect("valid selector"));
static SCAN_TARGETS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p, span, div, td, li").expect("valid selector"));

static LEADING_NON_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\d]+").expect("valid regex"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"TEL\d+[-ー]\d+[-ー]\d+").expect("valid regex"));
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s]+").expect("valid regex"));
static SYMBOLS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\w\x{3040}-\x{309F}\x{30A0}-\x{30FF}\x{4E00}-\x{9FAF}]+").expect("valid regex")
});

/// Class of the spans the marked-value stage reads when a site sets no
/// `value_class` hint.
pub const DEFAULT_VALUE_CLASS: &str = "MP-value";

/// Materials longer than this are page prose, not labels.
const MAX_MATERIAL_CHARS: usize = 50;
/// Text-scan window, exclusive on both ends.
const SCAN_MIN_CHARS: usize = 5;
const SCAN_MAX_CHARS: usize = 100;

/// The auto sub-strategy that produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoStage {
    MarkedValue,
    Table,
    List,
    TextScan,
}

impl fmt::Display for AutoStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MarkedValue => "marked_value",
            Self::Table => "table",
            Self::List => "list",
            Self::TextScan => "text_scan",
        };
        f.write_str(name)
    }
}

pub fn extract_auto(doc: &Html, value_class: &str) -> PriceMap {
    extract_auto_with_stage(doc, value_class).map_or_else(PriceMap::new, |(_, prices)| prices)
}

/// Runs the auto chain and reports which stage produced the prices, or
/// `None` when every stage came up empty.
///
/// `value_class` is the class of the spans holding marked values.
pub fn extract_auto_with_stage(doc: &Html, value_class: &str) -> Option<(AutoStage, PriceMap)> {
    let marked = extract_marked_values(doc, value_class);
    if !marked.is_empty() {
        tracing::debug!(
            stage = %AutoStage::MarkedValue,
            count = marked.len(),
            "auto extraction stage matched"
        );
        return Some((AutoStage::MarkedValue, marked));
    }

    let stages: [(AutoStage, fn(&Html) -> PriceMap); 3] = [
        (AutoStage::Table, extract_tables),
        (AutoStage::List, extract_lists),
        (AutoStage::TextScan, extract_text_scan),
    ];

    for (stage, run) in stages {
        let prices = run(doc);
        if !prices.is_empty() {
            tracing::debug!(stage = %stage, count = prices.len(), "auto extraction stage matched");
            return Some((stage, prices));
        }
    }
    None
}

fn extract_marked_values(doc: &Html, value_class: &str) -> PriceMap {
    let mut prices = PriceMap::new();
    let values = doc
        .select(&SPAN)
        .filter(|span| span.value().classes().any(|class| class == value_class));
    for value in values {
        let Some(holder) = value
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|el| matches!(el.value().name(), "td" | "div" | "p"))
        else {
            continue;
        };
        let Some(material) = marked_value_material(holder) else {
            continue;
        };
        let amount = text_of(value);
        if material.is_empty() || !amount.chars().any(|c| c.is_ascii_digit()) {
            continue;
        }
        prices.insert(material, format!("{amount}円"));
    }
    prices
}

/// Material label for a marked value: a `<p>` inside the holder, else an
/// image alt text, else the holder's leading non-digit text.
fn marked_value_material(holder: ElementRef<'_>) -> Option<String> {
    if let Some(p) = first(holder, &P) {
        return Some(text_of(p));
    }
    if let Some(alt) = first(holder, &IMG)
        .and_then(|img| img.value().attr("alt"))
        .filter(|alt| !alt.is_empty())
    {
        return Some(alt.to_string());
    }
    let text = text_of(holder);
    LEADING_NON_DIGITS_RE
        .find(&text)
        .map(|m| m.as_str().trim().to_string())
}

fn extract_tables(doc: &Html) -> PriceMap {
    extract_rows(doc.select(&TABLE))
}

fn extract_lists(doc: &Html) -> PriceMap {
    let mut prices = PriceMap::new();
    for list in doc.select(&LIST) {
        let mut last_term: Option<String> = None;
        for item in list.select(&LIST_ITEM) {
            let text = text_of(item);
            if item.value().name() == "dt" {
                last_term = Some(text.clone());
            }
            let Some(caps) = PRICE_RE.captures(&text) else {
                continue;
            };
            let (Some(whole), Some(amount)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let mut material = text[..whole.start()].trim().to_string();
            // A bare price in <dd> belongs to the preceding <dt>.
            if material.is_empty() && item.value().name() == "dd" {
                material = last_term.clone().unwrap_or_default();
            }
            if is_label(&material) {
                prices.insert(material, format!("{}円", amount.as_str()));
            }
        }
    }
    prices
}

fn extract_text_scan(doc: &Html) -> PriceMap {
    let mut prices = PriceMap::new();
    for el in doc.select(&SCAN_TARGETS) {
        let text = text_of(el);
        let len = text.chars().count();
        if len <= SCAN_MIN_CHARS || len >= SCAN_MAX_CHARS {
            continue;
        }
        let Some(caps) = PRICE_RE.captures(&text) else {
            continue;
        };
        let (Some(whole), Some(amount)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let material = clean_material(&text[..whole.start()]);
        if is_label(&material) {
            prices.insert(material, format!("{}円", amount.as_str()));
        }
    }
    prices
}

/// Strips phone numbers, URLs, symbols and whitespace from scanned text.
fn clean_material(raw: &str) -> String {
    let without_phone = PHONE_RE.replace_all(raw, "");
    let without_url = URL_RE.replace_all(&without_phone, "");
    SYMBOLS_RE.replace_all(&without_url, "").trim().to_string()
}

fn is_label(material: &str) -> bool {
    !material.is_empty() && material.chars().count() < MAX_MATERIAL_CHARS
}
