//! `figure > figcaption > div.span_9 > strong` captions with tax-excluded
//! prices. Prices are converted to tax-included amounts per kilogram.

use std::sync::LazyLock;

use metalprice_core::PriceMap;
use regex::Regex;
use rust_decimal::Decimal;
use scraper::{Html, Selector};

use crate::extract::dom::first;
use crate::price::{format_whole, is_range, max_amount, parse_amount, tax_inclusive, PRICE_RE};
use crate::text::text_of;

static FIGURE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("figure").expect("valid selector"));
static CAPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("figcaption").expect("valid selector"));
static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.span_9").expect("valid selector"));
static STRONG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("strong").expect("valid selector"));

static LEADING_MARKS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[▲△■□●○★☆]+").expect("valid regex"));

/// Flat per-kilogram surcharge on loose aluminum cans, added before tax.
const LOOSE_CAN_SURCHARGE: i64 = 5;

pub(in crate::extract) fn extract_kaneda_figcaption(doc: &Html) -> PriceMap {
    let mut prices = PriceMap::new();
    for figure in doc.select(&FIGURE) {
        let Some(body) = first(figure, &CAPTION).and_then(|caption| first(caption, &BODY)) else {
            continue;
        };
        let strongs: Vec<String> = body.select(&STRONG).map(text_of).collect();
        let Some(label) = strongs.first() else {
            continue;
        };
        let material = LEADING_MARKS_RE.replace(label, "").trim().to_string();
        if material.is_empty() {
            continue;
        }

        for text in &strongs {
            if !(text.contains("単価") || text.contains('円')) {
                continue;
            }
            let Some(amount) = PRICE_RE.captures(text).and_then(|caps| caps.get(1)) else {
                continue;
            };
            let price = tax_included_price(&material, text, amount.as_str());
            prices.insert(material.clone(), price);
            break;
        }
    }
    prices
}

fn tax_included_price(material: &str, text: &str, amount: &str) -> String {
    let base = if is_range(text) {
        max_amount(text).or_else(|| parse_amount(amount))
    } else {
        parse_amount(amount)
    };
    let Some(base) = base else {
        return format!("{amount}円/kg");
    };
    let surcharge = if is_loose_can(material) {
        Decimal::from(LOOSE_CAN_SURCHARGE)
    } else {
        Decimal::ZERO
    };
    format!("{}円/kg", format_whole(tax_inclusive(base, surcharge)))
}

fn is_loose_can(material: &str) -> bool {
    material.contains('缶') && material.contains("バラ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn figure(label: &str, price: &str) -> String {
        format!(
            r#"<figure><img src="x.jpg"><figcaption><div class="span_9"><strong>{label}</strong><br><strong>{price}</strong></div></figcaption></figure>"#
        )
    }

    #[test]
    fn converts_single_price_to_tax_included() {
        let doc = Html::parse_document(&figure("▲ピカ線", "単価：1,577円/kg"));
        let prices = extract_kaneda_figcaption(&doc);
        assert_eq!(prices["ピカ線"], "1735円/kg");
    }

    #[test]
    fn range_takes_maximum_before_tax() {
        let doc = Html::parse_document(&figure("並銅", "単価：1,400〜1,500円/kg"));
        let prices = extract_kaneda_figcaption(&doc);
        assert_eq!(prices["並銅"], "1650円/kg");
    }

    #[test]
    fn loose_cans_get_surcharge_before_tax() {
        let doc = Html::parse_document(&figure("★アルミ缶（バラ）", "単価：265円/kg"));
        let prices = extract_kaneda_figcaption(&doc);
        assert_eq!(prices["アルミ缶（バラ）"], "297円/kg");
    }

    #[test]
    fn pressed_cans_get_no_surcharge() {
        let doc = Html::parse_document(&figure("アルミ缶（プレス）", "単価：315円/kg"));
        let prices = extract_kaneda_figcaption(&doc);
        assert_eq!(prices["アルミ缶（プレス）"], "346円/kg");
    }

    #[test]
    fn figures_without_caption_body_are_skipped() {
        let doc = Html::parse_document(
            "<figure><figcaption><strong>真鍮</strong><strong>900円</strong></figcaption></figure>",
        );
        assert!(extract_kaneda_figcaption(&doc).is_empty());
    }
}
