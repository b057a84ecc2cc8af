//! `dl.item_list` blocks: material in `<dt>`, priced `<p class="price">` in
//! a `<dd>`. The unit written after the amount is kept.

use std::sync::LazyLock;

use metalprice_core::PriceMap;
use regex::Regex;
use scraper::{Html, Selector};

use crate::extract::dom::first;
use crate::text::{clean_price, is_price, text_of};

static ITEM_LIST: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("dl.item_list").expect("valid selector"));
static TERM: LazyLock<Selector> = LazyLock::new(|| Selector::parse("dt").expect("valid selector"));
static DEFINITION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("dd").expect("valid selector"));
static P: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").expect("valid selector"));
static PRICE_P: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p.price").expect("valid selector"));
static SPAN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span").expect("valid selector"));

static PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"買取価格[：:]?\s*").expect("valid regex"));
static PRICE_WITH_UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,4}(?:[,，]\d{3})*(?:\.\d+)?)\s*([円¥]/?[a-zA-Z]*)").expect("valid regex")
});

pub(in crate::extract) fn extract_touki_dl(doc: &Html) -> PriceMap {
    let mut prices = PriceMap::new();
    for list in doc.select(&ITEM_LIST) {
        let Some(term) = first(list, &TERM) else {
            continue;
        };
        let material = first(term, &P).map_or_else(|| text_of(term), text_of);

        for definition in list.select(&DEFINITION) {
            let Some(price_p) = first(definition, &PRICE_P) else {
                continue;
            };
            let price = match first(price_p, &SPAN) {
                Some(span) => {
                    let full = text_of(price_p);
                    let full = PREFIX_RE.replace_all(&full, "");
                    PRICE_WITH_UNIT_RE.captures(&full).map_or_else(
                        || clean_price(&text_of(span)),
                        |caps| format!("{}{}", &caps[1], &caps[2]),
                    )
                }
                None => clean_price(&PREFIX_RE.replace_all(&text_of(price_p), "")),
            };

            if is_price(&price) || price.chars().any(|c| c.is_ascii_digit()) {
                if !material.is_empty() && !price.is_empty() {
                    prices.insert(material.clone(), price);
                }
                break;
            }
        }
    }
    prices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_unit_and_strips_prefix() {
        let doc = Html::parse_document(concat!(
            r#"<dl class="item_list"><dt><img src="a.jpg"><p>ピカ線</p></dt>"#,
            r#"<dd><p class="price">買取価格：<span>1,600</span>円/kg</p></dd></dl>"#,
        ));
        let prices = extract_touki_dl(&doc);
        assert_eq!(prices["ピカ線"], "1,600円/kg");
    }

    #[test]
    fn price_without_span_uses_paragraph_text() {
        let doc = Html::parse_document(concat!(
            r#"<dl class="item_list"><dt>真鍮</dt>"#,
            r#"<dd><p class="note">状態により変動</p></dd>"#,
            r#"<dd><p class="price">買取価格: 980円</p></dd></dl>"#,
        ));
        let prices = extract_touki_dl(&doc);
        assert_eq!(prices["真鍮"], "980円");
    }

    #[test]
    fn lists_without_price_are_skipped() {
        let doc = Html::parse_document(
            r#"<dl class="item_list"><dt>鉛</dt><dd><p class="price">お問い合わせ</p></dd></dl>"#,
        );
        assert!(extract_touki_dl(&doc).is_empty());
    }
}
