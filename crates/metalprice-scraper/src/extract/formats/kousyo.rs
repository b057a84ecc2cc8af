//! `div.box` cards: `p.item` material, `p.price` amount with the unit in
//! `<small>`.

use std::sync::LazyLock;

use metalprice_core::PriceMap;
use scraper::{Html, Selector};

use crate::extract::dom::first;
use crate::price::first_amount;
use crate::text::{text_excluding, text_of};

static BOX: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.box").expect("valid selector"));
static ITEM_P: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p.item").expect("valid selector"));
static PRICE_P: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p.price").expect("valid selector"));
static SMALL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("small").expect("valid selector"));

pub(in crate::extract) fn extract_kousyo_box(doc: &Html) -> PriceMap {
    let mut prices = PriceMap::new();
    for card in doc.select(&BOX) {
        let Some(item_p) = first(card, &ITEM_P) else {
            continue;
        };
        let material = text_excluding(item_p, "small");
        let Some(price_p) = first(card, &PRICE_P) else {
            continue;
        };

        let unit = first(price_p, &SMALL).map(text_of).unwrap_or_default();
        let value = text_excluding(price_p, "small");
        let Some(amount) = first_amount(&value) else {
            continue;
        };
        let unit = if unit.is_empty() { "円" } else { unit.as_str() };
        if !material.is_empty() {
            prices.insert(material, format!("{amount}{unit}"));
        }
    }
    prices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_comes_from_small_and_item_note_is_dropped() {
        let doc = Html::parse_document(concat!(
            r#"<div class="box"><p class="item">込銅<br><small>(被覆なし)</small></p>"#,
            r#"<p class="price">1,450<small>円/kg</small></p></div>"#,
        ));
        let prices = extract_kousyo_box(&doc);
        assert_eq!(prices["込銅"], "1,450円/kg");
    }

    #[test]
    fn missing_unit_defaults_to_yen() {
        let doc = Html::parse_document(
            r#"<div class="box"><p class="item">真鍮</p><p class="price">980</p></div>"#,
        );
        assert_eq!(extract_kousyo_box(&doc)["真鍮"], "980円");
    }
}
