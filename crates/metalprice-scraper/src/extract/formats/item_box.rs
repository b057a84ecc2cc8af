//! Boxes whose whole text is "material price円".

use std::sync::LazyLock;

use metalprice_core::{PriceMap, SiteConfig};
use scraper::{Html, Selector};

use crate::extract::dom::select_class_containing;
use crate::price::PRICE_RE;
use crate::text::text_of;

static DIV: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div").expect("valid selector"));

const DEFAULT_BOX_CLASS: &str = "item-box";

pub(in crate::extract) fn extract_item_box(doc: &Html, site: &SiteConfig) -> PriceMap {
    let box_class = site.hints.box_class.as_deref().unwrap_or(DEFAULT_BOX_CLASS);
    let mut prices = PriceMap::new();
    for item in select_class_containing(doc, &DIV, box_class) {
        let text = text_of(item);
        let Some(caps) = PRICE_RE.captures(&text) else {
            continue;
        };
        let (Some(whole), Some(amount)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let mut material = text[..whole.start()].trim();
        if material.is_empty() {
            material = text[whole.end()..].trim();
        }
        if !material.is_empty() {
            prices.insert(material.to_string(), format!("{}円", amount.as_str()));
        }
    }
    prices
}
