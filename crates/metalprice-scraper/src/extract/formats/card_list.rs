//! Card grids where each card's text spans read "material price円".

use std::sync::LazyLock;

use metalprice_core::{PriceMap, SiteConfig};
use scraper::{ElementRef, Html, Selector};

use crate::extract::dom::{first, hint_selector};
use crate::price::PRICE_RE;
use crate::text::{collapse_whitespace, text_of};

static SPAN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span").expect("valid selector"));
static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h3").expect("valid selector"));

const DEFAULT_CONTAINER: &str = ".s_card-topImg-4col";
const DEFAULT_ITEM: &str = ".m_card-topImg";
const DEFAULT_TEXT: &str = ".e_txt";
/// A label found after the price is only trusted when it is this short.
const MAX_TRAILING_LABEL_CHARS: usize = 20;

pub(in crate::extract) fn extract_card_list(doc: &Html, site: &SiteConfig) -> PriceMap {
    let hints = &site.hints;
    let container_css = hints.container_selector.as_deref().unwrap_or(DEFAULT_CONTAINER);
    let item_css = hints.item_selector.as_deref().unwrap_or(DEFAULT_ITEM);
    let text_css = hints.text_selector.as_deref().unwrap_or(DEFAULT_TEXT);

    let (Some(item_selector), Some(text_selector)) =
        (hint_selector(item_css), hint_selector(text_css))
    else {
        return PriceMap::new();
    };

    // An empty container hint means "search the whole page".
    let containers: Vec<ElementRef<'_>> = if container_css.trim().is_empty() {
        vec![doc.root_element()]
    } else {
        let Some(container_selector) = hint_selector(container_css) else {
            return PriceMap::new();
        };
        doc.select(&container_selector).collect()
    };

    let mut prices = PriceMap::new();
    for container in containers {
        for item in container.select(&item_selector) {
            let category = first(item, &HEADING).map(text_of);
            for text_el in item.select(&text_selector) {
                for span in text_el.select(&SPAN) {
                    let Some((material, price)) = split_card_text(&text_of(span)) else {
                        continue;
                    };
                    let key = match category.as_deref() {
                        Some(category) if hints.include_category && !category.is_empty() => {
                            format!("{category} - {material}")
                        }
                        _ => material,
                    };
                    prices.insert(key, price);
                }
            }
        }
    }
    prices
}

/// Splits "material 1,234円" into its label and `1,234円`. The label may
/// also trail the price when nothing precedes it.
fn split_card_text(text: &str) -> Option<(String, String)> {
    let caps = PRICE_RE.captures(text)?;
    let whole = caps.get(0)?;
    let amount = caps.get(1)?;

    let mut material = text[..whole.start()].trim();
    if material.is_empty() {
        let after = text[whole.end()..].trim();
        if after.chars().count() < MAX_TRAILING_LABEL_CHARS {
            material = after;
        }
    }
    let material = collapse_whitespace(material);
    if material.is_empty() {
        return None;
    }
    Some((material, format!("{}円", amount.as_str())))
}
