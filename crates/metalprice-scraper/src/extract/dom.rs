//! Small DOM helpers over `scraper`.

use scraper::{ElementRef, Html, Selector};

/// Parses a selector taken from site configuration. Invalid selectors are
/// reported and treated as matching nothing.
pub(super) fn hint_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(error) => {
            tracing::warn!(selector = css, error = %error, "invalid selector hint");
            None
        }
    }
}

/// First descendant of `el` matching `selector`.
pub(super) fn first<'a>(el: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    el.select(selector).next()
}

/// `true` when any class token of `el` contains `needle`.
pub(super) fn class_contains(el: ElementRef<'_>, needle: &str) -> bool {
    el.value().classes().any(|class| class.contains(needle))
}

/// Elements matching `selector` whose class list has a token containing
/// `needle`.
pub(super) fn select_class_containing<'a>(
    doc: &'a Html,
    selector: &'a Selector,
    needle: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    doc.select(selector)
        .filter(move |el| class_contains(*el, needle))
}
