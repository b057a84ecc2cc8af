//! Text helpers shared by the extraction strategies.

use scraper::ElementRef;

/// Concatenates the element's descendant text nodes, each trimmed, skipping
/// empty ones.
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Like [`text_of`], but ignores text inside descendant `<tag>` elements.
pub(crate) fn text_excluding(el: ElementRef<'_>, tag: &str) -> String {
    let mut parts = Vec::new();
    push_text_excluding(el, tag, &mut parts);
    parts.concat()
}

fn push_text_excluding<'a>(el: ElementRef<'a>, tag: &str, parts: &mut Vec<&'a str>) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed);
            }
        } else if let Some(child_el) = ElementRef::wrap(child) {
            if child_el.value().name() != tag {
                push_text_excluding(child_el, tag, parts);
            }
        }
    }
}

/// Maps full-width digits `０`-`９` to ASCII.
pub(crate) fn normalize_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '０'..='９' => char::from_u32(u32::from(c) - u32::from('０') + u32::from('0')).unwrap_or(c),
            other => other,
        })
        .collect()
}

/// A price cell holds at least one digit and a currency marker.
pub(crate) fn is_price(text: &str) -> bool {
    let has_digit = text.chars().any(|c| c.is_ascii_digit() || ('０'..='９').contains(&c));
    let has_yen = text.contains('円') || text.contains('¥') || text.to_lowercase().contains("yen");
    has_digit && has_yen
}

pub(crate) fn clean_price(text: &str) -> String {
    text.trim().replace('\u{3000}', " ")
}

/// Collapses every whitespace run to one ASCII space and trims.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::*;

    #[test]
    fn text_of_joins_trimmed_fragments() {
        let html = Html::parse_fragment("<p> ピカ線 <b> 1,600円 </b>\n</p>");
        let sel = Selector::parse("p").unwrap();
        let p = html.select(&sel).next().unwrap();
        assert_eq!(text_of(p), "ピカ線1,600円");
    }

    #[test]
    fn text_excluding_skips_small() {
        let html = Html::parse_fragment("<p>込銅<small>(被覆なし)</small></p>");
        let sel = Selector::parse("p").unwrap();
        let p = html.select(&sel).next().unwrap();
        assert_eq!(text_excluding(p, "small"), "込銅");
    }

    #[test]
    fn normalize_digits_maps_full_width() {
        assert_eq!(normalize_digits("雑線８０％"), "雑線80％");
    }

    #[test]
    fn is_price_requires_digit_and_currency() {
        assert!(is_price("1,600円"));
        assert!(is_price("¥980"));
        assert!(is_price("120 YEN"));
        assert!(!is_price("お問い合わせ下さい円"));
        assert!(!is_price("1600"));
    }

    #[test]
    fn clean_price_folds_full_width_space() {
        assert_eq!(clean_price(" 1,600円　/kg "), "1,600円 /kg");
    }
}
