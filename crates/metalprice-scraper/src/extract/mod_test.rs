use metalprice_core::SelectorHints;

use super::*;

fn site(category: u8, extractor_type: Option<&str>) -> SiteConfig {
    SiteConfig {
        name: "テスト金属".to_string(),
        urls: vec!["https://example.com/price".to_string()],
        category,
        extractor_type: extractor_type.map(str::to_string),
        region: String::new(),
        hints: SelectorHints::default(),
    }
}

const LIST_PAGE: &str = "<html><body><ul><li>真鍮 1100円</li></ul></body></html>";

#[test]
fn builtin_registry_has_every_strategy() {
    let registry = StrategyRegistry::with_builtin();
    assert_eq!(
        registry.ids(),
        vec![
            "auto",
            "card_list",
            "haruhi_table",
            "houyama_dl",
            "item_box",
            "kaneda_figcaption",
            "kousyo_box",
            "table",
            "touhoku_div",
            "touki_dl",
            "yagi_table",
        ]
    );
}

#[test]
fn unknown_strategy_falls_back_to_auto() {
    let registry = StrategyRegistry::with_builtin();
    let site = site(2, Some("no_such_layout"));
    assert_eq!(registry.effective_id(&site), "auto");
    let prices = registry.extract_html(LIST_PAGE, &site);
    assert_eq!(prices["真鍮"], "1100円");
}

#[test]
fn auto_reads_value_class_hint() {
    let registry = StrategyRegistry::with_builtin();
    let page = concat!(
        "<html><body>",
        r#"<div><p>ピカ線</p><span class="num">1,600</span></div>"#,
        r#"<div><p>込銅</p><span class="MP-value">1,450</span></div>"#,
        "</body></html>",
    );

    let mut hinted = site(2, None);
    hinted.hints.value_class = Some("num".to_string());
    let prices = registry.extract_html(page, &hinted);
    assert_eq!(prices.len(), 1);
    assert_eq!(prices["ピカ線"], "1,600円");

    let prices = registry.extract_html(page, &site(2, None));
    assert_eq!(prices.len(), 1);
    assert_eq!(prices["込銅"], "1,450円");
}

#[test]
fn named_strategy_does_not_fall_back_to_auto() {
    let registry = StrategyRegistry::with_builtin();
    let prices = registry.extract_html(LIST_PAGE, &site(2, Some("kousyo_box")));
    assert!(prices.is_empty());
}

#[test]
fn div_list_resolves_per_category() {
    let registry = StrategyRegistry::with_builtin();
    assert_eq!(registry.effective_id(&site(1, Some("div_list"))), "card_list");
    assert_eq!(registry.effective_id(&site(2, Some("div_list"))), "item_box");
    assert_eq!(registry.effective_id(&site(1, None)), "table");
    assert_eq!(registry.effective_id(&site(2, None)), "auto");
}

#[test]
fn registered_strategy_is_dispatched_by_id() {
    let mut registry = StrategyRegistry::new();
    registry.register("fixed", |_, site| {
        PriceMap::from([(site.name.clone(), "1円".to_string())])
    });
    let prices = registry.extract_html("<p></p>", &site(2, Some("fixed")));
    assert_eq!(prices["テスト金属"], "1円");
}

#[test]
fn empty_registry_extracts_nothing() {
    let registry = StrategyRegistry::new();
    assert!(registry.extract_html(LIST_PAGE, &site(2, None)).is_empty());
}
