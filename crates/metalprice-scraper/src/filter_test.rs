use metalprice_core::{CanonicalItem, PriceMap};

use super::TargetItemMatcher;

fn item(name: &str, keywords: &[&str]) -> CanonicalItem {
    CanonicalItem {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
    }
}

fn vocabulary() -> Vec<CanonicalItem> {
    vec![
        item("ピカ銅", &["ピカ線", "ピカ銅", "1号銅線", "特1号銅"]),
        item("並銅", &["並銅", "込銅"]),
        item("真鍮", &["真鍮", "黄銅"]),
        item("込真鍮", &["込真鍮"]),
        item("雑線80%", &["雑線80%", "電線80%", "80%線"]),
        item("雑線60%-65%", &["雑線60%", "雑線65%", "電線60%", "三本線(A)", "雑線"]),
        item("VA線", &["VA線", "VVF"]),
    ]
}

fn raw(entries: &[(&str, &str)]) -> PriceMap {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

// ---------------------------------------------------------------------------
// matching and specificity
// ---------------------------------------------------------------------------

#[test]
fn exact_keyword_maps_to_item() {
    let matcher = TargetItemMatcher::new(&vocabulary());
    assert_eq!(matcher.classify("ピカ線"), Some("ピカ銅"));
    assert_eq!(matcher.classify("込銅"), Some("並銅"));
}

#[test]
fn exact_match_beats_longer_overlapping_keyword() {
    let matcher = TargetItemMatcher::new(&vocabulary());
    // "込真鍮" contains "真鍮", but only the shorter keyword is exact.
    assert_eq!(matcher.classify("真鍮"), Some("真鍮"));
}

#[test]
fn longer_contained_keyword_is_more_specific() {
    let matcher = TargetItemMatcher::new(&vocabulary());
    assert_eq!(matcher.classify("込真鍮(A)"), Some("込真鍮"));
}

#[test]
fn case_is_ignored() {
    let matcher = TargetItemMatcher::new(&vocabulary());
    assert_eq!(matcher.classify("va線（巻物）"), Some("VA線"));
    assert_eq!(matcher.classify("vvfケーブル"), Some("VA線"));
}

#[test]
fn bracket_stripped_forms_match() {
    let matcher = TargetItemMatcher::new(&vocabulary());
    // Neither full form contains the other; "三本線" == "三本線" once the
    // bracketed grades are removed.
    assert_eq!(matcher.classify("三本線(B)"), Some("雑線60%-65%"));
}

#[test]
fn full_width_digits_are_normalized() {
    let matcher = TargetItemMatcher::new(&vocabulary());
    assert_eq!(matcher.classify("１号銅線"), Some("ピカ銅"));
    assert_eq!(matcher.classify("電線８０%"), Some("雑線80%"));
}

#[test]
fn ties_keep_first_item() {
    let items = vec![item("アルミサッシ", &["アルミ"]), item("アルミホイール", &["アルミ"])];
    let matcher = TargetItemMatcher::new(&items);
    assert_eq!(matcher.classify("アルミ"), Some("アルミサッシ"));
}

#[test]
fn bracket_only_names_never_match() {
    let matcher = TargetItemMatcher::new(&vocabulary());
    assert_eq!(matcher.classify("（お問い合わせ）"), None);
}

#[test]
fn unrelated_material_is_unrecognized() {
    let matcher = TargetItemMatcher::new(&vocabulary());
    assert_eq!(matcher.classify("鉄スクラップ"), None);
}

// ---------------------------------------------------------------------------
// percent gating and hard exclusion
// ---------------------------------------------------------------------------

#[test]
fn percent_keywords_require_aligned_band() {
    let items = vec![
        item("雑線80%", &["雑線80%"]),
        item("雑線60%-65%", &["雑線60%", "雑線65%"]),
    ];
    let matcher = TargetItemMatcher::new(&items);
    // "雑線" is contained in every keyword, but no band is present.
    assert_eq!(matcher.classify("雑線"), None);
    assert_eq!(matcher.classify("雑線80%"), Some("雑線80%"));
    assert_eq!(matcher.classify("雑線65%(被覆)"), Some("雑線60%-65%"));
}

#[test]
fn percent_band_is_not_absorbed_by_other_band() {
    let matcher = TargetItemMatcher::new(&vocabulary());
    assert_eq!(matcher.classify("電線60%"), Some("雑線60%-65%"));
    assert_eq!(matcher.classify("雑線80%"), Some("雑線80%"));
}

#[test]
fn seventy_percent_is_excluded_before_scoring() {
    // Both keywords would otherwise match "70%線".
    let items = vec![item("雑線", &["70%線", "線"])];
    let matcher = TargetItemMatcher::new(&items);
    assert_eq!(matcher.classify("雑線"), Some("雑線"));
    assert_eq!(matcher.classify("70%線"), None);
    assert_eq!(matcher.classify("雑線７０％"), None);

    let filtered = matcher.filter(&raw(&[("70%線", "700円"), ("70％線", "700円")]));
    assert!(filtered.is_empty());
}

// ---------------------------------------------------------------------------
// filter
// ---------------------------------------------------------------------------

#[test]
fn filter_keys_output_by_canonical_name_and_keeps_price_text() {
    let matcher = TargetItemMatcher::new(&vocabulary());
    let filtered = matcher.filter(&raw(&[
        ("ピカ線", "1,600円/kg"),
        ("込銅", "1,450円"),
        ("鉄スクラップ", "40円"),
    ]));
    assert_eq!(filtered.len(), 2);
    assert_eq!(filtered["ピカ銅"], "1,600円/kg");
    assert_eq!(filtered["並銅"], "1,450円");
}

#[test]
fn each_item_is_filled_once_by_first_entry() {
    let matcher = TargetItemMatcher::new(&vocabulary());
    let filtered = matcher.filter(&raw(&[("ピカ線", "1,600円"), ("特1号銅", "1,620円")]));
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered["ピカ銅"], "1,600円");
}

#[test]
fn identical_normalized_names_fill_at_most_one_item() {
    let matcher = TargetItemMatcher::new(&vocabulary());
    // The second spelling would otherwise fall through to the generic "雑線"
    // keyword of another item once 雑線80% is filled.
    let filtered = matcher.filter(&raw(&[("雑線80%", "1,100円"), ("雑線８０%", "1,090円")]));
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered["雑線80%"], "1,100円");
}

#[test]
fn no_two_items_share_a_raw_entry() {
    let matcher = TargetItemMatcher::new(&vocabulary());
    let input = raw(&[
        ("ピカ線", "1,600円"),
        ("並銅", "1,450円"),
        ("真鍮", "980円"),
        ("込真鍮(A)", "950円"),
        ("雑線80%", "1,100円"),
        ("三本線(A)", "700円"),
        ("VA線", "600円"),
    ]);
    let filtered = matcher.filter(&input);
    assert_eq!(filtered.len(), input.len());
    let names: Vec<&str> = filtered.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec!["ピカ銅", "並銅", "真鍮", "込真鍮", "雑線80%", "雑線60%-65%", "VA線"]
    );
}

#[test]
fn shipped_vocabulary_maps_common_spellings() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("target_items.yaml");
    let items = metalprice_core::load_target_items(&path).unwrap();
    let matcher = TargetItemMatcher::new(&items.target_items);

    let cases = [
        ("ピカ線", "ピカ銅"),
        ("1号銅線（ピカ線）", "ピカ銅"),
        ("込銅", "並銅"),
        ("砲金", "砲金"),
        ("黄銅", "真鍮"),
        ("電線A（80%以上）", "雑線80%"),
        ("三本線A（60%）", "雑線60%-65%"),
        ("VVFケーブル", "VA線"),
        ("アルミホイール", "アルミホイール"),
        ("アルミサッシ", "アルミサッシ"),
        ("アルミ缶（プレス）", "アルミ缶　プレス"),
        ("アルミ缶（バラ）", "アルミ缶　バラ"),
        ("SUS304", "ステンレス304"),
        ("バッテリー", "鉛バッテリー"),
    ];
    for (material, expected) in cases {
        assert_eq!(matcher.classify(material), Some(expected), "{material}");
    }
    assert_eq!(matcher.classify("雑線70%"), None);
}
