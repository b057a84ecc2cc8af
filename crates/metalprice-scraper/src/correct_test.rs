use metalprice_core::{AddEntry, Correction, ModifyEntry, PriceMap};

use super::apply_correction;

fn prices(entries: &[(&str, &str)]) -> PriceMap {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn add(material: &str, price: &str) -> AddEntry {
    AddEntry {
        material: material.to_string(),
        price: price.to_string(),
    }
}

fn modify(material: &str, material_new: Option<&str>, price: Option<&str>) -> ModifyEntry {
    ModifyEntry {
        material: material.to_string(),
        material_new: material_new.map(str::to_string),
        price: price.map(str::to_string),
    }
}

/// Applies edits in the reverse of the overlay's order.
fn apply_reversed(mut map: PriceMap, correction: &Correction) -> PriceMap {
    let add_only = Correction {
        add: correction.add.clone(),
        ..Correction::default()
    };
    let modify_only = Correction {
        modify: correction.modify.clone(),
        ..Correction::default()
    };
    let remove_only = Correction {
        remove: correction.remove.clone(),
        ..Correction::default()
    };
    map = apply_correction(map, &add_only);
    map = apply_correction(map, &modify_only);
    apply_correction(map, &remove_only)
}

// ---------------------------------------------------------------------------
// remove
// ---------------------------------------------------------------------------

#[test]
fn remove_deletes_keys_matching_in_either_direction() {
    let correction = Correction {
        remove: vec!["アルミ缶".to_string(), "真鍮（上）A".to_string()],
        ..Correction::default()
    };
    let result = apply_correction(
        prices(&[
            ("アルミ缶　バラ", "160円"),
            ("アルミ缶　プレス", "170円"),
            ("真鍮", "980円"),
            ("ピカ銅", "1,600円"),
        ]),
        &correction,
    );
    assert_eq!(result, prices(&[("ピカ銅", "1,600円")]));
}

#[test]
fn blank_remove_pattern_is_ignored() {
    let correction = Correction {
        remove: vec!["  ".to_string()],
        ..Correction::default()
    };
    let input = prices(&[("ピカ銅", "1,600円")]);
    assert_eq!(apply_correction(input.clone(), &correction), input);
}

// ---------------------------------------------------------------------------
// modify
// ---------------------------------------------------------------------------

#[test]
fn modify_rename_keeps_extracted_value_verbatim() {
    let correction = Correction {
        modify: vec![modify("アルミ缶　バラ", Some("アルミ缶　プレス"), None)],
        ..Correction::default()
    };
    let result = apply_correction(prices(&[("アルミ缶　バラ", "165円/kg")]), &correction);
    assert_eq!(result, prices(&[("アルミ缶　プレス", "165円/kg")]));
}

#[test]
fn modify_price_is_normalized() {
    let correction = Correction {
        modify: vec![modify("並銅", None, Some("1,441円"))],
        ..Correction::default()
    };
    let result = apply_correction(prices(&[("並銅", "1,310円")]), &correction);
    assert_eq!(result["並銅"], "1441");
}

#[test]
fn modify_finds_key_through_whitespace_drift() {
    let correction = Correction {
        modify: vec![modify("アルミ缶 バラ", Some("アルミ缶　プレス"), Some("176"))],
        ..Correction::default()
    };
    let result = apply_correction(prices(&[("アルミ缶　バラ", "160円")]), &correction);
    assert_eq!(result, prices(&[("アルミ缶　プレス", "176")]));
}

#[test]
fn repeated_rename_leaves_neighbouring_rows_alone() {
    let correction = Correction {
        modify: vec![modify("銅線", Some("上銅線"), None)],
        ..Correction::default()
    };
    let once = apply_correction(
        prices(&[("銅線", "1000円"), ("銅線くず", "800円")]),
        &correction,
    );
    assert_eq!(once, prices(&[("上銅線", "1000円"), ("銅線くず", "800円")]));

    let twice = apply_correction(once.clone(), &correction);
    assert_eq!(once, twice);
}

#[test]
fn repeated_rename_with_price_keeps_the_operator_price() {
    let correction = Correction {
        modify: vec![modify("銅線", Some("上銅線"), Some("1,050円"))],
        ..Correction::default()
    };
    let once = apply_correction(
        prices(&[("銅線", "1000円"), ("銅線くず", "800円")]),
        &correction,
    );
    let twice = apply_correction(once.clone(), &correction);
    assert_eq!(twice, prices(&[("上銅線", "1050"), ("銅線くず", "800円")]));
    assert_eq!(once, twice);
}

#[test]
fn modify_without_match_is_a_no_op() {
    let correction = Correction {
        modify: vec![modify("鉛バッテリー", Some("鉛"), Some("93"))],
        ..Correction::default()
    };
    let input = prices(&[("ピカ銅", "1,600円")]);
    assert_eq!(apply_correction(input.clone(), &correction), input);
}

#[test]
fn modify_on_empty_map_is_a_no_op() {
    let correction = Correction {
        modify: vec![modify("ピカ銅", None, Some("1735"))],
        ..Correction::default()
    };
    assert!(apply_correction(PriceMap::new(), &correction).is_empty());
}

// ---------------------------------------------------------------------------
// add
// ---------------------------------------------------------------------------

#[test]
fn add_succeeds_on_empty_scrape() {
    let correction = Correction {
        add: vec![add("ピカ銅", "1,735円/kg"), add("鉛バッテリー", "93")],
        ..Correction::default()
    };
    let result = apply_correction(PriceMap::new(), &correction);
    assert_eq!(result, prices(&[("ピカ銅", "1735"), ("鉛バッテリー", "93")]));
}

#[test]
fn add_overwrites_extracted_value() {
    let correction = Correction {
        add: vec![add("ピカ銅", "1735")],
        ..Correction::default()
    };
    let result = apply_correction(prices(&[("ピカ銅", "1,577円/kg")]), &correction);
    assert_eq!(result["ピカ銅"], "1735");
}

#[test]
fn add_without_number_keeps_operator_text() {
    let correction = Correction {
        add: vec![add("砲金", "要問合せ")],
        ..Correction::default()
    };
    let result = apply_correction(PriceMap::new(), &correction);
    assert_eq!(result["砲金"], "要問合せ");
}

// ---------------------------------------------------------------------------
// properties
// ---------------------------------------------------------------------------

fn full_correction() -> Correction {
    Correction {
        remove: vec!["雑線".to_string()],
        modify: vec![
            modify("アルミ缶　バラ", Some("アルミ缶　プレス"), None),
            modify("並銅", None, Some("1,441円")),
        ],
        add: vec![add("雑線60%-65%", "1,166円"), add("ピカ銅", "1735")],
    }
}

fn scraped() -> PriceMap {
    prices(&[
        ("ピカ銅", "1,577円/kg"),
        ("並銅", "1,310円/kg"),
        ("雑線60%-65%", "650円/kg"),
        ("雑線80%", "1,000円/kg"),
        ("アルミ缶　バラ", "160円/kg"),
    ])
}

#[test]
fn applying_twice_equals_applying_once() {
    let correction = full_correction();
    let once = apply_correction(scraped(), &correction);
    let twice = apply_correction(once.clone(), &correction);
    assert_eq!(once, twice);
    assert_eq!(
        once,
        prices(&[
            ("ピカ銅", "1735"),
            ("並銅", "1441"),
            ("雑線60%-65%", "1166"),
            ("アルミ缶　プレス", "160円/kg"),
        ])
    );
}

#[test]
fn edit_order_changes_the_result() {
    let correction = full_correction();
    let forward = apply_correction(scraped(), &correction);
    let reversed = apply_reversed(scraped(), &correction);
    // Removing last deletes the authoritative 雑線 price that add just set.
    assert_eq!(forward["雑線60%-65%"], "1166");
    assert!(!reversed.contains_key("雑線60%-65%"));
    assert_ne!(forward, reversed);
}
