//! Correction overlay: operator-authored per-vendor edits applied after
//! extraction.
//!
//! Edits run in the fixed order remove, modify, add. `add` runs last so an
//! authoritative price always survives; `modify` runs before it so a rename
//! cannot clobber an added price. Patterns that match nothing are no-ops,
//! which keeps a correction re-appliable after a vendor page changes shape.

use metalprice_core::fuzzy::{best_match, same_name};
use metalprice_core::{Correction, PriceMap};

use crate::price::normalize_price;

/// Applies `correction` to `prices` and returns the corrected map.
#[must_use]
pub fn apply_correction(mut prices: PriceMap, correction: &Correction) -> PriceMap {
    for pattern in &correction.remove {
        remove_matching(&mut prices, pattern);
    }
    for edit in &correction.modify {
        modify_best_match(
            &mut prices,
            &edit.material,
            edit.material_new.as_deref(),
            edit.price.as_deref(),
        );
    }
    for edit in &correction.add {
        let material = edit.material.trim().to_string();
        let price = operator_price(&edit.price);
        tracing::debug!(material, price, "correction add");
        prices.insert(material, price);
    }
    prices
}

/// Deletes every key that contains `pattern` or is contained in it.
fn remove_matching(prices: &mut PriceMap, pattern: &str) {
    let pattern = pattern.trim();
    if pattern.is_empty() {
        return;
    }
    prices.retain(|key, _| {
        let matched = !key.is_empty() && (key.contains(pattern) || pattern.contains(key.as_str()));
        if matched {
            tracing::debug!(material = key.as_str(), pattern, "correction remove");
        }
        !matched
    });
}

fn modify_best_match(
    prices: &mut PriceMap,
    material: &str,
    material_new: Option<&str>,
    price: Option<&str>,
) {
    let new_key = material_new.map(str::trim).filter(|k| !k.is_empty());

    // An earlier run already renamed the row; a looser match now would
    // capture some other row.
    if let Some(new_key) = new_key {
        let renamed = prices.contains_key(new_key)
            && !prices.keys().any(|key| same_name(material, key));
        if renamed {
            tracing::debug!(material, to = new_key, "correction rename already applied");
            if let Some(price) = price {
                prices.insert(new_key.to_string(), operator_price(price));
            }
            return;
        }
    }

    let Some(idx) = best_match(material, prices.keys().map(String::as_str)) else {
        tracing::debug!(material, "correction modify matched nothing");
        return;
    };
    let Some(current) = prices.get_index(idx).map(|(key, _)| key.clone()) else {
        return;
    };

    let mut target = current.clone();
    if let Some(new_key) = new_key {
        if new_key != current {
            if let Some(value) = prices.shift_remove(&current) {
                tracing::debug!(from = current.as_str(), to = new_key, "correction rename");
                prices.insert(new_key.to_string(), value);
            }
            target = new_key.to_string();
        }
    }

    if let Some(price) = price {
        let price = operator_price(price);
        tracing::debug!(material = target.as_str(), price, "correction reprice");
        prices.insert(target, price);
    }
}

/// Operator prices are stored normalized; text without any number is kept
/// as written.
fn operator_price(raw: &str) -> String {
    let normalized = normalize_price(raw);
    if normalized.is_empty() {
        raw.trim().to_string()
    } else {
        normalized
    }
}

#[cfg(test)]
#[path = "correct_test.rs"]
mod tests;
