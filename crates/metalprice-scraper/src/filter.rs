//! Target-item filter: maps vendor-specific material names onto the
//! canonical item vocabulary.
//!
//! Keyword sets overlap between items, so every raw name is scored against
//! all keywords of all still-unfilled items and the most specific match
//! wins. Each canonical item is filled at most once per run.

use std::collections::HashSet;
use std::sync::LazyLock;

use metalprice_core::{CanonicalItem, PriceMap};
use regex::Regex;

use crate::text::normalize_digits;

static BRACKETED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[（(].*?[）)]").expect("valid regex"));

/// Copper-content band that never belongs to any canonical item.
const EXCLUDED_BANDS: [&str; 2] = ["70%", "70％"];

const EXACT_BONUS: usize = 100;
const CONTAINS_BONUS: usize = 50;

/// One spelling prepared for comparison.
#[derive(Debug, Clone)]
struct Variants {
    normalized: String,
    lower: String,
    stripped_lower: String,
}

impl Variants {
    fn new(raw: &str) -> Self {
        let normalized = normalize_digits(raw);
        let lower = normalized.to_lowercase();
        let stripped_lower = BRACKETED_RE.replace_all(&normalized, "").to_lowercase();
        Self {
            normalized,
            lower,
            stripped_lower,
        }
    }

    /// Containment in either direction, on full and bracket-stripped forms.
    /// An empty needle never matches.
    fn overlaps(&self, other: &Self) -> bool {
        contains_non_empty(&other.lower, &self.lower)
            || contains_non_empty(&self.lower, &other.lower)
            || contains_non_empty(&other.stripped_lower, &self.stripped_lower)
            || contains_non_empty(&self.stripped_lower, &other.stripped_lower)
    }
}

fn contains_non_empty(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.contains(needle)
}

fn percent_normalized(s: &str) -> String {
    s.replace('％', "%")
}

#[derive(Debug, Clone)]
struct Keyword {
    variants: Variants,
    /// Percent-normalized keyword, set only for percent-bearing keywords.
    percent: Option<String>,
    chars: usize,
}

#[derive(Debug, Clone)]
struct PreparedItem {
    name: String,
    /// Longest keyword first.
    keywords: Vec<Keyword>,
}

/// Canonical vocabulary prepared once per run.
#[derive(Debug, Clone)]
pub struct TargetItemMatcher {
    items: Vec<PreparedItem>,
}

impl TargetItemMatcher {
    #[must_use]
    pub fn new(items: &[CanonicalItem]) -> Self {
        let items = items
            .iter()
            .map(|item| {
                let mut keywords: Vec<Keyword> = item
                    .keywords
                    .iter()
                    .map(|raw| {
                        let variants = Variants::new(raw);
                        let percent = (variants.normalized.contains('%')
                            || variants.normalized.contains('％'))
                        .then(|| percent_normalized(&variants.normalized));
                        Keyword {
                            variants,
                            percent,
                            chars: raw.chars().count(),
                        }
                    })
                    .collect();
                // Stable: equal-length keywords keep configuration order.
                keywords.sort_by(|a, b| b.chars.cmp(&a.chars));
                PreparedItem {
                    name: item.name.clone(),
                    keywords,
                }
            })
            .collect();
        Self { items }
    }

    /// Keeps only entries that map to a canonical item, keyed by the
    /// canonical name. Entries are visited in map order; the first entry to
    /// claim an item fills it and later claimants are dropped.
    #[must_use]
    pub fn filter(&self, raw: &PriceMap) -> PriceMap {
        let mut filtered = PriceMap::new();
        let mut seen_names: HashSet<String> = HashSet::new();

        for (material, price) in raw {
            let name = Variants::new(material);
            // Textually identical names (after normalization) get one chance.
            if !seen_names.insert(name.normalized.clone()) {
                continue;
            }
            match self.best_item(&name, |item| filtered.contains_key(item)) {
                Some(item) => {
                    tracing::debug!(material, item, "matched target item");
                    filtered.insert(item.to_string(), price.clone());
                }
                None => tracing::debug!(material, "unrecognized material"),
            }
        }
        filtered
    }

    /// The canonical item `material` would map to on its own, ignoring
    /// which items other entries have already filled.
    #[must_use]
    pub fn classify(&self, material: &str) -> Option<&str> {
        self.best_item(&Variants::new(material), |_| false)
    }

    fn best_item(&self, name: &Variants, is_filled: impl Fn(&str) -> bool) -> Option<&str> {
        if EXCLUDED_BANDS.iter().any(|band| name.normalized.contains(band)) {
            return None;
        }

        let name_percent = percent_normalized(&name.normalized);
        let stripped_percent =
            percent_normalized(&BRACKETED_RE.replace_all(&name.normalized, ""));

        let mut best: Option<(&str, usize)> = None;
        for item in &self.items {
            if is_filled(&item.name) {
                continue;
            }
            for keyword in &item.keywords {
                if !keyword.variants.overlaps(name) {
                    continue;
                }

                let kw = &keyword.variants;
                let score = if let Some(kw_percent) = &keyword.percent {
                    // Percent bands must line up exactly, not just overlap.
                    if !(name_percent.contains(kw_percent.as_str())
                        || stripped_percent.contains(kw_percent.as_str()))
                    {
                        continue;
                    }
                    let exact = kw.normalized == name.normalized || *kw_percent == name_percent;
                    keyword.chars + if exact { EXACT_BONUS } else { 0 }
                } else if kw.normalized == name.normalized || kw.lower == name.lower {
                    keyword.chars + EXACT_BONUS
                } else if name.lower.contains(kw.lower.as_str()) {
                    keyword.chars + CONTAINS_BONUS
                } else {
                    keyword.chars
                };

                if best.is_none_or(|(_, best_score)| score > best_score) {
                    best = Some((item.name.as_str(), score));
                }
                break;
            }
        }
        best.map(|(item, _)| item)
    }
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
