//! Observed-name → canonical-item mapping report for reviewing the filter.

use std::fmt;

use metalprice_core::PriceMap;
use serde::Serialize;

use crate::filter::TargetItemMatcher;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingRow {
    pub company: String,
    pub material: String,
    pub price: String,
    /// `None` when the material maps to no canonical item.
    pub canonical: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MappingReport {
    pub rows: Vec<MappingRow>,
}

impl MappingReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies every raw entry scraped for `company`.
    pub fn add_company(&mut self, company: &str, raw: &PriceMap, matcher: &TargetItemMatcher) {
        self.rows.extend(raw.iter().map(|(material, price)| MappingRow {
            company: company.to_string(),
            material: material.clone(),
            price: price.clone(),
            canonical: matcher.classify(material).map(str::to_string),
        }));
    }

    pub fn unmatched(&self) -> impl Iterator<Item = &MappingRow> {
        self.rows.iter().filter(|row| row.canonical.is_none())
    }

    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.rows.len() - self.unmatched().count()
    }
}

impl fmt::Display for MappingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut company: Option<&str> = None;
        for row in &self.rows {
            if company != Some(row.company.as_str()) {
                writeln!(f, "== {}", row.company)?;
                company = Some(row.company.as_str());
            }
            writeln!(
                f,
                "  {} ({}) -> {}",
                row.material,
                row.price,
                row.canonical.as_deref().unwrap_or("unmatched")
            )?;
        }

        let unmatched: Vec<&MappingRow> = self.unmatched().collect();
        writeln!(
            f,
            "\n{} entries, {} matched, {} unmatched",
            self.rows.len(),
            self.matched_count(),
            unmatched.len()
        )?;
        for row in unmatched {
            writeln!(f, "  [{}] {} ({})", row.company, row.material, row.price)?;
        }
        Ok(())
    }
}
