//! Company × material matrix built from one run's records.

use indexmap::IndexSet;
use metalprice_core::CompanyPriceRecord;
use serde::{Deserialize, Serialize};

use crate::price::normalize_price;

/// Success/failure counts for a run. A record counts as succeeded when it
/// carries at least one price, regardless of fetch errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub total_prices: usize,
}

impl RunSummary {
    #[must_use]
    pub fn from_records(records: &[CompanyPriceRecord]) -> Self {
        records.iter().fold(Self::default(), |mut summary, record| {
            if record.prices.is_empty() {
                summary.failed += 1;
            } else {
                summary.succeeded += 1;
            }
            summary.total_prices += record.price_count();
            summary
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixRow {
    pub company: String,
    pub region: String,
    /// One cell per column; `None` where the company has no price.
    pub cells: Vec<Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceMatrix {
    pub columns: Vec<String>,
    pub rows: Vec<MatrixRow>,
}

impl PriceMatrix {
    /// Columns are `canonical_items` in the given order followed by any other
    /// material keys in first-seen order. Rows follow record order and cells
    /// hold normalized numeric prices.
    #[must_use]
    pub fn from_records<'a, I>(records: &[CompanyPriceRecord], canonical_items: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut columns: IndexSet<String> =
            canonical_items.into_iter().map(str::to_string).collect();
        for record in records {
            columns.extend(record.prices.keys().cloned());
        }

        let rows = records
            .iter()
            .map(|record| MatrixRow {
                company: record.company_name.clone(),
                region: record.region.clone(),
                cells: columns
                    .iter()
                    .map(|column| {
                        record
                            .prices
                            .get(column)
                            .map(|price| normalize_price(price))
                            .filter(|price| !price.is_empty())
                    })
                    .collect(),
            })
            .collect();

        Self {
            columns: columns.into_iter().collect(),
            rows,
        }
    }

    /// Cell for `company` × `material`, if both exist and the cell is filled.
    #[must_use]
    pub fn get(&self, company: &str, material: &str) -> Option<&str> {
        let col = self.columns.iter().position(|c| c == material)?;
        let row = self.rows.iter().find(|r| r.company == company)?;
        row.cells.get(col)?.as_deref()
    }
}
