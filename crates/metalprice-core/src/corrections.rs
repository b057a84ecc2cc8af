use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::fuzzy::best_match;
use crate::ConfigError;

/// Operator-authored edits for one vendor, applied after extraction in the
/// fixed order remove → modify → add.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    #[serde(default)]
    pub remove: Vec<String>,
    #[serde(default)]
    pub modify: Vec<ModifyEntry>,
    #[serde(default)]
    pub add: Vec<AddEntry>,
}

impl Correction {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remove.is_empty() && self.modify.is_empty() && self.add.is_empty()
    }
}

/// Rename and/or re-price an extracted entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyEntry {
    pub material: String,
    #[serde(default)]
    pub material_new: Option<String>,
    /// Omitted means "keep the extracted value verbatim".
    #[serde(default, deserialize_with = "opt_price_text")]
    pub price: Option<String>,
}

/// Set an entry to an explicit price, whatever extraction produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddEntry {
    pub material: String,
    #[serde(deserialize_with = "price_text")]
    pub price: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorrectionsFile {
    #[serde(default)]
    pub corrections: IndexMap<String, Correction>,
}

impl CorrectionsFile {
    /// Finds the correction for a vendor, tolerating spelling drift between
    /// the site registry and the correction file.
    ///
    /// Returns the matched correction key alongside the correction.
    #[must_use]
    pub fn find(&self, company: &str) -> Option<(&str, &Correction)> {
        let idx = best_match(company, self.corrections.keys().map(String::as_str))?;
        self.corrections
            .get_index(idx)
            .map(|(key, correction)| (key.as_str(), correction))
    }
}

/// YAML prices may be written as `1735`, `1735.5` or `"1,735円"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum PriceText {
    Text(String),
    Int(i64),
    Float(f64),
}

impl From<PriceText> for String {
    fn from(value: PriceText) -> Self {
        match value {
            PriceText::Text(s) => s,
            PriceText::Int(n) => n.to_string(),
            PriceText::Float(f) => f.to_string(),
        }
    }
}

fn price_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    PriceText::deserialize(deserializer).map(String::from)
}

fn opt_price_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<PriceText>::deserialize(deserializer).map(|v| v.map(String::from))
}

/// Load and validate the price correction overlay from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_corrections(path: &Path) -> Result<CorrectionsFile, ConfigError> {
    let file: CorrectionsFile = crate::read_yaml(path)?;
    validate_corrections(&file)?;
    Ok(file)
}

fn validate_corrections(file: &CorrectionsFile) -> Result<(), ConfigError> {
    for (vendor, correction) in &file.corrections {
        let materials = correction
            .remove
            .iter()
            .chain(correction.modify.iter().map(|m| &m.material))
            .chain(correction.add.iter().map(|a| &a.material));
        for material in materials {
            if material.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "correction for '{vendor}' has an empty material"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "corrections_test.rs"]
mod tests;
