use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One output material category, with the keywords that identify it in
/// vendor-specific spellings.
///
/// Keyword sets of different items overlap by construction; the target-item
/// filter resolves overlaps by specificity scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalItem {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetItemsFile {
    pub target_items: Vec<CanonicalItem>,
}

impl TargetItemsFile {
    /// Canonical item names in configuration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.target_items.iter().map(|item| item.name.as_str())
    }
}

/// Load and validate the canonical item vocabulary from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_target_items(path: &Path) -> Result<TargetItemsFile, ConfigError> {
    let items_file: TargetItemsFile = crate::read_yaml(path)?;
    validate_target_items(&items_file)?;
    Ok(items_file)
}

fn validate_target_items(items_file: &TargetItemsFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for item in &items_file.target_items {
        if item.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "target item name must be non-empty".to_string(),
            ));
        }
        if !seen.insert(item.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate target item: '{}'",
                item.name
            )));
        }
        if item.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "target item '{}' has an empty keyword",
                item.name
            )));
        }
    }
    Ok(())
}
