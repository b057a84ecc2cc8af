//! Vendor-name normalization.
//!
//! The alias table is the single source of truth for mapping every spelling
//! of a vendor (including names mangled by lossy text encoding upstream) to
//! one canonical company name.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::fuzzy::best_match;
use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyEntry {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyAliasesFile {
    #[serde(default)]
    pub companies: Vec<CompanyEntry>,
}

/// Immutable lookup built once per run from [`CompanyAliasesFile`].
#[derive(Debug, Clone, Default)]
pub struct CompanyNames {
    /// `(spelling, canonical index)` for every canonical name and alias.
    spellings: Vec<(String, usize)>,
    canonical: Vec<String>,
}

impl CompanyNames {
    #[must_use]
    pub fn new(file: &CompanyAliasesFile) -> Self {
        let mut spellings = Vec::new();
        let mut canonical = Vec::with_capacity(file.companies.len());
        for (idx, entry) in file.companies.iter().enumerate() {
            canonical.push(entry.name.trim().to_string());
            spellings.push((entry.name.clone(), idx));
            spellings.extend(entry.aliases.iter().map(|alias| (alias.clone(), idx)));
        }
        Self {
            spellings,
            canonical,
        }
    }

    /// Canonical company name for `name`; unknown names pass through trimmed.
    #[must_use]
    pub fn normalize(&self, name: &str) -> String {
        self.lookup(name)
            .map_or_else(|| name.trim().to_string(), str::to_string)
    }

    /// Canonical company name for `name`, if any spelling matches.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&str> {
        let idx = best_match(name, self.spellings.iter().map(|(s, _)| s.as_str()))?;
        let (_, canonical_idx) = self.spellings.get(idx)?;
        self.canonical.get(*canonical_idx).map(String::as_str)
    }
}

/// Load and validate the company alias table from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_company_aliases(path: &Path) -> Result<CompanyAliasesFile, ConfigError> {
    let file: CompanyAliasesFile = crate::read_yaml(path)?;
    validate_company_aliases(&file)?;
    Ok(file)
}

fn validate_company_aliases(file: &CompanyAliasesFile) -> Result<(), ConfigError> {
    for entry in &file.companies {
        if entry.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "company name must be non-empty".to_string(),
            ));
        }
        if entry.aliases.iter().any(|a| a.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "company '{}' has an empty alias",
                entry.name
            )));
        }
    }
    Ok(())
}
