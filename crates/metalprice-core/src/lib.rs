pub mod app_config;
pub mod companies;
pub mod config;
pub mod corrections;
pub mod fuzzy;
pub mod items;
pub mod records;
pub mod sites;

use thiserror::Error;

pub use app_config::AppConfig;
pub use companies::{load_company_aliases, CompanyAliasesFile, CompanyEntry, CompanyNames};
pub use config::{load_app_config, load_app_config_from_env};
pub use corrections::{load_corrections, AddEntry, Correction, CorrectionsFile, ModifyEntry};
pub use items::{load_target_items, CanonicalItem, TargetItemsFile};
pub use records::{CompanyPriceRecord, PriceMap};
pub use sites::{load_sites, SelectorHints, SiteConfig, SitesFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("config validation failed: {0}")]
    Validation(String),
}

/// Reads a YAML config file and deserializes it into `T`.
///
/// Both a missing file and malformed YAML are fatal for the run; there is no
/// partial-config recovery.
pub(crate) fn read_yaml<T>(path: &std::path::Path) -> Result<T, ConfigError>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}
