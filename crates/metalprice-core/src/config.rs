use crate::app_config::AppConfig;
use crate::ConfigError;

/// Desktop browser user-agent sent with every vendor page request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default; only malformed values are rejected.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let sites_path = PathBuf::from(or_default("METALPRICE_SITES_PATH", "./config/sites.yaml"));
    let target_items_path = PathBuf::from(or_default(
        "METALPRICE_TARGET_ITEMS_PATH",
        "./config/target_items.yaml",
    ));
    let corrections_path = PathBuf::from(or_default(
        "METALPRICE_CORRECTIONS_PATH",
        "./config/price_corrections.yaml",
    ));
    let company_aliases_path = PathBuf::from(or_default(
        "METALPRICE_COMPANY_ALIASES_PATH",
        "./config/company_aliases.yaml",
    ));
    let output_dir = PathBuf::from(or_default("METALPRICE_OUTPUT_DIR", "./output"));
    let log_level = or_default("METALPRICE_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("METALPRICE_REQUEST_TIMEOUT_SECS", "30")?;
    let request_delay_min_ms = parse_u64("METALPRICE_REQUEST_DELAY_MIN_MS", "1000")?;
    let request_delay_max_ms = parse_u64("METALPRICE_REQUEST_DELAY_MAX_MS", "2000")?;
    if request_delay_max_ms < request_delay_min_ms {
        return Err(ConfigError::InvalidEnvVar {
            var: "METALPRICE_REQUEST_DELAY_MAX_MS".to_string(),
            reason: format!(
                "{request_delay_max_ms} is below METALPRICE_REQUEST_DELAY_MIN_MS ({request_delay_min_ms})"
            ),
        });
    }

    let user_agent = or_default("METALPRICE_USER_AGENT", DEFAULT_USER_AGENT);
    let filter_target_items = parse_bool(
        "METALPRICE_FILTER_TARGET_ITEMS",
        &or_default("METALPRICE_FILTER_TARGET_ITEMS", "true"),
    )?;

    Ok(AppConfig {
        sites_path,
        target_items_path,
        corrections_path,
        company_aliases_path,
        output_dir,
        log_level,
        request_timeout_secs,
        request_delay_min_ms,
        request_delay_max_ms,
        user_agent,
        filter_target_items,
    })
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
