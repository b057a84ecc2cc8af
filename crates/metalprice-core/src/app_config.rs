use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub sites_path: PathBuf,
    pub target_items_path: PathBuf,
    pub corrections_path: PathBuf,
    pub company_aliases_path: PathBuf,
    pub output_dir: PathBuf,
    pub log_level: String,
    pub request_timeout_secs: u64,
    /// Lower bound of the post-request courtesy pause.
    pub request_delay_min_ms: u64,
    /// Upper bound of the post-request courtesy pause. Equal to the lower
    /// bound for a fixed delay.
    pub request_delay_max_ms: u64,
    pub user_agent: String,
    pub filter_target_items: bool,
}
