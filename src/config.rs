use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "GenexaHealth Warfarin Dosing API";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Env var holding comma-separated bearer tokens accepted by the API.
pub const API_TOKENS_ENV: &str = "WARFARIN_API_TOKENS";

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_LIMIT: usize = 100;

/// Hard ceiling for page size; larger requests are clamped, not rejected.
pub const MAX_PAGE_LIMIT: usize = 1000;

/// Default log filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    "info,warfarin_api=info".to_string()
}

/// Default data directory: ./data relative to the working directory.
pub fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
