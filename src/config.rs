use std::env;

/// Application-level constants
pub const APP_NAME: &str = "Prontua";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the remote service base URL.
pub const API_BASE_URL_VAR: &str = "PRONTUA_API_BASE_URL";

/// Default base URL of the clinic service (local development instance).
pub const DEFAULT_API_BASE_URL: &str = "https://localhost:7147/api";

/// Resolve the remote service base URL.
/// Reads `PRONTUA_API_BASE_URL`, falling back to the development default.
pub fn api_base_url() -> String {
    env::var(API_BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
}

/// Default log filter for binaries embedding this crate.
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_PKG_NAME"))
}
