use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "ClinicFlow";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is unset
pub fn default_log_filter() -> &'static str {
    "clinicflow=info"
}

/// Base URL of the hosted data service (local Supabase stack by default)
pub fn service_base_url() -> String {
    std::env::var("CLINICFLOW_SERVICE_URL").unwrap_or_else(|_| "http://localhost:54321".to_string())
}

/// API key sent as both `apikey` and bearer token
pub fn service_api_key() -> String {
    std::env::var("CLINICFLOW_SERVICE_KEY").unwrap_or_default()
}

/// Get the application data directory
/// ~/ClinicFlow/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("ClinicFlow")
}

/// Where report exports are written
pub fn export_dir() -> PathBuf {
    app_data_dir().join("exports")
}
