pub mod app;
pub mod appointments;
pub mod booking;
pub mod config;
pub mod dashboard;
pub mod models;
pub mod patients;
pub mod registration;
pub mod remote;
pub mod reports;
pub mod routes;
pub mod submission;
pub mod toast;
pub mod view;

use tracing_subscriber::EnvFilter;

/// Initialize tracing from `RUST_LOG`, falling back to the default filter.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("ClinicFlow starting v{}", config::APP_VERSION);
}
