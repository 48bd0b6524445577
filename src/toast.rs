//! Notification boundary contract.
//!
//! The core emits (title, description, severity) triples; how they are
//! displayed is the host's concern.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Toast {
    pub fn success(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            severity: Severity::Success,
        }
    }

    pub fn error(description: &str) -> Self {
        Self {
            title: "Error".to_string(),
            description: description.to_string(),
            severity: Severity::Error,
        }
    }
}
