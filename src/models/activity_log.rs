use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: Uuid,
    pub action: String,
    pub resource_type: String,
    pub resource_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Arguments for the backend `log_activity` function. Recorded best-effort
/// after successful mutations; never surfaced to the user.
#[derive(Debug, Clone, Serialize)]
pub struct NewActivity {
    pub action: String,
    pub resource_type: String,
    pub resource_id: Option<Uuid>,
    pub details: Option<serde_json::Value>,
}

impl NewActivity {
    pub fn new(action: &str, resource_type: &str, resource_id: Option<Uuid>) -> Self {
        Self {
            action: action.to_string(),
            resource_type: resource_type.to_string(),
            resource_id,
            details: None,
        }
    }
}
