use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::AppointmentStatus;

/// Fallback duration shown when the backend row carries none.
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Option<Uuid>,
    /// Denormalized at booking time so lists render without a join.
    pub patient_name: String,
    pub date: NaiveDate,
    /// Slot label as stored, e.g. "09:30".
    pub time: String,
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub doctor: String,
    pub doctor_id: Option<Uuid>,
    pub status: AppointmentStatus,
    pub duration: Option<u32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn duration_minutes(&self) -> u32 {
        self.duration.unwrap_or(DEFAULT_DURATION_MINUTES)
    }
}

/// Insert payload built by the booking dispatcher. Status is set once here;
/// no client-side code path updates it after insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAppointment {
    pub patient_id: Uuid,
    pub patient_name: String,
    pub date: NaiveDate,
    pub time: String,
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub doctor: String,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}
