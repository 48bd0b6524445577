use chrono::NaiveDate;

use super::enums::AppointmentStatus;

/// Free-text patient search: case-insensitive over full name and email,
/// raw substring over phone.
#[derive(Debug, Default, Clone)]
pub struct PatientSearch {
    pub term: String,
}

impl PatientSearch {
    pub fn new(term: &str) -> Self {
        Self {
            term: term.to_string(),
        }
    }
}

/// Appointment list criteria, AND-combined. `None` means "all" for the
/// categorical fields and "any date" for the calendar selection.
#[derive(Debug, Default, Clone)]
pub struct AppointmentCriteria {
    pub search: String,
    pub status: Option<AppointmentStatus>,
    pub appointment_type: Option<String>,
    pub doctor: Option<String>,
    pub date: Option<NaiveDate>,
}
