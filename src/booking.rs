//! Appointment booking form — validation and insert payload construction.
//!
//! A payload is only built once a patient, date, time slot, type, and doctor
//! are all selected; until then the dispatcher refuses the submission without
//! touching the network. The patient name is denormalized into the payload,
//! status defaults to scheduled, and blank notes become null. No
//! double-booking check happens here; overlap is not an invariant anywhere.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{AppointmentStatus, NewAppointment, PatientBrief};
use crate::registration::FormError;

/// Half-hour slots offered by the booking view.
pub const TIME_SLOTS: &[&str] = &[
    "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "14:00", "14:30", "15:00", "15:30",
    "16:00", "16:30",
];

pub const APPOINTMENT_TYPES: &[&str] = &[
    "General Consultation",
    "Follow-up",
    "Check-up",
    "Vaccination",
    "Emergency",
];

/// Fallback roster shown before the doctors snapshot loads.
pub const DEFAULT_DOCTORS: &[&str] = &[
    "Dr. Sarah Johnson",
    "Dr. Michael Brown",
    "Dr. Emily Davis",
    "Dr. James Wilson",
    "Dr. Lisa Anderson",
];

#[derive(Debug, Clone)]
pub struct BookingForm {
    pub submission_token: Uuid,
    pub patient: Option<PatientBrief>,
    pub date: Option<NaiveDate>,
    pub time: String,
    pub appointment_type: String,
    pub doctor: String,
    pub notes: String,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            submission_token: Uuid::new_v4(),
            patient: None,
            date: None,
            time: String::new(),
            appointment_type: String::new(),
            doctor: String::new(),
            notes: String::new(),
        }
    }
}

impl BookingForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the required selections and build the insert payload.
    pub fn validate(&self) -> Result<NewAppointment, FormError> {
        let patient = self.patient.as_ref().ok_or(FormError::Missing("Patient"))?;
        let date = self.date.ok_or(FormError::Missing("Appointment date"))?;

        let time = self.time.trim();
        if time.is_empty() {
            return Err(FormError::Missing("Time slot"));
        }
        let appointment_type = self.appointment_type.trim();
        if appointment_type.is_empty() {
            return Err(FormError::Missing("Appointment type"));
        }
        let doctor = self.doctor.trim();
        if doctor.is_empty() {
            return Err(FormError::Missing("Doctor"));
        }

        let notes = self.notes.trim();
        Ok(NewAppointment {
            patient_id: patient.id,
            patient_name: patient.full_name(),
            date,
            time: time.to_string(),
            appointment_type: appointment_type.to_string(),
            doctor: doctor.to_string(),
            status: AppointmentStatus::Scheduled,
            notes: if notes.is_empty() {
                None
            } else {
                Some(notes.to_string())
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brief() -> PatientBrief {
        PatientBrief {
            id: Uuid::new_v4(),
            first_name: "Brian".to_string(),
            last_name: "Mwangi".to_string(),
            phone: "+254 722 987 654".to_string(),
            email: None,
        }
    }

    fn filled_form() -> BookingForm {
        BookingForm {
            patient: Some(brief()),
            date: NaiveDate::from_ymd_opt(2024, 1, 15),
            time: "09:30".to_string(),
            appointment_type: "General Consultation".to_string(),
            doctor: "Dr. Emily Davis".to_string(),
            ..BookingForm::new()
        }
    }

    #[test]
    fn complete_form_builds_payload() {
        let form = filled_form();
        let patient_id = form.patient.as_ref().unwrap().id;
        let payload = form.validate().unwrap();
        assert_eq!(payload.patient_id, patient_id);
        assert_eq!(payload.patient_name, "Brian Mwangi");
        assert_eq!(payload.status, AppointmentStatus::Scheduled);
        assert!(payload.notes.is_none());
    }

    #[test]
    fn missing_patient_rejected() {
        let mut form = filled_form();
        form.patient = None;
        assert_eq!(form.validate(), Err(FormError::Missing("Patient")));
    }

    #[test]
    fn missing_selections_rejected() {
        let mut form = filled_form();
        form.date = None;
        assert_eq!(form.validate(), Err(FormError::Missing("Appointment date")));

        let mut form = filled_form();
        form.time = String::new();
        assert_eq!(form.validate(), Err(FormError::Missing("Time slot")));

        let mut form = filled_form();
        form.doctor = "  ".to_string();
        assert_eq!(form.validate(), Err(FormError::Missing("Doctor")));
    }

    #[test]
    fn notes_kept_when_present() {
        let mut form = filled_form();
        form.notes = "Recurring headaches".to_string();
        let payload = form.validate().unwrap();
        assert_eq!(payload.notes.as_deref(), Some("Recurring headaches"));
    }

    #[test]
    fn status_is_set_once_at_creation() {
        // No code path mutates status after insert; every booking starts out
        // scheduled.
        let payload = filled_form().validate().unwrap();
        assert_eq!(payload.status.as_str(), "scheduled");
    }

    #[test]
    fn slot_list_is_half_hourly() {
        assert_eq!(TIME_SLOTS.len(), 12);
        assert!(TIME_SLOTS.contains(&"09:00"));
        assert!(TIME_SLOTS.contains(&"16:30"));
    }
}
