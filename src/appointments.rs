//! Appointment list — derive stage over the appointments snapshot.
//!
//! Criteria are AND-combined across independent predicates: free-text search
//! over patient name and doctor, exact equality on status/type/doctor, and
//! exact date equality against the selected calendar day. Pure and
//! idempotent; linear scan per call.

use chrono::NaiveDate;

use crate::models::{Appointment, AppointmentCriteria, AppointmentStatus};

pub fn filter_appointments<'a>(
    snapshot: &'a [Appointment],
    criteria: &AppointmentCriteria,
) -> Vec<&'a Appointment> {
    let term = criteria.search.to_lowercase();
    snapshot
        .iter()
        .filter(|appointment| {
            let matches_search = appointment.patient_name.to_lowercase().contains(&term)
                || appointment.doctor.to_lowercase().contains(&term);
            let matches_status = criteria
                .status
                .as_ref()
                .map_or(true, |status| appointment.status == *status);
            let matches_type = criteria
                .appointment_type
                .as_deref()
                .map_or(true, |ty| appointment.appointment_type == ty);
            let matches_doctor = criteria
                .doctor
                .as_deref()
                .map_or(true, |doctor| appointment.doctor == doctor);
            let matches_date = criteria.date.map_or(true, |date| appointment.date == date);

            matches_search && matches_status && matches_type && matches_doctor && matches_date
        })
        .collect()
}

/// Today's counters for the appointment header cards. Recomputed on every
/// fetch cycle; never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodayStats {
    pub total: usize,
    pub completed: usize,
    pub scheduled: usize,
    pub in_progress: usize,
}

impl TodayStats {
    pub fn compute(snapshot: &[Appointment], today: NaiveDate) -> Self {
        let on_day = |status: &AppointmentStatus| {
            snapshot
                .iter()
                .filter(|a| a.date == today && a.status == *status)
                .count()
        };
        Self {
            total: snapshot.iter().filter(|a| a.date == today).count(),
            completed: on_day(&AppointmentStatus::Completed),
            scheduled: on_day(&AppointmentStatus::Scheduled),
            in_progress: on_day(&AppointmentStatus::InProgress),
        }
    }
}
