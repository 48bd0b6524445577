//! Dashboard — home-view aggregates over the two live snapshots.
//!
//! Every number here is recomputed from freshly fetched rows; nothing is
//! cached between cycles. The schedule card shows today's appointments in
//! time order.

use chrono::NaiveDate;

use crate::models::{Appointment, AppointmentStatus, Patient};

#[derive(Debug, Clone, Default)]
pub struct DashboardSummary {
    pub today_total: usize,
    pub completed: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub cancelled: usize,
    /// Integer percentage of today's appointments that are completed.
    /// Zero when nothing is scheduled today.
    pub completion_rate: u32,
    pub total_patients: usize,
    pub new_patients_today: usize,
    /// Today's appointments sorted by time slot.
    pub schedule: Vec<Appointment>,
}

impl DashboardSummary {
    pub fn compute(patients: &[Patient], appointments: &[Appointment], today: NaiveDate) -> Self {
        let mut schedule: Vec<Appointment> = appointments
            .iter()
            .filter(|a| a.date == today)
            .cloned()
            .collect();
        schedule.sort_by(|a, b| a.time.cmp(&b.time));

        let count = |status: AppointmentStatus| {
            schedule.iter().filter(|a| a.status == status).count()
        };
        let today_total = schedule.len();
        let completed = count(AppointmentStatus::Completed);
        let completion_rate = if today_total == 0 {
            0
        } else {
            (completed * 100 / today_total) as u32
        };

        Self {
            today_total,
            completed,
            pending: count(AppointmentStatus::Scheduled),
            in_progress: count(AppointmentStatus::InProgress),
            cancelled: count(AppointmentStatus::Cancelled),
            completion_rate,
            total_patients: patients.len(),
            new_patients_today: patients
                .iter()
                .filter(|p| p.created_at.date_naive() == today)
                .count(),
            schedule,
        }
    }
}
