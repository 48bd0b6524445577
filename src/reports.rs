//! Reports & analytics — aggregate stage and JSON exports.
//!
//! Aggregates are simple linear counts over freshly fetched snapshots,
//! recomputed on every cycle. Report generation fetches the data for the
//! selected kind, wraps it in a JSON payload, and hands back a ready entry
//! for the history list. Exports write pretty-printed JSON files to the
//! export directory.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Appointment, AppointmentStatus, Patient};
use crate::remote::{DataService, ServiceError};

/// Headline counters computed from two independently fetched snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClinicStats {
    pub total_patients: usize,
    pub total_appointments: usize,
    pub completed_appointments: usize,
    pub today_appointments: usize,
}

impl ClinicStats {
    pub fn compute(patients: &[Patient], appointments: &[Appointment], today: NaiveDate) -> Self {
        Self {
            total_patients: patients.len(),
            total_appointments: appointments.len(),
            completed_appointments: appointments
                .iter()
                .filter(|a| a.status == AppointmentStatus::Completed)
                .count(),
            today_appointments: appointments.iter().filter(|a| a.date == today).count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Appointments,
    Patients,
    Revenue,
    Performance,
}

impl ReportKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Appointments => "Appointment",
            Self::Patients => "Patient",
            Self::Revenue => "Revenue",
            Self::Performance => "Performance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    Week,
    Month,
    Quarter,
    Year,
}

impl ReportPeriod {
    pub fn label(self) -> &'static str {
        match self {
            Self::Week => "Week",
            Self::Month => "Month",
            Self::Quarter => "Quarter",
            Self::Year => "Year",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Ready,
    Generating,
    Error,
}

/// A generated report held in the newest-first history list.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub kind: ReportKind,
    pub period: ReportPeriod,
    pub generated_on: NaiveDate,
    pub status: ReportStatus,
    pub data: serde_json::Value,
}

/// Fetch the data for the selected kind and build a ready report entry.
pub fn generate_report<S: DataService>(
    service: &S,
    kind: ReportKind,
    period: ReportPeriod,
    today: NaiveDate,
) -> Result<Report, ServiceError> {
    let title = format!("{} {} Report", period.label(), kind.label());

    let (description, data) = match kind {
        ReportKind::Appointments => {
            let rows = service.list_appointments()?;
            let completed = rows
                .iter()
                .filter(|a| a.status == AppointmentStatus::Completed)
                .count();
            let description = format!(
                "Total appointments: {}, Completed: {}",
                rows.len(),
                completed
            );
            (description, serde_json::to_value(rows).unwrap_or_default())
        }
        ReportKind::Patients => {
            let rows = service.list_patients()?;
            let description = format!("Total patients: {}, Active records in system", rows.len());
            (description, serde_json::to_value(rows).unwrap_or_default())
        }
        ReportKind::Revenue => {
            let rows: Vec<Appointment> = service
                .list_appointments()?
                .into_iter()
                .filter(|a| a.status == AppointmentStatus::Completed)
                .collect();
            let description = format!("Based on {} completed appointments", rows.len());
            (description, serde_json::to_value(rows).unwrap_or_default())
        }
        ReportKind::Performance => {
            let appointments = service.list_appointments()?;
            let patients = service.list_patients()?;
            let data = serde_json::json!({
                "appointments": appointments,
                "patients": patients,
            });
            (
                "Clinic performance metrics and analytics".to_string(),
                data,
            )
        }
    };

    Ok(Report {
        id: Uuid::new_v4(),
        title,
        description,
        kind,
        period,
        generated_on: today,
        status: ReportStatus::Ready,
        data,
    })
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// `Title_With_Underscores_YYYY-MM-DD.json`
pub fn export_file_name(title: &str, date: NaiveDate) -> String {
    let stem: String = title.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{stem}_{}.json", date.format("%Y-%m-%d"))
}

fn write_export(
    dir: &Path,
    title: &str,
    data: &serde_json::Value,
    date: NaiveDate,
) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(title, date));
    fs::write(&path, serde_json::to_string_pretty(data)?)?;
    Ok(path)
}

/// Export today's appointments via the backend date-equality filter.
pub fn export_today_appointments<S: DataService>(
    service: &S,
    dir: &Path,
    today: NaiveDate,
) -> Result<PathBuf, ExportError> {
    let rows = service.appointments_on(today)?;
    let data = serde_json::to_value(rows)?;
    write_export(dir, "Today's Appointments", &data, today)
}

/// Export the full patient database.
pub fn export_patient_database<S: DataService>(
    service: &S,
    dir: &Path,
    today: NaiveDate,
) -> Result<PathBuf, ExportError> {
    let rows = service.list_patients()?;
    let data = serde_json::to_value(rows)?;
    write_export(dir, "Patient Database", &data, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewAppointment, NewPatient};
    use crate::remote::MockDataService;

    fn new_patient(first: &str) -> NewPatient {
        NewPatient {
            first_name: first.to_string(),
            last_name: "Test".to_string(),
            email: None,
            phone: "+254 700 000 000".to_string(),
            date_of_birth: None,
            gender: None,
            address: None,
            emergency_contact: "Next Of Kin".to_string(),
            emergency_phone: "+254 711 111 111".to_string(),
            medical_history: None,
            allergies: None,
            current_medications: None,
        }
    }

    fn new_appointment(date: &str, status: AppointmentStatus) -> NewAppointment {
        NewAppointment {
            patient_id: Uuid::new_v4(),
            patient_name: "Amina Odhiambo".to_string(),
            date: date.parse().unwrap(),
            time: "09:00".to_string(),
            appointment_type: "Check-up".to_string(),
            doctor: "Dr. Smith".to_string(),
            status,
            notes: None,
        }
    }

    fn seeded_service() -> MockDataService {
        let service = MockDataService::new();
        service.insert_patient(&new_patient("Amina")).unwrap();
        service.insert_patient(&new_patient("Brian")).unwrap();
        service
            .insert_appointment(&new_appointment("2024-01-15", AppointmentStatus::Completed))
            .unwrap();
        service
            .insert_appointment(&new_appointment("2024-01-15", AppointmentStatus::Scheduled))
            .unwrap();
        service
            .insert_appointment(&new_appointment("2024-01-20", AppointmentStatus::Completed))
            .unwrap();
        service
    }

    #[test]
    fn clinic_stats_counts() {
        let service = seeded_service();
        let patients = service.list_patients().unwrap();
        let appointments = service.list_appointments().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        let stats = ClinicStats::compute(&patients, &appointments, today);
        assert_eq!(stats.total_patients, 2);
        assert_eq!(stats.total_appointments, 3);
        assert_eq!(stats.completed_appointments, 2);
        assert_eq!(stats.today_appointments, 2);
    }

    #[test]
    fn clinic_stats_empty() {
        let stats = ClinicStats::compute(&[], &[], NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(stats, ClinicStats::default());
    }

    #[test]
    fn appointment_report_title_and_description() {
        let service = seeded_service();
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let report = generate_report(
            &service,
            ReportKind::Appointments,
            ReportPeriod::Month,
            today,
        )
        .unwrap();

        assert_eq!(report.title, "Month Appointment Report");
        assert_eq!(report.description, "Total appointments: 3, Completed: 2");
        assert_eq!(report.status, ReportStatus::Ready);
        assert_eq!(report.data.as_array().unwrap().len(), 3);
    }

    #[test]
    fn revenue_report_only_counts_completed() {
        let service = seeded_service();
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let report =
            generate_report(&service, ReportKind::Revenue, ReportPeriod::Quarter, today).unwrap();

        assert_eq!(report.title, "Quarter Revenue Report");
        assert_eq!(report.description, "Based on 2 completed appointments");
        assert_eq!(report.data.as_array().unwrap().len(), 2);
    }

    #[test]
    fn performance_report_bundles_both_snapshots() {
        let service = seeded_service();
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let report =
            generate_report(&service, ReportKind::Performance, ReportPeriod::Year, today).unwrap();

        assert_eq!(report.data["appointments"].as_array().unwrap().len(), 3);
        assert_eq!(report.data["patients"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn report_generation_propagates_fetch_failure() {
        let service = MockDataService::new().failing();
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let result = generate_report(&service, ReportKind::Patients, ReportPeriod::Week, today);
        assert!(result.is_err());
    }

    #[test]
    fn export_file_name_replaces_spaces() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(
            export_file_name("Today's Appointments", date),
            "Today's_Appointments_2024-01-15.json"
        );
    }

    #[test]
    fn exports_write_json_files() {
        let service = seeded_service();
        let dir = tempfile::tempdir().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        let path = export_today_appointments(&service, dir.path(), today).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);

        let path = export_patient_database(&service, dir.path(), today).unwrap();
        assert!(path.file_name().unwrap().to_str().unwrap().starts_with("Patient_Database_"));
    }
}
