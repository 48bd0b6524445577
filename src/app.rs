//! Application facade — view state, dispatchers, and navigation outcomes.
//!
//! `ClinicApp` owns one `FetchState` per resource view plus the submission
//! guard and report history. Loads set `Loading` before the request and
//! resolve to `Loaded` or `Failed`; failures log the real error and surface
//! only a generic message. Dispatchers validate first, refuse duplicate
//! tokens, and hand back a success toast plus the route to navigate to.

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tracing::{error, warn};

use crate::booking::BookingForm;
use crate::dashboard::DashboardSummary;
use crate::models::{Appointment, Doctor, NewActivity, Patient, PatientBrief};
use crate::registration::{FormError, RegistrationForm};
use crate::remote::{DataService, ServiceError};
use crate::reports::{self, ClinicStats, Report, ReportKind, ReportPeriod};
use crate::routes::Route;
use crate::submission::SubmissionGuard;
use crate::toast::Toast;
use crate::view::FetchState;

pub const FETCH_PATIENTS_FAILED: &str = "Failed to fetch patients. Please try again.";
pub const FETCH_APPOINTMENTS_FAILED: &str = "Failed to fetch appointments. Please try again.";
pub const LOAD_PATIENTS_FAILED: &str = "Failed to load patients. Please refresh the page.";
pub const LOAD_DOCTORS_FAILED: &str = "Failed to load doctors. Please try again.";

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] FormError),

    #[error("This form was already submitted")]
    Duplicate,

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl SubmitError {
    /// The toast shown for a refused or failed submission. Service failures
    /// collapse to a generic message; validation errors name the field.
    pub fn toast(&self, service_message: &str) -> Toast {
        match self {
            Self::Validation(e) => Toast::error(&e.to_string()),
            Self::Duplicate => Toast::error("This form was already submitted."),
            Self::Service(_) => Toast::error(service_message),
        }
    }
}

/// What a successful dispatch hands back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub toast: Toast,
    pub navigate: Route,
}

pub struct ClinicApp<S: DataService> {
    service: S,
    pub patients: FetchState<Patient>,
    pub patients_brief: FetchState<PatientBrief>,
    pub appointments: FetchState<Appointment>,
    pub doctors: FetchState<Doctor>,
    /// Newest first.
    pub reports: Vec<Report>,
    guard: SubmissionGuard,
}

impl<S: DataService> ClinicApp<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            patients: FetchState::default(),
            patients_brief: FetchState::default(),
            appointments: FetchState::default(),
            doctors: FetchState::default(),
            reports: Vec::new(),
            guard: SubmissionGuard::new(),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    // ----- loads ------------------------------------------------------------

    /// Refresh the patient directory. Returns the error toast on failure.
    pub fn load_patients(&mut self) -> Option<Toast> {
        self.patients = FetchState::Loading;
        match self.service.list_patients() {
            Ok(rows) => {
                self.patients = FetchState::Loaded { rows };
                None
            }
            Err(e) => {
                error!("failed to fetch patients: {e}");
                self.patients = FetchState::Failed {
                    message: FETCH_PATIENTS_FAILED.to_string(),
                };
                Some(Toast::error(FETCH_PATIENTS_FAILED))
            }
        }
    }

    /// Refresh the patient picker used by the booking form.
    pub fn load_patients_brief(&mut self) -> Option<Toast> {
        self.patients_brief = FetchState::Loading;
        match self.service.list_patients_brief() {
            Ok(rows) => {
                self.patients_brief = FetchState::Loaded { rows };
                None
            }
            Err(e) => {
                error!("failed to load patient picker: {e}");
                self.patients_brief = FetchState::Failed {
                    message: LOAD_PATIENTS_FAILED.to_string(),
                };
                Some(Toast::error(LOAD_PATIENTS_FAILED))
            }
        }
    }

    pub fn load_appointments(&mut self) -> Option<Toast> {
        self.appointments = FetchState::Loading;
        match self.service.list_appointments() {
            Ok(rows) => {
                self.appointments = FetchState::Loaded { rows };
                None
            }
            Err(e) => {
                error!("failed to fetch appointments: {e}");
                self.appointments = FetchState::Failed {
                    message: FETCH_APPOINTMENTS_FAILED.to_string(),
                };
                Some(Toast::error(FETCH_APPOINTMENTS_FAILED))
            }
        }
    }

    pub fn load_doctors(&mut self) -> Option<Toast> {
        self.doctors = FetchState::Loading;
        match self.service.list_doctors() {
            Ok(rows) => {
                self.doctors = FetchState::Loaded { rows };
                None
            }
            Err(e) => {
                error!("failed to load doctors: {e}");
                self.doctors = FetchState::Failed {
                    message: LOAD_DOCTORS_FAILED.to_string(),
                };
                Some(Toast::error(LOAD_DOCTORS_FAILED))
            }
        }
    }

    // ----- dispatchers ------------------------------------------------------

    /// Validate, insert, record the audit entry, and refresh the directory.
    pub fn register_patient(
        &mut self,
        form: &RegistrationForm,
    ) -> Result<SubmitOutcome, SubmitError> {
        let payload = form.validate()?;
        if self.guard.is_completed(form.submission_token) {
            return Err(SubmitError::Duplicate);
        }

        let row = self.service.insert_patient(&payload)?;
        self.guard.complete(form.submission_token);

        // Audit logging is best effort; the registration already succeeded.
        let entry = NewActivity::new("patient_registered", "patients", Some(row.id));
        if let Err(e) = self.service.log_activity(&entry) {
            warn!("failed to record activity log entry: {e}");
        }

        self.load_patients();
        Ok(SubmitOutcome {
            toast: Toast::success("Success!", "Patient registered successfully."),
            navigate: Route::Patients,
        })
    }

    /// Validate, insert, record the audit entry, and refresh the schedule.
    pub fn book_appointment(&mut self, form: &BookingForm) -> Result<SubmitOutcome, SubmitError> {
        let payload = form.validate()?;
        if self.guard.is_completed(form.submission_token) {
            return Err(SubmitError::Duplicate);
        }

        let row = self.service.insert_appointment(&payload)?;
        self.guard.complete(form.submission_token);

        let entry = NewActivity::new("appointment_booked", "appointments", Some(row.id));
        if let Err(e) = self.service.log_activity(&entry) {
            warn!("failed to record activity log entry: {e}");
        }

        self.load_appointments();
        Ok(SubmitOutcome {
            toast: Toast::success("Success!", "Appointment booked successfully."),
            navigate: Route::Appointments,
        })
    }

    // ----- aggregates and reports -------------------------------------------

    /// Fetch fresh snapshots and compute the headline counters.
    pub fn clinic_stats(&self, today: NaiveDate) -> Result<ClinicStats, ServiceError> {
        let patients = self.service.list_patients()?;
        let appointments = self.service.list_appointments()?;
        Ok(ClinicStats::compute(&patients, &appointments, today))
    }

    /// Fetch fresh snapshots and compute the home-view summary.
    pub fn dashboard_summary(&self, today: NaiveDate) -> Result<DashboardSummary, ServiceError> {
        let patients = self.service.list_patients()?;
        let appointments = self.service.list_appointments()?;
        Ok(DashboardSummary::compute(&patients, &appointments, today))
    }

    /// Generate a report and push it onto the history list, newest first.
    pub fn generate_report(
        &mut self,
        kind: ReportKind,
        period: ReportPeriod,
    ) -> Result<Toast, ServiceError> {
        let today = Utc::now().date_naive();
        let report = reports::generate_report(&self.service, kind, period, today)?;
        let toast = Toast::success(
            "Report Generated",
            &format!("{} has been successfully generated.", report.title),
        );
        self.reports.insert(0, report);
        Ok(toast)
    }

    pub fn export_today_appointments(
        &self,
        dir: &std::path::Path,
    ) -> Result<std::path::PathBuf, reports::ExportError> {
        reports::export_today_appointments(&self.service, dir, Utc::now().date_naive())
    }

    pub fn export_patient_database(
        &self,
        dir: &std::path::Path,
    ) -> Result<std::path::PathBuf, reports::ExportError> {
        reports::export_patient_database(&self.service, dir, Utc::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;
    use crate::remote::MockDataService;
    use crate::toast::Severity;

    fn registration() -> RegistrationForm {
        RegistrationForm {
            first_name: "Amina".to_string(),
            last_name: "Odhiambo".to_string(),
            phone: "+254 700 123 456".to_string(),
            gender: Some(Gender::Female),
            emergency_contact: "Joseph Odhiambo".to_string(),
            emergency_phone: "+254 711 111 111".to_string(),
            ..RegistrationForm::new()
        }
    }

    fn booking(app: &ClinicApp<MockDataService>) -> BookingForm {
        let choices = app.service().list_patients_brief().unwrap();
        BookingForm {
            patient: choices.into_iter().next(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15),
            time: "09:30".to_string(),
            appointment_type: "General Consultation".to_string(),
            doctor: "Dr. Emily Davis".to_string(),
            ..BookingForm::new()
        }
    }

    #[test]
    fn registration_navigates_to_patient_list() {
        let mut app = ClinicApp::new(MockDataService::new());
        let outcome = app.register_patient(&registration()).unwrap();

        assert_eq!(outcome.navigate, Route::Patients);
        assert_eq!(outcome.toast.severity, Severity::Success);
        assert_eq!(outcome.toast.description, "Patient registered successfully.");
        assert_eq!(app.patients.snapshot().unwrap().len(), 1);

        let activity = app.service().activity();
        assert_eq!(activity.len(), 1);
        assert_eq!(activity[0].action, "patient_registered");
    }

    #[test]
    fn invalid_registration_never_reaches_service() {
        let mut app = ClinicApp::new(MockDataService::new());
        let mut form = registration();
        form.phone = String::new();

        let err = app.register_patient(&form).unwrap_err();
        assert!(matches!(err, SubmitError::Validation(_)));
        assert_eq!(app.service().insert_calls(), 0);
    }

    #[test]
    fn duplicate_token_refused_after_success() {
        let mut app = ClinicApp::new(MockDataService::new());
        let form = registration();

        app.register_patient(&form).unwrap();
        let err = app.register_patient(&form).unwrap_err();
        assert!(matches!(err, SubmitError::Duplicate));
        assert_eq!(app.service().insert_calls(), 1);
    }

    #[test]
    fn failed_submission_stays_retryable() {
        let mut app = ClinicApp::new(MockDataService::new().failing());
        let form = registration();

        let err = app.register_patient(&form).unwrap_err();
        assert!(matches!(err, SubmitError::Service(_)));

        // Same token again; the guard only records confirmed inserts.
        let err = app.register_patient(&form).unwrap_err();
        assert!(matches!(err, SubmitError::Service(_)));
    }

    #[test]
    fn booking_without_patient_never_reaches_service() {
        let mut app = ClinicApp::new(MockDataService::new());
        let form = BookingForm::new();

        let err = app.book_appointment(&form).unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Validation(FormError::Missing("Patient"))
        ));
        assert_eq!(app.service().insert_calls(), 0);
    }

    #[test]
    fn booking_navigates_to_appointments() {
        let mut app = ClinicApp::new(MockDataService::new());
        app.register_patient(&registration()).unwrap();

        let form = booking(&app);
        let outcome = app.book_appointment(&form).unwrap();
        assert_eq!(outcome.navigate, Route::Appointments);
        assert_eq!(app.appointments.snapshot().unwrap().len(), 1);
        assert_eq!(app.service().activity().len(), 2);
    }

    #[test]
    fn fetch_failure_surfaces_generic_message() {
        let mut app = ClinicApp::new(MockDataService::new().failing());
        let toast = app.load_patients().unwrap();

        assert_eq!(toast.description, FETCH_PATIENTS_FAILED);
        assert_eq!(app.patients.error(), Some(FETCH_PATIENTS_FAILED));

        let toast = app.load_appointments().unwrap();
        assert_eq!(toast.description, FETCH_APPOINTMENTS_FAILED);
    }

    #[test]
    fn successful_load_replaces_previous_failure() {
        let mut app = ClinicApp::new(MockDataService::new());
        app.patients = FetchState::Failed {
            message: FETCH_PATIENTS_FAILED.to_string(),
        };
        assert!(app.load_patients().is_none());
        assert!(app.patients.snapshot().is_some());
    }

    #[test]
    fn generated_reports_are_newest_first() {
        let mut app = ClinicApp::new(MockDataService::new());
        app.generate_report(ReportKind::Patients, ReportPeriod::Week)
            .unwrap();
        let toast = app
            .generate_report(ReportKind::Appointments, ReportPeriod::Month)
            .unwrap();

        assert_eq!(toast.title, "Report Generated");
        assert_eq!(app.reports.len(), 2);
        assert_eq!(app.reports[0].title, "Month Appointment Report");
    }

    #[test]
    fn submit_error_toasts() {
        let err = SubmitError::Duplicate;
        assert_eq!(err.toast("x").description, "This form was already submitted.");

        let err = SubmitError::Service(ServiceError::Timeout);
        assert_eq!(
            err.toast("Failed to register patient. Please try again.")
                .description,
            "Failed to register patient. Please try again."
        );
    }
}
