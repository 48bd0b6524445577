//! Remote data service boundary.
//!
//! The backend is an opaque request/response boundary: every read returns a
//! full snapshot of a named resource, every insert returns the inserted row,
//! and any failure becomes a `ServiceError` the caller surfaces as a generic
//! message. No retry, no backoff, no pagination.

pub mod mock;
pub mod rest;

pub use mock::MockDataService;
pub use rest::RestDataService;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{
    Appointment, Doctor, NewActivity, NewAppointment, NewPatient, Patient, PatientBrief, Profile,
};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Service responded with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}

/// Per-resource read and insert operations against the hosted backend.
///
/// Reads are full-table snapshots assumed to fit in memory; ordering is part
/// of each operation's contract so list views render without a client sort.
pub trait DataService {
    /// All patients, newest registration first.
    fn list_patients(&self) -> Result<Vec<Patient>, ServiceError>;

    /// Picker columns only, ordered by first name.
    fn list_patients_brief(&self) -> Result<Vec<PatientBrief>, ServiceError>;

    /// All appointments ordered by date, then time.
    fn list_appointments(&self) -> Result<Vec<Appointment>, ServiceError>;

    /// Appointments on exactly the given calendar date.
    fn appointments_on(&self, date: NaiveDate) -> Result<Vec<Appointment>, ServiceError>;

    fn list_doctors(&self) -> Result<Vec<Doctor>, ServiceError>;

    fn list_profiles(&self) -> Result<Vec<Profile>, ServiceError>;

    /// Insert one patient row, returning the stored row.
    fn insert_patient(&self, new: &NewPatient) -> Result<Patient, ServiceError>;

    /// Insert one appointment row, returning the stored row.
    fn insert_appointment(&self, new: &NewAppointment) -> Result<Appointment, ServiceError>;

    /// Record an audit row via the backend `log_activity` function.
    fn log_activity(&self, entry: &NewActivity) -> Result<(), ServiceError>;
}
