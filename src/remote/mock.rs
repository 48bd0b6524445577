//! In-memory data service for tests and hosts running without a backend.
//!
//! Mirrors the ordering contracts of the REST implementation and records
//! insert traffic so dispatcher tests can assert on what reached the
//! boundary.

use std::sync::Mutex;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::{DataService, ServiceError};
use crate::models::{
    Appointment, Doctor, NewActivity, NewAppointment, NewPatient, Patient, PatientBrief, Profile,
};

#[derive(Default)]
struct MockInner {
    patients: Vec<Patient>,
    appointments: Vec<Appointment>,
    doctors: Vec<Doctor>,
    profiles: Vec<Profile>,
    activity: Vec<NewActivity>,
    insert_calls: u32,
    fail: bool,
}

pub struct MockDataService {
    inner: Mutex<MockInner>,
}

impl MockDataService {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MockInner::default()),
        }
    }

    pub fn with_patients(self, patients: Vec<Patient>) -> Self {
        self.inner.lock().unwrap().patients = patients;
        self
    }

    pub fn with_appointments(self, appointments: Vec<Appointment>) -> Self {
        self.inner.lock().unwrap().appointments = appointments;
        self
    }

    pub fn with_doctors(self, doctors: Vec<Doctor>) -> Self {
        self.inner.lock().unwrap().doctors = doctors;
        self
    }

    /// Every subsequent operation fails with a connection error.
    pub fn failing(self) -> Self {
        self.inner.lock().unwrap().fail = true;
        self
    }

    /// How many insert operations reached the service.
    pub fn insert_calls(&self) -> u32 {
        self.inner.lock().unwrap().insert_calls
    }

    /// Audit entries recorded via `log_activity`.
    pub fn activity(&self) -> Vec<NewActivity> {
        self.inner.lock().unwrap().activity.clone()
    }

    fn check(&self) -> Result<std::sync::MutexGuard<'_, MockInner>, ServiceError> {
        let guard = self.inner.lock().unwrap();
        if guard.fail {
            return Err(ServiceError::Connection("mock service offline".to_string()));
        }
        Ok(guard)
    }
}

impl Default for MockDataService {
    fn default() -> Self {
        Self::new()
    }
}

impl DataService for MockDataService {
    fn list_patients(&self) -> Result<Vec<Patient>, ServiceError> {
        let guard = self.check()?;
        let mut rows = guard.patients.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    fn list_patients_brief(&self) -> Result<Vec<PatientBrief>, ServiceError> {
        let guard = self.check()?;
        let mut rows: Vec<PatientBrief> = guard
            .patients
            .iter()
            .map(|p| PatientBrief {
                id: p.id,
                first_name: p.first_name.clone(),
                last_name: p.last_name.clone(),
                phone: p.phone.clone(),
                email: p.email.clone(),
            })
            .collect();
        rows.sort_by(|a, b| a.first_name.cmp(&b.first_name));
        Ok(rows)
    }

    fn list_appointments(&self) -> Result<Vec<Appointment>, ServiceError> {
        let guard = self.check()?;
        let mut rows = guard.appointments.clone();
        rows.sort_by(|a, b| (a.date, a.time.as_str()).cmp(&(b.date, b.time.as_str())));
        Ok(rows)
    }

    fn appointments_on(&self, date: NaiveDate) -> Result<Vec<Appointment>, ServiceError> {
        let guard = self.check()?;
        let mut rows: Vec<Appointment> = guard
            .appointments
            .iter()
            .filter(|a| a.date == date)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.time.cmp(&b.time));
        Ok(rows)
    }

    fn list_doctors(&self) -> Result<Vec<Doctor>, ServiceError> {
        let guard = self.check()?;
        let mut rows = guard.doctors.clone();
        rows.sort_by(|a, b| a.last_name.cmp(&b.last_name));
        Ok(rows)
    }

    fn list_profiles(&self) -> Result<Vec<Profile>, ServiceError> {
        Ok(self.check()?.profiles.clone())
    }

    fn insert_patient(&self, new: &NewPatient) -> Result<Patient, ServiceError> {
        let mut guard = self.check()?;
        guard.insert_calls += 1;

        let now = Utc::now();
        let row = Patient {
            id: Uuid::new_v4(),
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            email: new.email.clone(),
            phone: new.phone.clone(),
            date_of_birth: new.date_of_birth,
            gender: new.gender.clone(),
            address: new.address.clone(),
            emergency_contact: new.emergency_contact.clone(),
            emergency_phone: new.emergency_phone.clone(),
            medical_history: new.medical_history.clone(),
            allergies: new.allergies.clone(),
            current_medications: new.current_medications.clone(),
            created_at: now,
            updated_at: now,
        };
        guard.patients.push(row.clone());
        Ok(row)
    }

    fn insert_appointment(&self, new: &NewAppointment) -> Result<Appointment, ServiceError> {
        let mut guard = self.check()?;
        guard.insert_calls += 1;

        let now = Utc::now();
        let row = Appointment {
            id: Uuid::new_v4(),
            patient_id: Some(new.patient_id),
            patient_name: new.patient_name.clone(),
            date: new.date,
            time: new.time.clone(),
            appointment_type: new.appointment_type.clone(),
            doctor: new.doctor.clone(),
            doctor_id: None,
            status: new.status.clone(),
            duration: None,
            notes: new.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        guard.appointments.push(row.clone());
        Ok(row)
    }

    fn log_activity(&self, entry: &NewActivity) -> Result<(), ServiceError> {
        self.check()?.activity.push(entry.clone());
        Ok(())
    }
}
