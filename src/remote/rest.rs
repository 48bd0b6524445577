//! PostgREST-flavoured implementation of [`DataService`].
//!
//! Every operation maps onto one HTTP request: `GET /rest/v1/{resource}` for
//! snapshot reads, `POST` with `Prefer: return=representation` for inserts,
//! and `POST /rest/v1/rpc/log_activity` for the audit function.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{DataService, ServiceError};
use crate::config;
use crate::models::{
    Appointment, Doctor, NewActivity, NewAppointment, NewPatient, Patient, PatientBrief, Profile,
};

/// Sort direction for the `order` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Builds the URL for a snapshot read. Kept pure so the request shape is
/// testable without a backend.
fn list_url(
    base: &str,
    resource: &str,
    select: &str,
    order: &[(&str, Order)],
    eq: Option<(&str, &str)>,
) -> String {
    let mut url = format!("{base}/rest/v1/{resource}?select={select}");
    if !order.is_empty() {
        let columns: Vec<String> = order
            .iter()
            .map(|(column, dir)| format!("{column}.{}", dir.as_str()))
            .collect();
        url.push_str(&format!("&order={}", columns.join(",")));
    }
    if let Some((column, value)) = eq {
        url.push_str(&format!("&{column}=eq.{value}"));
    }
    url
}

/// Blocking HTTP client for the hosted data service.
pub struct RestDataService {
    base_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl RestDataService {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let client = reqwest::blocking::Client::new();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        }
    }

    /// Service pointed at the URL and key from the environment.
    pub fn from_env() -> Self {
        Self::new(&config::service_base_url(), &config::service_api_key())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_transport_err(&self, e: reqwest::Error) -> ServiceError {
        if e.is_connect() {
            ServiceError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            ServiceError::Timeout
        } else {
            ServiceError::Http(e.to_string())
        }
    }

    fn check_status(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, ServiceError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ServiceError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Full snapshot read of a named resource.
    fn fetch_all<T: DeserializeOwned>(
        &self,
        resource: &str,
        select: &str,
        order: &[(&str, Order)],
        eq: Option<(&str, &str)>,
    ) -> Result<Vec<T>, ServiceError> {
        let url = list_url(&self.base_url, resource, select, order, eq);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .map_err(|e| self.map_transport_err(e))?;

        let response = Self::check_status(response)?;
        response
            .json()
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }

    /// Insert one row and return the stored representation.
    fn insert_row<T: DeserializeOwned, P: Serialize>(
        &self,
        resource: &str,
        payload: &P,
    ) -> Result<T, ServiceError> {
        let url = format!("{}/rest/v1/{resource}", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            // PostgREST inserts take an array of rows
            .json(&[payload])
            .send()
            .map_err(|e| self.map_transport_err(e))?;

        let response = Self::check_status(response)?;
        let mut rows: Vec<T> = response
            .json()
            .map_err(|e| ServiceError::Decode(e.to_string()))?;

        rows.pop()
            .ok_or_else(|| ServiceError::Decode("insert returned no rows".to_string()))
    }

    fn call_rpc(&self, function: &str, args: &serde_json::Value) -> Result<(), ServiceError> {
        let url = format!("{}/rest/v1/rpc/{function}", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(args)
            .send()
            .map_err(|e| self.map_transport_err(e))?;

        Self::check_status(response)?;
        Ok(())
    }
}

impl DataService for RestDataService {
    fn list_patients(&self) -> Result<Vec<Patient>, ServiceError> {
        self.fetch_all("patients", "*", &[("created_at", Order::Desc)], None)
    }

    fn list_patients_brief(&self) -> Result<Vec<PatientBrief>, ServiceError> {
        self.fetch_all(
            "patients",
            "id,first_name,last_name,phone,email",
            &[("first_name", Order::Asc)],
            None,
        )
    }

    fn list_appointments(&self) -> Result<Vec<Appointment>, ServiceError> {
        self.fetch_all(
            "appointments",
            "*",
            &[("date", Order::Asc), ("time", Order::Asc)],
            None,
        )
    }

    fn appointments_on(&self, date: NaiveDate) -> Result<Vec<Appointment>, ServiceError> {
        let value = date.format("%Y-%m-%d").to_string();
        self.fetch_all(
            "appointments",
            "*",
            &[("time", Order::Asc)],
            Some(("date", value.as_str())),
        )
    }

    fn list_doctors(&self) -> Result<Vec<Doctor>, ServiceError> {
        self.fetch_all("doctors", "*", &[("last_name", Order::Asc)], None)
    }

    fn list_profiles(&self) -> Result<Vec<Profile>, ServiceError> {
        self.fetch_all("profiles", "*", &[("created_at", Order::Desc)], None)
    }

    fn insert_patient(&self, new: &NewPatient) -> Result<Patient, ServiceError> {
        self.insert_row("patients", new)
    }

    fn insert_appointment(&self, new: &NewAppointment) -> Result<Appointment, ServiceError> {
        self.insert_row("appointments", new)
    }

    fn log_activity(&self, entry: &NewActivity) -> Result<(), ServiceError> {
        let args = serde_json::json!({
            "p_action": entry.action,
            "p_resource_type": entry.resource_type,
            "p_resource_id": entry.resource_id,
            "p_details": entry.details,
        });
        self.call_rpc("log_activity", &args)
    }
}
