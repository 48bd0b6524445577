//! Patient registration form — validation and insert payload construction.
//!
//! Mirrors the required form controls: first/last name, phone, and both
//! emergency fields must be non-empty before a payload is built. Optional
//! fields become explicit nulls. Validation never touches the network.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Gender, NewPatient};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid phone number")]
    InvalidPhone,
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?[0-9][0-9 ()\-]{6,}$").unwrap())
}

fn require<'a>(value: &'a str, field: &'static str) -> Result<&'a str, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::Missing(field));
    }
    Ok(trimmed)
}

fn blank_to_null(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Form state as entered by the user. Stays populated after a failed
/// submission so the user can retry.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub submission_token: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub address: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
    pub medical_history: String,
    pub allergies: String,
    pub current_medications: String,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            submission_token: Uuid::new_v4(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            date_of_birth: None,
            gender: None,
            address: String::new(),
            emergency_contact: String::new(),
            emergency_phone: String::new(),
            medical_history: String::new(),
            allergies: String::new(),
            current_medications: String::new(),
        }
    }
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check required fields and build the insert payload.
    pub fn validate(&self) -> Result<NewPatient, FormError> {
        let first_name = require(&self.first_name, "First name")?;
        let last_name = require(&self.last_name, "Last name")?;
        let phone = require(&self.phone, "Phone number")?;
        let emergency_contact = require(&self.emergency_contact, "Emergency contact")?;
        let emergency_phone = require(&self.emergency_phone, "Emergency phone")?;

        if !phone_re().is_match(phone) || !phone_re().is_match(emergency_phone) {
            return Err(FormError::InvalidPhone);
        }

        let email = blank_to_null(&self.email);
        if let Some(ref address) = email {
            if !email_re().is_match(address) {
                return Err(FormError::InvalidEmail);
            }
        }

        Ok(NewPatient {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email,
            phone: phone.to_string(),
            date_of_birth: self.date_of_birth,
            gender: self.gender.clone(),
            address: blank_to_null(&self.address),
            emergency_contact: emergency_contact.to_string(),
            emergency_phone: emergency_phone.to_string(),
            medical_history: blank_to_null(&self.medical_history),
            allergies: blank_to_null(&self.allergies),
            current_medications: blank_to_null(&self.current_medications),
        })
    }
}
