//! Patient directory — derive stage over the patients snapshot.
//!
//! Pure functions from (snapshot, criteria) to a derived view. Linear scan
//! per call; no indexing, no side effects.

use chrono::{Datelike, NaiveDate};

use crate::models::{Patient, PatientSearch};

/// Case-insensitive substring match over full name and email, raw substring
/// over phone. An empty term matches every record.
pub fn filter_patients<'a>(snapshot: &'a [Patient], search: &PatientSearch) -> Vec<&'a Patient> {
    let term = search.term.to_lowercase();
    snapshot
        .iter()
        .filter(|patient| {
            let full_name = patient.full_name().to_lowercase();
            let email = patient
                .email
                .as_deref()
                .map(str::to_lowercase)
                .unwrap_or_default();
            full_name.contains(&term)
                || email.contains(&term)
                || patient.phone.contains(&search.term)
        })
        .collect()
}

/// Whole years elapsed since birth, minus one when the birthday has not yet
/// occurred this year. `None` when the date of birth is unknown.
pub fn calculate_age(date_of_birth: Option<NaiveDate>, today: NaiveDate) -> Option<i32> {
    let birth = date_of_birth?;
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    Some(age)
}

/// Header counts for the directory view, recomputed per fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryStats {
    pub total: usize,
    pub new_this_month: usize,
}

impl DirectoryStats {
    pub fn compute(snapshot: &[Patient], today: NaiveDate) -> Self {
        let new_this_month = snapshot
            .iter()
            .filter(|p| {
                let created = p.created_at.date_naive();
                created.year() == today.year() && created.month() == today.month()
            })
            .count();
        Self {
            total: snapshot.len(),
            new_this_month,
        }
    }
}
