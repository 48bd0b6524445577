//! Navigation boundary contract.
//!
//! The routing host owns route definitions and rendering; the core names the
//! views it can request and parses incoming paths so an unknown path falls
//! back to the static not-found view instead of crashing.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Dashboard,
    Patients,
    PatientRegistration,
    Appointments,
    BookAppointment,
    Reports,
    Settings,
    NotFound,
}

impl Route {
    /// Resolve a path to a view; anything unknown is the not-found fallback.
    pub fn parse(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" | "/" => Self::Dashboard,
            "/patients" => Self::Patients,
            "/patients/new" => Self::PatientRegistration,
            "/appointments" => Self::Appointments,
            "/appointments/new" => Self::BookAppointment,
            "/reports" => Self::Reports,
            "/settings" => Self::Settings,
            _ => Self::NotFound,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Patients => "/patients",
            Self::PatientRegistration => "/patients/new",
            Self::Appointments => "/appointments",
            Self::BookAppointment => "/appointments/new",
            Self::Reports => "/reports",
            Self::Settings => "/settings",
            Self::NotFound => "/404",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_resolve() {
        assert_eq!(Route::parse("/"), Route::Dashboard);
        assert_eq!(Route::parse("/patients"), Route::Patients);
        assert_eq!(Route::parse("/patients/new"), Route::PatientRegistration);
        assert_eq!(Route::parse("/appointments"), Route::Appointments);
        assert_eq!(Route::parse("/appointments/new"), Route::BookAppointment);
        assert_eq!(Route::parse("/reports"), Route::Reports);
        assert_eq!(Route::parse("/settings"), Route::Settings);
    }

    #[test]
    fn trailing_slash_tolerated() {
        assert_eq!(Route::parse("/patients/"), Route::Patients);
    }

    #[test]
    fn unknown_path_falls_back_to_not_found() {
        assert_eq!(Route::parse("/doctors"), Route::NotFound);
        assert_eq!(Route::parse("/patients/123/edit"), Route::NotFound);
    }

    #[test]
    fn round_trip_through_path() {
        for route in [
            Route::Dashboard,
            Route::Patients,
            Route::PatientRegistration,
            Route::Appointments,
            Route::BookAppointment,
            Route::Reports,
            Route::Settings,
        ] {
            assert_eq!(Route::parse(route.path()), route);
        }
    }
}
