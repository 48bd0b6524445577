//! Per-fetch view state.
//!
//! One `FetchState` per resource view, replacing the loose loading/data/error
//! flag triple with an explicit tagged variant. `Loading` is set before the
//! request goes out and resolved after the response; a failure keeps a
//! user-safe message, never the raw error.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FetchState<T> {
    /// No fetch issued yet.
    Idle,
    Loading,
    Loaded { rows: Vec<T> },
    Failed { message: String },
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The held snapshot, if the last fetch succeeded.
    pub fn snapshot(&self) -> Option<&[T]> {
        match self {
            Self::Loaded { rows } => Some(rows),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::Idle
    }
}
