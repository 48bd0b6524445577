//! Duplicate-submission guard.
//!
//! Each form instance carries a v4 submission token. The guard remembers
//! tokens whose insert completed, so a double-click on the submit control
//! cannot create the same record twice. A fresh form gets a fresh token and
//! goes through normally.

use std::collections::HashSet;

use uuid::Uuid;

#[derive(Debug, Default)]
pub struct SubmissionGuard {
    completed: HashSet<Uuid>,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once a submission with this token has completed.
    pub fn is_completed(&self, token: Uuid) -> bool {
        self.completed.contains(&token)
    }

    /// Record a completed submission. Called only after the backend
    /// confirmed the insert, so a failed attempt stays retryable.
    pub fn complete(&mut self, token: Uuid) {
        self.completed.insert(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_is_not_completed() {
        let guard = SubmissionGuard::new();
        assert!(!guard.is_completed(Uuid::new_v4()));
    }

    #[test]
    fn completed_token_is_remembered() {
        let mut guard = SubmissionGuard::new();
        let token = Uuid::new_v4();
        guard.complete(token);
        assert!(guard.is_completed(token));
        assert!(!guard.is_completed(Uuid::new_v4()));
    }
}
