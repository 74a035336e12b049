//! Credential Store: the only path from handlers to the relational database.
//!
//! `AppState` carries an `Arc<dyn Store>`. Production uses [`PgStore`];
//! router tests swap in the in-memory double from [`memory`].

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::resume::{ResumeSubmission, SaveReport};
use crate::models::user::{NewUser, SessionRecord, User};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the row.
    #[error("{0} already exists")]
    Conflict(&'static str),

    #[error("{action}: {source}")]
    Database {
        action: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl StoreError {
    /// Wraps a driver error with the step that was running when it failed.
    pub fn database(action: &'static str) -> impl FnOnce(sqlx::Error) -> StoreError {
        move |source| StoreError::Database { action, source }
    }

    /// The user-facing description of the failed step.
    pub fn action(&self) -> &'static str {
        match self {
            StoreError::Conflict(_) => "Record already exists",
            StoreError::Database { action, .. } => action,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Batch policy
// ────────────────────────────────────────────────────────────────────────────

/// How a failed Skill or Certificate insert affects the rest of a resume save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchPolicy {
    /// Any failure rolls back the whole resume.
    #[default]
    AllOrNothing,
    /// A failed item is rolled back on its own, logged and skipped.
    BestEffort,
}

#[derive(Debug, Error)]
#[error("unknown batch policy '{0}'")]
pub struct UnknownBatchPolicy(String);

impl FromStr for BatchPolicy {
    type Err = UnknownBatchPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all_or_nothing" => Ok(BatchPolicy::AllOrNothing),
            "best_effort" => Ok(BatchPolicy::BestEffort),
            other => Err(UnknownBatchPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for BatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchPolicy::AllOrNothing => f.write_str("all_or_nothing"),
            BatchPolicy::BestEffort => f.write_str("best_effort"),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait Store: Send + Sync {
    /// Inserts a user. Duplicate username or email yields `StoreError::Conflict`.
    async fn insert_user(&self, user: &NewUser) -> Result<Uuid, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Records a login.
    async fn open_session(
        &self,
        user_id: Uuid,
        email: &str,
        login_time: DateTime<Utc>,
    ) -> Result<SessionRecord, StoreError>;

    /// Sets `logout_time` on the most recent open record for the pair.
    /// Returns `None` when no open record exists.
    async fn close_session(
        &self,
        user_id: Uuid,
        email: &str,
        logout_time: DateTime<Utc>,
    ) -> Result<Option<SessionRecord>, StoreError>;

    /// Writes Education, Experience, Skills, Certificates and the Resume
    /// snapshot as one unit.
    async fn save_resume(
        &self,
        submission: &ResumeSubmission<'_>,
        policy: BatchPolicy,
    ) -> Result<SaveReport, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_policy_parses_case_insensitively() {
        assert_eq!(
            "Best_Effort".parse::<BatchPolicy>().unwrap(),
            BatchPolicy::BestEffort
        );
        assert_eq!(
            " all_or_nothing ".parse::<BatchPolicy>().unwrap(),
            BatchPolicy::AllOrNothing
        );
        assert!("sometimes".parse::<BatchPolicy>().is_err());
    }

    #[test]
    fn test_batch_policy_display_round_trips() {
        for policy in [BatchPolicy::AllOrNothing, BatchPolicy::BestEffort] {
            assert_eq!(policy.to_string().parse::<BatchPolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn test_store_error_action_names_failed_step() {
        let err = StoreError::database("Error saving skill")(sqlx::Error::RowNotFound);
        assert_eq!(err.action(), "Error saving skill");
        assert!(err.to_string().starts_with("Error saving skill: "));
    }
}
