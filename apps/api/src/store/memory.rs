//! In-memory `Store` used by router and pipeline tests.
//!
//! A resume save is staged on a copy of the tables and swapped in only when
//! every step succeeds, matching the transaction in `PgStore`.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::resume::{Certificate, Education, Experience, ResumeSubmission, SaveReport, Skill};
use crate::models::user::{NewUser, SessionRecord, User};
use crate::store::{BatchPolicy, Store, StoreError};

#[derive(Debug, Clone)]
pub struct ResumeSnapshot {
    pub user_id: Uuid,
    pub first_name: String,
    pub experience: String,
    pub skills: String,
    pub linked_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub users: Vec<User>,
    pub sessions: Vec<SessionRecord>,
    pub education: Vec<(Uuid, Education)>,
    pub experience: Vec<(Uuid, Experience)>,
    pub skills: Vec<(Uuid, Skill)>,
    pub certificates: Vec<(Uuid, Certificate)>,
    pub resumes: Vec<ResumeSnapshot>,
}

impl Tables {
    /// Total rows written by resume saves.
    pub fn resume_row_count(&self) -> usize {
        self.education.len()
            + self.experience.len()
            + self.skills.len()
            + self.certificates.len()
            + self.resumes.len()
    }
}

#[derive(Debug, Default)]
struct Failures {
    open_session: bool,
    close_session: bool,
    resume_snapshot: bool,
    skill_named: Option<String>,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    failures: Mutex<Failures>,
}

fn injected() -> sqlx::Error {
    sqlx::Error::Protocol("injected failure".to_string())
}

impl InMemoryStore {
    pub fn tables(&self) -> Tables {
        self.tables.lock().unwrap().clone()
    }

    pub fn fail_open_session(&self) {
        self.failures.lock().unwrap().open_session = true;
    }

    pub fn fail_close_session(&self) {
        self.failures.lock().unwrap().close_session = true;
    }

    pub fn fail_resume_snapshot(&self) {
        self.failures.lock().unwrap().resume_snapshot = true;
    }

    pub fn fail_skill(&self, name: &str) {
        self.failures.lock().unwrap().skill_named = Some(name.to_string());
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn insert_user(&self, user: &NewUser) -> Result<Uuid, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .users
            .iter()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(StoreError::Conflict("user"));
        }
        let id = Uuid::new_v4();
        tables.users.push(User {
            id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            hashed_password: user.hashed_password.clone(),
            phone: user.phone.clone(),
        });
        Ok(id)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn open_session(
        &self,
        user_id: Uuid,
        email: &str,
        login_time: DateTime<Utc>,
    ) -> Result<SessionRecord, StoreError> {
        if self.failures.lock().unwrap().open_session {
            return Err(StoreError::database("Error inserting session")(injected()));
        }
        let record = SessionRecord {
            id: Uuid::new_v4(),
            user_id,
            email: email.to_string(),
            login_time,
            logout_time: None,
        };
        self.tables.lock().unwrap().sessions.push(record.clone());
        Ok(record)
    }

    async fn close_session(
        &self,
        user_id: Uuid,
        email: &str,
        logout_time: DateTime<Utc>,
    ) -> Result<Option<SessionRecord>, StoreError> {
        if self.failures.lock().unwrap().close_session {
            return Err(StoreError::database("Error updating session")(injected()));
        }
        let mut tables = self.tables.lock().unwrap();
        let latest_open = tables
            .sessions
            .iter_mut()
            .filter(|s| s.user_id == user_id && s.email == email && s.logout_time.is_none())
            .max_by_key(|s| s.login_time);
        Ok(latest_open.map(|record| {
            record.logout_time = Some(logout_time);
            record.clone()
        }))
    }

    async fn save_resume(
        &self,
        submission: &ResumeSubmission<'_>,
        policy: BatchPolicy,
    ) -> Result<SaveReport, StoreError> {
        let failures = self.failures.lock().unwrap();
        let mut tables = self.tables.lock().unwrap();
        let mut staged = tables.clone();
        let user_id = submission.user.id;
        let mut report = SaveReport::default();

        staged
            .education
            .push((user_id, submission.education.clone()));
        staged
            .experience
            .push((user_id, submission.experience.clone()));

        for skill in submission.skills {
            if failures.skill_named.as_deref() == Some(skill.skill_name.as_str()) {
                match policy {
                    BatchPolicy::AllOrNothing => {
                        return Err(StoreError::database("Error saving skill")(injected()));
                    }
                    BatchPolicy::BestEffort => {
                        report.skills_skipped += 1;
                        continue;
                    }
                }
            }
            staged.skills.push((user_id, skill.clone()));
            report.skills_saved += 1;
        }

        for cert in submission.certificates {
            staged.certificates.push((user_id, cert.clone()));
            report.certificates_saved += 1;
        }

        if failures.resume_snapshot {
            return Err(StoreError::database("Error saving resume")(injected()));
        }
        staged.resumes.push(ResumeSnapshot {
            user_id,
            first_name: submission.user.first_name.clone(),
            experience: submission.experience.description.clone(),
            skills: submission.raw_skills.to_string(),
            linked_url: submission.linked_url.map(str::to_string),
        });

        *tables = staged;
        Ok(report)
    }
}
