use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{Acquire, PgPool, Postgres, Transaction};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::resume::{ResumeSubmission, SaveReport};
use crate::models::user::{NewUser, SessionRecord, User};
use crate::store::{BatchPolicy, Store, StoreError};

const INSERT_SKILL: &str =
    "INSERT INTO skills (user_id, email, skill_name, proficiency_level) VALUES ($1, $2, $3, $4)";

const INSERT_CERTIFICATE: &str = r#"
    INSERT INTO certificates
        (user_id, certificate_name, issuing_organization, issue_date, expiration_date, email)
    VALUES ($1, $2, $3, $4, $5, $6)
    "#;

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: &NewUser) -> Result<Uuid, StoreError> {
        let inserted = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (first_name, last_name, username, email, hashed_password, phone)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.hashed_password)
        .bind(&user.phone)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(id) => Ok(id),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::Conflict("user"))
            }
            Err(e) => Err(StoreError::database("Error inserting user")(e)),
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(
            "SELECT id, first_name, last_name, username, email, hashed_password, phone \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::database("Error querying the database"))
    }

    async fn open_session(
        &self,
        user_id: Uuid,
        email: &str,
        login_time: DateTime<Utc>,
    ) -> Result<SessionRecord, StoreError> {
        sqlx::query_as::<_, SessionRecord>(
            "INSERT INTO sessions (user_id, email, login_time) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(user_id)
        .bind(email)
        .bind(login_time)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::database("Error inserting session"))
    }

    async fn close_session(
        &self,
        user_id: Uuid,
        email: &str,
        logout_time: DateTime<Utc>,
    ) -> Result<Option<SessionRecord>, StoreError> {
        sqlx::query_as::<_, SessionRecord>(
            r#"
            UPDATE sessions SET logout_time = $1
            WHERE id = (
                SELECT id FROM sessions
                WHERE user_id = $2 AND email = $3 AND logout_time IS NULL
                ORDER BY login_time DESC
                LIMIT 1
            )
            RETURNING *
            "#,
        )
        .bind(logout_time)
        .bind(user_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::database("Error updating session"))
    }

    async fn save_resume(
        &self,
        submission: &ResumeSubmission<'_>,
        policy: BatchPolicy,
    ) -> Result<SaveReport, StoreError> {
        let user = submission.user;
        let education = submission.education;
        let experience = submission.experience;

        // Dropping `tx` on any early return rolls everything back.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(StoreError::database("Error starting transaction"))?;

        sqlx::query(
            r#"
            INSERT INTO education (user_id, degree, institution, start_date, end_date, email)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id)
        .bind(&education.degree)
        .bind(&education.institution)
        .bind(&education.start_date)
        .bind(&education.end_date)
        .bind(&user.email)
        .execute(&mut *tx)
        .await
        .map_err(StoreError::database("Error saving education"))?;

        sqlx::query(
            r#"
            INSERT INTO experience
                (user_id, company_name, role, start_date, end_date, description, email)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id)
        .bind(&experience.company_name)
        .bind(&experience.role)
        .bind(&experience.start_date)
        .bind(&experience.end_date)
        .bind(&experience.description)
        .bind(&user.email)
        .execute(&mut *tx)
        .await
        .map_err(StoreError::database("Error saving experience"))?;

        let mut report = SaveReport::default();

        for skill in submission.skills {
            let query = sqlx::query(INSERT_SKILL)
                .bind(user.id)
                .bind(&user.email)
                .bind(&skill.skill_name)
                .bind(&skill.proficiency_level);
            if insert_batch_item(&mut tx, query, policy, "Error saving skill").await? {
                report.skills_saved += 1;
            } else {
                report.skills_skipped += 1;
            }
        }

        for cert in submission.certificates {
            let query = sqlx::query(INSERT_CERTIFICATE)
                .bind(user.id)
                .bind(&cert.certificate_name)
                .bind(&cert.issuing_organization)
                .bind(&cert.issue_date)
                .bind(&cert.expiration_date)
                .bind(&user.email);
            if insert_batch_item(&mut tx, query, policy, "Error saving certificate").await? {
                report.certificates_saved += 1;
            } else {
                report.certificates_skipped += 1;
            }
        }

        sqlx::query(
            r#"
            INSERT INTO resumes
                (user_id, first_name, last_name, email, phone, degree, institution,
                 start_date, end_date, experience, skills, linked_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&education.degree)
        .bind(&education.institution)
        .bind(&education.start_date)
        .bind(&education.end_date)
        .bind(&experience.description)
        .bind(submission.raw_skills)
        .bind(submission.linked_url)
        .execute(&mut *tx)
        .await
        .map_err(StoreError::database("Error saving resume"))?;

        tx.commit()
            .await
            .map_err(StoreError::database("Error committing resume"))?;

        info!(
            "Saved resume for user {} ({} skills, {} certificates, policy={})",
            user.id, report.skills_saved, report.certificates_saved, policy
        );
        Ok(report)
    }
}

/// Runs one Skill/Certificate insert under the given policy.
/// Returns `false` when a best-effort item was rolled back and skipped.
async fn insert_batch_item(
    tx: &mut Transaction<'_, Postgres>,
    query: Query<'_, Postgres, PgArguments>,
    policy: BatchPolicy,
    action: &'static str,
) -> Result<bool, StoreError> {
    match policy {
        BatchPolicy::AllOrNothing => {
            query
                .execute(&mut **tx)
                .await
                .map_err(StoreError::database(action))?;
            Ok(true)
        }
        BatchPolicy::BestEffort => {
            let mut savepoint = Acquire::begin(&mut **tx)
                .await
                .map_err(StoreError::database(action))?;
            match query.execute(&mut *savepoint).await {
                Ok(_) => {
                    savepoint
                        .commit()
                        .await
                        .map_err(StoreError::database(action))?;
                    Ok(true)
                }
                Err(e) => {
                    warn!("{action} (skipped under best_effort): {e}");
                    savepoint
                        .rollback()
                        .await
                        .map_err(StoreError::database(action))?;
                    Ok(false)
                }
            }
        }
    }
}
