use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::repository::Store;
use crate::error::{Error, Result};
use crate::models::{
    application::{Application, ApplicationFields},
    candidate::Candidate,
    company::Company,
    event::{Event, EventFields},
    job::{Job, JobFields},
    question::{Question, QuestionFields},
    status::Status,
    token::AuthToken,
    user::{Account, NewAccount, User},
};

const USER_COLUMNS: &str =
    "id, username, email, password_hash, first_name, last_name, is_active, date_joined";
const JOB_COLUMNS: &str = "id, title, description, link, candidate_id, status_id, company_id";
const QUESTION_COLUMNS: &str = "id, question, is_from_interviewer, answer, candidate_id";
const EVENT_COLUMNS: &str = "id, details, start_time, end_time, job_id";
const APPLICATION_COLUMNS: &str = "id, job_id, user_id, status_id";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps a RESTRICT violation on delete to a conflict naming what still
/// points at the row.
fn restricted(what: &'static str) -> impl FnOnce(sqlx::Error) -> Error {
    move |err| match err {
        sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
            Error::Conflict(format!("{} is still referenced by existing records", what))
        }
        other => other.into(),
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create_account(&self, account: NewAccount) -> Result<Account> {
        // Dropping `tx` on any early return rolls the whole registration back.
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, email, password_hash, first_name, last_name, is_active)
            VALUES ($1, $2, $3, $4, $5, TRUE)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                Error::BadRequest("A user with that email is already registered".to_string())
            }
            other => other.into(),
        })?;

        let candidate = sqlx::query_as::<_, Candidate>(
            "INSERT INTO candidates (user_id) VALUES ($1) RETURNING id, user_id",
        )
        .bind(user.id)
        .fetch_one(&mut *tx)
        .await?;

        let token = sqlx::query_as::<_, AuthToken>(
            "INSERT INTO auth_tokens (key, user_id) VALUES ($1, $2) RETURNING key, user_id, created",
        )
        .bind(&account.token_key)
        .bind(user.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Account {
            user,
            candidate,
            token,
        })
    }

    async fn find_candidate_by_user(&self, user_id: i64) -> Result<Option<Candidate>> {
        let candidate =
            sqlx::query_as::<_, Candidate>("SELECT id, user_id FROM candidates WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(candidate)
    }

    async fn find_token_for_user(&self, user_id: i64) -> Result<Option<AuthToken>> {
        let token = sqlx::query_as::<_, AuthToken>(
            "SELECT key, user_id, created FROM auth_tokens WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(token)
    }

    async fn create_token(&self, user_id: i64, key: String) -> Result<AuthToken> {
        let token = sqlx::query_as::<_, AuthToken>(
            "INSERT INTO auth_tokens (key, user_id) VALUES ($1, $2) RETURNING key, user_id, created",
        )
        .bind(key)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(token)
    }

    async fn find_user_by_token(&self, key: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.username, u.email, u.password_hash, u.first_name, u.last_name, u.is_active, u.date_joined
            FROM auth_tokens t
            JOIN users u ON u.id = t.user_id
            WHERE t.key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn list_companies(&self) -> Result<Vec<Company>> {
        let items = sqlx::query_as::<_, Company>("SELECT id, name FROM companies ORDER BY name, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn find_company(&self, id: i64) -> Result<Option<Company>> {
        let company = sqlx::query_as::<_, Company>("SELECT id, name FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(company)
    }

    async fn create_company(&self, name: String) -> Result<Company> {
        let company = sqlx::query_as::<_, Company>(
            "INSERT INTO companies (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(company)
    }

    async fn update_company(&self, id: i64, name: String) -> Result<Option<Company>> {
        let company = sqlx::query_as::<_, Company>(
            "UPDATE companies SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(company)
    }

    async fn delete_company(&self, id: i64) -> Result<bool> {
        let res = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(restricted("company"))?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_statuses(&self) -> Result<Vec<Status>> {
        let items = sqlx::query_as::<_, Status>("SELECT id, label FROM statuses ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn find_status(&self, id: i64) -> Result<Option<Status>> {
        let status = sqlx::query_as::<_, Status>("SELECT id, label FROM statuses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(status)
    }

    async fn delete_status(&self, id: i64) -> Result<bool> {
        let res = sqlx::query("DELETE FROM statuses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(restricted("status"))?;
        Ok(res.rows_affected() > 0)
    }

    async fn find_jobs_by_candidate(&self, candidate_id: i64) -> Result<Vec<Job>> {
        let items = sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs WHERE candidate_id = $1 ORDER BY company_id, id",
            JOB_COLUMNS
        ))
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn find_job(&self, id: i64) -> Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(&format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    async fn create_job(&self, candidate_id: i64, fields: JobFields) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(&format!(
            r#"
            INSERT INTO jobs (title, description, link, candidate_id, status_id, company_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(fields.title)
        .bind(fields.description)
        .bind(fields.link)
        .bind(candidate_id)
        .bind(fields.status_id)
        .bind(fields.company_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    async fn update_job(&self, id: i64, fields: JobFields) -> Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs
            SET title = $2, description = $3, link = $4, status_id = $5, company_id = $6
            WHERE id = $1
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(id)
        .bind(fields.title)
        .bind(fields.description)
        .bind(fields.link)
        .bind(fields.status_id)
        .bind(fields.company_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(job)
    }

    async fn delete_job(&self, id: i64) -> Result<bool> {
        let res = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn find_questions_by_candidate(&self, candidate_id: i64) -> Result<Vec<Question>> {
        let items = sqlx::query_as::<_, Question>(&format!(
            "SELECT {} FROM questions WHERE candidate_id = $1 ORDER BY id",
            QUESTION_COLUMNS
        ))
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn find_question(&self, id: i64) -> Result<Option<Question>> {
        let question = sqlx::query_as::<_, Question>(&format!(
            "SELECT {} FROM questions WHERE id = $1",
            QUESTION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(question)
    }

    async fn create_question(&self, candidate_id: i64, fields: QuestionFields) -> Result<Question> {
        let question = sqlx::query_as::<_, Question>(&format!(
            r#"
            INSERT INTO questions (question, is_from_interviewer, answer, candidate_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            QUESTION_COLUMNS
        ))
        .bind(fields.question)
        .bind(fields.is_from_interviewer)
        .bind(fields.answer)
        .bind(candidate_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(question)
    }

    async fn update_question(&self, id: i64, fields: QuestionFields) -> Result<Option<Question>> {
        let question = sqlx::query_as::<_, Question>(&format!(
            r#"
            UPDATE questions
            SET question = $2, is_from_interviewer = $3, answer = $4
            WHERE id = $1
            RETURNING {}
            "#,
            QUESTION_COLUMNS
        ))
        .bind(id)
        .bind(fields.question)
        .bind(fields.is_from_interviewer)
        .bind(fields.answer)
        .fetch_optional(&self.pool)
        .await?;
        Ok(question)
    }

    async fn update_question_answer(&self, id: i64, answer: Option<String>) -> Result<Option<Question>> {
        let question = sqlx::query_as::<_, Question>(&format!(
            "UPDATE questions SET answer = $2 WHERE id = $1 RETURNING {}",
            QUESTION_COLUMNS
        ))
        .bind(id)
        .bind(answer)
        .fetch_optional(&self.pool)
        .await?;
        Ok(question)
    }

    async fn delete_question(&self, id: i64) -> Result<bool> {
        let res = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn find_events_by_candidate(
        &self,
        candidate_id: i64,
        job_id: Option<i64>,
    ) -> Result<Vec<Event>> {
        let items = sqlx::query_as::<_, Event>(
            r#"
            SELECT e.id, e.details, e.start_time, e.end_time, e.job_id
            FROM events e
            JOIN jobs j ON j.id = e.job_id
            WHERE j.candidate_id = $1
              AND ($2::BIGINT IS NULL OR e.job_id = $2)
            ORDER BY e.start_time, e.id
            "#,
        )
        .bind(candidate_id)
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn find_event(&self, id: i64) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {} FROM events WHERE id = $1",
            EVENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(event)
    }

    async fn create_event(&self, fields: EventFields) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (details, start_time, end_time, job_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            EVENT_COLUMNS
        ))
        .bind(fields.details)
        .bind(fields.start_time)
        .bind(fields.end_time)
        .bind(fields.job_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(event)
    }

    async fn update_event(&self, id: i64, fields: EventFields) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET details = $2, start_time = $3, end_time = $4, job_id = $5
            WHERE id = $1
            RETURNING {}
            "#,
            EVENT_COLUMNS
        ))
        .bind(id)
        .bind(fields.details)
        .bind(fields.start_time)
        .bind(fields.end_time)
        .bind(fields.job_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(event)
    }

    async fn delete_event(&self, id: i64) -> Result<bool> {
        let res = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn find_applications_by_user(
        &self,
        user_id: i64,
        job_id: Option<i64>,
    ) -> Result<Vec<Application>> {
        let items = sqlx::query_as::<_, Application>(&format!(
            r#"
            SELECT {}
            FROM applications
            WHERE user_id = $1
              AND ($2::BIGINT IS NULL OR job_id = $2)
            ORDER BY id
            "#,
            APPLICATION_COLUMNS
        ))
        .bind(user_id)
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn find_application(&self, id: i64) -> Result<Option<Application>> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "SELECT {} FROM applications WHERE id = $1",
            APPLICATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(application)
    }

    async fn create_application(&self, user_id: i64, fields: ApplicationFields) -> Result<Application> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "INSERT INTO applications (job_id, user_id, status_id) VALUES ($1, $2, $3) RETURNING {}",
            APPLICATION_COLUMNS
        ))
        .bind(fields.job_id)
        .bind(user_id)
        .bind(fields.status_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(application)
    }

    async fn update_application(
        &self,
        id: i64,
        fields: ApplicationFields,
    ) -> Result<Option<Application>> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "UPDATE applications SET job_id = $2, status_id = $3 WHERE id = $1 RETURNING {}",
            APPLICATION_COLUMNS
        ))
        .bind(id)
        .bind(fields.job_id)
        .bind(fields.status_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(application)
    }

    async fn delete_application(&self, id: i64) -> Result<bool> {
        let res = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
