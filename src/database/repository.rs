use async_trait::async_trait;

use crate::error::Result;
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

/// Storage boundary for every entity the API touches.
///
/// Lookups return `Ok(None)` for a missing row; ownership is decided by the
/// services, not here. Deletes return whether a row was removed. Writes that
/// point at a nonexistent status, company or job fail with
/// `Error::BadRequest`; deleting a status or company that is still referenced
/// fails with `Error::Conflict`.
///
/// Carried in `AppState` as `Arc<dyn Store>`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    // accounts

    async fn find_user(&self, id: i64) -> Result<Option<User>>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Writes the user, its candidate and its token atomically.
    async fn create_account(&self, account: NewAccount) -> Result<Account>;

    async fn find_candidate_by_user(&self, user_id: i64) -> Result<Option<Candidate>>;

    async fn find_token_for_user(&self, user_id: i64) -> Result<Option<AuthToken>>;

    async fn create_token(&self, user_id: i64, key: String) -> Result<AuthToken>;

    async fn find_user_by_token(&self, key: &str) -> Result<Option<User>>;

    // companies

    async fn list_companies(&self) -> Result<Vec<Company>>;

    async fn find_company(&self, id: i64) -> Result<Option<Company>>;

    async fn create_company(&self, name: String) -> Result<Company>;

    async fn update_company(&self, id: i64, name: String) -> Result<Option<Company>>;

    async fn delete_company(&self, id: i64) -> Result<bool>;

    // statuses

    async fn list_statuses(&self) -> Result<Vec<Status>>;

    async fn find_status(&self, id: i64) -> Result<Option<Status>>;

    async fn delete_status(&self, id: i64) -> Result<bool>;

    // jobs

    async fn find_jobs_by_candidate(&self, candidate_id: i64) -> Result<Vec<Job>>;

    async fn find_job(&self, id: i64) -> Result<Option<Job>>;

    async fn create_job(&self, candidate_id: i64, fields: JobFields) -> Result<Job>;

    async fn update_job(&self, id: i64, fields: JobFields) -> Result<Option<Job>>;

    async fn delete_job(&self, id: i64) -> Result<bool>;

    // questions

    async fn find_questions_by_candidate(&self, candidate_id: i64) -> Result<Vec<Question>>;

    async fn find_question(&self, id: i64) -> Result<Option<Question>>;

    async fn create_question(&self, candidate_id: i64, fields: QuestionFields) -> Result<Question>;

    async fn update_question(&self, id: i64, fields: QuestionFields) -> Result<Option<Question>>;

    async fn update_question_answer(&self, id: i64, answer: Option<String>) -> Result<Option<Question>>;

    async fn delete_question(&self, id: i64) -> Result<bool>;

    // events

    async fn find_events_by_candidate(
        &self,
        candidate_id: i64,
        job_id: Option<i64>,
    ) -> Result<Vec<Event>>;

    async fn find_event(&self, id: i64) -> Result<Option<Event>>;

    async fn create_event(&self, fields: EventFields) -> Result<Event>;

    async fn update_event(&self, id: i64, fields: EventFields) -> Result<Option<Event>>;

    async fn delete_event(&self, id: i64) -> Result<bool>;

    // applications

    async fn find_applications_by_user(
        &self,
        user_id: i64,
        job_id: Option<i64>,
    ) -> Result<Vec<Application>>;

    async fn find_application(&self, id: i64) -> Result<Option<Application>>;

    async fn create_application(&self, user_id: i64, fields: ApplicationFields) -> Result<Application>;

    async fn update_application(
        &self,
        id: i64,
        fields: ApplicationFields,
    ) -> Result<Option<Application>>;

    async fn delete_application(&self, id: i64) -> Result<bool>;
}
