use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::database::repository::Store;
use crate::error::{Error, Result};
use crate::models::{
    application::{Application, ApplicationFields},
    candidate::Candidate,
    company::Company,
    event::{Event, EventFields},
    job::{Job, JobFields},
    question::{Question, QuestionFields},
    status::{Status, DEFAULT_STATUSES},
    token::AuthToken,
    user::{Account, NewAccount, User},
};

struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn allocate(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
struct Tables {
    users: Table<User>,
    candidates: Table<Candidate>,
    tokens: BTreeMap<String, AuthToken>,
    companies: Table<Company>,
    statuses: Table<Status>,
    jobs: Table<Job>,
    questions: Table<Question>,
    events: Table<Event>,
    applications: Table<Application>,
}

impl Tables {
    fn require_status(&self, id: i64) -> Result<()> {
        if self.statuses.rows.contains_key(&id) {
            Ok(())
        } else {
            Err(Error::BadRequest(format!("Status {} does not exist", id)))
        }
    }

    fn require_company(&self, id: i64) -> Result<()> {
        if self.companies.rows.contains_key(&id) {
            Ok(())
        } else {
            Err(Error::BadRequest(format!("Company {} does not exist", id)))
        }
    }

    fn require_job(&self, id: i64) -> Result<()> {
        if self.jobs.rows.contains_key(&id) {
            Ok(())
        } else {
            Err(Error::BadRequest(format!("Job {} does not exist", id)))
        }
    }

    fn remove_job_cascade(&mut self, id: i64) -> bool {
        if self.jobs.rows.remove(&id).is_none() {
            return false;
        }
        self.events.rows.retain(|_, e| e.job_id != id);
        self.applications.rows.retain(|_, a| a.job_id != id);
        true
    }
}

/// Process-local `Store` with the same referential rules as the SQL schema.
/// Used by the test suite and when no `DATABASE_URL` is configured.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the default statuses, ids 1 through 5.
    pub fn seeded() -> Self {
        let mut tables = Tables::default();
        for label in DEFAULT_STATUSES {
            let id = tables.statuses.allocate();
            tables.statuses.rows.insert(
                id,
                Status {
                    id,
                    label: label.to_string(),
                },
            );
        }
        Self {
            tables: Mutex::new(tables),
        }
    }

    /// Removes a user together with everything that cascades from it.
    pub async fn delete_user(&self, user_id: i64) -> bool {
        let mut t = self.tables.lock().await;
        if t.users.rows.remove(&user_id).is_none() {
            return false;
        }
        t.tokens.retain(|_, token| token.user_id != user_id);
        t.applications.rows.retain(|_, a| a.user_id != user_id);
        let candidate_ids: Vec<i64> = t
            .candidates
            .rows
            .values()
            .filter(|c| c.user_id == user_id)
            .map(|c| c.id)
            .collect();
        for candidate_id in candidate_ids {
            t.candidates.rows.remove(&candidate_id);
            t.questions.rows.retain(|_, q| q.candidate_id != candidate_id);
            let job_ids: Vec<i64> = t
                .jobs
                .rows
                .values()
                .filter(|j| j.candidate_id == candidate_id)
                .map(|j| j.id)
                .collect();
            for job_id in job_ids {
                t.remove_job_cascade(job_id);
            }
        }
        true
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn find_user(&self, id: i64) -> Result<Option<User>> {
        let t = self.tables.lock().await;
        Ok(t.users.rows.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let t = self.tables.lock().await;
        Ok(t.users.rows.values().find(|u| u.username == username).cloned())
    }

    async fn create_account(&self, account: NewAccount) -> Result<Account> {
        let mut t = self.tables.lock().await;
        // All checks run before the first insert so a failure leaves no rows.
        if t.users.rows.values().any(|u| u.username == account.username) {
            return Err(Error::BadRequest(
                "A user with that email is already registered".to_string(),
            ));
        }
        if t.tokens.contains_key(&account.token_key) {
            return Err(Error::Conflict("Record already exists".to_string()));
        }

        let now = Utc::now();
        let user_id = t.users.allocate();
        let user = User {
            id: user_id,
            username: account.username,
            email: account.email,
            password_hash: account.password_hash,
            first_name: account.first_name,
            last_name: account.last_name,
            is_active: true,
            date_joined: now,
        };
        let candidate_id = t.candidates.allocate();
        let candidate = Candidate {
            id: candidate_id,
            user_id,
        };
        let token = AuthToken {
            key: account.token_key,
            user_id,
            created: now,
        };

        t.users.rows.insert(user_id, user.clone());
        t.candidates.rows.insert(candidate_id, candidate.clone());
        t.tokens.insert(token.key.clone(), token.clone());

        Ok(Account {
            user,
            candidate,
            token,
        })
    }

    async fn find_candidate_by_user(&self, user_id: i64) -> Result<Option<Candidate>> {
        let t = self.tables.lock().await;
        Ok(t.candidates.rows.values().find(|c| c.user_id == user_id).cloned())
    }

    async fn find_token_for_user(&self, user_id: i64) -> Result<Option<AuthToken>> {
        let t = self.tables.lock().await;
        Ok(t.tokens.values().find(|tok| tok.user_id == user_id).cloned())
    }

    async fn create_token(&self, user_id: i64, key: String) -> Result<AuthToken> {
        let mut t = self.tables.lock().await;
        if !t.users.rows.contains_key(&user_id) {
            return Err(Error::BadRequest(format!("User {} does not exist", user_id)));
        }
        if t.tokens.contains_key(&key) || t.tokens.values().any(|tok| tok.user_id == user_id) {
            return Err(Error::Conflict("Record already exists".to_string()));
        }
        let token = AuthToken {
            key: key.clone(),
            user_id,
            created: Utc::now(),
        };
        t.tokens.insert(key, token.clone());
        Ok(token)
    }

    async fn find_user_by_token(&self, key: &str) -> Result<Option<User>> {
        let t = self.tables.lock().await;
        Ok(t.tokens
            .get(key)
            .and_then(|tok| t.users.rows.get(&tok.user_id))
            .cloned())
    }

    async fn list_companies(&self) -> Result<Vec<Company>> {
        let t = self.tables.lock().await;
        let mut items: Vec<Company> = t.companies.rows.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(items)
    }

    async fn find_company(&self, id: i64) -> Result<Option<Company>> {
        let t = self.tables.lock().await;
        Ok(t.companies.rows.get(&id).cloned())
    }

    async fn create_company(&self, name: String) -> Result<Company> {
        let mut t = self.tables.lock().await;
        let id = t.companies.allocate();
        let company = Company { id, name };
        t.companies.rows.insert(id, company.clone());
        Ok(company)
    }

    async fn update_company(&self, id: i64, name: String) -> Result<Option<Company>> {
        let mut t = self.tables.lock().await;
        Ok(t.companies.rows.get_mut(&id).map(|company| {
            company.name = name;
            company.clone()
        }))
    }

    async fn delete_company(&self, id: i64) -> Result<bool> {
        let mut t = self.tables.lock().await;
        if t.jobs.rows.values().any(|j| j.company_id == id) {
            return Err(Error::Conflict(
                "company is still referenced by existing records".to_string(),
            ));
        }
        Ok(t.companies.rows.remove(&id).is_some())
    }

    async fn list_statuses(&self) -> Result<Vec<Status>> {
        let t = self.tables.lock().await;
        Ok(t.statuses.rows.values().cloned().collect())
    }

    async fn find_status(&self, id: i64) -> Result<Option<Status>> {
        let t = self.tables.lock().await;
        Ok(t.statuses.rows.get(&id).cloned())
    }

    async fn delete_status(&self, id: i64) -> Result<bool> {
        let mut t = self.tables.lock().await;
        let referenced = t.jobs.rows.values().any(|j| j.status_id == id)
            || t.applications.rows.values().any(|a| a.status_id == id);
        if referenced {
            return Err(Error::Conflict(
                "status is still referenced by existing records".to_string(),
            ));
        }
        Ok(t.statuses.rows.remove(&id).is_some())
    }

    async fn find_jobs_by_candidate(&self, candidate_id: i64) -> Result<Vec<Job>> {
        let t = self.tables.lock().await;
        let mut items: Vec<Job> = t
            .jobs
            .rows
            .values()
            .filter(|j| j.candidate_id == candidate_id)
            .cloned()
            .collect();
        items.sort_by_key(|j| (j.company_id, j.id));
        Ok(items)
    }

    async fn find_job(&self, id: i64) -> Result<Option<Job>> {
        let t = self.tables.lock().await;
        Ok(t.jobs.rows.get(&id).cloned())
    }

    async fn create_job(&self, candidate_id: i64, fields: JobFields) -> Result<Job> {
        let mut t = self.tables.lock().await;
        if !t.candidates.rows.contains_key(&candidate_id) {
            return Err(Error::BadRequest(format!(
                "Candidate {} does not exist",
                candidate_id
            )));
        }
        t.require_status(fields.status_id)?;
        t.require_company(fields.company_id)?;
        let id = t.jobs.allocate();
        let job = Job {
            id,
            title: fields.title,
            description: fields.description,
            link: fields.link,
            candidate_id,
            status_id: fields.status_id,
            company_id: fields.company_id,
        };
        t.jobs.rows.insert(id, job.clone());
        Ok(job)
    }

    async fn update_job(&self, id: i64, fields: JobFields) -> Result<Option<Job>> {
        let mut t = self.tables.lock().await;
        if !t.jobs.rows.contains_key(&id) {
            return Ok(None);
        }
        t.require_status(fields.status_id)?;
        t.require_company(fields.company_id)?;
        Ok(t.jobs.rows.get_mut(&id).map(|job| {
            job.title = fields.title;
            job.description = fields.description;
            job.link = fields.link;
            job.status_id = fields.status_id;
            job.company_id = fields.company_id;
            job.clone()
        }))
    }

    async fn delete_job(&self, id: i64) -> Result<bool> {
        let mut t = self.tables.lock().await;
        Ok(t.remove_job_cascade(id))
    }

    async fn find_questions_by_candidate(&self, candidate_id: i64) -> Result<Vec<Question>> {
        let t = self.tables.lock().await;
        Ok(t.questions
            .rows
            .values()
            .filter(|q| q.candidate_id == candidate_id)
            .cloned()
            .collect())
    }

    async fn find_question(&self, id: i64) -> Result<Option<Question>> {
        let t = self.tables.lock().await;
        Ok(t.questions.rows.get(&id).cloned())
    }

    async fn create_question(&self, candidate_id: i64, fields: QuestionFields) -> Result<Question> {
        let mut t = self.tables.lock().await;
        if !t.candidates.rows.contains_key(&candidate_id) {
            return Err(Error::BadRequest(format!(
                "Candidate {} does not exist",
                candidate_id
            )));
        }
        let id = t.questions.allocate();
        let question = Question {
            id,
            question: fields.question,
            is_from_interviewer: fields.is_from_interviewer,
            answer: fields.answer,
            candidate_id,
        };
        t.questions.rows.insert(id, question.clone());
        Ok(question)
    }

    async fn update_question(&self, id: i64, fields: QuestionFields) -> Result<Option<Question>> {
        let mut t = self.tables.lock().await;
        Ok(t.questions.rows.get_mut(&id).map(|question| {
            question.question = fields.question;
            question.is_from_interviewer = fields.is_from_interviewer;
            question.answer = fields.answer;
            question.clone()
        }))
    }

    async fn update_question_answer(&self, id: i64, answer: Option<String>) -> Result<Option<Question>> {
        let mut t = self.tables.lock().await;
        Ok(t.questions.rows.get_mut(&id).map(|question| {
            question.answer = answer;
            question.clone()
        }))
    }

    async fn delete_question(&self, id: i64) -> Result<bool> {
        let mut t = self.tables.lock().await;
        Ok(t.questions.rows.remove(&id).is_some())
    }

    async fn find_events_by_candidate(
        &self,
        candidate_id: i64,
        job_id: Option<i64>,
    ) -> Result<Vec<Event>> {
        let t = self.tables.lock().await;
        let mut items: Vec<Event> = t
            .events
            .rows
            .values()
            .filter(|e| {
                t.jobs
                    .rows
                    .get(&e.job_id)
                    .is_some_and(|j| j.candidate_id == candidate_id)
            })
            .filter(|e| job_id.map_or(true, |wanted| e.job_id == wanted))
            .cloned()
            .collect();
        items.sort_by_key(|e| (e.start_time, e.id));
        Ok(items)
    }

    async fn find_event(&self, id: i64) -> Result<Option<Event>> {
        let t = self.tables.lock().await;
        Ok(t.events.rows.get(&id).cloned())
    }

    async fn create_event(&self, fields: EventFields) -> Result<Event> {
        let mut t = self.tables.lock().await;
        t.require_job(fields.job_id)?;
        let id = t.events.allocate();
        let event = Event {
            id,
            details: fields.details,
            start_time: fields.start_time,
            end_time: fields.end_time,
            job_id: fields.job_id,
        };
        t.events.rows.insert(id, event.clone());
        Ok(event)
    }

    async fn update_event(&self, id: i64, fields: EventFields) -> Result<Option<Event>> {
        let mut t = self.tables.lock().await;
        if !t.events.rows.contains_key(&id) {
            return Ok(None);
        }
        t.require_job(fields.job_id)?;
        Ok(t.events.rows.get_mut(&id).map(|event| {
            event.details = fields.details;
            event.start_time = fields.start_time;
            event.end_time = fields.end_time;
            event.job_id = fields.job_id;
            event.clone()
        }))
    }

    async fn delete_event(&self, id: i64) -> Result<bool> {
        let mut t = self.tables.lock().await;
        Ok(t.events.rows.remove(&id).is_some())
    }

    async fn find_applications_by_user(
        &self,
        user_id: i64,
        job_id: Option<i64>,
    ) -> Result<Vec<Application>> {
        let t = self.tables.lock().await;
        Ok(t.applications
            .rows
            .values()
            .filter(|a| a.user_id == user_id)
            .filter(|a| job_id.map_or(true, |wanted| a.job_id == wanted))
            .cloned()
            .collect())
    }

    async fn find_application(&self, id: i64) -> Result<Option<Application>> {
        let t = self.tables.lock().await;
        Ok(t.applications.rows.get(&id).cloned())
    }

    async fn create_application(&self, user_id: i64, fields: ApplicationFields) -> Result<Application> {
        let mut t = self.tables.lock().await;
        if !t.users.rows.contains_key(&user_id) {
            return Err(Error::BadRequest(format!("User {} does not exist", user_id)));
        }
        t.require_job(fields.job_id)?;
        t.require_status(fields.status_id)?;
        let id = t.applications.allocate();
        let application = Application {
            id,
            job_id: fields.job_id,
            user_id,
            status_id: fields.status_id,
        };
        t.applications.rows.insert(id, application.clone());
        Ok(application)
    }

    async fn update_application(
        &self,
        id: i64,
        fields: ApplicationFields,
    ) -> Result<Option<Application>> {
        let mut t = self.tables.lock().await;
        if !t.applications.rows.contains_key(&id) {
            return Ok(None);
        }
        t.require_job(fields.job_id)?;
        t.require_status(fields.status_id)?;
        Ok(t.applications.rows.get_mut(&id).map(|application| {
            application.job_id = fields.job_id;
            application.status_id = fields.status_id;
            application.clone()
        }))
    }

    async fn delete_application(&self, id: i64) -> Result<bool> {
        let mut t = self.tables.lock().await;
        Ok(t.applications.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_account(email: &str, key: &str) -> NewAccount {
        NewAccount {
            username: email.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            token_key: key.to_string(),
        }
    }

    async fn job_for(store: &InMemoryStore, candidate_id: i64) -> Job {
        let company = store.create_company("acme".to_string()).await.unwrap();
        store
            .create_job(
                candidate_id,
                JobFields {
                    title: "Engineer".to_string(),
                    description: "Builds things".to_string(),
                    link: "https://acme.test/jobs/1".to_string(),
                    status_id: 1,
                    company_id: company.id,
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn duplicate_username_writes_nothing() {
        let store = InMemoryStore::seeded();
        store.create_account(new_account("a@x.com", "k1")).await.unwrap();

        let err = store
            .create_account(new_account("a@x.com", "k2"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));

        let t = store.tables.lock().await;
        assert_eq!(t.users.rows.len(), 1);
        assert_eq!(t.candidates.rows.len(), 1);
        assert_eq!(t.tokens.len(), 1);
        assert!(!t.tokens.contains_key("k2"));
    }

    #[tokio::test]
    async fn deleting_job_cascades_to_events() {
        let store = InMemoryStore::seeded();
        let account = store.create_account(new_account("a@x.com", "k1")).await.unwrap();
        let job = job_for(&store, account.candidate.id).await;
        let start = Utc::now();
        let event = store
            .create_event(EventFields {
                details: "Phone screen".to_string(),
                start_time: start,
                end_time: start + Duration::minutes(30),
                job_id: job.id,
            })
            .await
            .unwrap();

        assert!(store.delete_job(job.id).await.unwrap());
        assert!(store.find_event(event.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn referenced_status_cannot_be_deleted() {
        let store = InMemoryStore::seeded();
        let account = store.create_account(new_account("a@x.com", "k1")).await.unwrap();
        let job = job_for(&store, account.candidate.id).await;

        let err = store.delete_status(job.status_id).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
        assert!(store.find_job(job.id).await.unwrap().is_some());
        assert!(store.find_status(job.status_id).await.unwrap().is_some());

        assert!(store.delete_status(5).await.unwrap());
    }

    #[tokio::test]
    async fn job_requires_existing_status_and_company() {
        let store = InMemoryStore::seeded();
        let account = store.create_account(new_account("a@x.com", "k1")).await.unwrap();
        let err = store
            .create_job(
                account.candidate.id,
                JobFields {
                    title: "Engineer".to_string(),
                    description: String::new(),
                    link: String::new(),
                    status_id: 99,
                    company_id: 1,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
    }

    #[tokio::test]
    async fn deleting_user_removes_owned_rows() {
        let store = InMemoryStore::seeded();
        let account = store.create_account(new_account("a@x.com", "k1")).await.unwrap();
        let job = job_for(&store, account.candidate.id).await;

        assert!(store.delete_user(account.user.id).await);
        assert!(store.find_user_by_token("k1").await.unwrap().is_none());
        assert!(store.find_job(job.id).await.unwrap().is_none());
        assert!(store
            .find_candidate_by_user(account.user.id)
            .await
            .unwrap()
            .is_none());
    }
}
