use std::sync::Arc;

use crate::database::Store;
use crate::error::{Error, Result};
use crate::middleware::auth::Requester;
use crate::models::job::{Job, JobFields};

#[derive(Clone)]
pub struct JobService {
    store: Arc<dyn Store>,
}

impl JobService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self, requester: &Requester) -> Result<Vec<Job>> {
        self.store.find_jobs_by_candidate(requester.candidate_id).await
    }

    pub async fn retrieve(&self, requester: &Requester, id: i64) -> Result<Job> {
        let job = self.store.find_job(id).await?.ok_or_else(Error::missing)?;
        requester.ensure_candidate(job.candidate_id)?;
        Ok(job)
    }

    /// The owner is always the requester's candidate.
    pub async fn create(&self, requester: &Requester, fields: JobFields) -> Result<Job> {
        self.store.create_job(requester.candidate_id, fields).await
    }

    pub async fn update(&self, requester: &Requester, id: i64, fields: JobFields) -> Result<Job> {
        self.retrieve(requester, id).await?;
        self.store
            .update_job(id, fields)
            .await?
            .ok_or_else(Error::missing)
    }

    /// Events and applications for the job go with it.
    pub async fn destroy(&self, requester: &Requester, id: i64) -> Result<()> {
        self.retrieve(requester, id).await?;
        if !self.store.delete_job(id).await? {
            return Err(Error::missing());
        }
        tracing::info!(job_id = id, candidate_id = requester.candidate_id, "Deleted job");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::repository::MockStore;
    use crate::database::InMemoryStore;
    use crate::error::Lookup;
    use crate::models::user::NewAccount;

    async fn requester(store: &InMemoryStore, email: &str) -> Requester {
        let account = store
            .create_account(NewAccount {
                username: email.to_string(),
                email: email.to_string(),
                password_hash: "hash".to_string(),
                first_name: String::new(),
                last_name: String::new(),
                token_key: format!("key-{}", email),
            })
            .await
            .unwrap();
        Requester {
            user_id: account.user.id,
            candidate_id: account.candidate.id,
        }
    }

    fn fields(company_id: i64) -> JobFields {
        JobFields {
            title: "Backend Engineer".to_string(),
            description: "Rust services".to_string(),
            link: "https://example.com/job".to_string(),
            status_id: 1,
            company_id,
        }
    }

    #[tokio::test]
    async fn jobs_are_invisible_to_other_candidates() {
        let store = Arc::new(InMemoryStore::seeded());
        let alice = requester(&store, "alice@x.com").await;
        let bob = requester(&store, "bob@x.com").await;
        let company = store.create_company("acme".to_string()).await.unwrap();
        let jobs = JobService::new(store.clone());

        let job = jobs.create(&alice, fields(company.id)).await.unwrap();
        assert_eq!(job.candidate_id, alice.candidate_id);

        assert!(jobs.list(&bob).await.unwrap().is_empty());
        assert_eq!(jobs.list(&alice).await.unwrap().len(), 1);

        let err = jobs.retrieve(&bob, job.id).await.unwrap_err();
        assert!(matches!(err, Error::NotFoundOrForbidden(Lookup::NotOwned)));
        let err = jobs.retrieve(&bob, job.id + 100).await.unwrap_err();
        assert!(matches!(err, Error::NotFoundOrForbidden(Lookup::Missing)));

        assert!(jobs.update(&bob, job.id, fields(company.id)).await.is_err());
        assert!(jobs.destroy(&bob, job.id).await.is_err());
        assert!(jobs.retrieve(&alice, job.id).await.is_ok());
    }

    #[tokio::test]
    async fn update_replaces_all_fields_but_keeps_owner() {
        let store = Arc::new(InMemoryStore::seeded());
        let alice = requester(&store, "alice@x.com").await;
        let first = store.create_company("acme".to_string()).await.unwrap();
        let second = store.create_company("globex".to_string()).await.unwrap();
        let jobs = JobService::new(store.clone());

        let job = jobs.create(&alice, fields(first.id)).await.unwrap();
        let updated = jobs
            .update(
                &alice,
                job.id,
                JobFields {
                    title: "Staff Engineer".to_string(),
                    description: String::new(),
                    link: String::new(),
                    status_id: 3,
                    company_id: second.id,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Staff Engineer");
        assert_eq!(updated.description, "");
        assert_eq!(updated.status_id, 3);
        assert_eq!(updated.company_id, second.id);
        assert_eq!(updated.candidate_id, alice.candidate_id);
    }

    #[tokio::test]
    async fn store_faults_propagate_as_unexpected() {
        let mut store = MockStore::new();
        store
            .expect_find_jobs_by_candidate()
            .returning(|_| Err(Error::Internal("connection reset".to_string())));
        let jobs = JobService::new(Arc::new(store));

        let err = jobs
            .list(&Requester {
                user_id: 1,
                candidate_id: 1,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
    }
}
