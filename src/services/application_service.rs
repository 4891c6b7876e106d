use std::sync::Arc;

use crate::database::Store;
use crate::error::{Error, Result};
use crate::middleware::auth::Requester;
use crate::models::application::{Application, ApplicationFields};

/// Applications belong to the user directly and point at one of the
/// user's own jobs.
#[derive(Clone)]
pub struct ApplicationService {
    store: Arc<dyn Store>,
}

impl ApplicationService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    async fn ensure_job_owned(&self, requester: &Requester, job_id: i64) -> Result<()> {
        let job = self
            .store
            .find_job(job_id)
            .await?
            .ok_or_else(Error::missing)?;
        requester.ensure_candidate(job.candidate_id)
    }

    pub async fn list(
        &self,
        requester: &Requester,
        job_id: Option<i64>,
    ) -> Result<Vec<Application>> {
        self.store
            .find_applications_by_user(requester.user_id, job_id)
            .await
    }

    pub async fn retrieve(&self, requester: &Requester, id: i64) -> Result<Application> {
        let application = self
            .store
            .find_application(id)
            .await?
            .ok_or_else(Error::missing)?;
        requester.ensure_user(application.user_id)?;
        Ok(application)
    }

    pub async fn create(
        &self,
        requester: &Requester,
        fields: ApplicationFields,
    ) -> Result<Application> {
        self.ensure_job_owned(requester, fields.job_id).await?;
        self.store
            .create_application(requester.user_id, fields)
            .await
    }

    pub async fn update(
        &self,
        requester: &Requester,
        id: i64,
        fields: ApplicationFields,
    ) -> Result<Application> {
        self.retrieve(requester, id).await?;
        self.ensure_job_owned(requester, fields.job_id).await?;
        self.store
            .update_application(id, fields)
            .await?
            .ok_or_else(Error::missing)
    }

    pub async fn destroy(&self, requester: &Requester, id: i64) -> Result<()> {
        self.retrieve(requester, id).await?;
        if !self.store.delete_application(id).await? {
            return Err(Error::missing());
        }
        Ok(())
    }
}
