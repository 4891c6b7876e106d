use std::sync::Arc;

use tracing::warn;

use crate::database::Store;
use crate::error::{Error, Result};
use crate::middleware::auth::Requester;
use crate::models::event::{Event, EventFields};

/// Events are owned through their job: event -> job -> candidate.
#[derive(Clone)]
pub struct EventService {
    store: Arc<dyn Store>,
}

impl EventService {
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

    // Inverted ranges are stored as given; see DESIGN.md.
    fn flag_inverted_range(fields: &EventFields) {
        if fields.ends_before_start() {
            warn!(
                job_id = fields.job_id,
                start_time = %fields.start_time,
                end_time = %fields.end_time,
                "Event ends before it starts"
            );
        }
    }

    pub async fn list(&self, requester: &Requester, job_id: Option<i64>) -> Result<Vec<Event>> {
        self.store
            .find_events_by_candidate(requester.candidate_id, job_id)
            .await
    }

    pub async fn retrieve(&self, requester: &Requester, id: i64) -> Result<Event> {
        let event = self.store.find_event(id).await?.ok_or_else(Error::missing)?;
        self.ensure_job_owned(requester, event.job_id).await?;
        Ok(event)
    }

    pub async fn create(&self, requester: &Requester, fields: EventFields) -> Result<Event> {
        self.ensure_job_owned(requester, fields.job_id).await?;
        Self::flag_inverted_range(&fields);
        self.store.create_event(fields).await
    }

    /// The target job must also belong to the requester.
    pub async fn update(&self, requester: &Requester, id: i64, fields: EventFields) -> Result<Event> {
        self.retrieve(requester, id).await?;
        self.ensure_job_owned(requester, fields.job_id).await?;
        Self::flag_inverted_range(&fields);
        self.store
            .update_event(id, fields)
            .await?
            .ok_or_else(Error::missing)
    }

    pub async fn destroy(&self, requester: &Requester, id: i64) -> Result<()> {
        self.retrieve(requester, id).await?;
        if !self.store.delete_event(id).await? {
            return Err(Error::missing());
        }
        Ok(())
    }
}
