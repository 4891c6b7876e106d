use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::job::{Job, JobFields};

/// There is deliberately no `candidate_id` here; unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct JobPayload {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    pub description: String,
    pub link: String,
    pub status_id: i64,
    pub company_id: i64,
}

impl From<JobPayload> for JobFields {
    fn from(value: JobPayload) -> Self {
        Self {
            title: value.title,
            description: value.description,
            link: value.link,
            status_id: value.status_id,
            company_id: value.company_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub description: String,
    pub link: String,
    pub candidate_id: i64,
    pub status_id: i64,
    pub company_id: i64,
}

impl From<Job> for JobResponse {
    fn from(value: Job) -> Self {
        Self {
            id: value.id,
            url: format!("/jobs/{}", value.id),
            title: value.title,
            description: value.description,
            link: value.link,
            candidate_id: value.candidate_id,
            status_id: value.status_id,
            company_id: value.company_id,
        }
    }
}
