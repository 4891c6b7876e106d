use serde::{Deserialize, Serialize};

use crate::models::application::{Application, ApplicationFields};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationPayload {
    pub job_id: i64,
    pub status_id: i64,
}

impl From<ApplicationPayload> for ApplicationFields {
    fn from(value: ApplicationPayload) -> Self {
        Self {
            job_id: value.job_id,
            status_id: value.status_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApplicationListQuery {
    #[serde(default, deserialize_with = "super::empty_as_none")]
    pub job_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub id: i64,
    pub url: String,
    pub job_id: i64,
    pub user_id: i64,
    pub status_id: i64,
}

impl From<Application> for ApplicationResponse {
    fn from(value: Application) -> Self {
        Self {
            id: value.id,
            url: format!("/applications/{}", value.id),
            job_id: value.job_id,
            user_id: value.user_id,
            status_id: value.status_id,
        }
    }
}
