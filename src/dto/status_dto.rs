use serde::{Deserialize, Serialize};

use crate::models::status::Status;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub id: i64,
    pub url: String,
    pub status: String,
}

impl From<Status> for StatusResponse {
    fn from(value: Status) -> Self {
        Self {
            id: value.id,
            url: format!("/statuses/{}", value.id),
            status: value.label,
        }
    }
}
