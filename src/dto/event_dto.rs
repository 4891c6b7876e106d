use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::event::{Event, EventFields};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EventPayload {
    #[validate(length(min = 1, max = 255))]
    pub details: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub job_id: i64,
}

impl From<EventPayload> for EventFields {
    fn from(value: EventPayload) -> Self {
        Self {
            details: value.details,
            start_time: value.start_time,
            end_time: value.end_time,
            job_id: value.job_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EventListQuery {
    #[serde(default, deserialize_with = "super::empty_as_none")]
    pub job_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResponse {
    pub id: i64,
    pub url: String,
    pub details: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub job_id: i64,
}

impl From<Event> for EventResponse {
    fn from(value: Event) -> Self {
        Self {
            id: value.id,
            url: format!("/events/{}", value.id),
            details: value.details,
            start_time: value.start_time,
            end_time: value.end_time,
            job_id: value.job_id,
        }
    }
}
