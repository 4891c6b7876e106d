use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub details: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub job_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventFields {
    pub details: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub job_id: i64,
}

impl EventFields {
    pub fn ends_before_start(&self) -> bool {
        self.end_time < self.start_time
    }
}
