use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub link: String,
    pub candidate_id: i64,
    pub status_id: i64,
    pub company_id: i64,
}

/// Client-writable columns. The owning candidate is never part of this.
#[derive(Debug, Clone, PartialEq)]
pub struct JobFields {
    pub title: String,
    pub description: String,
    pub link: String,
    pub status_id: i64,
    pub company_id: i64,
}
