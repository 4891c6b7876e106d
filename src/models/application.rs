use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: i64,
    pub job_id: i64,
    pub user_id: i64,
    pub status_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationFields {
    pub job_id: i64,
    pub status_id: i64,
}
