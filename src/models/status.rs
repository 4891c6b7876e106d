use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Status {
    pub id: i64,
    pub label: String,
}

pub const DEFAULT_STATUSES: [&str; 5] = ["interested", "applied", "interviewing", "offer", "rejected"];
