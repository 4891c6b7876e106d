use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: i64,
    pub name: String,
}

pub const MAX_NAME_LENGTH: usize = 50;

/// Company names are shared across users and always stored lowercase.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
