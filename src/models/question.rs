use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub is_from_interviewer: bool,
    pub answer: Option<String>,
    pub candidate_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionFields {
    pub question: String,
    pub is_from_interviewer: bool,
    pub answer: Option<String>,
}
