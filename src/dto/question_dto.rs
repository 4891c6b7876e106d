use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::{Question, QuestionFields};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuestionPayload {
    #[validate(length(min = 1))]
    pub question: String,
    pub is_from_interviewer: bool,
    #[serde(default)]
    pub answer: Option<String>,
}

impl From<QuestionPayload> for QuestionFields {
    fn from(value: QuestionPayload) -> Self {
        Self {
            question: value.question,
            is_from_interviewer: value.is_from_interviewer,
            answer: value.answer,
        }
    }
}

/// Body of `PUT /questions/{id}?answer=true`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerPayload {
    pub answer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QuestionUpdateQuery {
    pub answer: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub id: i64,
    pub url: String,
    pub question: String,
    pub is_from_interviewer: bool,
    pub answer: Option<String>,
    pub candidate_id: i64,
}

impl From<Question> for QuestionResponse {
    fn from(value: Question) -> Self {
        Self {
            id: value.id,
            url: format!("/questions/{}", value.id),
            question: value.question,
            is_from_interviewer: value.is_from_interviewer,
            answer: value.answer,
            candidate_id: value.candidate_id,
        }
    }
}
