use std::sync::Arc;

use crate::database::Store;
use crate::error::{Error, Result};
use crate::middleware::auth::Requester;
use crate::models::question::{Question, QuestionFields};

#[derive(Clone)]
pub struct QuestionService {
    store: Arc<dyn Store>,
}

impl QuestionService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self, requester: &Requester) -> Result<Vec<Question>> {
        self.store
            .find_questions_by_candidate(requester.candidate_id)
            .await
    }

    pub async fn retrieve(&self, requester: &Requester, id: i64) -> Result<Question> {
        let question = self
            .store
            .find_question(id)
            .await?
            .ok_or_else(Error::missing)?;
        requester.ensure_candidate(question.candidate_id)?;
        Ok(question)
    }

    pub async fn create(&self, requester: &Requester, fields: QuestionFields) -> Result<Question> {
        self.store
            .create_question(requester.candidate_id, fields)
            .await
    }

    pub async fn update(
        &self,
        requester: &Requester,
        id: i64,
        fields: QuestionFields,
    ) -> Result<Question> {
        self.retrieve(requester, id).await?;
        self.store
            .update_question(id, fields)
            .await?
            .ok_or_else(Error::missing)
    }

    /// Sets or clears only the answer; text and origin stay as they are.
    pub async fn answer(
        &self,
        requester: &Requester,
        id: i64,
        answer: Option<String>,
    ) -> Result<Question> {
        self.retrieve(requester, id).await?;
        self.store
            .update_question_answer(id, answer)
            .await?
            .ok_or_else(Error::missing)
    }

    pub async fn destroy(&self, requester: &Requester, id: i64) -> Result<()> {
        self.retrieve(requester, id).await?;
        if !self.store.delete_question(id).await? {
            return Err(Error::missing());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryStore;
    use crate::models::user::NewAccount;

    async fn setup() -> (QuestionService, Requester, Requester) {
        let store = Arc::new(InMemoryStore::seeded());
        let mut requesters = Vec::new();
        for email in ["alice@x.com", "bob@x.com"] {
            let account = store
                .create_account(NewAccount {
                    username: email.to_string(),
                    email: email.to_string(),
                    password_hash: "hash".to_string(),
                    first_name: String::new(),
                    last_name: String::new(),
                    token_key: email.to_string(),
                })
                .await
                .unwrap();
            requesters.push(Requester {
                user_id: account.user.id,
                candidate_id: account.candidate.id,
            });
        }
        (QuestionService::new(store), requesters[0], requesters[1])
    }

    #[tokio::test]
    async fn answer_mode_only_touches_the_answer() {
        let (questions, alice, _) = setup().await;
        let created = questions
            .create(
                &alice,
                QuestionFields {
                    question: "Why Rust?".to_string(),
                    is_from_interviewer: true,
                    answer: None,
                },
            )
            .await
            .unwrap();

        let answered = questions
            .answer(&alice, created.id, Some("Ownership".to_string()))
            .await
            .unwrap();
        assert_eq!(answered.answer.as_deref(), Some("Ownership"));
        assert_eq!(answered.question, "Why Rust?");
        assert!(answered.is_from_interviewer);

        let replaced = questions
            .update(
                &alice,
                created.id,
                QuestionFields {
                    question: "Why not Go?".to_string(),
                    is_from_interviewer: false,
                    answer: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(replaced.question, "Why not Go?");
        assert!(!replaced.is_from_interviewer);
        assert_eq!(replaced.answer, None);
    }

    #[tokio::test]
    async fn other_candidates_cannot_answer_or_delete() {
        let (questions, alice, bob) = setup().await;
        let created = questions
            .create(
                &alice,
                QuestionFields {
                    question: "Team size?".to_string(),
                    is_from_interviewer: false,
                    answer: None,
                },
            )
            .await
            .unwrap();

        assert!(matches!(
            questions.answer(&bob, created.id, Some("12".to_string())).await,
            Err(Error::NotFoundOrForbidden(_))
        ));
        assert!(questions.destroy(&bob, created.id).await.is_err());
        assert!(questions.list(&bob).await.unwrap().is_empty());

        questions.destroy(&alice, created.id).await.unwrap();
        assert!(questions.list(&alice).await.unwrap().is_empty());
    }
}
