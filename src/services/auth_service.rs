use std::sync::Arc;

use tracing::{info, warn};

use crate::database::Store;
use crate::dto::auth_dto::RegisterPayload;
use crate::error::{Error, Result};
use crate::middleware::auth::Requester;
use crate::models::{candidate::Candidate, user::NewAccount, user::User};
use crate::utils::{
    crypto::{hash_password, verify_password},
    token::generate_token_key,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Valid { token: String },
    Invalid,
}

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Creates the user, its candidate profile and its token, returning the
    /// token key. The email doubles as the username.
    pub async fn register(&self, payload: RegisterPayload) -> Result<String> {
        let username = payload.email.trim().to_string();
        if self.store.find_user_by_username(&username).await?.is_some() {
            return Err(Error::BadRequest(
                "A user with that email is already registered".to_string(),
            ));
        }

        let password_hash = hash_password(&payload.password)?;
        let account = self
            .store
            .create_account(NewAccount {
                email: username.clone(),
                username,
                password_hash,
                first_name: payload.first_name,
                last_name: payload.last_name,
                token_key: generate_token_key(),
            })
            .await?;

        info!(
            user_id = account.user.id,
            candidate_id = account.candidate.id,
            "Registered new account"
        );
        Ok(account.token.key)
    }

    /// Bad credentials are an ordinary outcome, not an error.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome> {
        let Some(user) = self.store.find_user_by_username(username.trim()).await? else {
            return Ok(LoginOutcome::Invalid);
        };
        if !user.is_active || !verify_password(password, &user.password_hash) {
            return Ok(LoginOutcome::Invalid);
        }

        let token = match self.store.find_token_for_user(user.id).await? {
            Some(token) => token,
            None => {
                warn!(user_id = user.id, "User had no token; issuing one at login");
                self.store.create_token(user.id, generate_token_key()).await?
            }
        };
        Ok(LoginOutcome::Valid { token: token.key })
    }

    pub async fn authenticate(&self, key: &str) -> Result<Requester> {
        let user = self
            .store
            .find_user_by_token(key)
            .await?
            .ok_or_else(|| Error::Unauthorized("Invalid token".to_string()))?;
        if !user.is_active {
            return Err(Error::Unauthorized("User inactive or deleted".to_string()));
        }

        let candidate = self
            .store
            .find_candidate_by_user(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = user.id, "Authenticated user has no candidate profile");
                Error::Unauthorized("No candidate profile for this account".to_string())
            })?;

        Ok(Requester {
            user_id: user.id,
            candidate_id: candidate.id,
        })
    }

    pub async fn profile(&self, requester: &Requester) -> Result<(Candidate, User)> {
        let user = self
            .store
            .find_user(requester.user_id)
            .await?
            .ok_or_else(Error::missing)?;
        let candidate = self
            .store
            .find_candidate_by_user(user.id)
            .await?
            .ok_or_else(Error::missing)?;
        Ok((candidate, user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryStore;

    fn service() -> AuthService {
        AuthService::new(Arc::new(InMemoryStore::seeded()))
    }

    fn payload(email: &str, password: &str) -> RegisterPayload {
        RegisterPayload {
            email: email.to_string(),
            password: password.to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
        }
    }

    #[tokio::test]
    async fn login_returns_registration_token() {
        let auth = service();
        let token = auth.register(payload("a@x.com", "p")).await.unwrap();

        let outcome = auth.login("a@x.com", "p").await.unwrap();
        assert_eq!(outcome, LoginOutcome::Valid { token: token.clone() });

        // Tokens are stable across logins.
        let again = auth.login("a@x.com", "p").await.unwrap();
        assert_eq!(again, LoginOutcome::Valid { token });
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let auth = service();
        auth.register(payload("a@x.com", "p")).await.unwrap();
        let err = auth.register(payload("a@x.com", "other")).await.unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));

        // The first password still works; nothing was overwritten.
        assert!(matches!(
            auth.login("a@x.com", "p").await.unwrap(),
            LoginOutcome::Valid { .. }
        ));
    }

    #[tokio::test]
    async fn bad_credentials_are_invalid_not_errors() {
        let auth = service();
        auth.register(payload("a@x.com", "p")).await.unwrap();
        assert_eq!(auth.login("a@x.com", "wrong").await.unwrap(), LoginOutcome::Invalid);
        assert_eq!(auth.login("nobody@x.com", "p").await.unwrap(), LoginOutcome::Invalid);
    }

    #[tokio::test]
    async fn authenticate_resolves_candidate() {
        let auth = service();
        let token = auth.register(payload("a@x.com", "p")).await.unwrap();
        let requester = auth.authenticate(&token).await.unwrap();

        let (candidate, user) = auth.profile(&requester).await.unwrap();
        assert_eq!(candidate.id, requester.candidate_id);
        assert_eq!(user.username, "a@x.com");

        let err = auth.authenticate("not-a-token").await.unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }
}
