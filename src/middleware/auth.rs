use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::error::{Error, Result};
use crate::AppState;

/// Identity resolved from the request token, inserted into request extensions
/// by [`require_token_auth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    pub user_id: i64,
    pub candidate_id: i64,
}

impl Requester {
    pub fn ensure_candidate(&self, owner_candidate_id: i64) -> Result<()> {
        if owner_candidate_id == self.candidate_id {
            Ok(())
        } else {
            Err(Error::not_owned())
        }
    }

    pub fn ensure_user(&self, owner_user_id: i64) -> Result<()> {
        if owner_user_id == self.user_id {
            Ok(())
        } else {
            Err(Error::not_owned())
        }
    }
}

/// Accepts `Token <key>` and `Bearer <key>`.
fn token_from_headers(headers: &HeaderMap) -> std::result::Result<&str, &'static str> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or("missing_authorization")?;
    let auth_str = auth_header.to_str().map_err(|_| "bad_authorization")?;
    let key = auth_str
        .strip_prefix("Token ")
        .or_else(|| auth_str.strip_prefix("Bearer "))
        .ok_or("unsupported_scheme")?
        .trim();
    if key.is_empty() {
        return Err("bad_authorization");
    }
    Ok(key)
}

fn unauthorized(code: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": code }))).into_response()
}

pub async fn require_token_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let key = match token_from_headers(req.headers()) {
        Ok(key) => key.to_string(),
        Err(code) => return unauthorized(code),
    };

    match state.auth_service.authenticate(&key).await {
        Ok(requester) => {
            req.extensions_mut().insert(requester);
            next.run(req).await
        }
        Err(Error::Unauthorized(_)) => unauthorized("invalid_token"),
        Err(other) => other.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        map
    }

    #[test]
    fn accepts_token_and_bearer_schemes() {
        assert_eq!(token_from_headers(&headers("Token abc")), Ok("abc"));
        assert_eq!(token_from_headers(&headers("Bearer abc")), Ok("abc"));
    }

    #[test]
    fn rejects_missing_or_foreign_schemes() {
        assert_eq!(
            token_from_headers(&HeaderMap::new()),
            Err("missing_authorization")
        );
        assert_eq!(
            token_from_headers(&headers("Basic dXNlcjpwYXNz")),
            Err("unsupported_scheme")
        );
        assert_eq!(token_from_headers(&headers("Token   ")), Err("bad_authorization"));
    }

    #[test]
    fn ownership_mismatch_is_not_owned() {
        let requester = Requester {
            user_id: 1,
            candidate_id: 10,
        };
        assert!(requester.ensure_candidate(10).is_ok());
        assert!(matches!(
            requester.ensure_candidate(11),
            Err(Error::NotFoundOrForbidden(crate::error::Lookup::NotOwned))
        ));
        assert!(requester.ensure_user(2).is_err());
    }
}
