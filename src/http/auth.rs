//! Bearer-token authentication for the dashboard endpoints.
//!
//! Login creates an in-process session token; the [`AuthUser`] extractor
//! validates the `Authorization: Bearer <token>` header against the
//! session store and rejects unauthenticated requests with `401`.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::error::AppError;
use super::state::AppState;

/// Identity attached to an active session.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: i64,
    pub username: String,
}

/// In-memory session store mapping bearer tokens to users.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionUser>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session and return its token.
    pub fn create(&self, user_id: i64, username: &str) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.write().insert(
            token.clone(),
            SessionUser {
                user_id,
                username: username.to_string(),
            },
        );
        token
    }

    /// Resolve a token to its session user, if the session is active.
    pub fn get(&self, token: &str) -> Option<SessionUser> {
        self.sessions.read().get(token).cloned()
    }

    /// Invalidate a token. Returns whether a session existed.
    pub fn revoke(&self, token: &str) -> bool {
        self.sessions.write().remove(token).is_some()
    }
}

/// Extractor for authenticated requests.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: SessionUser,
    pub token: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing Authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("expected Bearer token".to_string()))?;

        let user = state
            .sessions
            .get(token)
            .ok_or_else(|| AppError::Unauthorized("invalid or expired token".to_string()))?;

        Ok(AuthUser {
            user,
            token: token.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_get_revoke() {
        let store = SessionStore::new();
        let token = store.create(1, "testuser");

        let user = store.get(&token).unwrap();
        assert_eq!(user.user_id, 1);
        assert_eq!(user.username, "testuser");

        assert!(store.revoke(&token));
        assert!(store.get(&token).is_none());
        assert!(!store.revoke(&token));
    }

    #[test]
    fn test_tokens_are_unique_per_session() {
        let store = SessionStore::new();
        let a = store.create(1, "testuser");
        let b = store.create(1, "testuser");
        assert_ne!(a, b);
    }

    #[test]
    fn test_unknown_token_is_rejected() {
        let store = SessionStore::new();
        assert!(store.get("not-a-token").is_none());
    }
}
