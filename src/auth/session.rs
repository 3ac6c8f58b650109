use std::sync::Arc;

use axum::extract::{Extension, FromRequest, RequestParts};
use axum::http::header;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::Signer;
use crate::error::{unauthorized_error, unexpected_error, Error};

pub const SESSION_TTL_HOURS: i64 = 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Rider,
    Driver,
}

/// The authenticated caller, as recovered from a bearer session token.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub role: Role,
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: Uuid,
    role: Role,
    iat: i64,
    exp: i64,
}

impl Signer {
    #[tracing::instrument(skip(self))]
    pub fn issue_session(&self, user: &User) -> Result<String, Error> {
        let now = Utc::now();

        let claims = SessionClaims {
            sub: user.id,
            role: user.role,
            iat: now.timestamp(),
            exp: (now + Duration::hours(SESSION_TTL_HOURS)).timestamp(),
        };

        self.sign(&claims)
    }

    pub fn verify_session(&self, token: &str) -> Result<User, Error> {
        let claims: SessionClaims = self.verify(token).map_err(|_| unauthorized_error())?;

        Ok(User {
            id: claims.sub,
            role: claims.role,
        })
    }
}

#[axum::async_trait]
impl<B: Send> FromRequest<B> for User {
    type Rejection = Error;

    async fn from_request(req: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
        let Extension(signer): Extension<Arc<Signer>> = Extension::from_request(req)
            .await
            .map_err(|_| unexpected_error())?;

        let header = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(unauthorized_error)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(unauthorized_error)?;

        signer.verify_session(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_token_round_trips_identity_and_role() {
        let signer = Signer::new("test-secret");
        let user = User {
            id: Uuid::new_v4(),
            role: Role::Driver,
        };

        let token = signer.issue_session(&user).unwrap();
        let recovered = signer.verify_session(&token).unwrap();

        assert_eq!(recovered.id, user.id);
        assert_eq!(recovered.role, Role::Driver);
    }

    #[test]
    fn garbage_tokens_are_unauthorized() {
        let signer = Signer::new("test-secret");

        assert!(signer.verify_session("not-a-token").is_err());
    }

    #[test]
    fn tokens_from_another_secret_are_unauthorized() {
        let signer = Signer::new("test-secret");
        let other = Signer::new("other-secret");
        let user = User {
            id: Uuid::new_v4(),
            role: Role::Rider,
        };

        let token = other.issue_session(&user).unwrap();

        assert!(signer.verify_session(&token).is_err());
    }

    #[test]
    fn expired_sessions_are_unauthorized() {
        let signer = Signer::new("test-secret");
        let now = Utc::now();

        let claims = SessionClaims {
            sub: Uuid::new_v4(),
            role: Role::Rider,
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let token = signer.sign(&claims).unwrap();

        assert!(signer.verify_session(&token).is_err());
    }
}
