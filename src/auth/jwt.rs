use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::ApiError;
use crate::state::AppState;

/// Signed session-token payload. Validity is determined solely by signature
/// and expiry; nothing is persisted server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,        // user ID
    pub username: String, // display identity, avoids a DB hit on checkUser
    pub iat: usize,       // issued at (unix timestamp)
    pub exp: usize,       // expires at (unix timestamp)
}

/// The authenticated identity attached to a request after token verification.
#[derive(Debug, Clone)]
pub struct Principal {
    pub userid: Uuid,
    pub username: String,
}

#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub session_ttl: Duration,
    pub remember_ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            session_ttl_hours,
            remember_ttl_hours,
        } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            session_ttl: Duration::hours(session_ttl_hours),
            remember_ttl: Duration::hours(remember_ttl_hours),
        }
    }
}

impl JwtKeys {
    /// Issue a session token. `remember` selects the long-lived TTL.
    pub fn sign(&self, userid: Uuid, username: &str, remember: bool) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let ttl = if remember {
            self.remember_ttl
        } else {
            self.session_ttl
        };
        let exp = now + ttl;
        let claims = Claims {
            sub: userid,
            username: username.to_string(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(%userid, remember, "session token signed");
        Ok(token)
    }

    /// Verify signature and expiry. Any failure collapses into one error at
    /// the caller; the cause is not surfaced to the client.
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

/// Extracts and verifies the bearer token, yielding the principal. The sole
/// gate in front of every protected route.
pub struct AuthUser(pub Principal);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized)?;

        let claims = match keys.verify(token) {
            Ok(c) => c,
            Err(_) => {
                warn!("invalid or expired token");
                return Err(ApiError::Unauthorized);
            }
        };

        Ok(AuthUser(Principal {
            userid: claims.sub,
            username: claims.username,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys() -> JwtKeys {
        let state = AppState::fake();
        JwtKeys::from_ref(&state)
    }

    #[tokio::test]
    async fn sign_and_verify_session_token() {
        let keys = make_keys();
        let userid = Uuid::new_v4();
        let token = keys.sign(userid, "alice", false).expect("sign");
        let claims = keys.verify(&token).expect("verify token");
        assert_eq!(claims.sub, userid);
        assert_eq!(claims.username, "alice");
    }

    #[tokio::test]
    async fn remember_me_extends_expiry_to_thirty_days() {
        let keys = make_keys();
        let userid = Uuid::new_v4();

        let short = keys.verify(&keys.sign(userid, "bob", false).unwrap()).unwrap();
        let long = keys.verify(&keys.sign(userid, "bob", true).unwrap()).unwrap();

        assert_eq!(short.exp - short.iat, 24 * 3600);
        assert_eq!(long.exp - long.iat, 30 * 24 * 3600);
    }

    #[tokio::test]
    async fn verify_rejects_expired_token() {
        let mut keys = make_keys();
        // Negative TTL puts exp beyond the default leeway into the past.
        keys.session_ttl = Duration::minutes(-5);
        let token = keys.sign(Uuid::new_v4(), "carol", false).expect("sign");
        assert!(keys.verify(&token).is_err());
    }

    #[tokio::test]
    async fn verify_rejects_tampered_token() {
        let keys = make_keys();
        let mut token = keys.sign(Uuid::new_v4(), "dave", false).expect("sign");
        token.push('x');
        assert!(keys.verify(&token).is_err());
    }

    #[tokio::test]
    async fn verify_rejects_token_signed_with_other_secret() {
        let keys = make_keys();
        let other = JwtKeys {
            encoding: EncodingKey::from_secret(b"other-secret"),
            decoding: DecodingKey::from_secret(b"other-secret"),
            session_ttl: Duration::hours(24),
            remember_ttl: Duration::hours(720),
        };
        let token = other.sign(Uuid::new_v4(), "eve", false).expect("sign");
        assert!(keys.verify(&token).is_err());
    }

    #[tokio::test]
    async fn verify_rejects_garbage() {
        let keys = make_keys();
        assert!(keys.verify("not.a.jwt").is_err());
        assert!(keys.verify("").is_err());
    }
}
