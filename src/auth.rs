use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::{FromRequest, HttpRequest, web};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::password_hash::rand_core::OsRng;
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::future::{Ready, ready};
use thiserror::Error;

use crate::AUTH_COOKIE;
use crate::config::ServerConfig;
use crate::domain::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::services::auth as auth_service;

/// Errors from token and password primitives.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("failed to issue token: {0}")]
    TokenIssue(String),
    #[error("failed to hash password: {0}")]
    Hash(String),
}

/// Claims carried by issued HS256 tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id the token was issued for.
    pub sub: i32,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: i32, email: impl Into<String>, ttl_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            email: email.into(),
            exp: (now + Duration::minutes(ttl_minutes)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

/// Sign the claims with the server secret.
pub fn issue_token(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::TokenIssue("empty signing secret".to_string()));
    }
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|err| AuthError::TokenIssue(err.to_string()))
}

/// Verify signature and expiry, returning the claims.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)
}

/// Hash a password with argon2id and a fresh salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AuthError::Hash(err.to_string()))
}

/// Verify a password against a stored hash; parameters come from the hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Pull the presented token from the bearer header or the console cookie.
fn extract_token(req: &HttpRequest) -> Option<String> {
    if let Some(header) = req.headers().get("Authorization")
        && let Ok(value) = header.to_str()
        && let Some(token) = value.strip_prefix("Bearer ")
        && !token.trim().is_empty()
    {
        return Some(token.trim().to_string());
    }

    req.cookie(AUTH_COOKIE).map(|cookie| cookie.value().to_string())
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    /// Authentication is the conjunction of a structurally valid token and an
    /// active, unexpired session row; either failing yields 401. The HTML
    /// scope turns the 401 into a redirect to `/login`.
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(token) = extract_token(req) else {
            return ready(Err(ErrorUnauthorized("missing credentials")));
        };

        let (Some(repo), Some(config)) = (
            req.app_data::<web::Data<DieselRepository>>(),
            req.app_data::<web::Data<ServerConfig>>(),
        ) else {
            return ready(Err(ErrorUnauthorized("authentication not configured")));
        };

        match auth_service::authenticate(repo.get_ref(), &config.secret, &token) {
            Ok(user) => ready(Ok(user)),
            Err(_) => ready(Err(ErrorUnauthorized("invalid credentials"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_decode_with_the_same_secret() {
        let claims = Claims::new(7, "admin@example.com", 30);
        let token = issue_token(&claims, "secret").expect("issue");

        let decoded = decode_token(&token, "secret").expect("decode");
        assert_eq!(decoded.sub, 7);
        assert_eq!(decoded.email, "admin@example.com");
    }

    #[test]
    fn decode_rejects_wrong_secret() {
        let claims = Claims::new(7, "admin@example.com", 30);
        let token = issue_token(&claims, "secret").expect("issue");

        assert!(matches!(
            decode_token(&token, "other"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn decode_rejects_expired_token() {
        let claims = Claims::new(7, "admin@example.com", -5);
        let token = issue_token(&claims, "secret").expect("issue");

        assert!(matches!(
            decode_token(&token, "secret"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn password_round_trip() {
        let hash = hash_password("hunter2hunter2").expect("hash");
        assert!(verify_password("hunter2hunter2", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("hunter2hunter2", "not-a-hash"));
    }
}
