use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config;

/// Lifetime of self-issued service tokens.
pub const SERVICE_TOKEN_EXPIRE_MINUTES: i64 = 30;

/// Subject claim identifying this process on service-to-service calls.
const SERVICE_SUBJECT: &str = "0";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn service() -> Self {
        let now = Utc::now();
        Self {
            sub: SERVICE_SUBJECT.to_string(),
            exp: (now + Duration::minutes(SERVICE_TOKEN_EXPIRE_MINUTES)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidToken(String),
    InvalidSubject(String),
    InvalidSecret,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidToken(msg) => write!(f, "Invalid JWT token: {}", msg),
            JwtError::InvalidSubject(sub) => write!(f, "Subject claim is not a user id: {}", sub),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
        }
    }
}

impl std::error::Error for JwtError {}

/// Verify a bearer token against the shared secret and extract the user id
/// it asserts. Rejects bad signatures, expired tokens, and subjects that do
/// not parse as an integer.
pub fn verify_token(token: &str) -> Result<i64, JwtError> {
    verify_with_secret(token, &config::config().jwt_secret)
}

/// Issue a short-lived token asserting the service identity, for outbound
/// calls to the matcher. Same signing scheme the token provider uses.
pub fn issue_service_token() -> Result<String, JwtError> {
    sign_with_secret(&Claims::service(), &config::config().jwt_secret)
}

fn verify_with_secret(token: &str, secret: &str) -> Result<i64, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

    token_data
        .claims
        .sub
        .parse::<i64>()
        .map_err(|_| JwtError::InvalidSubject(token_data.claims.sub))
}

fn sign_with_secret(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}
