use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token encoding failed: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid token")]
    Invalid,
}

/// HS256 claims. `sub` carries the username; expiry is enforced by
/// `jsonwebtoken`'s default validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn issue_token(username: &str, secret: &str, ttl_secs: i64) -> Result<String, JwtError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: username.to_owned(),
        iat: now,
        exp: now + ttl_secs,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| JwtError::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-that-is-long-enough-for-hs256";

    #[test]
    fn token_round_trips() {
        let token = issue_token("alice", SECRET, 3600).unwrap();
        let claims = decode_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = issue_token("alice", SECRET, -3600).unwrap();
        assert!(decode_token(&token, SECRET).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token("alice", SECRET, 3600).unwrap();
        assert!(decode_token(&token, "a-different-secret-entirely").is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(decode_token("not.a.jwt", SECRET).is_err());
    }
}
