//! Signed access/refresh token issuance and validation.
//!
//! Both token kinds share the signing key and claim layout; they are kept
//! apart by the `aud` claim (`{issuer}-users` vs `{issuer}-refresh`). A
//! refresh token must never pass access-token validation and vice versa.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// JWT configuration for a single service instance.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Secret key for signing and verifying tokens.
    pub secret: Vec<u8>,
    /// Access token lifetime.
    pub access_ttl: Duration,
    /// Refresh token lifetime.
    pub refresh_ttl: Duration,
    /// Issuer claim, also the audience prefix.
    pub issuer: String,
}

/// Claims carried by both token kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Uuid,
    pub iss: String,
    pub aud: Vec<String>,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Not-before (seconds since epoch)
    pub nbf: i64,
}

/// Access and refresh tokens returned to the client after authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    fn audience(self, issuer: &str) -> String {
        match self {
            TokenKind::Access => format!("{issuer}-users"),
            TokenKind::Refresh => format!("{issuer}-refresh"),
        }
    }

    fn ttl(self, config: &TokenConfig) -> Duration {
        match self {
            TokenKind::Access => config.access_ttl,
            TokenKind::Refresh => config.refresh_ttl,
        }
    }
}

/// Errors raised by token operations. Callers on the HTTP boundary collapse
/// every validation variant into a single opaque 401.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),
    #[error("failed to parse token: {0}")]
    InvalidToken(jsonwebtoken::errors::Error),
    #[error("invalid token issuer")]
    InvalidIssuer,
    #[error("invalid token audience")]
    InvalidAudience,
}

/// Sole authority for creating and validating tokens. Holds only immutable
/// configuration, so it is safe to share across request handlers.
#[derive(Debug, Clone)]
pub struct TokenManager {
    config: TokenConfig,
}

impl TokenManager {
    pub fn new(config: TokenConfig) -> Self {
        Self { config }
    }

    pub fn access_ttl(&self) -> Duration {
        self.config.access_ttl
    }

    /// Generate both tokens for a freshly authenticated user.
    pub fn generate_token_pair(&self, user_id: Uuid) -> Result<TokenPair, TokenError> {
        let access_token = self.generate_access_token(user_id)?;
        let refresh_token = self.generate_refresh_token(user_id)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.config.access_ttl.as_secs() as i64,
        })
    }

    pub fn generate_access_token(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.generate(TokenKind::Access, user_id)
    }

    pub fn generate_refresh_token(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.generate(TokenKind::Refresh, user_id)
    }

    pub fn validate_access_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate(TokenKind::Access, token)
    }

    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate(TokenKind::Refresh, token)
    }

    fn generate(&self, kind: TokenKind, user_id: Uuid) -> Result<String, TokenError> {
        let iat = OffsetDateTime::now_utc().unix_timestamp();
        let exp = iat + kind.ttl(&self.config).as_secs() as i64;

        let claims = Claims {
            user_id,
            iss: self.config.issuer.clone(),
            aud: vec![kind.audience(&self.config.issuer)],
            exp,
            iat,
            nbf: iat,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.config.secret),
        )
        .map_err(TokenError::Signing)
    }

    fn validate(&self, kind: TokenKind, token: &str) -> Result<Claims, TokenError> {
        // Pin the algorithm to HS256; tokens declaring anything else fail
        // decoding. Expiry is checked at parse time with zero leeway.
        // Audience is checked by hand below so the mismatch maps to a
        // distinct variant.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.config.secret),
            &validation,
        )
        .map_err(TokenError::InvalidToken)?;

        let claims = data.claims;

        if claims.iss != self.config.issuer {
            return Err(TokenError::InvalidIssuer);
        }

        let expected = kind.audience(&self.config.issuer);
        if !claims.aud.iter().any(|aud| *aud == expected) {
            return Err(TokenError::InvalidAudience);
        }

        Ok(claims)
    }
}
