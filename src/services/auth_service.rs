//! Credential issuing and verification.
//!
//! Credentials are HS256 JWTs delivered in an HTTP-only cookie named
//! `token`. Validity is entirely a matter of signature and expiry; the server
//! keeps no session state.

use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::config::Config;
use crate::models::auth::{CredentialRequest, TokenClaims};

/// Name of the cookie carrying the credential.
pub const TOKEN_COOKIE: &str = "token";

const RESERVED_CLAIMS: [&str; 4] = ["iat", "exp", "nbf", "aud"];

/// Errors raised while setting up or issuing credentials.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("TOKEN_TTL_SECS must be between 1 and {max}, got {0}", max = MAX_TTL_SECS)]
    InvalidTtl(i64),

    #[error("Credential expiry is out of range")]
    ExpiryOutOfRange,

    #[error("Signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Ten years.
const MAX_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

#[derive(Clone)]
pub struct AuthService {
    secret: String,
    ttl: Duration,
    cookie_secure: bool,
}

impl AuthService {
    pub fn new(secret: impl Into<String>, ttl: Duration, cookie_secure: bool) -> Self {
        Self {
            secret: secret.into(),
            ttl,
            cookie_secure,
        }
    }

    /// Build from configuration, rejecting a non-positive or oversized TTL.
    pub fn from_config(config: &Config) -> Result<Self, TokenError> {
        let ttl = match config.token_ttl_secs {
            secs @ 1..=MAX_TTL_SECS => Duration::try_seconds(secs),
            _ => None,
        }
        .ok_or(TokenError::InvalidTtl(config.token_ttl_secs))?;

        Ok(Self::new(
            config.access_token_secret.clone(),
            ttl,
            config.cookie_secure,
        ))
    }

    /// Sign the caller's claims.
    ///
    /// `iat` and `exp` are always set here. Caller-supplied registered claims
    /// that verification would act on are discarded.
    pub fn issue_token(&self, request: CredentialRequest) -> Result<String, TokenError> {
        let mut extra = request.extra;
        for reserved in RESERVED_CLAIMS {
            extra.remove(reserved);
        }

        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or(TokenError::ExpiryOutOfRange)?;
        let claims = TokenClaims {
            email: request.email,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            extra,
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?)
    }

    /// Check signature and expiry, returning the embedded claims.
    ///
    /// No clock leeway: a credential is rejected as soon as `exp` has passed.
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let token_data = decode::<TokenClaims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }

    /// Cookie delivering a freshly issued credential.
    pub fn credential_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((TOKEN_COOKIE, token))
            .path("/")
            .http_only(true)
            .secure(self.cookie_secure)
            .same_site(self.same_site())
            .build()
    }

    /// Cookie telling the client to discard the credential immediately.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = self.credential_cookie(String::new());
        cookie.make_removal();
        cookie
    }

    // Browsers drop SameSite=None cookies that are not also Secure
    fn same_site(&self) -> SameSite {
        if self.cookie_secure {
            SameSite::None
        } else {
            SameSite::Lax
        }
    }
}
