//! Credential models.
//!
//! A credential is a signed JWT carrying the caller's email plus whatever
//! other members the client sent to `POST /jwt`. Nothing is persisted.

use serde::{Deserialize, Serialize};

use crate::store::Document;

/// Body of `POST /jwt`.
///
/// # JSON Example
///
/// ```json
/// {
///   "email": "owner@example.com"
/// }
/// ```
///
/// Members other than `email` are carried into the token unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialRequest {
    pub email: String,

    #[serde(flatten)]
    pub extra: Document,
}

/// Claims embedded in the signed token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Identity used for authorization checks
    pub email: String,

    /// Issued at (Unix seconds)
    pub iat: i64,

    /// Expiry (Unix seconds)
    pub exp: i64,

    #[serde(flatten)]
    pub extra: Document,
}

/// `{ "success": true }`, returned by login and logout.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
