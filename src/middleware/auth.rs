//! Cookie credential middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Read the `token` cookie
//! 2. Verify its signature and expiry
//! 3. Inject the decoded claims into the request
//! 4. Reject anything else with HTTP 401
//!
//! Authorization (does this identity own the requested resource?) is left to
//! the handler, via [`ensure_owner`].

use crate::{
    error::AppError, models::auth::TokenClaims, services::auth_service::TOKEN_COOKIE,
    state::AppState,
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

/// Credential verification middleware function.
///
/// # Flow
///
/// 1. Extract the `token` cookie
/// 2. Decode it with the server secret, checking `exp`
/// 3. If valid: insert `TokenClaims` into the request, call next handler
/// 4. If missing or invalid: return 401 Unauthorized
///
/// Handlers behind this middleware receive the claims explicitly with
/// `Extension<TokenClaims>`.
pub async fn verify_credential(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_owned();

    let Some(cookie) = jar.get(TOKEN_COOKIE) else {
        tracing::warn!(path = %path, "Missing credential cookie");
        return Err(AppError::Unauthorized);
    };

    let claims = state.auth.verify_token(cookie.value()).map_err(|err| {
        tracing::warn!(path = %path, error = %err, "Credential verification failed");
        AppError::Unauthorized
    })?;

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Fail with 403 unless the credential's email is exactly `requested`.
///
/// An absent `requested` never matches.
pub fn ensure_owner(claims: &TokenClaims, requested: Option<&str>) -> Result<(), AppError> {
    if requested == Some(claims.email.as_str()) {
        Ok(())
    } else {
        tracing::warn!(
            credential = %claims.email,
            requested = requested.unwrap_or_default(),
            "Credential does not match requested email"
        );
        Err(AppError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Document;

    fn claims(email: &str) -> TokenClaims {
        TokenClaims {
            email: email.to_string(),
            iat: 0,
            exp: 0,
            extra: Document::new(),
        }
    }

    #[test]
    fn owner_check_requires_exact_match() {
        let claims = claims("a@b.com");

        assert!(ensure_owner(&claims, Some("a@b.com")).is_ok());
        assert!(matches!(
            ensure_owner(&claims, Some("A@b.com")),
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            ensure_owner(&claims, None),
            Err(AppError::Forbidden)
        ));
    }
}
