//! Credential endpoints:
//! - POST /jwt - Issue a credential cookie
//! - POST /logout - Clear the credential cookie

use axum::{Json, extract::State};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    error::AppError,
    models::auth::{CredentialRequest, SuccessResponse},
    state::AppState,
};

/// Issue a signed credential and set it as the `token` cookie.
///
/// # Request Body
///
/// ```json
/// { "email": "owner@example.com" }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: `{ "success": true }` plus `Set-Cookie: token=...; HttpOnly; Secure`
/// - **Error (422)**: body is not an object with a string `email`
pub async fn issue_credential(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<CredentialRequest>,
) -> Result<(CookieJar, Json<SuccessResponse>), AppError> {
    tracing::info!(email = %request.email, "Issuing credential");

    let token = state.auth.issue_token(request)?;
    let jar = jar.add(state.auth.credential_cookie(token));

    Ok((jar, Json(SuccessResponse::ok())))
}

/// Tell the client to drop the `token` cookie. Always succeeds.
pub async fn clear_credential(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessResponse>) {
    let jar = jar.add(state.auth.removal_cookie());

    (jar, Json(SuccessResponse::ok()))
}
