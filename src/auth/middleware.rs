//! Authentication Middleware
//! Mission: One gate in front of every protected endpoint

use crate::auth::{api::AuthState, models::User};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

/// Auth middleware: bearer token -> verified claims -> resolved user.
///
/// The resolved [`User`] is inserted into request extensions; handlers take
/// it with `Extension<User>`.
pub async fn auth_middleware(
    State(auth): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let user = authorize(&auth, req.headers())?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Run the gate against a set of request headers
pub fn authorize(auth: &AuthState, headers: &HeaderMap) -> Result<User, AuthError> {
    let token = bearer_token(headers).ok_or(AuthError::MissingToken)?;

    let claims = auth.jwt_handler.verify(token).map_err(|e| {
        warn!("Rejected bearer token: {}", e);
        AuthError::InvalidToken
    })?;

    auth.user_store
        .get_user_by_username(&claims.sub)
        .ok_or(AuthError::UserNotFound)
}

/// Extract the token from `Authorization: Bearer <token>`
///
/// Only a missing header or a non-Bearer scheme yields `None`. `Bearer` with
/// an empty token still counts as presented, so it fails verification (403)
/// rather than the missing-token check (401).
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ').unwrap_or((value, ""));
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token)
}

/// Auth error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    InvalidCredentials,
    MissingToken,
    InvalidToken,
    UserNotFound,
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials | AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken => StatusCode::FORBIDDEN,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "Incorrect username or password",
            AuthError::MissingToken => "Not authenticated",
            AuthError::InvalidToken => "Could not validate credentials",
            AuthError::UserNotFound => "User not found",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let mut response =
            (self.status(), Json(json!({ "detail": self.message() }))).into_response();

        if self.status() == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Bearer"),
            );
        }

        response
    }
}
