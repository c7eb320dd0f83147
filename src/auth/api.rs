//! Authentication API Endpoints
//! Mission: Registration and password-flow token issuance

use crate::api::BodyRejection;
use crate::auth::{
    jwt::JwtHandler,
    middleware::AuthError,
    models::{LoginForm, RegisterRequest, TokenResponse, UserResponse},
    user_store::{CreateUserError, UserStore},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use axum_extra::extract::WithRejection;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub user_store: Arc<UserStore>,
    pub jwt_handler: Arc<JwtHandler>,
}

impl AuthState {
    pub fn new(user_store: Arc<UserStore>, jwt_handler: Arc<JwtHandler>) -> Self {
        Self {
            user_store,
            jwt_handler,
        }
    }
}

/// Registration endpoint - POST /register
pub async fn register(
    State(state): State<AuthState>,
    WithRejection(Json(payload), _): WithRejection<Json<RegisterRequest>, BodyRejection>,
) -> Result<Json<UserResponse>, AuthApiError> {
    let store = state.user_store.clone();
    let RegisterRequest {
        username,
        password,
        role,
    } = payload;

    // bcrypt is CPU-bound; keep it off the async workers.
    let (username, result) = tokio::task::spawn_blocking(move || {
        let result = store.create_user(&username, &password, &role);
        (username, result)
    })
    .await
    .map_err(|e| {
        error!("Registration task failed: {}", e);
        AuthApiError::InternalError
    })?;

    let user = result.map_err(|e| match e {
        CreateUserError::UsernameTaken => {
            warn!("Registration rejected, username taken: {}", username);
            AuthApiError::UserAlreadyExists
        }
        CreateUserError::Hash(e) => {
            error!("Registration failed for {}: {:#}", username, e);
            AuthApiError::InternalError
        }
    })?;

    Ok(Json(UserResponse::from_user(&user)))
}

/// Token endpoint - POST /token (OAuth2 password form)
pub async fn login(
    State(state): State<AuthState>,
    WithRejection(Form(form), _): WithRejection<Form<LoginForm>, BodyRejection>,
) -> Result<Json<TokenResponse>, AuthApiError> {
    info!("🔐 Login attempt: {}", form.username);

    let store = state.user_store.clone();
    let LoginForm { username, password } = form;

    let (username, user) = tokio::task::spawn_blocking(move || {
        let user = store.authenticate(&username, &password);
        (username, user)
    })
    .await
    .map_err(|e| {
        error!("Login task failed: {}", e);
        AuthApiError::InternalError
    })?;

    let user = user.ok_or_else(|| {
        warn!("❌ Failed login attempt: {}", username);
        AuthApiError::Auth(AuthError::InvalidCredentials)
    })?;

    let token = state.jwt_handler.issue(&user.username).map_err(|e| {
        error!("Token signing failed for {}: {:#}", user.username, e);
        AuthApiError::InternalError
    })?;

    info!("✅ Login successful: {} ({})", user.username, user.role);

    Ok(Json(TokenResponse::bearer(token)))
}

/// Auth API errors
#[derive(Debug)]
pub enum AuthApiError {
    Auth(AuthError),
    UserAlreadyExists,
    InternalError,
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::Auth(e) => return e.into_response(),
            AuthApiError::UserAlreadyExists => (StatusCode::CONFLICT, "Username already exists"),
            AuthApiError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(json!({ "detail": message }))).into_response()
    }
}
