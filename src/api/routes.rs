use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Extension, Router,
};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::{
    api::BodyRejection,
    auth::{api as auth_api, auth_middleware, AuthState, User},
    doctors::DoctorDirectory,
    middleware::request_logging,
    models::{
        Appointment, AppointmentRequest, AppointmentResponse, Doctor, HealthMetrics,
        MessageResponse, SymptomCheckRequest, SymptomCheckResponse,
    },
    store::{AppointmentBook, MetricsStore},
    symptoms::{SymptomChecker, NO_MATCH_MESSAGE},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub metrics: Arc<MetricsStore>,
    pub appointments: Arc<AppointmentBook>,
    pub doctors: Arc<DoctorDirectory>,
    pub symptoms: Arc<SymptomChecker>,
}

impl AppState {
    /// Fresh stores around an auth setup, with the seeded doctor directory
    pub fn new(auth: AuthState) -> Self {
        Self {
            auth,
            metrics: Arc::new(MetricsStore::new()),
            appointments: Arc::new(AppointmentBook::new()),
            doctors: Arc::new(DoctorDirectory::seeded()),
            symptoms: Arc::new(SymptomChecker::new()),
        }
    }
}

/// Create the API router.
///
/// Protected routes sit behind [`auth_middleware`]; `/static` is served from
/// `static_dir` when one is given.
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let auth_router = Router::new()
        .route("/register", post(auth_api::register))
        .route("/token", post(auth_api::login))
        .with_state(state.auth.clone());

    let protected_routes = Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/update", post(update_dashboard))
        .route("/appointments", post(create_appointment))
        .route("/symptom-checker", post(check_symptoms))
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ))
        .with_state(state.clone());

    let public_routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/doctors", get(get_doctors))
        .with_state(state);

    let mut app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(auth_router);

    if let Some(dir) = static_dir {
        app = app.nest_service("/static", ServeDir::new(dir));
    }

    app.layer(middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ===== Route Handlers =====

async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to the Health API".to_string(),
    })
}

/// Liveness check
async fn health_check() -> &'static str {
    "OK"
}

async fn get_doctors(State(state): State<AppState>) -> Json<Vec<Doctor>> {
    Json(state.doctors.list().to_vec())
}

async fn get_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Json<HealthMetrics> {
    Json(state.metrics.get(user.id))
}

async fn update_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    WithRejection(Json(metrics), _): WithRejection<Json<HealthMetrics>, BodyRejection>,
) -> Json<HealthMetrics> {
    state.metrics.put(user.id, metrics.clone());
    Json(metrics)
}

/// Book an appointment for the caller with a directory doctor
async fn create_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    WithRejection(Json(request), _): WithRejection<Json<AppointmentRequest>, BodyRejection>,
) -> Result<Json<AppointmentResponse>, ApiError> {
    let doctor = state
        .doctors
        .get(request.doctor_id)
        .ok_or(ApiError::DoctorNotFound)?;

    if request.date <= Utc::now() {
        return Err(ApiError::InvalidAppointmentDate);
    }

    let appointment = Appointment {
        patient_id: user.id,
        doctor_id: doctor.id,
        date: request.date,
        reason: request.reason,
        doctor_name: doctor.name.clone(),
        specialty: doctor.specialty.clone(),
    };
    state.appointments.push(appointment.clone());

    info!(
        patient = %user.username,
        doctor = %doctor.name,
        date = %appointment.date,
        "📅 Appointment scheduled"
    );

    Ok(Json(AppointmentResponse {
        message: "Appointment scheduled successfully".to_string(),
        appointment,
    }))
}

async fn check_symptoms(
    State(state): State<AppState>,
    Extension(_user): Extension<User>,
    WithRejection(Json(request), _): WithRejection<Json<SymptomCheckRequest>, BodyRejection>,
) -> Json<SymptomCheckResponse> {
    let matched_conditions = state.symptoms.check(&request.symptoms);

    if matched_conditions.is_empty() {
        return Json(SymptomCheckResponse::NoMatch {
            message: NO_MATCH_MESSAGE.to_string(),
        });
    }

    Json(SymptomCheckResponse::Matched { matched_conditions })
}

// ===== Error Handling =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    DoctorNotFound,
    InvalidAppointmentDate,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::DoctorNotFound => (StatusCode::NOT_FOUND, "Doctor not found"),
            ApiError::InvalidAppointmentDate => (
                StatusCode::BAD_REQUEST,
                "Appointment date must be in the future.",
            ),
        };

        (status, Json(json!({ "detail": message }))).into_response()
    }
}
