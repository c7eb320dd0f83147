//! JSON error bodies for request-body rejections
//!
//! Used as the rejection type of `WithRejection<Json<T>, _>` and
//! `WithRejection<Form<T>, _>` so a body that fails to parse answers with
//! `{"detail": "..."}` like every other error, keeping axum's status code.

use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

#[derive(Debug)]
pub struct BodyRejection {
    status: StatusCode,
    detail: String,
}

impl From<JsonRejection> for BodyRejection {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<FormRejection> for BodyRejection {
    fn from(rejection: FormRejection) -> Self {
        Self {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}
