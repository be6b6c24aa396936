use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use chrono::{Local, NaiveDateTime};
use reservation_services::ReservationServiceError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

trait AsStatusCode {
    fn as_status_code(&self) -> StatusCode;
}

impl AsStatusCode for ReservationServiceError {
    fn as_status_code(&self) -> StatusCode {
        match self {
            ReservationServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ReservationServiceError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ReservationServiceError::InvalidState(_) => StatusCode::CONFLICT,
            ReservationServiceError::CorruptRecord(_) | ReservationServiceError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Body of every error response.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorResponse {
    pub message: String,
    pub detailed_message: String,
    pub error_time: NaiveDateTime,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ReservationServiceError),

    #[error(transparent)]
    Json(#[from] JsonRejection),

    #[error(transparent)]
    Path(#[from] PathRejection),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Service(e) => e.as_status_code(),
            ApiError::Json(_) | ApiError::Path(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn summary(status_code: StatusCode) -> &'static str {
        match status_code {
            StatusCode::NOT_FOUND => "Entity not found",
            StatusCode::BAD_REQUEST => "Bad request",
            StatusCode::CONFLICT => "Operation not allowed",
            _ => "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            error!("request failed: {}", self);
        }

        let body = Json(ErrorResponse {
            message: Self::summary(status_code).to_owned(),
            detailed_message: self.to_string(),
            error_time: Local::now().naive_local(),
        });

        (status_code, body).into_response()
    }
}

pub fn router() -> Router<crate::ServerState> {
    let router_v1 = Router::new().nest("/reservations", crate::reservations::router());

    Router::new().nest("/v1", router_v1)
}
