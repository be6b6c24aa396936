use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use reservation_domain::ReservationDraft;
use tracing::info;

use crate::api::ApiError;

async fn list_reservations(State(state): State<crate::ServerState>) -> Result<Response, ApiError> {
    info!("listing reservations");
    Ok(Json(state.reservations.list()?).into_response())
}

async fn get_reservation(
    State(state): State<crate::ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.reservations.get(id)?).into_response())
}

async fn create_reservation(
    State(state): State<crate::ServerState>,
    body: Result<Json<ReservationDraft>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(draft) = body?;
    info!(room_id = draft.room_id, "creating reservation");
    let created = state.reservations.create(draft)?;
    Ok((StatusCode::CREATED, Json(created)).into_response())
}

async fn update_reservation(
    State(state): State<crate::ServerState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<ReservationDraft>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    let Json(draft) = body?;
    info!(id, "updating reservation");
    Ok(Json(state.reservations.update(id, draft)?).into_response())
}

async fn cancel_reservation(
    State(state): State<crate::ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    info!(id, "cancelling reservation");
    state.reservations.cancel(id)?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn approve_reservation(
    State(state): State<crate::ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    info!(id, "approving reservation");
    Ok(Json(state.reservations.approve(id)?).into_response())
}

pub fn router() -> Router<crate::ServerState> {
    Router::new()
        .route("/", get(list_reservations).post(create_reservation))
        .route("/:id", get(get_reservation).put(update_reservation))
        .route("/:id/cancel", delete(cancel_reservation))
        .route("/:id/approve", post(approve_reservation))
}
