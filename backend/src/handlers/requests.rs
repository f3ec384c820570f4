use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Extension, Path, State,
    },
    http::StatusCode,
    Json,
};

use crate::{
    error::AppError,
    models::{
        actor::Actor,
        request::{CreateRequestPayload, RejectRequestPayload, RequestResponse},
    },
    services::{request_scope::ensure_may_decide, RequestService},
    state::AppState,
    types::RequestId,
};

pub async fn list_requests(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<Vec<RequestResponse>>, AppError> {
    let requests = RequestService::new(state.pool).list(&actor).await?;
    Ok(Json(requests.into_iter().map(RequestResponse::from).collect()))
}

pub async fn create_request(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    payload: Result<Json<CreateRequestPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<RequestResponse>), AppError> {
    let Json(payload) = payload?;
    let created = RequestService::new(state.pool)
        .create(&actor, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn get_request(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    id: Result<Path<RequestId>, PathRejection>,
) -> Result<Json<RequestResponse>, AppError> {
    let Path(id) = id?;
    let request = RequestService::new(state.pool).get(&actor, id).await?;
    Ok(Json(request.into()))
}

pub async fn approve_request(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    id: Result<Path<RequestId>, PathRejection>,
) -> Result<Json<RequestResponse>, AppError> {
    let Path(id) = id?;
    let request = RequestService::new(state.pool).approve(&actor, id).await?;
    Ok(Json(request.into()))
}

pub async fn reject_request(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    id: Result<Path<RequestId>, PathRejection>,
    payload: Result<Json<RejectRequestPayload>, JsonRejection>,
) -> Result<Json<RequestResponse>, AppError> {
    let Path(id) = id?;
    ensure_may_decide(&actor)?;
    let Json(payload) = payload?;
    let request = RequestService::new(state.pool)
        .reject(&actor, id, payload)
        .await?;
    Ok(Json(request.into()))
}
