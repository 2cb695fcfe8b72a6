use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::batch::{BatchImportRequest, BatchImportResponse},
    dto::common::MessageResponse,
    dto::participant::{
        CreateParticipantRequest, ParticipantEnvelope, ParticipantListResponse,
        UpdateParticipantRequest, UpdateParticipantResponse,
    },
    services::reconcile,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/participants",
    responses(
        (status = 200, description = "Leaderboard, sorted descending by points", body = ParticipantListResponse)
    ),
    tag = "participants"
)]
pub async fn list_participants(State(db): State<Database>) -> Result<Response, WebError> {
    let participants = services::list_participants(db.pool()).await?;

    Ok(Json(ParticipantListResponse { participants }).into_response())
}

#[utoipa::path(
    get,
    path = "/api/participants/{id}",
    params(
        ("id" = Uuid, Path, description = "Participant ID")
    ),
    responses(
        (status = 200, description = "Participant found", body = ParticipantEnvelope),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn get_participant(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let participant = services::get_participant(db.pool(), id).await?;

    Ok(Json(ParticipantEnvelope { participant }).into_response())
}

#[utoipa::path(
    post,
    path = "/api/participants",
    request_body = CreateParticipantRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Participant created with its score", body = ParticipantEnvelope),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Email already registered")
    ),
    tag = "participants"
)]
pub async fn create_participant(
    State(db): State<Database>,
    Json(req): Json<CreateParticipantRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let participant = services::create_participant(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(ParticipantEnvelope { participant })).into_response())
}

#[utoipa::path(
    put,
    path = "/api/participants/{id}",
    params(
        ("id" = Uuid, Path, description = "Participant ID")
    ),
    request_body = UpdateParticipantRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Participant updated, points recomputed", body = UpdateParticipantResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn update_participant(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(update_req): Json<UpdateParticipantRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let participant = services::update_participant(db.pool(), id, &update_req).await?;

    Ok(Json(UpdateParticipantResponse {
        message: "Participant updated successfully".to_string(),
        participant,
    })
    .into_response())
}

#[utoipa::path(
    delete,
    path = "/api/participants/{id}",
    params(
        ("id" = Uuid, Path, description = "Participant ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Participant deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn delete_participant(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_participant(db.pool(), id).await?;

    Ok(Json(MessageResponse::new("Participant deleted successfully")).into_response())
}

#[utoipa::path(
    post,
    path = "/api/participants/batch",
    request_body = BatchImportRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Batch processed; per-entry failures are in results.errors", body = BatchImportResponse),
        (status = 400, description = "Neither a participants array nor text was supplied"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "participants"
)]
pub async fn batch_import(
    State(db): State<Database>,
    Json(req): Json<BatchImportRequest>,
) -> Result<Response, WebError> {
    let entries = match (req.participants, req.text) {
        (Some(participants), _) if !participants.is_empty() => participants,
        (_, Some(text)) if !text.trim().is_empty() => reconcile::parse_batch_text(&text),
        _ => {
            return Err(WebError::BadRequest(
                "Participants array is required".to_string(),
            ));
        }
    };

    let results = services::batch_import(db.pool(), &entries).await;

    Ok(Json(BatchImportResponse {
        message: "Batch operation completed".to_string(),
        results,
    })
    .into_response())
}
