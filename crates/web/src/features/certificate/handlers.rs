use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use storage::{
    Database,
    dto::certificate::{CertificateQuery, CertificateResponse},
};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/certificate",
    params(CertificateQuery),
    responses(
        (status = 200, description = "Match found; eligibility and message in the body", body = CertificateResponse),
        (status = 400, description = "Missing search term"),
        (status = 404, description = "No participant matched the search term")
    ),
    tag = "certificate"
)]
pub async fn check_certificate(
    State(db): State<Database>,
    Query(query): Query<CertificateQuery>,
) -> Result<Response, WebError> {
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| WebError::BadRequest("Name or email is required".to_string()))?;

    let Some(participant) = services::find_participant(db.pool(), search).await? else {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "Participant not found",
                "eligible": false,
                "message": "No participant found with this name or email.",
            })),
        )
            .into_response());
    };

    Ok(Json(services::eligibility_response(participant)).into_response())
}
