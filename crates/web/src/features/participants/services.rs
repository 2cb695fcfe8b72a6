use sqlx::PgPool;
use storage::{
    dto::batch::{BatchEntry, BatchSummary},
    dto::participant::{CreateParticipantRequest, ParticipantResponse, UpdateParticipantRequest},
    error::Result,
    repository::participant::ParticipantRepository,
    services::reconcile,
};
use uuid::Uuid;

/// List all participants in leaderboard order
pub async fn list_participants(pool: &PgPool) -> Result<Vec<ParticipantResponse>> {
    let repo = ParticipantRepository::new(pool);
    repo.list().await
}

/// Get a single participant by ID
pub async fn get_participant(pool: &PgPool, id: Uuid) -> Result<ParticipantResponse> {
    let repo = ParticipantRepository::new(pool);
    repo.find_by_id(id).await
}

/// Register a new participant with an initial score
pub async fn create_participant(
    pool: &PgPool,
    request: &CreateParticipantRequest,
) -> Result<ParticipantResponse> {
    let repo = ParticipantRepository::new(pool);
    repo.create(request).await
}

/// Update a participant, recomputing the point total
pub async fn update_participant(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateParticipantRequest,
) -> Result<ParticipantResponse> {
    let repo = ParticipantRepository::new(pool);
    repo.update(id, request).await
}

/// Delete a participant and its score
pub async fn delete_participant(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = ParticipantRepository::new(pool);
    repo.delete(id).await
}

/// Run batch reconciliation over already-parsed entries
pub async fn batch_import(pool: &PgPool, entries: &[BatchEntry]) -> BatchSummary {
    reconcile::reconcile(pool, entries).await
}
