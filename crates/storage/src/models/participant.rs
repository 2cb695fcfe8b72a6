use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub google_dev_profile_url: Option<String>,
    pub google_skills_profile_url: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}
