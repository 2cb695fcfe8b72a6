use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One score row per participant. Badge totals are split across the two
/// badge columns when persisted and summed back on read.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Score {
    pub id: Uuid,
    pub participant_id: Uuid,
    pub google_dev_badges: i32,
    pub google_skills_badges: i32,
    pub social_media_posts: i32,
    pub total_points: i32,
    pub last_scraped: Option<chrono::NaiveDateTime>,
    pub updated_at: chrono::NaiveDateTime,
}
