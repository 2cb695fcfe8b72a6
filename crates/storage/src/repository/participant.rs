use chrono::NaiveDateTime;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::participant::{
    CreateParticipantRequest, ParticipantResponse, UpdateParticipantRequest,
};
use crate::error::{Result, StorageError};
use crate::models::Participant;
use crate::services::scoring;

/// Joined participant + score row. Score columns are nullable so that a
/// participant without a score row reads as zero everywhere.
#[derive(FromRow)]
struct ParticipantScoreRow {
    id: Uuid,
    name: String,
    email: String,
    google_dev_profile_url: Option<String>,
    google_skills_profile_url: Option<String>,
    created_at: NaiveDateTime,
    google_dev_badges: Option<i32>,
    google_skills_badges: Option<i32>,
    social_media_posts: Option<i32>,
    total_points: Option<i32>,
    last_scraped: Option<NaiveDateTime>,
    updated_at: Option<NaiveDateTime>,
}

impl From<ParticipantScoreRow> for ParticipantResponse {
    fn from(row: ParticipantScoreRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            google_dev_profile_url: row.google_dev_profile_url,
            google_skills_profile_url: row.google_skills_profile_url,
            badges: row.google_dev_badges.unwrap_or(0) + row.google_skills_badges.unwrap_or(0),
            posts: row.social_media_posts.unwrap_or(0),
            points: row.total_points.unwrap_or(0),
            last_scraped: row.last_scraped,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_WITH_SCORE: &str = r#"
    SELECT p.id, p.name, p.email, p.google_dev_profile_url, p.google_skills_profile_url,
           p.created_at, s.google_dev_badges, s.google_skills_badges,
           s.social_media_posts, s.total_points, s.last_scraped, s.updated_at
    FROM participants p
    LEFT JOIN scores s ON s.participant_id = p.id
"#;

pub struct ParticipantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ParticipantRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all participants with their scores, leaderboard order: descending
    /// by points, ties kept in insertion order.
    pub async fn list(&self) -> Result<Vec<ParticipantResponse>> {
        let rows: Vec<ParticipantScoreRow> = sqlx::query_as(&format!(
            "{SELECT_WITH_SCORE} ORDER BY COALESCE(s.total_points, 0) DESC, p.created_at"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(ParticipantResponse::from).collect())
    }

    /// Find a participant (with score) by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<ParticipantResponse> {
        let row: Option<ParticipantScoreRow> =
            sqlx::query_as(&format!("{SELECT_WITH_SCORE} WHERE p.id = $1"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        row.map(ParticipantResponse::from)
            .ok_or(StorageError::NotFound)
    }

    /// Find a participant by exact email, the reconciliation key.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Participant>> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            SELECT id, name, email, google_dev_profile_url, google_skills_profile_url, created_at
            FROM participants
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(participant)
    }

    /// Best-effort participant lookup for certificate checks: exact match on
    /// email or name first, then case-insensitive substring match. Of
    /// multiple matches the earliest-registered participant wins.
    pub async fn search(&self, term: &str) -> Result<Option<ParticipantResponse>> {
        let exact: Option<ParticipantScoreRow> = sqlx::query_as(&format!(
            "{SELECT_WITH_SCORE} WHERE p.email = $1 OR p.name = $1 ORDER BY p.created_at LIMIT 1"
        ))
        .bind(term)
        .fetch_optional(self.pool)
        .await?;

        if let Some(row) = exact {
            return Ok(Some(ParticipantResponse::from(row)));
        }

        let fuzzy: Option<ParticipantScoreRow> = sqlx::query_as(&format!(
            "{SELECT_WITH_SCORE} WHERE p.email ILIKE $1 OR p.name ILIKE $1 ORDER BY p.created_at LIMIT 1"
        ))
        .bind(format!("%{term}%"))
        .fetch_optional(self.pool)
        .await?;

        Ok(fuzzy.map(ParticipantResponse::from))
    }

    /// Create a participant and its score row.
    ///
    /// The two inserts are not transactional: if the score insert fails the
    /// freshly created participant is deleted again so no orphan row remains.
    pub async fn create(&self, req: &CreateParticipantRequest) -> Result<ParticipantResponse> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            INSERT INTO participants (name, email, google_dev_profile_url, google_skills_profile_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, google_dev_profile_url, google_skills_profile_url, created_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.google_dev_profile_url)
        .bind(&req.google_skills_profile_url)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            let err = StorageError::from(e);
            if err.is_unique_violation() {
                StorageError::ConstraintViolation(
                    "A participant with this email already exists".to_string(),
                )
            } else {
                err
            }
        })?;

        match self.write_score(participant.id, req.badges, req.posts).await {
            Ok(()) => self.find_by_id(participant.id).await,
            Err(e) => {
                tracing::warn!(
                    participant_id = %participant.id,
                    "score insert failed, rolling back participant: {e}"
                );
                if let Err(cleanup_err) = sqlx::query("DELETE FROM participants WHERE id = $1")
                    .bind(participant.id)
                    .execute(self.pool)
                    .await
                {
                    tracing::error!(
                        participant_id = %participant.id,
                        "failed to roll back orphaned participant: {cleanup_err}"
                    );
                }
                Err(e)
            }
        }
    }

    /// Update a participant, merging provided fields over the existing record
    /// and recomputing the point total from the resulting counts.
    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateParticipantRequest,
    ) -> Result<ParticipantResponse> {
        let existing = self.find_by_id(id).await?;

        let name = req.name.as_ref().unwrap_or(&existing.name);
        let email = req.email.as_ref().unwrap_or(&existing.email);
        let dev_url = req
            .google_dev_profile_url
            .as_ref()
            .or(existing.google_dev_profile_url.as_ref());
        let skills_url = req
            .google_skills_profile_url
            .as_ref()
            .or(existing.google_skills_profile_url.as_ref());
        let badges = req.badges.unwrap_or(existing.badges);
        let posts = req.posts.unwrap_or(existing.posts);

        let updated = sqlx::query(
            r#"
            UPDATE participants
            SET name = $2, email = $3, google_dev_profile_url = $4, google_skills_profile_url = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(dev_url)
        .bind(skills_url)
        .execute(self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.write_score(id, badges, posts).await?;
        self.find_by_id(id).await
    }

    /// Delete a participant; the score row goes with it via cascade.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM participants WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Upsert the score row for a participant from combined badge/post
    /// counts. The badge total is split across the two stored columns and the
    /// point total recomputed; this is the only write path for scores.
    async fn write_score(&self, participant_id: Uuid, badges: i32, posts: i32) -> Result<()> {
        let (dev_badges, skills_badges) = scoring::split_badges(badges);
        let total_points = scoring::compute_points(badges, posts);

        sqlx::query(
            r#"
            INSERT INTO scores (participant_id, google_dev_badges, google_skills_badges,
                                social_media_posts, total_points)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (participant_id) DO UPDATE
            SET google_dev_badges = EXCLUDED.google_dev_badges,
                google_skills_badges = EXCLUDED.google_skills_badges,
                social_media_posts = EXCLUDED.social_media_posts,
                total_points = EXCLUDED.total_points,
                updated_at = now()
            "#,
        )
        .bind(participant_id)
        .bind(dev_badges)
        .bind(skills_badges)
        .bind(posts)
        .bind(total_points)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ParticipantScoreRow {
        ParticipantScoreRow {
            id: Uuid::new_v4(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            google_dev_profile_url: None,
            google_skills_profile_url: None,
            created_at: NaiveDateTime::default(),
            google_dev_badges: None,
            google_skills_badges: None,
            social_media_posts: None,
            total_points: None,
            last_scraped: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_missing_score_reads_as_zero() {
        let response = ParticipantResponse::from(row());
        assert_eq!(response.badges, 0);
        assert_eq!(response.posts, 0);
        assert_eq!(response.points, 0);
        assert!(response.updated_at.is_none());
    }

    #[test]
    fn test_badge_columns_are_summed() {
        let mut row = row();
        row.google_dev_badges = Some(2);
        row.google_skills_badges = Some(3);
        row.social_media_posts = Some(4);
        row.total_points = Some(165);

        let response = ParticipantResponse::from(row);
        assert_eq!(response.badges, 5);
        assert_eq!(response.posts, 4);
        assert_eq!(response.points, 165);
    }
}
