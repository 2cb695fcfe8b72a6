use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Participant as served to clients: profile fields plus the combined
/// badge/post/point counts from the score row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub google_dev_profile_url: Option<String>,
    pub google_skills_profile_url: Option<String>,
    pub badges: i32,
    pub posts: i32,
    pub points: i32,
    pub last_scraped: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

/// Leaderboard payload, sorted descending by points.
#[derive(Debug, Serialize, ToSchema)]
pub struct ParticipantListResponse {
    pub participants: Vec<ParticipantResponse>,
}

/// Single-record payload, `{"participant": {...}}` on the wire.
#[derive(Debug, Serialize, ToSchema)]
pub struct ParticipantEnvelope {
    pub participant: ParticipantResponse,
}

/// Update confirmation with the resulting record.
#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateParticipantResponse {
    pub message: String,
    pub participant: ParticipantResponse,
}

/// Request payload for registering a new participant
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateParticipantRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(range(min = 0, message = "Badge count cannot be negative"))]
    pub badges: i32,

    #[serde(default)]
    #[validate(range(min = 0, message = "Post count cannot be negative"))]
    pub posts: i32,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub google_dev_profile_url: Option<String>,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub google_skills_profile_url: Option<String>,
}

/// Request payload for updating an existing participant
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParticipantRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(range(min = 0))]
    pub badges: Option<i32>,

    #[validate(range(min = 0))]
    pub posts: Option<i32>,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub google_dev_profile_url: Option<String>,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub google_skills_profile_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_wire_format_is_camel_case() {
        let response = ParticipantResponse {
            id: Uuid::new_v4(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            google_dev_profile_url: None,
            google_skills_profile_url: None,
            badges: 0,
            posts: 0,
            points: 0,
            last_scraped: None,
            created_at: NaiveDateTime::default(),
            updated_at: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("googleDevProfileUrl").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("google_dev_profile_url").is_none());
    }
}
