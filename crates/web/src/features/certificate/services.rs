use sqlx::PgPool;
use storage::{
    dto::certificate::{CertificateParticipant, CertificateResponse},
    dto::participant::ParticipantResponse,
    error::Result,
    repository::participant::ParticipantRepository,
    services::scoring,
};

/// Best-effort participant lookup by name or email.
pub async fn find_participant(pool: &PgPool, term: &str) -> Result<Option<ParticipantResponse>> {
    let repo = ParticipantRepository::new(pool);
    repo.search(term.trim()).await
}

/// Decide certificate eligibility for a matched participant.
pub fn eligibility_response(participant: ParticipantResponse) -> CertificateResponse {
    let eligible = scoring::is_eligible_for_certificate(participant.badges);

    let message = if eligible {
        "Congratulations! You are eligible for a certificate.".to_string()
    } else {
        "You need at least 1 badge to qualify for a certificate.".to_string()
    };

    CertificateResponse {
        eligible,
        message,
        participant: CertificateParticipant {
            name: participant.name,
            email: participant.email,
            badges: participant.badges,
            posts: participant.posts,
            points: participant.points,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn participant(badges: i32) -> ParticipantResponse {
        ParticipantResponse {
            id: Uuid::new_v4(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            google_dev_profile_url: None,
            google_skills_profile_url: None,
            badges,
            posts: 3,
            points: badges * 25 + 30,
            last_scraped: None,
            created_at: chrono::NaiveDateTime::default(),
            updated_at: None,
        }
    }

    #[test]
    fn test_no_badges_is_ineligible_with_message() {
        let response = eligibility_response(participant(0));
        assert!(!response.eligible);
        assert!(!response.message.is_empty());
    }

    #[test]
    fn test_one_badge_is_eligible() {
        let response = eligibility_response(participant(1));
        assert!(response.eligible);
        assert_eq!(response.participant.points, 55);
    }
}
