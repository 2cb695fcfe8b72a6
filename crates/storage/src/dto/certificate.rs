use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct CertificateQuery {
    /// Name or email to look up, exact match first then substring.
    pub search: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CertificateParticipant {
    pub name: String,
    pub email: String,
    pub badges: i32,
    pub posts: i32,
    pub points: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CertificateResponse {
    pub eligible: bool,
    pub message: String,
    pub participant: CertificateParticipant,
}
