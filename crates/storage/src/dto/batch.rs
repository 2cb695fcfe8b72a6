use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One raw batch-import entry, either posted as JSON or parsed from pasted
/// delimited text. Name and email are validated at the reconciliation layer,
/// not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub badges: i32,
    #[serde(default)]
    pub posts: i32,
    pub google_dev_profile_url: Option<String>,
    pub google_skills_profile_url: Option<String>,
}

/// Body of `POST /api/participants/batch`: structured entries, or raw pasted
/// lines in the admin sheet format.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BatchImportRequest {
    pub participants: Option<Vec<BatchEntry>>,
    pub text: Option<String>,
}

/// Failure record for a single batch entry.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BatchEntryError {
    pub name: Option<String>,
    pub email: Option<String>,
    pub error: String,
}

/// Outcome of a batch reconciliation. Every input entry lands in exactly one
/// bucket: created, updated, or errors.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct BatchSummary {
    pub created: usize,
    pub updated: usize,
    pub errors: Vec<BatchEntryError>,
}

/// Response wrapper for the batch endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct BatchImportResponse {
    pub message: String,
    pub results: BatchSummary,
}
