use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/prepare-action`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepareRequest {
    pub project_uuid: String,
    pub user_token: String,
}

/// A version that was previously submitted as a nanopublication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedVersion {
    /// Location of the published nanopublication
    #[serde(default)]
    pub uri: String,
    /// Version found in the nanopublication, if it could be extracted
    #[serde(default)]
    pub version: Option<String>,
    /// RFC 3339 timestamp of the submission
    #[serde(default)]
    pub submitted_at: Option<String>,
}

impl SubmittedVersion {
    /// Submission timestamp, when present and well-formed
    pub fn submitted_at_utc(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Response of `POST /api/prepare-action`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepareResponse {
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// Version currently stored in the project questionnaire
    #[serde(default)]
    pub questionnaire_version: Option<String>,
    #[serde(default)]
    pub submitted_versions: Vec<SubmittedVersion>,
    /// Raw questionnaire payload the backend may attach for troubleshooting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<serde_json::Value>,
}

/// Body of `POST /api/save-version` and `POST /api/submit-version`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRequest {
    pub project_uuid: String,
    pub user_token: String,
    pub version: String,
    pub description: String,
}

/// Response of `POST /api/save-version`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `POST /api/submit-version`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub document_done: Option<bool>,
    #[serde(default)]
    pub document_uuid: Option<String>,
    #[serde(default)]
    pub submission_done: Option<bool>,
    #[serde(default)]
    pub submission_uuid: Option<String>,
    #[serde(default)]
    pub submission_location: Option<String>,
}

impl SubmitResponse {
    pub fn is_submitted(&self) -> bool {
        self.submission_done.unwrap_or(false)
    }

    pub fn is_document_generated(&self) -> bool {
        self.document_done.unwrap_or(false)
    }
}
