use serde::{Deserialize, Serialize};

/// The document stored in `data.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectState {
    pub count: i64,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub project_link: Option<String>,
    pub history: Vec<String>,
}

/// Subset of the contents API file metadata we care about.
#[derive(Debug, Deserialize)]
pub struct FileMetadata {
    pub sha: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateFileRequest<'a> {
    pub message: &'a str,
    pub content: String,
    pub sha: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ClickRequest {
    pub action: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct EditForm {
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TokenForm {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClickResponse {
    pub outcome: String,
    pub count: Option<i64>,
}
