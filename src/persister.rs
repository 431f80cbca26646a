use crate::errors::AppError;
use crate::models::{FileMetadata, ProjectState, UpdateFileRequest};
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{
    Client,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use tracing::{debug, info};

/// Writes the whole document back through the contents API.
#[derive(Clone)]
pub struct StatePersister {
    client: Client,
    contents_url: String,
    message: String,
}

impl StatePersister {
    pub fn new(client: Client, contents_url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            client,
            contents_url: contents_url.into(),
            message: message.into(),
        }
    }

    /// Overwrites the remote file with `state` and returns the SHA the write
    /// was conditioned on. The SHA is fetched right before the write, so a
    /// concurrent writer in between is silently overwritten.
    pub async fn save(&self, token: &str, state: &ProjectState) -> Result<String, AppError> {
        let sha = self.fetch_sha().await?;
        let request = UpdateFileRequest {
            message: &self.message,
            content: encode_content(state)?,
            sha: &sha,
        };

        self.client
            .put(&self.contents_url)
            .header(AUTHORIZATION, format!("token {token}"))
            .header(CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(&request)?)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(AppError::upstream)?;

        info!(count = state.count, %sha, "saved data.json");
        Ok(sha)
    }

    pub async fn fetch_sha(&self) -> Result<String, AppError> {
        debug!("fetching file metadata from {}", self.contents_url);
        let metadata: FileMetadata = self
            .client
            .get(&self.contents_url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(AppError::upstream)?
            .json()
            .await
            .map_err(AppError::upstream)?;
        Ok(metadata.sha)
    }
}

/// Base64 of the pretty-printed document, as the contents API expects.
pub fn encode_content(state: &ProjectState) -> Result<String, AppError> {
    let pretty = serde_json::to_string_pretty(state)?;
    Ok(STANDARD.encode(pretty.as_bytes()))
}
