use crate::errors::AppError;
use crate::storage::KeyValueStore;
use std::sync::Arc;
use tracing::error;

pub const TOKEN_KEY: &str = "githubToken";

/// Persists the GitHub token through whichever backend was configured.
#[derive(Clone)]
pub struct CredentialStore {
    backend: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub async fn get(&self) -> Option<String> {
        match self.backend.get(TOKEN_KEY).await {
            Ok(token) => token.filter(|token| !token.is_empty()),
            Err(err) => {
                error!("failed to read stored token: {err}");
                None
            }
        }
    }

    pub async fn set(&self, token: &str) -> Result<(), AppError> {
        self.backend.set(TOKEN_KEY, token).await
    }
}
