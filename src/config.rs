use crate::errors::AppError;
use crate::storage::CredentialBackend;
use std::env;

pub const DEFAULT_OWNER: &str = "SaryaRi";
pub const DEFAULT_REPO: &str = "compteur-tricot";
pub const DEFAULT_FILE: &str = "data.json";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_COMMIT_MESSAGE: &str = "Update data.json";
pub const DEFAULT_CREDENTIALS: &str = "json:data/credentials.json";

/// Where the counter lives and how to reach it.
#[derive(Debug, Clone)]
pub struct Config {
    pub owner: String,
    pub repo: String,
    pub file_path: String,
    pub pages_url: String,
    pub api_url: String,
    pub commit_message: String,
    pub credentials: CredentialBackend,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any variable source; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let owner = var("TRICOT_OWNER").unwrap_or_else(|| DEFAULT_OWNER.to_string());
        let repo = var("TRICOT_REPO").unwrap_or_else(|| DEFAULT_REPO.to_string());
        let file_path = var("TRICOT_FILE").unwrap_or_else(|| DEFAULT_FILE.to_string());
        let pages_url = var("TRICOT_PAGES_URL")
            .unwrap_or_else(|| format!("https://{owner}.github.io/{repo}"));
        let api_url = var("TRICOT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let commit_message =
            var("TRICOT_COMMIT_MESSAGE").unwrap_or_else(|| DEFAULT_COMMIT_MESSAGE.to_string());
        let credentials: CredentialBackend = var("TRICOT_CREDENTIALS")
            .as_deref()
            .unwrap_or(DEFAULT_CREDENTIALS)
            .parse()?;
        let port = match var("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| AppError::bad_request(format!("invalid PORT '{value}'")))?,
            None => 8080,
        };

        Ok(Self {
            owner,
            repo,
            file_path,
            pages_url: trim_slash(pages_url),
            api_url: trim_slash(api_url),
            commit_message,
            credentials,
            port,
        })
    }

    /// Public, unauthenticated copy served by GitHub Pages.
    pub fn data_url(&self) -> String {
        format!("{}/{}", self.pages_url, self.file_path)
    }

    /// Contents API endpoint used for the SHA lookup and the overwrite.
    pub fn contents_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_url, self.owner, self.repo, self.file_path
        )
    }
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
