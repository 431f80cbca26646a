use crate::models::ProjectState;
use crate::view::View;
use chrono::Utc;
use reqwest::Client;
use tracing::{debug, error};

/// Reads the published `data.json` from GitHub Pages.
#[derive(Clone)]
pub struct StateLoader {
    client: Client,
    data_url: String,
}

impl StateLoader {
    pub fn new(client: Client, data_url: impl Into<String>) -> Self {
        Self {
            client,
            data_url: data_url.into(),
        }
    }

    /// Fetches a fresh copy and reflects it into `view`. Failures are logged
    /// and come back as `None`; the view is only touched on success.
    pub async fn load(&self, view: &mut View) -> Option<ProjectState> {
        let state = self.fetch().await?;
        view.reflect(&state);
        Some(state)
    }

    async fn fetch(&self) -> Option<ProjectState> {
        let cache_bust = Utc::now().timestamp_millis().to_string();
        debug!("loading {}?cacheBust={cache_bust}", self.data_url);

        let response = match self
            .client
            .get(&self.data_url)
            .query(&[("cacheBust", cache_bust.as_str())])
            .send()
            .await
            .and_then(|response| response.error_for_status())
        {
            Ok(response) => response,
            Err(err) => {
                error!("failed to load data.json: {err}");
                return None;
            }
        };

        match response.json::<ProjectState>().await {
            Ok(state) => Some(state),
            Err(err) => {
                error!("failed to parse data.json: {err}");
                None
            }
        }
    }
}
