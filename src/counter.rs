use crate::config::Config;
use crate::credentials::CredentialStore;
use crate::errors::AppError;
use crate::loader::StateLoader;
use crate::models::ProjectState;
use crate::mutator::{self, Delta};
use crate::persister::StatePersister;
use crate::prompt::{Prompt, Question};
use crate::session::Session;
use crate::view::View;
use chrono::Local;
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::info;

pub const USER_AGENT: &str = "compteur-tricot";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The document was written; carries what was sent.
    Saved(ProjectState),
    /// The user cancelled or gave an empty answer.
    Unchanged,
    /// Loading failed, so nothing was attempted.
    Skipped,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Saved(_) => "saved",
            Self::Unchanged => "unchanged",
            Self::Skipped => "skipped",
        }
    }
}

/// Runs load, mutate, persist and reload for each user action.
///
/// Operations are not serialized against each other: the session lock is only
/// held for short reads and writes, never across a request. Two actions started
/// together can both read the same count. If both fetch the same SHA, the
/// second write fails with a conflict; otherwise it overwrites the first.
pub struct Counter {
    loader: StateLoader,
    persister: StatePersister,
    credentials: CredentialStore,
    session: Mutex<Session>,
}

impl Counter {
    pub fn new(loader: StateLoader, persister: StatePersister, credentials: CredentialStore) -> Self {
        Self {
            loader,
            persister,
            credentials,
            session: Mutex::new(Session::default()),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(AppError::internal)?;
        Ok(Self::new(
            StateLoader::new(client.clone(), config.data_url()),
            StatePersister::new(client, config.contents_url(), config.commit_message.clone()),
            CredentialStore::new(config.credentials.open()),
        ))
    }

    /// Pulls a previously stored token into the session.
    pub async fn restore_token(&self) {
        let token = self.credentials.get().await;
        self.session.lock().await.token = token;
    }

    pub async fn has_token(&self) -> bool {
        self.session.lock().await.token.is_some()
    }

    pub async fn session(&self) -> Session {
        self.session.lock().await.clone()
    }

    /// Stores a token given explicitly rather than through a prompt.
    pub async fn login(&self, token: &str) -> Result<(), AppError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::bad_request("token must not be empty"));
        }
        self.credentials.set(token).await?;
        self.session.lock().await.token = Some(token.to_string());
        Ok(())
    }

    pub async fn load(&self, view: &mut View) -> Option<ProjectState> {
        self.loader.load(view).await
    }

    pub async fn update_count(
        &self,
        delta: Delta,
        prompt: &dyn Prompt,
        view: &mut View,
    ) -> Result<Outcome, AppError> {
        let Some(mut state) = self.load(view).await else {
            return Ok(Outcome::Skipped);
        };
        mutator::apply_delta(&mut state, delta, &Local::now());
        self.save(&state, prompt, view).await?;
        Ok(Outcome::Saved(state))
    }

    pub async fn reset_count(&self, prompt: &dyn Prompt, view: &mut View) -> Result<Outcome, AppError> {
        let Some(mut state) = self.load(view).await else {
            return Ok(Outcome::Skipped);
        };
        mutator::reset(&mut state, &Local::now());
        self.save(&state, prompt, view).await?;
        Ok(Outcome::Saved(state))
    }

    pub async fn edit_project_name(
        &self,
        prompt: &dyn Prompt,
        view: &mut View,
    ) -> Result<Outcome, AppError> {
        let Some(mut state) = self.load(view).await else {
            return Ok(Outcome::Skipped);
        };
        let answer = prompt
            .ask(Question::ProjectName, Some(state.project_name.as_str()))
            .await;
        if !mutator::rename(&mut state, answer) {
            return Ok(Outcome::Unchanged);
        }
        self.save(&state, prompt, view).await?;
        Ok(Outcome::Saved(state))
    }

    pub async fn edit_project_link(
        &self,
        prompt: &dyn Prompt,
        view: &mut View,
    ) -> Result<Outcome, AppError> {
        let Some(mut state) = self.load(view).await else {
            return Ok(Outcome::Skipped);
        };
        let answer = prompt
            .ask(Question::ProjectLink, state.project_link.as_deref())
            .await;
        if !mutator::relink(&mut state, answer) {
            return Ok(Outcome::Unchanged);
        }
        self.save(&state, prompt, view).await?;
        Ok(Outcome::Saved(state))
    }

    /// Writes `state`, records the SHA it was written against, then reloads
    /// into `view`.
    pub async fn save(
        &self,
        state: &ProjectState,
        prompt: &dyn Prompt,
        view: &mut View,
    ) -> Result<(), AppError> {
        let token = self.token(prompt).await?;
        let sha = self.persister.save(&token, state).await?;
        self.session.lock().await.file_sha = Some(sha);
        self.loader.load(view).await;
        Ok(())
    }

    async fn token(&self, prompt: &dyn Prompt) -> Result<String, AppError> {
        if let Some(token) = self.session.lock().await.token.clone() {
            return Ok(token);
        }

        let token = prompt
            .ask(Question::Token, None)
            .await
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::unauthorized("a GitHub token is required to save"))?;
        self.credentials.set(&token).await?;
        info!("stored GitHub token");
        self.session.lock().await.token = Some(token.clone());
        Ok(token)
    }
}
