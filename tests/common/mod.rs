#![allow(dead_code)]

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use compteur_tricot::{
    counter::Counter,
    credentials::CredentialStore,
    loader::StateLoader,
    persister::StatePersister,
    storage::MemoryStore,
    ProjectState,
};
use serde::Deserialize;
use std::{collections::HashMap, sync::Arc};
use tokio::{
    net::TcpListener,
    sync::{Barrier, Mutex},
};

pub const OWNER: &str = "SaryaRi";
pub const REPO: &str = "compteur-tricot";
pub const TOKEN: &str = "ghp_test_token";

/// Everything the fake GitHub remembers between requests.
#[derive(Debug, Default)]
pub struct Remote {
    /// Raw body served by Pages; `None` answers 500.
    pub pages_body: Option<String>,
    pub revision: u64,
    pub page_loads: usize,
    pub cache_busts: Vec<String>,
    pub metadata_calls: usize,
    pub puts: Vec<PutRecord>,
    /// Holds the first N Pages loads and the first N metadata lookups until
    /// N of each have arrived, so concurrent callers see the same revision.
    pub rendezvous: Option<Rendezvous>,
    /// Metadata reports a SHA this many revisions behind the current one.
    pub metadata_lag: u64,
}

#[derive(Debug, Clone)]
pub struct Rendezvous {
    pub parties: usize,
    pub pages: Arc<Barrier>,
    pub metadata: Arc<Barrier>,
}

impl Rendezvous {
    pub fn new(parties: usize) -> Self {
        Self {
            parties,
            pages: Arc::new(Barrier::new(parties)),
            metadata: Arc::new(Barrier::new(parties)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PutRecord {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub message: String,
    pub sha: String,
    pub decoded: String,
    pub accepted: bool,
}

impl Remote {
    pub fn sha(&self) -> String {
        format!("sha-{}", self.revision)
    }

    pub fn state(&self) -> ProjectState {
        serde_json::from_str(self.pages_body.as_deref().unwrap_or("null")).unwrap()
    }

    pub fn rejected_puts(&self) -> usize {
        self.puts.len() - self.accepted_puts()
    }

    pub fn accepted_puts(&self) -> usize {
        self.puts.iter().filter(|put| put.accepted).count()
    }
}

#[derive(Clone)]
pub struct MockGitHub {
    pub base_url: String,
    pub remote: Arc<Mutex<Remote>>,
}

impl MockGitHub {
    pub async fn start(initial: &ProjectState) -> Self {
        let body = serde_json::to_string_pretty(initial).unwrap();
        Self::start_raw(Some(body)).await
    }

    pub async fn start_raw(pages_body: Option<String>) -> Self {
        let remote = Arc::new(Mutex::new(Remote {
            pages_body,
            revision: 1,
            ..Remote::default()
        }));
        let app = Router::new()
            .route(&format!("/{REPO}/data.json"), get(pages))
            .route(
                &format!("/repos/{OWNER}/{REPO}/contents/data.json"),
                get(metadata).put(update),
            )
            .with_state(remote.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            remote,
        }
    }

    /// Runs the mock on its own thread and runtime so it outlives the test
    /// that started it.
    pub fn start_detached(initial: &ProjectState) -> Self {
        let body = serde_json::to_string_pretty(initial).unwrap();
        Self::start_detached_raw(Some(body))
    }

    pub fn start_detached_raw(body: Option<String>) -> Self {
        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let mock = MockGitHub::start_raw(body).await;
                tx.send(mock).unwrap();
                std::future::pending::<()>().await;
            });
        });
        rx.recv().unwrap()
    }

    pub fn pages_url(&self) -> String {
        format!("{}/{REPO}", self.base_url)
    }

    pub fn data_url(&self) -> String {
        format!("{}/data.json", self.pages_url())
    }

    pub fn contents_url(&self) -> String {
        format!("{}/repos/{OWNER}/{REPO}/contents/data.json", self.base_url)
    }

    pub fn counter(&self) -> Counter {
        let client = reqwest::Client::builder()
            .user_agent("compteur-tricot-tests")
            .build()
            .unwrap();
        Counter::new(
            StateLoader::new(client.clone(), self.data_url()),
            StatePersister::new(client, self.contents_url(), "Update data.json"),
            CredentialStore::new(Arc::new(MemoryStore::default())),
        )
    }

    pub async fn remote_state(&self) -> ProjectState {
        self.remote.lock().await.state()
    }
}

async fn pages(
    State(remote): State<Arc<Mutex<Remote>>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let gate = {
        let mut remote = remote.lock().await;
        remote.page_loads += 1;
        if let Some(bust) = query.get("cacheBust") {
            remote.cache_busts.push(bust.clone());
        }
        let loads = remote.page_loads;
        remote
            .rendezvous
            .as_ref()
            .filter(|gate| loads <= gate.parties)
            .map(|gate| gate.pages.clone())
    };
    if let Some(barrier) = gate {
        barrier.wait().await;
    }

    let remote = remote.lock().await;
    match remote.pages_body.clone() {
        Some(body) => ([("content-type", "application/json")], body).into_response(),
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn metadata(State(remote): State<Arc<Mutex<Remote>>>) -> Json<serde_json::Value> {
    let (sha, gate) = {
        let mut remote = remote.lock().await;
        remote.metadata_calls += 1;
        let calls = remote.metadata_calls;
        let gate = remote
            .rendezvous
            .as_ref()
            .filter(|gate| calls <= gate.parties)
            .map(|gate| gate.metadata.clone());
        let revision = remote.revision.saturating_sub(remote.metadata_lag);
        (format!("sha-{revision}"), gate)
    };
    if let Some(barrier) = gate {
        barrier.wait().await;
    }

    Json(serde_json::json!({
        "name": "data.json",
        "path": "data.json",
        "sha": sha,
        "type": "file",
    }))
}

#[derive(Deserialize)]
struct UpdateBody {
    message: String,
    content: String,
    sha: String,
}

async fn update(
    State(remote): State<Arc<Mutex<Remote>>>,
    headers: HeaderMap,
    Json(body): Json<UpdateBody>,
) -> Response {
    let mut remote = remote.lock().await;
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    let authorization = header("authorization");
    let decoded = String::from_utf8(STANDARD.decode(&body.content).unwrap()).unwrap();

    let expected = format!("token {TOKEN}");
    let status = if authorization.as_deref() != Some(expected.as_str()) {
        StatusCode::UNAUTHORIZED
    } else if body.sha != remote.sha() {
        StatusCode::CONFLICT
    } else {
        StatusCode::OK
    };
    let accepted = status == StatusCode::OK;

    remote.puts.push(PutRecord {
        authorization,
        content_type: header("content-type"),
        message: body.message,
        sha: body.sha,
        decoded: decoded.clone(),
        accepted,
    });

    if !accepted {
        return status.into_response();
    }
    remote.pages_body = Some(decoded);
    remote.revision += 1;
    let sha = remote.sha();
    Json(serde_json::json!({ "content": { "sha": sha } })).into_response()
}

pub fn sample_state() -> ProjectState {
    ProjectState {
        count: 5,
        project_name: "Pull marin".to_string(),
        project_link: Some("https://example.com/pull".to_string()),
        history: vec![
            "+1 le 01/10/2026 à 20:00:00".to_string(),
            "+1 le 01/10/2026 à 20:05:00".to_string(),
        ],
    }
}
