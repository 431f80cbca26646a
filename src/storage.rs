use crate::errors::AppError;
use async_trait::async_trait;
use std::{
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
    str::FromStr,
    sync::{Arc, Mutex},
};
use tokio::fs;
use tracing::error;

/// A small string key-value store. Every backend is async, even the ones
/// that never wait, so callers see a single interface.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
}

/// Which backend to open, picked from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialBackend {
    /// All keys in one JSON object file.
    JsonFile(PathBuf),
    /// One plain-text file per key inside a directory.
    KeyFiles(PathBuf),
    Memory,
}

impl CredentialBackend {
    pub fn open(&self) -> Arc<dyn KeyValueStore> {
        match self {
            Self::JsonFile(path) => Arc::new(JsonFileStore::new(path.clone())),
            Self::KeyFiles(dir) => Arc::new(KeyFileStore::new(dir.clone())),
            Self::Memory => Arc::new(MemoryStore::default()),
        }
    }
}

impl FromStr for CredentialBackend {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value == "memory" {
            return Ok(Self::Memory);
        }
        match value.split_once(':') {
            Some(("json", path)) if !path.is_empty() => Ok(Self::JsonFile(PathBuf::from(path))),
            Some(("keyfile", dir)) if !dir.is_empty() => Ok(Self::KeyFiles(PathBuf::from(dir))),
            _ => Err(AppError::bad_request(format!(
                "unknown credential backend '{value}', expected json:<path>, keyfile:<dir> or memory"
            ))),
        }
    }
}

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, AppError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut entries = match self.read_all().await {
            Ok(entries) => entries,
            Err(err) => {
                error!("overwriting unreadable credential file: {err}");
                BTreeMap::new()
            }
        };
        entries.insert(key.to_string(), value.to_string());
        ensure_parent(&self.path).await?;
        let payload = serde_json::to_vec_pretty(&entries)?;
        fs::write(&self.path, payload).await?;
        Ok(())
    }
}

pub struct KeyFileStore {
    dir: PathBuf,
}

impl KeyFileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

#[async_trait]
impl KeyValueStore for KeyFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        match fs::read_to_string(self.dir.join(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir).await?;
        fs::write(self.dir.join(key), value).await?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

async fn ensure_parent(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}
