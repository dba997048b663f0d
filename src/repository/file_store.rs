use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;

use crate::models::todo::{Todo, TodoId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access todo file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("todo file {path} is not a valid todo list: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode todo list: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("no todo id left after {0}")]
    IdsExhausted(TodoId),
}

/// The whole todo collection kept as one JSON array on disk.
///
/// Every read parses the full document and every write replaces it; no
/// state is cached between calls.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the backing file holding an empty list, unless it already exists.
    pub async fn initialize(&self) -> Result<(), StoreError> {
        if fs::try_exists(&self.path).await.map_err(|e| self.io_error(e))? {
            tracing::debug!(path = %self.path.display(), "todo file already present");
            return Ok(());
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| self.io_error(e))?;
        }
        self.write_all(&[]).await?;
        tracing::info!(path = %self.path.display(), "created empty todo file");
        Ok(())
    }

    pub async fn read_all(&self) -> Result<Vec<Todo>, StoreError> {
        let raw = fs::read(&self.path).await.map_err(|e| self.io_error(e))?;
        let todos: Vec<Todo> = serde_json::from_slice(&raw).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), count = todos.len(), "read todo file");
        Ok(todos)
    }

    /// Replaces the backing file with `todos`.
    ///
    /// The payload goes to a sibling temp file first and is renamed over the
    /// target, so readers never observe a half-written document.
    pub async fn write_all(&self, todos: &[Todo]) -> Result<(), StoreError> {
        let payload = serde_json::to_vec_pretty(todos).map_err(StoreError::Encode)?;
        let temp_path = self.temp_path();
        fs::write(&temp_path, payload).await.map_err(|e| self.io_error(e))?;
        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            if let Err(cleanup) = fs::remove_file(&temp_path).await {
                tracing::warn!(path = %temp_path.display(), error = %cleanup, "failed to remove temp todo file");
            }
            return Err(self.io_error(e));
        }
        tracing::debug!(path = %self.path.display(), count = todos.len(), "wrote todo file");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
