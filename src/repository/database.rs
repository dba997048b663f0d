use chrono::prelude::*;
use tokio::sync::Mutex;

use crate::models::todo::{Todo, TodoId};
use crate::repository::file_store::{FileStore, StoreError};

/// Storage service handed to the HTTP handlers.
///
/// Each operation is one full read-modify-write cycle over the backing
/// file. The cycle runs under `lock`, so concurrent requests in this process
/// never overwrite each other's changes.
#[derive(Debug)]
pub struct Database {
    store: FileStore,
    lock: Mutex<()>,
}

impl Database {
    pub fn new(store: FileStore) -> Self {
        Database {
            store,
            lock: Mutex::new(()),
        }
    }

    pub async fn initialize(&self) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        tracing::debug!(path = %self.store.path().display(), "initializing todo store");
        self.store.initialize().await
    }

    pub async fn get_todos(&self) -> Result<Vec<Todo>, StoreError> {
        let _guard = self.lock.lock().await;
        self.store.read_all().await
    }

    pub async fn get_todo_by_id(&self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        let todos = self.get_todos().await?;
        Ok(todos.into_iter().find(|todo| todo.id == id))
    }

    pub async fn create_todo(&self, text: String) -> Result<Todo, StoreError> {
        let _guard = self.lock.lock().await;
        let mut todos = self.store.read_all().await?;
        let todo = Todo::new(next_id(&todos)?, text);
        todos.push(todo.clone());
        self.store.write_all(&todos).await?;
        tracing::info!(id = todo.id, "created todo");
        Ok(todo)
    }

    pub async fn toggle_todo_by_id(&self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        self.mutate(|todos| {
            let todo = todos.iter_mut().find(|todo| todo.id == id)?;
            todo.completed = !todo.completed;
            Some(todo.clone())
        })
        .await
    }

    pub async fn update_todo_by_id(
        &self,
        id: TodoId,
        text: String,
    ) -> Result<Option<Todo>, StoreError> {
        self.mutate(|todos| {
            let todo = todos.iter_mut().find(|todo| todo.id == id)?;
            todo.text = text;
            Some(todo.clone())
        })
        .await
    }

    pub async fn delete_todo_by_id(&self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        let removed = self
            .mutate(|todos| {
                let index = todos.iter().position(|todo| todo.id == id)?;
                Some(todos.remove(index))
            })
            .await?;
        if removed.is_some() {
            tracing::info!(id, "deleted todo");
        }
        Ok(removed)
    }

    /// Reads the collection, applies `op` and writes the result back.
    ///
    /// When `op` returns `None` (nothing matched) the file is left untouched.
    async fn mutate<T, F>(&self, op: F) -> Result<Option<T>, StoreError>
    where
        F: FnOnce(&mut Vec<Todo>) -> Option<T>,
    {
        let _guard = self.lock.lock().await;
        let mut todos = self.store.read_all().await?;
        let Some(result) = op(&mut todos) else {
            return Ok(None);
        };
        self.store.write_all(&todos).await?;
        Ok(Some(result))
    }
}

// Millisecond timestamp, bumped past the largest id in use so that two
// creates inside the same millisecond still get distinct ids.
fn next_id(todos: &[Todo]) -> Result<TodoId, StoreError> {
    let now = Utc::now().timestamp_millis();
    match todos.iter().map(|todo| todo.id).max() {
        Some(max) if max >= now => max.checked_add(1).ok_or(StoreError::IdsExhausted(max)),
        _ => Ok(now),
    }
}
