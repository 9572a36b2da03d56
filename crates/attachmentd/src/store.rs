//! Result persistence.
//!
//! A small document store: each record is kept as a JSON body tagged with
//! its collection name. Persistence is best-effort from the caller's side;
//! see `submission::QuizService`.

use attachment_common::QuizResult;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Persistence is not configured")]
    NotConfigured,

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store connection lock poisoned")]
    Poisoned,

    #[error("Store task failed: {0}")]
    Task(String),
}

/// Persistence collaborator for quiz results
pub trait ResultStore: Send + Sync {
    /// Store `record` in `collection`, returning the new document id
    fn store(&self, collection: &str, record: &QuizResult) -> Result<String, StoreError>;
}

/// Store used when no database is configured. Every write fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledStore;

impl ResultStore for DisabledStore {
    fn store(&self, _collection: &str, _record: &QuizResult) -> Result<String, StoreError> {
        Err(StoreError::NotConfigured)
    }
}

/// Store for the configured database path.
///
/// Falls back to `DisabledStore` when no path is set or the database cannot
/// be opened, so the quiz keeps working without persistence.
pub fn open_configured(path: Option<&Path>) -> Arc<dyn ResultStore> {
    match path {
        Some(path) => match SqliteStore::open(path) {
            Ok(store) => {
                info!("Persisting quiz results to {}", path.display());
                Arc::new(store)
            }
            Err(e) => {
                warn!("Cannot open {}: {}; results will not be persisted", path.display(), e);
                Arc::new(DisabledStore)
            }
        },
        None => {
            info!("No database configured; results will not be persisted");
            Arc::new(DisabledStore)
        }
    }
}

/// Stored document as read back from the database
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: String,
    pub collection: String,
    pub body: Value,
    pub created_at: String,
}

/// SQLite-backed document store
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open or create the store at a specific path
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
            db_path: path.to_path_buf(),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory store, used in tests
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let store = Self {
            conn: Arc::new(Mutex::new(Connection::open_in_memory()?)),
            db_path: PathBuf::from(":memory:"),
        };
        store.init_schema()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id TEXT PRIMARY KEY,
                collection TEXT NOT NULL,
                body TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection);
            "#,
        )?;
        Ok(())
    }

    /// Number of documents in a collection
    pub fn count(&self, collection: &str) -> Result<u64, StoreError> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            params![collection],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    /// All documents in a collection, oldest first
    pub fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, collection, body, created_at FROM documents \
             WHERE collection = ?1 ORDER BY created_at ASC, rowid ASC",
        )?;
        let rows = stmt.query_map(params![collection], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut docs = Vec::new();
        for row in rows {
            let (id, collection, body, created_at) = row?;
            docs.push(StoredDocument {
                id,
                collection,
                body: serde_json::from_str(&body)?,
                created_at,
            });
        }
        Ok(docs)
    }

    pub fn get(&self, id: &str) -> Result<Option<StoredDocument>, StoreError> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT id, collection, body, created_at FROM documents WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((id, collection, body, created_at)) => Ok(Some(StoredDocument {
                id,
                collection,
                body: serde_json::from_str(&body)?,
                created_at,
            })),
            None => Ok(None),
        }
    }
}

impl ResultStore for SqliteStore {
    fn store(&self, collection: &str, record: &QuizResult) -> Result<String, StoreError> {
        let now = Utc::now().to_rfc3339();
        let mut body = serde_json::to_value(record)?;
        if let Value::Object(map) = &mut body {
            map.insert("created_at".to_string(), Value::String(now.clone()));
            map.insert("updated_at".to_string(), Value::String(now.clone()));
        }

        let id = Uuid::new_v4().to_string();
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO documents (id, collection, body, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, collection, serde_json::to_string(&body)?, now, now],
        )?;
        debug!("Stored document {} in {}", id, collection);
        Ok(id)
    }
}
