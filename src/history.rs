use crate::error::HistoryError;
use crate::models::HistoryEntry;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tokio_rusqlite::{params, Connection};
use tracing::{debug, error};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    adjective TEXT NOT NULL,
    verb TEXT NOT NULL,
    noun TEXT NOT NULL
)";

/// Storage behind the history table.
#[async_trait]
pub trait HistoryDb: Send + Sync {
    /// Up to `limit` rows, newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, HistoryError>;

    async fn insert(&self, entry: &HistoryEntry) -> Result<(), HistoryError>;
}

pub struct SqliteHistory {
    conn: Connection,
}

impl SqliteHistory {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let conn = Connection::open(path).await?;
        Self::with_connection(conn).await
    }

    pub async fn open_in_memory() -> Result<Self, HistoryError> {
        let conn = Connection::open_in_memory().await?;
        Self::with_connection(conn).await
    }

    async fn with_connection(conn: Connection) -> Result<Self, HistoryError> {
        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl HistoryDb for SqliteHistory {
    async fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, HistoryError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT adjective, verb, noun FROM history ORDER BY id DESC LIMIT ?1",
                )?;
                let rows = stmt
                    .query_map(params![limit], |row| {
                        Ok(HistoryEntry {
                            adjective: row.get(0)?,
                            verb: row.get(1)?,
                            noun: row.get(2)?,
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await?;
        Ok(rows)
    }

    async fn insert(&self, entry: &HistoryEntry) -> Result<(), HistoryError> {
        let entry = entry.clone();
        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO history (adjective, verb, noun) VALUES (?1, ?2, ?3)",
                    params![entry.adjective, entry.verb, entry.noun],
                )?;
                Ok(())
            })
            .await?;
        Ok(())
    }
}

/// Best-effort access to past triples. Failures are logged, never returned.
#[derive(Clone)]
pub struct HistoryStore {
    db: Arc<dyn HistoryDb>,
}

impl HistoryStore {
    pub fn new(db: Arc<dyn HistoryDb>) -> Self {
        Self { db }
    }

    /// Most recent triples as "adjective, verb, noun", newest first.
    pub async fn fetch_recent(&self, limit: usize) -> Vec<String> {
        match self.db.recent(limit).await {
            Ok(rows) => {
                debug!("Loaded {} recent prompts", rows.len());
                rows.iter().map(HistoryEntry::joined).collect()
            }
            Err(e) => {
                error!("Error fetching recent prompts: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn store(&self, adjective: &str, verb: &str, noun: &str) {
        let entry = HistoryEntry::new(adjective, verb, noun);
        if let Err(e) = self.db.insert(&entry).await {
            error!("Error storing prompt: {}", e);
        }
    }
}
