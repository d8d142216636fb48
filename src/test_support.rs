//! Shared fakes and a log capture for unit tests.

use crate::error::{GenerationError, HistoryError};
use crate::history::HistoryDb;
use crate::models::{ChatCompletion, HistoryEntry};
use crate::openai::CompletionApi;
use crate::template::FileReader;
use async_trait::async_trait;
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    pub fn count(&self, level: &str) -> usize {
        self.contents()
            .lines()
            .filter(|line| line.contains(level))
            .count()
    }
}

/// Routes this thread's `tracing` output into a buffer until the guard drops.
pub fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(move || writer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}

#[derive(Default)]
pub struct FakeHistory {
    pub rows: Vec<HistoryEntry>,
    pub fail: bool,
    pub inserted: Mutex<Vec<HistoryEntry>>,
}

impl FakeHistory {
    pub fn with_rows(rows: Vec<HistoryEntry>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn inserted(&self) -> Vec<HistoryEntry> {
        self.inserted.lock().unwrap().clone()
    }
}

#[async_trait]
impl HistoryDb for FakeHistory {
    async fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, HistoryError> {
        if self.fail {
            return Err(HistoryError::Sqlite(tokio_rusqlite::Error::ConnectionClosed));
        }
        Ok(self.rows.iter().take(limit).cloned().collect())
    }

    async fn insert(&self, entry: &HistoryEntry) -> Result<(), HistoryError> {
        if self.fail {
            return Err(HistoryError::Sqlite(tokio_rusqlite::Error::ConnectionClosed));
        }
        self.inserted.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

pub struct FakeCompletion {
    response: Option<Value>,
    pub requests: Mutex<Vec<Value>>,
}

impl FakeCompletion {
    /// Answers every request with `response`, parsed as a chat completion.
    pub fn replying(response: Value) -> Self {
        Self {
            response: Some(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A function-call completion whose arguments are `arguments` verbatim.
    pub fn with_arguments(arguments: &str) -> Self {
        Self::replying(serde_json::json!({
            "choices": [{ "message": { "function_call": { "arguments": arguments } } }]
        }))
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionApi for FakeCompletion {
    async fn create(&self, request: &Value) -> Result<ChatCompletion, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.response {
            Some(response) => Ok(serde_json::from_value(response.clone())?),
            None => Err(GenerationError::Status {
                status: 500,
                body: "fail".to_string(),
            }),
        }
    }
}

pub struct FakeReader {
    result: Result<String, io::ErrorKind>,
    pub paths: Mutex<Vec<PathBuf>>,
}

impl FakeReader {
    pub fn returning(contents: &str) -> Self {
        Self {
            result: Ok(contents.to_string()),
            paths: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: Err(io::ErrorKind::NotFound),
            paths: Mutex::new(Vec::new()),
        }
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.paths.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileReader for FakeReader {
    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.paths.lock().unwrap().push(path.to_path_buf());
        self.result
            .clone()
            .map_err(|kind| io::Error::new(kind, "fail"))
    }
}
