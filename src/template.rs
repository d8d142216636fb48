use crate::error::SetupError;
use async_trait::async_trait;
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::error;

pub const DEFAULT_TEMPLATE_FILE: &str = "openai.json";
/// The `config/` directory next to this crate's sources.
pub const DEFAULT_TEMPLATE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/config");
pub const USED_PROMPTS_MARKER: &str = "<USED_PROMPTS>";

#[async_trait]
pub trait FileReader: Send + Sync {
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

pub struct FsReader;

#[async_trait]
impl FileReader for FsReader {
    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }
}

/// Completion request body as loaded from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestTemplate(pub Value);

impl RequestTemplate {
    /// Replaces the marker in the first message with `history` and asks for
    /// answers in `locale`. Templates without a string `messages[0].content`
    /// are left as they are.
    pub fn inject_history(&mut self, history: &[String], locale: &str) {
        let Some(content) = self
            .0
            .get_mut("messages")
            .and_then(|messages| messages.get_mut(0))
            .and_then(|message| message.get_mut("content"))
        else {
            return;
        };
        let Some(text) = content.as_str().filter(|text| !text.is_empty()) else {
            return;
        };

        let injected = format!(
            "{}\nPlease generate the response words in language: {}",
            text.replacen(USED_PROMPTS_MARKER, &history.join("\n"), 1),
            locale
        );
        *content = Value::String(injected);
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }
}

#[derive(Clone)]
pub struct TemplateLoader {
    dir: PathBuf,
    file_name: String,
    reader: Arc<dyn FileReader>,
}

impl TemplateLoader {
    pub fn new(dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_name: file_name.into(),
            reader: Arc::new(FsReader),
        }
    }

    pub fn with_reader(mut self, reader: Arc<dyn FileReader>) -> Self {
        self.reader = reader;
        self
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// Reads and parses the template. Not cached: edits apply on the next call.
    pub async fn load(&self) -> Result<RequestTemplate, SetupError> {
        let path = self.path();
        let data = match self.reader.read_to_string(&path).await {
            Ok(data) => data,
            Err(source) => {
                error!("Failed to load OpenAI config: {}: {}", path.display(), source);
                return Err(SetupError::TemplateRead { path, source });
            }
        };
        match serde_json::from_str(&data) {
            Ok(value) => Ok(RequestTemplate(value)),
            Err(source) => {
                error!("Failed to load OpenAI config: {}: {}", path.display(), source);
                Err(SetupError::TemplateParse { path, source })
            }
        }
    }
}
