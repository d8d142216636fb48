use std::path::PathBuf;
use thiserror::Error;

/// Boxed error used by the Discord and HTTP plumbing.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// Misconfigured deployment. Returned to the caller, never swallowed.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("OpenAI API key is not set. Please check your .env file.")]
    MissingApiKey,

    #[error("Failed to initialize OpenAI client: {0}")]
    ClientInit(String),

    #[error("Failed to read template {}: {source}", path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse template {}: {source}", path.display())]
    TemplateParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] tokio_rusqlite::Error),

    #[error("SQLite open error: {0}")]
    Open(#[from] tokio_rusqlite::rusqlite::Error),
}

// A single completion attempt went wrong. Always mapped to "no prompt this time".
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("completion has no choices")]
    NoChoices,

    #[error("completion has no function call")]
    MissingFunctionCall,

    #[error("malformed function arguments: {0}")]
    Arguments(#[from] serde_json::Error),
}
