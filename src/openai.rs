use crate::error::{GenerationError, SetupError};
use crate::models::ChatCompletion;
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client,
};
use serde_json::Value;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Anything that can answer a chat completion request.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    async fn create(&self, request: &Value) -> Result<ChatCompletion, GenerationError>;
}

pub struct OpenAiClient {
    client: Client,
    endpoint: String,
}

impl OpenAiClient {
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, SetupError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| SetupError::ClientInit(e.to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| SetupError::ClientInit(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl CompletionApi for OpenAiClient {
    async fn create(&self, request: &Value) -> Result<ChatCompletion, GenerationError> {
        let res = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatCompletion = res.json().await?;
        Ok(body)
    }
}
