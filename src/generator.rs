use crate::config::Config;
use crate::error::{GenerationError, SetupError};
use crate::history::{HistoryDb, HistoryStore};
use crate::models::{GeneratedTriple, TripleArguments};
use crate::openai::{CompletionApi, OpenAiClient, DEFAULT_BASE_URL};
use crate::template::TemplateLoader;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, error};

pub const DEFAULT_LOCALE: &str = "en-US";
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Seam between the command handler and the generator.
#[async_trait]
pub trait GeneratePrompt: Send + Sync {
    /// `Ok(None)` when the model could not produce a usable triple.
    async fn generate_prompt(
        &self,
        locale: Option<&str>,
    ) -> Result<Option<GeneratedTriple>, SetupError>;
}

pub struct PromptGenerator {
    client: OnceCell<Arc<dyn CompletionApi>>,
    api_key: Option<String>,
    base_url: String,
    templates: TemplateLoader,
    history: HistoryStore,
    history_limit: usize,
}

impl PromptGenerator {
    pub fn new(templates: TemplateLoader, history: Arc<dyn HistoryDb>) -> Self {
        Self {
            client: OnceCell::new(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            templates,
            history: HistoryStore::new(history),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn from_config(config: &Config, history: Arc<dyn HistoryDb>) -> Self {
        let templates =
            TemplateLoader::new(config.template_dir.clone(), config.template_file.clone());
        let mut generator = Self::new(templates, history)
            .with_api_key(config.openai_api_key.clone())
            .with_history_limit(config.history_limit);
        generator.base_url = config.openai_base_url.clone();
        generator
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Uses `client` instead of building an `OpenAiClient` from the API key.
    pub fn with_client(mut self, client: Arc<dyn CompletionApi>) -> Self {
        self.client = OnceCell::new_with(Some(client));
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    async fn completion_client(&self) -> Result<&Arc<dyn CompletionApi>, SetupError> {
        self.client
            .get_or_try_init(|| async {
                let Some(api_key) = self.api_key.as_deref() else {
                    return Err(SetupError::MissingApiKey);
                };
                match OpenAiClient::new(api_key, &self.base_url) {
                    Ok(client) => Ok(Arc::new(client) as Arc<dyn CompletionApi>),
                    Err(e) => {
                        error!("Failed to initialize OpenAI client: {}", e);
                        Err(e)
                    }
                }
            })
            .await
    }

    /// Asks the model for a new triple, steering it away from recent ones.
    ///
    /// Configuration problems (no API key, unreadable template) are errors.
    /// A failed or malformed completion is logged and yields `Ok(None)`, in
    /// which case nothing is stored.
    pub async fn generate(
        &self,
        locale: Option<&str>,
    ) -> Result<Option<GeneratedTriple>, SetupError> {
        let locale = normalize_locale(locale);
        debug!("Generating prompt with locale: '{}'", locale);

        let client = self.completion_client().await?;
        let mut template = self.templates.load().await?;

        let used_prompts = self.history.fetch_recent(self.history_limit).await;
        template.inject_history(&used_prompts, locale);

        let triple = match complete(&**client, template.as_json()).await {
            Ok(triple) => triple,
            Err(e) => {
                error!("OpenAI request failed: {}", e);
                return Ok(None);
            }
        };
        debug!(
            "Model picked: {}, {}, {}",
            triple.personality_trait, triple.hobby, triple.object
        );

        self.history
            .store(&triple.personality_trait, &triple.hobby, &triple.object)
            .await;
        Ok(Some(triple))
    }
}

#[async_trait]
impl GeneratePrompt for PromptGenerator {
    async fn generate_prompt(
        &self,
        locale: Option<&str>,
    ) -> Result<Option<GeneratedTriple>, SetupError> {
        self.generate(locale).await
    }
}

fn normalize_locale(locale: Option<&str>) -> &str {
    match locale {
        Some(locale) if !locale.trim().is_empty() => locale,
        _ => DEFAULT_LOCALE,
    }
}

async fn complete(
    client: &dyn CompletionApi,
    request: &Value,
) -> Result<GeneratedTriple, GenerationError> {
    let completion = client.create(request).await?;
    if completion.choices.is_empty() {
        return Err(GenerationError::NoChoices);
    }
    let arguments = completion
        .function_arguments()
        .ok_or(GenerationError::MissingFunctionCall)?;
    let args: TripleArguments = serde_json::from_str(arguments)?;
    Ok(args.into())
}
