//! `/prompt`: asks the generator for a trait, a hobby and an object.

use crate::error::BoxError;
use crate::generator::{GeneratePrompt, DEFAULT_LOCALE};
use crate::locales::Locales;
use crate::models::GeneratedTriple;
use async_trait::async_trait;
use tracing::{error, info};

pub const NAME: &str = "prompt";
pub const DESCRIPTION: &str = "Get a random personality trait, hobby and object to draw";
pub const EMBED_COLOUR: u32 = 0xff69b4;

/// The reply surface of one command invocation.
#[async_trait]
pub trait PromptInteraction: Send + Sync {
    fn locale(&self) -> Option<&str>;

    /// Acknowledges the command before the slow part starts.
    async fn defer(&self) -> Result<(), BoxError>;

    async fn reply(&self, content: &str) -> Result<(), BoxError>;

    async fn edit_reply(&self, embed: PromptEmbed) -> Result<(), BoxError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptEmbed {
    pub colour: u32,
    pub fields: Vec<EmbedField>,
}

impl PromptEmbed {
    pub fn render(triple: &GeneratedTriple, locales: &Locales, locale: &str) -> Self {
        let field = |key: &str, fallback: &str, value: &str| EmbedField {
            name: locales.get_msg(locale, key, fallback),
            value: value.to_string(),
            inline: true,
        };
        Self {
            colour: EMBED_COLOUR,
            fields: vec![
                field("trait", "Trait", &triple.personality_trait),
                field("hobby", "Hobby", &triple.hobby),
                field("object", "Object", &triple.object),
            ],
        }
    }
}

pub async fn run(
    interaction: &dyn PromptInteraction,
    generator: &dyn GeneratePrompt,
    locales: &Locales,
) -> Result<(), BoxError> {
    interaction.defer().await?;
    let locale = interaction
        .locale()
        .filter(|locale| !locale.is_empty())
        .unwrap_or(DEFAULT_LOCALE)
        .to_string();

    let triple = match generator.generate_prompt(Some(&locale)).await {
        Ok(Some(triple)) => triple,
        Ok(None) => {
            error!("Failed to generate prompt");
            return reply_error(interaction, locales, &locale).await;
        }
        Err(e) => {
            error!("Error generating prompt: {}", e);
            return reply_error(interaction, locales, &locale).await;
        }
    };

    info!(
        "Generated prompt: {}, {}, {}",
        triple.personality_trait, triple.hobby, triple.object
    );
    let embed = PromptEmbed::render(&triple, locales, &locale);
    interaction.edit_reply(embed).await
}

async fn reply_error(
    interaction: &dyn PromptInteraction,
    locales: &Locales,
    locale: &str,
) -> Result<(), BoxError> {
    let content = locales.get_msg(locale, "prompt_error", "Failed to generate prompt");
    interaction.reply(&content).await
}
