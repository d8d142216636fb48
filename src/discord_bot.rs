use crate::commands::{
    self,
    prompt::{self, PromptEmbed, PromptInteraction},
};
use crate::error::BoxError;
use crate::generator::GeneratePrompt;
use crate::locales::Locales;
use serenity::all::{
    Colour, Command, CommandInteraction, Context, CreateEmbed, EditInteractionResponse,
    EventHandler, GuildId, Interaction, Ready,
};
use serenity::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct Handler {
    generator: Arc<dyn GeneratePrompt>,
    locales: Arc<Locales>,
    guild_id: Option<GuildId>,
}

impl Handler {
    /// Commands go to `guild_id` when set, which Discord applies immediately,
    /// and globally otherwise.
    pub fn new(
        generator: Arc<dyn GeneratePrompt>,
        locales: Arc<Locales>,
        guild_id: Option<u64>,
    ) -> Self {
        Self {
            generator,
            locales,
            guild_id: guild_id.map(GuildId::new),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected", ready.user.name);

        let registered = match self.guild_id {
            Some(guild_id) => guild_id.set_commands(&ctx.http, commands::definitions()).await,
            None => Command::set_global_commands(&ctx.http, commands::definitions()).await,
        };
        match registered {
            Ok(commands) => info!("Registered {} slash command(s)", commands.len()),
            Err(e) => error!("Failed to register slash commands: {}", e),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        match command.data.name.as_str() {
            prompt::NAME => {
                let reply = SlashReply {
                    ctx: &ctx,
                    command: &command,
                };
                let generator = self.generator.as_ref();
                if let Err(e) = prompt::run(&reply, generator, &self.locales).await {
                    error!("Discord connection lost while answering /{}: {}", prompt::NAME, e);
                }
            }
            other => warn!("Unknown command: {}", other),
        }
    }
}

struct SlashReply<'a> {
    ctx: &'a Context,
    command: &'a CommandInteraction,
}

#[async_trait]
impl PromptInteraction for SlashReply<'_> {
    fn locale(&self) -> Option<&str> {
        Some(self.command.locale.as_str())
    }

    async fn defer(&self) -> Result<(), BoxError> {
        self.command.defer(self.ctx).await?;
        Ok(())
    }

    // The response is already deferred, so text replies edit it too.
    async fn reply(&self, content: &str) -> Result<(), BoxError> {
        let builder = EditInteractionResponse::new().content(content);
        self.command.edit_response(&self.ctx.http, builder).await?;
        Ok(())
    }

    async fn edit_reply(&self, embed: PromptEmbed) -> Result<(), BoxError> {
        let builder = EditInteractionResponse::new().embed(create_embed(embed));
        self.command.edit_response(&self.ctx.http, builder).await?;
        Ok(())
    }
}

fn create_embed(embed: PromptEmbed) -> CreateEmbed {
    let colour = Colour::new(embed.colour);
    embed
        .fields
        .into_iter()
        .fold(CreateEmbed::new().colour(colour), |builder, field| {
            builder.field(field.name, field.value, field.inline)
        })
}
