use dotenv::dotenv;
use promptbot::config::Config;
use promptbot::discord_bot::Handler;
use promptbot::generator::PromptGenerator;
use promptbot::history::SqliteHistory;
use promptbot::locales::Locales;
use serenity::all::{Client, GatewayIntents};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set, /prompt will fail until it is");
    }

    let history = SqliteHistory::open(&config.database_path).await?;
    info!("History database ready at {}", config.database_path);

    let generator = PromptGenerator::from_config(&config, Arc::new(history));
    let handler = Handler::new(
        Arc::new(generator),
        Arc::new(Locales::builtin()?),
        config.discord_guild_id,
    );

    let mut client = Client::builder(&config.discord_token, GatewayIntents::empty())
        .event_handler(handler)
        .await?;

    info!("Starting Discord client");
    client.start().await?;
    Ok(())
}
