use crate::generator::DEFAULT_HISTORY_LIMIT;
use crate::openai::DEFAULT_BASE_URL;
use crate::template::{DEFAULT_TEMPLATE_DIR, DEFAULT_TEMPLATE_FILE};
use std::env;
use std::path::PathBuf;

pub struct Config {
    pub discord_token: String,
    pub discord_guild_id: Option<u64>,
    /// Checked when the first prompt is generated, not at startup.
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub database_path: String,
    pub template_dir: PathBuf,
    pub template_file: String,
    pub history_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let discord_token = var("DISCORD_TOKEN").ok_or("DISCORD_TOKEN must be set")?;
        let discord_guild_id = match var("DISCORD_GUILD_ID") {
            Some(id) => Some(
                id.parse::<u64>()
                    .map_err(|_| "DISCORD_GUILD_ID must be a u64")?,
            ),
            None => None,
        };

        let openai_api_key = var("OPENAI_API_KEY").filter(|key| !key.is_empty());
        let openai_base_url =
            var("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let database_path = var("DATABASE_PATH").unwrap_or_else(|| "history.db".to_string());
        let template_dir = var("PROMPT_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_DIR));
        let template_file =
            var("PROMPT_CONFIG_FILE").unwrap_or_else(|| DEFAULT_TEMPLATE_FILE.to_string());
        let history_limit = match var("PROMPT_HISTORY_LIMIT") {
            Some(limit) => limit
                .parse::<usize>()
                .map_err(|_| "PROMPT_HISTORY_LIMIT must be a number")?,
            None => DEFAULT_HISTORY_LIMIT,
        };

        Ok(Self {
            discord_token,
            discord_guild_id,
            openai_api_key,
            openai_base_url,
            database_path,
            template_dir,
            template_file,
            history_limit,
        })
    }
}
