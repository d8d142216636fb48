pub mod prompt;

use serenity::all::CreateCommand;

/// Slash commands the bot registers on startup.
pub fn definitions() -> Vec<CreateCommand> {
    vec![CreateCommand::new(prompt::NAME).description(prompt::DESCRIPTION)]
}
