pub mod commands;
pub mod config;
pub mod discord_bot;
pub mod error;
pub mod generator;
pub mod history;
pub mod locales;
pub mod models;
pub mod openai;
pub mod template;

#[cfg(test)]
mod test_support;
