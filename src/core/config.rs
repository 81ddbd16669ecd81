use crate::core::services::whisper::WhisperClient;
use crate::errors::MyError;
use dotenv::dotenv;
use std::path::{Path, PathBuf};
use teloxide::prelude::*;

const SCRATCH_DIR_NAME: &str = "audioscribe-scratch";

#[derive(Clone)]
pub struct Config {
    bot: Bot,
    // Client API credentials for MTProto deployments, unused over the Bot API.
    #[allow(dead_code)]
    api_id: String,
    #[allow(dead_code)]
    api_hash: String,
    whisper: WhisperClient,
    scratch_dir: PathBuf,
    version: String,
}

impl Config {
    pub fn from_env() -> Result<Self, MyError> {
        dotenv().ok();

        let api_id = require_env("API_ID")?;
        let api_hash = require_env("API_HASH")?;
        let bot_token = require_env("BOT_TOKEN")?;
        let openai_api_key = require_env("OPENAI_API_KEY")?;

        let bot = Bot::new(bot_token);
        let whisper = WhisperClient::new(openai_api_key)?;

        let scratch_dir = std::env::temp_dir().join(SCRATCH_DIR_NAME);
        std::fs::create_dir_all(&scratch_dir).map_err(|e| {
            MyError::Config(format!(
                "failed to create scratch dir {}: {e}",
                scratch_dir.display()
            ))
        })?;

        Ok(Config {
            bot,
            api_id,
            api_hash,
            whisper,
            scratch_dir,
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    pub fn get_bot(&self) -> &Bot {
        &self.bot
    }

    pub fn get_whisper(&self) -> &WhisperClient {
        &self.whisper
    }

    pub fn get_scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    pub fn get_version(&self) -> &str {
        &self.version
    }
}

fn require_env(name: &str) -> Result<String, MyError> {
    std::env::var(name).map_err(|_| MyError::Config(format!("{name} expected")))
}
