use crate::core::config::Config;
use crate::errors::MyError;
use teloxide::prelude::*;
use teloxide::types::{ParseMode, ReplyParameters};

pub async fn start_handler(bot: Bot, message: Message, config: &Config) -> Result<(), MyError> {
    let response_message = format!(
        "<b>Audio Transcription Bot</b> v{}\n\n\
        Send me any voice message or audio file and I'll transcribe it for you.\n\n\
        <b>You'll receive:</b>\n\
        - a text file (.txt)\n\
        - a PDF document (.pdf)\n\n\
        Just send an audio message to get started, or use /help for details.",
        config.get_version()
    );

    bot.send_message(message.chat.id, response_message)
        .reply_parameters(ReplyParameters::new(message.id))
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
