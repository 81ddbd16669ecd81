use crate::errors::MyError;
use teloxide::prelude::*;
use teloxide::types::{ParseMode, ReplyParameters};

pub async fn help_handler(bot: Bot, message: Message) -> Result<(), MyError> {
    let help_message = "<b>How to use:</b>\n\n\
        1. Send me a voice message, an audio file or a video note\n\
        2. Wait while I transcribe it (this may take a moment)\n\
        3. Receive your transcription in both TXT and PDF formats\n\n\
        <b>Supported formats:</b> OGG, MP3, M4A, WAV, FLAC and more\n\n\
        <b>Tips:</b>\n\
        - Clear audio works best\n\
        - 90+ languages are supported\n\
        - Max file size: ~20 MB";

    bot.send_message(message.chat.id, help_message)
        .reply_parameters(ReplyParameters::new(message.id))
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
