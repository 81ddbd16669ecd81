use crate::core::config::Config;
use crate::core::services::artifacts::{render_artifacts, Artifact};
use crate::errors::MyError;
use crate::util::enums::InboundAudio;
use crate::util::staging::{extension_for_mime, StagedFile};
use bytes::Bytes;
use chrono::Local;
use log::{debug, info};
use teloxide::payloads::SendDocumentSetters;
use teloxide::payloads::SendMessageSetters;
use teloxide::requests::{Request, Requester};
use teloxide::types::{FileId, InputFile, Message, ParseMode, ReplyParameters};
use teloxide::utils::html;
use teloxide::Bot;

const PREVIEW_LIMIT: usize = 500;

/// One pipeline run: classify, stage, transcribe, render, deliver, clean up.
///
/// Every failure is returned to the caller, which converts it into a single
/// user-facing reply; the staged file is released on all exit paths.
pub async fn transcription_handler(bot: Bot, msg: Message, config: &Config) -> Result<(), MyError> {
    let audio = InboundAudio::from_message(&msg);
    let Some(file_id) = audio.file_id() else {
        return Err(MyError::Validation(
            "message carries no audio or voice attachment".to_string(),
        ));
    };

    let status = bot
        .send_message(msg.chat.id, "Processing your audio... Please wait.")
        .reply_parameters(ReplyParameters::new(msg.id))
        .await
        .ok();

    let result = run_pipeline(&bot, &msg, &audio, file_id, config, status.as_ref()).await;

    if let Some(status) = status {
        let _ = bot.delete_message(status.chat.id, status.id).await;
    }

    result
}

async fn run_pipeline(
    bot: &Bot,
    msg: &Message,
    audio: &InboundAudio,
    file_id: &str,
    config: &Config,
    status: Option<&Message>,
) -> Result<(), MyError> {
    let payload = download_audio(bot, file_id).await?;
    info!(
        "downloaded {} payload of {} bytes from chat {}",
        audio.label(),
        payload.len(),
        msg.chat.id
    );

    let key = format!("{}_{}_{}", audio.label(), msg.chat.id, msg.id);
    let staged = StagedFile::create(
        config.get_scratch_dir(),
        &key,
        extension_for_mime(audio.mime_type()),
        &payload,
    )
    .await?;

    update_status(bot, status, "Transcribing audio...").await;
    let staged_bytes = staged.read().await?;
    let transcript = config
        .get_whisper()
        .transcribe(staged.file_name(), audio.mime_type(), staged_bytes, None)
        .await?;
    info!(
        "transcription finished for chat {} ({} chars)",
        msg.chat.id,
        transcript.chars().count()
    );

    let (txt, pdf) = render_artifacts(&transcript, Local::now(), &key)?;

    update_status(bot, status, "Sending your transcription...").await;
    deliver(bot, msg, &transcript, txt, pdf).await
}

async fn download_audio(bot: &Bot, file_id: &str) -> Result<Bytes, MyError> {
    let file = bot
        .get_file(FileId(file_id.to_string()))
        .send()
        .await
        .map_err(|e| MyError::Staging(format!("Telegram getFile failed: {e}")))?;

    let file_url = format!(
        "https://api.telegram.org/file/bot{}/{}",
        bot.token(),
        file.path
    );

    let response = reqwest::get(file_url)
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|e| MyError::Staging(format!("payload download failed: {e}")))?;

    response
        .bytes()
        .await
        .map_err(|e| MyError::Staging(format!("payload download interrupted: {e}")))
}

async fn update_status(bot: &Bot, status: Option<&Message>, text: &str) {
    if let Some(status) = status {
        if let Err(e) = bot.edit_message_text(status.chat.id, status.id, text).await {
            debug!("failed to update status message: {e}");
        }
    }
}

async fn deliver(
    bot: &Bot,
    msg: &Message,
    transcript: &str,
    txt: Artifact,
    pdf: Artifact,
) -> Result<(), MyError> {
    let caption = format!(
        "<b>Transcription complete!</b>\n\n<blockquote expandable>{}</blockquote>",
        html::escape(&preview(transcript, PREVIEW_LIMIT))
    );

    bot.send_document(
        msg.chat.id,
        InputFile::memory(txt.bytes).file_name(txt.file_name),
    )
    .caption(caption)
    .parse_mode(ParseMode::Html)
    .reply_parameters(ReplyParameters::new(msg.id))
    .await
    .map_err(|e| MyError::Delivery(format!("failed to send text artifact: {e}")))?;

    bot.send_document(
        msg.chat.id,
        InputFile::memory(pdf.bytes).file_name(pdf.file_name),
    )
    .await
    .map_err(|e| MyError::Delivery(format!("failed to send PDF artifact: {e}")))?;

    Ok(())
}

fn preview(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let head: String = text.chars().take(limit).collect();
        format!("{head}...")
    }
}
