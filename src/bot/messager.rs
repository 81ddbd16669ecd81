use crate::{
    core::{config::Config, services::transcription::transcription_handler},
    errors::MyError,
};
use log::{error, info};
use std::sync::Arc;
use teloxide::{
    payloads::SendMessageSetters,
    requests::Requester,
    types::{Message, ReplyParameters},
    Bot,
};
use tokio::task;

/// Entry point for voice, audio, video-note and document messages.
///
/// Each audio event runs as its own task so a long transcription never
/// blocks the chat's update queue; the task reports its own failures.
pub async fn handle_speech(bot: Bot, message: Message, config: Arc<Config>) -> Result<(), MyError> {
    if message.from.as_ref().is_some_and(|user| user.is_bot)
        || message
            .forward_from_user()
            .is_some_and(|origin| origin.is_bot)
    {
        return Ok(());
    }

    task::spawn(async move {
        if let Err(err) = transcription_handler(bot.clone(), message.clone(), &config).await {
            report_failure(&bot, &message, &err).await;
        }
    });

    Ok(())
}

async fn report_failure(bot: &Bot, message: &Message, err: &MyError) {
    match err {
        MyError::Validation(reason) => {
            info!("ignoring message in chat {}: {reason}", message.chat.id)
        }
        _ => error!(
            "pipeline failed for chat {} ({}): {err:?}",
            message.chat.id,
            err.category()
        ),
    }

    if let Err(send_err) = bot
        .send_message(message.chat.id, err.user_message())
        .reply_parameters(ReplyParameters::new(message.id))
        .await
    {
        error!(
            "failed to report failure to chat {}: {send_err}",
            message.chat.id
        );
    }
}
