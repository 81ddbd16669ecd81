use crate::{
    bot::{commander::command_handlers, messager::handle_speech},
    core::config::Config,
    errors::MyError,
    util::enums::Command,
};
use log::{error, info};
use std::{convert::Infallible, ops::ControlFlow, sync::Arc};
use teloxide::{
    dispatching::{
        Dispatcher, HandlerExt, MessageFilterExt, UpdateFilterExt, UpdateHandler,
    },
    dptree,
    error_handlers::LoggingErrorHandler,
    prelude::Requester,
    types::{Chat, Me, Message, Update, UpdateKind},
    update_listeners::Polling,
    utils::command::BotCommands,
    Bot,
};

pub async fn run() -> Result<(), MyError> {
    let config = Arc::new(Config::from_env()?);
    run_bot(config).await
}

async fn run_bot(config: Arc<Config>) -> Result<(), MyError> {
    let bot = config.get_bot().clone();

    bot.set_my_commands(Command::bot_commands())
        .await
        .map_err(|e| MyError::Config(format!("failed to register command menu: {e}")))?;

    let me = bot
        .get_me()
        .await
        .map_err(|e| MyError::Config(format!("failed to authenticate with Telegram: {e}")))?;
    info!("authorized as @{}", me.username());

    let logic_handlers = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command_handlers),
        )
        .branch(
            Update::filter_message()
                .branch(Message::filter_voice().endpoint(handle_speech))
                .branch(Message::filter_audio().endpoint(handle_speech))
                .branch(Message::filter_video_note().endpoint(handle_speech))
                .branch(Message::filter_document().endpoint(handle_speech)),
        );

    let listener = Polling::builder(bot.clone()).drop_pending_updates().build();

    Dispatcher::builder(bot.clone(), dptree::endpoint(root_handler))
        .dependencies(dptree::deps![config.clone(), Arc::new(logic_handlers), me])
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(listener, LoggingErrorHandler::new())
        .await;

    Ok(())
}

async fn root_handler(
    update: Update,
    config: Arc<Config>,
    bot: Bot,
    logic: Arc<UpdateHandler<MyError>>,
    me: Me,
) -> Result<(), Infallible> {
    let deps = dptree::deps![update.clone(), config.clone(), bot.clone(), me.clone()];
    let result = logic.dispatch(deps).await;

    if let ControlFlow::Break(Err(err)) = result {
        handle_error(&bot, &update, &err).await;
    }

    Ok(())
}

fn update_chat(update: &Update) -> Option<&Chat> {
    match &update.kind {
        UpdateKind::Message(m) => Some(&m.chat),
        _ => None,
    }
}

/// Per-request error boundary: log, send one reply naming the failure
/// category, never propagate.
async fn handle_error(bot: &Bot, update: &Update, err: &MyError) {
    error!("update handling failed ({}): {err:?}", err.category());

    if let Some(chat) = update_chat(update) {
        if let Err(send_err) = bot.send_message(chat.id, err.user_message()).await {
            error!("failed to report error to chat {}: {send_err}", chat.id);
        }
    }
}
