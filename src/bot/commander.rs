use crate::{
    bot::commands::{help::help_handler, start::start_handler},
    core::config::Config,
    errors::MyError,
    util::enums::Command,
};
use std::sync::Arc;
use teloxide::{prelude::Message, Bot};

pub async fn command_handlers(
    bot: Bot,
    message: Message,
    cmd: Command,
    config: Arc<Config>,
) -> Result<(), MyError> {
    match cmd {
        Command::Start => start_handler(bot, message, &config).await,
        Command::Help => help_handler(bot, message).await,
    }
}
