use teloxide::RequestError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MyError {
    #[error("Telegram API Error: {0}")]
    Teloxide(#[from] RequestError),

    #[error("Unsupported message: {0}")]
    Validation(String),

    #[error("Staging Error: {0}")]
    Staging(String),

    #[error("Transcription Service Error: {0}")]
    Service(String),

    #[error("Render Error: {0}")]
    Render(String),

    #[error("Delivery Error: {0}")]
    Delivery(String),

    #[error("Config Error: {0}")]
    Config(String),
}

impl MyError {
    pub fn category(&self) -> &'static str {
        match self {
            MyError::Validation(_) => "validation",
            MyError::Staging(_) => "staging",
            MyError::Service(_) => "transcription service",
            MyError::Render(_) => "rendering",
            MyError::Delivery(_) | MyError::Teloxide(_) => "delivery",
            MyError::Config(_) => "configuration",
        }
    }

    /// The single chat reply sent to the user when a pipeline run fails.
    pub fn user_message(&self) -> String {
        match self {
            MyError::Validation(_) => {
                "Send me a voice message or an audio file and I'll transcribe it for you."
                    .to_string()
            }
            MyError::Staging(_) => {
                "❌ Staging error: could not download your audio. It may be too large (>20 MB)."
                    .to_string()
            }
            MyError::Service(_) => {
                "❌ Transcription service error: your audio could not be transcribed. Please try again later."
                    .to_string()
            }
            MyError::Render(_) => {
                "❌ Rendering error: the transcription succeeded but the documents could not be generated."
                    .to_string()
            }
            MyError::Delivery(_) | MyError::Teloxide(_) => {
                "❌ Delivery error: could not send the transcription back to you. Please try again."
                    .to_string()
            }
            MyError::Config(_) => {
                "❌ Configuration error: the bot is misconfigured. Please contact the administrator."
                    .to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_maps_to_a_reply() {
        let errors = [
            MyError::Validation("no audio".into()),
            MyError::Staging("download failed".into()),
            MyError::Service("quota exceeded".into()),
            MyError::Render("bad stream".into()),
            MyError::Delivery("payload rejected".into()),
            MyError::Config("BOT_TOKEN expected".into()),
        ];
        for error in errors {
            assert!(!error.category().is_empty());
            assert!(!error.user_message().is_empty());
        }
    }

    #[test]
    fn failure_replies_name_their_category() {
        assert!(MyError::Staging("x".into()).user_message().contains("Staging"));
        assert!(MyError::Service("x".into())
            .user_message()
            .contains("Transcription service"));
        assert!(MyError::Render("x".into()).user_message().contains("Rendering"));
        assert!(MyError::Delivery("x".into()).user_message().contains("Delivery"));
    }

    #[test]
    fn validation_reply_is_a_usage_hint_not_an_error() {
        let hint = MyError::Validation("no audio".into()).user_message();
        assert!(!hint.contains('❌'));
        assert!(hint.contains("voice message"));
    }
}
