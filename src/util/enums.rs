use teloxide::macros::BotCommands;
use teloxide::types::{MediaKind, Message, MessageKind};

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "what this bot does")]
    Start,
    #[command(description = "how to use the bot")]
    Help,
}

/// The audio attachment of one inbound message, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundAudio {
    Voice { file_id: String, mime_type: String },
    Audio { file_id: String, mime_type: String },
    VideoNote { file_id: String },
    Unsupported,
}

impl InboundAudio {
    pub fn from_message(msg: &Message) -> Self {
        let MessageKind::Common(common) = &msg.kind else {
            return InboundAudio::Unsupported;
        };

        match &common.media_kind {
            MediaKind::Voice(voice) => {
                let mime_type = voice
                    .voice
                    .mime_type
                    .as_ref()
                    .map(|mime| mime.essence_str().to_string())
                    // Telegram voice notes are Opus in an OGG container.
                    .unwrap_or_else(|| "audio/ogg".to_string());
                InboundAudio::Voice {
                    file_id: voice.voice.file.id.0.clone(),
                    mime_type,
                }
            }
            MediaKind::Audio(audio) => match audio.audio.mime_type.as_ref() {
                Some(mime) => InboundAudio::Audio {
                    file_id: audio.audio.file.id.0.clone(),
                    mime_type: mime.essence_str().to_string(),
                },
                None => InboundAudio::Unsupported,
            },
            MediaKind::VideoNote(video_note) => InboundAudio::VideoNote {
                file_id: video_note.video_note.file.id.0.clone(),
            },
            MediaKind::Document(document) => match document.document.mime_type.as_ref() {
                Some(mime) if mime.essence_str().starts_with("audio/") => InboundAudio::Audio {
                    file_id: document.document.file.id.0.clone(),
                    mime_type: mime.essence_str().to_string(),
                },
                _ => InboundAudio::Unsupported,
            },
            _ => InboundAudio::Unsupported,
        }
    }

    pub fn file_id(&self) -> Option<&str> {
        match self {
            InboundAudio::Voice { file_id, .. }
            | InboundAudio::Audio { file_id, .. }
            | InboundAudio::VideoNote { file_id } => Some(file_id),
            InboundAudio::Unsupported => None,
        }
    }

    pub fn mime_type(&self) -> &str {
        match self {
            InboundAudio::Voice { mime_type, .. } | InboundAudio::Audio { mime_type, .. } => {
                mime_type
            }
            InboundAudio::VideoNote { .. } => "video/mp4",
            InboundAudio::Unsupported => "application/octet-stream",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InboundAudio::Voice { .. } => "voice",
            InboundAudio::Audio { .. } => "audio",
            InboundAudio::VideoNote { .. } => "video_note",
            InboundAudio::Unsupported => "unsupported",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_follow_the_attachment_kind() {
        let voice = InboundAudio::Voice {
            file_id: "f1".into(),
            mime_type: "audio/ogg".into(),
        };
        assert_eq!(voice.file_id(), Some("f1"));
        assert_eq!(voice.mime_type(), "audio/ogg");
        assert_eq!(voice.label(), "voice");

        let note = InboundAudio::VideoNote { file_id: "f2".into() };
        assert_eq!(note.mime_type(), "video/mp4");

        assert_eq!(InboundAudio::Unsupported.file_id(), None);
    }
}
