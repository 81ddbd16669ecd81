use crate::errors::MyError;
use bytes::Bytes;
use log::debug;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const WHISPER_MODEL: &str = "whisper-1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for the OpenAI Whisper transcription API.
#[derive(Clone)]
pub struct WhisperClient {
    http: reqwest::Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl WhisperClient {
    pub fn new(api_key: String) -> Result<Self, MyError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MyError::Config(format!("failed to build transcription client: {e}")))?;

        Ok(WhisperClient { http, api_key })
    }

    /// Upload staged audio bytes and return the transcript as an opaque string.
    ///
    /// One attempt only; any failure surfaces as a service error.
    pub async fn transcribe(
        &self,
        file_name: &str,
        mime_type: &str,
        data: Bytes,
        language: Option<&str>,
    ) -> Result<String, MyError> {
        debug!("transcribing {} bytes ({mime_type})", data.len());

        let part = Part::bytes(data.to_vec())
            .file_name(file_name.to_string())
            .mime_str(mime_type)
            .map_err(|e| MyError::Service(format!("unsupported mime type {mime_type}: {e}")))?;

        let mut form = Form::new()
            .text("model", WHISPER_MODEL)
            .text("response_format", "json")
            .part("file", part);
        if let Some(language) = language {
            form = form.text("language", language.to_string());
        }

        let response = self
            .http
            .post(format!("{OPENAI_API_BASE}/audio/transcriptions"))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| MyError::Service(format!("transcription request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(MyError::Service(format!(
                "transcription API returned {status}: {detail}"
            )));
        }

        let parsed: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| MyError::Service(format!("invalid transcription response: {e}")))?;

        Ok(parsed.text.trim().to_string())
    }
}
