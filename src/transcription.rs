use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::NatarisApi;

/// Text recovered from an uploaded audio payload
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionResult {
    pub text: String,
    #[serde(default)]
    pub model: Option<String>,
}

impl NatarisApi {
    /**
    Uploads binary audio content for transcription

    The audio bytes are sent as the `file` part of a multipart form together
    with the model selector. Reading audio from disk is the caller's job, so
    the client never holds a file handle.

    Fails with a validation error before any network call if the audio
    payload or the model id is empty.
    */
    pub async fn transcribe(&self, audio: Vec<u8>, model: &str) -> Result<TranscriptionResult> {
        if audio.is_empty() {
            return Err(Error::Validation(
                "audio payload must not be empty".to_string(),
            ));
        }
        if model.trim().is_empty() {
            return Err(Error::Validation("model id must not be empty".to_string()));
        }

        let form = Form::new()
            .part("file", Part::bytes(audio).file_name("audio"))
            .text("model", model.to_string());

        self.post_multipart("/transcribe", form).await
    }
}
