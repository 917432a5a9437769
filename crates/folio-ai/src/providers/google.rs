use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::provider::ChatProvider;
use crate::session::ChatMessage;

/// Model used when the operator does not pick one.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Google GenAI (Gemini) Provider
pub struct GoogleGenAiProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl GoogleGenAiProvider {
    #[must_use]
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

/// Build the generateContent request: the system instruction plus the whole
/// running transcript as alternating user/model turns.
fn request_body(system_instruction: &str, transcript: &[ChatMessage]) -> Value {
    let contents: Vec<Value> = transcript
        .iter()
        .map(|message| {
            json!({
                "role": message.role.as_str(),
                "parts": [{ "text": message.text }]
            })
        })
        .collect();

    json!({
        "system_instruction": {
            "parts": [{ "text": system_instruction }]
        },
        "contents": contents,
    })
}

#[async_trait]
impl ChatProvider for GoogleGenAiProvider {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn reply(&self, system_instruction: &str, transcript: &[ChatMessage]) -> Result<String> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&request_body(system_instruction, transcript))
            .send()
            .await
            .context("Failed to send request to Google AI")?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Google AI API error: {error_text}");
        }

        let body: Value = response
            .json()
            .await
            .context("Failed to parse Google AI response")?;

        log::debug!(
            "{} answered a conversation of {} turns",
            self.model,
            transcript.len()
        );

        // Extract text from: candidates[0].content.parts[0].text
        body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(ToString::to_string)
            .context("Failed to extract text from Google AI response")
    }
}
