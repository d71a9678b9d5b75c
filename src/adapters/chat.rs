use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::adapters::prompt;
use crate::domain::model::{Email, RawDraft};
use crate::domain::ports::ExtractionOracle;
use crate::utils::error::{ExtractError, Result};

/// Extraction oracle backed by an OpenAI-compatible chat-completions API.
/// The model's reply is untrusted: it gets fence-stripped and parsed into a
/// `RawDraft`, and any failure along the way surfaces as an error the
/// pipeline degrades per email.
pub struct ChatOracle {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl ChatOracle {
    pub fn new(endpoint: String, api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl ExtractionOracle for ChatOracle {
    async fn extract(&self, email: &Email) -> Result<RawDraft> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": prompt::render(&email.subject, &email.body),
            }],
            "temperature": 0,
        });

        let url = format!("{}/chat/completions", self.endpoint.trim_end_matches('/'));
        tracing::debug!("Requesting extraction for {} from {}", email.id, url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ExtractError::OracleError {
                message: format!("chat completion returned status {}", response.status()),
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| ExtractError::OracleError {
                message: "chat completion had no choices".to_string(),
            })?;

        let draft = serde_json::from_str(strip_code_fences(content))?;
        Ok(draft)
    }

    fn name(&self) -> &'static str {
        "chat"
    }
}

/// Models often wrap the JSON reply in a Markdown code fence.
fn strip_code_fences(response: &str) -> &str {
    let mut text = response.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}
