use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use super::ChatModel;
use crate::config::{CHAT_MODEL, CHAT_TEMPERATURE, EXTERNAL_CALL_TIMEOUT, GROQ_BASE_URL};
use crate::models::{CompletionRequest, CompletionResponse, Message};

/// Groq chat-completion client (OpenAI-compatible endpoint). Model and
/// temperature are fixed; the full completion is awaited, no streaming.
pub struct GroqClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GroqClient {
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder().timeout(EXTERNAL_CALL_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: GROQ_BASE_URL.to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl ChatModel for GroqClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = CompletionRequest {
            model: CHAT_MODEL.to_string(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
            temperature: CHAT_TEMPERATURE,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            anyhow::bail!("Groq request failed: {} - {}", status, error_text);
        }

        let completion: CompletionResponse = response.json().await?;
        let answer = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| anyhow::anyhow!("Groq response contained no choices"))?;

        Ok(answer)
    }
}
