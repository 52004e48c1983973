//! OpenAI chat-completions client with strict JSON-schema output.

use async_trait::async_trait;
use descarte_core::config::LlmConfig;
use descarte_core::errors::GuidanceError;
use descarte_core::schema::ResponseSchema;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::llm::LlmClient;

#[derive(Clone)]
pub struct OpenAiClient {
    api_key: SecretString,
    base_url: String,
    model: String,
    client: Client,
}

impl OpenAiClient {
    pub fn new(api_key: SecretString, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self { api_key, base_url: base_url.into(), model: model.into(), client: Client::new() }
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, GuidanceError> {
        let api_key = config.api_key().ok_or(GuidanceError::MissingCredential)?;
        Ok(Self::new(api_key.to_string().into(), config.base_url.clone(), config.model.clone()))
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    pub fn request_body(&self, prompt: &str, schema: &ResponseSchema) -> Value {
        json!({
            "model": &self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": schema.name(),
                    "strict": true,
                    "schema": schema.to_json_schema()
                }
            }
        })
    }
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
    refusal: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

/// Pull the first choice's text out of a chat-completions response body.
pub fn extract_content(body: &str) -> Result<String, GuidanceError> {
    let response: ApiResponse = serde_json::from_str(body).map_err(|error| {
        GuidanceError::MalformedReply(format!("resposta do provedor ilegível: {error}"))
    })?;
    let message = response.choices.into_iter().next().map(|choice| choice.message);
    match message {
        Some(Message { refusal: Some(refusal), .. }) => {
            Err(GuidanceError::MalformedReply(format!("o modelo recusou a solicitação: {refusal}")))
        }
        Some(Message { content: Some(content), .. }) if !content.trim().is_empty() => Ok(content),
        _ => Err(GuidanceError::EmptyReply),
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete_structured(
        &self,
        prompt: &str,
        schema: &ResponseSchema,
    ) -> Result<String, GuidanceError> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.api_key.expose_secret())
            .json(&self.request_body(prompt, schema))
            .send()
            .await
            .map_err(|error| GuidanceError::Transport(error.to_string()))?;

        let status = response.status();
        let body =
            response.text().await.map_err(|error| GuidanceError::Transport(error.to_string()))?;
        debug!(
            event_name = "agent.openai.response",
            status = status.as_u16(),
            body_len = body.len(),
            "chat completion response received"
        );

        if !status.is_success() {
            return Err(GuidanceError::Provider { status: status.as_u16(), body });
        }

        extract_content(&body)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
