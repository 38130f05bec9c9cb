//! OpenAI-compatible embeddings and chat completion clients.
//!
//! All provider configuration (base URL, key, models) is passed in at
//! construction; nothing is attached to a client after it is built.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Maps text to a fixed-length embedding vector.
pub trait EmbeddingProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>, Error>;
}

/// Maps (system prompt, user message) to a generated answer.
pub trait AnswerProvider {
    fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String, Error>;
}

/// Built-in provider defaults, selected by name in the configuration.
pub struct ProviderPreset {
    pub api_base: &'static str,
    pub chat_model: &'static str,
    pub embedding_model: &'static str,
    pub embedding_dimensions: usize,
}

/// Resolve a provider preset by name.
///
/// # Errors
///
/// Returns `Config` for names outside the supported set.
pub fn preset(name: &str) -> Result<ProviderPreset, Error> {
    match name {
        "openai" => Ok(ProviderPreset {
            api_base: "https://api.openai.com/v1",
            chat_model: "gpt-4o-mini",
            embedding_model: "text-embedding-3-small",
            embedding_dimensions: 1536,
        }),
        "gemini" => Ok(ProviderPreset {
            api_base: "https://generativelanguage.googleapis.com/v1beta",
            chat_model: "gemini-pro",
            embedding_model: "text-embedding-005",
            embedding_dimensions: 768,
        }),
        other => Err(Error::Config(format!(
            "unknown provider: {other}. Supported: openai, gemini"
        ))),
    }
}

/// Fully-resolved connection settings for [`OpenAiClient`].
#[derive(Clone)]
pub struct ProviderSettings {
    pub api_base: String,
    pub api_key: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub timeout: Duration,
}

/// Blocking client for OpenAI-compatible `/embeddings` and `/chat/completions`
/// endpoints.
pub struct OpenAiClient {
    agent: ureq::Agent,
    settings: ProviderSettings,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Join the API base with an endpoint path, tolerating a trailing slash.
fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

/// Read/connect timeouts surface as io-kind transport errors in ureq.
fn classify_transport(err: ureq::Transport) -> Error {
    let detail = err.to_string();
    if matches!(err.kind(), ureq::ErrorKind::Io) && detail.contains("timed out") {
        Error::ProviderTimeout(detail)
    } else {
        Error::Provider(detail)
    }
}

impl OpenAiClient {
    pub fn new(settings: ProviderSettings) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(settings.timeout).build();
        OpenAiClient { agent, settings }
    }

    fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: impl Serialize,
    ) -> Result<T, Error> {
        let url = endpoint(&self.settings.api_base, path);
        tracing::debug!(%url, "provider request");

        let response = self
            .agent
            .post(&url)
            .set(
                "Authorization",
                &format!("Bearer {}", self.settings.api_key),
            )
            .send_json(body);

        match response {
            Ok(resp) => resp
                .into_json()
                .map_err(|e| Error::Provider(format!("malformed provider response: {e}"))),
            Err(ureq::Error::Status(code, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                Err(Error::Provider(format!(
                    "provider returned HTTP {code}: {body}"
                )))
            }
            Err(ureq::Error::Transport(transport)) => Err(classify_transport(transport)),
        }
    }
}

impl EmbeddingProvider for OpenAiClient {
    fn embed(&self, text: &str) -> Result<Vec<f32>, Error> {
        let request = EmbeddingRequest {
            model: &self.settings.embedding_model,
            input: vec![text],
        };
        let response: EmbeddingResponse = self.post("embeddings", &request)?;
        response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| Error::Provider("empty embedding response".to_string()))
    }
}

impl AnswerProvider for OpenAiClient {
    fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String, Error> {
        let request = ChatRequest {
            model: &self.settings.chat_model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_message,
                },
            ],
        };
        let response: ChatResponse = self.post("chat/completions", &request)?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::Provider("empty completion response".to_string()))
    }
}
