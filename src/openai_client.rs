use crate::errors::TranslationError;
use crate::schema::{response_schema, TranslationResult, SCHEMA_NAME};
use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

const SYSTEM_PROMPT: &str = concat!(
    "You are a professional English-Japanese translator and language tutor.\n",
    "1. Translate the English input into natural Japanese.\n",
    "2. Provide constructive feedback on the English input (grammar, nuance, word choice) in concise ENGLISH.\n",
    "3. Score the English quality from 0 to 100.\n",
    "4. Detect the nuance/tone of the input.",
);

#[derive(Clone)]
pub struct OpenAiTranslator {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiTranslator {
    pub fn new(api_key: String, model: String, base_url: &str, timeout: Duration) -> Result<Self> {
        if api_key.is_empty() { return Err(anyhow!("OPENAI_API_KEY is empty")); }
        let client = Client::builder()
            .user_agent(concat!("yakusu/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            api_key,
            model,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One attempt, no retry. Transport and decode failures both come back as the error value.
    pub async fn translate(&self, text: &str) -> Result<TranslationResult, TranslationError> {
        let body = build_request(&self.model, text);
        info!(model=%self.model, chars=%text.chars().count(), "Requesting translation");

        let resp = self.client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            warn!(%status, "Provider rejected request");
            return Err(TranslationError::Transport(format!("OpenAI error {}: {}", status, txt)));
        }

        let raw = resp.text().await?;
        decode_response(&raw)
    }
}

pub(crate) fn build_request(model: &str, text: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage { role: "system".into(), content: SYSTEM_PROMPT.to_string() },
            // User message is the input verbatim
            ChatMessage { role: "user".into(), content: text.to_string() },
        ],
        response_format: ResponseFormat {
            kind: "json_schema".into(),
            json_schema: JsonSchemaFormat {
                name: SCHEMA_NAME.into(),
                strict: true,
                schema: response_schema(),
            },
        },
    }
}

/// Decode a successful chat completion body into the structured result.
pub(crate) fn decode_response(raw: &str) -> Result<TranslationResult, TranslationError> {
    let data: ChatResponse = serde_json::from_str(raw).map_err(|err| {
        debug!(%err, "Completion envelope did not decode");
        TranslationError::SchemaParse
    })?;

    if let Some(u) = data.usage.as_ref() {
        info!(
            prompt_tokens=?u.prompt_tokens,
            completion_tokens=?u.completion_tokens,
            total_tokens=?u.total_tokens,
            "OpenAI usage"
        );
    }

    let message = data
        .choices
        .into_iter()
        .next()
        .map(|c| c.message)
        .ok_or(TranslationError::SchemaParse)?;

    if let Some(refusal) = message.refusal.as_deref() {
        warn!(refusal=%refusal, "Model refused to answer");
        return Err(TranslationError::SchemaParse);
    }

    let content = message
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or(TranslationError::SchemaParse)?;

    serde_json::from_str(&content).map_err(|err| {
        debug!(%err, "Structured output failed schema validation");
        TranslationError::SchemaParse
    })
}

#[derive(Serialize)]
pub(crate) struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: String,
    json_schema: JsonSchemaFormat,
}

#[derive(Serialize)]
struct JsonSchemaFormat {
    name: String,
    strict: bool,
    schema: Value,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
    refusal: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: Option<u64>,
    completion_tokens: Option<u64>,
    total_tokens: Option<u64>,
}
