//! Gemini `generateContent` client.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{ChatRole, GenerateRequest, TextGenerator};
use crate::error::AssistantError;
use crate::storage::AssistantConfig;

const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiClient {
    http: Client,
    base_url: Url,
    /// Missing keys surface as an error on each request, not at construction.
    api_key: Option<String>,
    api_key_env: String,
}

impl GeminiClient {
    /// Build a client against `base_url` (a trailing slash is added if missing).
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, AssistantError> {
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: Url::parse(&base)?,
            api_key: Some(api_key.to_string()).filter(|key| !key.trim().is_empty()),
            api_key_env: String::new(),
        })
    }

    /// Build from config, reading the key from the configured env var.
    pub fn from_config(config: &AssistantConfig) -> Result<Self, AssistantError> {
        let api_key = std::env::var(&config.api_key_env).unwrap_or_default();
        let mut client = Self::new(
            &config.base_url,
            &api_key,
            Duration::from_secs(config.timeout_secs),
        )?;
        client.api_key_env = config.api_key_env.clone();
        Ok(client)
    }

    fn endpoint(&self, model: &str) -> Result<Url, AssistantError> {
        Ok(self
            .base_url
            .join(&format!("models/{model}:generateContent"))?)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> Content<'a> {
    fn new(role: Option<&'a str>, text: &'a str) -> Self {
        Self {
            role,
            parts: vec![Part { text }],
        }
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, concatenated.
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect::<String>())
            .unwrap_or_default()
    }
}

/// Leading assistant turns (such as a seeded greeting) are dropped so the
/// conversation always opens with a user turn.
fn build_body(request: &GenerateRequest) -> GenerateContentBody<'_> {
    let mut contents: Vec<Content<'_>> = request
        .history
        .iter()
        .skip_while(|m| m.role == ChatRole::Assistant)
        .map(|m| {
            let role = match m.role {
                ChatRole::User => "user",
                ChatRole::Assistant => "model",
            };
            Content::new(Some(role), &m.content)
        })
        .collect();
    contents.push(Content::new(Some("user"), &request.prompt));

    GenerateContentBody {
        contents,
        system_instruction: request
            .system_instruction
            .as_deref()
            .map(|text| Content::new(None, text)),
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, AssistantError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AssistantError::MissingApiKey {
                env_var: self.api_key_env.clone(),
            })?;
        let url = self.endpoint(&request.model)?;
        let body = build_body(request);

        let resp = self
            .http
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(AssistantError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: GenerateContentResponse = resp.json().await?;
        Ok(parsed.into_text())
    }
}
