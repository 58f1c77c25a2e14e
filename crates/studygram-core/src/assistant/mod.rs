//! Study assistant backed by a generative-text service.
//!
//! The service itself sits behind [`TextGenerator`]. [`StudyAssistant`]
//! builds the prompts and never surfaces a failure: every error or empty
//! reply is logged and replaced with a fixed user-visible string.

pub mod gemini;

use std::future::Future;

use indoc::formatdoc;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::error::AssistantError;
use crate::storage::AssistantConfig;

pub use gemini::GeminiClient;

pub const TIP_EMPTY_FALLBACK: &str = "Keep focused and take regular breaks!";
pub const TIP_ERROR_FALLBACK: &str = "Study in short bursts for better retention.";
pub const ASK_EMPTY_FALLBACK: &str = "I'm sorry, I couldn't process that request.";
pub const ASK_ERROR_FALLBACK: &str =
    "I'm having trouble connecting to my knowledge base right now. Please try again in a moment.";

pub const DEFAULT_SUBJECT: &str = "General Learning";
pub const DEFAULT_CHAT_CONTEXT: &str = "General Study Help";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
        }
    }
}

/// One call to the generative service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub model: String,
    pub system_instruction: Option<String>,
    /// Prior turns, oldest first.
    pub history: Vec<ChatMessage>,
    pub prompt: String,
}

/// Opaque request/response boundary to a generative-text service.
pub trait TextGenerator: Send + Sync {
    fn generate(
        &self,
        request: &GenerateRequest,
    ) -> impl Future<Output = Result<String, AssistantError>> + Send;
}

pub struct StudyAssistant<G> {
    generator: G,
    fast_model: String,
    chat_model: String,
}

impl<G: TextGenerator> StudyAssistant<G> {
    pub fn new(generator: G, config: &AssistantConfig) -> Self {
        Self {
            generator,
            fast_model: config.fast_model.clone(),
            chat_model: config.chat_model.clone(),
        }
    }

    /// A short tip for `subject` (blank means general learning).
    pub async fn study_tip(&self, subject: &str) -> String {
        let subject = non_blank(subject).unwrap_or(DEFAULT_SUBJECT);
        let request = GenerateRequest {
            model: self.fast_model.clone(),
            system_instruction: None,
            history: Vec::new(),
            prompt: format!(
                "Give me a short, highly effective study tip for the subject: {subject}. \
                 Keep it under 150 characters."
            ),
        };
        match self.generator.generate(&request).await {
            Ok(text) => non_blank(&text).unwrap_or(TIP_EMPTY_FALLBACK).to_string(),
            Err(e) => {
                warn!(error = %e, subject, "study tip generation failed");
                TIP_ERROR_FALLBACK.to_string()
            }
        }
    }

    /// Rewrite a post caption; the raw caption is returned on any failure.
    pub async fn smart_caption(&self, subject: &str, raw_caption: &str) -> String {
        let request = GenerateRequest {
            model: self.fast_model.clone(),
            system_instruction: None,
            history: Vec::new(),
            prompt: format!(
                "Rewrite this study post caption to be more engaging and academic for StudyGram. \
                 Subject: {subject}. Caption: {raw_caption}. Add 3 relevant hashtags."
            ),
        };
        match self.generator.generate(&request).await {
            Ok(text) => non_blank(&text).unwrap_or(raw_caption).to_string(),
            Err(e) => {
                warn!(error = %e, "caption rewrite failed");
                raw_caption.to_string()
            }
        }
    }

    /// Answer `question` within `context`, given the prior transcript.
    pub async fn ask(&self, context: &str, question: &str, history: &[ChatMessage]) -> String {
        let request = GenerateRequest {
            model: self.chat_model.clone(),
            system_instruction: Some(system_instruction(context)),
            history: history.to_vec(),
            prompt: question.to_string(),
        };
        match self.generator.generate(&request).await {
            Ok(text) => non_blank(&text).unwrap_or(ASK_EMPTY_FALLBACK).to_string(),
            Err(e) => {
                warn!(error = %e, "study assistant request failed");
                ASK_ERROR_FALLBACK.to_string()
            }
        }
    }
}

fn system_instruction(context: &str) -> String {
    formatdoc!(
        "
        You are the StudyGram AI Assistant. Your goal is to help students understand study material.
        Context provided: {context}.
        Answer questions accurately, concisely, and in a helpful academic tone.
        If the question is unrelated to the study material or general learning, politely redirect the student.",
        context = context,
    )
}

fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Transcript of the chat panel for one context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    context: String,
    messages: Vec<ChatMessage>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self {
            context: DEFAULT_CHAT_CONTEXT.to_string(),
            messages: Vec::new(),
        }
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chat about a specific post, opened with a greeting.
    pub fn for_post(subject: &str, caption: &str, author: &str) -> Self {
        let greeting = format!(
            "Hi! I'm ready to help you with {author}'s post about {subject}. What would you like to know?"
        );
        Self {
            context: format!("Subject: {subject}. Post Content: {caption}. Author: {author}"),
            messages: vec![ChatMessage::new(ChatRole::Assistant, greeting)],
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Append `question` and the assistant's reply. Blank input is ignored
    /// and returns `None`.
    pub async fn send<G: TextGenerator>(
        &mut self,
        assistant: &StudyAssistant<G>,
        question: &str,
    ) -> Option<&ChatMessage> {
        let question = non_blank(question)?;
        let history = self.messages.clone();
        self.messages.push(ChatMessage::new(ChatRole::User, question));
        let reply = assistant.ask(&self.context, question, &history).await;
        self.messages.push(ChatMessage::new(ChatRole::Assistant, reply));
        self.messages.last()
    }
}
