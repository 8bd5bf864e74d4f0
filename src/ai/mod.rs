//! Completion-service module.
//!
//! Wraps the hosted chat-completion API used to answer questions about
//! extracted PDF text. Errors are structured so callers can always tell a
//! failed call from a genuine answer.

pub mod openai;

use serde::Serialize;

// ============================================================================
// Structured AI Errors
// ============================================================================

/// Types of completion API errors
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum AiErrorKind {
    /// Rate limit exceeded - too many requests
    RateLimit,
    /// Quota/credits exhausted - need to upgrade plan
    QuotaExceeded,
    /// Invalid or expired API key
    InvalidApiKey,
    /// Model not found or not available
    ModelNotFound,
    /// Server error on provider side
    ServerError,
    /// Network/connection error
    NetworkError,
    /// Other/unknown error
    Other,
}

/// Structured completion error with details
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiError {
    pub kind: AiErrorKind,
    pub message: String,
    pub provider: String,
    pub model: String,
}

impl AiError {
    pub fn rate_limit(provider: &str, model: &str) -> Self {
        Self {
            kind: AiErrorKind::RateLimit,
            message: "Too many requests. Please wait a moment.".to_string(),
            provider: provider.to_string(),
            model: model.to_string(),
        }
    }

    pub fn quota_exceeded(provider: &str, model: &str) -> Self {
        Self {
            kind: AiErrorKind::QuotaExceeded,
            message: "Quota exhausted. Check your plan and billing details.".to_string(),
            provider: provider.to_string(),
            model: model.to_string(),
        }
    }

    pub fn invalid_api_key(provider: &str, model: &str) -> Self {
        Self {
            kind: AiErrorKind::InvalidApiKey,
            message: "Invalid API key. Check your configuration.".to_string(),
            provider: provider.to_string(),
            model: model.to_string(),
        }
    }

    pub fn model_not_found(provider: &str, model: &str) -> Self {
        Self {
            kind: AiErrorKind::ModelNotFound,
            message: format!("Model '{}' is not available.", model),
            provider: provider.to_string(),
            model: model.to_string(),
        }
    }

    pub fn server_error(provider: &str, model: &str, details: &str) -> Self {
        Self {
            kind: AiErrorKind::ServerError,
            message: format!("Server error from {}: {}", provider, details),
            provider: provider.to_string(),
            model: model.to_string(),
        }
    }

    pub fn network_error(provider: &str, model: &str, details: &str) -> Self {
        Self {
            kind: AiErrorKind::NetworkError,
            message: format!("Network error: {}", details),
            provider: provider.to_string(),
            model: model.to_string(),
        }
    }

    pub fn other(provider: &str, model: &str, message: &str) -> Self {
        Self {
            kind: AiErrorKind::Other,
            message: message.to_string(),
            provider: provider.to_string(),
            model: model.to_string(),
        }
    }
}

impl std::fmt::Display for AiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AiError {}

// ============================================================================
// Request Configuration Constants
// ============================================================================

/// Request timeout in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

// ============================================================================
// Prompt Templates
// ============================================================================

/// System prompt that keeps the assistant on the uploaded document.
pub const SYSTEM_PROMPT: &str = "You are an assistant answering only questions \
related to the given PDF content. Don't answer any other irrelevant questions.";

/// Build the user prompt from extracted document text and the question.
pub fn build_question_prompt(context: &str, question: &str) -> String {
    format!("Context: {}\nQuestion: {}", context, question)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_prompt_contains_both_parts() {
        let prompt = build_question_prompt("chapter one text", "What is chapter one about?");
        assert!(prompt.starts_with("Context: chapter one text"));
        assert!(prompt.ends_with("Question: What is chapter one about?"));
    }

    #[test]
    fn test_error_kinds_serialize_snake_case() {
        let err = AiError::rate_limit("OpenAI", "gpt-4o-mini");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "rate_limit");
        assert_eq!(json["provider"], "OpenAI");
    }
}
