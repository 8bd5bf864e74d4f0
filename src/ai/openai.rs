//! OpenAI chat-completions provider for document question answering.

use super::{build_question_prompt, AiError, REQUEST_TIMEOUT_SECS, SYSTEM_PROMPT};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Parse OpenAI API error response
fn parse_error(status: u16, body: &str, model: &str) -> AiError {
    let body_lower = body.to_lowercase();

    match status {
        429 => {
            // OpenAI uses 429 for rate limit and quota
            if body_lower.contains("quota")
                || body_lower.contains("billing")
                || body_lower.contains("exceeded")
            {
                AiError::quota_exceeded("OpenAI", model)
            } else {
                AiError::rate_limit("OpenAI", model)
            }
        }
        401 => AiError::invalid_api_key("OpenAI", model),
        403 => {
            if body_lower.contains("permission") || body_lower.contains("access") {
                AiError::invalid_api_key("OpenAI", model)
            } else {
                AiError::other("OpenAI", model, "Access denied")
            }
        }
        404 => AiError::model_not_found("OpenAI", model),
        500..=599 => AiError::server_error("OpenAI", model, &format!("HTTP {}", status)),
        _ => AiError::other(
            "OpenAI",
            model,
            &format!(
                "HTTP {}: {}",
                status,
                if body.len() > 200 { &body[..200] } else { body }
            ),
        ),
    }
}

/// Ask a question about extracted document text.
///
/// Single attempt, no automatic retries: a failed call surfaces as a
/// structured [`AiError`] rather than an answer-shaped string.
pub async fn ask(
    api_key: &str,
    model: &str,
    context: &str,
    question: &str,
) -> Result<String, AiError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| AiError::invalid_api_key("OpenAI", model))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .pool_max_idle_per_host(2)
        .build()
        .map_err(|e| AiError::network_error("OpenAI", model, &e.to_string()))?;

    let request_body = ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage {
                role: "system".to_string(),
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: build_question_prompt(context, question),
            },
        ],
    };

    let response = match client.post(API_URL).json(&request_body).send().await {
        Ok(resp) => resp,
        Err(e) => {
            return Err(if e.is_timeout() {
                AiError::network_error("OpenAI", model, "Request timed out")
            } else if e.is_connect() {
                AiError::network_error("OpenAI", model, "Connection failed")
            } else {
                AiError::network_error("OpenAI", model, &e.to_string())
            });
        }
    };

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(parse_error(status.as_u16(), &body, model));
    }

    let data: ChatCompletionResponse = response
        .json()
        .await
        .map_err(|e| AiError::other("OpenAI", model, &format!("JSON parse error: {}", e)))?;

    let answer = data
        .choices
        .first()
        .and_then(|c| c.message.content.clone())
        .unwrap_or_default();

    Ok(answer)
}
