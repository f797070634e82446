//! Core `RemoteCorrector` trait and `ApiCorrector` implementation.
//!
//! `ApiCorrector` calls any OpenAI-compatible `/v1/chat/completions` endpoint
//! (OpenAI, Groq, Ollama in OpenAI mode, LM Studio, vLLM, …).  Connection
//! details come from [`LlmConfig`]; the credential and system instruction
//! arrive with each [`ChatRequest`].

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::config::LlmConfig;
use crate::credential::Credential;
use crate::llm::prompt::PromptBuilder;

// ---------------------------------------------------------------------------
// RemoteError
// ---------------------------------------------------------------------------

/// Reasons a remote correction did not produce text.
///
/// These only feed diagnostics; callers of the orchestrator never see them.
/// No variant ever carries the credential.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("remote request timed out")]
    Timeout,

    /// The endpoint answered with a non-success status code.
    #[error("remote endpoint returned HTTP {0}")]
    Status(u16),

    /// The body was not a chat-completion envelope.
    #[error("failed to parse remote response: {0}")]
    Parse(String),

    /// The `choices` array was empty.
    #[error("remote response contained no choices")]
    NoChoices,

    /// The first choice had no `message.content`.
    #[error("first choice has no message content")]
    MissingContent,
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RemoteError::Timeout
        } else if let Some(status) = e.status() {
            RemoteError::Status(status.as_u16())
        } else {
            RemoteError::Request(e.without_url().to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// ChatRequest
// ---------------------------------------------------------------------------

/// Everything a single remote correction needs besides connection settings.
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    /// Bearer token for the `Authorization` header.
    pub credential: &'a Credential,
    /// System-role instruction.
    pub instruction: &'a str,
    /// Raw user text, untrimmed.
    pub text: &'a str,
}

// ---------------------------------------------------------------------------
// RemoteCorrector trait
// ---------------------------------------------------------------------------

/// Async trait for LLM-backed text correction.
///
/// Implementors must be `Send + Sync` so they can be shared across tasks
/// (e.g. wrapped in `Arc<dyn RemoteCorrector>`).
#[async_trait]
pub trait RemoteCorrector: Send + Sync {
    /// Return the trimmed corrected text, or why none is available.
    async fn correct(&self, request: ChatRequest<'_>) -> Result<String, RemoteError>;
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Extract `choices[0].message.content`, trimmed, from a response body.
///
/// Content that trims to nothing is still an answer and comes back as `""`.
pub fn parse_completion(body: &str) -> Result<String, RemoteError> {
    let completion: ChatCompletion =
        serde_json::from_str(body).map_err(|e| RemoteError::Parse(e.to_string()))?;

    let first = completion
        .choices
        .into_iter()
        .next()
        .ok_or(RemoteError::NoChoices)?;

    let content = first
        .message
        .and_then(|m| m.content)
        .ok_or(RemoteError::MissingContent)?;

    Ok(content.trim().to_string())
}

// ---------------------------------------------------------------------------
// ApiCorrector
// ---------------------------------------------------------------------------

/// Calls an OpenAI-compatible `/v1/chat/completions` endpoint.
pub struct ApiCorrector {
    client: reqwest::Client,
    config: LlmConfig,
}

impl ApiCorrector {
    /// Build an `ApiCorrector` from application config.
    ///
    /// The HTTP client carries the connect and overall timeouts from
    /// `config`.  A default client is used if the builder fails.
    pub fn from_config(config: &LlmConfig) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                log::warn!("HTTP client builder failed ({e}); using defaults");
                reqwest::Client::new()
            });

        Self::with_client(config, client)
    }

    /// Use a caller-built HTTP client; timeouts are then the client's own.
    pub fn with_client(config: &LlmConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            config: config.clone(),
        }
    }

    /// Full endpoint URL.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn request_body(&self, request: &ChatRequest<'_>) -> serde_json::Value {
        let (system_msg, user_msg) = PromptBuilder::new(request.instruction).build_chat(request.text);

        serde_json::json!({
            "model":       self.config.model,
            "max_tokens":  self.config.max_tokens,
            "temperature": self.config.temperature,
            "messages": [
                { "role": "system", "content": system_msg },
                { "role": "user",   "content": user_msg   }
            ]
        })
    }
}

#[async_trait]
impl RemoteCorrector for ApiCorrector {
    async fn correct(&self, request: ChatRequest<'_>) -> Result<String, RemoteError> {
        let body = self.request_body(&request);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(request.credential.expose())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        parse_completion(&text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::InstructionPreset;

    #[test]
    fn parses_first_choice_and_trims() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  Fixed text \n"}},
                                   {"message":{"content":"second"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "Fixed text");
    }

    #[test]
    fn empty_choices_is_no_choices() {
        let err = parse_completion(r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, RemoteError::NoChoices));
    }

    #[test]
    fn missing_message_or_content_is_reported() {
        let err = parse_completion(r#"{"choices":[{}]}"#).unwrap_err();
        assert!(matches!(err, RemoteError::MissingContent));

        let err = parse_completion(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap_err();
        assert!(matches!(err, RemoteError::MissingContent));
    }

    #[test]
    fn blank_content_is_an_empty_answer() {
        let body = r#"{"choices":[{"message":{"content":"  \n "}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "");
    }

    #[test]
    fn non_envelope_bodies_are_parse_errors() {
        for body in ["", "not json", r#"{"error":{"message":"bad key"}}"#, "[1,2]"] {
            let err = parse_completion(body).unwrap_err();
            assert!(matches!(err, RemoteError::Parse(_)), "body {body:?} gave {err:?}");
        }
    }

    #[test]
    fn request_body_carries_settings_and_two_messages() {
        let config = LlmConfig::default();
        let corrector = ApiCorrector::from_config(&config);
        let credential = Credential::from_raw(Some("sk-test")).unwrap();
        let request = ChatRequest {
            credential: &credential,
            instruction: InstructionPreset::Polish.instruction(),
            text: " raw text ",
        };

        let body = corrector.request_body(&request);

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 2000);
        assert!(body["temperature"].as_f64().unwrap() < 0.5);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(
            body["messages"][0]["content"],
            InstructionPreset::Polish.instruction()
        );
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], " raw text ");
        assert!(!body.to_string().contains("sk-test"));
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let mut config = LlmConfig::default();
        config.base_url = "http://localhost:11434/".into();
        let corrector = ApiCorrector::from_config(&config);
        assert_eq!(corrector.endpoint(), "http://localhost:11434/v1/chat/completions");
    }

    #[test]
    fn corrector_is_object_safe() {
        let corrector: Box<dyn RemoteCorrector> =
            Box::new(ApiCorrector::from_config(&LlmConfig::default()));
        drop(corrector);
    }
}
