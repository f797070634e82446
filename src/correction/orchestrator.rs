//! Correction orchestrator — remote correction with local fallback.
//!
//! ```text
//! correct(text)
//!   ├─ blank input            → Failure("empty input")
//!   ├─ no usable credential   → Success(normalize(text))
//!   └─ remote.correct(...)
//!         ├─ Ok(content)      → Success(content.trim())
//!         └─ Err(any)         → warn + Success(normalize(text))
//! ```
//!
//! Remote errors are never surfaced: they are logged and replaced by the
//! local normalizer's output.

use std::sync::Arc;

use tokio::task::JoinHandle;

use super::normalizer::normalize;
use super::result::{CorrectionRequest, CorrectionResult};
use crate::config::LlmConfig;
use crate::credential::CredentialStore;
use crate::llm::{ApiCorrector, ChatRequest, RemoteCorrector};

// ---------------------------------------------------------------------------
// CorrectionOrchestrator
// ---------------------------------------------------------------------------

/// Public entry point for text correction.
///
/// Cheap to clone; clones share the remote client, the credential store and
/// the instruction.  Holds no per-call state, so concurrent calls are
/// independent.
#[derive(Clone)]
pub struct CorrectionOrchestrator {
    remote: Arc<dyn RemoteCorrector>,
    credentials: Arc<dyn CredentialStore>,
    instruction: Arc<str>,
}

impl CorrectionOrchestrator {
    /// Wire an orchestrator from its collaborators.
    ///
    /// `instruction` is the system message sent with every remote call.
    pub fn new(
        remote: Arc<dyn RemoteCorrector>,
        credentials: Arc<dyn CredentialStore>,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            remote,
            credentials,
            instruction: Arc::from(instruction.into()),
        }
    }

    /// Orchestrator backed by an [`ApiCorrector`] built from `config`.
    pub fn from_config(config: &LlmConfig, credentials: Arc<dyn CredentialStore>) -> Self {
        Self::new(
            Arc::new(ApiCorrector::from_config(config)),
            credentials,
            config.instruction(),
        )
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Correct `text`.
    ///
    /// Returns `Failure` only for empty or blank input.  With a usable
    /// credential the remote corrector is tried first and its trimmed answer
    /// returned as-is; without one, or when the remote call fails in any way,
    /// the result is [`normalize`]d input.
    pub async fn correct(&self, text: &str) -> CorrectionResult {
        let request = CorrectionRequest::new(text, self.credentials.credential());

        if request.is_blank() {
            return CorrectionResult::empty_input();
        }

        let Some(credential) = request.credential() else {
            log::debug!("no API key configured; using local normalizer");
            return CorrectionResult::success(normalize(request.input_text()));
        };

        let chat = ChatRequest {
            credential,
            instruction: &self.instruction,
            text: request.input_text(),
        };

        match self.remote.correct(chat).await {
            Ok(content) => {
                log::debug!("remote correction succeeded (len={})", content.len());
                CorrectionResult::success(content.trim())
            }
            Err(err) => {
                log::warn!(
                    "remote correction unavailable ({err}); using local normalizer (len={})",
                    text.len()
                );
                CorrectionResult::success(normalize(request.input_text()))
            }
        }
    }

    /// Same input check as [`correct`](Self::correct) but always local.
    pub fn correct_local(&self, text: &str) -> CorrectionResult {
        local_result(text)
    }

    /// Run [`correct`](Self::correct) as a task on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn(&self, text: impl Into<String>) -> JoinHandle<CorrectionResult> {
        let this = self.clone();
        let text = text.into();
        tokio::spawn(async move { this.correct(&text).await })
    }

    /// Run a correction in the background and hand the result to `on_done`.
    ///
    /// `on_done` runs exactly once: with the correction result, or, should
    /// the correction task die, with the local result for the same input.
    /// Dropping the returned handle does not cancel delivery.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn correct_with_callback<F>(&self, text: impl Into<String>, on_done: F) -> JoinHandle<()>
    where
        F: FnOnce(CorrectionResult) + Send + 'static,
    {
        let text = text.into();
        let task = self.spawn(text.clone());

        tokio::spawn(async move {
            let result = match task.await {
                Ok(result) => result,
                Err(e) => {
                    log::error!("correction task failed ({e}); using local normalizer");
                    local_result(&text)
                }
            };
            on_done(result);
        })
    }
}

impl std::fmt::Debug for CorrectionOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorrectionOrchestrator")
            .field("has_credential", &self.credentials.is_present())
            .finish_non_exhaustive()
    }
}

fn local_result(text: &str) -> CorrectionResult {
    if text.trim().is_empty() {
        CorrectionResult::empty_input()
    } else {
        CorrectionResult::success(normalize(text))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
