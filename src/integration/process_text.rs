//! "Process selected text" handling.
//!
//! A host hands over the selected text and whether the source is read-only,
//! and expects either replacement text or nothing.  The rules:
//!
//! | Input | Outcome |
//! |-------|---------|
//! | no text / zero-length | `Replace(original)`; nothing to correct |
//! | read-only source | `ShowReadOnly(text)`; orchestrator not called |
//! | corrected | `Replace(corrected)` |
//! | orchestrator failure | `Replace(original)`; the host always gets usable text |

use crate::correction::{CorrectionOrchestrator, CorrectionResult};

/// What the host supplied.
#[derive(Debug, Clone, Default)]
pub struct ProcessTextRequest {
    /// The selected text; `None` when the host sent none.
    pub text: Option<String>,
    /// The source cannot be written back in place.
    pub read_only: bool,
}

impl ProcessTextRequest {
    pub fn new(text: impl Into<String>, read_only: bool) -> Self {
        Self {
            text: Some(text.into()),
            read_only,
        }
    }
}

/// What the host should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessTextOutcome {
    /// Write this text back in place of the selection.
    Replace(String),
    /// Show the text on a display-only surface; the interaction is cancelled.
    ShowReadOnly(String),
}

impl ProcessTextOutcome {
    /// The text carried by either variant.
    pub fn text(&self) -> &str {
        match self {
            ProcessTextOutcome::Replace(text) | ProcessTextOutcome::ShowReadOnly(text) => text,
        }
    }
}

/// Resolve a process-text request against `orchestrator`.
pub async fn process_text(
    orchestrator: &CorrectionOrchestrator,
    request: ProcessTextRequest,
) -> ProcessTextOutcome {
    let input = request.text.unwrap_or_default();
    log::debug!(
        "process-text: len={} read_only={}",
        input.len(),
        request.read_only
    );

    if input.is_empty() {
        log::warn!("process-text: empty input, returning without changes");
        return ProcessTextOutcome::Replace(input);
    }

    if request.read_only {
        log::info!("process-text: source is read-only; showing text instead of replacing");
        return ProcessTextOutcome::ShowReadOnly(input);
    }

    match orchestrator.correct(&input).await {
        CorrectionResult::Success { text } => ProcessTextOutcome::Replace(text),
        CorrectionResult::Failure { reason } => {
            log::warn!("process-text: correction failed ({reason}); returning original");
            ProcessTextOutcome::Replace(input)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
