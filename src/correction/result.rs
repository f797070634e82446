//! Per-call request and result values.

use crate::credential::Credential;

/// Reason attached to the only caller-visible failure.
pub const EMPTY_INPUT_REASON: &str = "empty input";

// ---------------------------------------------------------------------------
// CorrectionRequest
// ---------------------------------------------------------------------------

/// Snapshot of one `correct()` call: the caller's text and the credential
/// read at call time.  Built per call and dropped afterwards.
#[derive(Debug, Clone)]
pub struct CorrectionRequest {
    input_text: String,
    credential: Option<Credential>,
}

impl CorrectionRequest {
    pub fn new(input_text: impl Into<String>, credential: Option<Credential>) -> Self {
        Self {
            input_text: input_text.into(),
            credential,
        }
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// `true` when the input is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.input_text.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// CorrectionResult
// ---------------------------------------------------------------------------

/// Outcome of a correction.
///
/// `Failure` is produced only for empty or blank input; every other problem
/// ends in a `Success` carrying locally normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectionResult {
    Success { text: String },
    Failure { reason: String },
}

impl CorrectionResult {
    pub fn success(text: impl Into<String>) -> Self {
        CorrectionResult::Success { text: text.into() }
    }

    pub fn empty_input() -> Self {
        CorrectionResult::Failure {
            reason: EMPTY_INPUT_REASON.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CorrectionResult::Success { .. })
    }

    /// The corrected text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            CorrectionResult::Success { text } => Some(text),
            CorrectionResult::Failure { .. } => None,
        }
    }

    /// Corrected text on success, `original` otherwise.
    ///
    /// ```
    /// use text_polisher::correction::CorrectionResult;
    ///
    /// assert_eq!(CorrectionResult::success("Done.").into_text_or("done"), "Done.");
    /// assert_eq!(CorrectionResult::empty_input().into_text_or("  "), "  ");
    /// ```
    pub fn into_text_or(self, original: impl Into<String>) -> String {
        match self {
            CorrectionResult::Success { text } => text,
            CorrectionResult::Failure { .. } => original.into(),
        }
    }
}
