//! Remote (LLM) correction for Text Polisher.
//!
//! This module provides:
//! * [`RemoteCorrector`]: async trait implemented by remote backends.
//! * [`ApiCorrector`]: OpenAI-compatible chat-completion client.
//! * [`ChatRequest`]: credential, instruction and text for one call.
//! * [`InstructionPreset`] / [`PromptBuilder`]: system instructions.
//! * [`RemoteError`]: why a remote call produced no text.
//!
//! The fallback to local normalization lives in
//! [`correction`](crate::correction), not here.

pub mod corrector;
pub mod prompt;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use corrector::{parse_completion, ApiCorrector, ChatRequest, RemoteCorrector, RemoteError};
pub use prompt::{InstructionPreset, PromptBuilder};
