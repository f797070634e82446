//! Host-facing integration: the process-text surface and clipboard output.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use text_polisher::config::LlmConfig;
//! use text_polisher::correction::CorrectionOrchestrator;
//! use text_polisher::credential::FileCredentialStore;
//! use text_polisher::integration::{process_text, ProcessTextOutcome, ProcessTextRequest};
//!
//! # async fn run() {
//! let orch = CorrectionOrchestrator::from_config(
//!     &LlmConfig::default(),
//!     Arc::new(FileCredentialStore::new()),
//! );
//! match process_text(&orch, ProcessTextRequest::new("teh text", false)).await {
//!     ProcessTextOutcome::Replace(text) => println!("{text}"),
//!     ProcessTextOutcome::ShowReadOnly(text) => eprintln!("read-only: {text}"),
//! }
//! # }
//! ```

pub mod clipboard;
pub mod process_text;

pub use clipboard::{copy_to_clipboard, read_clipboard};
pub use process_text::{process_text, ProcessTextOutcome, ProcessTextRequest};

use thiserror::Error;

/// Errors from the clipboard helpers.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// Could not open or read the system clipboard.
    #[error("cannot access clipboard: {0}")]
    Access(String),

    /// Could not write text to the system clipboard.
    #[error("cannot set clipboard text: {0}")]
    Set(String),
}
