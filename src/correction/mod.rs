//! Text correction: orchestration and the local normalizer.
//!
//! * [`CorrectionOrchestrator`]: remote correction with transparent local
//!   fallback; the public entry point.
//! * [`normalize`]: deterministic whitespace / punctuation / capitalization
//!   rules, usable on its own.
//! * [`CorrectionRequest`] / [`CorrectionResult`]: per-call values.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use text_polisher::config::AppConfig;
//! use text_polisher::correction::CorrectionOrchestrator;
//! use text_polisher::credential::FileCredentialStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let orchestrator =
//!         CorrectionOrchestrator::from_config(&config.llm, Arc::new(FileCredentialStore::new()));
//!
//!     let result = orchestrator.correct("teh quick brown fox").await;
//!     println!("{}", result.into_text_or("teh quick brown fox"));
//! }
//! ```

pub mod normalizer;
pub mod orchestrator;
pub mod result;

pub use normalizer::{normalize, normalize_opt};
pub use orchestrator::CorrectionOrchestrator;
pub use result::{CorrectionRequest, CorrectionResult, EMPTY_INPUT_REASON};
