//! Text Polisher — grammar and spelling correction through a chat-completion
//! API, with a deterministic local normalizer when the API is unavailable.

pub mod config;
pub mod correction;
pub mod credential;
pub mod integration;
pub mod llm;
