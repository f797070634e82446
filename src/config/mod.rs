//! Configuration module for Text Polisher.
//!
//! Provides `AppConfig` (top-level settings), the `LlmConfig` and
//! `OutputConfig` sections, `AppPaths` for cross-platform config locations,
//! and TOML persistence via `AppConfig::load_from` / `AppConfig::save_to`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, LlmConfig, OutputConfig};
