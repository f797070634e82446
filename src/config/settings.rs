//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across tasks.
//! Every section is `#[serde(default)]`, so a partial `settings.toml` loads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::llm::InstructionPreset;

// ---------------------------------------------------------------------------
// LlmConfig
// ---------------------------------------------------------------------------

/// Settings for the remote chat-completion corrector.
///
/// The API key is deliberately *not* part of this struct; it lives in the
/// credential store so `settings.toml` can be shared safely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the API endpoint; `/v1/chat/completions` is appended.
    ///
    /// - OpenAI: `https://api.openai.com`
    /// - Ollama (OpenAI mode): `http://localhost:11434`
    pub base_url: String,
    /// Model identifier sent to the API.
    pub model: String,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Sampling temperature (0.0 – 1.0).  Lower = more deterministic.
    pub temperature: f32,
    /// Seconds allowed to establish the connection.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for the whole request, including reading the reply.
    pub timeout_secs: u64,
    /// Built-in system instruction to use.
    pub preset: InstructionPreset,
    /// Custom system instruction; overrides `preset` when set.
    pub system_instruction: Option<String>,
}

impl LlmConfig {
    /// The system instruction actually sent to the model.
    pub fn instruction(&self) -> &str {
        match self.system_instruction.as_deref() {
            Some(custom) if !custom.trim().is_empty() => custom,
            _ => self.preset.instruction(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".into(),
            model: "gpt-4o-mini".into(),
            max_tokens: 2000,
            temperature: 0.3,
            connect_timeout_secs: 10,
            timeout_secs: 30,
            preset: InstructionPreset::default(),
            system_instruction: None,
        }
    }
}

// ---------------------------------------------------------------------------
// OutputConfig
// ---------------------------------------------------------------------------

/// What the CLI does with a finished correction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Also place corrected text on the system clipboard.
    pub copy_to_clipboard: bool,
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use text_polisher::config::{AppConfig, AppPaths};
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load_from(&AppPaths::new().settings_file).unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote corrector settings.
    pub llm: LlmConfig,
    /// Output handling.
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load `settings.toml` from `path`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");

        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert!(!config.output.copy_to_clipboard);
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.llm.base_url, "https://api.openai.com");
        assert_eq!(cfg.llm.max_tokens, 2000);
        assert_eq!(cfg.llm.temperature, 0.3);
        assert_eq!(cfg.llm.connect_timeout_secs, 10);
        assert_eq!(cfg.llm.timeout_secs, 30);
        assert_eq!(cfg.llm.preset, InstructionPreset::English);
        assert!(cfg.llm.system_instruction.is_none());
    }

    #[test]
    fn modified_values_survive_save_and_load() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("conf").join("settings.toml");

        let mut cfg = AppConfig::default();
        cfg.llm.base_url = "http://localhost:11434".into();
        cfg.llm.model = "qwen2.5:3b".into();
        cfg.llm.timeout_secs = 45;
        cfg.llm.preset = InstructionPreset::Polish;
        cfg.output.copy_to_clipboard = true;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.llm.base_url, "http://localhost:11434");
        assert_eq!(loaded.llm.model, "qwen2.5:3b");
        assert_eq!(loaded.llm.timeout_secs, 45);
        assert_eq!(loaded.llm.preset, InstructionPreset::Polish);
        assert!(loaded.output.copy_to_clipboard);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[llm]\nmodel = \"gpt-4o\"\npreset = \"polish\"\n").unwrap();

        let cfg = AppConfig::load_from(&path).expect("load");

        assert_eq!(cfg.llm.model, "gpt-4o");
        assert_eq!(cfg.llm.preset, InstructionPreset::Polish);
        assert_eq!(cfg.llm.max_tokens, 2000);
        assert!(!cfg.output.copy_to_clipboard);
    }

    #[test]
    fn custom_instruction_overrides_preset() {
        let mut llm = LlmConfig::default();
        assert_eq!(llm.instruction(), InstructionPreset::English.instruction());

        llm.system_instruction = Some("Fix typos only.".into());
        assert_eq!(llm.instruction(), "Fix typos only.");

        llm.system_instruction = Some("   ".into());
        assert_eq!(llm.instruction(), InstructionPreset::English.instruction());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[llm\nmodel = ").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }
}
