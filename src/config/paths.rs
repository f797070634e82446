//! Cross-platform application paths using the `dirs` crate.
//!
//! Config dir (settings + API key):
//!   Windows: %APPDATA%\text-polisher\
//!   macOS:   ~/Library/Application Support/text-polisher/
//!   Linux:   ~/.config/text-polisher/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml` and `api-key`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Full path to the stored API key.
    pub credential_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "text-polisher";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        Self::in_dir(config_dir)
    }

    /// Lay out the files under an explicit directory.
    pub fn in_dir(config_dir: PathBuf) -> Self {
        let settings_file = config_dir.join("settings.toml");
        let credential_file = config_dir.join("api-key");

        Self {
            config_dir,
            settings_file,
            credential_file,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
