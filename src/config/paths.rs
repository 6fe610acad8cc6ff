//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout:
//!
//! Config dir (encrypted settings file):
//!   Windows: %APPDATA%\ai-translator\
//!   macOS:   ~/Library/Application Support/ai-translator/
//!   Linux:   ~/.config/ai-translator/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for the encrypted settings file.
    pub config_dir: PathBuf,
    /// Full path to `config.enc`.
    pub config_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "ai-translator";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path (should be extremely rare in practice).
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let config_file = config_dir.join("config.enc");

        Self {
            config_dir,
            config_file,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
