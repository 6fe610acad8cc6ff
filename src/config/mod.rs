//! Configuration module for AI Translator.
//!
//! Provides `ConfigStore` (encrypted on-disk persistence of the raw settings
//! mapping), `AppConfig` (typed view with defaults), and `AppPaths` for
//! cross-platform config-directory resolution.

pub mod paths;
pub mod settings;
pub mod store;

pub use paths::AppPaths;
pub use settings::{AppConfig, DEFAULT_API_ENDPOINT, DEFAULT_HOTKEY, DEFAULT_MODEL};
pub use store::{ConfigError, ConfigMap, ConfigStore};
