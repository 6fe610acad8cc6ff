//! Typed application settings over the flat encrypted mapping.
//!
//! [`AppConfig`] is the typed view of the six recognized setting keys. It
//! reads leniently — an absent or wrong-typed key falls back to its default —
//! and writes exactly the recognized keys, so the mapping on disk never grows
//! stale entries from this struct. Keys the program does not recognize are
//! preserved by the store itself, which round-trips the raw mapping.

use serde_json::{json, Value};

use super::store::{ConfigError, ConfigMap, ConfigStore};

/// Endpoint used when `api_endpoint` is not configured.
pub const DEFAULT_API_ENDPOINT: &str = "https://api.example.com/v1/chat/completions";

/// Model used when `model` is not configured.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Window-visibility hotkey used when `hotkey` is not configured.
pub const DEFAULT_HOTKEY: &str = "ctrl+alt+t";

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// The recognized settings and their defaults.
///
/// | Key              | Default                         |
/// |------------------|---------------------------------|
/// | `api_key`        | empty                           |
/// | `api_endpoint`   | [`DEFAULT_API_ENDPOINT`]        |
/// | `model`          | [`DEFAULT_MODEL`]               |
/// | `flomo_key`      | empty                           |
/// | `hotkey`         | [`DEFAULT_HOTKEY`]              |
/// | `skip_ssl_check` | `false`                         |
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Chat-completion API key. May already carry the `Bearer ` prefix.
    pub api_key: String,
    /// Full URL of the chat-completion endpoint.
    pub api_endpoint: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Flomo webhook key segment — alphanumeric, may be empty.
    pub flomo_key: String,
    /// Window-visibility hotkey descriptor (e.g. `"ctrl+alt+t"`).
    pub hotkey: String,
    /// Disable TLS certificate validation for outgoing requests.
    ///
    /// Explicit opt-in insecure mode for endpoints behind interception
    /// proxies or self-signed certificates.
    pub skip_ssl_check: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_endpoint: DEFAULT_API_ENDPOINT.into(),
            model: DEFAULT_MODEL.into(),
            flomo_key: String::new(),
            hotkey: DEFAULT_HOTKEY.into(),
            skip_ssl_check: false,
        }
    }
}

impl AppConfig {
    /// Build a typed config from the raw mapping, defaulting any key that is
    /// absent or has an unexpected type.
    pub fn from_map(map: &ConfigMap) -> Self {
        let defaults = Self::default();

        let get_str = |key: &str, fallback: String| -> String {
            map.get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or(fallback)
        };

        Self {
            api_key: get_str("api_key", defaults.api_key),
            api_endpoint: get_str("api_endpoint", defaults.api_endpoint),
            model: get_str("model", defaults.model),
            flomo_key: get_str("flomo_key", defaults.flomo_key),
            hotkey: get_str("hotkey", defaults.hotkey),
            skip_ssl_check: map
                .get("skip_ssl_check")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.skip_ssl_check),
        }
    }

    /// Serialize the recognized keys into a fresh mapping.
    pub fn to_map(&self) -> ConfigMap {
        let mut map = ConfigMap::new();
        map.insert("api_key".into(), json!(self.api_key));
        map.insert("api_endpoint".into(), json!(self.api_endpoint));
        map.insert("model".into(), json!(self.model));
        map.insert("flomo_key".into(), json!(self.flomo_key));
        map.insert("hotkey".into(), json!(self.hotkey));
        map.insert("skip_ssl_check".into(), json!(self.skip_ssl_check));
        map
    }

    /// Load the typed config through `store` (defaults on first run or
    /// corruption — see [`ConfigStore::load`]).
    pub fn load(store: &ConfigStore) -> Self {
        Self::from_map(&store.load())
    }

    /// Persist the typed config through `store`.
    pub fn save(&self, store: &ConfigStore) -> Result<(), ConfigError> {
        store.save(&self.to_map())
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
    fn default_values() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api_key, "");
        assert_eq!(cfg.api_endpoint, DEFAULT_API_ENDPOINT);
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.flomo_key, "");
        assert_eq!(cfg.hotkey, DEFAULT_HOTKEY);
        assert!(!cfg.skip_ssl_check);
    }

    #[test]
    fn from_empty_map_is_default() {
        assert_eq!(AppConfig::from_map(&ConfigMap::new()), AppConfig::default());
    }

    #[test]
    fn map_round_trip() {
        let cfg = AppConfig {
            api_key: "Bearer sk-xyz".into(),
            api_endpoint: "https://api.openai.com/v1/chat/completions".into(),
            model: "gpt-4o-mini".into(),
            flomo_key: "abc123".into(),
            hotkey: "ctrl+shift+y".into(),
            skip_ssl_check: true,
        };
        assert_eq!(AppConfig::from_map(&cfg.to_map()), cfg);
    }

    /// Wrong-typed values fall back to defaults instead of failing.
    #[test]
    fn wrong_typed_values_fall_back() {
        let mut map = ConfigMap::new();
        map.insert("api_key".into(), json!(42));
        map.insert("skip_ssl_check".into(), json!("yes"));

        let cfg = AppConfig::from_map(&map);
        assert_eq!(cfg.api_key, "");
        assert!(!cfg.skip_ssl_check);
    }

    #[test]
    fn unrecognized_keys_are_ignored_by_the_typed_view() {
        let mut map = ConfigMap::new();
        map.insert("model".into(), json!("qwen2.5:3b"));
        map.insert("not_a_setting".into(), json!([1, 2]));

        let cfg = AppConfig::from_map(&map);
        assert_eq!(cfg.model, "qwen2.5:3b");
    }

    #[test]
    fn save_then_load_through_store() {
        let dir = tempdir().expect("temp dir");
        let store = ConfigStore::at(dir.path().join("config.enc"));

        let mut cfg = AppConfig::default();
        cfg.api_key = "sk-test".into();
        cfg.model = "gpt-4o".into();
        cfg.skip_ssl_check = true;

        cfg.save(&store).expect("save");
        assert_eq!(AppConfig::load(&store), cfg);
    }

    #[test]
    fn load_from_missing_store_is_default() {
        let dir = tempdir().expect("temp dir");
        let store = ConfigStore::at(dir.path().join("nonexistent.enc"));
        assert_eq!(AppConfig::load(&store), AppConfig::default());
    }
}
