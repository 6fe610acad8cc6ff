//! Encrypted settings persistence.
//!
//! [`ConfigStore`] persists a flat JSON mapping to a single `config.enc` file
//! under authenticated encryption:
//!
//! * Key derivation — PBKDF2-HMAC-SHA256, 100 000 iterations, 32-byte output,
//!   from a passphrase and salt compiled into the program.
//! * Cipher — XChaCha20-Poly1305; the 24-byte random nonce is prepended to
//!   the ciphertext, and the Poly1305 tag makes any tampering or corruption
//!   fail decryption outright.
//!
//! # Known limitation
//!
//! The passphrase and salt are fixed constants, so anyone in possession of
//! the binary can derive the same key. The encryption obscures the settings
//! file from casual inspection; it is **not** a security boundary. This
//! matches the program's long-standing on-disk behaviour and is kept for
//! compatibility — changing it would require a migration path for existing
//! files.
//!
//! # Error behaviour
//!
//! [`ConfigStore::load`] never fails: a missing, unreadable, undecryptable,
//! or unparseable file all degrade to an empty mapping (first run and
//! corruption are both recoverable states). [`ConfigStore::save`] propagates
//! its errors — a failed save must be visible to the user.

use std::path::PathBuf;

use chacha20poly1305::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Key, XChaCha20Poly1305, XNonce,
};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use thiserror::Error;

use super::AppPaths;

/// Flat settings mapping, exactly as serialized inside the encrypted file.
pub type ConfigMap = serde_json::Map<String, serde_json::Value>;

const PASSPHRASE: &[u8] = b"ai_translator_2024";
const SALT: &[u8] = b"ai_translator_salt_2024";
const KDF_ITERATIONS: u32 = 100_000;

/// XChaCha20 nonce length; the first bytes of every stored file.
const NONCE_LEN: usize = 24;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors surfaced by [`ConfigStore::save`] and [`ConfigStore::load_checked`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read or written.
    #[error("config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The file exists but could not be decrypted or parsed — tampered,
    /// truncated, or written by an incompatible build.
    #[error("config file is corrupt or undecryptable")]
    Corrupt,

    /// Encrypting the serialized settings failed.
    #[error("config encryption failed")]
    Crypto,

    /// The settings mapping could not be serialized to JSON.
    #[error("config serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// ConfigStore
// ---------------------------------------------------------------------------

/// Handle to the encrypted settings file.
///
/// Cheap to clone; the store is stateless apart from the file path, so every
/// consumer sees the latest saved settings on its next [`load`](Self::load).
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store backed by the platform-appropriate `config.enc`.
    pub fn new() -> Self {
        Self {
            path: AppPaths::new().config_file,
        }
    }

    /// Store backed by an explicit path (useful for tests).
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Derive the 32-byte symmetric key from the compiled-in passphrase and
    /// salt. Deterministic — independent of any user input (see the module
    /// docs for why this is a known weakness).
    pub fn derive_key() -> [u8; 32] {
        let mut key = [0u8; 32];
        pbkdf2_hmac::<Sha256>(PASSPHRASE, SALT, KDF_ITERATIONS, &mut key);
        key
    }

    // -----------------------------------------------------------------------
    // Load
    // -----------------------------------------------------------------------

    /// Load the settings mapping, degrading to an empty mapping on any
    /// failure.
    ///
    /// A missing file is the normal first-run state; a corrupt file is logged
    /// and otherwise treated the same way so the application stays usable.
    pub fn load(&self) -> ConfigMap {
        match self.load_checked() {
            Ok(map) => map,
            Err(e) => {
                log::warn!(
                    "failed to load settings from {}: {e}; starting with empty settings",
                    self.path.display()
                );
                ConfigMap::new()
            }
        }
    }

    /// Load variant that distinguishes "no file yet" (`Ok` with an empty
    /// mapping) from an actual failure. The default flow uses
    /// [`load`](Self::load); this exists for tests and diagnostics.
    pub fn load_checked(&self) -> Result<ConfigMap, ConfigError> {
        if !self.path.exists() {
            return Ok(ConfigMap::new());
        }

        let data = std::fs::read(&self.path)?;
        let plaintext = Self::decrypt(&data)?;
        serde_json::from_slice(&plaintext).map_err(|_| ConfigError::Corrupt)
    }

    // -----------------------------------------------------------------------
    // Save
    // -----------------------------------------------------------------------

    /// Serialize `config` to JSON, encrypt, and overwrite the settings file,
    /// creating parent directories as needed.
    ///
    /// Unlike [`load`](Self::load), failures propagate to the caller.
    pub fn save(&self, config: &ConfigMap) -> Result<(), ConfigError> {
        let plaintext = serde_json::to_vec(config)?;
        let data = Self::encrypt(&plaintext)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, data)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Cipher
    // -----------------------------------------------------------------------

    /// Encrypt `plaintext`. Returns `[nonce || ciphertext+tag]`.
    fn encrypt(plaintext: &[u8]) -> Result<Vec<u8>, ConfigError> {
        let key = Self::derive_key();
        let cipher = XChaCha20Poly1305::new(Key::from_slice(&key));

        let nonce = XChaCha20Poly1305::generate_nonce(&mut OsRng);
        let ciphertext = cipher
            .encrypt(&nonce, plaintext)
            .map_err(|_| ConfigError::Crypto)?;

        let mut out = nonce.to_vec();
        out.extend(ciphertext);
        Ok(out)
    }

    /// Decrypt `data`. Expects `[nonce || ciphertext+tag]`; anything shorter
    /// than a nonce, or failing authentication, is reported as corrupt.
    fn decrypt(data: &[u8]) -> Result<Vec<u8>, ConfigError> {
        if data.len() < NONCE_LEN {
            return Err(ConfigError::Corrupt);
        }

        let key = Self::derive_key();
        let cipher = XChaCha20Poly1305::new(Key::from_slice(&key));

        let nonce = XNonce::from_slice(&data[..NONCE_LEN]);
        cipher
            .decrypt(nonce, &data[NONCE_LEN..])
            .map_err(|_| ConfigError::Corrupt)
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::tempdir;

    fn store_in_temp() -> (ConfigStore, tempfile::TempDir) {
        let dir = tempdir().expect("temp dir");
        let store = ConfigStore::at(dir.path().join("config.enc"));
        (store, dir)
    }

    fn sample_map() -> ConfigMap {
        let mut map = ConfigMap::new();
        map.insert("api_key".into(), json!("sk-test-1234"));
        map.insert("api_endpoint".into(), json!("https://example.org/v1"));
        map.insert("skip_ssl_check".into(), json!(true));
        map
    }

    #[test]
    fn derive_key_is_deterministic() {
        assert_eq!(ConfigStore::derive_key(), ConfigStore::derive_key());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (store, _dir) = store_in_temp();
        let original = sample_map();

        store.save(&original).expect("save");
        let loaded = store.load();

        assert_eq!(original, loaded);
    }

    /// Unknown keys and nested values must round-trip untouched — the store
    /// has no opinion about the mapping's contents.
    #[test]
    fn arbitrary_values_round_trip() {
        let (store, _dir) = store_in_temp();

        let mut map = ConfigMap::new();
        map.insert("future_setting".into(), json!({"nested": [1, 2, 3]}));
        map.insert("empty".into(), json!(""));
        map.insert("flag".into(), Value::Bool(false));

        store.save(&map).expect("save");
        assert_eq!(store.load(), map);
    }

    #[test]
    fn load_missing_file_returns_empty() {
        let (store, _dir) = store_in_temp();
        assert!(store.load().is_empty());
    }

    #[test]
    fn load_checked_missing_file_is_ok() {
        let (store, _dir) = store_in_temp();
        let map = store.load_checked().expect("missing file is not an error");
        assert!(map.is_empty());
    }

    #[test]
    fn load_garbage_file_returns_empty() {
        let (store, _dir) = store_in_temp();
        std::fs::write(store.path.clone(), b"this is not ciphertext").expect("write");
        assert!(store.load().is_empty());
    }

    #[test]
    fn load_checked_garbage_file_is_corrupt() {
        let (store, _dir) = store_in_temp();
        std::fs::write(store.path.clone(), b"x").expect("write");
        assert!(matches!(store.load_checked(), Err(ConfigError::Corrupt)));
    }

    /// Flipping a single ciphertext byte must fail authentication, and the
    /// default load path must degrade to empty rather than return garbage.
    #[test]
    fn tampered_file_fails_authentication() {
        let (store, _dir) = store_in_temp();
        store.save(&sample_map()).expect("save");

        let mut data = std::fs::read(&store.path).expect("read");
        let last = data.len() - 1;
        data[last] ^= 0xff;
        std::fs::write(&store.path, data).expect("rewrite");

        assert!(matches!(store.load_checked(), Err(ConfigError::Corrupt)));
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let (store, _dir) = store_in_temp();
        store.save(&sample_map()).expect("first save");

        let mut updated = ConfigMap::new();
        updated.insert("model".into(), json!("gpt-4o-mini"));
        store.save(&updated).expect("second save");

        assert_eq!(store.load(), updated);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().expect("temp dir");
        let store = ConfigStore::at(dir.path().join("deep").join("config.enc"));
        store.save(&sample_map()).expect("save into missing dir");
        assert_eq!(store.load(), sample_map());
    }

    /// The file on disk must not contain the plaintext settings.
    #[test]
    fn stored_bytes_are_not_plaintext() {
        let (store, _dir) = store_in_temp();
        store.save(&sample_map()).expect("save");

        let data = std::fs::read(&store.path).expect("read");
        let haystack = String::from_utf8_lossy(&data);
        assert!(!haystack.contains("sk-test-1234"));
    }
}
