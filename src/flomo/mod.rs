//! Flomo note-export webhook client.
//!
//! Flomo incoming webhooks are addressed as a fixed base URL plus a
//! user-specific key segment. The exported note is a small Markdown template
//! combining the original text, the translation, and the formatted
//! vocabulary block. Fire-and-forget: any 2xx reply counts as success, and
//! nothing is retried.

use thiserror::Error;

use crate::config::AppConfig;

/// Incoming-webhook base; the user's key segment is appended.
pub const FLOMO_BASE_URL: &str = "https://flomoapp.com/iwh/OTQ5NQ/";

// ---------------------------------------------------------------------------
// FlomoError
// ---------------------------------------------------------------------------

/// Errors that can occur while exporting a note.
#[derive(Debug, Error)]
pub enum FlomoError {
    /// `flomo_key` is not configured — checked before any network I/O.
    #[error("请先在设置中配置 Flomo Key")]
    MissingKey,

    /// The key contains characters that cannot appear in a webhook URL
    /// segment — checked before any network I/O.
    #[error("Flomo Key 只能包含字母和数字")]
    InvalidKey,

    /// Network failure or a non-2xx HTTP status.
    #[error("保存到 Flomo 失败: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FlomoError {
    fn from(e: reqwest::Error) -> Self {
        FlomoError::Transport(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Key validation
// ---------------------------------------------------------------------------

/// `true` when `key` is acceptable to store: empty (feature unused) or
/// entirely alphanumeric. The settings panel uses this before saving.
pub fn is_well_formed_key(key: &str) -> bool {
    key.chars().all(char::is_alphanumeric)
}

/// Validate a key for actual use: non-empty and entirely alphanumeric.
pub fn validate_key(key: &str) -> Result<(), FlomoError> {
    if key.is_empty() {
        return Err(FlomoError::MissingKey);
    }
    if !is_well_formed_key(key) {
        return Err(FlomoError::InvalidKey);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Note composition
// ---------------------------------------------------------------------------

/// Compose the note body from its three parts, under the fixed template:
/// bolded original, italicized translation, a "重点词组" heading, then the
/// vocabulary block.
pub fn compose_note(input_text: &str, translation_text: &str, vocabulary_block: &str) -> String {
    format!(
        "**[{input_text}]**\n\n*[{translation_text}]*\n\n* 重点词组\n\n{vocabulary_block}\n"
    )
}

// ---------------------------------------------------------------------------
// FlomoClient
// ---------------------------------------------------------------------------

/// Posts notes to the configured Flomo webhook.
pub struct FlomoClient {
    client: reqwest::Client,
    key: String,
}

impl FlomoClient {
    /// Build a client from application config.
    ///
    /// Honors `skip_ssl_check` the same way the translation client does.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut builder = reqwest::Client::builder();
        if config.skip_ssl_check {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder.build().unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            key: config.flomo_key.clone(),
        }
    }

    /// The full webhook URL for this client's key.
    pub fn webhook_url(&self) -> String {
        format!("{FLOMO_BASE_URL}{}/", self.key)
    }

    /// Export one note. The key is validated before any network I/O.
    pub async fn save_note(
        &self,
        input_text: &str,
        translation_text: &str,
        vocabulary_block: &str,
    ) -> Result<(), FlomoError> {
        validate_key(&self.key)?;

        let content = compose_note(input_text, translation_text, vocabulary_block);

        let response = self
            .client
            .post(self.webhook_url())
            .form(&[("content", content.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FlomoError::Transport(format!(
                "webhook replied with status {status}"
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
