//! Core `Translator` trait and `ApiTranslator` implementation.
//!
//! `ApiTranslator` calls any OpenAI-compatible chat-completion endpoint —
//! OpenAI, Groq, LM Studio, vLLM, Ollama (OpenAI mode), etc. All connection
//! details come from [`AppConfig`]; nothing is hardcoded.
//!
//! One request, one reply: no retries, no streaming, no timeout override
//! beyond the transport default. The caller is expected to run this on a
//! background task so the interactive surface never blocks.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::AppConfig;
use crate::translate::prompt::build_prompt;
use crate::translate::types::{parse_reply, TranslationResult};

// ---------------------------------------------------------------------------
// TranslateError
// ---------------------------------------------------------------------------

/// Errors that can occur during a translation request.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// `api_key` is not configured — checked before any network I/O.
    #[error("请先在设置中配置 API Key")]
    MissingCredential,

    /// Network failure or a non-2xx HTTP status. Never retried.
    #[error("翻译请求失败: {0}")]
    Transport(String),

    /// The reply's content was not parseable JSON; carries the raw content
    /// for diagnostics.
    #[error("返回内容不是有效的JSON: {raw}")]
    ResponseFormat {
        /// The model's content exactly as received.
        raw: String,
    },
}

impl From<reqwest::Error> for TranslateError {
    fn from(e: reqwest::Error) -> Self {
        TranslateError::Transport(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Translator trait
// ---------------------------------------------------------------------------

/// Async trait for translation backends.
///
/// Implementors must be `Send + Sync` so they can be shared across threads
/// (e.g. wrapped in `Arc<dyn Translator>`).
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        input_text: &str,
        target_language: &str,
    ) -> Result<TranslationResult, TranslateError>;
}

// ---------------------------------------------------------------------------
// Authorization header
// ---------------------------------------------------------------------------

/// Build the `Authorization` header value from a stored API key.
///
/// Keys are stored either bare (`"abc"`) or already prefixed
/// (`"Bearer xyz"`); the prefix is added only when absent, so a prefixed key
/// is never double-prefixed.
pub fn authorization_value(api_key: &str) -> String {
    let key = api_key.trim();
    if key.starts_with("Bearer ") {
        key.to_string()
    } else {
        format!("Bearer {key}")
    }
}

// ---------------------------------------------------------------------------
// ApiTranslator
// ---------------------------------------------------------------------------

/// Calls an OpenAI-compatible chat-completion endpoint.
pub struct ApiTranslator {
    client: reqwest::Client,
    config: AppConfig,
}

impl ApiTranslator {
    /// Build an `ApiTranslator` from application config.
    ///
    /// When `skip_ssl_check` is set, certificate validation is disabled for
    /// this client — an explicit, opt-in, insecure mode. A default client is
    /// used as a last-resort fallback if the builder fails (should never
    /// happen in practice).
    pub fn from_config(config: &AppConfig) -> Self {
        let mut builder = reqwest::Client::builder();
        if config.skip_ssl_check {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder.build().unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }

    /// Extract the first choice's message content from a chat-completion
    /// reply envelope.
    fn extract_content(reply: &serde_json::Value) -> Option<&str> {
        reply["choices"][0]["message"]["content"].as_str()
    }
}

#[async_trait]
impl Translator for ApiTranslator {
    /// Send `input_text` to the configured endpoint for translation into
    /// `target_language`.
    async fn translate(
        &self,
        input_text: &str,
        target_language: &str,
    ) -> Result<TranslationResult, TranslateError> {
        if self.config.api_key.trim().is_empty() {
            return Err(TranslateError::MissingCredential);
        }

        let prompt = build_prompt(input_text, target_language);

        let body = serde_json::json!({
            "model":       self.config.model,
            "messages":    [{ "role": "user", "content": prompt }],
            "temperature": 0.7
        });

        let response = self
            .client
            .post(&self.config.api_endpoint)
            .header(
                reqwest::header::AUTHORIZATION,
                authorization_value(&self.config.api_key),
            )
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Transport(format!(
                "endpoint replied with status {status}"
            )));
        }

        let reply: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslateError::Transport(e.to_string()))?;

        let content =
            Self::extract_content(&reply).ok_or_else(|| TranslateError::ResponseFormat {
                raw: reply.to_string(),
            })?;

        parse_reply(content).map_err(|_| TranslateError::ResponseFormat {
            raw: content.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config(api_key: &str) -> AppConfig {
        AppConfig {
            api_key: api_key.into(),
            // An unroutable endpoint: any accidental network call fails loudly.
            api_endpoint: "http://127.0.0.1:1/v1/chat/completions".into(),
            ..AppConfig::default()
        }
    }

    // ---- authorization_value ---

    #[test]
    fn bare_key_gets_bearer_prefix() {
        assert_eq!(authorization_value("abc"), "Bearer abc");
    }

    #[test]
    fn prefixed_key_is_unchanged() {
        assert_eq!(authorization_value("Bearer xyz"), "Bearer xyz");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(authorization_value("  Bearer xyz "), "Bearer xyz");
        assert_eq!(authorization_value(" abc "), "Bearer abc");
    }

    // ---- MissingCredential precheck ---

    #[tokio::test]
    async fn empty_api_key_fails_before_any_network_call() {
        let translator = ApiTranslator::from_config(&make_config(""));
        let err = translator.translate("你好", "英语").await.unwrap_err();
        // The unroutable endpoint would surface as Transport if a request had
        // been attempted.
        assert!(matches!(err, TranslateError::MissingCredential));
    }

    #[tokio::test]
    async fn whitespace_api_key_counts_as_missing() {
        let translator = ApiTranslator::from_config(&make_config("   "));
        let err = translator.translate("你好", "英语").await.unwrap_err();
        assert!(matches!(err, TranslateError::MissingCredential));
    }

    // ---- reply envelope handling ---

    #[test]
    fn mocked_reply_envelope_parses_to_result() {
        let reply: serde_json::Value = serde_json::from_str(
            r#"{"choices":[{"message":{"content":"```json\n{\"translation\":\"Hi\",\"vocabulary\":[]}\n```"}}]}"#,
        )
        .unwrap();

        let content = ApiTranslator::extract_content(&reply).unwrap();
        let result = parse_reply(content).unwrap();
        assert_eq!(result.translation, "Hi");
        assert!(result.vocabulary.is_empty());
    }

    #[test]
    fn envelope_without_choices_yields_none() {
        let reply = serde_json::json!({"error": {"message": "overloaded"}});
        assert!(ApiTranslator::extract_content(&reply).is_none());
    }

    #[test]
    fn response_format_error_carries_raw_content() {
        let content = "I'm sorry, I can't translate that.";
        let err = parse_reply(content)
            .map_err(|_| TranslateError::ResponseFormat {
                raw: content.to_string(),
            })
            .unwrap_err();

        match err {
            TranslateError::ResponseFormat { raw } => assert_eq!(raw, content),
            other => panic!("expected ResponseFormat, got {other:?}"),
        }
    }

    // ---- construction ---

    #[test]
    fn from_config_builds_without_panic() {
        let _ = ApiTranslator::from_config(&make_config("sk-test"));
    }

    #[test]
    fn from_config_accepts_skip_ssl_check() {
        let mut config = make_config("sk-test");
        config.skip_ssl_check = true;
        let _ = ApiTranslator::from_config(&config);
    }

    /// Verify that `ApiTranslator` is object-safe (usable as `dyn Translator`).
    #[test]
    fn translator_is_object_safe() {
        let translator: Box<dyn Translator> =
            Box::new(ApiTranslator::from_config(&make_config("sk-test")));
        drop(translator);
    }
}
