//! Translation module for AI Translator.
//!
//! This module provides:
//! * [`Translator`] — async trait implemented by translation backends.
//! * [`ApiTranslator`] — OpenAI-compatible chat-completion client.
//! * [`build_prompt`] — constructs the JSON-contract user message.
//! * [`TranslationResult`] / [`VocabularyEntry`] / [`Meaning`] — the lenient
//!   reply model, plus [`parse_reply`] / [`strip_code_fence`].
//! * [`format_vocabulary`] — Markdown presentation of the vocabulary listing.
//! * [`TranslateError`] — error variants for the translation path.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use ai_translator::config::AppConfig;
//! use ai_translator::translate::{format_vocabulary, ApiTranslator, Translator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut config = AppConfig::default();
//!     config.api_key = "sk-...".into();
//!
//!     let translator = ApiTranslator::from_config(&config);
//!     let result = translator.translate("你好", "英语").await.unwrap();
//!
//!     println!("{}", result.translation);
//!     println!("{}", format_vocabulary(&result.vocabulary));
//! }
//! ```

pub mod client;
pub mod format;
pub mod prompt;
pub mod types;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{authorization_value, ApiTranslator, TranslateError, Translator};
pub use format::format_vocabulary;
pub use prompt::build_prompt;
pub use types::{parse_reply, strip_code_fence, Meaning, TranslationResult, VocabularyEntry};
