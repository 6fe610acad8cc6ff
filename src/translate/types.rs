//! Translation result model and reply parsing.
//!
//! The remote model is asked to answer with a single JSON object in the
//! [`TranslationResult`] shape. Replies are parsed leniently: every field
//! defaults when absent, because partial responses are common and still
//! useful. Only a reply that is not JSON at all is an error.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Result model
// ---------------------------------------------------------------------------

/// One sense of a vocabulary item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meaning {
    /// The definition text.
    #[serde(default)]
    pub definition: String,
    /// Example sentence — may be empty.
    #[serde(default)]
    pub example: String,
}

/// A word or phrase the model considered worth highlighting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    /// The word or phrase itself.
    #[serde(default)]
    pub word: String,
    /// Phonetic transcription — may be empty.
    #[serde(default)]
    pub phonetic: String,
    /// Ordered senses; may be empty.
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

/// The structured reply the model is instructed to produce.
///
/// Produced transiently per request; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    /// The translated text — may be empty.
    #[serde(default)]
    pub translation: String,
    /// Highlighted vocabulary, order preserved from the reply.
    #[serde(default)]
    pub vocabulary: Vec<VocabularyEntry>,
}

// ---------------------------------------------------------------------------
// Reply parsing
// ---------------------------------------------------------------------------

/// Strip surrounding whitespace and an optional Markdown code fence
/// (leading ```` ```json ````, trailing ```` ``` ````) from a model reply.
pub fn strip_code_fence(content: &str) -> &str {
    let mut s = content.trim();
    if let Some(rest) = s.strip_prefix("```json") {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

/// Parse a model reply into a [`TranslationResult`].
///
/// Tolerates a surrounding code fence and missing keys; fails only when the
/// remaining text is not a JSON object.
pub fn parse_reply(content: &str) -> Result<TranslationResult, serde_json::Error> {
    serde_json::from_str(strip_code_fence(content))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_json() {
        let result = parse_reply(r#"{"translation":"Hi","vocabulary":[]}"#).unwrap();
        assert_eq!(result.translation, "Hi");
        assert!(result.vocabulary.is_empty());
    }

    #[test]
    fn parses_fenced_json() {
        let content = "```json\n{\"translation\":\"Hi\",\"vocabulary\":[]}\n```";
        let result = parse_reply(content).unwrap();
        assert_eq!(result.translation, "Hi");
        assert!(result.vocabulary.is_empty());
    }

    #[test]
    fn missing_vocabulary_defaults_to_empty() {
        let result = parse_reply(r#"{"translation":"Bonjour"}"#).unwrap();
        assert_eq!(result.translation, "Bonjour");
        assert!(result.vocabulary.is_empty());
    }

    #[test]
    fn missing_translation_defaults_to_empty() {
        let result = parse_reply(r#"{"vocabulary":[]}"#).unwrap();
        assert_eq!(result.translation, "");
    }

    #[test]
    fn non_json_reply_is_an_error() {
        assert!(parse_reply("Sorry, I can't do that.").is_err());
    }

    #[test]
    fn entry_fields_default_when_absent() {
        let content = r#"{"translation":"x","vocabulary":[{"word":"run"}]}"#;
        let result = parse_reply(content).unwrap();
        assert_eq!(result.vocabulary.len(), 1);
        assert_eq!(result.vocabulary[0].word, "run");
        assert_eq!(result.vocabulary[0].phonetic, "");
        assert!(result.vocabulary[0].meanings.is_empty());
    }

    #[test]
    fn full_entry_parses() {
        let content = r#"{
            "translation": "他每天跑步。",
            "vocabulary": [
                {"word": "run", "phonetic": "rʌn", "meanings": [
                    {"definition": "to move fast", "example": "He runs daily."}
                ]}
            ]
        }"#;
        let result = parse_reply(content).unwrap();
        assert_eq!(result.translation, "他每天跑步。");
        let entry = &result.vocabulary[0];
        assert_eq!(entry.phonetic, "rʌn");
        assert_eq!(entry.meanings[0].definition, "to move fast");
        assert_eq!(entry.meanings[0].example, "He runs daily.");
    }

    // ---- strip_code_fence ---

    #[test]
    fn strip_fence_handles_unfenced_content() {
        assert_eq!(strip_code_fence("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn strip_fence_removes_json_fence() {
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
    }

    #[test]
    fn strip_fence_tolerates_missing_closing_fence() {
        assert_eq!(strip_code_fence("```json\n{}"), "{}");
    }
}
