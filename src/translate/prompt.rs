//! Prompt construction for the translation request.
//!
//! The whole contract with the remote model lives in this one user message:
//! translate the source text into the target language and answer with a
//! single JSON object in the [`TranslationResult`] shape — no prose, no
//! explanations. The JSON skeleton is spelled out verbatim in the prompt
//! because models follow a concrete example far more reliably than a schema
//! description.
//!
//! [`TranslationResult`]: crate::translate::TranslationResult

/// The reply shape, embedded verbatim in every prompt.
const RESPONSE_SHAPE: &str = r#"{
  "translation": "翻译后的文本",
  "vocabulary": [
    {"word": "单词或词组", "phonetic": "音标", "meanings": [
      {"definition": "含义1", "example": "例句1"},
      {"definition": "含义2", "example": "例句2"}
    ]}
  ]
}"#;

/// Build the single user message for translating `input_text` into
/// `target_language`.
pub fn build_prompt(input_text: &str, target_language: &str) -> String {
    format!(
        "请将以下文本从源语言翻译成{target_language}。\
         请严格按照以下JSON格式返回结果，不要添加任何额外的文本或解释：\n\n\
         {RESPONSE_SHAPE}\n\n\
         原文: {input_text}"
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_contains_source_text() {
        let prompt = build_prompt("你好，世界", "英语");
        assert!(prompt.contains("你好，世界"));
        assert!(prompt.contains("原文:"));
    }

    #[test]
    fn prompt_contains_target_language() {
        let prompt = build_prompt("hello", "日语");
        assert!(prompt.contains("日语"));
    }

    #[test]
    fn prompt_spells_out_the_reply_shape() {
        let prompt = build_prompt("hello", "中文");
        assert!(prompt.contains("\"translation\""));
        assert!(prompt.contains("\"vocabulary\""));
        assert!(prompt.contains("\"phonetic\""));
        assert!(prompt.contains("\"definition\""));
        assert!(prompt.contains("\"example\""));
    }

    #[test]
    fn prompt_demands_json_only() {
        let prompt = build_prompt("hello", "中文");
        assert!(prompt.contains("JSON格式"));
        assert!(prompt.contains("不要添加任何额外的文本或解释"));
    }
}
