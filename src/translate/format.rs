//! Vocabulary presentation helper.
//!
//! Turns the structured vocabulary listing into the Markdown block shown in
//! the analysis pane and embedded in exported notes. Pure — order preserved,
//! no side effects.

use crate::translate::types::VocabularyEntry;

/// Format a vocabulary listing as a Markdown text block.
///
/// Per entry: a `**word**/phonetic/` headline (the slashes are omitted with
/// the phonetic when it is empty), one numbered line per meaning with an
/// italicized example suffix when present, then a blank separator line.
///
/// ```
/// use ai_translator::translate::{format_vocabulary, Meaning, VocabularyEntry};
///
/// let entries = vec![VocabularyEntry {
///     word: "run".into(),
///     phonetic: "rʌn".into(),
///     meanings: vec![Meaning {
///         definition: "to move fast".into(),
///         example: "He runs daily.".into(),
///     }],
/// }];
/// let block = format_vocabulary(&entries);
/// assert!(block.starts_with("**run**/rʌn/"));
/// ```
pub fn format_vocabulary(vocabulary: &[VocabularyEntry]) -> String {
    let mut out = String::new();

    for entry in vocabulary {
        if entry.phonetic.is_empty() {
            out.push_str(&format!("**{}**\n", entry.word));
        } else {
            out.push_str(&format!("**{}**/{}/\n", entry.word, entry.phonetic));
        }

        for (i, meaning) in entry.meanings.iter().enumerate() {
            out.push_str(&format!("{}. {}", i + 1, meaning.definition));
            if meaning.example.is_empty() {
                out.push('\n');
            } else {
                out.push_str(&format!(" 例如：*_{}_*\n", meaning.example));
            }
        }

        out.push('\n');
    }

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::types::Meaning;

    fn entry(word: &str, phonetic: &str, meanings: &[(&str, &str)]) -> VocabularyEntry {
        VocabularyEntry {
            word: word.into(),
            phonetic: phonetic.into(),
            meanings: meanings
                .iter()
                .map(|(definition, example)| Meaning {
                    definition: (*definition).into(),
                    example: (*example).into(),
                })
                .collect(),
        }
    }

    #[test]
    fn empty_listing_formats_to_empty_string() {
        assert_eq!(format_vocabulary(&[]), "");
    }

    #[test]
    fn entry_with_phonetic_and_example() {
        let block = format_vocabulary(&[entry(
            "run",
            "rʌn",
            &[("to move fast", "He runs daily.")],
        )]);

        assert!(block.starts_with("**run**/rʌn/\n"));
        assert!(block.contains("1. to move fast 例如：*_He runs daily._*\n"));
        assert!(block.ends_with("\n\n"));
    }

    #[test]
    fn empty_phonetic_omits_the_slashes() {
        let block = format_vocabulary(&[entry("思い出", "", &[("memory", "")])]);
        assert!(block.starts_with("**思い出**\n"));
        assert!(!block.contains("//"));
    }

    #[test]
    fn empty_example_omits_the_suffix() {
        let block = format_vocabulary(&[entry("walk", "wɔːk", &[("to go on foot", "")])]);
        assert!(block.contains("1. to go on foot\n"));
        assert!(!block.contains("例如"));
    }

    #[test]
    fn meanings_are_numbered_from_one() {
        let block = format_vocabulary(&[entry(
            "bank",
            "bæŋk",
            &[("a financial institution", ""), ("the side of a river", "")],
        )]);
        assert!(block.contains("1. a financial institution\n"));
        assert!(block.contains("2. the side of a river\n"));
    }

    #[test]
    fn entries_are_separated_by_blank_lines_in_input_order() {
        let block = format_vocabulary(&[
            entry("first", "", &[("a", "")]),
            entry("second", "", &[("b", "")]),
        ]);

        let first = block.find("**first**").unwrap();
        let second = block.find("**second**").unwrap();
        assert!(first < second);
        assert!(block.contains("1. a\n\n**second**"));
    }
}
