//! Text-to-speech seam.
//!
//! Speech synthesis is an OS-level capability; the core stays independent of
//! any specific voice binding by talking to the small [`Speaker`] trait. The
//! crate ships [`NullSpeaker`], which validates and logs instead of speaking,
//! so the application runs unchanged on systems without a voice backend —
//! wiring in a real OS binding means implementing `Speaker` and swapping it
//! in at startup.

use thiserror::Error;

// ---------------------------------------------------------------------------
// SpeechError
// ---------------------------------------------------------------------------

/// Errors that can occur when reading text aloud.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// There was nothing to read — blank input is rejected before reaching
    /// any backend.
    #[error("没有可朗读的文本")]
    EmptyText,

    /// The underlying voice backend failed.
    #[error("朗读失败: {0}")]
    Backend(String),
}

// ---------------------------------------------------------------------------
// Speaker trait
// ---------------------------------------------------------------------------

/// Minimal speech interface.
///
/// Implementations must reject blank text with [`SpeechError::EmptyText`]
/// and must be `Send + Sync` so they can be shared as `Arc<dyn Speaker>`.
pub trait Speaker: Send + Sync {
    fn speak(&self, text: &str) -> Result<(), SpeechError>;
}

// ---------------------------------------------------------------------------
// NullSpeaker
// ---------------------------------------------------------------------------

/// Fallback speaker used when no OS voice binding is wired in.
///
/// Accepts the same inputs a real backend would, logging the request instead
/// of producing audio.
pub struct NullSpeaker;

impl Speaker for NullSpeaker {
    fn speak(&self, text: &str) -> Result<(), SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }
        log::info!("speech: no voice backend wired in ({} chars dropped)", text.len());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert!(matches!(
            NullSpeaker.speak("   "),
            Err(SpeechError::EmptyText)
        ));
        assert!(matches!(NullSpeaker.speak(""), Err(SpeechError::EmptyText)));
    }

    #[test]
    fn non_blank_text_is_accepted() {
        assert!(NullSpeaker.speak("Hello there").is_ok());
    }

    /// Verify that `NullSpeaker` is usable as `dyn Speaker`.
    #[test]
    fn speaker_is_object_safe() {
        let speaker: Box<dyn Speaker> = Box::new(NullSpeaker);
        assert!(speaker.speak("ok").is_ok());
    }
}
