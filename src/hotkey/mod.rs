//! Global visibility-toggle hotkey, backed by `rdev`.
//!
//! # Design
//!
//! `rdev::listen()` is a blocking OS-level call that never returns while the
//! process is alive. It must run on a **dedicated OS thread** — it cannot be
//! used inside a tokio task.
//!
//! [`HotkeyListener::start`] spawns that dedicated thread and returns a
//! [`HotkeyListener`] handle. The combo to watch lives behind a shared
//! [`SharedCombo`] cell so the settings panel can rebind the hotkey without
//! restarting the listener (rdev supports only one listener per process and
//! has no graceful shutdown API).
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::{Arc, Mutex};
//! use tokio::sync::mpsc;
//! use ai_translator::hotkey::{parse_combo, HotkeyListener};
//!
//! let (tx, mut rx) = mpsc::channel(16);
//! let combo = Arc::new(Mutex::new(parse_combo("ctrl+alt+t")));
//! let _listener = HotkeyListener::start(Arc::clone(&combo), tx);
//!
//! // In your async loop:
//! // while let Some(ev) = rx.recv().await { ... }
//! ```

pub mod listener;

pub use listener::{HotkeyListener, SharedCombo};

// ---------------------------------------------------------------------------
// HotkeyEvent
// ---------------------------------------------------------------------------

/// Events emitted by the hotkey listener thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotkeyEvent {
    /// The visibility-toggle chord was pressed.
    ToggleVisibility,
}

// ---------------------------------------------------------------------------
// KeyCombo
// ---------------------------------------------------------------------------

/// A modifier chord plus one terminal key, e.g. `ctrl+alt+t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCombo {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
    /// The non-modifier key that completes the chord.
    pub key: rdev::Key,
}

// ---------------------------------------------------------------------------
// parse_combo
// ---------------------------------------------------------------------------

/// Parse a hotkey descriptor like `"ctrl+alt+t"` into a [`KeyCombo`].
///
/// The descriptor is `+`-separated and case-insensitive: zero or more of
/// `ctrl`/`alt`/`shift`/`meta` followed by exactly one terminal key
/// (letters, digits, F1–F12, and a few named keys).
///
/// Returns `None` for descriptors with no terminal key, more than one, or an
/// unrecognised name, so callers can fall back to a default or surface an
/// error to the user.
///
/// # Examples
///
/// ```
/// use ai_translator::hotkey::parse_combo;
///
/// let combo = parse_combo("ctrl+alt+t").unwrap();
/// assert!(combo.ctrl && combo.alt && !combo.shift);
/// assert_eq!(combo.key, rdev::Key::KeyT);
///
/// assert!(parse_combo("ctrl+alt").is_none());   // no terminal key
/// assert!(parse_combo("ctrl+q+w").is_none());   // two terminal keys
/// ```
pub fn parse_combo(descriptor: &str) -> Option<KeyCombo> {
    let mut ctrl = false;
    let mut alt = false;
    let mut shift = false;
    let mut meta = false;
    let mut key = None;

    for part in descriptor.split('+') {
        match part.trim().to_ascii_lowercase().as_str() {
            "ctrl" | "control" => ctrl = true,
            "alt" => alt = true,
            "shift" => shift = true,
            "meta" | "cmd" | "super" | "win" => meta = true,
            name => {
                if key.is_some() {
                    return None;
                }
                key = Some(parse_key(name)?);
            }
        }
    }

    Some(KeyCombo {
        ctrl,
        alt,
        shift,
        meta,
        key: key?,
    })
}

/// Parse a single (already lowercased) terminal key name.
fn parse_key(name: &str) -> Option<rdev::Key> {
    match name {
        // Function keys
        "f1" => Some(rdev::Key::F1),
        "f2" => Some(rdev::Key::F2),
        "f3" => Some(rdev::Key::F3),
        "f4" => Some(rdev::Key::F4),
        "f5" => Some(rdev::Key::F5),
        "f6" => Some(rdev::Key::F6),
        "f7" => Some(rdev::Key::F7),
        "f8" => Some(rdev::Key::F8),
        "f9" => Some(rdev::Key::F9),
        "f10" => Some(rdev::Key::F10),
        "f11" => Some(rdev::Key::F11),
        "f12" => Some(rdev::Key::F12),

        // Navigation / control
        "escape" | "esc" => Some(rdev::Key::Escape),
        "space" => Some(rdev::Key::Space),
        "return" | "enter" => Some(rdev::Key::Return),
        "tab" => Some(rdev::Key::Tab),
        "backspace" => Some(rdev::Key::Backspace),
        "delete" | "del" => Some(rdev::Key::Delete),
        "home" => Some(rdev::Key::Home),
        "end" => Some(rdev::Key::End),
        "pageup" => Some(rdev::Key::PageUp),
        "pagedown" => Some(rdev::Key::PageDown),
        "up" => Some(rdev::Key::UpArrow),
        "down" => Some(rdev::Key::DownArrow),
        "left" => Some(rdev::Key::LeftArrow),
        "right" => Some(rdev::Key::RightArrow),

        // Digits (top row)
        "0" => Some(rdev::Key::Num0),
        "1" => Some(rdev::Key::Num1),
        "2" => Some(rdev::Key::Num2),
        "3" => Some(rdev::Key::Num3),
        "4" => Some(rdev::Key::Num4),
        "5" => Some(rdev::Key::Num5),
        "6" => Some(rdev::Key::Num6),
        "7" => Some(rdev::Key::Num7),
        "8" => Some(rdev::Key::Num8),
        "9" => Some(rdev::Key::Num9),

        // Letters
        "a" => Some(rdev::Key::KeyA),
        "b" => Some(rdev::Key::KeyB),
        "c" => Some(rdev::Key::KeyC),
        "d" => Some(rdev::Key::KeyD),
        "e" => Some(rdev::Key::KeyE),
        "f" => Some(rdev::Key::KeyF),
        "g" => Some(rdev::Key::KeyG),
        "h" => Some(rdev::Key::KeyH),
        "i" => Some(rdev::Key::KeyI),
        "j" => Some(rdev::Key::KeyJ),
        "k" => Some(rdev::Key::KeyK),
        "l" => Some(rdev::Key::KeyL),
        "m" => Some(rdev::Key::KeyM),
        "n" => Some(rdev::Key::KeyN),
        "o" => Some(rdev::Key::KeyO),
        "p" => Some(rdev::Key::KeyP),
        "q" => Some(rdev::Key::KeyQ),
        "r" => Some(rdev::Key::KeyR),
        "s" => Some(rdev::Key::KeyS),
        "t" => Some(rdev::Key::KeyT),
        "u" => Some(rdev::Key::KeyU),
        "v" => Some(rdev::Key::KeyV),
        "w" => Some(rdev::Key::KeyW),
        "x" => Some(rdev::Key::KeyX),
        "y" => Some(rdev::Key::KeyY),
        "z" => Some(rdev::Key::KeyZ),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_default_combo() {
        let combo = parse_combo("ctrl+alt+t").unwrap();
        assert!(combo.ctrl);
        assert!(combo.alt);
        assert!(!combo.shift);
        assert!(!combo.meta);
        assert_eq!(combo.key, rdev::Key::KeyT);
    }

    #[test]
    fn parsing_is_case_insensitive() {
        let combo = parse_combo("Ctrl+Alt+T").unwrap();
        assert!(combo.ctrl && combo.alt);
        assert_eq!(combo.key, rdev::Key::KeyT);
    }

    #[test]
    fn tolerates_spaces_around_parts() {
        let combo = parse_combo(" ctrl + shift + f9 ").unwrap();
        assert!(combo.ctrl && combo.shift);
        assert_eq!(combo.key, rdev::Key::F9);
    }

    #[test]
    fn bare_key_without_modifiers() {
        let combo = parse_combo("f12").unwrap();
        assert!(!combo.ctrl && !combo.alt && !combo.shift && !combo.meta);
        assert_eq!(combo.key, rdev::Key::F12);
    }

    #[test]
    fn modifier_aliases() {
        assert!(parse_combo("control+x").unwrap().ctrl);
        assert!(parse_combo("cmd+x").unwrap().meta);
        assert!(parse_combo("super+x").unwrap().meta);
        assert!(parse_combo("win+x").unwrap().meta);
    }

    #[test]
    fn digits_and_named_keys() {
        assert_eq!(parse_combo("ctrl+1").unwrap().key, rdev::Key::Num1);
        assert_eq!(parse_combo("alt+space").unwrap().key, rdev::Key::Space);
        assert_eq!(parse_combo("esc").unwrap().key, rdev::Key::Escape);
    }

    #[test]
    fn rejects_missing_terminal_key() {
        assert!(parse_combo("ctrl+alt").is_none());
        assert!(parse_combo("").is_none());
    }

    #[test]
    fn rejects_two_terminal_keys() {
        assert!(parse_combo("ctrl+q+w").is_none());
    }

    #[test]
    fn rejects_unknown_names() {
        assert!(parse_combo("ctrl+alt+unknownkey").is_none());
        assert!(parse_combo("hyper+t").is_none());
    }
}
