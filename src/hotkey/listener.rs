//! Dedicated OS-thread hotkey listener using `rdev::listen`.
//!
//! `rdev::listen` is a blocking call that must live on its own OS thread.
//! [`HotkeyListener`] owns that thread and a stop flag; dropping it sets the
//! flag so the callback silently ignores further events.
//!
//! The listener watches a modifier chord rather than a single key: it tracks
//! the press/release state of ctrl/alt/shift/meta from the event stream and
//! fires [`HotkeyEvent::ToggleVisibility`] when the terminal key goes down
//! with exactly the chord's modifiers held.
//!
//! # Rebinding
//!
//! The watched combo lives in a [`SharedCombo`] cell. rdev allows only one
//! listener per process, so rebinding after a settings change is done by
//! writing the new combo into the cell — the running thread picks it up on
//! the next event. `None` in the cell disables the hotkey entirely.
//!
//! # Shutdown caveat
//!
//! `rdev::listen` has **no graceful shutdown API**. Setting the stop flag
//! prevents events from being forwarded, but the OS thread itself will remain
//! blocked in the rdev event loop until the process exits. This is safe and
//! expected — rdev holds no resources that need explicit cleanup.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use tokio::sync::mpsc;

use super::{HotkeyEvent, KeyCombo};

/// Rebindable chord cell shared between the listener thread and the UI.
pub type SharedCombo = Arc<Mutex<Option<KeyCombo>>>;

// ---------------------------------------------------------------------------
// Modifier tracking
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ModifierState {
    ctrl: bool,
    alt: bool,
    shift: bool,
    meta: bool,
}

impl ModifierState {
    /// Record a press/release of `key` if it is a modifier; returns `true`
    /// when the key was consumed as a modifier.
    fn apply(&mut self, key: rdev::Key, pressed: bool) -> bool {
        match key {
            rdev::Key::ControlLeft | rdev::Key::ControlRight => self.ctrl = pressed,
            rdev::Key::Alt | rdev::Key::AltGr => self.alt = pressed,
            rdev::Key::ShiftLeft | rdev::Key::ShiftRight => self.shift = pressed,
            rdev::Key::MetaLeft | rdev::Key::MetaRight => self.meta = pressed,
            _ => return false,
        }
        true
    }

    /// `true` when exactly the chord's modifiers are held — extra held
    /// modifiers do not trigger the chord.
    fn matches(&self, combo: &KeyCombo) -> bool {
        self.ctrl == combo.ctrl
            && self.alt == combo.alt
            && self.shift == combo.shift
            && self.meta == combo.meta
    }
}

// ---------------------------------------------------------------------------
// HotkeyListener
// ---------------------------------------------------------------------------

/// Handle to a running hotkey listener thread.
///
/// Construct one with [`HotkeyListener::start`]. Drop it to stop forwarding
/// events.
pub struct HotkeyListener {
    /// Shared stop flag — set `true` on [`Drop`].
    stop: Arc<AtomicBool>,
    /// The thread handle. Kept alive so the thread is not detached
    /// prematurely; we never `join` it because `rdev::listen` never returns.
    _thread: std::thread::JoinHandle<()>,
}

impl HotkeyListener {
    /// Spawn a dedicated OS thread that listens for global key events and
    /// forwards [`HotkeyEvent::ToggleVisibility`] on `tx` whenever the chord
    /// currently stored in `combo` is pressed.
    ///
    /// # Arguments
    ///
    /// * `combo` — shared cell holding the chord to watch; write a new value
    ///   to rebind, or `None` to disable.
    /// * `tx`    — a `tokio::sync::mpsc` sender. The background thread uses
    ///   `blocking_send` so it works correctly from a non-async context.
    ///
    /// # Panics
    ///
    /// Panics if the OS refuses to create the thread (extremely unlikely).
    pub fn start(combo: SharedCombo, tx: mpsc::Sender<HotkeyEvent>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_clone = Arc::clone(&stop);

        let thread = std::thread::Builder::new()
            .name("hotkey-listener".into())
            .spawn(move || {
                let mut modifiers = ModifierState::default();

                let result = rdev::listen(move |event| {
                    // Bail out if the listener has been stopped.
                    if stop_clone.load(Ordering::Relaxed) {
                        return;
                    }

                    match event.event_type {
                        rdev::EventType::KeyPress(k) => {
                            if modifiers.apply(k, true) {
                                return;
                            }
                            let watched = combo.lock().ok().and_then(|c| *c);
                            if let Some(watched) = watched {
                                if k == watched.key && modifiers.matches(&watched) {
                                    // blocking_send is safe from non-async threads.
                                    let _ = tx.blocking_send(HotkeyEvent::ToggleVisibility);
                                }
                            }
                        }
                        rdev::EventType::KeyRelease(k) => {
                            modifiers.apply(k, false);
                        }
                        _ => {}
                    }
                });

                if let Err(e) = result {
                    log::error!("hotkey-listener: rdev::listen exited with error: {:?}", e);
                }
            })
            .expect("failed to spawn hotkey-listener thread");

        Self {
            stop,
            _thread: thread,
        }
    }
}

impl Drop for HotkeyListener {
    /// Set the stop flag so the rdev callback stops forwarding events.
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        // The OS thread continues to exist blocked inside rdev::listen until
        // the process exits — this is safe and requires no further cleanup.
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
