//! AI Translator — desktop translation utility.
//!
//! Sends user-entered text to an OpenAI-compatible chat-completion endpoint,
//! asks the model for a structured translation plus vocabulary breakdown,
//! renders the result in a small egui window, and can optionally read the
//! translation aloud or post it as a note to the Flomo webhook.
//!
//! # Module map
//!
//! * [`config`]    — encrypted settings store, typed configuration, paths.
//! * [`translate`] — prompt construction, API client, reply parsing,
//!   vocabulary formatting.
//! * [`flomo`]     — note-export webhook client.
//! * [`speech`]    — text-to-speech seam (no OS binding in the core).
//! * [`hotkey`]    — global visibility-toggle hotkey (`rdev`).
//! * [`worker`]    — background request worker driven over mpsc channels.
//! * [`app`]       — the eframe/egui application shell.

pub mod app;
pub mod config;
pub mod flomo;
pub mod hotkey;
pub mod speech;
pub mod translate;
pub mod worker;
