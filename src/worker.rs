//! Background request worker — keeps the UI responsive during network calls.
//!
//! [`run_worker`] is an async loop spawned on the tokio runtime. It receives
//! [`WorkerCommand`]s from the UI, performs the network-bound work
//! (translation requests, Flomo note export), and emits [`WorkerEvent`]s
//! back.
//!
//! # Single translation in flight
//!
//! Every translate command carries a *generation* number assigned by the UI.
//! The UI bumps its generation when it starts or stops a translation, and
//! discards any event tagged with an older generation. Stopping therefore
//! suppresses the eventual result rather than aborting the socket — the
//! underlying blocking round trip cannot be interrupted mid-flight.
//!
//! # Configuration freshness
//!
//! The settings mapping is reloaded from the store before each operation, so
//! a settings save made while the worker is idle takes effect on the very
//! next request. No configuration state is shared mutably across requests.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::{AppConfig, ConfigStore};
use crate::flomo::FlomoClient;
use crate::translate::{TranslationResult, Translator};

// ---------------------------------------------------------------------------
// Commands and events
// ---------------------------------------------------------------------------

/// Commands sent from the UI to the worker.
#[derive(Debug, Clone)]
pub enum WorkerCommand {
    /// Translate `text` into `language`; the reply event echoes `generation`.
    Translate {
        text: String,
        language: String,
        generation: u64,
    },
    /// Export a note to Flomo.
    SaveNote {
        input: String,
        translation: String,
        vocabulary_block: String,
    },
}

/// Events delivered from the worker back to the UI.
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    /// A translation finished; stale if `generation` no longer matches.
    TranslationDone {
        generation: u64,
        result: TranslationResult,
    },
    /// A translation failed; stale if `generation` no longer matches.
    TranslationFailed { generation: u64, message: String },
    /// The note was accepted by the Flomo webhook.
    NoteSaved,
    /// The note export failed.
    NoteFailed { message: String },
}

// ---------------------------------------------------------------------------
// Worker loop
// ---------------------------------------------------------------------------

/// Run the worker until `command_rx` is closed.
///
/// `make_translator` builds a fresh [`Translator`] from the reloaded config
/// for every request — production wires `ApiTranslator::from_config`, tests
/// substitute mocks.
pub async fn run_worker<F>(
    store: ConfigStore,
    make_translator: F,
    mut command_rx: mpsc::Receiver<WorkerCommand>,
    event_tx: mpsc::Sender<WorkerEvent>,
) where
    F: Fn(&AppConfig) -> Arc<dyn Translator>,
{
    while let Some(cmd) = command_rx.recv().await {
        match cmd {
            WorkerCommand::Translate {
                text,
                language,
                generation,
            } => {
                let config = AppConfig::load(&store);
                let translator = make_translator(&config);

                log::debug!("worker: translating {} chars into {language}", text.len());
                let event = match translator.translate(&text, &language).await {
                    Ok(result) => WorkerEvent::TranslationDone { generation, result },
                    Err(e) => {
                        log::warn!("worker: translation failed: {e}");
                        WorkerEvent::TranslationFailed {
                            generation,
                            message: e.to_string(),
                        }
                    }
                };
                let _ = event_tx.send(event).await;
            }

            WorkerCommand::SaveNote {
                input,
                translation,
                vocabulary_block,
            } => {
                let config = AppConfig::load(&store);
                let flomo = FlomoClient::from_config(&config);

                let event = match flomo
                    .save_note(&input, &translation, &vocabulary_block)
                    .await
                {
                    Ok(()) => WorkerEvent::NoteSaved,
                    Err(e) => {
                        log::warn!("worker: note export failed: {e}");
                        WorkerEvent::NoteFailed {
                            message: e.to_string(),
                        }
                    }
                };
                let _ = event_tx.send(event).await;
            }
        }
    }

    log::info!("worker: command channel closed, shutting down");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
