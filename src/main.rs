//! Application entry point — AI Translator.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Open the encrypted [`ConfigStore`] and load [`AppConfig`] (empty
//!    settings on first run or corruption — never fatal).
//! 3. Create the [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Create worker and hotkey channels.
//! 5. Spawn the background worker on the tokio runtime.
//! 6. Parse the configured hotkey chord and start the listener thread
//!    (degrades gracefully when the descriptor does not parse).
//! 7. Run [`eframe::run_native`] — blocks the main thread until the window
//!    is closed.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use ai_translator::{
    app::TranslatorApp,
    config::{AppConfig, ConfigStore},
    hotkey::{parse_combo, HotkeyEvent, HotkeyListener, SharedCombo},
    speech::{NullSpeaker, Speaker},
    translate::{ApiTranslator, Translator},
    worker::{run_worker, WorkerCommand, WorkerEvent},
};

use eframe::egui;

fn native_options() -> eframe::NativeOptions {
    let vp = egui::ViewportBuilder::default()
        .with_inner_size([900.0, 600.0])
        .with_min_inner_size([600.0, 400.0]);

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("AI Translator starting up");

    // 2. Configuration
    let store = ConfigStore::new();
    let config = AppConfig::load(&store);

    // 3. Tokio runtime (2 worker threads — the worker loop plus one spare)
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    // 4. Channel setup
    let (command_tx, command_rx) = mpsc::channel::<WorkerCommand>(16);
    let (event_tx, event_rx) = mpsc::channel::<WorkerEvent>(32);
    let (hotkey_tx, hotkey_rx) = mpsc::channel::<HotkeyEvent>(16);

    // 5. Background worker — builds a fresh translator per request so
    //    settings saves take effect immediately.
    rt.spawn(run_worker(
        store.clone(),
        |cfg| Arc::new(ApiTranslator::from_config(cfg)) as Arc<dyn Translator>,
        command_rx,
        event_tx,
    ));

    // 6. Global hotkey listener
    let combo: SharedCombo = Arc::new(Mutex::new(match parse_combo(&config.hotkey) {
        Some(parsed) => Some(parsed),
        None => {
            log::warn!(
                "unrecognised hotkey descriptor {:?}; global hotkey disabled",
                config.hotkey
            );
            None
        }
    }));
    let _hotkey_listener = HotkeyListener::start(Arc::clone(&combo), hotkey_tx);

    // Swap in a platform voice binding here to get real speech output.
    let speaker: Arc<dyn Speaker> = Arc::new(NullSpeaker);

    // 7. Build the egui app and run it (blocks until the window is closed)
    let app = TranslatorApp::new(
        config,
        store,
        combo,
        speaker,
        command_tx,
        event_rx,
        hotkey_rx,
    );

    eframe::run_native(
        "AI Translator",
        native_options(),
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
