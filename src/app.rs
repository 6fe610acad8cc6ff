//! AI Translator main window — egui/eframe application.
//!
//! # Architecture
//!
//! [`TranslatorApp`] is the top-level [`eframe::App`] that owns the UI state
//! and three channel endpoints:
//!
//! * `command_tx` — sends [`WorkerCommand`] to the background worker.
//! * `event_rx`   — receives [`WorkerEvent`] from the worker.
//! * `hotkey_rx`  — receives visibility-toggle events from the hotkey thread.
//!
//! The window shows an input pane and an output pane side by side, with the
//! vocabulary analysis pane underneath. While a translation is in flight the
//! output pane shows an elapsed-seconds waiting line, advancing roughly once
//! per second.
//!
//! # Single translation in flight
//!
//! Starting or stopping a translation bumps `generation`; worker events
//! tagged with an older generation are dropped on arrival. The network call
//! itself is never aborted — "stop" only suppresses its eventual result.

use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui;
use tokio::sync::mpsc;

use crate::config::{AppConfig, ConfigStore};
use crate::flomo;
use crate::hotkey::{parse_combo, HotkeyEvent, SharedCombo};
use crate::speech::Speaker;
use crate::translate::format_vocabulary;
use crate::worker::{WorkerCommand, WorkerEvent};

/// Target languages offered in the output pane, in menu order.
pub const LANGUAGES: &[&str] = &[
    "中文",
    "英语",
    "日语",
    "韩语",
    "法语",
    "德语",
    "西班牙语",
    "俄语",
    "葡萄牙语",
    "意大利语",
];

/// Pre-selected target language.
pub const DEFAULT_LANGUAGE: &str = "英语";

// ---------------------------------------------------------------------------
// TranslateState — UI-side state machine
// ---------------------------------------------------------------------------

/// Current state of the translation flow, as seen by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslateState {
    /// No request outstanding.
    Idle,
    /// A request is in flight; the waiting line is ticking.
    Waiting,
    /// A result is being displayed.
    Done,
    /// The last request failed; the message is displayed.
    Failed,
}

// ---------------------------------------------------------------------------
// Settings draft
// ---------------------------------------------------------------------------

/// Editable copy of the settings while the panel is open; nothing touches
/// the store until 保存 is pressed.
struct SettingsDraft {
    api_key: String,
    api_endpoint: String,
    model: String,
    flomo_key: String,
    hotkey: String,
    skip_ssl_check: bool,
    /// Validation / save feedback shown inside the panel.
    feedback: Option<String>,
}

impl SettingsDraft {
    fn from_config(config: &AppConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            api_endpoint: config.api_endpoint.clone(),
            model: config.model.clone(),
            flomo_key: config.flomo_key.clone(),
            hotkey: config.hotkey.clone(),
            skip_ssl_check: config.skip_ssl_check,
            feedback: None,
        }
    }

    fn to_config(&self) -> AppConfig {
        AppConfig {
            api_key: self.api_key.clone(),
            api_endpoint: self.api_endpoint.clone(),
            model: self.model.clone(),
            flomo_key: self.flomo_key.trim().to_string(),
            hotkey: self.hotkey.clone(),
            skip_ssl_check: self.skip_ssl_check,
        }
    }
}

// ---------------------------------------------------------------------------
// TranslatorApp
// ---------------------------------------------------------------------------

/// eframe application — the translator main window.
pub struct TranslatorApp {
    // ── Translation state ────────────────────────────────────────────────
    state: TranslateState,
    /// Source text being edited in the input pane.
    input_text: String,
    /// Selected target language (one of [`LANGUAGES`]).
    target_language: String,
    /// Last translation, shown in the output pane.
    translation: Option<String>,
    /// Formatted vocabulary block, shown in the analysis pane.
    vocabulary_block: Option<String>,
    /// Error message for the Failed state.
    error_message: Option<String>,
    /// Transient status line (note export, speech, input validation).
    status: Option<String>,

    // ── Request bookkeeping ──────────────────────────────────────────────
    /// Current request generation; bumped on every start and stop.
    generation: u64,
    /// When the in-flight request started, for the waiting line.
    waiting_since: Option<Instant>,

    // ── Settings ─────────────────────────────────────────────────────────
    show_settings: bool,
    settings: SettingsDraft,
    store: ConfigStore,
    /// Rebindable hotkey chord shared with the listener thread.
    combo: SharedCombo,

    // ── Window visibility (toggled by the global hotkey) ─────────────────
    visible: bool,

    // ── Collaborators ────────────────────────────────────────────────────
    speaker: Arc<dyn Speaker>,
    command_tx: mpsc::Sender<WorkerCommand>,
    event_rx: mpsc::Receiver<WorkerEvent>,
    hotkey_rx: mpsc::Receiver<HotkeyEvent>,
}

impl TranslatorApp {
    /// Create a new [`TranslatorApp`].
    pub fn new(
        config: AppConfig,
        store: ConfigStore,
        combo: SharedCombo,
        speaker: Arc<dyn Speaker>,
        command_tx: mpsc::Sender<WorkerCommand>,
        event_rx: mpsc::Receiver<WorkerEvent>,
        hotkey_rx: mpsc::Receiver<HotkeyEvent>,
    ) -> Self {
        Self {
            state: TranslateState::Idle,
            input_text: String::new(),
            target_language: DEFAULT_LANGUAGE.into(),
            translation: None,
            vocabulary_block: None,
            error_message: None,
            status: None,
            generation: 0,
            waiting_since: None,
            show_settings: false,
            settings: SettingsDraft::from_config(&config),
            store,
            combo,
            visible: true,
            speaker,
            command_tx,
            event_rx,
            hotkey_rx,
        }
    }

    // ── Channel polling ──────────────────────────────────────────────────

    /// Drain pending hotkey events (non-blocking).
    fn poll_hotkey(&mut self, ctx: &egui::Context) {
        while let Ok(HotkeyEvent::ToggleVisibility) = self.hotkey_rx.try_recv() {
            self.visible = !self.visible;
            ctx.send_viewport_cmd(egui::ViewportCommand::Visible(self.visible));
            if self.visible {
                ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
            }
        }
    }

    /// Drain pending worker events (non-blocking), dropping stale ones.
    fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                WorkerEvent::TranslationDone { generation, result } => {
                    if generation != self.generation {
                        log::debug!("dropping stale translation result (gen {generation})");
                        continue;
                    }
                    self.translation = Some(result.translation);
                    self.vocabulary_block = Some(format_vocabulary(&result.vocabulary));
                    self.state = TranslateState::Done;
                    self.waiting_since = None;
                }
                WorkerEvent::TranslationFailed {
                    generation,
                    message,
                } => {
                    if generation != self.generation {
                        log::debug!("dropping stale translation error (gen {generation})");
                        continue;
                    }
                    self.error_message = Some(message);
                    self.state = TranslateState::Failed;
                    self.waiting_since = None;
                }
                WorkerEvent::NoteSaved => {
                    self.status = Some("已保存到 Flomo".into());
                }
                WorkerEvent::NoteFailed { message } => {
                    self.status = Some(message);
                }
            }
        }
    }

    // ── Actions ──────────────────────────────────────────────────────────

    /// Translate button — doubles as a stop button while waiting.
    fn toggle_translation(&mut self) {
        if self.state == TranslateState::Waiting {
            self.stop_translation();
        } else {
            self.start_translation();
        }
    }

    fn start_translation(&mut self) {
        let text = self.input_text.trim().to_string();
        if text.is_empty() {
            self.status = Some("请输入要翻译的文本".into());
            return;
        }

        // A new generation supersedes whatever may still be in flight.
        self.generation += 1;
        self.translation = None;
        self.vocabulary_block = None;
        self.error_message = None;
        self.status = None;
        self.state = TranslateState::Waiting;
        self.waiting_since = Some(Instant::now());

        let _ = self.command_tx.try_send(WorkerCommand::Translate {
            text,
            language: self.target_language.clone(),
            generation: self.generation,
        });
    }

    /// Best-effort stop: the in-flight call finishes on the worker but its
    /// result arrives with a stale generation and is dropped.
    fn stop_translation(&mut self) {
        self.generation += 1;
        self.state = TranslateState::Idle;
        self.waiting_since = None;
    }

    fn speak_translation(&mut self) {
        let text = self.translation.clone().unwrap_or_default();
        if let Err(e) = self.speaker.speak(&text) {
            self.status = Some(e.to_string());
        }
    }

    fn save_to_flomo(&mut self) {
        let input = self.input_text.trim().to_string();
        let translation = self
            .translation
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string();

        if input.is_empty() || translation.is_empty() {
            self.status = Some("请先进行翻译".into());
            return;
        }

        let _ = self.command_tx.try_send(WorkerCommand::SaveNote {
            input,
            translation,
            vocabulary_block: self.vocabulary_block.clone().unwrap_or_default(),
        });
        self.status = Some("正在保存到 Flomo...".into());
    }

    // ── Settings ─────────────────────────────────────────────────────────

    fn open_settings(&mut self) {
        self.settings = SettingsDraft::from_config(&AppConfig::load(&self.store));
        self.show_settings = true;
    }

    /// Validate and persist the draft; rebind the hotkey on success.
    fn apply_settings(&mut self) {
        if !flomo::is_well_formed_key(self.settings.flomo_key.trim()) {
            self.settings.feedback = Some("Flomo Key 只能包含字母和数字".into());
            return;
        }

        let config = self.settings.to_config();
        if let Err(e) = config.save(&self.store) {
            self.settings.feedback = Some(format!("保存设置失败: {e}"));
            return;
        }

        match parse_combo(&config.hotkey) {
            Some(parsed) => {
                if let Ok(mut slot) = self.combo.lock() {
                    *slot = Some(parsed);
                }
            }
            None => {
                log::warn!("unrecognised hotkey descriptor {:?}", config.hotkey);
                self.status = Some("快捷键无法识别，全局快捷键已停用".into());
                if let Ok(mut slot) = self.combo.lock() {
                    *slot = None;
                }
            }
        }

        self.show_settings = false;
    }

    // ── Panels ───────────────────────────────────────────────────────────

    fn draw_input_pane(&mut self, ui: &mut egui::Ui) {
        ui.label("原文");
        let height = (ui.available_height() - 36.0).max(60.0);
        egui::ScrollArea::vertical()
            .id_salt("input")
            .max_height(height)
            .show(ui, |ui| {
                ui.add_sized(
                    [ui.available_width(), height],
                    egui::TextEdit::multiline(&mut self.input_text)
                        .hint_text("请输入要翻译的文本..."),
                );
            });

        let button_label = if self.state == TranslateState::Waiting {
            "停止"
        } else {
            "翻译"
        };
        if ui.button(button_label).clicked() {
            self.toggle_translation();
        }
    }

    fn draw_output_pane(&mut self, ui: &mut egui::Ui) {
        egui::ComboBox::from_id_salt("target-language")
            .selected_text(self.target_language.clone())
            .show_ui(ui, |ui| {
                for lang in LANGUAGES {
                    ui.selectable_value(&mut self.target_language, (*lang).to_string(), *lang);
                }
            });

        let height = (ui.available_height() - 36.0).max(60.0);
        egui::ScrollArea::vertical()
            .id_salt("output")
            .max_height(height)
            .show(ui, |ui| match &self.state {
                TranslateState::Waiting => {
                    let secs = self
                        .waiting_since
                        .map(|t| t.elapsed().as_secs())
                        .unwrap_or(0);
                    ui.label(format!("等待中... {secs}秒"));
                }
                TranslateState::Failed => {
                    let msg = self.error_message.as_deref().unwrap_or("未知错误");
                    ui.colored_label(egui::Color32::from_rgb(255, 136, 68), msg);
                }
                _ => {
                    let text = self.translation.as_deref().unwrap_or("");
                    if text.is_empty() {
                        ui.weak("翻译结果将显示在这里...");
                    } else {
                        ui.label(text);
                    }
                }
            });

        if ui.button("🔊 朗读翻译").clicked() {
            self.speak_translation();
        }
    }

    fn draw_vocabulary_pane(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("重点词组");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("⚙ 设置").clicked() {
                    self.open_settings();
                }
                if ui.button("保存到 Flomo").clicked() {
                    self.save_to_flomo();
                }
            });
        });

        egui::ScrollArea::vertical()
            .id_salt("vocabulary")
            .show(ui, |ui| {
                let block = self.vocabulary_block.as_deref().unwrap_or("");
                if block.is_empty() {
                    ui.weak("重点词组将显示在这里...");
                } else {
                    ui.label(block);
                }
            });
    }

    fn draw_settings(&mut self, ui: &mut egui::Ui) {
        ui.heading("设置");
        ui.add_space(8.0);

        egui::Grid::new("settings-grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("AI API Key:");
                ui.add(egui::TextEdit::singleline(&mut self.settings.api_key).password(true));
                ui.end_row();

                ui.label("API Endpoint:");
                ui.text_edit_singleline(&mut self.settings.api_endpoint);
                ui.end_row();

                ui.label("Model:");
                ui.text_edit_singleline(&mut self.settings.model);
                ui.end_row();

                ui.label("Flomo Key Part:");
                ui.text_edit_singleline(&mut self.settings.flomo_key);
                ui.end_row();

                ui.label("全局快捷键:");
                ui.text_edit_singleline(&mut self.settings.hotkey);
                ui.end_row();

                ui.label("SSL校验:");
                ui.checkbox(&mut self.settings.skip_ssl_check, "跳过SSL校验（不安全）");
                ui.end_row();
            });

        if let Some(feedback) = &self.settings.feedback {
            ui.add_space(4.0);
            ui.colored_label(egui::Color32::from_rgb(255, 136, 68), feedback);
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("保存").clicked() {
                self.apply_settings();
            }
            if ui.button("取消").clicked() {
                self.show_settings = false;
            }
        });
    }
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for TranslatorApp {
    /// Called every frame by eframe. Polls channels, then renders.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_hotkey(ctx);
        self.poll_events();

        // Channel polling must continue while the window is hidden or idle —
        // the hotkey and worker events arrive regardless of focus.
        if self.state == TranslateState::Waiting {
            // Keep the 等待中 seconds line ticking.
            ctx.request_repaint_after(Duration::from_millis(500));
        } else {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.show_settings {
                self.draw_settings(ui);
                return;
            }

            let top_height = ui.available_height() * 0.6;
            ui.allocate_ui([ui.available_width(), top_height].into(), |ui| {
                ui.columns(2, |cols| {
                    self.draw_input_pane(&mut cols[0]);
                    self.draw_output_pane(&mut cols[1]);
                });
            });

            ui.separator();
            self.draw_vocabulary_pane(ui);

            if let Some(status) = self.status.clone() {
                ui.separator();
                ui.weak(status);
            }
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("AI Translator window closing");
    }
}
