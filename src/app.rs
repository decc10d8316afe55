//! Main application module for Quillpad
//!
//! This module implements the eframe App trait for the main application:
//! menu bar, editor, status bar, prompts and modals, and the glue between
//! dispatched commands and the native dialogs they need.

use crate::ai::{AiService, OpenAiClient};
use crate::clipboard::SystemClipboard;
use crate::commands::{complete_path_request, dispatch, Command, Outcome, PathRequest, Services};
use crate::config::Settings;
use crate::editor::EditorWidget;
use crate::files::dialogs::{open_file_dialog, save_file_dialog, save_pdf_dialog};
use crate::state::AppState;
use crate::ui::{show_menu_bar, Prompt, PromptResult};
use eframe::egui;
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// The main application struct that holds all state and implements eframe::App.
pub struct QuillpadApp {
    /// Central application state
    state: AppState,
    /// Client built from the last entered key
    ai_client: Option<OpenAiClient>,
    clipboard: SystemClipboard,
    /// Open input prompt (Find and Replace, Change Font, Add Key)
    prompt: Option<Prompt>,
    /// Title last sent to the window
    last_title: String,
    /// Application start time for timing toast messages
    start_time: Instant,
}

impl QuillpadApp {
    /// Create a new QuillpadApp instance.
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        info!("Initializing Quillpad");

        Self {
            state: AppState::new(settings),
            ai_client: None,
            clipboard: SystemClipboard,
            prompt: None,
            last_title: String::new(),
            start_time: Instant::now(),
        }
    }

    /// Get elapsed time since app start in seconds.
    fn get_app_time(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Whether a modal or prompt currently owns the input.
    fn is_blocked(&self) -> bool {
        self.prompt.is_some() || self.state.modal().is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────

    fn run_command(&mut self, command: Command, ctx: &egui::Context) {
        let image_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        let outcome = {
            let mut services = Services {
                ai: self.ai_client.as_ref().map(|c| c as &dyn AiService),
                clipboard: &mut self.clipboard,
                image_dir: &image_dir,
            };
            dispatch(&mut self.state, command, &mut services)
        };

        match outcome {
            Outcome::Done => {}
            Outcome::Prompt(prompt) => self.prompt = Some(prompt),
            Outcome::PickPath(request) => self.handle_path_request(request),
            Outcome::ShowImage(path) => {
                if let Err(e) = open::that(&path) {
                    warn!("Failed to open image viewer: {}", e);
                    self.state
                        .show_toast(format!("Saved {} but could not open it", path.display()));
                }
            }
            Outcome::Exit => {
                info!("Exit requested");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }

    fn handle_path_request(&mut self, request: PathRequest) {
        let picked = {
            let current = self.state.buffer.path();
            match request {
                PathRequest::Open => open_file_dialog(current),
                PathRequest::Save => save_file_dialog(current),
                PathRequest::Pdf => save_pdf_dialog(current),
            }
        };

        match picked {
            Some(path) => complete_path_request(&mut self.state, request, &path),
            None => debug!("{:?} dialog cancelled", request),
        }
    }

    fn handle_prompt_result(&mut self, result: PromptResult) {
        match result {
            PromptResult::None => return,
            PromptResult::Cancelled => debug!("Prompt cancelled"),
            PromptResult::FindReplace(find_replace) => {
                match self.state.find_and_replace(&find_replace) {
                    Ok(0) => {}
                    Ok(count) => self
                        .state
                        .show_toast(format!("Replaced {} occurrence(s)", count)),
                    Err(e) => self.state.report(e),
                }
            }
            PromptResult::ChangeFont { family, size } => {
                self.state.change_font(&family, &size);
            }
            PromptResult::AddKey(key) => {
                if !key.is_empty() {
                    let client = OpenAiClient::new(key.as_str(), self.state.settings.ai.clone());
                    self.state.add_key(&key, &client);
                    self.ai_client = Some(client);
                }
            }
        }
        self.prompt = None;
    }

    /// Detect Ctrl shortcuts for menu commands.
    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        let pressed = ctx.input(|i| {
            if !i.modifiers.command || i.modifiers.shift || i.modifiers.alt {
                return None;
            }
            Command::all().iter().copied().find(|command| {
                command
                    .shortcut()
                    .map_or(false, |key| i.key_pressed(key))
            })
        });

        if let Some(command) = pressed {
            debug!("Keyboard shortcut: {:?}", command);
            self.run_command(command, ctx);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    fn render_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                // Left side: file path
                let path_display = self
                    .state
                    .buffer
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "Untitled".to_string());
                ui.label(path_display);

                // Center: Toast message (temporary notifications)
                if let Some(toast) = self.state.toast_message() {
                    ui.separator();
                    ui.label(egui::RichText::new(toast).italics());
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(self.state.stats().format_compact());

                    ui.separator();
                    ui.label(if self.state.ai_available() {
                        "AI ready"
                    } else if self.state.credential.has_key() {
                        "AI key rejected"
                    } else {
                        "AI off"
                    });

                    if self.state.buffer.is_read_only() {
                        ui.separator();
                        ui.label(egui::RichText::new("Read only").strong());
                    }
                });
            });
        });
    }

    fn render_modal(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.state.modal().cloned() else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new(notice.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(280.0);
                ui.label(notice.message.as_str());
                ui.separator();
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.state.dismiss_modal();
        }
    }

    fn render_ui(&mut self, ctx: &egui::Context) -> Option<Command> {
        let interactive = !self.is_blocked();

        let menu_command = egui::TopBottomPanel::top("menu_bar")
            .show(ctx, |ui| show_menu_bar(ui, &self.state, interactive))
            .inner;

        self.render_status_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(interactive, |ui| {
                EditorWidget::new(&mut self.state.buffer, &self.state.font)
                    .id(egui::Id::new("document_editor"))
                    .show(ui);
            });
        });

        menu_command
    }
}

impl eframe::App for QuillpadApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Update toast message (clear if expired)
        let current_time = self.get_app_time();
        self.state.update_toast(current_time);
        if self.state.toast_message().is_some() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        // Update window title if it changed
        let title = self.state.window_title();
        if title != self.last_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.last_title = title;
        }

        let menu_command = self.render_ui(ctx);
        if let Some(command) = menu_command {
            self.run_command(command, ctx);
        }

        // Handle keyboard shortcuts AFTER render so the selection is up to date
        if !self.is_blocked() {
            self.handle_keyboard_shortcuts(ctx);
        }

        // Prompts and modals draw on top of everything else
        if let Some(prompt) = &mut self.prompt {
            let result = prompt.show(ctx);
            self.handle_prompt_result(result);
        }
        self.render_modal(ctx);
    }
}
