//! Input prompts for commands that need text from the user.
//!
//! Find and Replace, Change Font and Add Key each open a small centered
//! window. Enter moves to the next field and submits from the last one.
//! Cancelling (button or Escape) yields [`PromptResult::Cancelled`] and the
//! command does nothing.

use crate::config::FontSetting;
use crate::editor::FindReplace;
use eframe::egui::{self, Key};

/// State for an open prompt window.
#[derive(Debug, Clone)]
pub enum Prompt {
    FindReplace { find: String, replace: String },
    ChangeFont { family: String, size: String },
    AddKey { key: String },
}

/// What Enter does in a prompt field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnterAction {
    FocusNext,
    Submit,
}

/// Result from showing a prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptResult {
    /// No action taken (prompt still open)
    None,
    /// Prompt was cancelled
    Cancelled,
    FindReplace(FindReplace),
    ChangeFont { family: String, size: String },
    AddKey(String),
}

impl Prompt {
    pub fn find_replace() -> Self {
        Self::FindReplace {
            find: String::new(),
            replace: String::new(),
        }
    }

    /// Font prompt pre-filled with the current font.
    pub fn change_font(current: &FontSetting) -> Self {
        Self::ChangeFont {
            family: current.family.clone(),
            size: current.size.to_string(),
        }
    }

    pub fn add_key() -> Self {
        Self::AddKey { key: String::new() }
    }

    fn title(&self) -> &'static str {
        match self {
            Prompt::FindReplace { .. } => "Find and Replace",
            Prompt::ChangeFont { .. } => "Change Font",
            Prompt::AddKey { .. } => "Add API Key",
        }
    }

    fn field_count(&self) -> usize {
        match self {
            Prompt::FindReplace { .. } | Prompt::ChangeFont { .. } => 2,
            Prompt::AddKey { .. } => 1,
        }
    }

    /// Enter submits only from the last field.
    fn enter_action(&self, field: usize) -> EnterAction {
        if field + 1 < self.field_count() {
            EnterAction::FocusNext
        } else {
            EnterAction::Submit
        }
    }

    /// Value produced when the user confirms.
    fn submit(&self) -> PromptResult {
        match self {
            Prompt::FindReplace { find, replace } => {
                PromptResult::FindReplace(FindReplace::new(find.as_str(), replace.as_str()))
            }
            Prompt::ChangeFont { family, size } => PromptResult::ChangeFont {
                family: family.trim().to_string(),
                size: size.trim().to_string(),
            },
            Prompt::AddKey { key } => PromptResult::AddKey(key.trim().to_string()),
        }
    }

    /// Show the prompt and return the result.
    pub fn show(&mut self, ctx: &egui::Context) -> PromptResult {
        // Handle escape key
        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            return PromptResult::Cancelled;
        }

        let mut result = PromptResult::None;
        let title = self.title();

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(320.0);
                ui.add_space(8.0);

                let fields = match self {
                    Prompt::FindReplace { find, replace } => {
                        let first = labeled_field(ui, "Find:", find, false);
                        let second = labeled_field(ui, "Replace with:", replace, false);
                        if find.is_empty() && !second.has_focus() {
                            first.request_focus();
                        }
                        vec![first, second]
                    }
                    Prompt::ChangeFont { family, size } => vec![
                        labeled_field(ui, "Font family:", family, false),
                        labeled_field(ui, "Font size (1-100):", size, false),
                    ],
                    Prompt::AddKey { key } => {
                        let field = labeled_field(ui, "Enter your API key:", key, true);
                        if key.is_empty() {
                            field.request_focus();
                        }
                        vec![field]
                    }
                };

                let mut submitted = false;
                for (index, field) in fields.iter().enumerate() {
                    if !entered(ctx, field) {
                        continue;
                    }
                    match self.enter_action(index) {
                        EnterAction::FocusNext => fields[index + 1].request_focus(),
                        EnterAction::Submit => submitted = true,
                    }
                }

                ui.add_space(12.0);

                ui.horizontal(|ui| {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("OK").clicked() || submitted {
                            result = self.submit();
                        }

                        ui.add_space(8.0);

                        if ui.button("Cancel").clicked() {
                            result = PromptResult::Cancelled;
                        }
                    });
                });

                ui.add_space(4.0);
            });

        result
    }
}

fn labeled_field(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut String,
    password: bool,
) -> egui::Response {
    ui.label(label);
    ui.add_space(4.0);
    let response = ui.add(
        egui::TextEdit::singleline(value)
            .password(password)
            .desired_width(300.0),
    );
    ui.add_space(8.0);
    response
}

fn entered(ctx: &egui::Context, response: &egui::Response) -> bool {
    response.lost_focus() && ctx.input(|i| i.key_pressed(Key::Enter))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_prompt_prefilled() {
        let font = FontSetting::new("Courier", 14).unwrap();
        match Prompt::change_font(&font) {
            Prompt::ChangeFont { family, size } => {
                assert_eq!(family, "Courier");
                assert_eq!(size, "14");
            }
            other => panic!("unexpected prompt {:?}", other),
        }
    }

    #[test]
    fn test_submit_trims_key_and_font() {
        let prompt = Prompt::AddKey {
            key: "  sk-abc \n".to_string(),
        };
        assert_eq!(prompt.submit(), PromptResult::AddKey("sk-abc".to_string()));

        let prompt = Prompt::ChangeFont {
            family: " Arial ".to_string(),
            size: " 20".to_string(),
        };
        assert_eq!(
            prompt.submit(),
            PromptResult::ChangeFont {
                family: "Arial".to_string(),
                size: "20".to_string()
            }
        );
    }

    #[test]
    fn test_enter_in_find_moves_to_replace() {
        let prompt = Prompt::find_replace();
        assert_eq!(prompt.enter_action(0), EnterAction::FocusNext);
        assert_eq!(prompt.enter_action(1), EnterAction::Submit);
    }

    #[test]
    fn test_enter_submits_from_last_field() {
        let font = Prompt::change_font(&FontSetting::default());
        assert_eq!(font.enter_action(0), EnterAction::FocusNext);
        assert_eq!(font.enter_action(1), EnterAction::Submit);
        assert_eq!(Prompt::add_key().enter_action(0), EnterAction::Submit);
    }

    #[test]
    fn test_find_replace_submit_keeps_whitespace() {
        let prompt = Prompt::FindReplace {
            find: " cat".to_string(),
            replace: " dog".to_string(),
        };
        assert_eq!(
            prompt.submit(),
            PromptResult::FindReplace(FindReplace::new(" cat", " dog"))
        );
    }
}
