//! Menu bar for Quillpad
//!
//! Renders one drop-down per [`Menu`] and reports the command the user
//! clicked. Commands that are currently disabled are greyed out.

use crate::commands::{Command, Menu};
use crate::state::AppState;
use eframe::egui::{self, Ui};

/// Draw the menu bar and return the clicked command, if any.
///
/// With `interactive` false (a modal or prompt is open) every entry is
/// disabled.
pub fn show_menu_bar(ui: &mut Ui, state: &AppState, interactive: bool) -> Option<Command> {
    let mut clicked = None;

    egui::menu::bar(ui, |ui| {
        for menu in Menu::all() {
            ui.menu_button(menu.label(), |ui| {
                for command in menu.commands() {
                    if command == Command::Exit || command == Command::Complete {
                        ui.separator();
                    }

                    let checked =
                        command == Command::ToggleReadOnly && state.buffer.is_read_only();
                    let mut button = egui::Button::new(command.label()).selected(checked);
                    if let Some(shortcut) = command.shortcut_label() {
                        button = button.shortcut_text(shortcut);
                    }

                    let enabled = interactive && command.is_enabled(state);
                    if ui.add_enabled(enabled, button).clicked() {
                        clicked = Some(command);
                        ui.close_menu();
                    }
                }
            });
        }
    });

    clicked
}
