//! Menu commands and their dispatch
//!
//! Every user-invoked action is a [`Command`]. The menu bar and keyboard
//! shortcuts both produce commands; [`dispatch`] runs one against the shared
//! [`AppState`] and reports failures through the feedback surface.
//!
//! Steps that need the window (file dialogs, prompts, launching the image
//! viewer, closing) are handed back to the caller as an [`Outcome`].

use crate::ai::AiService;
use crate::clipboard::TextClipboard;
use crate::error::{Error, Result};
use crate::state::AppState;
use crate::ui::Prompt;
use eframe::egui::Key;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Top-level menus, in menu bar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    File,
    Edit,
    Options,
    Ai,
    Help,
}

impl Menu {
    pub fn all() -> &'static [Menu] {
        &[Menu::File, Menu::Edit, Menu::Options, Menu::Ai, Menu::Help]
    }

    pub fn label(self) -> &'static str {
        match self {
            Menu::File => "File",
            Menu::Edit => "Edit",
            Menu::Options => "Options",
            Menu::Ai => "AI",
            Menu::Help => "Help",
        }
    }

    /// Commands listed under this menu.
    pub fn commands(self) -> impl Iterator<Item = Command> {
        Command::all().iter().copied().filter(move |c| c.menu() == self)
    }
}

/// A discrete user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // File
    New,
    Open,
    Save,
    SaveAsPdf,
    Exit,
    // Edit
    Cut,
    Copy,
    Paste,
    FindReplace,
    // Options
    ChangeFont,
    ToggleReadOnly,
    // AI
    AddKey,
    Complete,
    Illustrate,
    Improve,
    // Help
    About,
}

impl Command {
    /// Every command, in menu order.
    pub fn all() -> &'static [Command] {
        &[
            Command::New,
            Command::Open,
            Command::Save,
            Command::SaveAsPdf,
            Command::Exit,
            Command::Cut,
            Command::Copy,
            Command::Paste,
            Command::FindReplace,
            Command::ChangeFont,
            Command::ToggleReadOnly,
            Command::AddKey,
            Command::Complete,
            Command::Illustrate,
            Command::Improve,
            Command::About,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            Command::New => "New",
            Command::Open => "Open…",
            Command::Save => "Save…",
            Command::SaveAsPdf => "Save as PDF…",
            Command::Exit => "Exit",
            Command::Cut => "Cut",
            Command::Copy => "Copy",
            Command::Paste => "Paste",
            Command::FindReplace => "Find and Replace…",
            Command::ChangeFont => "Change Font…",
            Command::ToggleReadOnly => "Read Only",
            Command::AddKey => "Add Key…",
            Command::Complete => "Complete",
            Command::Illustrate => "Illustrate",
            Command::Improve => "Improve",
            Command::About => "About",
        }
    }

    pub fn menu(self) -> Menu {
        match self {
            Command::New | Command::Open | Command::Save | Command::SaveAsPdf | Command::Exit => {
                Menu::File
            }
            Command::Cut | Command::Copy | Command::Paste | Command::FindReplace => Menu::Edit,
            Command::ChangeFont | Command::ToggleReadOnly => Menu::Options,
            Command::AddKey | Command::Complete | Command::Illustrate | Command::Improve => {
                Menu::Ai
            }
            Command::About => Menu::Help,
        }
    }

    /// Ctrl (Cmd on macOS) shortcut key.
    pub fn shortcut(self) -> Option<Key> {
        match self {
            Command::New => Some(Key::N),
            Command::Open => Some(Key::O),
            Command::Save => Some(Key::S),
            Command::FindReplace => Some(Key::H),
            _ => None,
        }
    }

    /// Human-readable shortcut for the menu.
    pub fn shortcut_label(self) -> Option<String> {
        self.shortcut().map(|key| format!("Ctrl+{}", key.name()))
    }

    /// Whether the command needs a verified API key.
    pub fn requires_ai(self) -> bool {
        matches!(
            self,
            Command::Complete | Command::Illustrate | Command::Improve
        )
    }

    /// Whether the command can run right now.
    pub fn is_enabled(self, state: &AppState) -> bool {
        !self.requires_ai() || state.ai_available()
    }
}

/// Which file dialog the caller should open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRequest {
    Open,
    Save,
    Pdf,
}

/// What the caller must do after a command ran.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Nothing further
    Done,
    /// Open an input prompt
    Prompt(Prompt),
    /// Ask for a path, then finish with [`complete_path_request`]
    PickPath(PathRequest),
    /// Open a saved image in the system viewer
    ShowImage(PathBuf),
    /// Close the main window
    Exit,
}

/// Collaborators a command may need.
pub struct Services<'a> {
    pub ai: Option<&'a dyn AiService>,
    pub clipboard: &'a mut dyn TextClipboard,
    /// Where generated images are written
    pub image_dir: &'a Path,
}

impl Services<'_> {
    fn ai(&self) -> Result<&dyn AiService> {
        self.ai.ok_or(Error::MissingCredential)
    }
}

/// Run `command` against the application state.
///
/// Disabled commands are logged and ignored. Failures are reported through
/// [`AppState::report`] and yield [`Outcome::Done`].
pub fn dispatch(state: &mut AppState, command: Command, services: &mut Services<'_>) -> Outcome {
    if !command.is_enabled(state) {
        warn!("Ignoring disabled command {:?}", command);
        return Outcome::Done;
    }
    debug!("Command: {:?}", command);

    match run(state, command, services) {
        Ok(outcome) => outcome,
        Err(err) => {
            state.report(err);
            Outcome::Done
        }
    }
}

fn run(state: &mut AppState, command: Command, services: &mut Services<'_>) -> Result<Outcome> {
    let outcome = match command {
        // File operations
        Command::New => {
            state.new_document()?;
            Outcome::Done
        }
        Command::Open => {
            state.buffer.ensure_writable()?;
            Outcome::PickPath(PathRequest::Open)
        }
        Command::Save => Outcome::PickPath(PathRequest::Save),
        Command::SaveAsPdf => Outcome::PickPath(PathRequest::Pdf),
        Command::Exit => Outcome::Exit,

        // Edit operations
        Command::Cut => {
            state.cut(services.clipboard)?;
            Outcome::Done
        }
        Command::Copy => {
            state.copy(services.clipboard)?;
            Outcome::Done
        }
        Command::Paste => {
            state.paste(services.clipboard)?;
            Outcome::Done
        }
        Command::FindReplace => {
            state.buffer.ensure_writable()?;
            Outcome::Prompt(Prompt::find_replace())
        }

        // Options
        Command::ChangeFont => Outcome::Prompt(Prompt::change_font(&state.font)),
        Command::ToggleReadOnly => {
            state.toggle_read_only();
            Outcome::Done
        }

        // AI
        Command::AddKey => Outcome::Prompt(Prompt::add_key()),
        Command::Complete => {
            state.complete(services.ai()?)?;
            Outcome::Done
        }
        Command::Illustrate => {
            let path = state.illustrate(services.ai()?, services.image_dir)?;
            Outcome::ShowImage(path)
        }
        Command::Improve => {
            state.improve(services.ai()?)?;
            Outcome::Done
        }

        // Help
        Command::About => {
            state.show_modal("About Quillpad", about_text());
            Outcome::Done
        }
    };
    Ok(outcome)
}

/// Finish a file command once the user picked `path`.
pub fn complete_path_request(state: &mut AppState, request: PathRequest, path: &Path) {
    let result = match request {
        PathRequest::Open => state.open_path(path),
        PathRequest::Save => state.save_to(path),
        PathRequest::Pdf => state.export_pdf_to(path),
    };
    if let Err(err) = result {
        state.report(err);
    }
}

fn about_text() -> String {
    format!(
        "Quillpad {}\nA plain-text notepad with AI writing helpers.",
        env!("CARGO_PKG_VERSION")
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
