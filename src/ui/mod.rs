//! UI components for Quillpad
//!
//! This module contains the menu bar and the input prompts.

mod menu;
mod prompts;

pub use menu::show_menu_bar;
pub use prompts::{Prompt, PromptResult};
