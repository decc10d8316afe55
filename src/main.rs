// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! Quillpad - Main Entry Point
//!
//! A plain-text notepad with optional AI completion, rewriting and
//! illustration. Built with Rust and egui.

mod ai;
mod app;
mod clipboard;
mod commands;
mod config;
mod editor;
mod error;
mod export;
mod files;
mod state;
mod ui;

use app::QuillpadApp;
use config::Settings;
use log::info;

/// Application name constant.
const APP_NAME: &str = "Quillpad";

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting {}", APP_NAME);

    let mut settings = Settings::default();
    settings.sanitize();
    let window_size = &settings.window_size;

    info!(
        "Window configuration: {}x{}",
        window_size.width, window_size.height
    );

    let viewport = eframe::egui::ViewportBuilder::default()
        .with_title(APP_NAME)
        .with_inner_size([window_size.width, window_size.height])
        .with_min_inner_size([400.0, 300.0]);

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(|cc| Ok(Box::new(QuillpadApp::new(cc, settings)))),
    )
}
