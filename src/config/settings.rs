//! Settings structs for Quillpad
//!
//! All settings live in memory for the duration of the session. They derive
//! serde traits so they can be dumped to the log, but nothing is ever written
//! to disk.

use eframe::egui::FontFamily;
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Font Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Font used to render the document.
///
/// The family is a free-form name typed by the user; it only affects how the
/// document is displayed, never its content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSetting {
    /// Family name as entered by the user
    pub family: String,
    /// Point size
    pub size: u32,
}

impl FontSetting {
    /// Smallest accepted font size.
    pub const MIN_SIZE: u32 = 1;
    /// Largest accepted font size.
    pub const MAX_SIZE: u32 = 100;

    /// Create a font setting, rejecting empty names and out-of-range sizes.
    pub fn new(family: impl Into<String>, size: u32) -> Option<Self> {
        let family = family.into().trim().to_string();
        if family.is_empty() || !(Self::MIN_SIZE..=Self::MAX_SIZE).contains(&size) {
            return None;
        }
        Some(Self { family, size })
    }

    /// Map the family name onto one of the families egui has loaded.
    pub fn egui_family(&self) -> FontFamily {
        let name = self.family.to_lowercase();
        let monospace = ["mono", "courier", "consolas", "code", "terminal", "fixed"];
        if monospace.iter().any(|m| name.contains(m)) {
            FontFamily::Monospace
        } else {
            FontFamily::Proportional
        }
    }

    /// Size as egui points.
    pub fn points(&self) -> f32 {
        self.size as f32
    }
}

impl Default for FontSetting {
    fn default() -> Self {
        Self {
            family: "Arial".to_string(),
            size: 12,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Window Size Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Initial window dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    /// Window width in pixels
    pub width: f32,
    /// Window height in pixels
    pub height: f32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AI Service Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Endpoint, model and sampling constants for the generative-AI adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiSettings {
    /// Base URL of the REST API, without trailing slash
    pub base_url: String,
    /// Model used for completion and improvement
    pub chat_model: String,
    /// Model used for illustration
    pub image_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    /// System instruction prefixed to the document for "Complete"
    pub complete_instruction: String,
    /// System instruction sent alongside the selection for "Improve"
    pub improve_instruction: String,
    /// Provider message marking a content-policy refusal
    pub safety_rejection_marker: String,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            chat_model: "gpt-4".to_string(),
            image_model: "dall-e-3".to_string(),
            temperature: 1.0,
            max_tokens: 256,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            complete_instruction: "Complete this text: ".to_string(),
            improve_instruction: "Improve this text and respond back with only it".to_string(),
            safety_rejection_marker: "Your request was rejected as a result of our safety system"
                .to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PDF Export Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Page geometry for PDF export. Lengths are millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PdfSettings {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub line_height_mm: f32,
    /// Font size in points
    pub font_size: f32,
}

impl PdfSettings {
    /// Width between the left and right margins.
    pub fn printable_width_mm(&self) -> f32 {
        (self.page_width_mm - 2.0 * self.margin_mm).max(0.0)
    }

    /// How many lines fit on one page.
    pub fn lines_per_page(&self) -> usize {
        let printable = self.page_height_mm - 2.0 * self.margin_mm;
        ((printable / self.line_height_mm).floor() as usize).max(1)
    }
}

impl Default for PdfSettings {
    fn default() -> Self {
        // A4 portrait
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 10.0,
            line_height_mm: 10.0,
            font_size: 12.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// Application settings for the running session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    pub window_size: WindowSize,
    /// Font applied to a fresh session
    pub font: FontSetting,
    pub ai: AiSettings,
    pub pdf: PdfSettings,
}

impl Settings {
    pub const MIN_WINDOW_SIZE: f32 = 400.0;
    pub const MAX_WINDOW_SIZE: f32 = 10000.0;

    /// Sanitize settings by clamping values to valid ranges.
    pub fn sanitize(&mut self) {
        self.window_size.width = self
            .window_size
            .width
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);
        self.window_size.height = self
            .window_size
            .height
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);

        self.font.size = self
            .font
            .size
            .clamp(FontSetting::MIN_SIZE, FontSetting::MAX_SIZE);

        // Margins must leave a printable area
        let half_width = self.pdf.page_width_mm / 2.0 - 1.0;
        self.pdf.margin_mm = self.pdf.margin_mm.clamp(0.0, half_width.max(0.0));
        if self.pdf.line_height_mm <= 0.0 {
            self.pdf.line_height_mm = PdfSettings::default().line_height_mm;
        }
        if self.pdf.font_size <= 0.0 {
            self.pdf.font_size = PdfSettings::default().font_size;
        }

        while self.ai.base_url.ends_with('/') {
            self.ai.base_url.pop();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.window_size.width, 1200.0);
        assert_eq!(settings.window_size.height, 800.0);
        assert_eq!(settings.font, FontSetting::default());
        assert_eq!(settings.ai.temperature, 1.0);
        assert_eq!(settings.ai.max_tokens, 256);
        assert_eq!(settings.ai.top_p, 1.0);
        assert_eq!(settings.ai.frequency_penalty, 0.0);
        assert_eq!(settings.ai.presence_penalty, 0.0);
    }

    #[test]
    fn test_font_setting_validation() {
        assert!(FontSetting::new("Courier", 14).is_some());
        assert!(FontSetting::new("", 14).is_none());
        assert!(FontSetting::new("   ", 14).is_none());
        assert!(FontSetting::new("Arial", 0).is_none());
        assert!(FontSetting::new("Arial", 101).is_none());
        assert!(FontSetting::new("Arial", 100).is_some());
    }

    #[test]
    fn test_font_setting_trims_family() {
        let font = FontSetting::new("  Georgia ", 20).unwrap();
        assert_eq!(font.family, "Georgia");
        assert_eq!(font.points(), 20.0);
    }

    #[test]
    fn test_font_family_mapping() {
        let mono = FontSetting::new("JetBrains Mono", 12).unwrap();
        assert_eq!(mono.egui_family(), FontFamily::Monospace);
        let courier = FontSetting::new("Courier New", 12).unwrap();
        assert_eq!(courier.egui_family(), FontFamily::Monospace);
        let arial = FontSetting::new("Arial", 12).unwrap();
        assert_eq!(arial.egui_family(), FontFamily::Proportional);
    }

    #[test]
    fn test_pdf_layout_metrics() {
        let pdf = PdfSettings::default();
        assert_eq!(pdf.printable_width_mm(), 190.0);
        // 277mm printable / 10mm
        assert_eq!(pdf.lines_per_page(), 27);
    }

    #[test]
    fn test_sanitize_clamps_values() {
        let mut settings = Settings::default();
        settings.window_size.width = 10.0;
        settings.font.size = 500;
        settings.pdf.line_height_mm = 0.0;
        settings.ai.base_url = "http://localhost:8080/v1//".to_string();
        settings.sanitize();

        assert_eq!(settings.window_size.width, Settings::MIN_WINDOW_SIZE);
        assert_eq!(settings.font.size, FontSetting::MAX_SIZE);
        assert_eq!(settings.pdf.line_height_mm, 10.0);
        assert_eq!(settings.ai.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_settings_serialize_has_no_credential() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("gpt-4"));
        assert!(!json.to_lowercase().contains("api_key"));
    }
}
