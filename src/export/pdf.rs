//! PDF export for Quillpad
//!
//! The document is laid out as plain text in the built-in Helvetica font, one
//! column, word-wrapped by measured glyph widths to the printable width and
//! split into fixed-height pages. There is no styling and no title. Text the
//! font cannot encode is refused rather than silently dropped.

use crate::config::PdfSettings;
use crate::error::{Error, Result};
use crate::export::helvetica::{advance, char_units, mm_to_units, text_units};
use log::info;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::path::Path;

/// Lines of text for each page. Always holds at least one (possibly empty) page.
pub type Pages = Vec<Vec<String>>;

// ─────────────────────────────────────────────────────────────────────────────
// Layout
// ─────────────────────────────────────────────────────────────────────────────

/// Wrap one paragraph (no newlines) so no line is wider than `max_units`
/// (1/1000 em).
///
/// Breaks at spaces where possible and hard-splits words longer than a line.
fn wrap_paragraph(paragraph: &str, max_units: u32, out: &mut Vec<String>) {
    let space = char_units(' ');
    let mut line = String::new();
    let mut line_units = 0;
    let mut started = false;

    for word in paragraph.split(' ') {
        let mut word = word.to_string();
        let mut word_units = text_units(&word);

        // Hard split words that can never fit
        while word_units > max_units {
            if started {
                finish_line(&mut line, out);
                line_units = 0;
                started = false;
            }
            let rest = word.split_off(fitting_prefix(&word, max_units));
            out.push(word);
            word = rest;
            word_units = text_units(&word);
        }

        if started && line_units + space + word_units > max_units {
            finish_line(&mut line, out);
            line_units = 0;
            started = false;
        }
        if started {
            line.push(' ');
            line_units += space;
        }
        line.push_str(&word);
        line_units += word_units;
        started = true;
    }

    out.push(line);
}

fn finish_line(line: &mut String, out: &mut Vec<String>) {
    if !line.is_empty() {
        out.push(std::mem::take(line));
    }
}

/// Byte length of the longest prefix of `word` that fits in `max_units`.
/// Always takes at least one character.
fn fitting_prefix(word: &str, max_units: u32) -> usize {
    let mut used = 0;
    let mut end = 0;
    for (index, c) in word.char_indices() {
        used += char_units(c);
        if used > max_units && index > 0 {
            break;
        }
        end = index + c.len_utf8();
    }
    end
}

/// Tabs become four spaces, a no-break space becomes a space and soft
/// hyphens are dropped.
fn normalize(paragraph: &str) -> String {
    let mut out = String::with_capacity(paragraph.len());
    for c in paragraph.chars() {
        match c {
            '\t' => out.push_str("    "),
            '\u{a0}' => out.push(' '),
            '\u{ad}' => {}
            c => out.push(c),
        }
    }
    out
}

/// Wrap `text` into printed lines no wider than `max_width_mm` when set in
/// Helvetica at `font_size` points.
pub fn wrap_text(text: &str, max_width_mm: f32, font_size: f32) -> Vec<String> {
    let mut lines = Vec::new();
    if text.is_empty() {
        return lines;
    }
    let max_units = mm_to_units(max_width_mm, font_size);
    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        wrap_paragraph(&normalize(paragraph), max_units, &mut lines);
    }
    lines
}

/// Split `text` into pages according to the page geometry.
pub fn paginate(text: &str, settings: &PdfSettings) -> Pages {
    let lines = wrap_text(text, settings.printable_width_mm(), settings.font_size);
    let per_page = settings.lines_per_page();

    let mut pages: Pages = lines.chunks(per_page).map(|chunk| chunk.to_vec()).collect();
    if pages.is_empty() {
        pages.push(Vec::new());
    }
    pages
}

/// First character the built-in font cannot encode.
fn unsupported_char(text: &str) -> Option<char> {
    text.chars().find(|&c| {
        !matches!(c, '\n' | '\r' | '\t' | '\u{a0}' | '\u{ad}') && advance(c).is_none()
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Render `text` to PDF bytes.
pub fn render_pdf(text: &str, settings: &PdfSettings) -> std::result::Result<Vec<u8>, String> {
    if let Some(c) = unsupported_char(text) {
        return Err(format!(
            "the character {:?} (U+{:04X}) cannot be written with the built-in PDF font",
            c, c as u32
        ));
    }

    let pages = paginate(text, settings);
    let width = Mm(settings.page_width_mm);
    let height = Mm(settings.page_height_mm);

    let (doc, first_page, first_layer) = PdfDocument::new("", width, height, "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| e.to_string())?;

    let mut first = Some((first_page, first_layer));
    for lines in &pages {
        let (page, layer) = match first.take() {
            Some(indices) => indices,
            None => doc.add_page(width, height, "Layer 1"),
        };
        let layer = doc.get_page(page).get_layer(layer);

        for (row, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            // Baseline sits at the bottom of each line box
            let y = settings.page_height_mm
                - settings.margin_mm
                - settings.line_height_mm * (row as f32 + 1.0);
            layer.use_text(
                line.clone(),
                settings.font_size,
                Mm(settings.margin_mm),
                Mm(y),
                &font,
            );
        }
    }

    doc.save_to_bytes().map_err(|e| e.to_string())
}

/// Export `text` as a PDF file at `path`.
pub fn export_pdf(text: &str, path: &Path, settings: &PdfSettings) -> Result<()> {
    let bytes = render_pdf(text, settings).map_err(|message| Error::PdfExport {
        path: path.to_path_buf(),
        message,
    })?;

    std::fs::write(path, &bytes).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!("Exported PDF: {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::helvetica::{text_width_mm, units_to_mm};
    use tempfile::TempDir;

    const SIZE: f32 = 12.0;

    /// Millimetres taken by `units` thousandths of an em.
    fn em(units: u32) -> f32 {
        units_to_mm(units, SIZE)
    }

    fn assert_within(lines: &[String], settings: &PdfSettings) {
        let printable = settings.page_width_mm - 2.0 * settings.margin_mm;
        for line in lines {
            let right_edge = settings.margin_mm + text_width_mm(line, settings.font_size);
            assert!(
                right_edge <= settings.page_width_mm - settings.margin_mm + 1e-3,
                "{:?} is {}mm wide, printable width is {}mm",
                line,
                right_edge - settings.margin_mm,
                printable
            );
        }
    }

    #[test]
    fn test_wrap_short_text() {
        assert_eq!(wrap_text("hello world", em(20_000), SIZE), vec!["hello world"]);
    }

    #[test]
    fn test_wrap_breaks_at_spaces() {
        // "the quick" is 4.002 em, "the quick brown" 7.003 em
        assert_eq!(
            wrap_text("the quick brown fox", em(5000), SIZE),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn test_wrap_hard_splits_long_words() {
        assert_eq!(
            wrap_text("abcdefghij", em(2200), SIZE),
            vec!["abcd", "efghi", "j"]
        );
        assert_eq!(
            wrap_text("hi abcdefgh", em(2200), SIZE),
            vec!["hi", "abcd", "efgh"]
        );
    }

    #[test]
    fn test_wrap_measures_glyph_widths() {
        // Same character count, very different widths
        let narrow = "iiii ".repeat(40);
        let wide = "WWWW ".repeat(40);
        let width = em(40_000);
        assert!(wrap_text(&narrow, width, SIZE).len() < wrap_text(&wide, width, SIZE).len());
    }

    #[test]
    fn test_wide_capitals_stay_inside_margins() {
        let settings = PdfSettings::default();
        let lines = wrap_text(
            &"WWWW ".repeat(40),
            settings.printable_width_mm(),
            settings.font_size,
        );
        assert!(lines.len() > 1);
        assert_within(&lines, &settings);
    }

    #[test]
    fn test_hard_split_capitals_stay_inside_margins() {
        let settings = PdfSettings::default();
        let text = format!("{}\n{} end", "M".repeat(300), "Æ".repeat(120));
        let pages = paginate(&text, &settings);
        let lines: Vec<String> = pages.into_iter().flatten().collect();
        assert!(lines.len() >= 4);
        assert_within(&lines, &settings);
    }

    #[test]
    fn test_wrap_keeps_blank_lines() {
        assert_eq!(wrap_text("a\n\nb", em(10_000), SIZE), vec!["a", "", "b"]);
        assert_eq!(wrap_text("a\r\nb\n", em(10_000), SIZE), vec!["a", "b", ""]);
    }

    #[test]
    fn test_wrap_expands_tabs() {
        assert_eq!(wrap_text("\tx", em(10_000), SIZE), vec!["    x"]);
        assert_eq!(wrap_text("a\u{a0}b", em(10_000), SIZE), vec!["a b"]);
    }

    #[test]
    fn test_wrap_empty_text() {
        assert!(wrap_text("", em(10_000), SIZE).is_empty());
    }

    #[test]
    fn test_paginate_empty_is_single_blank_page() {
        let pages = paginate("", &PdfSettings::default());
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn test_paginate_splits_pages() {
        let settings = PdfSettings::default();
        let per_page = settings.lines_per_page();
        let text = vec!["line"; per_page + 1].join("\n");
        let pages = paginate(&text, &settings);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), per_page);
        assert_eq!(pages[1], vec!["line".to_string()]);
    }

    #[test]
    fn test_render_empty_document() {
        let bytes = render_pdf("", &PdfSettings::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_accepts_western_text() {
        let text = "Café crème, naïve façade \u{2014} 5\u{20ac}\t\u{201c}quoted\u{201d}\r\n";
        let bytes = render_pdf(text, &PdfSettings::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_refuses_unencodable_text() {
        let message = render_pdf("smile \u{1f600}", &PdfSettings::default()).unwrap_err();
        assert!(message.contains("U+1F600"), "{}", message);
        assert!(render_pdf("\u{3a9} ohm", &PdfSettings::default()).is_err());
    }

    #[test]
    fn test_export_pdf_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.pdf");
        export_pdf("Hello PDF\nSecond line", &path, &PdfSettings::default()).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_export_pdf_unencodable_text_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("emoji.pdf");
        let err = export_pdf("smile \u{1f600}", &path, &PdfSettings::default()).unwrap_err();
        assert!(matches!(err, Error::PdfExport { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_export_pdf_bad_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.pdf");
        let err = export_pdf("text", &path, &PdfSettings::default()).unwrap_err();
        assert!(matches!(err, Error::FileWrite { .. }));
    }
}
