//! Helvetica glyph metrics for PDF layout.
//!
//! Widths are the standard Helvetica AFM advance widths in 1/1000 em, for the
//! characters the built-in font can encode (WinAnsi).

/// Millimetres per typographic point.
const MM_PER_POINT: f32 = 25.4 / 72.0;

/// Printable ASCII, `' '` to `'~'`.
const ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Latin-1 supplement, U+00A0 to U+00FF.
const LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, //
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, //
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, //
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, //
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, //
];

/// Advance width of `c` in 1/1000 em, or `None` if the built-in font has no
/// code for it.
pub fn advance(c: char) -> Option<u16> {
    let width = match c {
        ' '..='~' => ASCII[c as usize - 0x20],
        // No-break space and soft hyphen have no WinAnsi code of their own
        '\u{a0}' | '\u{ad}' => return None,
        '\u{a1}'..='\u{ff}' => LATIN1[c as usize - 0xa0],
        '€' | 'ƒ' | '†' | '‡' => 556,
        '‚' | '‘' | '’' => 222,
        '„' | '“' | '”' | 'ˆ' | '‹' | '›' | '˜' => 333,
        '…' | '‰' | 'Œ' | '—' | '™' => 1000,
        '–' => 556,
        '•' => 350,
        'Š' | 'Ÿ' => 667,
        'Ž' => 611,
        'š' | 'ž' => 500,
        'œ' => 944,
        _ => return None,
    };
    Some(width)
}

/// Width of `c` in 1/1000 em. Characters without a code count as a full em.
pub fn char_units(c: char) -> u32 {
    u32::from(advance(c).unwrap_or(1000))
}

/// Width of `text` in 1/1000 em.
pub fn text_units(text: &str) -> u32 {
    text.chars().map(char_units).sum()
}

/// Convert a width in 1/1000 em to millimetres at `font_size` points.
#[cfg(test)]
pub fn units_to_mm(units: u32, font_size: f32) -> f32 {
    units as f32 / 1000.0 * font_size * MM_PER_POINT
}

/// The largest width in 1/1000 em that fits in `mm` at `font_size` points.
pub fn mm_to_units(mm: f32, font_size: f32) -> u32 {
    let em = font_size * MM_PER_POINT;
    if em <= 0.0 || mm <= 0.0 {
        return 0;
    }
    (mm / em * 1000.0).floor() as u32
}

/// Width of `text` in millimetres at `font_size` points.
#[cfg(test)]
pub fn text_width_mm(text: &str, font_size: f32) -> f32 {
    units_to_mm(text_units(text), font_size)
}
