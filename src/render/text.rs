//! # Text Rasterization
//!
//! Renders styled text into a [`Bitmap`] for the cases native ESC/POS
//! formatting cannot express: glyphs outside the firmware charset, style
//! combinations that collide on shared registers, pixel-accurate sizes
//! between multiplier steps, rotated proportional layouts.
//!
//! ## Sizing
//!
//! Requested sizes are treated as points and converted through the head
//! resolution with an empirical scale factor:
//!
//! ```text
//! px = pt × (203 / 72) × 0.85
//! ```
//!
//! The 0.85 factor is tuned so a "12" request comes out visually level with
//! the printer's native Font A output. Without an explicit size the text
//! renders at the font's exact native cell, which keeps unscaled glyphs
//! bit-identical to the Spleen sources.
//!
//! ## Layout
//!
//! Greedy word-wrap against the printable width minus 4 dots of padding on
//! each side, per-line alignment, letter spacing as extra advance
//! (`spacing − 1.0` em), line spacing as a height multiplier. Output is
//! fully deterministic for identical input.

use crate::error::ReciboError;
use crate::fontsize::SizeRequest;
use crate::printer::PrinterConfig;
use crate::protocol::text::{Alignment, Font, Rotation};

use super::font::{self, FontMetrics};
use super::Bitmap;

/// Blank dots around the rendered block on every side.
pub const DEFAULT_PADDING: u32 = 4;

/// Head resolution used for point conversion.
const DPI: f32 = 203.0;

/// Empirical factor matching bitmap sizes to native font output.
const FONT_SCALE: f32 = 0.85;

/// Convert a point size request to device pixels.
///
/// ## Example
///
/// ```
/// use recibo::render::text::point_to_pixel;
///
/// assert_eq!(point_to_pixel(12.0), 29);
/// assert_eq!(point_to_pixel(24.0), 58);
/// ```
pub fn point_to_pixel(pt: f32) -> u32 {
    (pt * (DPI / 72.0) * FONT_SCALE).round().max(1.0) as u32
}

// ============================================================================
// PRINT STYLE
// ============================================================================

/// Style attributes for one print call.
///
/// Built once per call from the caller's options; fields left alone keep
/// their defaults. Nothing here persists between calls — printer-side
/// state management is the dispatcher's job.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub double_strike: bool,
    /// White-on-black printing
    pub invert: bool,
    pub align: Alignment,
    pub font: Font,
    pub double_width: bool,
    pub double_height: bool,
    pub rotation: Rotation,
    /// Glyph advance multiplier, `1.0` = normal
    pub letter_spacing: f32,
    /// Line height multiplier, `1.0` = normal
    pub line_spacing: f32,
    /// Requested size; `None` keeps the font's native cell
    pub size: Option<SizeRequest>,
}

impl Default for PrintStyle {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
            double_strike: false,
            invert: false,
            align: Alignment::Left,
            font: Font::A,
            double_width: false,
            double_height: false,
            rotation: Rotation::None,
            letter_spacing: 1.0,
            line_spacing: 1.0,
            size: None,
        }
    }
}

// ============================================================================
// RASTERIZER
// ============================================================================

/// Render text with a style into a bitmap sized to the printer head.
///
/// ## Errors
///
/// `InvalidParameter` for empty (or whitespace-only) text and for
/// non-positive size requests; no bitmap is produced in either case.
pub fn render(
    text: &str,
    style: &PrintStyle,
    config: &PrinterConfig,
) -> Result<Bitmap, ReciboError> {
    if text.trim().is_empty() {
        return Err(ReciboError::InvalidParameter(
            "text must not be empty".into(),
        ));
    }

    let metrics = FontMetrics::for_font(style.font);

    // Cell geometry: native cell unless a size was requested, then the
    // aspect ratio of the native cell at the requested pixel height.
    let (mut cell_w, mut cell_h) = match style.size {
        None => (metrics.char_width, metrics.char_height),
        Some(request) => {
            let pt = request.pixel_size()? as f32;
            let h = point_to_pixel(pt);
            let w = (h * metrics.char_width).div_ceil(metrics.char_height).max(1);
            (w, h)
        }
    };
    if style.double_width {
        cell_w *= 2;
    }
    if style.double_height {
        cell_h *= 2;
    }

    // Advance = cell plus letter-spacing extra, never below one dot.
    let extra = ((style.letter_spacing - 1.0) * cell_w as f32).round() as i32;
    let advance = (cell_w as i32 + extra).max(1) as u32;
    let line_h = ((cell_h as f32 * style.line_spacing).round() as u32).max(1);

    let text_width = config.width_dots as u32 - 2 * DEFAULT_PADDING;
    let max_chars = (text_width / advance).max(1) as usize;

    let mut lines: Vec<Vec<char>> = Vec::new();
    for paragraph in text.split('\n') {
        lines.extend(wrap_paragraph(paragraph, max_chars));
    }

    let height = lines.len() as u32 * line_h + 2 * DEFAULT_PADDING;
    let mut bitmap = Bitmap::new(config.width_dots as u32, height);

    for (line_idx, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        // Span from the first cell's left edge to the last cell's right edge.
        let line_w = (line.len() as u32 - 1) * advance + cell_w;
        let x0 = DEFAULT_PADDING
            + match style.align {
                Alignment::Left => 0,
                Alignment::Center => text_width.saturating_sub(line_w) / 2,
                Alignment::Right => text_width.saturating_sub(line_w),
            };
        let y0 = DEFAULT_PADDING + line_idx as u32 * line_h;

        for (char_idx, &ch) in line.iter().enumerate() {
            let cx = x0 + char_idx as u32 * advance;
            draw_glyph(&mut bitmap, style, ch, cx, y0, cell_w, cell_h);
        }

        let rule_thickness = (cell_h / 16).max(1);
        if style.underline {
            fill_rule(&mut bitmap, x0, line_w, y0 + cell_h - rule_thickness, rule_thickness);
        }
        if style.strikethrough {
            let mid = y0 + cell_h / 2;
            fill_rule(&mut bitmap, x0, line_w, mid, rule_thickness);
        }
    }

    if style.invert {
        bitmap.invert();
    }

    Ok(bitmap.rotated(style.rotation))
}

/// Draw one glyph cell, applying bold smear, double-strike smear and
/// italic shear.
fn draw_glyph(
    bitmap: &mut Bitmap,
    style: &PrintStyle,
    ch: char,
    cx: u32,
    cy: u32,
    cell_w: u32,
    cell_h: u32,
) {
    let glyph = font::glyph_scaled(style.font, ch, cell_w, cell_h);

    for gy in 0..cell_h {
        // Italic leans the cell right with a ~1:4 slope, top rows first.
        let shear = if style.italic { (cell_h - 1 - gy) / 4 } else { 0 };
        for gx in 0..cell_w {
            if glyph[(gy * cell_w + gx) as usize] == 0 {
                continue;
            }
            let x = cx + gx + shear;
            let y = cy + gy;
            bitmap.set(x, y, true);
            if style.bold {
                bitmap.set(x + 1, y, true);
            }
            if style.double_strike {
                bitmap.set(x, y + 1, true);
                if style.bold {
                    bitmap.set(x + 1, y + 1, true);
                }
            }
        }
    }
}

fn fill_rule(bitmap: &mut Bitmap, x0: u32, width: u32, y0: u32, thickness: u32) {
    for y in y0..y0 + thickness {
        for x in x0..x0 + width {
            bitmap.set(x, y, true);
        }
    }
}

/// Greedy word wrap. Words longer than a line hard-break; a blank
/// paragraph yields one blank line.
fn wrap_paragraph(paragraph: &str, max_chars: usize) -> Vec<Vec<char>> {
    let mut lines: Vec<Vec<char>> = Vec::new();
    let mut current: Vec<char> = Vec::new();

    for word in paragraph.split_whitespace() {
        let word: Vec<char> = word.chars().collect();

        if word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            for chunk in word.chunks(max_chars) {
                if chunk.len() == max_chars {
                    lines.push(chunk.to_vec());
                } else {
                    current = chunk.to_vec();
                }
            }
            continue;
        }

        let needed = if current.is_empty() {
            word.len()
        } else {
            current.len() + 1 + word.len()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend_from_slice(&word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

// ============================================================================
// TESTS
// ============================================================================
