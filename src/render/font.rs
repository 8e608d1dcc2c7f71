//! Glyph generation for the raster text path.
//!
//! Uses the Spleen bitmap font family, mapping each ESC/POS font to the
//! nearest Spleen cell. Font A matches the firmware cell exactly, so
//! unscaled raster text lines up column-for-column with native output:
//!
//! | ESC/POS font | Firmware cell | Spleen |
//! |--------------|---------------|--------|
//! | A | 12×24 | 12x24 |
//! | B | 9×17 | 8x16 |
//! | C | 9×24 | 6x12 |

use crate::protocol::text::Font;
use spleen_font::{FONT_6X12, FONT_8X16, FONT_12X24, PSF2Font};

/// Cell dimensions for each font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    pub char_width: u32,
    pub char_height: u32,
}

impl FontMetrics {
    pub const FONT_A: FontMetrics = FontMetrics { char_width: 12, char_height: 24 };
    pub const FONT_B: FontMetrics = FontMetrics { char_width: 8, char_height: 16 };
    pub const FONT_C: FontMetrics = FontMetrics { char_width: 6, char_height: 12 };

    pub fn for_font(font: Font) -> FontMetrics {
        match font {
            Font::A => Self::FONT_A,
            Font::B => Self::FONT_B,
            Font::C => Self::FONT_C,
        }
    }

    /// How many unscaled cells fit on a line of the given dot width.
    pub fn chars_per_line(&self, width_dots: u32) -> u32 {
        width_dots / self.char_width
    }
}

fn font_data(font: Font) -> &'static [u8] {
    match font {
        Font::A => FONT_12X24,
        Font::B => FONT_8X16,
        Font::C => FONT_6X12,
    }
}

/// Render a character at the font's native cell size.
///
/// Returns a row-major buffer of `char_width * char_height` bytes,
/// 1 = black. Characters missing from the font draw a hollow box.
pub fn glyph(font: Font, ch: char) -> Vec<u8> {
    let metrics = FontMetrics::for_font(font);
    let w = metrics.char_width as usize;
    let h = metrics.char_height as usize;
    let mut out = vec![0u8; w * h];

    let mut spleen = PSF2Font::new(font_data(font)).unwrap();
    let utf8 = ch.to_string();

    if let Some(rows) = spleen.glyph_for_utf8(utf8.as_bytes()) {
        for (y, row) in rows.enumerate() {
            for (x, on) in row.enumerate() {
                let idx = y * w + x;
                if on && idx < out.len() {
                    out[idx] = 1;
                }
            }
        }
    } else {
        draw_box(&mut out, w, h);
    }

    out
}

/// Render a character scaled to an arbitrary cell.
///
/// The font's native glyph is resampled with nearest-neighbor, so the
/// output is deterministic and stays crisp at integer multiples.
pub fn glyph_scaled(font: Font, ch: char, cell_w: u32, cell_h: u32) -> Vec<u8> {
    let metrics = FontMetrics::for_font(font);
    if cell_w == metrics.char_width && cell_h == metrics.char_height {
        return glyph(font, ch);
    }

    let src = glyph(font, ch);
    let mut dst = vec![0u8; (cell_w * cell_h) as usize];
    scale_bitmap(
        &src,
        metrics.char_width as usize,
        metrics.char_height as usize,
        &mut dst,
        cell_w as usize,
        cell_h as usize,
    );
    dst
}

/// Nearest-neighbor resample between row-major byte buffers.
fn scale_bitmap(src: &[u8], src_w: usize, src_h: usize, dst: &mut [u8], dst_w: usize, dst_h: usize) {
    if dst_w == 0 || dst_h == 0 {
        return;
    }
    for dy in 0..dst_h {
        for dx in 0..dst_w {
            let sx = dx * src_w / dst_w;
            let sy = dy * src_h / dst_h;
            let src_idx = sy * src_w + sx;
            let dst_idx = dy * dst_w + dx;
            if src_idx < src.len() && dst_idx < dst.len() {
                dst[dst_idx] = src[src_idx];
            }
        }
    }
}

/// Hollow box outline for characters the font does not cover.
fn draw_box(glyph: &mut [u8], width: usize, height: usize) {
    for x in 0..width {
        glyph[x] = 1;
        glyph[(height - 1) * width + x] = 1;
    }
    for y in 0..height {
        glyph[y * width] = 1;
        glyph[y * width + width - 1] = 1;
    }
}
