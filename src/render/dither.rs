//! # Grayscale to Binary Conversion
//!
//! Thermal printers burn a dot or they don't: every gray pixel has to become
//! black or white before it reaches the wire. This module provides the two
//! reductions used by the renderers, plus MSB-first row packing.
//!
//! ## Luminance Threshold
//!
//! The default reduction for text, QR codes and line art: perceptual
//! luminance (ITU-R BT.601 weights `0.299 R + 0.587 G + 0.114 B`) compared
//! against a fixed midpoint of 128. Below the threshold prints black. Crisp
//! edges, no halftone pattern.
//!
//! ## Bayer 8x8 Ordered Dithering
//!
//! For photographic input a plain threshold destroys midtones, so an ordered
//! dither is available. For each pixel position (x, y):
//!
//! 1. Look up a threshold from the Bayer matrix using (x mod 8, y mod 8)
//! 2. Compare the pixel's intensity to the threshold
//! 3. If intensity > threshold, print black; otherwise leave white
//!
//! ```text
//!     0   1   2   3   4   5   6   7   (x mod 8)
//!   ┌───┬───┬───┬───┬───┬───┬───┬───┐
//! 0 │ 0 │32 │ 8 │40 │ 2 │34 │10 │42 │
//!   ├───┼───┼───┼───┼───┼───┼───┼───┤
//! 1 │48 │16 │56 │24 │50 │18 │58 │26 │
//!   ├───┼───┼───┼───┼───┼───┼───┼───┤
//! 2 │12 │44 │ 4 │36 │14 │46 │ 6 │38 │
//!   ├───┼───┼───┼───┼───┼───┼───┼───┤
//! 3 │60 │28 │52 │20 │62 │30 │54 │22 │
//!   ├───┼───┼───┼───┼───┼───┼───┼───┤
//! 4 │ 3 │35 │11 │43 │ 1 │33 │ 9 │41 │
//!   ├───┼───┼───┼───┼───┼───┼───┼───┤
//! 5 │51 │19 │59 │27 │49 │17 │57 │25 │
//!   ├───┼───┼───┼───┼───┼───┼───┼───┤
//! 6 │15 │47 │ 7 │39 │13 │45 │ 5 │37 │
//!   ├───┼───┼───┼───┼───┼───┼───┼───┤
//! 7 │63 │31 │55 │23 │61 │29 │53 │21 │
//!   └───┴───┴───┴───┴───┴───┴───┴───┘
//! (y mod 8)
//! ```
//!
//! Values range 0-63, normalized to (0, 1) by `(value + 0.5) / 64`. The
//! dither is deterministic and accumulates no error, so identical input
//! always produces identical output.

/// Midpoint luminance: pixels darker than this print black.
pub const LUMA_THRESHOLD: u8 = 128;

/// Bayer 8x8 dithering matrix, values 0-63.
pub const BAYER8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Binarization strategy for grayscale input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dithering {
    /// Fixed midpoint threshold (text, line art, QR)
    #[default]
    Threshold,
    /// Bayer 8x8 ordered dither (photos)
    Bayer,
}

/// Perceptual luminance of an RGB pixel (ITU-R BT.601 weights).
///
/// Integer arithmetic: the weights sum to exactly 1000, so white maps to
/// 255 and the reduction is bit-identical across platforms.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}

/// Whether an RGB pixel prints black under the plain threshold.
///
/// ## Example
///
/// ```
/// use recibo::render::dither::prints_black;
///
/// assert!(prints_black(0, 0, 0));       // black ink
/// assert!(!prints_black(255, 255, 255)); // white paper
/// assert!(prints_black(255, 0, 0));      // red is dark (luma 76)
/// ```
#[inline]
pub fn prints_black(r: u8, g: u8, b: u8) -> bool {
    luminance(r, g, b) < LUMA_THRESHOLD
}

/// Dithering threshold for a pixel position, in (0, 1).
///
/// `(matrix + 0.5) / 64` keeps the extremes honest: full black
/// (intensity 1.0) always prints, full white (0.0) never does.
#[inline]
pub fn bayer_threshold(x: u32, y: u32) -> f32 {
    let matrix_value = BAYER8[(y & 7) as usize][(x & 7) as usize];
    (matrix_value as f32 + 0.5) / 64.0
}

/// Whether a dot should print at (x, y) for a given intensity
/// (0.0 = white, 1.0 = black) under Bayer dithering.
#[inline]
pub fn should_print(x: u32, y: u32, intensity: f32) -> bool {
    intensity > bayer_threshold(x, y)
}

/// Pack a row of pixels (true = black) into bytes, MSB first.
///
/// Bit 7 of each byte is the leftmost pixel. Rows that are not a multiple
/// of 8 wide are padded with white on the right.
///
/// ## Example
///
/// ```
/// use recibo::render::dither::pack_row;
///
/// let row = [true, true, true, true, false, false, false, false];
/// assert_eq!(pack_row(&row), vec![0xF0]); // 11110000
///
/// let row = [true; 12];
/// assert_eq!(pack_row(&row), vec![0xFF, 0xF0]);
/// ```
pub fn pack_row(pixels: &[bool]) -> Vec<u8> {
    let num_bytes = pixels.len().div_ceil(8);
    let mut bytes = vec![0u8; num_bytes];

    for (i, &pixel) in pixels.iter().enumerate() {
        if pixel {
            let byte_idx = i / 8;
            let bit_idx = 7 - (i % 8); // MSB first
            bytes[byte_idx] |= 1 << bit_idx;
        }
    }

    bytes
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bayer_matrix_values() {
        // Matrix contains every value 0-63 exactly once
        let mut seen = [false; 64];
        for row in &BAYER8 {
            for &val in row {
                assert!(val < 64, "matrix value {} out of range", val);
                assert!(!seen[val as usize], "duplicate value {}", val);
                seen[val as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_luminance_weights() {
        assert_eq!(luminance(0, 0, 0), 0);
        assert_eq!(luminance(255, 255, 255), 255);
        assert_eq!(luminance(255, 0, 0), 76);
        assert_eq!(luminance(0, 255, 0), 149);
        assert_eq!(luminance(0, 0, 255), 29);
    }

    #[test]
    fn test_threshold_midpoint() {
        assert!(prints_black(127, 127, 127));
        assert!(!prints_black(128, 128, 128));
    }

    #[test]
    fn test_bayer_threshold_range() {
        for y in 0..8 {
            for x in 0..8 {
                let t = bayer_threshold(x, y);
                assert!(t > 0.0 && t < 1.0, "threshold at ({},{}) = {}", x, y, t);
            }
        }
    }

    #[test]
    fn test_bayer_threshold_periodicity() {
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(bayer_threshold(x, y), bayer_threshold(x + 8, y));
                assert_eq!(bayer_threshold(x, y), bayer_threshold(x, y + 8));
            }
        }
    }

    #[test]
    fn test_black_always_prints_white_never() {
        for y in 0..16 {
            for x in 0..16 {
                assert!(should_print(x, y, 1.0));
                assert!(!should_print(x, y, 0.0));
            }
        }
    }

    #[test]
    fn test_gray_distribution() {
        // 50% gray prints roughly half the dots in an 8x8 tile
        let mut count = 0;
        for y in 0..8 {
            for x in 0..8 {
                if should_print(x, y, 0.5) {
                    count += 1;
                }
            }
        }
        assert!((28..=36).contains(&count), "~32 dots expected, got {count}");
    }

    #[test]
    fn test_pack_row_8_pixels() {
        assert_eq!(pack_row(&[true; 8]), vec![0xFF]);
        assert_eq!(pack_row(&[false; 8]), vec![0x00]);
        assert_eq!(
            pack_row(&[true, false, true, false, true, false, true, false]),
            vec![0xAA]
        );
    }

    #[test]
    fn test_pack_row_padding() {
        assert_eq!(pack_row(&[true, true, true, true]), vec![0xF0]);

        let packed = pack_row(&[true; 9]);
        assert_eq!(packed, vec![0xFF, 0x80]);
    }

    #[test]
    fn test_pack_row_empty() {
        assert_eq!(pack_row(&[]), Vec::<u8>::new());
    }
}
