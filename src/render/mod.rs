//! # Rendering Module
//!
//! This module renders content that native printer commands cannot express —
//! styled text, images, software QR codes — into monochrome bitmaps ready
//! for the raster encoder.
//!
//! ## Modules
//!
//! - [`dither`]: luminance thresholding and Bayer 8x8 ordered dithering
//! - [`font`]: embedded PSF2 bitmap fonts (Spleen family)
//! - [`text`]: styled text layout and rasterization
//! - [`image`]: image file loading and binarization
//! - [`qr`]: software QR rendering for printers without `GS ( k`
//!
//! ## Usage Example
//!
//! ```
//! use recibo::render::Bitmap;
//!
//! let mut bitmap = Bitmap::new(16, 8);
//! bitmap.set(0, 0, true);
//! assert!(bitmap.get(0, 0));
//! assert_eq!(bitmap.packed_rows().len(), 2 * 8); // 2 bytes per row
//! ```

use crate::protocol::text::Rotation;

pub mod dither;
pub mod font;
pub mod image;
pub mod qr;
pub mod text;

pub use text::PrintStyle;

/// A monochrome pixel buffer, row-major, `true` = black dot.
///
/// Bitmaps are transient: produced by a renderer, consumed by the raster
/// encoder, dropped. Nothing caches them across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl Bitmap {
    /// Create an all-white bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; (width * height) as usize],
        }
    }

    /// Width in dots.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed row width in bytes (8 dots per byte, rounded up).
    pub fn width_bytes(&self) -> u32 {
        self.width.div_ceil(8)
    }

    /// Pixel at (x, y); out-of-bounds reads are white.
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y); out-of-bounds writes are dropped.
    pub fn set(&mut self, x: u32, y: u32, on: bool) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = on;
        }
    }

    /// Flip every pixel (white-on-black printing).
    pub fn invert(&mut self) {
        for px in &mut self.pixels {
            *px = !*px;
        }
    }

    /// Pack all rows MSB-first, `width_bytes() * height()` bytes total.
    /// Rows whose width is not a multiple of 8 are right-padded with white.
    pub fn packed_rows(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity((self.width_bytes() * self.height) as usize);
        for y in 0..self.height {
            let start = (y * self.width) as usize;
            let row = &self.pixels[start..start + self.width as usize];
            out.extend(dither::pack_row(row));
        }
        out
    }

    /// A copy rotated by the given amount. 90/270 swap the dimensions.
    pub fn rotated(&self, rotation: Rotation) -> Bitmap {
        match rotation {
            Rotation::None => self.clone(),
            Rotation::Cw90 => {
                let mut out = Bitmap::new(self.height, self.width);
                for y in 0..self.height {
                    for x in 0..self.width {
                        out.set(self.height - 1 - y, x, self.get(x, y));
                    }
                }
                out
            }
            Rotation::Flip180 => {
                let mut out = Bitmap::new(self.width, self.height);
                for y in 0..self.height {
                    for x in 0..self.width {
                        out.set(self.width - 1 - x, self.height - 1 - y, self.get(x, y));
                    }
                }
                out
            }
            Rotation::Cw270 => {
                let mut out = Bitmap::new(self.height, self.width);
                for y in 0..self.height {
                    for x in 0..self.width {
                        out.set(y, self.width - 1 - x, self.get(x, y));
                    }
                }
                out
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmap_dimensions() {
        let bitmap = Bitmap::new(384, 24);
        assert_eq!(bitmap.width(), 384);
        assert_eq!(bitmap.height(), 24);
        assert_eq!(bitmap.width_bytes(), 48);
    }

    #[test]
    fn test_width_bytes_rounds_up() {
        assert_eq!(Bitmap::new(1, 1).width_bytes(), 1);
        assert_eq!(Bitmap::new(8, 1).width_bytes(), 1);
        assert_eq!(Bitmap::new(9, 1).width_bytes(), 2);
    }

    #[test]
    fn test_set_get() {
        let mut bitmap = Bitmap::new(10, 10);
        assert!(!bitmap.get(3, 4));
        bitmap.set(3, 4, true);
        assert!(bitmap.get(3, 4));
        bitmap.set(3, 4, false);
        assert!(!bitmap.get(3, 4));
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut bitmap = Bitmap::new(4, 4);
        bitmap.set(100, 100, true);
        assert!(!bitmap.get(100, 100));
    }

    #[test]
    fn test_invert() {
        let mut bitmap = Bitmap::new(2, 1);
        bitmap.set(0, 0, true);
        bitmap.invert();
        assert!(!bitmap.get(0, 0));
        assert!(bitmap.get(1, 0));
    }

    #[test]
    fn test_packed_rows() {
        let mut bitmap = Bitmap::new(16, 2);
        // row 0: first 8 black, row 1: last 8 black
        for x in 0..8 {
            bitmap.set(x, 0, true);
            bitmap.set(x + 8, 1, true);
        }
        assert_eq!(bitmap.packed_rows(), vec![0xFF, 0x00, 0x00, 0xFF]);
    }

    #[test]
    fn test_packed_rows_pads_partial_bytes() {
        let mut bitmap = Bitmap::new(4, 1);
        bitmap.set(0, 0, true);
        bitmap.set(3, 0, true);
        // 1001 padded to 10010000
        assert_eq!(bitmap.packed_rows(), vec![0x90]);
    }

    #[test]
    fn test_rotate_90() {
        // 2x1 bitmap with left pixel black
        let mut bitmap = Bitmap::new(2, 1);
        bitmap.set(0, 0, true);

        let rotated = bitmap.rotated(Rotation::Cw90);
        assert_eq!(rotated.width(), 1);
        assert_eq!(rotated.height(), 2);
        assert!(rotated.get(0, 0));
        assert!(!rotated.get(0, 1));
    }

    #[test]
    fn test_rotate_180() {
        let mut bitmap = Bitmap::new(3, 2);
        bitmap.set(0, 0, true);
        let rotated = bitmap.rotated(Rotation::Flip180);
        assert_eq!(rotated.width(), 3);
        assert!(rotated.get(2, 1));
        assert!(!rotated.get(0, 0));
    }

    #[test]
    fn test_rotate_270_is_inverse_of_90() {
        let mut bitmap = Bitmap::new(5, 3);
        bitmap.set(1, 2, true);
        bitmap.set(4, 0, true);
        let round = bitmap.rotated(Rotation::Cw90).rotated(Rotation::Cw270);
        assert_eq!(round, bitmap);
    }
}
