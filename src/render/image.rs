//! # Image Preparation
//!
//! Decodes user-supplied images and converts them into a monochrome
//! [`Bitmap`] ready for raster encoding: rotate, fit to the print head,
//! reduce grayscale to black/white.
//!
//! ## Pipeline
//!
//! ```text
//! bytes ──decode──► DynamicImage ──rotate──► ──resize──► ──binarize──► Bitmap
//! ```
//!
//! Resizing preserves aspect ratio. Images wider than the head are always
//! scaled down to fit; narrower images keep their native size unless
//! `scale_to_width` is set (full-bleed photos want it, small logos don't).
//!
//! Binarization defaults to a plain luminance threshold, which keeps line
//! art and pre-dithered logos crisp. Photographic input should opt into
//! [`Dithering::Bayer`] for tonal gradients.

use image::{imageops::FilterType, DynamicImage};
use log::debug;

use crate::error::ReciboError;
use crate::printer::PrinterConfig;
use crate::protocol::text::Rotation;

use super::dither::{prints_black, should_print, Dithering};
use super::Bitmap;

/// Options for preparing an image for print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageOptions {
    /// Rotate before fitting to the head.
    pub rotation: Rotation,
    /// Grayscale reduction strategy.
    pub dither: Dithering,
    /// Scale narrower images up to the full printable width.
    pub scale_to_width: bool,
}

/// Decode an image from a file on disk.
pub fn load_path(path: &str) -> Result<DynamicImage, ReciboError> {
    image::open(path).map_err(|e| ReciboError::Encoding(format!("failed to decode {path}: {e}")))
}

/// Decode an image from an in-memory buffer (PNG, JPEG, GIF, BMP, WebP).
pub fn load_bytes(bytes: &[u8]) -> Result<DynamicImage, ReciboError> {
    image::load_from_memory(bytes)
        .map_err(|e| ReciboError::Encoding(format!("failed to decode image: {e}")))
}

/// Prepare a decoded image for printing.
///
/// Never fails: any decodable image reduces to some monochrome bitmap no
/// wider than the head.
pub fn render(image: DynamicImage, options: &ImageOptions, config: &PrinterConfig) -> Bitmap {
    // Rotate first so the fit happens in the final orientation.
    let rotated = match options.rotation {
        Rotation::None => image,
        Rotation::Cw90 => image.rotate90(),
        Rotation::Flip180 => image.rotate180(),
        Rotation::Cw270 => image.rotate270(),
    };

    let target_width = config.width_dots as u32;
    let resized = if rotated.width() > target_width || options.scale_to_width {
        let aspect_ratio = rotated.height() as f32 / rotated.width() as f32;
        let target_height = ((target_width as f32 * aspect_ratio).round() as u32).max(1);
        debug!(
            "resizing image {}x{} -> {}x{}",
            rotated.width(),
            rotated.height(),
            target_width,
            target_height
        );
        rotated.resize(target_width, target_height, FilterType::Lanczos3)
    } else {
        rotated
    };

    binarize(&resized, options.dither)
}

/// Reduce a grayscale image to black/white dots.
fn binarize(image: &DynamicImage, dither: Dithering) -> Bitmap {
    let gray = image.to_luma8();
    let mut bitmap = Bitmap::new(gray.width(), gray.height());

    for y in 0..gray.height() {
        for x in 0..gray.width() {
            let luma = gray.get_pixel(x, y)[0];
            let black = match dither {
                Dithering::Threshold => prints_black(luma, luma, luma),
                Dithering::Bayer => should_print(x, y, 1.0 - luma as f32 / 255.0),
            };
            bitmap.set(x, y, black);
        }
    }

    bitmap
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, RgbImage};

    fn config() -> PrinterConfig {
        PrinterConfig::MINI58
    }

    fn solid_image(width: u32, height: u32, value: u8) -> DynamicImage {
        let mut img = RgbImage::new(width, height);
        for y in 0..height {
            for x in 0..width {
                img.put_pixel(x, y, Rgb([value, value, value]));
            }
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_load_bytes_rejects_garbage() {
        let err = load_bytes(&[0x00, 0x01, 0x02, 0x03]).unwrap_err();
        assert!(matches!(err, ReciboError::Encoding(_)));
    }

    #[test]
    fn test_load_bytes_decodes_png() {
        let mut png = Vec::new();
        let img = image::GrayImage::from_pixel(3, 3, Luma([0]));
        image::DynamicImage::ImageLuma8(img)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let decoded = load_bytes(&png).unwrap();
        assert_eq!(decoded.width(), 3);
        assert_eq!(decoded.height(), 3);
    }

    #[test]
    fn test_narrow_image_keeps_native_size() {
        let bitmap = render(solid_image(100, 40, 0), &ImageOptions::default(), &config());
        assert_eq!(bitmap.width(), 100);
        assert_eq!(bitmap.height(), 40);
    }

    #[test]
    fn test_wide_image_downscales_to_head() {
        let bitmap = render(solid_image(768, 200, 0), &ImageOptions::default(), &config());
        assert_eq!(bitmap.width(), 384);
        assert_eq!(bitmap.height(), 100);
    }

    #[test]
    fn test_scale_to_width_upscales() {
        let options = ImageOptions { scale_to_width: true, ..Default::default() };
        let bitmap = render(solid_image(96, 48, 0), &options, &config());
        assert_eq!(bitmap.width(), 384);
        assert_eq!(bitmap.height(), 192);
    }

    #[test]
    fn test_rotation_quarter_turn_swaps_dimensions() {
        let options = ImageOptions { rotation: Rotation::Cw90, ..Default::default() };
        let bitmap = render(solid_image(100, 60, 0), &options, &config());
        assert_eq!(bitmap.width(), 60);
        assert_eq!(bitmap.height(), 100);
    }

    #[test]
    fn test_threshold_black_and_white() {
        let black = render(solid_image(8, 8, 0), &ImageOptions::default(), &config());
        let white = render(solid_image(8, 8, 255), &ImageOptions::default(), &config());
        assert!(black.get(0, 0) && black.get(7, 7));
        assert!(!white.get(0, 0) && !white.get(7, 7));
    }

    #[test]
    fn test_threshold_midpoint() {
        // luminance 127 prints, 128 does not
        let dark = render(solid_image(4, 4, 127), &ImageOptions::default(), &config());
        let light = render(solid_image(4, 4, 128), &ImageOptions::default(), &config());
        assert!(dark.get(0, 0));
        assert!(!light.get(0, 0));
    }

    #[test]
    fn test_bayer_renders_midtone_as_mix() {
        let options = ImageOptions { dither: Dithering::Bayer, ..Default::default() };
        let bitmap = render(solid_image(16, 16, 128), &options, &config());
        let black: u32 = bitmap.packed_rows().iter().map(|b| b.count_ones()).sum();
        // ~50% gray should dither to roughly half the dots
        assert!(black > 64 && black < 192, "black dot count {black}");
    }

    #[test]
    fn test_deterministic() {
        let options = ImageOptions { dither: Dithering::Bayer, ..Default::default() };
        let a = render(solid_image(64, 64, 90), &options, &config());
        let b = render(solid_image(64, 64, 90), &options, &config());
        assert_eq!(a, b);
    }
}
