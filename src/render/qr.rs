//! # QR Software Fallback
//!
//! Renders a QR symbol into a [`Bitmap`] for printers whose firmware lacks
//! the `GS ( k` two-dimensional barcode functions. The native command path
//! (see [`crate::protocol::barcode::qr`]) stays the default; this module
//! exists so older clone printers can still print scannable codes through
//! the raster pipeline.
//!
//! The symbol is drawn at `module_size` dots per module with the standard
//! 4-module quiet zone on all sides, positioned by alignment within the
//! full head width.

use qrcode::QrCode;

use crate::error::ReciboError;
use crate::printer::PrinterConfig;
use crate::protocol::barcode::qr::{EcLevel, QrOptions};
use crate::protocol::text::Alignment;

use super::Bitmap;

/// Quiet zone width in modules, per the QR specification.
const QUIET_ZONE_MODULES: u32 = 4;

fn ec_level(level: EcLevel) -> qrcode::EcLevel {
    match level {
        EcLevel::L => qrcode::EcLevel::L,
        EcLevel::M => qrcode::EcLevel::M,
        EcLevel::Q => qrcode::EcLevel::Q,
        EcLevel::H => qrcode::EcLevel::H,
    }
}

/// Render QR data into a head-width bitmap.
///
/// ## Errors
///
/// `InvalidParameter` for empty data or a module size outside 1–16;
/// `Encoding` when the data exceeds QR capacity at the requested error
/// correction level.
pub fn render(
    data: &str,
    options: &QrOptions,
    align: Alignment,
    config: &PrinterConfig,
) -> Result<Bitmap, ReciboError> {
    if data.is_empty() {
        return Err(ReciboError::InvalidParameter(
            "QR data must not be empty".into(),
        ));
    }
    if !(1..=16).contains(&options.module_size) {
        return Err(ReciboError::InvalidParameter(format!(
            "QR module size {} out of range 1-16",
            options.module_size
        )));
    }

    let code = QrCode::with_error_correction_level(data, ec_level(options.ec_level))
        .map_err(|e| ReciboError::Encoding(format!("QR encoding failed: {e}")))?;

    let modules = code.width() as u32;
    let total_modules = modules + 2 * QUIET_ZONE_MODULES;

    // Shrink oversized cells until the symbol fits the head. Even a
    // version-40 symbol (177 modules) fits at one dot per module.
    let head = config.width_dots as u32;
    let cell = (options.module_size as u32).min(head / total_modules).max(1);
    let symbol = total_modules * cell;

    let x0 = match align {
        Alignment::Left => 0,
        Alignment::Center => (head.saturating_sub(symbol)) / 2,
        Alignment::Right => head.saturating_sub(symbol),
    };
    let quiet = QUIET_ZONE_MODULES * cell;

    let mut bitmap = Bitmap::new(head, symbol);
    for qy in 0..modules {
        for qx in 0..modules {
            if code[(qx as usize, qy as usize)] != qrcode::Color::Dark {
                continue;
            }
            for cy in 0..cell {
                for cx in 0..cell {
                    bitmap.set(x0 + quiet + qx * cell + cx, quiet + qy * cell + cy, true);
                }
            }
        }
    }

    Ok(bitmap)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PrinterConfig {
        PrinterConfig::MINI58
    }

    fn ink_span(bitmap: &Bitmap) -> (u32, u32) {
        let mut min_x = u32::MAX;
        let mut max_x = 0;
        for y in 0..bitmap.height() {
            for x in 0..bitmap.width() {
                if bitmap.get(x, y) {
                    min_x = min_x.min(x);
                    max_x = max_x.max(x);
                }
            }
        }
        (min_x, max_x)
    }

    #[test]
    fn test_empty_data_rejected() {
        let err = render("", &QrOptions::default(), Alignment::Left, &config()).unwrap_err();
        assert!(matches!(err, ReciboError::InvalidParameter(_)));
    }

    #[test]
    fn test_module_size_out_of_range() {
        for module_size in [0, 17] {
            let options = QrOptions { module_size, ..Default::default() };
            assert!(render("DATA", &options, Alignment::Left, &config()).is_err());
        }
    }

    #[test]
    fn test_capacity_overflow_is_encoding_error() {
        let oversized = "X".repeat(8000);
        let err = render(&oversized, &QrOptions::default(), Alignment::Left, &config())
            .unwrap_err();
        assert!(matches!(err, ReciboError::Encoding(_)));
    }

    #[test]
    fn test_version1_dimensions() {
        // "HELLO" fits version 1 (21 modules); 6 dots/module + quiet zones
        let bitmap = render("HELLO", &QrOptions::default(), Alignment::Left, &config()).unwrap();
        assert_eq!(bitmap.width(), 384);
        assert_eq!(bitmap.height(), (21 + 8) * 6);
    }

    #[test]
    fn test_finder_pattern_corner_is_dark() {
        let bitmap = render("HELLO", &QrOptions::default(), Alignment::Left, &config()).unwrap();
        // module (0,0) is the finder corner, offset by the quiet zone
        let quiet = QUIET_ZONE_MODULES * 6;
        assert!(bitmap.get(quiet, quiet));
        // quiet zone itself stays white
        assert!(!bitmap.get(0, 0));
        assert!(!bitmap.get(quiet - 1, quiet - 1));
    }

    #[test]
    fn test_center_alignment() {
        let bitmap = render("HELLO", &QrOptions::default(), Alignment::Center, &config()).unwrap();
        let (min_x, max_x) = ink_span(&bitmap);
        let center = (min_x + max_x) / 2;
        assert!((center as i32 - 192).abs() <= 6, "ink center {center}");
    }

    #[test]
    fn test_right_alignment() {
        let bitmap = render("HELLO", &QrOptions::default(), Alignment::Right, &config()).unwrap();
        let (_, max_x) = ink_span(&bitmap);
        // symbol flush right, minus its own quiet zone
        assert_eq!(max_x, 384 - QUIET_ZONE_MODULES * 6 - 1);
    }

    #[test]
    fn test_oversized_cell_shrinks_to_fit() {
        let options = QrOptions { module_size: 16, ..Default::default() };
        let bitmap = render(
            "a much longer payload that needs a bigger qr version to store",
            &options,
            Alignment::Left,
            &config(),
        )
        .unwrap();
        assert!(bitmap.height() <= 384);
    }

    #[test]
    fn test_deterministic() {
        let a = render("SAME", &QrOptions::default(), Alignment::Center, &config()).unwrap();
        let b = render("SAME", &QrOptions::default(), Alignment::Center, &config()).unwrap();
        assert_eq!(a, b);
    }
}
