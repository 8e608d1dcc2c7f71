//! # Receipt Templates
//!
//! Pre-built demo receipts exercising the text pipeline end to end: native
//! styling, sized headlines, raster fallbacks and firmware-rendered codes.
//!
//! Templates are profile-aware. Column layout is derived from the printer's
//! dot width, so the same template prints correctly on 58mm and 80mm paper.

use chrono::Local;

use crate::document::Job;
use crate::fontsize::{FontTier, SizeRequest};
use crate::printer::PrinterConfig;
use crate::protocol::barcode::barcode1d::{BarcodeOptions, Symbology};
use crate::protocol::barcode::qr::QrOptions;
use crate::protocol::text::{Alignment, Font, Rotation};
use crate::render::PrintStyle;

// ============================================================================
// LINE LAYOUT HELPERS
// ============================================================================

/// Text columns available at Font A multiplier 1.
fn columns(config: &PrinterConfig) -> usize {
    (config.width_dots / config.base_cell_width) as usize
}

/// Left- and right-aligned text on one line, gap filled with spaces.
///
/// Lines that would overflow degrade to a single separating space and let
/// the printer wrap.
fn two_column(width: usize, left: &str, right: &str) -> String {
    let used = left.chars().count() + right.chars().count();
    if used >= width {
        return format!("{left} {right}");
    }
    format!("{left}{}{right}", " ".repeat(width - used))
}

/// An item line: name left, price right with two decimals.
fn line_item(width: usize, name: &str, price: f64) -> String {
    two_column(width, name, &format!("{price:.2}"))
}

/// Full-width dashed divider.
fn divider(width: usize) -> String {
    "-".repeat(width)
}

// ============================================================================
// RECEIPT TEMPLATES
// ============================================================================

/// Generate a simple demo receipt.
///
/// Features demonstrated:
/// - Alignment (left, center)
/// - Bold and underline
/// - Double width/height scaling
/// - Inverted text (white on black)
/// - Column layout from the printer profile
pub fn demo_receipt(config: PrinterConfig) -> Vec<u8> {
    let width = columns(&config);
    let stamp = Local::now().format("%Y-%m-%d %H:%M").to_string();

    let center = PrintStyle {
        align: Alignment::Center,
        ..PrintStyle::default()
    };
    let bold = PrintStyle {
        bold: true,
        ..PrintStyle::default()
    };

    Job::new(config)
        // Header
        .styled(
            "CAFE LUNA",
            &PrintStyle {
                bold: true,
                double_width: true,
                double_height: true,
                align: Alignment::Center,
                ..PrintStyle::default()
            },
        )
        .styled("Calle de la Luna 12", &center)
        .styled(&stamp, &center)
        .text("")
        // Inverted banner
        .styled(
            " HOY: CHURROS 2x1 ",
            &PrintStyle {
                invert: true,
                align: Alignment::Center,
                ..PrintStyle::default()
            },
        )
        .text("")
        // Items table
        .styled(&two_column(width, "ARTICULO", "EUR"), &bold)
        .text(&divider(width))
        .text(&line_item(width, "Espresso", 2.40))
        .text(&line_item(width, "Cafe con Leche", 2.80))
        .text(&line_item(width, "Tostada con Tomate", 3.10))
        .text(&line_item(width, "Churros (racion)", 4.50))
        .text(&divider(width))
        // Totals
        .text(&line_item(width, "SUBTOTAL", 12.80))
        .text(&line_item(width, "IVA (10%)", 1.28))
        .styled(
            &two_column(width, "TOTAL", "14.08"),
            &PrintStyle {
                bold: true,
                double_height: true,
                ..PrintStyle::default()
            },
        )
        .text("")
        // Footer
        .styled(
            "gracias por su visita",
            &PrintStyle {
                underline: true,
                align: Alignment::Center,
                ..PrintStyle::default()
            },
        )
        .styled("VUELVA PRONTO", &center)
        .feed(3)
        .cut()
        .build()
}

/// Generate a full demo receipt with style showcase and codes.
///
/// Features demonstrated:
/// - Everything from [`demo_receipt`]
/// - Sized headline (nearest-multiple scaling)
/// - Font selection (A, B)
/// - Strikethrough, double-strike, letter spacing, upside-down text
/// - Raster fallback for style combinations without a native form
/// - QR code and Code39 barcode
pub fn full_receipt(config: PrinterConfig) -> Vec<u8> {
    let width = columns(&config);
    let stamp = Local::now().format("%Y-%m-%d %H:%M").to_string();

    let center = PrintStyle {
        align: Alignment::Center,
        ..PrintStyle::default()
    };
    let bold = PrintStyle {
        bold: true,
        ..PrintStyle::default()
    };
    let center_bold = PrintStyle {
        bold: true,
        align: Alignment::Center,
        ..PrintStyle::default()
    };

    Job::new(config)
        // Header, sized instead of doubled
        .styled(
            "CAFE LUNA",
            &PrintStyle {
                bold: true,
                align: Alignment::Center,
                size: Some(SizeRequest::Tier(FontTier::Large)),
                ..PrintStyle::default()
            },
        )
        .styled("Calle de la Luna 12", &center)
        .styled(&stamp, &center)
        .text("")
        // Font showcase
        .text(&divider(width))
        .styled("FUENTES:", &bold)
        .text("Font A (12x24): EL VELOZ MURCIELAGO 0123456789")
        .styled(
            "Font B (9x17): EL VELOZ MURCIELAGO 0123456789",
            &PrintStyle {
                font: Font::B,
                ..PrintStyle::default()
            },
        )
        .text("")
        // Style showcase
        .text(&divider(width))
        .styled("ESTILOS:", &bold)
        .text("Texto normal.")
        .styled("Enfatizado.", &bold)
        .styled(
            "Subrayado.",
            &PrintStyle {
                underline: true,
                ..PrintStyle::default()
            },
        )
        .styled(
            "Blanco sobre negro.",
            &PrintStyle {
                invert: true,
                ..PrintStyle::default()
            },
        )
        .styled(
            "Tachado.",
            &PrintStyle {
                strikethrough: true,
                ..PrintStyle::default()
            },
        )
        .styled(
            "Doble golpe.",
            &PrintStyle {
                double_strike: true,
                ..PrintStyle::default()
            },
        )
        .styled(
            "Doble ancho.",
            &PrintStyle {
                double_width: true,
                ..PrintStyle::default()
            },
        )
        .styled(
            "Doble alto.",
            &PrintStyle {
                double_height: true,
                ..PrintStyle::default()
            },
        )
        .styled(
            "Tamano 30px.",
            &PrintStyle {
                size: Some(SizeRequest::Pixels(30)),
                ..PrintStyle::default()
            },
        )
        .styled(
            "espaciado amplio",
            &PrintStyle {
                letter_spacing: 1.5,
                ..PrintStyle::default()
            },
        )
        // No joint native form; this one rasterizes.
        .styled(
            "Subrayado y tachado.",
            &PrintStyle {
                underline: true,
                strikethrough: true,
                ..PrintStyle::default()
            },
        )
        .styled(
            "mensaje boca abajo",
            &PrintStyle {
                rotation: Rotation::Flip180,
                align: Alignment::Center,
                ..PrintStyle::default()
            },
        )
        .text("")
        // Receipt body
        .text(&divider(width))
        .styled(&two_column(width, "ARTICULO", "EUR"), &bold)
        .text(&divider(width))
        .text(&line_item(width, "Espresso", 2.40))
        .text(&line_item(width, "Cafe con Leche", 2.80))
        .text(&line_item(width, "Tostada con Tomate", 3.10))
        .text(&line_item(width, "Churros (racion)", 4.50))
        .text(&divider(width))
        .text(&line_item(width, "SUBTOTAL", 12.80))
        .text(&line_item(width, "IVA (10%)", 1.28))
        .styled(
            &two_column(width, "TOTAL", "14.08"),
            &PrintStyle {
                bold: true,
                double_height: true,
                ..PrintStyle::default()
            },
        )
        .text("")
        // Codes
        .text(&divider(width))
        .styled("CODIGOS:", &center_bold)
        .text("QR:")
        .qr("https://example.invalid/recibo/2026-0001", QrOptions::default())
        .text("")
        .text("Code39 + HRI:")
        .barcode(
            Symbology::Code39,
            "R-2026-0001",
            BarcodeOptions {
                height: 80,
                ..BarcodeOptions::default()
            },
        )
        .text("")
        // Footer
        .text(&divider(width))
        .styled(
            "gracias por su visita",
            &PrintStyle {
                underline: true,
                align: Alignment::Center,
                ..PrintStyle::default()
            },
        )
        .styled(
            "nota: algunas opciones dependen del firmware de la impresora.",
            &PrintStyle {
                font: Font::B,
                ..PrintStyle::default()
            },
        )
        .styled("VUELVA PRONTO", &center)
        .feed(3)
        .cut()
        .build()
}

// ============================================================================
// LOOKUP FUNCTIONS
// ============================================================================

/// List available receipt templates
pub fn list_receipts() -> &'static [&'static str] {
    &["demo", "demo-full"]
}

/// Get receipt data by name, built for the given printer profile
pub fn by_name(name: &str, config: PrinterConfig) -> Option<Vec<u8>> {
    match name.to_lowercase().as_str() {
        "demo" => Some(demo_receipt(config)),
        "demo-full" | "demo_full" => Some(full_receipt(config)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_receipt_not_empty() {
        let data = demo_receipt(PrinterConfig::MINI58);
        assert!(!data.is_empty());
        // Should start with init command (ESC @)
        assert_eq!(&data[0..2], &[0x1B, 0x40]);
    }

    #[test]
    fn test_demo_receipt_ends_with_cut() {
        let data = demo_receipt(PrinterConfig::MINI58);
        assert!(data.ends_with(&[0x1D, 0x56, 0x00]));
    }

    #[test]
    fn test_demo_receipt_divider_matches_profile() {
        let narrow = demo_receipt(PrinterConfig::MINI58);
        let wide = demo_receipt(PrinterConfig::POS80);

        // 384/12 = 32 columns vs 576/12 = 48 columns
        let dashes32 = vec![b'-'; 32];
        let dashes48 = vec![b'-'; 48];
        assert!(narrow.windows(32).any(|w| w == &dashes32[..]));
        assert!(!narrow.windows(48).any(|w| w == &dashes48[..]));
        assert!(wide.windows(48).any(|w| w == &dashes48[..]));
    }

    #[test]
    fn test_full_receipt_not_empty() {
        let data = full_receipt(PrinterConfig::MINI58);
        assert!(!data.is_empty());
        assert_eq!(&data[0..2], &[0x1B, 0x40]);
    }

    #[test]
    fn test_full_receipt_has_qr() {
        let data = full_receipt(PrinterConfig::MINI58);
        // QR model selection (GS ( k fn=65)
        let select_model = [0x1D, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, 0x32, 0x00];
        assert!(data.windows(9).any(|w| w == select_model));
    }

    #[test]
    fn test_full_receipt_has_code39() {
        let data = full_receipt(PrinterConfig::MINI58);
        // GS k 69 (Code39, function B) with 11-byte payload
        let symbol = [0x1D, 0x6B, 69, 11];
        assert!(data.windows(4).any(|w| w == symbol));
    }

    #[test]
    fn test_full_receipt_contains_raster_fallback() {
        let data = full_receipt(PrinterConfig::MINI58);
        // The underline+strikethrough line has no native form, so the
        // receipt must carry at least one raster block
        let raster_header = [0x1D, 0x76, 0x30, 0x00];
        assert!(data.windows(4).any(|w| w == raster_header));
    }

    #[test]
    fn test_list_receipts() {
        let receipts = list_receipts();
        assert!(receipts.contains(&"demo"));
        assert!(receipts.contains(&"demo-full"));
    }

    #[test]
    fn test_by_name() {
        assert!(by_name("demo", PrinterConfig::MINI58).is_some());
        assert!(by_name("DEMO-FULL", PrinterConfig::MINI58).is_some());
        assert!(by_name("nonexistent", PrinterConfig::MINI58).is_none());
    }

    #[test]
    fn test_two_column_layout() {
        assert_eq!(two_column(12, "AB", "CD"), "AB        CD");
        assert_eq!(two_column(4, "ABC", "DEF"), "ABC DEF");
    }

    #[test]
    fn test_line_item_formats_price() {
        let line = line_item(20, "Espresso", 2.4);
        assert_eq!(line.chars().count(), 20);
        assert!(line.ends_with("2.40"));
    }
}
