//! # Printer Configuration
//!
//! This module defines hardware specifications for supported thermal printers.
//!
//! ## Supported Printers
//!
//! | Profile | Paper | Width (dots) | Resolution | Chunk Rows |
//! |---------|-------|--------------|------------|------------|
//! | mini58 | 58mm | 384 | 203 DPI | 24 |
//! | pos80 | 80mm | 576 | 203 DPI | 24 |
//!
//! ## Usage
//!
//! ```
//! use recibo::printer::PrinterConfig;
//!
//! let config = PrinterConfig::MINI58;
//! println!("Print width: {} dots ({} bytes)",
//!          config.width_dots,
//!          config.width_bytes);
//! ```

use crate::fontsize;

/// # Printer Configuration
///
/// Defines the hardware characteristics of a thermal printer.
///
/// ## Physical Properties
///
/// - **width_dots**: Maximum printable width in dots (pixels)
/// - **width_bytes**: Width in bytes (width_dots / 8)
/// - **dpi**: Resolution in dots per inch
/// - **base_cell**: Font A glyph cell at multiplier 1
///
/// ## Buffer Tuning
///
/// - **max_chunk_rows**: Maximum rows per `GS v 0` raster command. Cheap
///   printers have receive buffers in the low kilobytes; exceeding this
///   drops or garbles rows mid-image.
///
/// ## Calculations
///
/// ```text
/// dots_per_mm = dpi / 25.4
/// width_mm = width_dots / dots_per_mm
///
/// For mini58:
///   dots_per_mm = 203 / 25.4 ≈ 8
///   width_mm = 384 / 8 = 48mm
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PrinterConfig {
    /// Printer model name
    pub name: &'static str,

    /// Maximum print width in dots (pixels)
    pub width_dots: u16,

    /// Print width in bytes (width_dots / 8)
    pub width_bytes: u16,

    /// Resolution in dots per inch
    pub dpi: u16,

    /// Maximum rows per raster chunk (receive-buffer limit)
    pub max_chunk_rows: u16,

    /// Font A cell width in dots at multiplier 1
    pub base_cell_width: u16,

    /// Font A cell height in dots at multiplier 1
    pub base_cell_height: u16,
}

impl PrinterConfig {
    /// # Generic 58mm Printer Configuration
    ///
    /// The ubiquitous cheap Bluetooth/USB receipt printer sold under
    /// dozens of brand names.
    ///
    /// ## Specifications
    ///
    /// | Property | Value |
    /// |----------|-------|
    /// | Paper width | 58mm |
    /// | Print width | 48mm (384 dots) |
    /// | Resolution | 203 DPI |
    /// | Interface | Bluetooth/USB/Serial |
    /// | Cutter | Usually none (tear bar) |
    ///
    /// ## Print Area
    ///
    /// ```text
    /// ├── 5mm ──┼────── 48mm printable ──────┼── 5mm ──┤
    /// │ margin  │         384 dots           │ margin  │
    /// ```
    pub const MINI58: Self = Self {
        name: "Generic 58mm",
        width_dots: 384,
        width_bytes: 48,
        dpi: 203,
        max_chunk_rows: 24,
        base_cell_width: fontsize::BASE_CELL_WIDTH as u16,
        base_cell_height: fontsize::BASE_CELL_HEIGHT as u16,
    };

    /// # Generic 80mm Printer Configuration
    ///
    /// Counter-top receipt printer with auto-cutter, Epson TM-T88 class.
    ///
    /// ## Specifications
    ///
    /// | Property | Value |
    /// |----------|-------|
    /// | Paper width | 80mm |
    /// | Print width | 72mm (576 dots) |
    /// | Resolution | 203 DPI |
    /// | Cutter | Auto-cutter (full/partial) |
    pub const POS80: Self = Self {
        name: "Generic 80mm",
        width_dots: 576,
        width_bytes: 72,
        dpi: 203,
        max_chunk_rows: 24,
        base_cell_width: fontsize::BASE_CELL_WIDTH as u16,
        base_cell_height: fontsize::BASE_CELL_HEIGHT as u16,
    };

    /// Calculate dots per millimeter
    ///
    /// ## Example
    ///
    /// ```
    /// use recibo::printer::PrinterConfig;
    ///
    /// let config = PrinterConfig::MINI58;
    /// assert!((config.dots_per_mm() - 8.0).abs() < 0.1);
    /// ```
    #[inline]
    pub fn dots_per_mm(&self) -> f32 {
        self.dpi as f32 / 25.4
    }

    /// Calculate print width in millimeters
    #[inline]
    pub fn width_mm(&self) -> f32 {
        self.width_dots as f32 / self.dots_per_mm()
    }

    /// Convert millimeters to dots
    #[inline]
    pub fn mm_to_dots(&self, mm: f32) -> u16 {
        (mm * self.dots_per_mm()).round() as u16
    }

    /// Convert dots to millimeters
    #[inline]
    pub fn dots_to_mm(&self, dots: u16) -> f32 {
        dots as f32 / self.dots_per_mm()
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::MINI58
    }
}

// ============================================================================
// DEVICE PROFILE
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::error::ReciboError;

/// A device profile naming the output target, as it appears in CLI args
/// and JSON job files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeviceProfile {
    /// Generic 58mm printer (384 dots)
    Mini58,
    /// Generic 80mm printer (576 dots)
    Pos80,
    /// A printer not in the built-in table
    Custom { width_dots: u16, dpi: u16 },
}

impl DeviceProfile {
    /// Resolve the profile to concrete hardware specs.
    pub fn config(&self) -> PrinterConfig {
        match self {
            Self::Mini58 => PrinterConfig::MINI58,
            Self::Pos80 => PrinterConfig::POS80,
            Self::Custom { width_dots, dpi } => PrinterConfig {
                name: "Custom",
                width_dots: *width_dots,
                width_bytes: width_dots.div_ceil(8),
                dpi: *dpi,
                ..PrinterConfig::MINI58
            },
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mini58 => PrinterConfig::MINI58.name,
            Self::Pos80 => PrinterConfig::POS80.name,
            Self::Custom { .. } => "Custom",
        }
    }

    /// Parse a profile string (CLI args or config files).
    ///
    /// Formats:
    /// - `"mini58"` / `"pos80"` → built-in printer
    /// - `"custom:WIDTH"` → custom dot width at 203 DPI (e.g. `"custom:512"`)
    /// - `"custom:WIDTHxDPI"` → custom width and resolution
    pub fn parse(s: &str) -> Result<Self, ReciboError> {
        match s.to_lowercase().as_str() {
            "mini58" | "58mm" => Ok(Self::Mini58),
            "pos80" | "80mm" => Ok(Self::Pos80),
            other if other.starts_with("custom:") => {
                let dims = &other["custom:".len()..];
                let (w, dpi) = match dims.split_once('x') {
                    Some((w, d)) => (w, Some(d)),
                    None => (dims, None),
                };
                let width_dots: u16 = w.parse().map_err(|_| {
                    ReciboError::InvalidParameter(format!("invalid width: {w}"))
                })?;
                let dpi: u16 = match dpi {
                    Some(d) => d.parse().map_err(|_| {
                        ReciboError::InvalidParameter(format!("invalid dpi: {d}"))
                    })?,
                    None => 203,
                };
                Ok(Self::Custom { width_dots, dpi })
            }
            _ => Err(ReciboError::InvalidParameter(format!(
                "unknown profile '{s}'; use 'mini58', 'pos80' or 'custom:WIDTH'"
            ))),
        }
    }
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::Mini58
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mini58_dimensions() {
        let config = PrinterConfig::MINI58;
        assert_eq!(config.width_dots, 384);
        assert_eq!(config.width_bytes, 48);
        assert_eq!(config.width_dots, config.width_bytes * 8);
        assert_eq!(config.max_chunk_rows, 24);
    }

    #[test]
    fn test_pos80_dimensions() {
        let config = PrinterConfig::POS80;
        assert_eq!(config.width_dots, 576);
        assert_eq!(config.width_dots, config.width_bytes * 8);
    }

    #[test]
    fn test_dots_per_mm() {
        let config = PrinterConfig::MINI58;
        // 203 DPI ≈ 8 dots/mm
        assert!((config.dots_per_mm() - 8.0).abs() < 0.1);
    }

    #[test]
    fn test_width_mm() {
        // 384 dots / 8 dpmm = 48mm
        assert!((PrinterConfig::MINI58.width_mm() - 48.0).abs() < 1.0);
        assert!((PrinterConfig::POS80.width_mm() - 72.0).abs() < 1.0);
    }

    #[test]
    fn test_mm_to_dots() {
        let config = PrinterConfig::MINI58;
        // 10mm ≈ 80 dots
        let dots = config.mm_to_dots(10.0);
        assert!((dots as i32 - 80).abs() < 2);
    }

    #[test]
    fn test_default_is_mini58() {
        assert_eq!(PrinterConfig::default().name, PrinterConfig::MINI58.name);
    }

    #[test]
    fn test_profile_parse() {
        assert_eq!(DeviceProfile::parse("mini58").unwrap(), DeviceProfile::Mini58);
        assert_eq!(DeviceProfile::parse("80MM").unwrap(), DeviceProfile::Pos80);
        assert_eq!(
            DeviceProfile::parse("custom:512").unwrap(),
            DeviceProfile::Custom { width_dots: 512, dpi: 203 }
        );
        assert_eq!(
            DeviceProfile::parse("custom:512x180").unwrap(),
            DeviceProfile::Custom { width_dots: 512, dpi: 180 }
        );
        assert!(DeviceProfile::parse("tsp650ii").is_err());
        assert!(DeviceProfile::parse("custom:wide").is_err());
    }

    #[test]
    fn test_custom_profile_rounds_width_bytes_up() {
        let profile = DeviceProfile::Custom { width_dots: 500, dpi: 203 };
        assert_eq!(profile.config().width_bytes, 63);
    }

    #[test]
    fn test_profile_serde_round_trip() {
        let profile = DeviceProfile::Pos80;
        let json = serde_json::to_string(&profile).unwrap();
        assert_eq!(json, r#"{"type":"pos80"}"#);
        let back: DeviceProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
