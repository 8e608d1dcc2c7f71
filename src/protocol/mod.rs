//! # ESC/POS Protocol Implementation
//!
//! This module provides low-level command builders for the ESC/POS protocol
//! spoken by Epson-compatible thermal receipt printers (and the large family
//! of clones that imitate them).
//!
//! ## Module Structure
//!
//! - [`commands`]: Basic printer commands (init, cut, feed, cash drawer)
//! - [`graphics`]: Raster bit image commands
//! - [`text`]: Text styling (alignment, fonts, bold, underline, size, rotation)
//! - [`barcode`]: 1D barcodes and QR codes
//!
//! ## Usage Example
//!
//! ```
//! use recibo::protocol::{commands, graphics, text};
//!
//! // Build a simple print sequence
//! let mut data = Vec::new();
//!
//! // Initialize printer
//! data.extend(commands::init());
//!
//! // Set text style
//! data.extend(text::align_center());
//! data.extend(text::bold_on());
//! data.extend(b"RECEIPT\n");
//! data.extend(text::bold_off());
//! data.extend(text::align_left());
//!
//! // Print a 24-row raster band (384 dots wide = 48 bytes per row)
//! let band = vec![0xAA; 48 * 24]; // Vertical stripes
//! data.extend(graphics::raster(384, 24, &band));
//!
//! // Feed and cut
//! data.extend(commands::feed_lines(4));
//! data.extend(commands::cut_full());
//!
//! // Send `data` to printer via transport...
//! ```
//!
//! ## Protocol Reference
//!
//! This implementation is based on the "ESC/POS Application Programming
//! Guide" command set as implemented by common 58mm and 80mm printers.
//! Where clone firmwares diverge from genuine Epson behavior, the individual
//! command docs note the difference.

use crate::error::ReciboError;

pub mod barcode;
pub mod commands;
pub mod graphics;
pub mod text;

/// Resolve a symbolic command name to its byte sequence.
///
/// This is the string-keyed face of the protocol layer, used by raw
/// command lists in print jobs and by the CLI `encode` subcommand. Names
/// are fixed-parameter commands only; anything that takes an argument
/// (sizes, barcodes, raster data) goes through the typed builders.
///
/// ## Example
///
/// ```
/// use recibo::protocol::lookup;
///
/// assert_eq!(lookup("INIT").unwrap(), vec![0x1B, 0x40]);
/// assert_eq!(lookup("ALIGN_CENTER").unwrap(), vec![0x1B, 0x61, 0x01]);
/// assert!(lookup("WARP_DRIVE").is_err());
/// ```
pub fn lookup(name: &str) -> Result<Vec<u8>, ReciboError> {
    let bytes = match name {
        "INIT" => commands::init(),
        "CUT" => commands::cut_full(),
        "CUT_PARTIAL" => commands::cut_partial(),
        "ALIGN_LEFT" => text::align_left(),
        "ALIGN_CENTER" => text::align_center(),
        "ALIGN_RIGHT" => text::align_right(),
        "BOLD_ON" => text::bold_on(),
        "BOLD_OFF" => text::bold_off(),
        "UNDERLINE_ON" => text::underline_on(),
        "UNDERLINE_OFF" => text::underline_off(),
        "ITALIC_ON" => text::italic_on(),
        "ITALIC_OFF" => text::italic_off(),
        "STRIKETHROUGH_ON" => text::strikethrough_on(),
        "STRIKETHROUGH_OFF" => text::strikethrough_off(),
        "DOUBLE_STRIKE_ON" => text::double_strike_on(),
        "DOUBLE_STRIKE_OFF" => text::double_strike_off(),
        "INVERT_ON" => text::invert_on(),
        "INVERT_OFF" => text::invert_off(),
        "SIZE_NORMAL" => text::size_normal(),
        "SIZE_LARGE" => text::size_large(),
        "FONT_A" => text::font(text::Font::A),
        "FONT_B" => text::font(text::Font::B),
        "FONT_C" => text::font(text::Font::C),
        "ROTATE_0" => text::rotation(text::Rotation::None),
        "ROTATE_90" => text::rotation(text::Rotation::Cw90),
        "ROTATE_180" => text::rotation(text::Rotation::Flip180),
        "ROTATE_270" => text::rotation(text::Rotation::Cw270),
        "CASH_DRAWER" => commands::cash_drawer(),
        _ => {
            return Err(ReciboError::UnknownCommand(name.to_string()));
        }
    };
    Ok(bytes)
}
