//! # ESC/POS Raster Graphics
//!
//! This module implements the raster bit-image command used for all bitmap
//! output: rendered text blocks, printed images, and software barcodes.
//!
//! ## Coordinate System
//!
//! ```text
//! (0,0) ──────────────────────► X (horizontal, 384 dots on 58mm paper)
//!   │
//!   │   ████████  ← Each dot is ~0.125mm (203 DPI)
//!   │   ████████
//!   │   ████████
//!   ▼
//!   Y (vertical, paper feed direction)
//! ```
//!
//! ## Bit Packing
//!
//! Graphics data is packed as bytes where each bit represents one dot:
//! - Bit 7 (MSB) = leftmost dot
//! - Bit 0 (LSB) = rightmost dot
//! - 1 = black (print), 0 = white (no print)
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0x0F = 00001111 = ░░░░████
//! Byte value 0xAA = 10101010 = █░█░█░█░
//! ```
//!
//! ## Typical Head Widths
//!
//! | Paper | Print width | Bytes per row |
//! |-------|-------------|---------------|
//! | 58mm  | 384 dots    | 48 |
//! | 80mm  | 576 dots    | 72 |

use super::commands::{GS, u16_le};

// ============================================================================
// RASTER BIT IMAGE (GS v 0)
// ============================================================================

/// # Print Raster Bit Image (GS v 0 m xL xH yL yH d1...dk)
///
/// Prints a monochrome raster image at the current position. This is the
/// workhorse graphics command on thermal ESC/POS printers.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS v 0 m xL xH yL yH d1...dk |
/// | Hex     | 1D 76 30 m xL xH yL yH d1...dk |
/// | Decimal | 29 118 48 m xL xH yL yH d1...dk |
///
/// ## Parameters
///
/// - `m`: Scale mode; this crate always sends 0 (normal scale)
/// - `xL, xH`: Width in **bytes**, little-endian
/// - `yL, yH`: Height in **dots** (rows), little-endian
/// - `d1...dk`: Image data, k = width_bytes × height bytes
///
/// ## Width and Height Encoding
///
/// ```text
/// width_bytes = xL + (xH × 256)
/// height_rows = yL + (yH × 256)
///
/// Example: 48 bytes wide = [0x30, 0x00] (48 = 0x0030)
/// Example: 500 rows high = [0xF4, 0x01] (500 = 0x01F4)
/// ```
///
/// ## Data Layout
///
/// Row-major; each byte covers 8 horizontal dots, MSB leftmost:
///
/// ```text
/// Row 0:    d[0]      d[1]       ... d[width_bytes-1]
/// Row 1:    d[wb]     d[wb+1]    ... d[2*wb-1]
/// ...
/// Row h-1:  d[(h-1)*wb]          ... d[h*wb-1]
/// ```
///
/// ## Example
///
/// ```
/// use recibo::protocol::graphics;
///
/// // A 384-dot wide (48 bytes), 24-row all-black block
/// let data = vec![0xFF; 48 * 24];
/// let cmd = graphics::raster(384, 24, &data);
///
/// assert_eq!(&cmd[0..8], &[0x1D, 0x76, 0x30, 0x00, 48, 0, 24, 0]);
/// assert_eq!(cmd.len(), 8 + 48 * 24);
/// ```
///
/// ## Receive Buffer Caveat
///
/// Cheap printers have small receive buffers (sometimes < 4KB). Large
/// images must be sent as several raster commands of bounded height with
/// pacing in between; see the encoder layer, which slices images into
/// 24-row commands by default.
pub fn raster(width_dots: u16, height: u16, data: &[u8]) -> Vec<u8> {
    let width_bytes = width_dots.div_ceil(8);
    let expected_len = width_bytes as usize * height as usize;

    debug_assert!(
        data.len() == expected_len,
        "Raster data length mismatch. Expected {} ({} bytes × {} rows), got {}",
        expected_len,
        width_bytes,
        height,
        data.len()
    );

    let [xl, xh] = u16_le(width_bytes);
    let [yl, yh] = u16_le(height);

    let mut cmd = Vec::with_capacity(8 + data.len());
    cmd.push(GS);
    cmd.push(b'v');
    cmd.push(b'0');
    cmd.push(0); // m = 0 (normal scale)
    cmd.push(xl);
    cmd.push(xh);
    cmd.push(yl);
    cmd.push(yh);
    cmd.extend_from_slice(data);
    cmd
}

// ============================================================================
// TESTS
// ============================================================================
