//! # ESC/POS Base Commands
//!
//! This module implements the core ESC/POS command set shared by virtually
//! every thermal receipt printer (Epson TM series and the many 58mm/80mm
//! clones that speak the same dialect).
//!
//! ## Protocol Overview
//!
//! ESC/POS commands are byte sequences introduced by a control prefix:
//!
//! - Single byte: `LF`
//! - Two bytes: `ESC @`
//! - Multi-byte with parameters: `ESC d n`, `GS V m`, `ESC p m t1 t2`
//! - Extended function groups: `GS ( k pL pH ...` (see [`super::barcode::qr`])
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`
//!
//! ## Reference
//!
//! Based on the Epson "ESC/POS Application Programming Guide" command set.

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
///
/// Most ESC/POS commands begin with ESC (0x1B). This byte signals the start
/// of a control sequence rather than printable text.
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Introduces sizing, raster graphics, barcode, and cutter commands:
/// - Hex: 0x1D, Decimal: 29
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print and advance one line
///
/// Prints any data in the line buffer and advances paper by the current
/// line spacing amount (default ~4mm for the built-in fonts).
pub const LF: u8 = 0x0A;

// ============================================================================
// INITIALIZATION COMMANDS
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets the printer to its power-on default state. This should be called
/// at the start of each print job to ensure consistent behavior.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// ## What Gets Reset
///
/// - Print buffer is cleared
/// - Text formatting (bold, underline, invert) disabled
/// - Character size reset to 1x1
/// - Alignment reset to left
/// - Line spacing reset to default
///
/// ## What Does NOT Reset
///
/// - Data already queued in the receive buffer
/// - Stored logos and user settings in NV memory
/// - The macro definition, if any
///
/// ## Example
///
/// ```
/// use recibo::protocol::commands;
///
/// let init = commands::init();
/// assert_eq!(init, vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// CUTTER CONTROL COMMANDS
// ============================================================================

/// # Full Cut (GS V 0)
///
/// Performs a full cut at the current paper position. If there is data in
/// the line buffer, it is printed first.
///
/// ## Protocol Details
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | GS V 0   |
/// | Hex     | 1D 56 00 |
/// | Decimal | 29 86 0  |
///
/// ## Behavior
///
/// - Prints any pending data in the line buffer
/// - Cuts at the current position (the last ~3mm of print may sit below
///   the blade; feed first if that matters)
#[inline]
pub fn cut_full() -> Vec<u8> {
    vec![GS, b'V', 0]
}

/// # Partial Cut (GS V 1)
///
/// Performs a partial cut, leaving a small uncut portion.
///
/// ## Protocol Details
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | GS V 1   |
/// | Hex     | 1D 56 01 |
/// | Decimal | 29 86 1  |
///
/// ## Behavior
///
/// Partial cuts leave a small "hinge" connecting the receipt to the roll,
/// making it easy to tear off while preventing the receipt from falling.
#[inline]
pub fn cut_partial() -> Vec<u8> {
    vec![GS, b'V', 1]
}

/// # Feed to Cut Position, Then Full Cut (GS V 66 n)
///
/// Feeds paper forward by n dots past the last printed line, then performs
/// a full cut. This is the most convenient cut for the end of a receipt.
///
/// ## Protocol Details
///
/// | Format  | Bytes      |
/// |---------|------------|
/// | ASCII   | GS V B n   |
/// | Hex     | 1D 56 42 n |
/// | Decimal | 29 86 66 n |
///
/// ## Parameters
///
/// - `n`: Additional feed before cutting, in dots (0-255)
///
/// ## Example
///
/// ```
/// use recibo::protocol::commands;
///
/// // Feed 3mm (24 dots at 203 DPI) then cut
/// let cut = commands::cut_feed(24);
/// assert_eq!(cut, vec![0x1D, 0x56, 0x42, 24]);
/// ```
#[inline]
pub fn cut_feed(n: u8) -> Vec<u8> {
    vec![GS, b'V', 66, n]
}

// ============================================================================
// PAPER FEED COMMANDS
// ============================================================================

/// # Print and Feed n Lines (ESC d n)
///
/// Prints the line buffer and feeds paper forward by n text lines at the
/// current line spacing.
///
/// ## Protocol Details
///
/// | Format  | Bytes     |
/// |---------|-----------|
/// | ASCII   | ESC d n   |
/// | Hex     | 1B 64 n   |
/// | Decimal | 27 100 n  |
///
/// ## Parameters
///
/// - `n`: Number of lines to feed (0-255)
///
/// ## Example
///
/// ```
/// use recibo::protocol::commands;
///
/// let feed = commands::feed_lines(3);
/// assert_eq!(feed, vec![0x1B, 0x64, 3]);
/// ```
#[inline]
pub fn feed_lines(n: u8) -> Vec<u8> {
    vec![ESC, b'd', n]
}

/// # Print and Feed Paper (ESC J n)
///
/// Feeds paper forward by n vertical motion units (dots on every printer
/// this crate targets: 1/203 inch, ~0.125mm).
///
/// ## Protocol Details
///
/// | Format  | Bytes     |
/// |---------|-----------|
/// | ASCII   | ESC J n   |
/// | Hex     | 1B 4A n   |
/// | Decimal | 27 74 n   |
///
/// ## Parameters
///
/// - `n`: Feed amount in dots (0-255); n=255 feeds ~31.9mm (maximum)
///
/// ## Example
///
/// ```
/// use recibo::protocol::commands;
///
/// // Feed 24 dots (one text line of font A)
/// let feed = commands::feed_dots(24);
/// assert_eq!(feed, vec![0x1B, 0x4A, 24]);
/// ```
#[inline]
pub fn feed_dots(n: u8) -> Vec<u8> {
    vec![ESC, b'J', n]
}

/// Feed paper by millimeters (convenience wrapper for `feed_dots`)
///
/// Converts millimeters to dots at 203 DPI (8 dots per millimeter).
///
/// ## Example
///
/// ```
/// use recibo::protocol::commands;
///
/// // Feed 5mm
/// let feed = commands::feed_mm(5.0);
/// assert_eq!(feed, vec![0x1B, 0x4A, 40]); // 5mm * 8 = 40 dots
/// ```
#[inline]
pub fn feed_mm(mm: f32) -> Vec<u8> {
    let dots = (mm * 8.0).round().clamp(0.0, 255.0) as u8;
    feed_dots(dots)
}

// ============================================================================
// CASH DRAWER
// ============================================================================

/// # Generate Cash Drawer Pulse (ESC p m t1 t2)
///
/// Fires the drawer-kick connector with the conventional timing used by
/// most POS installs: drawer pin 2, 50ms on, 500ms off.
///
/// ## Protocol Details
///
/// | Format  | Bytes          |
/// |---------|----------------|
/// | ASCII   | ESC p 0 25 250 |
/// | Hex     | 1B 70 00 19 FA |
/// | Decimal | 27 112 0 25 250|
///
/// ## Pulse Timing
///
/// `t1` and `t2` are in units of 2ms:
/// - on time = t1 × 2ms = 25 × 2 = 50ms
/// - off time = t2 × 2ms = 250 × 2 = 500ms
///
/// The off time guards against re-triggering the solenoid before it has
/// fully released.
///
/// ## Example
///
/// ```
/// use recibo::protocol::commands;
///
/// let kick = commands::cash_drawer();
/// assert_eq!(kick, vec![0x1B, 0x70, 0x00, 0x19, 0xFA]);
/// ```
#[inline]
pub fn cash_drawer() -> Vec<u8> {
    cash_drawer_pulse(0, 25, 250)
}

/// Generate a drawer pulse with explicit pin and timing.
///
/// ## Parameters
///
/// - `pin`: 0 = drawer connector pin 2, 1 = pin 5
/// - `on`: solenoid on time in 2ms units
/// - `off`: solenoid off time in 2ms units
#[inline]
pub fn cash_drawer_pulse(pin: u8, on: u8, off: u8) -> Vec<u8> {
    vec![ESC, b'p', pin.min(1), on, off]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ESC/POS uses little-endian encoding for all multi-byte integers.
///
/// ## Example
///
/// ```
/// use recibo::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(384), [0x80, 0x01]); // 384 = 0x0180
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================
