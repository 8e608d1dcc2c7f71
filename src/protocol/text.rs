//! # ESC/POS Text Styling Commands
//!
//! This module implements text formatting commands for ESC/POS printers.
//!
//! ## Text Styling Overview
//!
//! ESC/POS keeps style flags in printer registers that persist until they
//! are explicitly cleared or the printer is re-initialized:
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Bold | ESC E n | **Emphasized** text |
//! | Underline | ESC - n | Underlined text (n=2 doubles as strikethrough) |
//! | Italic | ESC 4 n | Oblique text (clone dialect) |
//! | Double strike | ESC G n | Second pass, darker text |
//! | Invert | GS B n | White on black |
//! | Size | GS ! n | 1x-8x width/height multipliers |
//! | Rotate | ESC V / ESC { | 90° / 180° rotation |
//!
//! Because the flags persist across writes, every styled block must be
//! followed by the matching "off" commands; see the document layer for the
//! reset sequence.
//!
//! ## Text Alignment
//!
//! ```text
//! Left aligned (default)    |LEFT TEXT
//! Center aligned            |  CENTER TEXT
//! Right aligned             |      RIGHT TEXT
//! ```
//!
//! ## Font Selection
//!
//! | Font | Size | Columns (58mm) |
//! |------|------|----------------|
//! | Font A | 12×24 dots | 32 chars |
//! | Font B | 9×17 dots | 42 chars |
//! | Font C | 9×24 dots | 42 chars |

use super::commands::{ESC, GS};

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

/// # Set Text Alignment (ESC a n)
///
/// Sets the alignment for subsequent text lines.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC a n |
/// | Hex     | 1B 61 n |
/// | Decimal | 27 97 n |
///
/// ## Parameters
///
/// - `n = 0`: Left alignment (default)
/// - `n = 1`: Center alignment
/// - `n = 2`: Right alignment
///
/// ## Behavior
///
/// - Affects all subsequent lines until changed
/// - Takes effect at start of next line
/// - Reset by ESC @ (initialize)
///
/// ## Example
///
/// ```
/// use recibo::protocol::text::{align, Alignment};
///
/// let center = align(Alignment::Center);
/// assert_eq!(center, vec![0x1B, 0x61, 0x01]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

/// Convenience function for left alignment
#[inline]
pub fn align_left() -> Vec<u8> {
    align(Alignment::Left)
}

/// Convenience function for center alignment
#[inline]
pub fn align_center() -> Vec<u8> {
    align(Alignment::Center)
}

/// Convenience function for right alignment
#[inline]
pub fn align_right() -> Vec<u8> {
    align(Alignment::Right)
}

// ============================================================================
// FONT SELECTION
// ============================================================================

/// Built-in printer fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    /// Font A: 12×24 dots, 32 columns on 58mm paper
    #[default]
    A = 0,
    /// Font B: 9×17 dots, 42 columns on 58mm paper
    B = 1,
    /// Font C: 9×24 dots, where supported (many clones alias it to B)
    C = 2,
}

/// # Select Font (ESC M n)
///
/// Selects the character font for subsequent text.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC M n |
/// | Hex     | 1B 4D n |
/// | Decimal | 27 77 n |
///
/// ## Font Specifications
///
/// | Font | Char Size | Best For |
/// |------|-----------|----------|
/// | A | 12×24 dots | Body text, headers |
/// | B | 9×17 dots | Fine print, compact |
/// | C | 9×24 dots | Compact with full height |
///
/// ## Example
///
/// ```
/// use recibo::protocol::text::{font, Font};
///
/// let font_b = font(Font::B);
/// assert_eq!(font_b, vec![0x1B, 0x4D, 0x01]);
/// ```
pub fn font(f: Font) -> Vec<u8> {
    vec![ESC, b'M', f as u8]
}

// ============================================================================
// TEXT EMPHASIS (BOLD)
// ============================================================================

/// # Enable Bold/Emphasis (ESC E 1)
///
/// Turns on emphasized (bold) printing for subsequent text.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC E 1 |
/// | Hex     | 1B 45 01 |
/// | Decimal | 27 69 1 |
///
/// ## Effect
///
/// Glyph strokes are widened by one dot, appearing bolder/darker.
///
/// ## Example
///
/// ```
/// use recibo::protocol::text::{bold_on, bold_off};
///
/// let mut data = Vec::new();
/// data.extend(bold_on());
/// data.extend(b"IMPORTANT");
/// data.extend(bold_off());
/// ```
#[inline]
pub fn bold_on() -> Vec<u8> {
    vec![ESC, b'E', 1]
}

/// Disable bold/emphasis (ESC E 0)
#[inline]
pub fn bold_off() -> Vec<u8> {
    vec![ESC, b'E', 0]
}

// ============================================================================
// UNDERLINE AND STRIKETHROUGH
// ============================================================================

/// # Set Underline Mode (ESC - n)
///
/// Enables or disables underline for subsequent text.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC - n |
/// | Hex     | 1B 2D n |
/// | Decimal | 27 45 n |
///
/// ## Parameters
///
/// - `n = 0`: Underline OFF
/// - `n = 1`: Underline ON (1 dot thick)
/// - `n = 2`: Underline ON (2 dots thick)
///
/// ## Note
///
/// Underline does not affect spaces produced by horizontal tabs.
///
/// ## Example
///
/// ```
/// use recibo::protocol::text::{underline_on, underline_off};
///
/// let mut data = Vec::new();
/// data.extend(underline_on());
/// data.extend(b"underlined text");
/// data.extend(underline_off());
/// ```
#[inline]
pub fn underline_on() -> Vec<u8> {
    vec![ESC, b'-', 1]
}

/// Disable underline
#[inline]
pub fn underline_off() -> Vec<u8> {
    vec![ESC, b'-', 0]
}

/// # Strikethrough (ESC - 2)
///
/// The 58mm clone firmwares render the 2-dot variant of ESC - through the
/// character center, which POS front-ends use as strikethrough.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC - 2 |
/// | Hex     | 1B 2D 02 |
/// | Decimal | 27 45 2 |
///
/// ## Caveat
///
/// This shares the underline register: strikethrough and underline cannot
/// both be active natively. Requests combining them are rendered through
/// the bitmap path instead.
#[inline]
pub fn strikethrough_on() -> Vec<u8> {
    vec![ESC, b'-', 2]
}

/// Disable strikethrough (clears the shared ESC - register)
#[inline]
pub fn strikethrough_off() -> Vec<u8> {
    vec![ESC, b'-', 0]
}

// ============================================================================
// ITALIC
// ============================================================================

/// # Enable Italic (ESC 4 1)
///
/// Turns on oblique rendering where the firmware supports it.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC 4 1 |
/// | Hex     | 1B 34 01 |
/// | Decimal | 27 52 1 |
///
/// ## Dialect Note
///
/// Epson's own ESC/POS reserves ESC 4 / ESC 5 as parameterless italic
/// toggles on impact models; the 58mm thermal clones accept the
/// parameterized form used here. Firmwares without italic support ignore
/// the sequence, which is why pixel-accurate requests go through the
/// bitmap path.
#[inline]
pub fn italic_on() -> Vec<u8> {
    vec![ESC, b'4', 1]
}

/// Disable italic (ESC 4 0)
#[inline]
pub fn italic_off() -> Vec<u8> {
    vec![ESC, b'4', 0]
}

// ============================================================================
// DOUBLE STRIKE
// ============================================================================

/// # Enable Double Strike (ESC G 1)
///
/// Prints each line twice with a slight vertical offset, darker than bold
/// on most mechanisms.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC G 1 |
/// | Hex     | 1B 47 01 |
/// | Decimal | 27 71 1 |
#[inline]
pub fn double_strike_on() -> Vec<u8> {
    vec![ESC, b'G', 1]
}

/// Disable double strike (ESC G 0)
#[inline]
pub fn double_strike_off() -> Vec<u8> {
    vec![ESC, b'G', 0]
}

// ============================================================================
// INVERT (WHITE ON BLACK)
// ============================================================================

/// # Enable Inverted Printing (GS B 1)
///
/// Prints white text on a black background.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS B 1 |
/// | Hex     | 1D 42 01 |
/// | Decimal | 29 66 1 |
///
/// ## Effect
///
/// ```text
/// Normal:   TEXT
/// Inverted: ████████
///           ░TEXT░░░
///           ████████
/// ```
///
/// ## Notes
///
/// - Uses more thermal paper (prints the background)
/// - Good for headers and emphasis
///
/// ## Example
///
/// ```
/// use recibo::protocol::text::{invert_on, invert_off};
///
/// let mut data = Vec::new();
/// data.extend(invert_on());
/// data.extend(b" SALE! ");
/// data.extend(invert_off());
/// ```
#[inline]
pub fn invert_on() -> Vec<u8> {
    vec![GS, b'B', 1]
}

/// Disable inverted printing (GS B 0)
#[inline]
pub fn invert_off() -> Vec<u8> {
    vec![GS, b'B', 0]
}

// ============================================================================
// CHARACTER SIZE
// ============================================================================

/// # Set Character Size (GS ! n)
///
/// Sets horizontal and vertical character magnification in one byte.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS ! n |
/// | Hex     | 1D 21 n |
/// | Decimal | 29 33 n |
///
/// ## Byte Layout
///
/// - High nibble: width multiplier − 1 (0-7)
/// - Low nibble: height multiplier − 1 (0-7)
///
/// | n | Size |
/// |------|------------|
/// | 0x00 | 1×1 (normal) |
/// | 0x11 | 2×2 |
/// | 0x01 | 1× wide, 2× tall |
/// | 0x77 | 8×8 (maximum) |
///
/// ## Example
///
/// ```
/// use recibo::protocol::text::size;
///
/// // Double width and height
/// let big = size(2, 2);
/// assert_eq!(big, vec![0x1D, 0x21, 0x11]);
///
/// // Triple height, normal width
/// let tall = size(1, 3);
/// assert_eq!(tall, vec![0x1D, 0x21, 0x02]);
/// ```
pub fn size(width_mult: u8, height_mult: u8) -> Vec<u8> {
    let w = width_mult.clamp(1, 8) - 1;
    let h = height_mult.clamp(1, 8) - 1;
    vec![GS, b'!', (w << 4) | h]
}

/// Reset to normal size (GS ! 0x00)
#[inline]
pub fn size_normal() -> Vec<u8> {
    size(1, 1)
}

/// Double size shortcut (GS ! 0x11)
#[inline]
pub fn size_large() -> Vec<u8> {
    size(2, 2)
}

// ============================================================================
// CHARACTER SPACING
// ============================================================================

/// # Set Right-Side Character Spacing (ESC SP n)
///
/// Adds n dots of blank space after every character cell.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC SP n |
/// | Hex     | 1B 20 n |
/// | Decimal | 27 32 n |
///
/// ## Parameters
///
/// - `n`: Extra spacing in dots (0-255); 0 restores the default
///
/// ## Example
///
/// ```
/// use recibo::protocol::text::char_spacing;
///
/// // Airy headline: 6 extra dots between characters
/// assert_eq!(char_spacing(6), vec![0x1B, 0x20, 6]);
/// ```
#[inline]
pub fn char_spacing(n: u8) -> Vec<u8> {
    vec![ESC, b' ', n]
}

// ============================================================================
// ROTATION
// ============================================================================

/// Text rotation in 90° steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    /// Normal orientation
    #[default]
    None,
    /// 90° clockwise, one character at a time
    Cw90,
    /// 180°, whole lines upside-down
    Flip180,
    /// 270° = 90° + 180° combined (no single-byte form exists)
    Cw270,
}

impl Rotation {
    /// Parse a rotation from degrees; unknown values mean "no rotation".
    pub fn from_degrees(deg: i32) -> Self {
        match deg {
            90 => Rotation::Cw90,
            180 => Rotation::Flip180,
            270 => Rotation::Cw270,
            _ => Rotation::None,
        }
    }
}

/// # Set Text Rotation (ESC V n / ESC { n)
///
/// Rotates subsequent text. ESC/POS has no native 270° mode; it is
/// synthesized by combining 90° character rotation with 180° line flip.
///
/// ## Protocol Details
///
/// | Rotation | Bytes |
/// |----------|-------|
/// | 0° | 1B 56 00 |
/// | 90° | 1B 56 01 |
/// | 180° | 1B 7B 01 |
/// | 270° | 1B 56 01 1B 7B 01 |
///
/// ## Example
///
/// ```
/// use recibo::protocol::text::{rotation, Rotation};
///
/// assert_eq!(rotation(Rotation::Cw90), vec![0x1B, 0x56, 0x01]);
/// assert_eq!(
///     rotation(Rotation::Cw270),
///     vec![0x1B, 0x56, 0x01, 0x1B, 0x7B, 0x01]
/// );
/// ```
pub fn rotation(r: Rotation) -> Vec<u8> {
    match r {
        Rotation::None => vec![ESC, b'V', 0],
        Rotation::Cw90 => vec![ESC, b'V', 1],
        Rotation::Flip180 => vec![ESC, b'{', 1],
        Rotation::Cw270 => vec![ESC, b'V', 1, ESC, b'{', 1],
    }
}

/// Clear both rotation registers (ESC V 0 + ESC { 0)
///
/// `rotation(Rotation::None)` matches what front-ends send for "0°", but it
/// leaves the 180° register alone; this clears both, for use in the reset
/// sequence after a rotated block.
#[inline]
pub fn rotation_reset() -> Vec<u8> {
    vec![ESC, b'V', 0, ESC, b'{', 0]
}

// ============================================================================
// TESTS
// ============================================================================
