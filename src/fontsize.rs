//! # Font Size Encoding
//!
//! This module converts requested font sizes (pixels or symbolic tiers) into
//! ESC/POS character size multipliers for the `GS !` command.
//!
//! ## The Multiplier Model
//!
//! ESC/POS printers do not scale fonts continuously. The built-in Font A has
//! a fixed 12×24 dot cell, and `GS ! n` stretches it by integer multipliers
//! 1-8 in each axis (width in the high nibble, height in the low nibble,
//! both stored as multiplier − 1):
//!
//! | Requested px | Multiplier | Cell (dots) |
//! |--------------|------------|-------------|
//! | 1-18 | 1× | 12×24 |
//! | 19-36 | 2× | 24×48 |
//! | 37-54 | 3× | 36×72 |
//! | ... | ... | ... |
//! | 127+ | 8× | 96×192 |
//!
//! One bucket spans 18 px: the mean of the 12×24 base cell, which makes the
//! round trip through [`pixels_for_code`] and back exact on the bucket
//! average.
//!
//! ## Symbolic Tiers
//!
//! POS front-ends mostly ask for named sizes rather than pixels. The seven
//! tiers anchor to fixed pixel heights and go through the same bucketing:
//!
//! | Tier | Anchor px | Code |
//! |------|-----------|------|
//! | Tiny, Small, Normal, Medium | 6, 9, 12, 16 | `0x00` |
//! | Large, XLarge | 24, 36 | `0x11` |
//! | XxLarge | 48 | `0x22` |
//!
//! Neighboring tiers can share a code: native multipliers simply have fewer
//! steps than the tier ladder. Pixel-accurate tier spacing needs the bitmap
//! path (see [`crate::render::text`]).

use crate::error::ReciboError;
use crate::printer::capability::HardwareCapability;
use crate::protocol::text;

/// Font A cell width in dots at multiplier 1
pub const BASE_CELL_WIDTH: u32 = 12;

/// Font A cell height in dots at multiplier 1
pub const BASE_CELL_HEIGHT: u32 = 24;

/// Pixel span of one multiplier bucket (mean of the base cell dimensions)
const BUCKET: u32 = (BASE_CELL_WIDTH + BASE_CELL_HEIGHT) / 2;

// ============================================================================
// SIZE CODE
// ============================================================================

/// A resolved `GS !` multiplier byte.
///
/// High nibble = width multiplier − 1, low nibble = height multiplier − 1.
/// `0x00` is the normal 1×1 cell, `0x11` doubles both axes, `0x77` is the
/// 8×8 maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeCode(u8);

impl SizeCode {
    /// Normal size: 1× width, 1× height
    pub const NORMAL: Self = Self(0x00);

    /// Double width and height
    pub const LARGE: Self = Self(0x11);

    /// Build a code from width/height multipliers (clamped to 1-8).
    pub fn from_multipliers(width: u8, height: u8) -> Self {
        let w = width.clamp(1, 8) - 1;
        let h = height.clamp(1, 8) - 1;
        Self((w << 4) | h)
    }

    /// Reinterpret a raw wire byte as a size code.
    pub const fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    /// The raw wire byte for `GS !`.
    pub const fn byte(self) -> u8 {
        self.0
    }

    /// Width multiplier, 1-8.
    pub const fn width_multiplier(self) -> u8 {
        ((self.0 >> 4) & 0x0F) + 1
    }

    /// Height multiplier, 1-8.
    pub const fn height_multiplier(self) -> u8 {
        (self.0 & 0x0F) + 1
    }

    /// The full `GS ! n` command selecting this size.
    #[inline]
    pub fn command(self) -> Vec<u8> {
        text::size(self.width_multiplier(), self.height_multiplier())
    }
}

impl Default for SizeCode {
    fn default() -> Self {
        Self::NORMAL
    }
}

// ============================================================================
// PIXEL BUCKETING
// ============================================================================

/// Square multiplier (1-8) for a pixel height that is known positive.
fn multiplier(pixel_size: u32) -> u8 {
    pixel_size.div_ceil(BUCKET).clamp(1, 8) as u8
}

/// Map a requested pixel size to a (square) size code.
///
/// Bucketing is stepped, not linear: every 18 px of request adds one
/// multiplier step, saturating at 8×. Larger requests never produce a
/// smaller code.
///
/// ## Errors
///
/// `InvalidParameter` for sizes ≤ 0; nothing sensible can be emitted.
///
/// ## Example
///
/// ```
/// use recibo::fontsize::code_for_pixels;
///
/// assert_eq!(code_for_pixels(12).unwrap().byte(), 0x00);
/// assert_eq!(code_for_pixels(24).unwrap().byte(), 0x11);
/// assert_eq!(code_for_pixels(48).unwrap().byte(), 0x22);
/// assert!(code_for_pixels(0).is_err());
/// ```
pub fn code_for_pixels(pixel_size: i32) -> Result<SizeCode, ReciboError> {
    if pixel_size <= 0 {
        return Err(ReciboError::InvalidParameter(format!(
            "font size must be positive, got {pixel_size}"
        )));
    }
    let m = multiplier(pixel_size as u32);
    Ok(SizeCode::from_multipliers(m, m))
}

/// The dot dimensions a size code actually prints at, via the fixed
/// Font A base cell.
///
/// ## Example
///
/// ```
/// use recibo::fontsize::{SizeCode, pixels_for_code};
///
/// assert_eq!(pixels_for_code(SizeCode::NORMAL), (12, 24));
/// assert_eq!(pixels_for_code(SizeCode::LARGE), (24, 48));
/// ```
pub fn pixels_for_code(code: SizeCode) -> (u32, u32) {
    (
        BASE_CELL_WIDTH * code.width_multiplier() as u32,
        BASE_CELL_HEIGHT * code.height_multiplier() as u32,
    )
}

// ============================================================================
// SYMBOLIC TIERS
// ============================================================================

/// Named font size tiers exposed to POS front-ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontTier {
    Tiny,
    Small,
    #[default]
    Normal,
    Medium,
    Large,
    XLarge,
    XxLarge,
}

impl FontTier {
    /// The anchor pixel height this tier requests.
    pub const fn pixel_size(self) -> u16 {
        match self {
            FontTier::Tiny => 6,
            FontTier::Small => 9,
            FontTier::Normal => 12,
            FontTier::Medium => 16,
            FontTier::Large => 24,
            FontTier::XLarge => 36,
            FontTier::XxLarge => 48,
        }
    }

    /// The size code this tier resolves to (same bucketing as raw pixels).
    pub fn code(self) -> SizeCode {
        let m = multiplier(self.pixel_size() as u32);
        SizeCode::from_multipliers(m, m)
    }

    /// Parse the tier names used by POS front-ends. Returns `None` for
    /// unknown names; callers choose their own default.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "TINY" => Some(FontTier::Tiny),
            "SMALL" => Some(FontTier::Small),
            "NORMAL" => Some(FontTier::Normal),
            "MEDIUM" => Some(FontTier::Medium),
            "LARGE" => Some(FontTier::Large),
            "XLARGE" => Some(FontTier::XLarge),
            "XXLARGE" => Some(FontTier::XxLarge),
            _ => None,
        }
    }
}

/// A font size request: raw pixels or a symbolic tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeRequest {
    Pixels(i32),
    Tier(FontTier),
}

impl SizeRequest {
    /// The pixel height this request asks for.
    ///
    /// ## Errors
    ///
    /// `InvalidParameter` for non-positive pixel requests.
    pub fn pixel_size(self) -> Result<u16, ReciboError> {
        match self {
            SizeRequest::Tier(tier) => Ok(tier.pixel_size()),
            SizeRequest::Pixels(px) => {
                if px <= 0 {
                    return Err(ReciboError::InvalidParameter(format!(
                        "font size must be positive, got {px}"
                    )));
                }
                Ok(px.min(u16::MAX as i32) as u16)
            }
        }
    }
}

// ============================================================================
// METHOD SELECTION
// ============================================================================

/// How a font size request was (or will be) honored.
///
/// Returned from every sizing call so callers can log or branch on the
/// outcome; there is no process-wide "last method" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSizeMethod {
    /// A vendor hardware API applied the exact pixel size.
    HardwareApi,
    /// Native `GS !` multipliers approximate the size.
    EscPosNative,
    /// The text will be rendered to a raster image at exact pixel size.
    BitmapFallback,
}

/// Resolve a pixel size against an optional vendor capability.
///
/// The vendor API is tried first when present: enter its transaction
/// buffer, attempt the exact size, commit on success. Refusal rolls the
/// buffer back and falls through to native `GS !` bytes. Without a
/// capability this goes straight to native.
///
/// Returns the method used and the bytes to write (empty when the
/// hardware API handled sizing device-side).
///
/// ## Errors
///
/// `InvalidParameter` for sizes ≤ 0; the capability is not touched.
pub fn resolve(
    pixel_size: i32,
    hardware: Option<&mut dyn HardwareCapability>,
) -> Result<(FontSizeMethod, Vec<u8>), ReciboError> {
    let code = code_for_pixels(pixel_size)?;

    if let Some(hw) = hardware {
        hw.enter_buffer();
        if hw.try_set_font_size(pixel_size as u16) {
            hw.exit_buffer(true);
            return Ok((FontSizeMethod::HardwareApi, Vec::new()));
        }
        hw.exit_buffer(false);
    }

    Ok((FontSizeMethod::EscPosNative, code.command()))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_nibbles() {
        let code = SizeCode::from_multipliers(2, 3);
        assert_eq!(code.byte(), 0x12);
        assert_eq!(code.width_multiplier(), 2);
        assert_eq!(code.height_multiplier(), 3);
    }

    #[test]
    fn test_code_multipliers_clamped() {
        assert_eq!(SizeCode::from_multipliers(0, 0), SizeCode::NORMAL);
        assert_eq!(SizeCode::from_multipliers(9, 12).byte(), 0x77);
    }

    #[test]
    fn test_code_command_bytes() {
        assert_eq!(SizeCode::NORMAL.command(), vec![0x1D, 0x21, 0x00]);
        assert_eq!(SizeCode::LARGE.command(), vec![0x1D, 0x21, 0x11]);
        assert_eq!(
            SizeCode::from_multipliers(3, 3).command(),
            vec![0x1D, 0x21, 0x22]
        );
    }

    #[test]
    fn test_bucket_edges() {
        assert_eq!(code_for_pixels(1).unwrap().byte(), 0x00);
        assert_eq!(code_for_pixels(18).unwrap().byte(), 0x00);
        assert_eq!(code_for_pixels(19).unwrap().byte(), 0x11);
        assert_eq!(code_for_pixels(36).unwrap().byte(), 0x11);
        assert_eq!(code_for_pixels(37).unwrap().byte(), 0x22);
        // saturates at 8x
        assert_eq!(code_for_pixels(127).unwrap().byte(), 0x77);
        assert_eq!(code_for_pixels(10_000).unwrap().byte(), 0x77);
    }

    #[test]
    fn test_nonpositive_size_rejected() {
        assert!(matches!(
            code_for_pixels(0),
            Err(ReciboError::InvalidParameter(_))
        ));
        assert!(code_for_pixels(-5).is_err());
    }

    #[test]
    fn test_monotonicity() {
        let mut prev = SizeCode::NORMAL;
        for px in 1..200 {
            let code = code_for_pixels(px).unwrap();
            assert!(
                code.width_multiplier() >= prev.width_multiplier(),
                "width shrank at {px}px"
            );
            assert!(
                code.height_multiplier() >= prev.height_multiplier(),
                "height shrank at {px}px"
            );
            prev = code;
        }
    }

    #[test]
    fn test_round_trip_is_exact_on_square_codes() {
        // Encoding the average dimension of a code's own cell must return
        // the same code.
        for m in 1..=8u8 {
            let code = SizeCode::from_multipliers(m, m);
            let (w, h) = pixels_for_code(code);
            let avg = ((w + h) / 2) as i32;
            assert_eq!(code_for_pixels(avg).unwrap(), code, "multiplier {m}");
        }
    }

    #[test]
    fn test_round_trip_bounded_on_mixed_codes() {
        // For rectangular codes the re-encoded square multiplier must land
        // between the original width and height multipliers.
        for byte in 0x00..=0x77u8 {
            let code = SizeCode::from_byte(byte);
            let (w, h) = pixels_for_code(code);
            let avg = ((w + h) / 2) as i32;
            let again = code_for_pixels(avg).unwrap();

            let lo = code.width_multiplier().min(code.height_multiplier());
            let hi = code.width_multiplier().max(code.height_multiplier());
            let m = again.width_multiplier();
            assert!(
                (lo..=hi).contains(&m),
                "byte {byte:#04x}: got multiplier {m}, expected {lo}..={hi}"
            );
        }
    }

    #[test]
    fn test_pixels_for_code_base_cell() {
        assert_eq!(pixels_for_code(SizeCode::NORMAL), (12, 24));
        assert_eq!(pixels_for_code(SizeCode::LARGE), (24, 48));
        assert_eq!(pixels_for_code(SizeCode::from_byte(0x77)), (96, 192));
    }

    #[test]
    fn test_tier_codes_match_formula() {
        for tier in [
            FontTier::Tiny,
            FontTier::Small,
            FontTier::Normal,
            FontTier::Medium,
            FontTier::Large,
            FontTier::XLarge,
            FontTier::XxLarge,
        ] {
            let via_pixels = code_for_pixels(tier.pixel_size() as i32).unwrap();
            assert_eq!(tier.code(), via_pixels, "{tier:?}");
        }
    }

    #[test]
    fn test_small_tier_equals_nearby_raw_sizes() {
        // SMALL anchors at 9px; raw requests of 8-10px land in the same
        // bucket and must produce the identical byte.
        let small = FontTier::Small.code();
        for px in 8..=10 {
            assert_eq!(code_for_pixels(px).unwrap(), small, "{px}px");
        }
        assert_eq!(small.byte(), 0x00);
    }

    #[test]
    fn test_tier_parse() {
        assert_eq!(FontTier::parse("SMALL"), Some(FontTier::Small));
        assert_eq!(FontTier::parse("xxlarge"), Some(FontTier::XxLarge));
        assert_eq!(FontTier::parse("HUGE"), None);
    }

    #[test]
    fn test_size_request_pixel_size() {
        assert_eq!(
            SizeRequest::Tier(FontTier::Large).pixel_size().unwrap(),
            24
        );
        assert_eq!(SizeRequest::Pixels(30).pixel_size().unwrap(), 30);
        assert!(SizeRequest::Pixels(0).pixel_size().is_err());
        assert!(SizeRequest::Pixels(-1).pixel_size().is_err());
    }

    // ------------------------------------------------------------------
    // resolve() against a scripted capability
    // ------------------------------------------------------------------

    struct ScriptedCapability {
        accept: bool,
        calls: Vec<String>,
    }

    impl ScriptedCapability {
        fn new(accept: bool) -> Self {
            Self { accept, calls: Vec::new() }
        }
    }

    impl HardwareCapability for ScriptedCapability {
        fn enter_buffer(&mut self) {
            self.calls.push("enter".into());
        }

        fn try_set_font_size(&mut self, pixel_size: u16) -> bool {
            self.calls.push(format!("set {pixel_size}"));
            self.accept
        }

        fn exit_buffer(&mut self, commit: bool) {
            self.calls.push(format!("exit {commit}"));
        }
    }

    #[test]
    fn test_resolve_without_capability() {
        let (method, bytes) = resolve(30, None).unwrap();
        assert_eq!(method, FontSizeMethod::EscPosNative);
        assert_eq!(bytes, vec![0x1D, 0x21, 0x11]);
    }

    #[test]
    fn test_resolve_hardware_accepts() {
        let mut hw = ScriptedCapability::new(true);
        let (method, bytes) = resolve(30, Some(&mut hw)).unwrap();
        assert_eq!(method, FontSizeMethod::HardwareApi);
        assert!(bytes.is_empty());
        assert_eq!(hw.calls, vec!["enter", "set 30", "exit true"]);
    }

    #[test]
    fn test_resolve_hardware_refuses() {
        let mut hw = ScriptedCapability::new(false);
        let (method, bytes) = resolve(30, Some(&mut hw)).unwrap();
        assert_eq!(method, FontSizeMethod::EscPosNative);
        assert_eq!(bytes, vec![0x1D, 0x21, 0x11]);
        // refused attempt is rolled back, not committed
        assert_eq!(hw.calls, vec!["enter", "set 30", "exit false"]);
    }

    #[test]
    fn test_resolve_invalid_size_skips_capability() {
        let mut hw = ScriptedCapability::new(true);
        assert!(resolve(0, Some(&mut hw)).is_err());
        assert!(hw.calls.is_empty());
    }
}
