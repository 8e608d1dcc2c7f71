//! # Formatting Dispatcher
//!
//! Decides, per styled block, whether the printer's native formatting
//! commands can honor the request or the text has to go through the
//! rasterizer. Native wins whenever it can: it is faster over slow links
//! and uses the firmware's own glyphs.
//!
//! ## Routing
//!
//! | Request | Route |
//! |---------|-------|
//! | Bold, underline, invert, size multipliers, rotation of plain cells | native |
//! | Underline + strikethrough together (shared `ESC -` register) | bitmap |
//! | Font B/C combined with italic, strikethrough or an explicit size | bitmap |
//! | Italic or strikethrough at an explicit pixel size | bitmap |
//! | Rotation of letter-spaced text | bitmap |
//! | Custom line height, condensed letter spacing | bitmap |
//!
//! ## Reset invariant
//!
//! ESC/POS style registers persist until cleared, so every native styled
//! block ends by clearing what it set (reverse order) and then returning
//! the stream to the known-good default: align left, bold off, underline
//! off, normal size. The bitmap route touches no registers and needs no
//! reset.

use log::{debug, warn};

use crate::error::ReciboError;
use crate::fontsize::{self, FontSizeMethod, SizeCode};
use crate::ir::Op;
use crate::printer::{HardwareCapability, PrinterConfig};
use crate::protocol::text::{self, Alignment, Font, Rotation};
use crate::render;

use super::raster_op;

/// True when the style cannot be expressed with native commands and the
/// block must be rasterized.
///
/// The decision depends only on the style, never on printer state — the
/// same request always takes the same route.
pub fn needs_bitmap(style: &render::PrintStyle) -> bool {
    // Underline and strikethrough share the ESC - register.
    if style.underline && style.strikethrough {
        return true;
    }
    // Clone firmwares only style and scale Font A reliably; B/C with
    // anything beyond plain emphasis comes out garbled on most of them.
    if style.font != Font::A && (style.italic || style.strikethrough || style.size.is_some()) {
        return true;
    }
    // Multiplier steps are too coarse to keep italic shear or a strike
    // rule proportioned at an exact pixel size.
    if style.size.is_some() && (style.italic || style.strikethrough) {
        return true;
    }
    // Firmware applies ESC SP in the rotated orientation, not to the
    // finished line, so spaced text has to be rotated as pixels.
    if style.rotation != Rotation::None && style.letter_spacing != 1.0 {
        return true;
    }
    // No native line-height register in this command set.
    if style.line_spacing != 1.0 {
        return true;
    }
    // ESC SP only ever adds dots; condensed spacing has no native form.
    if style.letter_spacing < 1.0 {
        return true;
    }
    false
}

/// Emit ops for one styled block of text, routing between native commands
/// and the rasterizer.
///
/// A vendor sizing capability, when present, is consulted for explicit
/// pixel sizes on the native route; refusal falls back to `GS !`
/// multipliers.
///
/// ## Errors
///
/// `InvalidParameter` for empty text and non-positive size requests;
/// nothing is emitted in either case. Rasterization failures past
/// validation degrade to a plain unstyled write instead of erroring.
pub fn emit_styled(
    ops: &mut Vec<Op>,
    content: &str,
    style: &render::PrintStyle,
    config: &PrinterConfig,
    hardware: Option<&mut dyn HardwareCapability>,
) -> Result<(), ReciboError> {
    if content.is_empty() {
        return Err(ReciboError::InvalidParameter(
            "text must not be empty".into(),
        ));
    }

    if needs_bitmap(style) {
        if style.size.is_some() {
            debug!("sizing method: {:?}", FontSizeMethod::BitmapFallback);
        }
        emit_bitmap(ops, content, style, config)
    } else {
        emit_native(ops, content, style, config, hardware)
    }
}

/// Rasterize the block and emit it as a raster op.
///
/// Alignment, spacing and effects are baked into the pixels, so no style
/// registers change and no reset follows.
fn emit_bitmap(
    ops: &mut Vec<Op>,
    content: &str,
    style: &render::PrintStyle,
    config: &PrinterConfig,
) -> Result<(), ReciboError> {
    match render::text::render(content, style, config) {
        Ok(bitmap) => {
            ops.push(raster_op(&bitmap));
            ops.push(Op::Newline);
            Ok(())
        }
        // Caller errors (bad size) report immediately, nothing written.
        Err(e @ ReciboError::InvalidParameter(_)) => Err(e),
        Err(e) => {
            warn!("text rasterization failed ({e}); printing unstyled");
            ops.push(Op::Text(content.to_string()));
            ops.push(Op::Newline);
            Ok(())
        }
    }
}

/// Emit the block with native commands: set registers, print, reset.
fn emit_native(
    ops: &mut Vec<Op>,
    content: &str,
    style: &render::PrintStyle,
    config: &PrinterConfig,
    hardware: Option<&mut dyn HardwareCapability>,
) -> Result<(), ReciboError> {
    ops.push(Op::SetAlign(style.align));
    if style.bold {
        ops.push(Op::SetBold(true));
    }
    if style.underline {
        ops.push(Op::SetUnderline(true));
    }
    if style.italic {
        ops.push(Op::SetItalic(true));
    }

    // Explicit sizes try the vendor API first; a refusal (or no capability
    // at all) lands in GS ! multipliers. The double flags fold into the
    // same multiplier byte on top of whatever the size resolved to.
    let mut width_mult: u8 = 1;
    let mut height_mult: u8 = 1;
    if let Some(request) = style.size {
        let px = request.pixel_size()? as i32;
        let (method, _) = fontsize::resolve(px, hardware)?;
        debug!("sizing method for {px}px: {method:?}");
        if method == FontSizeMethod::EscPosNative {
            let code = fontsize::code_for_pixels(px)?;
            width_mult = code.width_multiplier();
            height_mult = code.height_multiplier();
        }
    }
    if style.double_width {
        width_mult *= 2;
    }
    if style.double_height {
        height_mult *= 2;
    }
    let size_code = SizeCode::from_multipliers(width_mult, height_mult);
    if size_code != SizeCode::NORMAL {
        ops.push(Op::SetSize(size_code));
    }

    // Letter spacing as extra right-side dots of the scaled cell.
    let extra_spacing = ((style.letter_spacing - 1.0)
        * (config.base_cell_width * size_code.width_multiplier() as u16) as f32)
        .round()
        .clamp(0.0, 255.0) as u8;
    if extra_spacing > 0 {
        ops.push(Op::SetCharSpacing(extra_spacing));
    }

    if style.font != Font::A {
        ops.push(Op::SetFont(style.font));
    }
    if style.strikethrough {
        ops.push(Op::SetStrikethrough(true));
    }
    if style.double_strike {
        ops.push(Op::SetDoubleStrike(true));
    }
    if style.invert {
        ops.push(Op::SetInvert(true));
    }
    if style.rotation != Rotation::None {
        ops.push(Op::SetRotation(style.rotation));
    }

    ops.push(Op::Text(content.to_string()));
    ops.push(Op::Newline);

    // Clear what was set, in reverse. Rotation clears both registers:
    // ESC V 0 alone would leave a 180° flip armed.
    if style.rotation != Rotation::None {
        ops.push(Op::Raw(text::rotation_reset()));
    }
    if style.invert {
        ops.push(Op::SetInvert(false));
    }
    if style.double_strike {
        ops.push(Op::SetDoubleStrike(false));
    }
    if style.strikethrough {
        ops.push(Op::SetStrikethrough(false));
    }
    if style.font != Font::A {
        ops.push(Op::SetFont(Font::A));
    }
    if extra_spacing > 0 {
        ops.push(Op::SetCharSpacing(0));
    }
    if style.italic {
        ops.push(Op::SetItalic(false));
    }

    // Canonical tail: whatever the block did, the stream leaves at the
    // known-good default the next write expects.
    ops.push(Op::SetAlign(Alignment::Left));
    ops.push(Op::SetBold(false));
    ops.push(Op::SetUnderline(false));
    ops.push(Op::SetSize(SizeCode::NORMAL));

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
