//! # IR Opcodes
//!
//! This module defines the intermediate representation (IR) for receipt
//! printing. The IR is a sequence of opcodes that can be inspected, chunked
//! for pacing, and compiled to ESC/POS bytes.
//!
//! ## Design Philosophy
//!
//! The IR sits between the document layer and raw printer bytes:
//!
//! ```text
//! Job builder → IR (inspectable) → insert_drain_points() → Codegen → Bytes
//! ```
//!
//! Each opcode represents a single, atomic operation. Style changes are
//! individual ops (not combined) so the document layer can emit exact
//! on/off pairs around styled spans.

use crate::fontsize::SizeCode;
use crate::protocol::barcode::barcode1d::{BarcodeOptions, Symbology};
use crate::protocol::barcode::qr::QrOptions;
use crate::protocol::text::{Alignment, Font, Rotation};

/// Style state tracked across ops.
///
/// Mirrors the printer-side formatting registers. The document layer uses
/// it to compute which "off" commands a styled block must emit before the
/// stream returns to defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleState {
    pub alignment: Alignment,
    pub font: Font,
    pub bold: bool,
    pub underline: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub double_strike: bool,
    pub invert: bool,
    pub size: SizeCode,
    pub rotation: Rotation,
    pub char_spacing: u8,
}

impl StyleState {
    /// True when every register holds its power-on default.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// IR opcodes - the "bytecode" for receipt printing.
///
/// Each variant represents a single atomic operation. The IR can be:
/// - Inspected for debugging (`{:#?}`)
/// - Chunked with drain points for long prints
/// - Compiled to ESC/POS bytes
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    // ========== Printer Control ==========
    /// Initialize printer (ESC @). Resets to default state.
    Init,

    /// Cut paper. `partial: true` leaves a small hinge.
    Cut { partial: bool },

    /// Feed paper by whole character lines (ESC d n).
    Feed { lines: u8 },

    /// Feed paper by dots (ESC J n), for fine positioning.
    FeedDots { dots: u8 },

    /// Pulse the cash drawer kick-out connector.
    CashDrawer,

    // ========== Style Changes ==========
    /// Set text alignment.
    SetAlign(Alignment),

    /// Set font (A, B, or C).
    SetFont(Font),

    /// Enable/disable bold.
    SetBold(bool),

    /// Enable/disable underline.
    SetUnderline(bool),

    /// Enable/disable italic (clone dialect).
    SetItalic(bool),

    /// Enable/disable strikethrough. Shares the underline register
    /// (ESC - 2), so it cannot combine with underline natively.
    SetStrikethrough(bool),

    /// Enable/disable double-strike (second darker pass).
    SetDoubleStrike(bool),

    /// Enable/disable inverted (white on black).
    SetInvert(bool),

    /// Set the character size multiplier byte (GS ! n).
    SetSize(SizeCode),

    /// Set print rotation.
    SetRotation(Rotation),

    /// Set right-side character spacing in dots (ESC SP n).
    SetCharSpacing(u8),

    // ========== Content ==========
    /// Raw text (no trailing newline).
    Text(String),

    /// Line feed (newline).
    Newline,

    /// Raw bytes (for special characters or direct protocol access).
    Raw(Vec<u8>),

    // ========== Graphics ==========
    /// Raster graphics (GS v 0). Rows are packed MSB-first,
    /// `ceil(width / 8)` bytes per row. Codegen slices tall images into
    /// bands sized to the printer config.
    Raster {
        width: u16,
        height: u16,
        data: Vec<u8>,
    },

    // ========== Barcodes ==========
    /// QR code via the native GS ( k function group.
    QrCode { data: String, options: QrOptions },

    /// 1D barcode (GS k with width/height/HRI prelude).
    Barcode {
        symbology: Symbology,
        data: String,
        options: BarcodeOptions,
    },

    // ========== Pacing ==========
    /// Buffer drain point. Encodes as an in-band marker the transport
    /// strips and replaces with a pause; never reaches the printer.
    DrainBuffer,
}

/// A compiled IR program.
///
/// Contains a sequence of ops that can be chunked and compiled to bytes.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub ops: Vec<Op>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Create a program with an initial Init op.
    pub fn with_init() -> Self {
        Self {
            ops: vec![Op::Init],
        }
    }

    /// Add an op to the program.
    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    /// Add multiple ops to the program.
    pub fn extend(&mut self, ops: impl IntoIterator<Item = Op>) {
        self.ops.extend(ops);
    }

    /// Get the number of ops in the program.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if the program is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate over ops.
    pub fn iter(&self) -> impl Iterator<Item = &Op> {
        self.ops.iter()
    }
}

impl FromIterator<Op> for Program {
    fn from_iter<T: IntoIterator<Item = Op>>(iter: T) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Program {
    type Item = Op;
    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_new() {
        let program = Program::new();
        assert!(program.is_empty());
    }

    #[test]
    fn test_program_with_init() {
        let program = Program::with_init();
        assert_eq!(program.len(), 1);
        assert_eq!(program.ops[0], Op::Init);
    }

    #[test]
    fn test_program_push() {
        let mut program = Program::new();
        program.push(Op::Init);
        program.push(Op::SetBold(true));
        program.push(Op::Text("Hello".into()));
        assert_eq!(program.len(), 3);
    }

    #[test]
    fn test_program_from_iterator() {
        let program: Program = [Op::Init, Op::Newline].into_iter().collect();
        assert_eq!(program.len(), 2);
    }

    #[test]
    fn test_style_state_default() {
        let state = StyleState::default();
        assert_eq!(state.alignment, Alignment::Left);
        assert_eq!(state.font, Font::A);
        assert!(!state.bold);
        assert!(!state.underline);
        assert!(!state.invert);
        assert_eq!(state.size, SizeCode::NORMAL);
        assert_eq!(state.rotation, Rotation::None);
        assert!(state.is_default());
    }

    #[test]
    fn test_style_state_not_default_after_change() {
        let state = StyleState { bold: true, ..Default::default() };
        assert!(!state.is_default());
    }

    #[test]
    fn test_op_debug() {
        let op = Op::QrCode {
            data: "https://example.com".into(),
            options: QrOptions::default(),
        };
        let debug = format!("{:?}", op);
        assert!(debug.contains("QrCode"));
        assert!(debug.contains("example.com"));
    }
}
