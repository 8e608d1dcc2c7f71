//! # Long Print Chunking
//!
//! Inserts drain points into IR programs to prevent printer buffer overflow
//! during long prints with large graphics.
//!
//! ## Problem
//!
//! Thermal printers have limited internal buffers (~100-200KB). When sending
//! large amounts of data (especially graphics), the buffer can overflow
//! causing print failures, garbled output, or communication errors.
//!
//! **Key insight:** The issue is **data volume**, not print length. Text is
//! tiny (~50 bytes per line with styling) while images are massive: a
//! full-width raster band is 48 bytes/row × 24 rows ≈ 1.2KB, and a
//! photo-height image runs to tens of kilobytes.
//!
//! ## Solution
//!
//! This module tracks cumulative **bytes sent** (not mm printed) and inserts
//! [`Op::DrainBuffer`] markers at natural boundaries when approaching the
//! threshold. Codegen encodes the marker in-band; the transport layer strips
//! it and pauses to let the printer catch up.
//!
//! ## Natural Boundaries
//!
//! Drain points are only inserted at natural boundaries:
//! - Around raster graphics (large data)
//! - Around QR / 1D barcodes
//! - NOT after text/newlines (too frequent, data is tiny)

use super::ops::{Op, Program};

/// In-band drain marker: `ESC NUL "DRAIN" NUL ESC`.
///
/// Never a valid ESC/POS sequence, and framed so a chance match inside
/// raster payload is practically impossible. The transport strips it before
/// the bytes reach the printer.
pub const DRAIN_MARKER: [u8; 9] = [0x1B, 0x00, b'D', b'R', b'A', b'I', b'N', 0x00, 0x1B];

/// Default threshold before inserting a drain point (16KB).
/// Conservative: pauses roughly every 340 rows of full-width graphics.
pub const DEFAULT_DRAIN_THRESHOLD_BYTES: usize = 16 * 1024;

impl Program {
    /// Insert drain points to prevent buffer overflow during long prints.
    ///
    /// This should be called after the program is assembled, before codegen:
    ///
    /// ```text
    /// Job builder → IR → insert_drain_points() → Codegen → Bytes
    /// ```
    pub fn insert_drain_points(self) -> Self {
        self.insert_drain_points_with_threshold(DEFAULT_DRAIN_THRESHOLD_BYTES)
    }

    /// Insert drain points with a custom threshold (in bytes).
    pub fn insert_drain_points_with_threshold(self, threshold_bytes: usize) -> Self {
        let ops = insert_drain_points_impl(self.ops, threshold_bytes);
        Program { ops }
    }
}

fn insert_drain_points_impl(ops: Vec<Op>, threshold_bytes: usize) -> Vec<Op> {
    let mut result = Vec::with_capacity(ops.len() + ops.len() / 20);
    let mut bytes_sent: usize = 0;

    for op in ops {
        let op_bytes = estimate_op_bytes(&op);
        let is_heavy = is_heavy_operation(&op);

        // Heavy op that would push us over: drain first so the buffer is
        // empty before the big block arrives.
        if is_heavy && bytes_sent > 0 && bytes_sent + op_bytes > threshold_bytes {
            result.push(Op::DrainBuffer);
            bytes_sent = 0;
        }

        result.push(op);
        bytes_sent += op_bytes;

        // A single op can exceed the threshold on its own; drain right
        // after it even when it was the first op.
        if is_heavy && bytes_sent >= threshold_bytes {
            result.push(Op::DrainBuffer);
            bytes_sent = 0;
        }
    }

    result
}

/// Estimate the encoded byte cost of an op.
fn estimate_op_bytes(op: &Op) -> usize {
    match op {
        // ===== Heavy operations =====

        // Raster: payload plus an 8-byte header per 24-row band
        Op::Raster { height, data, .. } => {
            let bands = (*height as usize).div_ceil(24).max(1);
            data.len() + bands * 8
        }

        // QR: five GS ( k commands plus the stored payload
        Op::QrCode { data, .. } => 42 + data.len(),

        // 1D barcode: width/height/HRI prelude + symbol + LF
        Op::Barcode { data, .. } => 14 + data.len(),

        // ===== Light operations =====
        Op::Text(s) => s.len(),
        Op::Newline => 1,
        Op::Feed { .. } => 3,
        Op::FeedDots { .. } => 3,
        Op::Cut { .. } => 3,
        Op::Init => 2,
        Op::CashDrawer => 5,

        Op::SetAlign(_) => 3,
        Op::SetFont(_) => 3,
        Op::SetBold(_) => 3,
        Op::SetUnderline(_) => 3,
        Op::SetItalic(_) => 3,
        Op::SetStrikethrough(_) => 3,
        Op::SetDoubleStrike(_) => 3,
        Op::SetInvert(_) => 3,
        Op::SetSize(_) => 3,
        Op::SetRotation(_) => 6,
        Op::SetCharSpacing(_) => 3,

        Op::Raw(bytes) => bytes.len(),

        // marker bytes are stripped before the printer sees them
        Op::DrainBuffer => 0,
    }
}

/// Heavy = graphics or barcodes that contribute significant data.
fn is_heavy_operation(op: &Op) -> bool {
    matches!(
        op,
        Op::Raster { .. } | Op::QrCode { .. } | Op::Barcode { .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::barcode::qr::QrOptions;

    fn drain_count(program: &Program) -> usize {
        program
            .ops
            .iter()
            .filter(|op| matches!(op, Op::DrainBuffer))
            .count()
    }

    #[test]
    fn test_no_drain_for_text_only() {
        let ops = vec![
            Op::Init,
            Op::Text("Hello".into()),
            Op::Newline,
            Op::Text("World".into()),
            Op::Newline,
            Op::Cut { partial: false },
        ];
        let result = Program { ops }.insert_drain_points();
        assert_eq!(drain_count(&result), 0);
    }

    #[test]
    fn test_no_drain_for_lots_of_text() {
        // drains are for graphics volume; text never triggers them
        let mut ops = vec![Op::Init];
        for i in 0..1000 {
            ops.push(Op::Text(format!("Line {} with some text content", i)));
            ops.push(Op::Newline);
        }
        ops.push(Op::Cut { partial: false });

        let result = Program { ops }.insert_drain_points();
        assert_eq!(drain_count(&result), 0);
    }

    #[test]
    fn test_drain_after_large_raster() {
        // 384 wide x 1000 tall = 48 bytes/row * 1000 = 48KB > 16KB threshold
        let ops = vec![
            Op::Init,
            Op::Raster {
                width: 384,
                height: 1000,
                data: vec![0; 48 * 1000],
            },
            Op::Cut { partial: false },
        ];

        let result = Program { ops }.insert_drain_points();
        assert!(drain_count(&result) >= 1);
    }

    #[test]
    fn test_drain_between_multiple_rasters() {
        let raster = Op::Raster {
            width: 384,
            height: 250, // ~12KB each
            data: vec![0; 48 * 250],
        };

        let ops = vec![
            Op::Init,
            raster.clone(),
            raster.clone(),
            Op::Cut { partial: false },
        ];

        let result = Program { ops }.insert_drain_points();
        assert!(drain_count(&result) >= 1, "expected drain between rasters");

        // drain sits between the two rasters, not before the first
        let first_raster = result
            .ops
            .iter()
            .position(|op| matches!(op, Op::Raster { .. }))
            .unwrap();
        let drain = result
            .ops
            .iter()
            .position(|op| matches!(op, Op::DrainBuffer))
            .unwrap();
        assert!(drain > first_raster);
    }

    #[test]
    fn test_no_drain_for_small_raster() {
        let ops = vec![
            Op::Init,
            Op::Raster {
                width: 384,
                height: 100, // ~4.8KB, under 16KB
                data: vec![0; 48 * 100],
            },
            Op::Cut { partial: false },
        ];

        let result = Program { ops }.insert_drain_points();
        assert_eq!(drain_count(&result), 0);
    }

    #[test]
    fn test_drain_not_at_start() {
        let ops = vec![
            Op::Init,
            Op::Raster {
                width: 384,
                height: 1000,
                data: vec![0; 48 * 1000],
            },
        ];

        let result = Program { ops }.insert_drain_points();
        assert!(matches!(result.ops[0], Op::Init));
        assert!(!matches!(result.ops[1], Op::DrainBuffer));
    }

    #[test]
    fn test_custom_threshold() {
        let ops = vec![
            Op::Init,
            Op::Raster {
                width: 384,
                height: 200, // ~9.6KB
                data: vec![0; 48 * 200],
            },
            Op::Cut { partial: false },
        ];
        let program = Program { ops };

        let result_default = program.clone().insert_drain_points();
        assert_eq!(drain_count(&result_default), 0);

        let result_8k = program.insert_drain_points_with_threshold(8 * 1024);
        assert!(drain_count(&result_8k) >= 1);
    }

    #[test]
    fn test_estimate_raster_bytes() {
        let op = Op::Raster {
            width: 384,
            height: 48,
            data: vec![0; 48 * 48],
        };
        // 2304 payload + 2 band headers
        assert_eq!(estimate_op_bytes(&op), 48 * 48 + 16);
    }

    #[test]
    fn test_estimate_qr_bytes() {
        let op = Op::QrCode {
            data: "test".into(),
            options: QrOptions::default(),
        };
        assert_eq!(estimate_op_bytes(&op), 46);
    }

    #[test]
    fn test_text_is_not_heavy() {
        assert!(!is_heavy_operation(&Op::Text("test".into())));
        assert!(!is_heavy_operation(&Op::Newline));
        assert!(!is_heavy_operation(&Op::Feed { lines: 5 }));
    }

    #[test]
    fn test_graphics_are_heavy() {
        assert!(is_heavy_operation(&Op::Raster {
            width: 384,
            height: 100,
            data: vec![]
        }));
        assert!(is_heavy_operation(&Op::QrCode {
            data: "test".into(),
            options: QrOptions::default(),
        }));
    }
}
