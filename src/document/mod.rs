//! # Document Assembly
//!
//! High-level print job building. A [`Job`] collects text, graphics and
//! control steps into an [`ir::Program`](crate::ir::Program); the
//! formatting dispatcher in [`text`] decides per styled block whether
//! native ESC/POS commands or a rasterized bitmap hit the paper.
//!
//! ```
//! use recibo::document::Job;
//! use recibo::printer::PrinterConfig;
//! use recibo::render::PrintStyle;
//!
//! let bytes = Job::new(PrinterConfig::MINI58)
//!     .styled("CORNER CAFE", &PrintStyle { bold: true, ..Default::default() })
//!     .text("123 Example St")
//!     .feed(2)
//!     .cut()
//!     .build();
//!
//! assert_eq!(&bytes[0..2], &[0x1B, 0x40]); // starts with init
//! ```

pub mod jobspec;
pub mod text;

use image::DynamicImage;
use log::warn;

use crate::ir::{Op, Program};
use crate::printer::{HardwareCapability, PrinterConfig};
use crate::protocol::barcode::barcode1d::{BarcodeOptions, Symbology};
use crate::protocol::barcode::qr::QrOptions;
use crate::protocol::text::Alignment;
use crate::render::{self, Bitmap, PrintStyle};

pub use jobspec::{JobSpec, JobStep};
pub use text::{emit_styled, needs_bitmap};

/// Wrap a bitmap in a raster op, packing its rows MSB-first.
pub fn raster_op(bitmap: &Bitmap) -> Op {
    Op::Raster {
        width: bitmap.width() as u16,
        height: bitmap.height() as u16,
        data: bitmap.packed_rows(),
    }
}

// ============================================================================
// JOB BUILDER
// ============================================================================

/// # Print Job
///
/// A builder collecting print steps into an IR program. Every job starts
/// with a printer init so no state leaks in from a previous job.
///
/// ## Example
///
/// ```
/// use recibo::document::Job;
/// use recibo::printer::PrinterConfig;
///
/// let program = Job::new(PrinterConfig::POS80)
///     .text("Hello")
///     .feed(3)
///     .cut()
///     .finish();
///
/// assert_eq!(program.ops[0], recibo::ir::Op::Init);
/// ```
pub struct Job {
    program: Program,
    config: PrinterConfig,
}

impl Job {
    /// Start a job for the given printer. The program opens with `ESC @`.
    pub fn new(config: PrinterConfig) -> Self {
        Self {
            program: Program::with_init(),
            config,
        }
    }

    /// Print a plain unstyled line of text.
    pub fn text(mut self, content: &str) -> Self {
        self.program.push(Op::Text(content.to_string()));
        self.program.push(Op::Newline);
        self
    }

    /// Print a styled line, dispatching between native commands and the
    /// rasterizer.
    ///
    /// Validation errors (empty text, non-positive size) skip the block
    /// with a warning instead of failing the chain.
    pub fn styled(mut self, content: &str, style: &PrintStyle) -> Self {
        if let Err(e) = emit_styled(&mut self.program.ops, content, style, &self.config, None) {
            warn!("skipping styled block: {e}");
        }
        self
    }

    /// Print a styled line with a vendor sizing capability available.
    ///
    /// The capability is consulted for explicit pixel sizes; refusals fall
    /// back to native multipliers exactly as [`Job::styled`] does.
    pub fn styled_with_capability(
        mut self,
        content: &str,
        style: &PrintStyle,
        hardware: &mut dyn HardwareCapability,
    ) -> Self {
        if let Err(e) = emit_styled(
            &mut self.program.ops,
            content,
            style,
            &self.config,
            Some(hardware),
        ) {
            warn!("skipping styled block: {e}");
        }
        self
    }

    /// Print an image, scaled and dithered per the options.
    pub fn image(mut self, img: DynamicImage, options: &render::image::ImageOptions) -> Self {
        let bitmap = render::image::render(img, options, &self.config);
        self.program.push(raster_op(&bitmap));
        self.program.push(Op::Newline);
        self
    }

    /// Print a QR code with the printer's native `GS ( k` support.
    pub fn qr(mut self, data: &str, options: QrOptions) -> Self {
        self.program.push(Op::QrCode {
            data: data.to_string(),
            options,
        });
        self
    }

    /// Print a QR code rendered as a raster bitmap, for firmware without
    /// `GS ( k` support.
    ///
    /// Falls back to the native QR op with a warning if the matrix cannot
    /// be rendered.
    pub fn qr_bitmap(mut self, data: &str, options: QrOptions, align: Alignment) -> Self {
        match render::qr::render(data, &options, align, &self.config) {
            Ok(bitmap) => {
                self.program.push(raster_op(&bitmap));
                self.program.push(Op::Newline);
            }
            Err(e) => {
                warn!("QR bitmap rendering failed, using native commands: {e}");
                self.program.push(Op::QrCode {
                    data: data.to_string(),
                    options,
                });
            }
        }
        self
    }

    /// Print a 1D barcode.
    pub fn barcode(mut self, symbology: Symbology, data: &str, options: BarcodeOptions) -> Self {
        self.program.push(Op::Barcode {
            symbology,
            data: data.to_string(),
            options,
        });
        self
    }

    /// Feed blank lines.
    pub fn feed(mut self, lines: u8) -> Self {
        self.program.push(Op::Feed { lines });
        self
    }

    /// Full paper cut.
    pub fn cut(mut self) -> Self {
        self.program.push(Op::Cut { partial: false });
        self
    }

    /// Partial cut, leaves a hinge.
    pub fn cut_partial(mut self) -> Self {
        self.program.push(Op::Cut { partial: true });
        self
    }

    /// Fire the cash drawer kick pulse.
    pub fn cash_drawer(mut self) -> Self {
        self.program.push(Op::CashDrawer);
        self
    }

    /// Append raw protocol bytes verbatim.
    pub fn raw(mut self, bytes: Vec<u8>) -> Self {
        self.program.push(Op::Raw(bytes));
        self
    }

    /// The IR program built so far, without drain points.
    pub fn finish(self) -> Program {
        self.program
    }

    /// Encode to protocol bytes, inserting drain points for long prints.
    pub fn build(self) -> Vec<u8> {
        let config = self.config;
        self.program
            .insert_drain_points()
            .to_bytes_with_config(&config)
    }
}
