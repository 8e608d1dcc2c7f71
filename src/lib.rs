//! # Recibo - ESC/POS Receipt Printer Library
//!
//! Recibo builds and encodes print jobs for ESC/POS thermal receipt
//! printers — the generic 58mm/80mm Bluetooth and serial models. It
//! provides:
//!
//! - **Protocol implementation**: ESC/POS command builders for text
//!   styling, raster graphics, QR codes and 1D barcodes
//! - **Formatting dispatch**: native commands wherever the firmware can
//!   honor a style, rasterized text where it cannot
//! - **Rendering**: PSF2 bitmap fonts, ordered dithering, software QR for
//!   firmwares without `GS ( k`
//! - **Transport**: paced serial output tuned for tiny printer buffers
//!
//! ## Quick Start
//!
//! ```no_run
//! use recibo::{
//!     document::Job,
//!     printer::PrinterConfig,
//!     render::PrintStyle,
//!     transport::{SerialTransport, Transport},
//! };
//!
//! // Assemble a styled receipt
//! let bytes = Job::new(PrinterConfig::MINI58)
//!     .styled("CORNER CAFE", &PrintStyle { bold: true, ..Default::default() })
//!     .text("2x Flat White          9.00")
//!     .feed(3)
//!     .cut()
//!     .build();
//!
//! // Send it to the printer
//! let mut transport = SerialTransport::open("/dev/rfcomm0")?;
//! transport.write_all(&bytes)?;
//! transport.flush()?;
//! # Ok::<(), recibo::error::ReciboError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | ESC/POS command builders |
//! | [`document`] | Job builder and the formatting dispatcher |
//! | [`fontsize`] | Pixel/tier size requests → `GS !` multipliers |
//! | [`ir`] | Inspectable op-level representation of a job |
//! | [`render`] | Bitmap text, images and software QR |
//! | [`transport`] | Output backends |
//! | [`printer`] | Printer profiles and vendor capabilities |
//! | [`error`] | Error types |
//!
//! ## Supported Printers
//!
//! Tested against the generic 58mm (384 dot) and 80mm (576 dot) clones at
//! 203 DPI. Anything speaking the Epson ESC/POS dialect should work with an
//! appropriate [`printer::PrinterConfig`].

pub mod document;
pub mod error;
pub mod fontsize;
pub mod ir;
pub mod printer;
pub mod protocol;
pub mod receipt;
pub mod render;
pub mod transport;

// Re-exports for convenience
pub use document::Job;
pub use error::ReciboError;
pub use printer::PrinterConfig;
pub use transport::{MemorySink, SerialTransport, Transport};
