//! # Printer Transport Layer
//!
//! This module provides byte sinks for sending encoded command streams to
//! printers.
//!
//! ## Available Transports
//!
//! - [`serial`]: character-device serial link (RFCOMM bindings, USB serial)
//! - [`MemorySink`]: Vec-backed capture for tests, previews and file output
//!
//! ## Drain Markers
//!
//! Encoded streams may carry in-band drain markers inserted by the IR
//! chunking pass. Every transport strips them; the serial transport
//! additionally pauses at each marker so slow printers can empty their
//! buffers. Markers never reach the device.

pub mod serial;

use crate::error::ReciboError;

pub use serial::SerialTransport;

/// Byte sink for encoded printer command streams.
///
/// One logical writer per sink; implementations are not required to be
/// thread-safe. Write and flush errors surface as [`ReciboError`] and are
/// never retried at this layer.
pub trait Transport {
    /// Write an entire encoded stream, handling any embedded drain markers.
    fn write_all(&mut self, data: &[u8]) -> Result<(), ReciboError>;

    /// Flush buffered bytes to the underlying device.
    fn flush(&mut self) -> Result<(), ReciboError>;
}

/// # In-Memory Sink
///
/// Collects written bytes into a `Vec<u8>`. Drain markers are stripped just
/// like a real transport would, but without any pacing, so the captured
/// bytes are exactly what a printer would receive.
///
/// ## Example
///
/// ```
/// use recibo::transport::{MemorySink, Transport};
///
/// let mut sink = MemorySink::new();
/// sink.write_all(&[0x1B, 0x40])?;
/// assert_eq!(sink.bytes(), &[0x1B, 0x40]);
/// # Ok::<(), recibo::error::ReciboError>(())
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    buf: Vec<u8>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The captured bytes so far.
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the sink and return the captured bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

impl Transport for MemorySink {
    fn write_all(&mut self, data: &[u8]) -> Result<(), ReciboError> {
        for segment in serial::split_on_drain_markers(data) {
            self.buf.extend_from_slice(segment);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ReciboError> {
        Ok(())
    }
}
