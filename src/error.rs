//! # Error Types
//!
//! This module defines error types used throughout the recibo library.

use thiserror::Error;

/// Main error type for recibo operations
#[derive(Debug, Error)]
pub enum ReciboError {
    /// A parameter is out of range or otherwise unusable (empty text,
    /// invalid barcode payload, zero font size)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A symbolic command name with no entry in the command table
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Text or image could not be rendered to printable form
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Transport-level errors (connection, handshake)
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
