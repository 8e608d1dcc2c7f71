//! # Printer Module
//!
//! This module provides printer-specific configurations and capabilities.
//!
//! ## Modules
//!
//! - [`config`]: Printer hardware specifications and device profiles
//! - [`capability`]: Optional vendor API access for exact font sizing

pub mod capability;
pub mod config;

pub use capability::HardwareCapability;
pub use config::{DeviceProfile, PrinterConfig};
