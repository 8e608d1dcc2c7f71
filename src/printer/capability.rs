//! # Vendor Hardware Capabilities
//!
//! Some POS terminals expose a vendor service with pixel-accurate font
//! sizing that bypasses ESC/POS multipliers entirely. This module defines
//! the trait through which callers that own such a service hand it to the
//! font-sizing path.
//!
//! Callers without a vendor API pass `None`; the sizing path then goes
//! straight to native `GS !` multipliers. Absence is a value, not a probe:
//! there is no runtime discovery here.

/// Access to a vendor printer service with exact font sizing.
///
/// Implementations wrap whatever SDK object the integrating application
/// holds. All methods are infallible by contract: an implementation that
/// hits an SDK error reports refusal (`false` from
/// [`try_set_font_size`](Self::try_set_font_size)) instead of panicking,
/// and the caller falls back to ESC/POS sizing.
pub trait HardwareCapability {
    /// Open the vendor's transaction buffer, if it has one.
    ///
    /// Called before a sizing attempt so a refused attempt can be rolled
    /// back without leaving half-applied state on the device.
    fn enter_buffer(&mut self);

    /// Ask the vendor API for an exact pixel font size.
    ///
    /// Returns `false` when the API refuses the size or does not support
    /// direct sizing at all.
    fn try_set_font_size(&mut self, pixel_size: u16) -> bool;

    /// Close the transaction buffer, committing (`true`) or discarding
    /// (`false`) everything since [`enter_buffer`](Self::enter_buffer).
    fn exit_buffer(&mut self, commit: bool);
}
