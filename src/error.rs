//! Unified error type for ms-footswitch.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the application.
///
/// An unrecognized device identity is deliberately *not* an error: the
/// session degrades to [`crate::midi::DeviceModel::Invalid`] and keeps
/// running, matching the pedal family's degrade-and-continue behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The MIDI bridge bus failed at the hardware layer.
    Transport,

    /// No complete response frame arrived within the response timeout.
    ///
    /// The pedal gives no other sign of being unplugged, so this is the
    /// signal that moves the main loop to its disconnected state.
    Timeout,

    /// Response larger than the receive buffer.
    BufferOverflow,

    /// Response shorter than its fixed parse offsets require.
    Malformed,
}
