//! MultiStomp device communication.
//!
//! Three layers, bottom up:
//!
//! 1. **frames** - fixed-shape request frames and response parse offsets.
//! 2. **transport** - USB-MIDI event-packet framing over the bridge bus,
//!    with bounded-wait receive.
//! 3. **session** - connection lifecycle, identification handshake and
//!    the request/response operations the gesture router drives.

pub mod frames;
pub mod session;
pub mod transport;

/// Patches addressable on every supported pedal.
pub const MAX_PATCHES: u8 = 50;

/// Visible characters in a patch name.
pub const PATCH_NAME_LEN: usize = 10;

/// Effect slots a patch can use (full-bypass walks all of them).
pub const MAX_EFFECTS_PER_PATCH: u8 = 5;

/// Pedal models recognized by the identification handshake.
///
/// Anything else identifies as [`DeviceModel::Invalid`]: the firmware
/// keeps running, but patch-data parses are skipped until a reconnect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceModel {
    Ms50g,
    Ms70cdr,
    Ms60b,
    Invalid,
}

impl DeviceModel {
    /// Map the identity reply's device id to a model.
    pub fn from_id(device_id: u8) -> Self {
        match device_id {
            0x58 => DeviceModel::Ms50g,
            0x61 => DeviceModel::Ms70cdr,
            0x5f => DeviceModel::Ms60b,
            _ => DeviceModel::Invalid,
        }
    }

    /// Total length of this model's patch-data frame.
    pub fn patch_data_len(self) -> usize {
        match self {
            DeviceModel::Ms50g => 146,
            DeviceModel::Ms70cdr => 146,
            DeviceModel::Ms60b => 105,
            DeviceModel::Invalid => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DeviceModel::Ms50g => "MS-50G",
            DeviceModel::Ms70cdr => "MS-70CDR",
            DeviceModel::Ms60b => "MS-60B",
            DeviceModel::Invalid => "INVALID",
        }
    }

    pub fn is_valid(self) -> bool {
        self != DeviceModel::Invalid
    }
}
