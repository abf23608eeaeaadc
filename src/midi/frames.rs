//! Wire frames and parse offsets for the MultiStomp protocol.
//!
//! Every request is a small fixed-shape message; the variable fields
//! (device id, slot, on/off) are filled by pure constructors returning a
//! fresh buffer, so no frame is ever mutated in place.
//!
//! Responses are parsed at fixed offsets only - the pedal interleaves
//! patch metadata with a 7-bit-safe encoding that we do not decode beyond
//! picking the documented bytes.

/// SysEx frame delimiters.
pub const SYSEX_START: u8 = 0xf0;
pub const SYSEX_END: u8 = 0xf7;

/// Universal device-inquiry request.
pub const IDENTIFY_REQUEST: [u8; 6] = [0xf0, 0x7e, 0x00, 0x06, 0x01, 0xf7];

/// Identity reply: device id byte.
pub const DEVICE_ID_OFFSET: usize = 6;

/// Identity reply: four firmware-version characters.
pub const FW_VERSION_OFFSETS: [usize; 4] = [10, 11, 12, 13];

/// Patch-index reply: current 0-based patch number.
pub const PATCH_INDEX_OFFSET: usize = 7;

/// Patch-data reply: the ten name bytes, as offsets back from the end of
/// the model's patch frame (`patch_len - offset`). Non-contiguous because
/// the name is interleaved with other patch data.
pub const NAME_TAIL_OFFSETS: [usize; 10] = [14, 12, 11, 10, 9, 8, 7, 6, 4, 3];

/// Switch the pedal's editor mode on or off. Editor mode is required
/// before patch-data queries return meaningful data.
pub fn editor_mode(device_id: u8, on: bool) -> [u8; 6] {
    [0xf0, 0x52, 0x00, device_id, if on { 0x50 } else { 0x51 }, 0xf7]
}

/// Ask for the current patch index.
pub fn patch_index_request(device_id: u8) -> [u8; 6] {
    [0xf0, 0x52, 0x00, device_id, 0x33, 0xf7]
}

/// Ask for the current patch's data frame.
pub fn patch_data_request(device_id: u8) -> [u8; 6] {
    [0xf0, 0x52, 0x00, device_id, 0x29, 0xf7]
}

/// Enable or bypass one effect slot of the current patch.
pub fn effect_bypass(device_id: u8, slot: u8, active: bool) -> [u8; 11] {
    [
        0xf0,
        0x52,
        0x00,
        device_id,
        0x31,
        slot,
        0x00,
        active as u8,
        0x00,
        0x00,
        0xf7,
    ]
}

/// Tuner on/off as a MIDI Control Change.
pub fn tuner_mode(on: bool) -> [u8; 3] {
    [0xb0, 0x4a, if on { 0x41 } else { 0x00 }]
}

/// MIDI Program Change selecting a patch.
pub fn program_change(patch: u8) -> [u8; 2] {
    [0xc0, patch & 0x7f]
}
