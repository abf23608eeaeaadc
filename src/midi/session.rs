//! Device session: handshake, state and the command set.
//!
//! A [`DeviceSession`] owns the transport for the lifetime of one
//! physical connection. All commands run synchronously from the single
//! cooperative loop; none are re-entrant.

use embedded_hal::delay::DelayNs;

use crate::config;
use crate::error::Error;
use crate::midi::frames::{
    self, DEVICE_ID_OFFSET, FW_VERSION_OFFSETS, NAME_TAIL_OFFSETS, PATCH_INDEX_OFFSET,
};
use crate::midi::transport::{MidiTransport, MAX_FRAME};
use crate::midi::{DeviceModel, MAX_EFFECTS_PER_PATCH, MAX_PATCHES, PATCH_NAME_LEN};

/// Patch names preloaded by a full sweep, keyed by patch index.
///
/// Immutable once the sweep completes: a patch renamed from the pedal's
/// own UI shows stale until the next preload.
pub struct PatchNameCache {
    names: [[u8; PATCH_NAME_LEN]; MAX_PATCHES as usize],
    complete: bool,
}

impl PatchNameCache {
    fn new() -> Self {
        Self {
            names: [[b' '; PATCH_NAME_LEN]; MAX_PATCHES as usize],
            complete: false,
        }
    }

    fn set(&mut self, index: u8, name: &[u8; PATCH_NAME_LEN]) {
        self.names[index as usize] = *name;
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Name for `index`, once the sweep has run.
    pub fn get(&self, index: u8) -> Option<&str> {
        if !self.complete || index >= MAX_PATCHES {
            return None;
        }
        Some(as_text(&self.names[index as usize]))
    }
}

fn as_text(bytes: &[u8]) -> &str {
    // Names are 7-bit ASCII on the wire; fall back rather than panic.
    core::str::from_utf8(bytes).unwrap_or("?")
}

/// One connected pedal.
pub struct DeviceSession<T, D> {
    transport: T,
    delay: D,
    model: DeviceModel,
    device_id: u8,
    fw_version: [u8; 4],
    patch_index: u8,
    patch_name: [u8; PATCH_NAME_LEN],
    tuner_enabled: bool,
    bypassed: bool,
    names: PatchNameCache,
}

impl<T: MidiTransport, D: DelayNs> DeviceSession<T, D> {
    /// A fresh, unidentified session. Not useful until [`identify`]
    /// succeeds; the model stays [`DeviceModel::Invalid`].
    ///
    /// [`identify`]: DeviceSession::identify
    pub fn new(transport: T, delay: D) -> Self {
        Self {
            transport,
            delay,
            model: DeviceModel::Invalid,
            device_id: 0,
            fw_version: [b'?'; 4],
            patch_index: 0,
            patch_name: [b' '; PATCH_NAME_LEN],
            tuner_enabled: false,
            bypassed: false,
            names: PatchNameCache::new(),
        }
    }

    /// Identification handshake: universal device inquiry, then device id
    /// and firmware version from the reply's fixed offsets.
    ///
    /// An unknown device id is not an error - the session degrades to
    /// [`DeviceModel::Invalid`] and the caller decides what to show.
    pub fn identify(&mut self) -> Result<DeviceModel, Error> {
        self.transport.send(&frames::IDENTIFY_REQUEST)?;

        let mut frame = [0u8; MAX_FRAME];
        let len = self.transport.receive(&mut frame)?;
        let last = FW_VERSION_OFFSETS[FW_VERSION_OFFSETS.len() - 1];
        if len <= last {
            return Err(Error::Malformed);
        }

        self.device_id = frame[DEVICE_ID_OFFSET];
        self.model = DeviceModel::from_id(self.device_id);
        for (dst, &off) in self.fw_version.iter_mut().zip(FW_VERSION_OFFSETS.iter()) {
            *dst = frame[off];
        }
        Ok(self.model)
    }

    pub fn model(&self) -> DeviceModel {
        self.model
    }

    pub fn firmware_version(&self) -> &str {
        as_text(&self.fw_version)
    }

    pub fn patch_index(&self) -> u8 {
        self.patch_index
    }

    pub fn patch_name(&self) -> &str {
        as_text(&self.patch_name)
    }

    pub fn tuner_enabled(&self) -> bool {
        self.tuner_enabled
    }

    pub fn bypassed(&self) -> bool {
        self.bypassed
    }

    /// Switch the pedal in or out of editor mode. Editor mode is a
    /// precondition for [`fetch_patch_data`] returning real data.
    ///
    /// [`fetch_patch_data`]: DeviceSession::fetch_patch_data
    pub fn set_editor_mode(&mut self, on: bool) -> Result<(), Error> {
        self.transport.send(&frames::editor_mode(self.device_id, on))?;
        self.delay.delay_ms(config::EDITOR_SETTLE_MS);
        Ok(())
    }

    /// Ask the pedal which patch is active and store it.
    pub fn fetch_patch_index(&mut self) -> Result<u8, Error> {
        self.transport
            .send(&frames::patch_index_request(self.device_id))?;

        let mut frame = [0u8; MAX_FRAME];
        let len = self.transport.receive(&mut frame)?;
        if len <= PATCH_INDEX_OFFSET {
            return Err(Error::Malformed);
        }
        self.patch_index = frame[PATCH_INDEX_OFFSET] % MAX_PATCHES;
        Ok(self.patch_index)
    }

    /// Fetch the current patch's data frame and extract its name from the
    /// ten fixed tail offsets.
    ///
    /// On an unidentified model the reply layout is unknown, so the parse
    /// is skipped and the stored name left untouched.
    pub fn fetch_patch_data(&mut self) -> Result<(), Error> {
        self.transport
            .send(&frames::patch_data_request(self.device_id))?;

        let mut frame = [0u8; MAX_FRAME];
        let len = self.transport.receive(&mut frame)?;

        let patch_len = self.model.patch_data_len();
        if patch_len == 0 {
            return Ok(());
        }
        if len < patch_len {
            return Err(Error::Malformed);
        }
        for (dst, &off) in self.patch_name.iter_mut().zip(NAME_TAIL_OFFSETS.iter()) {
            *dst = frame[patch_len - off];
        }
        Ok(())
    }

    /// Announce the stored patch index with a Program Change. Fire and
    /// forget; the pedal sends no reply.
    pub fn send_patch(&mut self) -> Result<(), Error> {
        self.transport.send(&frames::program_change(self.patch_index))
    }

    /// Step the patch index by `delta`, wrapping in both directions, then
    /// select it and refresh the name.
    ///
    /// The name refetch makes every step a full round-trip; that latency
    /// is inherent to the protocol, not an accident.
    pub fn increment_patch(&mut self, delta: i8) -> Result<u8, Error> {
        let count = MAX_PATCHES as i16;
        self.patch_index = (self.patch_index as i16 + delta as i16).rem_euclid(count) as u8;
        self.send_patch()?;
        self.fetch_patch_data()?;
        Ok(self.patch_index)
    }

    /// Toggle bypass on slot 0 (the first slot acts as a line selector).
    pub fn toggle_bypass(&mut self) -> Result<bool, Error> {
        self.bypassed = !self.bypassed;
        self.transport
            .send(&frames::effect_bypass(self.device_id, 0, self.bypassed))?;
        Ok(self.bypassed)
    }

    /// Toggle bypass on every effect slot of the current patch.
    pub fn toggle_full_bypass(&mut self) -> Result<bool, Error> {
        self.bypassed = !self.bypassed;
        for slot in 0..MAX_EFFECTS_PER_PATCH {
            self.transport
                .send(&frames::effect_bypass(self.device_id, slot, self.bypassed))?;
        }
        Ok(self.bypassed)
    }

    /// Toggle the tuner via Control Change.
    pub fn toggle_tuner(&mut self) -> Result<bool, Error> {
        self.tuner_enabled = !self.tuner_enabled;
        self.transport.send(&frames::tuner_mode(self.tuner_enabled))?;
        Ok(self.tuner_enabled)
    }

    /// Sweep all patches once, recording every name, then restore the
    /// patch that was active. `progress` runs after each patch so the
    /// display can show the sweep advancing.
    pub fn preload_patch_names(
        &mut self,
        mut progress: impl FnMut(u8, &str),
    ) -> Result<(), Error> {
        let restore = self.fetch_patch_index()?;

        for index in 0..MAX_PATCHES {
            self.patch_index = index;
            self.send_patch()?;
            self.delay.delay_ms(config::PRELOAD_SETTLE_MS);
            self.fetch_patch_data()?;
            self.names.set(index, &self.patch_name);
            progress(index, as_text(&self.patch_name));
        }
        self.names.complete = true;

        self.patch_index = restore;
        self.send_patch()?;
        self.delay.delay_ms(config::PRELOAD_SETTLE_MS);
        self.fetch_patch_data()?;
        Ok(())
    }

    /// Preloaded name for `index`, if the sweep has run.
    pub fn preloaded_name(&self, index: u8) -> Option<&str> {
        self.names.get(index)
    }
}
