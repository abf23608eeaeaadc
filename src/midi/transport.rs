//! Transport layer between the session and the USB-MIDI bridge.
//!
//! The pedal is reached through a bridge that forwards raw USB-MIDI event
//! packets over a byte stream: every MIDI message travels as 4-byte
//! packets whose first byte is the cable/Code-Index-Number header. The
//! receive path must drop byte 1 of every group of 4 and keep bytes 2-4;
//! the send path packs the inverse.
//!
//! [`MidiLink`] layers retry-until-complete receive semantics on top of a
//! [`RawMidiBus`]; the wait is bounded by `config::RESPONSE_TIMEOUT_MS`
//! and surfaces [`Error::Timeout`] rather than blocking forever on an
//! unplugged pedal.

use embedded_hal::delay::DelayNs;

use crate::config;
use crate::error::Error;
use crate::midi::frames::SYSEX_END;

/// Largest raw (packet-framed) response we accept from the bridge.
pub const MAX_RAW_RESPONSE: usize = 256;

/// Largest stripped MIDI frame (3/4 of the raw size).
pub const MAX_FRAME: usize = MAX_RAW_RESPONSE / 4 * 3;

/// Byte-level bus carrying 4-byte USB-MIDI event packets both ways.
///
/// `read_packets` is a poll: it returns the bytes currently available
/// (possibly a partial response) and `Ok(0)` when nothing is pending.
pub trait RawMidiBus {
    fn write_packets(&mut self, packets: &[u8]) -> Result<(), Error>;
    fn read_packets(&mut self, buf: &mut [u8]) -> Result<usize, Error>;
}

/// Request/response port the device session drives: whole MIDI messages
/// out, whole SysEx reply frames in.
pub trait MidiTransport {
    fn send(&mut self, message: &[u8]) -> Result<(), Error>;

    /// Receive one complete SysEx reply into `out`; returns its length
    /// (terminator included).
    fn receive(&mut self, out: &mut [u8]) -> Result<usize, Error>;
}

/// Pack one MIDI message into USB-MIDI event packets.
///
/// Returns the packed length. Only the message families this firmware
/// sends are supported: SysEx, and 2/3-byte channel messages.
pub fn pack_event_packets(message: &[u8], out: &mut [u8]) -> Result<usize, Error> {
    let Some(&status) = message.first() else {
        return Err(Error::Malformed);
    };

    let mut len = 0;
    let mut push = |packet: [u8; 4], len: &mut usize| -> Result<(), Error> {
        if *len + 4 > out.len() {
            return Err(Error::BufferOverflow);
        }
        out[*len..*len + 4].copy_from_slice(&packet);
        *len += 4;
        Ok(())
    };

    if status == 0xf0 {
        // SysEx: CIN 0x4 for running chunks, 0x5/0x6/0x7 for the tail.
        let mut chunks = message.chunks(3).peekable();
        while let Some(chunk) = chunks.next() {
            let last = chunks.peek().is_none();
            let cin = if last { 0x04 + chunk.len() as u8 } else { 0x04 };
            let mut packet = [cin, 0, 0, 0];
            packet[1..1 + chunk.len()].copy_from_slice(chunk);
            push(packet, &mut len)?;
        }
    } else {
        // Channel message: CIN mirrors the status nibble.
        let cin = status >> 4;
        let mut packet = [cin, 0, 0, 0];
        let n = message.len().min(3);
        packet[1..1 + n].copy_from_slice(&message[..n]);
        push(packet, &mut len)?;
    }

    Ok(len)
}

/// Drop the header byte of every 4-byte event packet, keeping the MIDI
/// payload. A trailing partial packet keeps whatever follows its header.
pub fn strip_event_headers(raw: &[u8], out: &mut [u8]) -> usize {
    let mut len = 0;
    for packet in raw.chunks(4) {
        for &b in &packet[1..] {
            if len == out.len() {
                return len;
            }
            out[len] = b;
            len += 1;
        }
    }
    len
}

/// [`MidiTransport`] over a raw packet bus: packs outgoing messages and
/// accumulates incoming packets until a full SysEx reply has arrived.
pub struct MidiLink<B, D> {
    bus: B,
    delay: D,
}

impl<B: RawMidiBus, D: DelayNs> MidiLink<B, D> {
    pub fn new(bus: B, delay: D) -> Self {
        Self { bus, delay }
    }
}

impl<B: RawMidiBus, D: DelayNs> MidiTransport for MidiLink<B, D> {
    fn send(&mut self, message: &[u8]) -> Result<(), Error> {
        let mut packets = [0u8; 32];
        let len = pack_event_packets(message, &mut packets)?;
        self.bus.write_packets(&packets[..len])
    }

    fn receive(&mut self, out: &mut [u8]) -> Result<usize, Error> {
        let mut raw = [0u8; MAX_RAW_RESPONSE];
        let mut raw_len = 0;
        let mut waited_ms = 0;

        loop {
            let n = self.bus.read_packets(&mut raw[raw_len..])?;
            raw_len += n;

            if n > 0 {
                let len = strip_event_headers(&raw[..raw_len], out);
                if let Some(end) = out[..len].iter().position(|&b| b == SYSEX_END) {
                    return Ok(end + 1);
                }
                if raw_len == raw.len() {
                    return Err(Error::BufferOverflow);
                }
            }

            if waited_ms >= config::RESPONSE_TIMEOUT_MS {
                return Err(Error::Timeout);
            }
            self.delay.delay_ms(config::RESPONSE_POLL_MS);
            waited_ms += config::RESPONSE_POLL_MS;
        }
    }
}
