//! STX/CR framing for the source's serial protocol.
//!
//! Outbound frames are `STX || ASCII command || CR` with no checksum or
//! length prefix. Inbound frames are read byte-wise until a CR terminator
//! or a 255-byte cap, bounded by the port's read timeout. A read that
//! yields nothing is the normal "device has stopped talking" signal, not a
//! protocol error.

use std::io::{self, Read, Write};

/// Start-of-frame byte.
pub const PACKET_START: u8 = 0x02; // STX
/// End-of-frame byte.
pub const PACKET_END: u8 = 0x0D; // CR
/// Upper bound on an inbound frame, terminator included.
pub const MAX_FRAME_LEN: usize = 255;

/// Identity-request command understood by the source firmware.
pub const IDENT_COMMAND: &str = "SNUM";

/// Outcome of one bounded read cycle.
#[derive(Debug, PartialEq)]
pub enum ReadOutcome {
    /// A frame was received and decoded to this identity string.
    Identity(String),
    /// The read timed out with zero bytes; the session should stop
    /// listening.
    NoData,
}

/// Builds the outbound frame for a command.
pub fn encode_frame(command: &str) -> Vec<u8> {
    let mut frame = Vec::with_capacity(command.len() + 2);
    frame.push(PACKET_START);
    frame.extend_from_slice(command.as_bytes());
    frame.push(PACKET_END);
    frame
}

/// Decodes raw frame bytes into the logical identity string: ASCII text
/// with surrounding whitespace stripped and any stray STX bytes removed.
pub fn decode_payload(raw: &[u8]) -> io::Result<String> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(text.trim().replace('\x02', ""))
}

/// Performs one bounded read cycle: bytes are consumed until CR, the
/// 255-byte cap, or a timeout, whichever comes first.
pub fn read_frame<R: Read>(channel: &mut R) -> io::Result<ReadOutcome> {
    let mut raw = Vec::new();
    let mut byte = [0u8; 1];

    while raw.len() < MAX_FRAME_LEN {
        match channel.read(&mut byte) {
            Ok(0) => break,
            Ok(_) => {
                raw.push(byte[0]);
                if byte[0] == PACKET_END {
                    break;
                }
            }
            Err(ref e) if e.kind() == io::ErrorKind::TimedOut => break,
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    if raw.is_empty() {
        return Ok(ReadOutcome::NoData);
    }
    Ok(ReadOutcome::Identity(decode_payload(&raw)?))
}

/// Sends the `SNUM` frame and performs exactly one decode-read cycle,
/// returning the identity string the device reported (possibly empty).
pub fn request_identity<C: Read + Write>(channel: &mut C) -> io::Result<String> {
    channel.write_all(&encode_frame(IDENT_COMMAND))?;
    channel.flush()?;

    match read_frame(channel)? {
        ReadOutcome::Identity(identity) => Ok(identity),
        ReadOutcome::NoData => Ok(String::new()),
    }
}
