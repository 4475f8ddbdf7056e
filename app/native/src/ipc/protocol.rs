//! i3/sway IPC framing.
//!
//! Every message, in either direction, is:
//!
//! ```text
//! "i3-ipc" | u32 payload length | u32 message type | payload
//! ```
//!
//! Integers use the host byte order.

use std::io::{Read, Write};

use super::IpcError;

/// Magic string that opens every frame.
pub const MAGIC: &[u8; 6] = b"i3-ipc";

/// Size of the fixed frame header.
pub const HEADER_LEN: usize = MAGIC.len() + 8;

/// Largest payload accepted in either direction. Real trees are a few hundred KiB.
const MAX_PAYLOAD_LEN: u32 = 64 * 1024 * 1024;

/// IPC message types used by wkill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum MessageType {
    RunCommand = 0,
    GetTree = 4,
}

impl MessageType {
    #[must_use]
    pub const fn code(self) -> u32 { self as u32 }
}

/// Writes a single framed message.
///
/// # Errors
///
/// Returns an error if the payload is too large or the write fails.
pub fn write_message(
    mut writer: impl Write,
    kind: MessageType,
    payload: &[u8],
) -> Result<(), IpcError> {
    let len = u32::try_from(payload.len())
        .ok()
        .filter(|len| *len <= MAX_PAYLOAD_LEN)
        .ok_or(IpcError::RequestTooLarge(payload.len()))?;

    let mut frame = Vec::with_capacity(HEADER_LEN + payload.len());
    frame.extend_from_slice(MAGIC);
    frame.extend_from_slice(&len.to_ne_bytes());
    frame.extend_from_slice(&kind.code().to_ne_bytes());
    frame.extend_from_slice(payload);

    writer.write_all(&frame)?;
    writer.flush()?;
    Ok(())
}

/// Reads a single framed message and returns its type code and payload.
///
/// # Errors
///
/// Returns an error if the stream ends early or the header is malformed.
pub fn read_message(mut reader: impl Read) -> Result<(u32, Vec<u8>), IpcError> {
    let mut header = [0u8; HEADER_LEN];
    reader.read_exact(&mut header)?;

    if &header[..MAGIC.len()] != MAGIC {
        return Err(IpcError::InvalidResponse("bad magic in reply header".to_string()));
    }

    let len = u32::from_ne_bytes(read_u32(&header, MAGIC.len()));
    let kind = u32::from_ne_bytes(read_u32(&header, MAGIC.len() + 4));

    if len > MAX_PAYLOAD_LEN {
        return Err(IpcError::InvalidResponse(format!("reply of {len} bytes is too large")));
    }

    let mut payload = vec![0u8; len as usize];
    reader.read_exact(&mut payload)?;

    Ok((kind, payload))
}

fn read_u32(header: &[u8; HEADER_LEN], offset: usize) -> [u8; 4] {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&header[offset..offset + 4]);
    bytes
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_header_layout() {
        let mut buf = Vec::new();
        write_message(&mut buf, MessageType::GetTree, b"").unwrap();

        assert_eq!(buf.len(), HEADER_LEN);
        assert_eq!(&buf[..6], b"i3-ipc");
        assert_eq!(&buf[6..10], &0u32.to_ne_bytes());
        assert_eq!(&buf[10..14], &4u32.to_ne_bytes());
    }

    #[test]
    fn test_read_back_command() {
        let mut buf = Vec::new();
        write_message(&mut buf, MessageType::RunCommand, b"[con_id=7] kill").unwrap();

        let (kind, payload) = read_message(Cursor::new(buf)).unwrap();
        assert_eq!(kind, MessageType::RunCommand.code());
        assert_eq!(payload, b"[con_id=7] kill");
    }

    #[test]
    fn test_bad_magic_is_rejected() {
        let mut buf = b"i4-ipc".to_vec();
        buf.extend_from_slice(&0u32.to_ne_bytes());
        buf.extend_from_slice(&4u32.to_ne_bytes());

        let err = read_message(Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, IpcError::InvalidResponse(_)));
    }

    #[test]
    fn test_truncated_payload_is_io_error() {
        let mut buf = MAGIC.to_vec();
        buf.extend_from_slice(&10u32.to_ne_bytes());
        buf.extend_from_slice(&4u32.to_ne_bytes());
        buf.extend_from_slice(b"abc");

        let err = read_message(Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, IpcError::Io(_)));
    }

    #[test]
    fn test_oversized_request_is_rejected_before_writing() {
        let payload = vec![b' '; MAX_PAYLOAD_LEN as usize + 1];
        let mut buf = Vec::new();

        let err = write_message(&mut buf, MessageType::RunCommand, &payload).unwrap_err();
        assert!(matches!(err, IpcError::RequestTooLarge(len) if len == payload.len()));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_oversized_reply_is_rejected() {
        let mut buf = MAGIC.to_vec();
        buf.extend_from_slice(&u32::MAX.to_ne_bytes());
        buf.extend_from_slice(&4u32.to_ne_bytes());

        let err = read_message(Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, IpcError::InvalidResponse(_)));
    }
}
