//! Notification datagram codec.
//!
//! The runtime sends one fixed-size datagram per event, in native byte
//! order:
//!
//! ```text
//! +-----------+------------------------------+------------+
//! | kind: i32 | name: [u8; MAX_NAME_LEN]     | value: i32 |
//! +-----------+------------------------------+------------+
//! ```
//!
//! The name is NUL-terminated and NUL-padded.

use lxcmon_common::constants::MAX_NAME_LEN;
use lxcmon_common::types::{Event, EventKind};

const KIND_OFFSET: usize = 0;
const NAME_OFFSET: usize = KIND_OFFSET + size_of::<i32>();
const VALUE_OFFSET: usize = NAME_OFFSET + MAX_NAME_LEN;

/// Size in bytes of one notification datagram.
pub const MESSAGE_SIZE: usize = VALUE_OFFSET + size_of::<i32>();

/// Decodes one datagram.
///
/// Returns `None` for datagrams too short to hold a message. Trailing
/// bytes past [`MESSAGE_SIZE`] are ignored.
#[must_use]
pub fn decode(buf: &[u8]) -> Option<Event> {
    if buf.len() < MESSAGE_SIZE {
        return None;
    }

    let kind = read_i32(buf, KIND_OFFSET)?;
    let value = read_i32(buf, VALUE_OFFSET)?;

    let name_field = &buf[NAME_OFFSET..VALUE_OFFSET];
    let end = name_field
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(name_field.len());
    let name = String::from_utf8_lossy(&name_field[..end]).into_owned();

    Some(Event {
        name,
        kind: EventKind::from_code(kind),
        value,
    })
}

/// Encodes an event into a datagram.
///
/// Names longer than `MAX_NAME_LEN - 1` bytes are truncated so the field
/// always keeps its terminating NUL.
#[must_use]
pub fn encode(event: &Event) -> Vec<u8> {
    let mut buf = vec![0u8; MESSAGE_SIZE];
    buf[KIND_OFFSET..NAME_OFFSET].copy_from_slice(&event.kind.code().to_ne_bytes());

    let name = event.name.as_bytes();
    let len = name.len().min(MAX_NAME_LEN - 1);
    buf[NAME_OFFSET..NAME_OFFSET + len].copy_from_slice(&name[..len]);

    buf[VALUE_OFFSET..MESSAGE_SIZE].copy_from_slice(&event.value.to_ne_bytes());
    buf
}

fn read_i32(buf: &[u8], offset: usize) -> Option<i32> {
    let bytes = buf.get(offset..offset + size_of::<i32>())?;
    Some(i32::from_ne_bytes(bytes.try_into().ok()?))
}
