use bytes::{BufMut, Bytes, BytesMut};
use serde::Serialize;

use crate::error::{FrameError, Result};
use crate::format::NumericFormat;

/// Frame header: component (1) + instance id (1) = 2 bytes.
pub const HEADER_SIZE: usize = 2;

/// Default maximum frame size: one BLE notification payload.
pub const DEFAULT_MAX_FRAME_SIZE: usize = 20;

/// A decoded frame: the routing header plus its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedFrame {
    /// Component tag.
    pub component: u8,
    /// Instance id.
    pub id: u8,
    /// Values, widened to `i32`.
    pub values: Vec<i32>,
}

impl DecodedFrame {
    /// The `(component, id)` routing key.
    pub fn key(&self) -> (u8, u8) {
        (self.component, self.id)
    }
}

/// Encode a frame into the wire format.
///
/// Wire format:
/// ```text
/// ┌───────────┬──────────┬──────────────────────────────────┐
/// │ Component │ Instance │ Values                           │
/// │ (1B)      │ id (1B)  │ (n × width bytes, LE, packed)    │
/// └───────────┴──────────┴──────────────────────────────────┘
/// ```
///
/// Every value is checked against `format` before anything is written, so
/// `dst` is untouched on error.
pub fn encode_frame(
    component: u8,
    id: u8,
    format: NumericFormat,
    values: &[i32],
    dst: &mut BytesMut,
) -> Result<()> {
    if let Some((index, &value)) = values
        .iter()
        .enumerate()
        .find(|(_, value)| !format.contains(**value))
    {
        return Err(FrameError::ValueOutOfRange {
            index,
            value,
            format,
        });
    }

    dst.reserve(encoded_len(format, values.len()));
    dst.put_u8(component);
    dst.put_u8(id);
    for &value in values {
        format.put(value, dst);
    }
    Ok(())
}

/// Encode a frame into a fresh buffer.
///
/// ```
/// use remotebit_frame::{encode, NumericFormat};
///
/// let frame = encode(101, 0, NumericFormat::Int16LE, &[-1, 300]).unwrap();
/// assert_eq!(frame.as_ref(), &[101, 0, 0xFF, 0xFF, 0x2C, 0x01]);
/// ```
pub fn encode(component: u8, id: u8, format: NumericFormat, values: &[i32]) -> Result<Bytes> {
    let mut dst = BytesMut::with_capacity(encoded_len(format, values.len()));
    encode_frame(component, id, format, values, &mut dst)?;
    Ok(dst.freeze())
}

/// Decode a frame whose values are `format`.
///
/// Trailing bytes that do not complete one more value are ignored.
pub fn decode_frame(buf: &[u8], format: NumericFormat) -> Result<DecodedFrame> {
    let (component, id) = peek_key(buf).ok_or(FrameError::FrameTooShort { len: buf.len() })?;

    Ok(DecodedFrame {
        component,
        id,
        values: decode_values(&buf[HEADER_SIZE..], format),
    })
}

/// Decode the packed values that follow a frame header.
///
/// Reads `payload.len() / width` values; a trailing partial value is
/// ignored.
pub fn decode_values(payload: &[u8], format: NumericFormat) -> Vec<i32> {
    payload
        .chunks_exact(format.width())
        .map(|chunk| format.read(chunk))
        .collect()
}

/// Read the `(component, id)` header without decoding values.
///
/// Returns `None` if the buffer is shorter than the header.
pub fn peek_key(buf: &[u8]) -> Option<(u8, u8)> {
    match buf {
        [component, id, ..] => Some((*component, *id)),
        _ => None,
    }
}

/// Encoded size of a frame carrying `count` values of `format`.
pub fn encoded_len(format: NumericFormat, count: usize) -> usize {
    HEADER_SIZE + count * format.width()
}

/// Configuration for the frame codec.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum encoded frame size in bytes. Default: 20.
    pub max_frame_size: usize,
}

impl FrameConfig {
    /// How many values of `format` fit one frame.
    pub fn max_values(&self, format: NumericFormat) -> usize {
        self.max_frame_size.saturating_sub(HEADER_SIZE) / format.width()
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }
}
