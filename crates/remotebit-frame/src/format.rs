//! Numeric formats carried in a frame's value section.
//!
//! | tag | format   | width | range             |
//! |-----|----------|-------|-------------------|
//! | 1   | Int8     | 1     | -128..=127        |
//! | 2   | UInt8    | 1     | 0..=255           |
//! | 3   | Int16LE  | 2     | -32768..=32767    |
//! | 4   | UInt16LE | 2     | 0..=65535         |

use std::fmt;

use bytes::BufMut;
use serde::Serialize;

use crate::error::FrameError;

/// Width and signedness of every value in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum NumericFormat {
    Int8 = 1,
    UInt8 = 2,
    Int16LE = 3,
    UInt16LE = 4,
}

impl NumericFormat {
    /// All formats in tag order.
    pub const ALL: [NumericFormat; 4] = [
        NumericFormat::Int8,
        NumericFormat::UInt8,
        NumericFormat::Int16LE,
        NumericFormat::UInt16LE,
    ];

    /// Wire tag.
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Encoded width of one value in bytes.
    pub const fn width(self) -> usize {
        match self {
            NumericFormat::Int8 | NumericFormat::UInt8 => 1,
            NumericFormat::Int16LE | NumericFormat::UInt16LE => 2,
        }
    }

    /// Whether values of this format can be negative.
    pub const fn is_signed(self) -> bool {
        matches!(self, NumericFormat::Int8 | NumericFormat::Int16LE)
    }

    /// Smallest representable value.
    pub const fn min(self) -> i32 {
        match self {
            NumericFormat::Int8 => i8::MIN as i32,
            NumericFormat::UInt8 | NumericFormat::UInt16LE => 0,
            NumericFormat::Int16LE => i16::MIN as i32,
        }
    }

    /// Largest representable value.
    pub const fn max(self) -> i32 {
        match self {
            NumericFormat::Int8 => i8::MAX as i32,
            NumericFormat::UInt8 => u8::MAX as i32,
            NumericFormat::Int16LE => i16::MAX as i32,
            NumericFormat::UInt16LE => u16::MAX as i32,
        }
    }

    /// Whether `value` fits this format.
    pub const fn contains(self, value: i32) -> bool {
        value >= self.min() && value <= self.max()
    }

    /// Short lowercase name, as accepted on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            NumericFormat::Int8 => "int8",
            NumericFormat::UInt8 => "uint8",
            NumericFormat::Int16LE => "int16le",
            NumericFormat::UInt16LE => "uint16le",
        }
    }

    /// Append one in-range value. Callers check [`contains`](Self::contains) first.
    pub(crate) fn put(self, value: i32, dst: &mut impl BufMut) {
        match self {
            NumericFormat::Int8 => dst.put_i8(value as i8),
            NumericFormat::UInt8 => dst.put_u8(value as u8),
            NumericFormat::Int16LE => dst.put_i16_le(value as i16),
            NumericFormat::UInt16LE => dst.put_u16_le(value as u16),
        }
    }

    /// Read one value from exactly `width()` bytes.
    pub(crate) fn read(self, chunk: &[u8]) -> i32 {
        match self {
            NumericFormat::Int8 => i32::from(chunk[0] as i8),
            NumericFormat::UInt8 => i32::from(chunk[0]),
            NumericFormat::Int16LE => i32::from(i16::from_le_bytes([chunk[0], chunk[1]])),
            NumericFormat::UInt16LE => i32::from(u16::from_le_bytes([chunk[0], chunk[1]])),
        }
    }
}

impl TryFrom<u8> for NumericFormat {
    type Error = FrameError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(NumericFormat::Int8),
            2 => Ok(NumericFormat::UInt8),
            3 => Ok(NumericFormat::Int16LE),
            4 => Ok(NumericFormat::UInt16LE),
            other => Err(FrameError::UnknownFormat(other)),
        }
    }
}

impl From<NumericFormat> for u8 {
    fn from(format: NumericFormat) -> Self {
        format.tag()
    }
}

impl fmt::Display for NumericFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
