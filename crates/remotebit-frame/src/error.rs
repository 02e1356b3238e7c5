use crate::format::NumericFormat;

/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// A value does not fit the numeric format it is encoded with.
    #[error("value {value} at index {index} out of range for {format}")]
    ValueOutOfRange {
        index: usize,
        value: i32,
        format: NumericFormat,
    },

    /// The buffer is shorter than the 2-byte frame header.
    #[error("frame too short ({len} bytes, need at least 2)")]
    FrameTooShort { len: usize },

    /// The encoded frame exceeds the configured maximum size.
    #[error("frame too large ({size} bytes, max {max})")]
    FrameTooLarge { size: usize, max: usize },

    /// Numeric format tag outside 1..=4.
    #[error("unknown numeric format tag {0}")]
    UnknownFormat(u8),

    /// Component tag not in the known component set.
    #[error("unknown component tag {0}")]
    UnknownComponent(u8),

    /// Instance id above the supported range.
    #[error("instance id {0} out of range (max {max})", max = crate::component::InstanceId::MAX)]
    InvalidInstanceId(u8),

    /// The link refused the encoded frame.
    #[error("link error: {0}")]
    Link(#[from] remotebit_link::LinkError),
}

pub type Result<T> = std::result::Result<T, FrameError>;
