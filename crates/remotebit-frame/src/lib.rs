//! Component-addressed numeric vector framing.
//!
//! Every frame is one link buffer:
//! - 1 byte component tag
//! - 1 byte instance id
//! - zero or more packed little-endian values, all of one [`NumericFormat`]
//!
//! No length prefix, no checksum. The receiver must already know which
//! format a (component, id) pair carries.

pub mod codec;
pub mod component;
pub mod error;
pub mod format;
pub mod writer;

pub use codec::{
    decode_frame, decode_values, encode, encode_frame, encoded_len, peek_key, DecodedFrame, FrameConfig,
    DEFAULT_MAX_FRAME_SIZE, HEADER_SIZE,
};
pub use component::{InstanceId, ReceivedComponent, SendComponent};
pub use error::{FrameError, Result};
pub use format::NumericFormat;
pub use writer::FrameWriter;
