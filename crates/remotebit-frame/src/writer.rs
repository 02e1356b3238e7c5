use remotebit_link::Link;
use tracing::trace;

use crate::codec::{encode, encoded_len, FrameConfig};
use crate::error::{FrameError, Result};
use crate::format::NumericFormat;

/// Encodes frames and hands them to a [`Link`].
///
/// Sending takes `&self`: each frame is encoded into its own buffer, so a
/// handler running inside an arrival callback may send on the same writer.
pub struct FrameWriter<L> {
    link: L,
    config: FrameConfig,
}

impl<L: Link> FrameWriter<L> {
    /// Create a new frame writer with default configuration.
    pub fn new(link: L) -> Self {
        Self::with_config(link, FrameConfig::default())
    }

    /// Create a new frame writer with explicit configuration.
    pub fn with_config(link: L, config: FrameConfig) -> Self {
        Self { link, config }
    }

    /// Encode `values` for `(component, id)` and send the frame.
    ///
    /// Fails without touching the link if a value is out of range for
    /// `format` or the frame would exceed `max_frame_size`.
    pub fn send(
        &self,
        component: u8,
        id: u8,
        format: NumericFormat,
        values: &[i32],
    ) -> Result<()> {
        let size = encoded_len(format, values.len());
        if size > self.config.max_frame_size {
            return Err(FrameError::FrameTooLarge {
                size,
                max: self.config.max_frame_size,
            });
        }

        let frame = encode(component, id, format, values)?;
        self.link.send_bytes(&frame)?;
        trace!(component, id, %format, size, "frame sent");
        Ok(())
    }

    /// Borrow the underlying link.
    pub fn get_ref(&self) -> &L {
        &self.link
    }

    /// Consume the writer and return the link.
    pub fn into_inner(self) -> L {
        self.link
    }

    /// Update maximum frame size for subsequent sends.
    pub fn set_max_frame_size(&mut self, max_frame_size: usize) {
        self.config.max_frame_size = max_frame_size;
    }

    /// Current frame writer configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}
