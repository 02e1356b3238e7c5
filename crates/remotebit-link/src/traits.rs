use std::sync::Arc;

use bytes::Bytes;

use crate::error::Result;

/// Callback fired by a link each time a buffer has arrived.
///
/// The callback carries no data; the subscriber pulls the buffer with
/// [`Link::try_receive_bytes`].
pub type ArrivalCallback = Arc<dyn Fn() + Send + Sync>;

/// A point-to-point link that moves opaque byte buffers.
///
/// Implementations own connection establishment, advertising and any
/// link-layer retries. Sends are best-effort: `Ok(())` means the buffer was
/// handed to the link, not that the peer received it.
pub trait Link: Send + Sync {
    /// Hand one buffer to the link.
    fn send_bytes(&self, buf: &[u8]) -> Result<()>;

    /// Take the next received buffer, if one is waiting.
    fn try_receive_bytes(&self) -> Option<Bytes>;

    /// Whether the link is currently up.
    fn is_link_up(&self) -> bool;

    /// Subscribe to arrival notifications.
    ///
    /// Every registered callback fires once per arrived buffer. Registering
    /// the same callback twice makes it fire twice.
    fn on_bytes_arrived(&self, callback: ArrivalCallback);
}

impl<L: Link + ?Sized> Link for Arc<L> {
    fn send_bytes(&self, buf: &[u8]) -> Result<()> {
        (**self).send_bytes(buf)
    }

    fn try_receive_bytes(&self) -> Option<Bytes> {
        (**self).try_receive_bytes()
    }

    fn is_link_up(&self) -> bool {
        (**self).is_link_up()
    }

    fn on_bytes_arrived(&self, callback: ArrivalCallback) {
        (**self).on_bytes_arrived(callback);
    }
}
