use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use bytes::Bytes;
use tracing::{debug, trace};

use crate::error::{LinkError, Result};
use crate::traits::{ArrivalCallback, Link};

/// Default largest buffer a [`MemoryLink`] carries: one BLE notification
/// payload (23-byte ATT MTU minus the 3-byte ATT header).
pub const DEFAULT_MAX_BUFFER: usize = 20;

/// Default number of received buffers an endpoint holds before it starts
/// dropping the oldest.
pub const DEFAULT_MAX_PENDING: usize = 32;

#[derive(Default)]
struct Endpoint {
    inbox: Mutex<VecDeque<Bytes>>,
    callbacks: Mutex<Vec<ArrivalCallback>>,
}

struct Shared {
    up: AtomicBool,
    max_buffer: usize,
    max_pending: usize,
}

/// One end of an in-process loopback link.
///
/// Created in connected pairs with [`MemoryLink::pair`]. A buffer sent on
/// one end lands in the other end's inbox and fires that end's arrival
/// callbacks on the sending thread, the same way a radio stack would raise
/// an RX event.
///
/// Each inbox holds at most `max_pending` buffers. When a buffer arrives at
/// a full inbox the oldest one is dropped, like a radio RX queue overrun.
pub struct MemoryLink {
    local: Arc<Endpoint>,
    remote: Weak<Endpoint>,
    shared: Arc<Shared>,
}

impl MemoryLink {
    /// Create a connected pair with the default buffer bound.
    pub fn pair() -> (Self, Self) {
        Self::pair_with_capacity(DEFAULT_MAX_BUFFER)
    }

    /// Create a connected pair carrying buffers of at most `max_buffer` bytes.
    pub fn pair_with_capacity(max_buffer: usize) -> (Self, Self) {
        Self::pair_with_limits(max_buffer, DEFAULT_MAX_PENDING)
    }

    /// Create a connected pair with explicit buffer and inbox bounds.
    ///
    /// `max_pending` is clamped to at least 1.
    pub fn pair_with_limits(max_buffer: usize, max_pending: usize) -> (Self, Self) {
        let a = Arc::new(Endpoint::default());
        let b = Arc::new(Endpoint::default());
        let shared = Arc::new(Shared {
            up: AtomicBool::new(true),
            max_buffer,
            max_pending: max_pending.max(1),
        });

        let left = Self {
            remote: Arc::downgrade(&b),
            local: a,
            shared: Arc::clone(&shared),
        };
        let right = Self {
            remote: Arc::downgrade(&left.local),
            local: b,
            shared,
        };
        (left, right)
    }

    /// Take the link down on both ends.
    pub fn disconnect(&self) {
        if self.shared.up.swap(false, Ordering::SeqCst) {
            debug!("memory link disconnected");
        }
    }

    /// Bring the link back up on both ends.
    pub fn reconnect(&self) {
        if !self.shared.up.swap(true, Ordering::SeqCst) {
            debug!("memory link reconnected");
        }
    }

    /// Largest buffer this link carries.
    pub fn max_buffer(&self) -> usize {
        self.shared.max_buffer
    }

    /// Most received buffers one end holds.
    pub fn max_pending(&self) -> usize {
        self.shared.max_pending
    }

    /// Number of received buffers not yet taken.
    pub fn pending(&self) -> usize {
        lock(&self.local.inbox).len()
    }
}

impl Link for MemoryLink {
    fn send_bytes(&self, buf: &[u8]) -> Result<()> {
        if !self.is_link_up() {
            return Err(LinkError::NotConnected);
        }
        if buf.len() > self.shared.max_buffer {
            return Err(LinkError::BufferTooLarge {
                size: buf.len(),
                max: self.shared.max_buffer,
            });
        }
        let remote = self.remote.upgrade().ok_or(LinkError::Closed)?;

        {
            let mut inbox = lock(&remote.inbox);
            if inbox.len() >= self.shared.max_pending {
                inbox.pop_front();
                debug!(
                    max_pending = self.shared.max_pending,
                    "inbox full, dropped oldest buffer"
                );
            }
            inbox.push_back(Bytes::copy_from_slice(buf));
        }
        // Callbacks pull from the inbox, so neither lock may be held here.
        let callbacks = lock(&remote.callbacks).clone();
        trace!(size = buf.len(), subscribers = callbacks.len(), "buffer delivered");
        for callback in callbacks {
            callback();
        }
        Ok(())
    }

    fn try_receive_bytes(&self) -> Option<Bytes> {
        lock(&self.local.inbox).pop_front()
    }

    fn is_link_up(&self) -> bool {
        self.shared.up.load(Ordering::SeqCst) && self.remote.strong_count() > 0
    }

    fn on_bytes_arrived(&self, callback: ArrivalCallback) {
        lock(&self.local.callbacks).push(callback);
    }
}

impl std::fmt::Debug for MemoryLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryLink")
            .field("up", &self.is_link_up())
            .field("max_buffer", &self.shared.max_buffer)
            .field("max_pending", &self.shared.max_pending)
            .field("pending", &self.pending())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[test]
    fn send_lands_in_peer_inbox() {
        let (a, b) = MemoryLink::pair();

        a.send_bytes(&[100, 2, 10]).unwrap();

        assert_eq!(b.pending(), 1);
        assert_eq!(a.pending(), 0);
        assert_eq!(b.try_receive_bytes().unwrap().as_ref(), &[100, 2, 10]);
        assert!(b.try_receive_bytes().is_none());
    }

    #[test]
    fn buffers_are_received_in_send_order() {
        let (a, b) = MemoryLink::pair();

        a.send_bytes(b"one").unwrap();
        a.send_bytes(b"two").unwrap();

        assert_eq!(b.try_receive_bytes().unwrap().as_ref(), b"one");
        assert_eq!(b.try_receive_bytes().unwrap().as_ref(), b"two");
    }

    #[test]
    fn arrival_callback_fires_per_buffer() {
        let (a, b) = MemoryLink::pair();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        b.on_bytes_arrived(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        a.send_bytes(b"x").unwrap();
        a.send_bytes(b"y").unwrap();

        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn callback_can_pull_the_buffer() {
        let (a, b) = MemoryLink::pair();
        let b = Arc::new(b);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let reader = Arc::clone(&b);
        let sink = Arc::clone(&seen);
        b.on_bytes_arrived(Arc::new(move || {
            if let Some(buf) = reader.try_receive_bytes() {
                sink.lock().unwrap().push(buf);
            }
        }));

        a.send_bytes(&[1, 2, 3]).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].as_ref(), &[1, 2, 3]);
        assert_eq!(b.pending(), 0);
    }

    #[test]
    fn oversized_buffer_rejected() {
        let (a, b) = MemoryLink::pair_with_capacity(4);

        let err = a.send_bytes(&[0; 5]).unwrap_err();

        assert!(matches!(err, LinkError::BufferTooLarge { size: 5, max: 4 }));
        assert_eq!(b.pending(), 0);
    }

    #[test]
    fn full_inbox_drops_oldest() {
        let (a, b) = MemoryLink::pair_with_limits(DEFAULT_MAX_BUFFER, 2);

        a.send_bytes(b"one").unwrap();
        a.send_bytes(b"two").unwrap();
        a.send_bytes(b"three").unwrap();

        assert_eq!(b.pending(), 2);
        assert_eq!(b.try_receive_bytes().unwrap().as_ref(), b"two");
        assert_eq!(b.try_receive_bytes().unwrap().as_ref(), b"three");
    }

    #[test]
    fn default_pair_bounds_inbox() {
        let (a, b) = MemoryLink::pair();
        for _ in 0..DEFAULT_MAX_PENDING + 5 {
            a.send_bytes(b"x").unwrap();
        }
        assert_eq!(b.max_pending(), DEFAULT_MAX_PENDING);
        assert_eq!(b.pending(), DEFAULT_MAX_PENDING);
    }

    #[test]
    fn disconnected_link_refuses_sends() {
        let (a, b) = MemoryLink::pair();
        b.disconnect();

        assert!(!a.is_link_up());
        assert!(matches!(a.send_bytes(b"x"), Err(LinkError::NotConnected)));

        a.reconnect();
        assert!(b.is_link_up());
        assert!(a.send_bytes(b"x").is_ok());
    }

    #[test]
    fn dropped_peer_takes_link_down() {
        let (a, b) = MemoryLink::pair();
        drop(b);

        assert!(!a.is_link_up());
        assert!(a.send_bytes(b"x").is_err());
    }
}
