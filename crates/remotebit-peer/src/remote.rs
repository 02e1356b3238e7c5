use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use remotebit_frame::{
    FrameConfig, FrameWriter, InstanceId, NumericFormat, ReceivedComponent, SendComponent,
};
use remotebit_link::Link;
use tracing::{debug, info};

use crate::error::Result;
use crate::registry::DispatchRegistry;

/// Remote behavior configuration.
#[derive(Debug, Clone, Default)]
pub struct RemoteConfig {
    /// Outbound frame limits.
    pub frame: FrameConfig,
}

/// One side of a remote:bit link.
///
/// Outbound values are encoded and handed straight to the link. Inbound
/// buffers reach registered handlers once [`start`](Self::start) has
/// subscribed to the link's arrival notifications.
pub struct Remote<L: Link + 'static> {
    writer: FrameWriter<Arc<L>>,
    registry: Arc<DispatchRegistry>,
    started: AtomicBool,
}

impl<L: Link + 'static> Remote<L> {
    /// Create a remote over `link` with default configuration.
    pub fn new(link: L) -> Self {
        Self::with_config(link, RemoteConfig::default())
    }

    /// Create a remote over `link` with explicit configuration.
    pub fn with_config(link: L, config: RemoteConfig) -> Self {
        Self {
            writer: FrameWriter::with_config(Arc::new(link), config.frame),
            registry: Arc::new(DispatchRegistry::new()),
            started: AtomicBool::new(false),
        }
    }

    /// Subscribe to inbound buffers.
    ///
    /// Buffers the link queued before the first call are discarded. Only the
    /// first call subscribes; later calls are no-ops, so every arrival is
    /// dispatched exactly once.
    pub fn start(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            debug!("remote already started");
            return;
        }

        let link = self.writer.get_ref();
        let mut stale = 0usize;
        while link.try_receive_bytes().is_some() {
            stale += 1;
        }
        if stale > 0 {
            debug!(stale, "discarded buffers received before start");
        }

        let reader = Arc::downgrade(link);
        let registry = Arc::clone(&self.registry);
        link.on_bytes_arrived(Arc::new(move || {
            let Some(link) = reader.upgrade() else {
                return;
            };
            // One notification may cover several buffers.
            while let Some(buf) = link.try_receive_bytes() {
                registry.dispatch(&buf);
            }
        }));
        info!("remote started");
    }

    /// Whether [`start`](Self::start) has run.
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    /// Whether the link is up.
    pub fn is_connected(&self) -> bool {
        self.link().is_link_up()
    }

    /// Send `values` to a component instance on the other side.
    pub fn send(
        &self,
        component: SendComponent,
        id: InstanceId,
        values: &[i32],
        format: NumericFormat,
    ) -> Result<()> {
        self.send_raw(component.into(), id.into(), values, format)
    }

    /// Send to an arbitrary `(component, id)` pair.
    pub fn send_raw(
        &self,
        component: u8,
        id: u8,
        values: &[i32],
        format: NumericFormat,
    ) -> Result<()> {
        self.writer.send(component, id, format, values)?;
        Ok(())
    }

    /// Handle values received from a component instance.
    ///
    /// Replaces any handler already registered for the pair.
    pub fn on_received<F>(
        &self,
        component: ReceivedComponent,
        id: InstanceId,
        format: NumericFormat,
        callback: F,
    ) where
        F: Fn(&[i32]) + Send + Sync + 'static,
    {
        self.on_received_raw(component.into(), id.into(), format, callback);
    }

    /// Handle values received for an arbitrary `(component, id)` pair.
    pub fn on_received_raw<F>(&self, component: u8, id: u8, format: NumericFormat, callback: F)
    where
        F: Fn(&[i32]) + Send + Sync + 'static,
    {
        self.registry.register(component, id, format, callback);
    }

    /// The shared dispatch registry.
    pub fn registry(&self) -> &Arc<DispatchRegistry> {
        &self.registry
    }

    /// The underlying link.
    pub fn link(&self) -> &L {
        self.writer.get_ref()
    }

    /// Outbound frame configuration.
    pub fn frame_config(&self) -> &FrameConfig {
        self.writer.config()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    use remotebit_frame::FrameError;
    use remotebit_link::{LinkError, MemoryLink};

    use super::*;
    use crate::error::RemoteError;

    fn id(n: u8) -> InstanceId {
        InstanceId::new(n).unwrap()
    }

    #[test]
    fn values_cross_the_link() {
        let (a, b) = MemoryLink::pair();
        let sender = Remote::new(a);
        let receiver = Remote::new(b);
        receiver.start();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        receiver.on_received(
            ReceivedComponent::Joystick,
            id(0),
            NumericFormat::Int16LE,
            move |values| sink.lock().unwrap().push(values.to_vec()),
        );

        sender
            .send(SendComponent::Distance, id(0), &[-1, 300], NumericFormat::Int16LE)
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![vec![-1, 300]]);
    }

    #[test]
    fn nothing_dispatched_before_start() {
        let (a, b) = MemoryLink::pair();
        let sender = Remote::new(a);
        let receiver = Remote::new(b);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        receiver.on_received_raw(100, 0, NumericFormat::UInt8, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        sender.send_raw(100, 0, &[1], NumericFormat::UInt8).unwrap();

        assert!(!receiver.is_started());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(receiver.link().pending(), 1);
    }

    #[test]
    fn backlog_before_start_is_dropped() {
        let (a, b) = MemoryLink::pair();
        let sender = Remote::new(a);
        let receiver = Remote::new(b);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        receiver.on_received_raw(100, 0, NumericFormat::UInt8, move |values| {
            sink.lock().unwrap().push(values.to_vec());
        });

        sender.send_raw(100, 0, &[1], NumericFormat::UInt8).unwrap();
        receiver.start();
        sender.send_raw(100, 0, &[2], NumericFormat::UInt8).unwrap();
        sender.send_raw(100, 0, &[3], NumericFormat::UInt8).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![vec![2], vec![3]]);
        assert_eq!(receiver.link().pending(), 0);
    }

    #[test]
    fn start_is_idempotent() {
        let (a, b) = MemoryLink::pair();
        let sender = Remote::new(a);
        let receiver = Remote::new(b);
        receiver.start();
        receiver.start();

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        receiver.on_received_raw(100, 0, NumericFormat::UInt8, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        sender.send_raw(100, 0, &[1], NumericFormat::UInt8).unwrap();

        assert!(receiver.is_started());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(receiver.link().pending(), 0);
    }

    #[test]
    fn is_connected_follows_link() {
        let (a, b) = MemoryLink::pair();
        let remote = Remote::new(a);
        assert!(remote.is_connected());

        b.disconnect();
        assert!(!remote.is_connected());
    }

    #[test]
    fn send_on_down_link_fails() {
        let (a, b) = MemoryLink::pair();
        let remote = Remote::new(a);
        b.disconnect();

        let err = remote
            .send(SendComponent::Speed, id(1), &[1], NumericFormat::UInt8)
            .unwrap_err();

        assert!(matches!(err, RemoteError::Link(LinkError::NotConnected)));
    }

    #[test]
    fn out_of_range_send_fails_fast() {
        let (a, b) = MemoryLink::pair();
        let remote = Remote::new(a);

        let err = remote
            .send(SendComponent::Speed, id(1), &[-1], NumericFormat::UInt8)
            .unwrap_err();

        assert!(matches!(
            err,
            RemoteError::Frame(FrameError::ValueOutOfRange { value: -1, .. })
        ));
        assert_eq!(b.pending(), 0);
    }

    #[test]
    fn frame_limit_comes_from_config() {
        let (a, _b) = MemoryLink::pair_with_capacity(64);
        let remote = Remote::with_config(
            a,
            RemoteConfig {
                frame: FrameConfig { max_frame_size: 4 },
            },
        );
        assert_eq!(remote.frame_config().max_frame_size, 4);

        let err = remote
            .send_raw(100, 0, &[1, 2, 3], NumericFormat::UInt8)
            .unwrap_err();
        assert!(matches!(
            err,
            RemoteError::Frame(FrameError::FrameTooLarge { size: 5, max: 4 })
        ));
    }

    #[test]
    fn handler_can_reply_from_inside_dispatch() {
        let (a, b) = MemoryLink::pair();
        let left = Arc::new(Remote::new(a));
        let right = Arc::new(Remote::new(b));
        left.start();
        right.start();

        let replier = Arc::clone(&right);
        right.on_received_raw(100, 0, NumericFormat::UInt8, move |values| {
            let doubled: Vec<i32> = values.iter().map(|v| v * 2).collect();
            replier
                .send_raw(101, 0, &doubled, NumericFormat::UInt16LE)
                .unwrap();
        });

        let replies = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&replies);
        left.on_received_raw(101, 0, NumericFormat::UInt16LE, move |values| {
            sink.lock().unwrap().push(values.to_vec());
        });

        left.send_raw(100, 0, &[21, 200], NumericFormat::UInt8).unwrap();

        assert_eq!(*replies.lock().unwrap(), vec![vec![42, 400]]);
    }
}
