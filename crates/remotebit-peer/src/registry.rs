use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use remotebit_frame::{decode_values, peek_key, NumericFormat, HEADER_SIZE};
use tracing::{debug, trace};

/// Callback invoked with the decoded values of a frame.
pub type Callback = Arc<dyn Fn(&[i32]) + Send + Sync>;

/// Routing key of a frame: `(component, instance id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerKey {
    pub component: u8,
    pub id: u8,
}

impl HandlerKey {
    pub const fn new(component: u8, id: u8) -> Self {
        Self { component, id }
    }
}

impl From<(u8, u8)> for HandlerKey {
    fn from((component, id): (u8, u8)) -> Self {
        Self::new(component, id)
    }
}

impl fmt::Display for HandlerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.component, self.id)
    }
}

/// What happened to one inbound buffer.
///
/// None of these is an error: short frames and unknown keys are expected
/// noise on the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Shorter than the frame header; discarded.
    TooShort { len: usize },
    /// No handler registered for the key; discarded.
    Unregistered(HandlerKey),
    /// The handler ran with `values` decoded values.
    Delivered { key: HandlerKey, values: usize },
}

struct Entry {
    format: NumericFormat,
    callback: Callback,
}

/// Key-addressed table of (format, callback) handlers.
///
/// At most one handler per key; registering again replaces it. The table is
/// guarded by a single lock that is held only for the lookup or insert and
/// never while a callback runs, so a callback may register handlers itself.
#[derive(Default)]
pub struct DispatchRegistry {
    entries: Mutex<HashMap<HandlerKey, Entry>>,
}

impl DispatchRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for `(component, id)`, decoding values as `format`.
    ///
    /// Replaces any handler already registered for the key.
    pub fn register<F>(&self, component: u8, id: u8, format: NumericFormat, callback: F)
    where
        F: Fn(&[i32]) + Send + Sync + 'static,
    {
        let key = HandlerKey::new(component, id);
        let previous = self.lock().insert(
            key,
            Entry {
                format,
                callback: Arc::new(callback),
            },
        );
        debug!(%key, %format, replaced = previous.is_some(), "handler registered");
    }

    /// Route one inbound buffer to its handler.
    ///
    /// The handler runs synchronously on the calling thread.
    pub fn dispatch(&self, buf: &[u8]) -> Dispatch {
        let Some(key) = peek_key(buf).map(HandlerKey::from) else {
            debug!(len = buf.len(), "discarding short frame");
            return Dispatch::TooShort { len: buf.len() };
        };

        let handler = self
            .lock()
            .get(&key)
            .map(|entry| (entry.format, Arc::clone(&entry.callback)));
        let Some((format, callback)) = handler else {
            trace!(%key, "no handler registered, discarding frame");
            return Dispatch::Unregistered(key);
        };

        let payload = &buf[HEADER_SIZE..];
        let trailing = payload.len() % format.width();
        if trailing != 0 {
            debug!(%key, trailing, "ignoring trailing partial value");
        }
        let values = decode_values(payload, format);

        trace!(%key, values = values.len(), "dispatching frame");
        callback(&values);
        Dispatch::Delivered {
            key,
            values: values.len(),
        }
    }

    /// Format registered for `key`, if any.
    pub fn format_for(&self, key: HandlerKey) -> Option<NumericFormat> {
        self.lock().get(&key).map(|entry| entry.format)
    }

    /// Whether a handler is registered for `key`.
    pub fn contains(&self, key: HandlerKey) -> bool {
        self.lock().contains_key(&key)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<HandlerKey> {
        let mut keys: Vec<HandlerKey> = self.lock().keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Entries are replaced whole, so a panic elsewhere never leaves one
    // half-written; a poisoned lock is safe to keep using.
    fn lock(&self) -> MutexGuard<'_, HashMap<HandlerKey, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for DispatchRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}
