//! Handler dispatch and the application-facing remote.
//!
//! [`DispatchRegistry`] maps `(component, instance id)` keys to a numeric
//! format and a callback. [`Remote`] ties a registry and a frame writer to a
//! link and exposes the four application operations: start, is-connected,
//! send and on-received.

pub mod error;
pub mod registry;
pub mod remote;

pub use error::{RemoteError, Result};
pub use registry::{Callback, Dispatch, DispatchRegistry, HandlerKey};
pub use remote::{Remote, RemoteConfig};
