//! Typed numeric messaging over a point-to-point byte-buffer link.
//!
//! remotebit lets two peers exchange small vectors of integers addressed to
//! a `(component, instance id)` pair, over a link that only moves opaque
//! byte buffers (a BLE UART-style service, or the in-process loopback).
//!
//! # Crate Structure
//!
//! - [`link`] — Link collaborator trait and the in-process loopback link
//! - [`frame`] — Wire codec: numeric formats, component tags, encode/decode
//! - [`peer`] — Dispatch registry and the application-facing remote (behind `peer` feature)

/// Re-export link types.
pub mod link {
    pub use remotebit_link::*;
}

/// Re-export frame types.
pub mod frame {
    pub use remotebit_frame::*;
}

/// Re-export peer types (requires `peer` feature).
#[cfg(feature = "peer")]
pub mod peer {
    pub use remotebit_peer::*;
}
