//! Point-to-point byte-buffer link abstraction.
//!
//! The radio link underneath remote:bit only knows how to move opaque,
//! bounded byte buffers. This crate describes that collaborator as the
//! [`Link`] trait:
//! - send one buffer, best-effort
//! - pull the next received buffer, if any
//! - report whether the link is up
//! - notify subscribers when a buffer has arrived
//!
//! [`MemoryLink`] is an in-process loopback pair implementing the trait,
//! used by tests, the CLI and demos.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{LinkError, Result};
pub use memory::{MemoryLink, DEFAULT_MAX_BUFFER, DEFAULT_MAX_PENDING};
pub use traits::{ArrivalCallback, Link};
