/// Errors that can occur in link operations.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// The link is not up; nothing can be sent.
    #[error("link is not connected")]
    NotConnected,

    /// The buffer exceeds the largest buffer the link can carry.
    #[error("buffer too large for link ({size} bytes, max {max})")]
    BufferTooLarge { size: usize, max: usize },

    /// The peer endpoint has been dropped.
    #[error("link closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, LinkError>;
