/// Errors that can occur in remote operations.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// Link-level error.
    #[error("link error: {0}")]
    Link(#[from] remotebit_link::LinkError),

    /// Frame-level error.
    #[error("frame error: {0}")]
    Frame(#[source] remotebit_frame::FrameError),
}

impl From<remotebit_frame::FrameError> for RemoteError {
    fn from(err: remotebit_frame::FrameError) -> Self {
        match err {
            remotebit_frame::FrameError::Link(link) => RemoteError::Link(link),
            other => RemoteError::Frame(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, RemoteError>;
