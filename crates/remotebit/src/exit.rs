use std::fmt;

use remotebit_frame::FrameError;
use remotebit_link::LinkError;
use remotebit_peer::RemoteError;

// Exit codes. Usage errors are reported by clap itself (exit 2).
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const DATA_INVALID: i32 = 60;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn link_error(context: &str, err: LinkError) -> CliError {
    let code = match err {
        LinkError::BufferTooLarge { .. } => DATA_INVALID,
        LinkError::NotConnected | LinkError::Closed => FAILURE,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Link(err) => link_error(context, err),
        FrameError::ValueOutOfRange { .. }
        | FrameError::FrameTooShort { .. }
        | FrameError::FrameTooLarge { .. }
        | FrameError::UnknownFormat(_)
        | FrameError::UnknownComponent(_)
        | FrameError::InvalidInstanceId(_) => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
    }
}

pub fn remote_error(context: &str, err: RemoteError) -> CliError {
    match err {
        RemoteError::Link(err) => link_error(context, err),
        RemoteError::Frame(err) => frame_error(context, err),
    }
}

pub fn hex_error(context: &str, err: hex::FromHexError) -> CliError {
    CliError::new(DATA_INVALID, format!("{context}: {err}"))
}
