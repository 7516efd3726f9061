//! Shared error type across kaideploy crates.

use thiserror::Error;

/// Stable error codes (used by tests and exit reporting).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Could not reach the device socket.
    Connection,
    /// Short read/write or stream closed mid-frame.
    Io,
    /// Frame payload is not valid JSON.
    MalformedJson,
    /// An expected reply field is absent or not a string.
    MissingField,
    /// Length prefix is not a decimal number (strict mode).
    BadLength,
    /// Declared frame length exceeds the configured ceiling.
    FrameTooLarge,
    /// Source directory could not be packaged.
    Packaging,
    /// Invalid configuration.
    Config,
    /// A step did not complete in time.
    Timeout,
}

impl ErrorCode {
    /// String representation used in diagnostics and test vectors.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Connection => "CONNECTION",
            ErrorCode::Io => "IO",
            ErrorCode::MalformedJson => "MALFORMED_JSON",
            ErrorCode::MissingField => "MISSING_FIELD",
            ErrorCode::BadLength => "BAD_LENGTH",
            ErrorCode::FrameTooLarge => "FRAME_TOO_LARGE",
            ErrorCode::Packaging => "PACKAGING",
            ErrorCode::Config => "CONFIG",
            ErrorCode::Timeout => "TIMEOUT",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, DeployError>;

/// Frame- and message-level protocol violations.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed json: {0}")]
    MalformedJson(String),
    #[error("missing field `{field}` in {context} reply")]
    MissingField {
        field: &'static str,
        context: &'static str,
    },
    #[error("bad length prefix: {0:?}")]
    BadLength(String),
    #[error("frame of {len} bytes exceeds limit of {max}")]
    FrameTooLarge { len: usize, max: usize },
}

/// Unified error type used by core and installer.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("protocol: {0}")]
    Protocol(#[from] ProtocolError),
    #[error("packaging failed: {0}")]
    Packaging(String),
    #[error("config: {0}")]
    Config(String),
    #[error("timed out during {0}")]
    Timeout(&'static str),
}

impl DeployError {
    /// Map to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            DeployError::Connection(_) => ErrorCode::Connection,
            DeployError::Io(_) => ErrorCode::Io,
            DeployError::Protocol(p) => match p {
                ProtocolError::MalformedJson(_) => ErrorCode::MalformedJson,
                ProtocolError::MissingField { .. } => ErrorCode::MissingField,
                ProtocolError::BadLength(_) => ErrorCode::BadLength,
                ProtocolError::FrameTooLarge { .. } => ErrorCode::FrameTooLarge,
            },
            DeployError::Packaging(_) => ErrorCode::Packaging,
            DeployError::Config(_) => ErrorCode::Config,
            DeployError::Timeout(_) => ErrorCode::Timeout,
        }
    }
}
