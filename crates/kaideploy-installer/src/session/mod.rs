//! Install session (state machine over one debugger connection).
//!
//! Responsibilities:
//! - Walk the fixed install sequence one request/reply pair at a time
//! - Acquire actor handles from replies and echo them back as `to`
//! - Stream the payload in escaped chunks
//! - Release the connection on every exit path

pub mod machine;
pub mod state;

pub use machine::{InstallOutcome, InstallReceipt, InstallSession, SessionOptions, DEFAULT_CHUNK_SIZE};
pub use state::{SessionState, Step};
