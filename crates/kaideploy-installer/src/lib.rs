//! kaideploy installer library entry.
//!
//! Binds the protocol core to tokio I/O and drives one install session:
//! package the app directory, connect to the forwarded debugger socket, upload
//! the archive in escaped chunks, install, and optionally launch. Consumed by
//! the `kaideploy` binary and by integration tests.

pub mod cli;
pub mod config;
pub mod deploy;
pub mod obs;
pub mod package;
pub mod session;
pub mod transport;

pub use deploy::deploy;
pub use session::{InstallOutcome, InstallSession, SessionOptions, Step};
