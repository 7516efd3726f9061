//! kaideploy core: debugger-protocol primitives and the shared error type.
//!
//! This crate defines the wire-level contracts used to push a packaged app to
//! a device: length-prefixed JSON frames, the bytewise chunk escaper, the
//! outbound request shapes and inbound reply accessors. It carries no
//! transport or runtime dependencies; the installer crate binds it to tokio.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Every malformed frame surfaces as `DeployError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{DeployError, ProtocolError, Result};
