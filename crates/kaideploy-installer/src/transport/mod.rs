//! Transport layer (debugger socket).
//!
//! Exposes the TCP connector and the framed connection that reads and writes
//! whole protocol frames on any async byte stream.

pub mod codec;
pub mod connect;

pub use codec::FramedConnection;
pub use connect::connect;
