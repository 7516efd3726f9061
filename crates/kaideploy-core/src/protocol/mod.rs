//! Debugger-protocol wire formats.
//!
//! - `frame`: `<decimal length>:<json>` framing, pure over `bytes`.
//! - `escape`: bytewise chunk escaper for upload payloads.
//! - `request` / `reply`: outbound command shapes and inbound accessors.
//!
//! Parsers are panic-free: malformed input is reported as `DeployError`.

pub mod escape;
pub mod frame;
pub mod reply;
pub mod request;

pub use escape::{chunk_literal, escape_chunk};
pub use frame::{FrameLimits, LengthPolicy, DELIMITER};
pub use reply::Reply;
pub use request::{Request, RequestType, ROOT_ACTOR};
