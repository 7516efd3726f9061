//! Session observers.
//!
//! The session reports progress through `SessionObserver` instead of checking
//! a verbosity flag. `observer_for` picks the built-in observer for a
//! `Verbosity`; tests plug in their own.

pub mod observer;

pub use observer::{observer_for, ChunkProgress, QuietObserver, SessionObserver, Verbosity, VerboseObserver};
