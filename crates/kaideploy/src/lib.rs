//! Top-level facade crate for kaideploy.
//!
//! Re-exports the protocol core and the installer so users can depend on a single crate.

pub mod core {
    pub use kaideploy_core::*;
}

pub mod installer {
    pub use kaideploy_installer::*;
}
