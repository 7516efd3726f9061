use std::sync::Arc;

use crate::session::{InstallReceipt, Step};

/// Progress of one acknowledged chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkProgress {
    /// Zero-based chunk number.
    pub index: usize,
    /// Bytes in this chunk.
    pub len: usize,
    /// Bytes sent so far, this chunk included.
    pub sent: usize,
    /// Total payload size.
    pub total: usize,
    /// Device-reported `written` (informational, never validated).
    pub written: Option<u64>,
    /// Device-reported `_size` (informational, never validated).
    pub size: Option<u64>,
}

/// Receives session progress. All methods default to no-ops.
pub trait SessionObserver: Send + Sync {
    fn on_step(&self, _step: Step) {}
    fn on_actor(&self, _role: &'static str, _actor: &str) {}
    fn on_chunk(&self, _progress: &ChunkProgress) {}
    fn on_installed(&self, _receipt: &InstallReceipt) {}
}

/// Reports nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct QuietObserver;

impl SessionObserver for QuietObserver {}

/// Reports every step through `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct VerboseObserver;

impl SessionObserver for VerboseObserver {
    fn on_step(&self, step: Step) {
        tracing::info!(step = step.as_str(), "step");
    }

    fn on_actor(&self, role: &'static str, actor: &str) {
        tracing::info!(role, actor, "actor acquired");
    }

    fn on_chunk(&self, p: &ChunkProgress) {
        tracing::info!(
            index = p.index,
            len = p.len,
            sent = p.sent,
            total = p.total,
            written = ?p.written,
            size = ?p.size,
            "chunk sent"
        );
    }

    fn on_installed(&self, r: &InstallReceipt) {
        tracing::info!(
            app_id = %r.app_id,
            requested = %r.requested_id,
            path = r.path.as_deref().unwrap_or(""),
            "app installed"
        );
    }
}

/// Output level recognized by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    #[default]
    Quiet,
    Verbose,
}

pub fn observer_for(verbosity: Verbosity) -> Arc<dyn SessionObserver> {
    match verbosity {
        Verbosity::Quiet => Arc::new(QuietObserver),
        Verbosity::Verbose => Arc::new(VerboseObserver),
    }
}
