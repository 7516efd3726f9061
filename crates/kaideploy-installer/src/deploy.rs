//! One deploy: package, connect, install.

use std::path::Path;
use std::sync::Arc;

use kaideploy_core::error::{DeployError, Result};

use crate::config::DeployConfig;
use crate::obs::SessionObserver;
use crate::package;
use crate::session::{InstallOutcome, InstallSession};

/// Package `source` and install it on the device named by `cfg`.
///
/// Packaging errors surface before any connection is attempted.
pub async fn deploy(
    cfg: &DeployConfig,
    source: &Path,
    launch: bool,
    observer: Arc<dyn SessionObserver>,
) -> Result<InstallOutcome> {
    let root = source.to_path_buf();
    let payload = tokio::task::spawn_blocking(move || package::pack_dir(&root))
        .await
        .map_err(|e| DeployError::Packaging(format!("packaging task failed: {e}")))??;
    tracing::info!(bytes = payload.len(), source = %source.display(), "app packaged");

    let session = InstallSession::connect(
        &cfg.device.socket,
        cfg.connect_timeout(),
        cfg.frame_limits(),
        cfg.session_options(launch),
        observer,
    )
    .await?;

    let outcome = session.run(&payload).await?;
    tracing::info!(
        app_id = %outcome.app_id,
        chunks = outcome.chunks_sent,
        launched = outcome.launched,
        "deploy complete"
    );
    Ok(outcome)
}
