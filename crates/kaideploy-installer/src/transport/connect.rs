//! TCP connector for the forwarded debugger socket.

use std::time::Duration;

use tokio::net::TcpStream;

use kaideploy_core::error::{DeployError, Result};

/// Open a stream to `addr` (`host:port`).
///
/// `timeout` of `None` waits for the OS connect timeout.
pub async fn connect(addr: &str, timeout: Option<Duration>) -> Result<TcpStream> {
    let attempt = TcpStream::connect(addr);
    let stream = match timeout {
        Some(t) => tokio::time::timeout(t, attempt)
            .await
            .map_err(|_| DeployError::Connection(format!("{addr}: timed out after {t:?}")))?,
        None => attempt.await,
    }
    .map_err(|e| DeployError::Connection(format!("{addr}: {e}")))?;

    // Small request/reply frames; don't let Nagle hold them back.
    if let Err(e) = stream.set_nodelay(true) {
        tracing::debug!(error = %e, "set_nodelay failed");
    }

    tracing::info!(%addr, "debugger socket connected");
    Ok(stream)
}
