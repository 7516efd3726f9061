//! Install session state machine.
//!
//! Each step writes exactly one request and reads exactly one reply before
//! the next step starts. Any failure ends the session; nothing is retried.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use uuid::Uuid;

use kaideploy_core::error::{DeployError, Result};
use kaideploy_core::protocol::{chunk_literal, FrameLimits, Reply, Request};

use crate::obs::{ChunkProgress, SessionObserver};
use crate::session::state::{SessionState, Step};
use crate::transport::{self, FramedConnection};

/// Upload window size used by the device tooling.
pub const DEFAULT_CHUNK_SIZE: usize = 10240;

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Payload bytes per `chunk` request. Must be non-zero.
    pub chunk_size: usize,
    /// Deadline for each request/reply pair. `None` waits forever.
    pub step_timeout: Option<Duration>,
    /// Send `launch` after a successful install.
    pub launch: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            step_timeout: None,
            launch: false,
        }
    }
}

/// Result of the `install` step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReceipt {
    /// Id this client generated and sent.
    pub requested_id: String,
    /// Id the device reported back; used for everything afterwards.
    pub app_id: String,
    /// Install path on the device, if reported.
    pub path: Option<String>,
}

/// Summary of a completed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    pub app_id: String,
    pub path: Option<String>,
    pub chunks_sent: usize,
    pub bytes_sent: usize,
    pub launched: bool,
}

pub struct InstallSession<S> {
    conn: FramedConnection<S>,
    opts: SessionOptions,
    observer: Arc<dyn SessionObserver>,
    state: SessionState,
}

impl InstallSession<TcpStream> {
    /// Connect step: open the debugger socket and wrap it in a session.
    pub async fn connect(
        addr: &str,
        connect_timeout: Option<Duration>,
        limits: FrameLimits,
        opts: SessionOptions,
        observer: Arc<dyn SessionObserver>,
    ) -> Result<Self> {
        observer.on_step(Step::Connect);
        let stream = transport::connect(addr, connect_timeout).await?;
        Self::new(stream, limits, opts, observer)
    }
}

impl<S> InstallSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap an already open stream.
    pub fn new(
        stream: S,
        limits: FrameLimits,
        opts: SessionOptions,
        observer: Arc<dyn SessionObserver>,
    ) -> Result<Self> {
        if opts.chunk_size == 0 {
            return Err(DeployError::Config("chunk_size must be non-zero".into()));
        }
        Ok(Self {
            conn: FramedConnection::new(stream, limits),
            opts,
            observer,
            state: SessionState {
                step: Some(Step::Connect),
                ..SessionState::default()
            },
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Drive the whole sequence, then release the connection.
    ///
    /// The connection is released whether or not a step failed; the first
    /// step error is what gets returned. After a failure the stream is
    /// dropped without flushing, since a write cut short by the step
    /// deadline may still be buffered for a peer that stopped reading.
    pub async fn run(mut self, payload: &[u8]) -> Result<InstallOutcome> {
        let result = self.run_steps(payload).await;

        match &result {
            Ok(_) => {
                let shutdown = self.conn.shutdown();
                if let Err(e) = with_deadline(Step::Closed, self.opts.step_timeout, shutdown).await {
                    tracing::debug!(error = %e, "connection shutdown failed");
                }
            }
            Err(e) => {
                tracing::warn!(step = ?self.state.step, error = %e, "install session aborted");
            }
        }
        self.enter(Step::Closed);
        result
    }

    async fn run_steps(&mut self, payload: &[u8]) -> Result<InstallOutcome> {
        self.await_greeting().await?;
        let webapps = self.list_tabs().await?;
        let upload = self.request_upload(&webapps).await?;
        let chunks_sent = self.upload_chunks(&upload, payload).await?;
        self.finish_upload(&upload).await?;
        let receipt = self.install(&webapps, &upload).await?;
        self.remove_upload_actor(&upload).await?;
        if self.opts.launch {
            self.launch(&webapps, &receipt.app_id).await?;
        }

        Ok(InstallOutcome {
            app_id: receipt.app_id,
            path: receipt.path,
            chunks_sent,
            bytes_sent: payload.len(),
            launched: self.opts.launch,
        })
    }

    /// Read the unsolicited device greeting. Only the framing is checked.
    pub async fn await_greeting(&mut self) -> Result<()> {
        self.enter(Step::AwaitGreeting);
        let conn = &mut self.conn;
        let greeting = with_deadline(Step::AwaitGreeting, self.opts.step_timeout, conn.read_frame()).await?;
        tracing::debug!(greeting = %greeting.as_value(), "device greeting");
        Ok(())
    }

    /// Ask the root actor for tabs; returns the webapps actor.
    pub async fn list_tabs(&mut self) -> Result<String> {
        self.enter(Step::ListTabs);
        let reply = self.call(Step::ListTabs, &Request::list_tabs()).await?;
        let actor = reply.require_str("webappsActor", "listTabs")?.to_owned();

        self.observer.on_actor("webapps", &actor);
        self.state.webapps_actor = Some(actor.clone());
        Ok(actor)
    }

    /// Open an upload; returns the upload actor.
    pub async fn request_upload(&mut self, webapps_actor: &str) -> Result<String> {
        self.enter(Step::RequestUpload);
        let reply = self
            .call(Step::RequestUpload, &Request::upload_package(webapps_actor))
            .await?;
        let actor = reply.require_str("actor", "uploadPackage")?.to_owned();

        self.observer.on_actor("upload", &actor);
        self.state.upload_actor = Some(actor.clone());
        Ok(actor)
    }

    /// Send the payload in `chunk_size` windows; returns the number of chunks.
    ///
    /// An empty payload sends nothing. Reply progress fields are passed to the
    /// observer as-is and never checked against what was sent.
    pub async fn upload_chunks(&mut self, upload_actor: &str, payload: &[u8]) -> Result<usize> {
        self.enter(Step::ChunkLoop);
        let mut sent = 0;
        let mut count = 0;

        for (index, window) in payload.chunks(self.opts.chunk_size).enumerate() {
            let literal = chunk_literal(window)?;
            let reply = self
                .call(Step::ChunkLoop, &Request::chunk(upload_actor, &literal))
                .await?;

            sent += window.len();
            count += 1;
            self.observer.on_chunk(&ChunkProgress {
                index,
                len: window.len(),
                sent,
                total: payload.len(),
                written: reply.u64_field("written"),
                size: reply.u64_field("_size"),
            });
        }
        Ok(count)
    }

    pub async fn finish_upload(&mut self, upload_actor: &str) -> Result<()> {
        self.enter(Step::FinishUpload);
        self.call(Step::FinishUpload, &Request::done(upload_actor)).await?;
        Ok(())
    }

    /// Install the uploaded package under a freshly generated id.
    ///
    /// The device's `appId` wins over the generated one.
    pub async fn install(&mut self, webapps_actor: &str, upload_actor: &str) -> Result<InstallReceipt> {
        self.enter(Step::Install);
        let requested_id = Uuid::new_v4().to_string();
        let reply = self
            .call(
                Step::Install,
                &Request::install(webapps_actor, upload_actor, &requested_id),
            )
            .await?;

        let receipt = InstallReceipt {
            app_id: reply.require_str("appId", "install")?.to_owned(),
            path: reply.str_field("path").map(str::to_owned),
            requested_id,
        };
        self.observer.on_installed(&receipt);
        self.state.app_id = Some(receipt.app_id.clone());
        Ok(receipt)
    }

    pub async fn remove_upload_actor(&mut self, upload_actor: &str) -> Result<()> {
        self.enter(Step::RemoveUploadActor);
        self.call(Step::RemoveUploadActor, &Request::remove(upload_actor))
            .await?;
        Ok(())
    }

    pub async fn launch(&mut self, webapps_actor: &str, app_id: &str) -> Result<()> {
        self.enter(Step::Launch);
        self.call(Step::Launch, &Request::launch(webapps_actor, app_id))
            .await?;
        Ok(())
    }

    /// Write one request and read its reply.
    async fn call(&mut self, step: Step, req: &Request<'_>) -> Result<Reply> {
        let conn = &mut self.conn;
        let reply = with_deadline(step, self.opts.step_timeout, async move {
            conn.write_frame(req).await?;
            conn.read_frame().await
        })
        .await?;

        if let Some((error, message)) = reply.remote_error() {
            tracing::warn!(
                step = step.as_str(),
                request = req.msg_type.as_str(),
                error,
                message = message.unwrap_or(""),
                "device reported an error"
            );
        }
        Ok(reply)
    }

    fn enter(&mut self, step: Step) {
        self.state.step = Some(step);
        self.observer.on_step(step);
    }
}

async fn with_deadline<T, F>(step: Step, timeout: Option<Duration>, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match timeout {
        Some(t) => tokio::time::timeout(t, fut)
            .await
            .map_err(|_| DeployError::Timeout(step.as_str()))?,
        None => fut.await,
    }
}
