use std::time::Duration;

use serde::Deserialize;

use kaideploy_core::error::{DeployError, Result};
use kaideploy_core::protocol::frame::DEFAULT_MAX_FRAME_BYTES;
use kaideploy_core::protocol::{FrameLimits, LengthPolicy};

use crate::session::{SessionOptions, DEFAULT_CHUNK_SIZE};

const MAX_CHUNK_SIZE: usize = 1024 * 1024;
const MIN_FRAME_BYTES: usize = 64;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeployConfig {
    pub version: u32,

    #[serde(default)]
    pub device: DeviceSection,

    #[serde(default)]
    pub upload: UploadSection,

    #[serde(default)]
    pub protocol: ProtocolSection,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            version: 1,
            device: DeviceSection::default(),
            upload: UploadSection::default(),
            protocol: ProtocolSection::default(),
        }
    }
}

impl DeployConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(DeployError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }
        self.device.validate()?;
        self.upload.validate()?;
        Ok(())
    }

    pub fn frame_limits(&self) -> FrameLimits {
        FrameLimits {
            policy: self.protocol.length_prefix,
            max_frame_bytes: self.upload.max_frame_bytes,
            ..FrameLimits::default()
        }
    }

    pub fn session_options(&self, launch: bool) -> SessionOptions {
        SessionOptions {
            chunk_size: self.upload.chunk_size,
            step_timeout: millis(self.device.step_timeout_ms),
            launch,
        }
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        millis(self.device.connect_timeout_ms)
    }
}

/// 0 means "no timeout".
fn millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceSection {
    #[serde(default = "default_socket")]
    pub socket: String,

    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    #[serde(default)]
    pub step_timeout_ms: u64,
}

impl Default for DeviceSection {
    fn default() -> Self {
        Self {
            socket: default_socket(),
            connect_timeout_ms: default_connect_timeout_ms(),
            step_timeout_ms: 0,
        }
    }
}

impl DeviceSection {
    pub fn validate(&self) -> Result<()> {
        let valid = self
            .socket
            .rsplit_once(':')
            .is_some_and(|(host, port)| !host.is_empty() && port.parse::<u16>().is_ok());
        if !valid {
            return Err(DeployError::Config(format!(
                "device.socket must be host:port, got {:?}",
                self.socket
            )));
        }
        Ok(())
    }
}

fn default_socket() -> String {
    "localhost:6000".into()
}
fn default_connect_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UploadSection {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,
}

impl Default for UploadSection {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            max_frame_bytes: default_max_frame_bytes(),
        }
    }
}

impl UploadSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_CHUNK_SIZE).contains(&self.chunk_size) {
            return Err(DeployError::Config(format!(
                "upload.chunk_size must be between 1 and {MAX_CHUNK_SIZE}"
            )));
        }
        if self.max_frame_bytes < MIN_FRAME_BYTES {
            return Err(DeployError::Config(format!(
                "upload.max_frame_bytes must be at least {MIN_FRAME_BYTES}"
            )));
        }
        Ok(())
    }
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}
fn default_max_frame_bytes() -> usize {
    DEFAULT_MAX_FRAME_BYTES
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProtocolSection {
    #[serde(default)]
    pub length_prefix: LengthPolicy,
}
