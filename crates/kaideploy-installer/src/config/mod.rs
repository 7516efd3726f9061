//! Deploy config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use kaideploy_core::error::{DeployError, Result};

pub use schema::{DeployConfig, DeviceSection, ProtocolSection, UploadSection};

pub fn load_from_file(path: &Path) -> Result<DeployConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| DeployError::Config(format!("read {} failed: {e}", path.display())))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<DeployConfig> {
    let cfg: DeployConfig = serde_yaml::from_str(s)
        .map_err(|e| DeployError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
