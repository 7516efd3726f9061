#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::fs;
use std::time::Duration;

use clap::Parser;

use kaideploy_core::protocol::LengthPolicy;
use kaideploy_installer::cli::Cli;
use kaideploy_installer::obs::Verbosity;

#[test]
fn defaults_without_config() {
    let cli = Cli::try_parse_from(["kaideploy", "--path", "app"]).unwrap();
    assert!(!cli.launch);
    assert_eq!(cli.verbosity(), Verbosity::Quiet);

    let cfg = cli.resolve_config().unwrap();
    assert_eq!(cfg.device.socket, "localhost:6000");
    assert_eq!(cfg.protocol.length_prefix, LengthPolicy::Lenient);
}

#[test]
fn path_is_required() {
    assert!(Cli::try_parse_from(["kaideploy", "--launch"]).is_err());
}

#[test]
fn flags_override_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("kaideploy.yaml");
    fs::write(
        &file,
        "version: 1\ndevice:\n  socket: \"10.0.0.2:6000\"\n  step_timeout_ms: 100\nupload:\n  chunk_size: 512\n",
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "kaideploy",
        "--path",
        "app",
        "--config",
        file.to_str().unwrap(),
        "--socket",
        "localhost:6001",
        "--strict-length",
        "--step-timeout-ms",
        "0",
        "--verbose",
        "--launch",
    ])
    .unwrap();
    assert_eq!(cli.verbosity(), Verbosity::Verbose);

    let cfg = cli.resolve_config().unwrap();
    assert_eq!(cfg.device.socket, "localhost:6001");
    assert_eq!(cfg.upload.chunk_size, 512);
    assert_eq!(cfg.protocol.length_prefix, LengthPolicy::Strict);
    assert_eq!(cfg.session_options(cli.launch).step_timeout, None);
    assert!(cfg.session_options(cli.launch).launch);
    assert_eq!(cfg.connect_timeout(), Some(Duration::from_millis(5000)));
}

#[test]
fn invalid_socket_flag_is_config_error() {
    let cli = Cli::try_parse_from(["kaideploy", "--path", "app", "--socket", "nowhere"]).unwrap();
    assert_eq!(cli.resolve_config().unwrap_err().code().as_str(), "CONFIG");
}

#[test]
fn missing_config_file_is_config_error() {
    let cli =
        Cli::try_parse_from(["kaideploy", "--path", "app", "--config", "/nonexistent/k.yaml"]).unwrap();
    assert_eq!(cli.resolve_config().unwrap_err().code().as_str(), "CONFIG");
}
