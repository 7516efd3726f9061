#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use kaideploy_core::protocol::LengthPolicy;
use kaideploy_installer::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
device:
  socket: "localhost:6000"
upload:
  chunk_sise: 4096 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.device.socket, "localhost:6000");
    assert_eq!(cfg.upload.chunk_size, 10240);
    assert_eq!(cfg.protocol.length_prefix, LengthPolicy::Lenient);
    assert_eq!(cfg.connect_timeout(), Some(Duration::from_millis(5000)));
    assert_eq!(cfg.session_options(false).step_timeout, None);
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
device:
  socket: "127.0.0.1:6100"
  connect_timeout_ms: 0
  step_timeout_ms: 2500
upload:
  chunk_size: 4096
  max_frame_bytes: 1024
protocol:
  length_prefix: strict
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.connect_timeout(), None);

    let opts = cfg.session_options(true);
    assert_eq!(opts.chunk_size, 4096);
    assert_eq!(opts.step_timeout, Some(Duration::from_millis(2500)));
    assert!(opts.launch);

    let limits = cfg.frame_limits();
    assert_eq!(limits.policy, LengthPolicy::Strict);
    assert_eq!(limits.max_frame_bytes, 1024);
}

#[test]
fn rejects_bad_values() {
    let cases = [
        "version: 2\n",
        "version: 1\ndevice:\n  socket: \"localhost\"\n",
        "version: 1\ndevice:\n  socket: \":6000\"\n",
        "version: 1\ndevice:\n  socket: \"host:port\"\n",
        "version: 1\nupload:\n  chunk_size: 0\n",
        "version: 1\nupload:\n  chunk_size: 2000000\n",
        "version: 1\nupload:\n  max_frame_bytes: 10\n",
        "version: 1\nprotocol:\n  length_prefix: loose\n",
    ];
    for case in cases {
        let err = config::load_from_str(case).expect_err(case);
        assert_eq!(err.code().as_str(), "CONFIG", "case={case}");
    }
}
