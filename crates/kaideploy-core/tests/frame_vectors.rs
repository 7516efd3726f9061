//! Frame codec vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use bytes::Bytes;
use serde_json::json;

use kaideploy_core::protocol::frame::{
    decode_frame, encode_frame, framed_len, parse_length, FrameLimits, LengthPolicy,
};
use kaideploy_core::protocol::Request;

mod vector_loader;
use vector_loader::TestVector;

fn load(name: &str) -> TestVector {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}

#[test]
fn frame_vectors() {
    let files = [
        "frame_greeting.json",
        "frame_list_tabs_base64.json",
        "frame_utf8_hex.json",
        "frame_empty_object.json",
        "frame_malformed_json.json",
        "frame_truncated.json",
        "frame_no_delimiter.json",
        "frame_bad_prefix_lenient.json",
        "frame_bad_prefix_strict.json",
        "frame_too_large.json",
        "frame_runaway_prefix.json",
    ];

    for f in files {
        let v = load(f);
        let limits = FrameLimits {
            policy: v.policy.unwrap_or_default(),
            ..FrameLimits::default()
        };
        let res = decode_frame(Bytes::from(v.frame.decode()), &limits);

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.code().as_str(), err.code, "vector={}", v.description);
            continue;
        }

        let (reply, rest) = res.expect("expected ok frame");
        let ex = v.expect.expect("missing expect block");
        assert_eq!(reply.as_value(), &ex.payload, "vector={}", v.description);
        assert_eq!(rest.len(), ex.rest_len, "vector={}", v.description);
    }
}

#[test]
fn encoded_length_matches_prefix() {
    for n in [0usize, 1, 9, 10, 99, 100, 10_240, 65_536] {
        let text = "a".repeat(n);
        let frame = encode_frame(&json!(text)).unwrap();
        // payload is the quoted string: n + 2 bytes
        assert_eq!(frame.len(), framed_len(n + 2), "n={n}");
        assert!(frame.starts_with(format!("{}:", n + 2).as_bytes()));
    }
}

#[test]
fn encoded_request_roundtrips_through_decoder() {
    let frame = encode_frame(&Request::install("webapps", "upload-7", "app-1")).unwrap();
    let (reply, rest) = decode_frame(frame, &FrameLimits::default()).unwrap();
    assert!(rest.is_empty());
    assert_eq!(
        reply.as_value(),
        &json!({"to": "webapps", "type": "install", "upload": "upload-7", "appId": "app-1"})
    );
}

#[test]
fn lenient_prefix_reads_as_zero() {
    let limits = FrameLimits::default();
    assert_eq!(parse_length(b"", &limits).unwrap(), 0);
    assert_eq!(parse_length(b"1a", &limits).unwrap(), 0);
    assert_eq!(parse_length(b"-5", &limits).unwrap(), 0);
    assert_eq!(parse_length(b"42", &limits).unwrap(), 42);
}

#[test]
fn strict_prefix_rejects_empty_and_garbage() {
    let limits = FrameLimits {
        policy: LengthPolicy::Strict,
        ..FrameLimits::default()
    };
    assert_eq!(parse_length(b"", &limits).unwrap_err().code().as_str(), "BAD_LENGTH");
    assert_eq!(parse_length(b"1 2", &limits).unwrap_err().code().as_str(), "BAD_LENGTH");
    assert_eq!(parse_length(b"7", &limits).unwrap(), 7);
}

#[test]
fn ceiling_is_inclusive() {
    let limits = FrameLimits {
        policy: LengthPolicy::Strict,
        max_frame_bytes: 100,
        ..FrameLimits::default()
    };
    assert_eq!(parse_length(b"100", &limits).unwrap(), 100);
    assert_eq!(
        parse_length(b"101", &limits).unwrap_err().code().as_str(),
        "FRAME_TOO_LARGE"
    );
}

#[test]
fn delimiter_must_fall_inside_prefix_bound() {
    let limits = FrameLimits {
        max_prefix_bytes: 4,
        ..FrameLimits::default()
    };
    let (reply, _) = decode_frame(Bytes::from_static(b"002:{}"), &limits).unwrap();
    assert_eq!(reply.as_value(), &json!({}));

    let err = decode_frame(Bytes::from_static(b"0002:{}"), &limits).unwrap_err();
    assert_eq!(err.code().as_str(), "BAD_LENGTH");

    // shorter than the bound without a delimiter is still just truncated
    let err = decode_frame(Bytes::from_static(b"00"), &limits).unwrap_err();
    assert_eq!(err.code().as_str(), "IO");
}
