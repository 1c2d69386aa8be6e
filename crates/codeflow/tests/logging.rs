//! Logging setup from the outside
//!
//! Only one global subscriber can exist per test binary, so most calls here
//! just check that repeated initialization reports an error instead of
//! panicking.

#![cfg(not(target_arch = "wasm32"))]

use codeflow::core::logging::{init_default_logging, init_logging, resolve_format, LogFormat};
use codeflow::prelude::*;
use std::str::FromStr;

#[test]
fn test_log_format_names() {
    for name in LogFormat::variants() {
        assert!(LogFormat::from_str(name).is_ok(), "{} should parse", name);
    }
    assert!(LogFormat::from_str("yaml").is_err());
}

#[test]
fn test_invalid_format_is_rejected_before_install() {
    let result = init_logging(Some("info"), Some("xml"));
    let message = result.unwrap_err().to_string();
    assert!(message.contains("Invalid log format"));
}

#[test]
fn test_repeated_init_does_not_panic() {
    let _ = init_logging(Some("debug"), Some("compact"));
    let _ = init_logging(Some("not a level"), Some("pretty"));
    let _ = init_logging(Some("off"), Some("json"));
    let _ = init_default_logging();
}

#[test]
fn test_pipeline_runs_with_subscriber_installed() {
    let _ = init_logging(Some("trace"), Some("compact"));

    let state = SessionState::new()
        .apply(Action::ItemCreated {
            name: None,
            completion: "```x```".into(),
        })
        .unwrap()
        .apply(Action::PlaceItem {
            item_id: "item-1".into(),
        })
        .unwrap()
        .apply(Action::Reset)
        .unwrap();
    assert!(state.items().is_empty());
}

#[test]
fn test_explicit_format_overrides_environment() {
    assert_eq!(resolve_format(Some("json")).unwrap(), LogFormat::Json);
}
