//! Thread safety tests for chat_text.
//!
//! This module verifies:
//! 1. All public types are Send + Sync (compile-time verification)
//! 2. Global caches work correctly under concurrent access
//! 3. Shared node trees render identically from many threads

mod common;

use std::sync::Arc;
use std::thread;

use chat_text::client::VersionParseError;
use chat_text::color::ColorParseError;
use chat_text::logging::ChatLogger;
use chat_text::prelude::*;
use common::fixtures::{player_values, welcome_message};

// ============================================================================
// COMPILE-TIME SEND + SYNC VERIFICATION
// ============================================================================

/// Helper function to verify a type is Send + Sync at compile time.
fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_value_types_are_send_sync() {
    assert_send_sync::<Color>();
    assert_send_sync::<Formatting>();
    assert_send_sync::<CombinedFormatting>();
    assert_send_sync::<Placeholder>();
    assert_send_sync::<Client>();
    assert_send_sync::<ClientVersion>();
    assert_send_sync::<ClientFeature>();
}

#[test]
fn test_node_types_are_send_sync() {
    assert_send_sync::<Node>();
    assert_send_sync::<StringNode>();
    assert_send_sync::<PlaceholderNode>();
    assert_send_sync::<GroupNode>();
    assert_send_sync::<ActionNode>();
    assert_send_sync::<ClickAction>();
    assert_send_sync::<HoverAction>();
}

#[test]
fn test_error_and_logger_types_are_send_sync() {
    assert_send_sync::<ColorParseError>();
    assert_send_sync::<VersionParseError>();
    assert_send_sync::<ChatLogger>();
}

// ============================================================================
// CONCURRENT CACHE ACCESS TESTS
// ============================================================================

#[test]
fn test_concurrent_quantization() {
    let handles: Vec<_> = (0..8u32)
        .map(|i| {
            thread::spawn(move || {
                for j in 0..500u32 {
                    let rgb = (i * 0x0010_2030 + j * 0x0001_0307) & 0x00FF_FFFF;
                    let code = Color::from_rgb(rgb).code();
                    assert_eq!(code, chat_text::color::quantize(rgb));
                }
            })
        })
        .collect();

    for handle in handles {
        handle
            .join()
            .expect("Thread panicked during concurrent quantization");
    }
}

#[test]
fn test_concurrent_color_parsing() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                for j in 0..500 {
                    assert_eq!(Color::parse("red").unwrap(), Color::RED);
                    assert_eq!(Color::parse("&9").unwrap(), Color::BLUE);
                    assert_eq!(Color::parse("#abc").unwrap().rgb(), 0xAABBCC);
                    let hex = format!("#{:06x}", (i * 500 + j) * 977);
                    assert!(Color::parse(&hex).is_ok());
                    assert!(Color::parse("not a color").is_err());
                }
            })
        })
        .collect();

    for handle in handles {
        handle
            .join()
            .expect("Thread panicked during concurrent color parsing");
    }
}

#[test]
fn test_concurrent_version_parsing() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                for j in 0..200 {
                    let version = ClientVersion::parse(&format!("1.{i}.{j}")).unwrap();
                    assert_eq!(version, ClientVersion::new(1, i, j));
                }
            })
        })
        .collect();

    for handle in handles {
        handle
            .join()
            .expect("Thread panicked during concurrent version parsing");
    }
}

// ============================================================================
// PARALLEL RENDERING TESTS
// ============================================================================

#[test]
fn test_shared_tree_renders_identically() {
    let message = Arc::new(welcome_message());
    let values = Arc::new(player_values());
    let expected = message.to_json_string(Some(&Client::latest()), Some(&*values));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let message = Arc::clone(&message);
            let values = Arc::clone(&values);
            thread::spawn(move || {
                let mut outputs = Vec::new();
                for _ in 0..100 {
                    outputs.push(message.to_json_string(Some(&Client::latest()), Some(&*values)));
                }
                outputs
            })
        })
        .collect();

    for handle in handles {
        let outputs = handle.join().expect("Thread panicked during rendering");
        assert!(outputs.iter().all(|output| *output == expected));
    }
}
