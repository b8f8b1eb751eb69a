//! Logged assertion helpers for chat_text tests.
//!
//! These functions wrap standard assertions with tracing logs,
//! providing detailed context when assertions fail.

#![allow(dead_code)]

use std::fmt::Debug;

use serde_json::Value;

/// Assert equality with detailed logging.
#[track_caller]
pub fn assert_eq_logged<T: PartialEq + Debug>(context: &str, actual: T, expected: T) {
    tracing::debug!(
        context = context,
        expected = ?expected,
        actual = ?actual,
        "asserting equality"
    );

    if actual != expected {
        tracing::error!(
            context = context,
            expected = ?expected,
            actual = ?actual,
            "assertion failed: values not equal"
        );
    }

    assert_eq!(
        actual, expected,
        "{context}: expected {expected:?}, got {actual:?}"
    );
}

/// Assert that a JSON component matches, logging both serialized forms.
#[track_caller]
pub fn assert_json_logged(context: &str, actual: &Value, expected: &Value) {
    tracing::debug!(
        context = context,
        expected = %expected,
        actual = %actual,
        "asserting json"
    );

    assert_eq!(actual, expected, "{context}: expected {expected}, got {actual}");
}

/// Assert that a string does not contain a legacy code sequence.
#[track_caller]
pub fn assert_not_contains_logged(context: &str, haystack: &str, needle: &str) {
    tracing::debug!(
        context = context,
        haystack = haystack,
        needle = needle,
        "asserting not contains"
    );

    assert!(
        !haystack.contains(needle),
        "{context}: {haystack:?} unexpectedly contains {needle:?}"
    );
}
