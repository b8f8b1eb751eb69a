//! Integration tests for mutex poison recovery.
//!
//! A thread panicking while holding a lock, or while computing a cached
//! value, must not break later color, version or rendering calls.

mod common;

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use std::thread;

use chat_text::prelude::*;
use chat_text::sync::{SharedLru, lock_recover, lock_recover_debug};
use common::{fixtures, init_test_logging};

// ============================================================================
// sync helpers
// ============================================================================

#[test]
fn lock_recover_preserves_mutated_state_after_poison() {
    let mutex = Mutex::new(vec![1, 2, 3]);
    let _ = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut guard = mutex.lock().unwrap();
        guard.push(4);
        panic!("poison after mutation");
    }));
    assert!(mutex.is_poisoned());

    let guard = lock_recover(&mutex);
    assert_eq!(*guard, vec![1, 2, 3, 4]);
}

#[test]
fn lock_recover_debug_works_after_poison() {
    init_test_logging();
    let mutex = Mutex::new(String::from("original"));
    let _ = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut guard = mutex.lock().unwrap();
        guard.push_str("_modified");
        panic!("poison");
    }));

    let guard = lock_recover_debug(&mutex, "integration test");
    assert_eq!(*guard, "original_modified");
}

#[test]
fn lock_recover_across_threads() {
    let shared = Arc::new(Mutex::new(0_u32));

    let poisoner = Arc::clone(&shared);
    let handle = thread::spawn(move || {
        let mut guard = poisoner.lock().unwrap();
        *guard = 7;
        panic!("intentional thread panic");
    });
    assert!(handle.join().is_err());
    assert!(shared.is_poisoned());

    *lock_recover(&shared) += 1;
    assert_eq!(*lock_recover(&shared), 8);
}

// ============================================================================
// SharedLru
// ============================================================================

#[test]
fn shared_lru_survives_panicking_compute() {
    let cache: SharedLru<u32, String> = SharedLru::new("panic test", 4);

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        cache.get_or_insert_with(1, |_| panic!("compute failed"));
    }));
    assert!(result.is_err());
    assert!(cache.is_empty());

    assert_eq!(cache.get_or_insert_with(1, |key| format!("v{key}")), "v1");
    assert_eq!(cache.len(), 1);
}

#[test]
fn shared_lru_survives_panicking_thread() {
    let cache: Arc<SharedLru<u32, u32>> = Arc::new(SharedLru::new("thread test", 16));

    let worker = Arc::clone(&cache);
    let handle = thread::spawn(move || {
        worker.get_or_insert_with(2, |key| key * 10);
        worker.get_or_insert_with(3, |_| panic!("intentional thread panic"));
    });
    assert!(handle.join().is_err());

    assert_eq!(cache.get_or_insert_with(2, |_| unreachable!("cached")), 20);
    assert_eq!(cache.get_or_insert_with(3, |key| key * 10), 30);
}

// ============================================================================
// Process-wide caches after a panicking thread
// ============================================================================

#[test]
fn color_caches_work_after_thread_panic() {
    let handle = thread::spawn(|| {
        let color = Color::parse("#336699").unwrap();
        let _ = color.code();
        panic!("intentional thread panic");
    });
    assert!(handle.join().is_err());

    let color = Color::parse("#336699").unwrap();
    assert_eq!(color.code(), '9');
    assert_eq!(Color::from_rgb(0xFF8800).code(), '6');
}

#[test]
fn version_cache_works_after_thread_panic() {
    let handle = thread::spawn(|| {
        let _ = ClientVersion::parse("1.12.2");
        panic!("intentional thread panic");
    });
    assert!(handle.join().is_err());

    assert_eq!(ClientVersion::parse("1.12.2"), Ok(ClientVersion::new(1, 12, 2)));
}

#[test]
fn rendering_works_after_thread_panic() {
    let message = Arc::new(fixtures::welcome_message());

    let worker = Arc::clone(&message);
    let handle = thread::spawn(move || {
        let _ = worker.to_json_string(Some(&Client::compatible()), None);
        panic!("intentional thread panic");
    });
    assert!(handle.join().is_err());

    let values = fixtures::player_values();
    assert_eq!(
        message.to_plain_string(Some(&values)),
        "[Server] Welcome, Alex!"
    );
}
