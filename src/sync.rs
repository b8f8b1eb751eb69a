//! Synchronization helpers for process-wide caches.
//!
//! Every cache in this crate memoizes a pure function, so a poisoned mutex
//! never holds a wrong answer: at worst it holds fewer answers. Locks are
//! therefore always recovered rather than propagated.
//!
//! | Scenario | Function |
//! |----------|----------|
//! | Plain mutex access | [`lock_recover`] |
//! | Access where poison should be visible in logs | [`lock_recover_debug`] |
//! | Memoizing a pure function | [`SharedLru`] |
//!
//! Test code keeps using `.lock().unwrap()` so that poison fails fast.

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};

use lru::LruCache;

/// Lock a mutex, recovering from poison if necessary.
///
/// # Example
///
/// ```rust
/// use std::sync::Mutex;
/// use chat_text::sync::lock_recover;
///
/// let mutex = Mutex::new(42);
/// let guard = lock_recover(&mutex);
/// assert_eq!(*guard, 42);
/// ```
#[inline]
pub fn lock_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Lock a mutex, logging a warning when poison is recovered.
///
/// `context` names the lock site (e.g. `"Color::code cache"`).
#[inline]
pub fn lock_recover_debug<'a, T>(mutex: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|e| {
        log::warn!("mutex poison recovered at: {context}");
        e.into_inner()
    })
}

/// A bounded, thread-safe memo table for pure functions.
///
/// The value is computed outside the lock. Two threads missing the same key
/// both compute it and the later insert wins; since the function is pure the
/// two values are identical.
#[derive(Debug)]
pub struct SharedLru<K: Hash + Eq, V> {
    name: &'static str,
    inner: Mutex<LruCache<K, V>>,
}

impl<K: Hash + Eq, V: Clone> SharedLru<K, V> {
    /// Create a cache holding at most `capacity` entries (minimum one).
    #[must_use]
    pub fn new(name: &'static str, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            name,
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with(&self, key: K, compute: impl FnOnce(&K) -> V) -> V {
        if let Some(hit) = lock_recover_debug(&self.inner, self.name).get(&key) {
            return hit.clone();
        }

        let value = compute(&key);
        lock_recover_debug(&self.inner, self.name).put(key, value.clone());
        value
    }

    /// Like [`get_or_insert_with`](Self::get_or_insert_with), but failures
    /// are returned without being cached.
    ///
    /// # Errors
    ///
    /// Returns whatever `compute` returns on a miss.
    pub fn try_get_or_insert_with<E>(
        &self,
        key: K,
        compute: impl FnOnce(&K) -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(hit) = lock_recover_debug(&self.inner, self.name).get(&key) {
            return Ok(hit.clone());
        }

        let value = compute(&key)?;
        lock_recover_debug(&self.inner, self.name).put(key, value.clone());
        Ok(value)
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        lock_recover(&self.inner).len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
