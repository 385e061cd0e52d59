// Allow must_use_candidate since recorder methods are mostly called for their checks
#![allow(clippy::must_use_candidate)]

//! Call recording for handlers and actions.
//!
//! [`CallLog`] records every argument passed through a wrapped handler, so a
//! test can see exactly which filters or models a validator produced.
//!
//! # Example
//!
//! ```rust
//! use testkit_assert::mock::CallLog;
//! use std::future::ready;
//!
//! let log = CallLog::new();
//! let mut handler = log.wrap(|x: i32| ready(x * 2));
//!
//! let result = futures::executor::block_on(handler(5));
//! assert_eq!(result, 10);
//! assert_eq!(log.calls(), vec![5]);
//! ```

use std::fmt::{self, Debug};
use std::sync::Arc;

use parking_lot::Mutex;

/// A shared log of call arguments.
///
/// Clones share the same log, so a clone can be moved into a handler while
/// the test keeps the original for assertions.
pub struct CallLog<A> {
    calls: Arc<Mutex<Vec<A>>>,
}

impl<A: Clone> CallLog<A> {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Record one call.
    pub fn record(&self, args: A) {
        self.calls.lock().push(args);
    }

    /// Get all recorded calls, oldest first.
    pub fn calls(&self) -> Vec<A> {
        self.calls.lock().clone()
    }

    /// Get the number of recorded calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Check if at least one call was recorded.
    #[must_use]
    pub fn was_called(&self) -> bool {
        self.call_count() > 0
    }

    /// Check if exactly N calls were recorded.
    #[must_use]
    pub fn was_called_times(&self, n: usize) -> bool {
        self.call_count() == n
    }

    /// Get the Nth call (0-indexed).
    pub fn nth_call(&self, n: usize) -> Option<A> {
        self.calls.lock().get(n).cloned()
    }

    /// Get the most recent call.
    pub fn last_call(&self) -> Option<A> {
        self.calls.lock().last().cloned()
    }

    /// Clear the log.
    pub fn reset(&self) {
        self.calls.lock().clear();
    }

    /// Wrap a handler so every argument is recorded before it is forwarded.
    ///
    /// Works for sync and async handlers alike: the handler's return value,
    /// future or not, is passed through untouched.
    pub fn wrap<H, R>(&self, mut handler: H) -> impl FnMut(A) -> R
    where
        H: FnMut(A) -> R,
    {
        let log = self.clone();
        move |args: A| {
            log.record(args.clone());
            handler(args)
        }
    }
}

impl<A: Clone> Default for CallLog<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for CallLog<A> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
        }
    }
}

impl<A: Debug> Debug for CallLog<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallLog")
            .field("calls", &*self.calls.lock())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_log_is_empty() {
        let log: CallLog<i32> = CallLog::new();
        assert!(!log.was_called());
        assert_eq!(log.call_count(), 0);
        assert_eq!(log.last_call(), None);
    }

    #[test]
    fn test_record_and_query() {
        let log = CallLog::new();
        log.record("a");
        log.record("b");

        assert!(log.was_called_times(2));
        assert_eq!(log.nth_call(0), Some("a"));
        assert_eq!(log.nth_call(2), None);
        assert_eq!(log.last_call(), Some("b"));
    }

    #[test]
    fn test_clones_share_calls() {
        let log = CallLog::new();
        let other = log.clone();
        other.record(1);
        assert_eq!(log.calls(), vec![1]);
    }

    #[test]
    fn test_reset() {
        let log = CallLog::new();
        log.record(1);
        log.reset();
        assert!(!log.was_called());
    }

    #[test]
    fn test_wrap_sync_handler() {
        let log = CallLog::new();
        let mut handler = log.wrap(|x: i32| x + 1);

        assert_eq!(handler(1), 2);
        assert_eq!(handler(5), 6);
        assert_eq!(log.calls(), vec![1, 5]);
    }

    #[tokio::test]
    async fn test_wrap_async_handler() {
        let log = CallLog::new();
        let mut handler = log.wrap(|name: String| async move { name.len() });

        assert_eq!(handler("abc".to_string()).await, 3);
        assert_eq!(log.last_call(), Some("abc".to_string()));
    }

    #[test]
    fn test_debug() {
        let log = CallLog::new();
        log.record(7);
        assert_eq!(format!("{log:?}"), "CallLog { calls: [7] }");
    }
}
