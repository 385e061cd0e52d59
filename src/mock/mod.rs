//! Utilities for observing collaborators under test.
//!
//! - [`CallLog`] - Record the arguments a handler or action received
//!
//! ```rust
//! use testkit_assert::mock::CallLog;
//!
//! let log = CallLog::new();
//! let mut handler = log.wrap(|x: i32| x * 2);
//!
//! assert_eq!(handler(5), 10);
//! assert!(log.was_called_times(1));
//! ```

mod spy;

pub use spy::CallLog;
