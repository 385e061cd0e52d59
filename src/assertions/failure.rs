//! Helpers for asserting on failures.
//!
//! - [`expect_failure`] - Await a fallible future and require it to fail
//! - [`rewrap`] / [`rewrap_async`] - Turn any error into an assertion failure

use std::future::Future;

use crate::error::{Error, Result};

/// Await `future` and return its error, failing if it succeeded.
///
/// # Errors
///
/// Returns [`Error::AssertionFailed`] carrying `message` if the future
/// resolves to `Ok`.
///
/// # Example
///
/// ```rust
/// use testkit_assert::assertions::expect_failure;
///
/// async fn parse(input: &str) -> Result<u32, std::num::ParseIntError> {
///     input.parse()
/// }
///
/// futures::executor::block_on(async {
///     let err = expect_failure(parse("x"), "non-numeric input must be rejected").await;
///     assert!(err.is_ok());
/// });
/// ```
pub async fn expect_failure<Fut, T, E>(future: Fut, message: impl Into<String>) -> Result<E>
where
    Fut: Future<Output = std::result::Result<T, E>>,
{
    match future.await {
        Err(err) => Ok(err),
        Ok(_) => Err(Error::assertion_failed(message)),
    }
}

/// Convert an error into an assertion failure with a message built from it.
///
/// # Errors
///
/// Returns [`Error::AssertionFailed`] if `result` is `Err`.
///
/// # Example
///
/// ```rust
/// use testkit_assert::assertions::rewrap;
///
/// let parsed = rewrap("12".parse::<u32>(), |err| format!("bad fixture: {err}"));
/// assert_eq!(parsed.unwrap(), 12);
///
/// let failed = rewrap("x".parse::<u32>(), |err| format!("bad fixture: {err}"));
/// assert!(failed.unwrap_err().to_string().contains("bad fixture"));
/// ```
pub fn rewrap<T, E, M>(result: std::result::Result<T, E>, message: M) -> Result<T>
where
    M: FnOnce(&E) -> String,
{
    result.map_err(|err| Error::AssertionFailed(message(&err)))
}

/// Async form of [`rewrap`].
///
/// # Errors
///
/// Returns [`Error::AssertionFailed`] if the future resolves to `Err`.
pub async fn rewrap_async<Fut, T, E, M>(future: Fut, message: M) -> Result<T>
where
    Fut: Future<Output = std::result::Result<T, E>>,
    M: FnOnce(&E) -> String,
{
    rewrap(future.await, message)
}
