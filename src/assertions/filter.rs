//! Filter-applied validation.
//!
//! Checks that a query handler honours every field of its filter type:
//!
//! 1. A default filter returns exactly the expected baseline count.
//! 2. For each field, a default filter carrying only that field's "wrong"
//!    value returns nothing. A handler that ignores the field leaks the
//!    baseline records through and is reported as [`Error::SpuriousMatch`].
//! 3. The fully "correct" filter returns at least one record.
//!
//! Steps run strictly in order, each with its own filter value, and the
//! first violation ends the run.

use std::collections::VecDeque;
use std::convert::Infallible;
use std::fmt::Display;
use std::future::Future;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::fields::FieldSet;

/// Validate that `handler` applies every field of the filter type `F`.
///
/// `expected_baseline` is the number of records the handler returns for an
/// unconstrained (default) filter.
///
/// # Errors
///
/// - [`Error::UnexpectedResultCount`] if the default filter does not return
///   `expected_baseline` records. No per-field check runs in that case.
/// - [`Error::SpuriousMatch`] for the first field whose wrong value, applied
///   alone, still matches records.
/// - [`Error::NoMatch`] if the correct filter matches nothing.
///
/// # Example
///
/// ```rust
/// use testkit_assert::assertions::validate_filter_applied;
/// use testkit_assert::fields::FieldSet;
///
/// #[derive(Debug, Default, Clone, FieldSet)]
/// struct Filter {
///     id: Option<u32>,
/// }
///
/// let records = vec![1_u32];
/// let handler = |filter: Filter| {
///     let rows: Vec<u32> = records
///         .iter()
///         .copied()
///         .filter(|id| filter.id.map_or(true, |wanted| wanted == *id))
///         .collect();
///     std::future::ready(rows)
/// };
///
/// let result = futures::executor::block_on(validate_filter_applied(
///     || Filter { id: Some(1) },
///     || Filter { id: Some(2) },
///     handler,
///     1,
/// ));
/// assert!(result.is_ok());
/// ```
pub async fn validate_filter_applied<F, C, W, H, Fut, I>(
    correct_filter: C,
    wrong_filter: W,
    mut handler: H,
    expected_baseline: usize,
) -> Result<()>
where
    F: FieldSet,
    C: FnMut() -> F,
    W: FnMut() -> F,
    H: FnMut(F) -> Fut,
    Fut: Future<Output = I>,
    I: RecordCount,
{
    try_validate_filter_applied(
        correct_filter,
        wrong_filter,
        |filter| {
            let query = handler(filter);
            async move { Ok::<_, Infallible>(query.await) }
        },
        expected_baseline,
    )
    .await
}

/// Like [`validate_filter_applied`], for handlers that can fail.
///
/// # Errors
///
/// Everything [`validate_filter_applied`] reports, plus
/// [`Error::Collaborator`] naming the step during which the handler
/// returned an error.
pub async fn try_validate_filter_applied<F, C, W, H, Fut, I, E>(
    mut correct_filter: C,
    mut wrong_filter: W,
    mut handler: H,
    expected_baseline: usize,
) -> Result<()>
where
    F: FieldSet,
    C: FnMut() -> F,
    W: FnMut() -> F,
    H: FnMut(F) -> Fut,
    Fut: Future<Output = std::result::Result<I, E>>,
    I: RecordCount,
    E: Display,
{
    let actual = count(handler(F::default()).await, "baseline")?;
    trace!(actual, expected_baseline, "baseline query returned");
    if actual != expected_baseline {
        return Err(Error::UnexpectedResultCount {
            expected: expected_baseline,
            actual,
        });
    }

    let fields = F::fields();
    debug!(fields = fields.len(), "checking filter fields one at a time");

    for field in &fields {
        let wrong = wrong_filter();
        let filter = field.apply(F::default(), &wrong);
        let matched = count(handler(filter).await, format!("field `{}`", field.name()))?;
        trace!(field = field.name(), matched, "single-field query returned");
        if matched > 0 {
            return Err(Error::SpuriousMatch {
                field: field.name().to_string(),
                value: field.describe(&wrong),
                matched,
            });
        }
    }

    let matched = count(handler(correct_filter()).await, "correct filter")?;
    trace!(matched, "correct filter query returned");
    if matched == 0 {
        return Err(Error::NoMatch);
    }

    debug!(fields = fields.len(), "filter applied on every field");
    Ok(())
}

/// A query result whose records can be counted.
///
/// `Option` results count their contents, and `None` counts as no records.
pub trait RecordCount {
    /// Number of records in the result.
    fn record_count(&self) -> usize;
}

impl<T> RecordCount for Vec<T> {
    fn record_count(&self) -> usize {
        self.len()
    }
}

impl<T> RecordCount for VecDeque<T> {
    fn record_count(&self) -> usize {
        self.len()
    }
}

impl<T, const N: usize> RecordCount for [T; N] {
    fn record_count(&self) -> usize {
        N
    }
}

impl<T> RecordCount for &[T] {
    fn record_count(&self) -> usize {
        self.len()
    }
}

impl<T> RecordCount for Box<[T]> {
    fn record_count(&self) -> usize {
        self.len()
    }
}

impl<C: RecordCount> RecordCount for Option<C> {
    fn record_count(&self) -> usize {
        self.as_ref().map_or(0, RecordCount::record_count)
    }
}

fn count<I, E>(response: std::result::Result<I, E>, stage: impl Display) -> Result<usize>
where
    I: RecordCount,
    E: Display,
{
    response
        .map(|records| records.record_count())
        .map_err(|err| Error::collaborator(stage.to_string(), err))
}

/// Assert that a query handler applies every field of its filter type.
///
/// Awaits [`validate_filter_applied`](crate::assertions::validate_filter_applied),
/// so it must be used inside an async context.
///
/// # Panics
///
/// Panics with the validation error if any check fails.
///
/// # Example
///
/// ```rust,ignore
/// assert_filter_applied!(correct, wrong, handler, 1);
/// assert_filter_applied!(correct, wrong, handler, 1, "user search");
/// ```
#[macro_export]
macro_rules! assert_filter_applied {
    ($correct:expr, $wrong:expr, $handler:expr, $baseline:expr) => {{
        if let Err(err) = $crate::assertions::validate_filter_applied(
            $correct, $wrong, $handler, $baseline,
        )
        .await
        {
            panic!("assertion failed: {}", err);
        }
    }};
    ($correct:expr, $wrong:expr, $handler:expr, $baseline:expr, $($arg:tt)+) => {{
        if let Err(err) = $crate::assertions::validate_filter_applied(
            $correct, $wrong, $handler, $baseline,
        )
        .await
        {
            panic!("assertion failed: {}: {}", err, format_args!($($arg)+));
        }
    }};
}
