//! Deep sequence equality.
//!
//! Compares sequences, and sequences of sequences, that may be held in
//! different container types. Lengths are compared before elements at every
//! level, so a shorter target is always reported as a length mismatch.
//!
//! ```rust
//! use testkit_assert::assertions::{nested_seq_eq, seq_eq};
//!
//! assert!(seq_eq(vec![1, 2, 3], [1, 2, 3]));
//! assert!(!seq_eq(&[1, 2, 3], &[1, 4, 3]));
//!
//! let rows: Vec<Vec<i32>> = vec![vec![1, 2, 3], vec![4, 5, 6]];
//! assert!(nested_seq_eq(&rows, &[[1, 2, 3], [4, 5, 6]]));
//! ```

use std::fmt;

/// Where two sequences first differ.
///
/// `path` holds the indices of the enclosing elements, outermost first. It
/// is empty for a top-level length mismatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// Sequences at `path` have different lengths.
    Length {
        /// Index path to the mismatched sequence.
        path: Vec<usize>,
        /// Source length.
        source: usize,
        /// Target length.
        target: usize,
    },
    /// Elements at `path` are not equal.
    Element {
        /// Index path to the mismatched element.
        path: Vec<usize>,
    },
}

impl Mismatch {
    /// Index path to the mismatch.
    #[must_use]
    pub fn path(&self) -> &[usize] {
        match self {
            Self::Length { path, .. } | Self::Element { path } => path,
        }
    }

    fn within(mut self, index: usize) -> Self {
        match &mut self {
            Self::Length { path, .. } | Self::Element { path } => path.insert(0, index),
        }
        self
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length {
                path,
                source,
                target,
            } => {
                write!(f, "length {source} != {target}")?;
                if !path.is_empty() {
                    write!(f, " at {path:?}")?;
                }
                Ok(())
            }
            Self::Element { path } => write!(f, "elements differ at {path:?}"),
        }
    }
}

impl std::error::Error for Mismatch {}

/// Compare two sequences element by element.
///
/// # Errors
///
/// Returns the first [`Mismatch`]: a length difference, otherwise the first
/// unequal element.
pub fn check_seq_eq<A, B>(source: A, target: B) -> Result<(), Mismatch>
where
    A: IntoIterator,
    B: IntoIterator,
    A::Item: PartialEq<B::Item>,
{
    let source: Vec<_> = source.into_iter().collect();
    let target: Vec<_> = target.into_iter().collect();

    if source.len() != target.len() {
        return Err(Mismatch::Length {
            path: Vec::new(),
            source: source.len(),
            target: target.len(),
        });
    }

    match source.iter().zip(&target).position(|(s, t)| s != t) {
        Some(index) => Err(Mismatch::Element { path: vec![index] }),
        None => Ok(()),
    }
}

/// Compare two sequences of sequences, level by level.
///
/// # Errors
///
/// Returns the first [`Mismatch`], with `path` locating the inner sequence.
pub fn check_nested_seq_eq<A, B>(source: A, target: B) -> Result<(), Mismatch>
where
    A: IntoIterator,
    B: IntoIterator,
    A::Item: IntoIterator,
    B::Item: IntoIterator,
    <A::Item as IntoIterator>::Item: PartialEq<<B::Item as IntoIterator>::Item>,
{
    let source: Vec<_> = source.into_iter().collect();
    let target: Vec<_> = target.into_iter().collect();

    if source.len() != target.len() {
        return Err(Mismatch::Length {
            path: Vec::new(),
            source: source.len(),
            target: target.len(),
        });
    }

    for (index, (s, t)) in source.into_iter().zip(target).enumerate() {
        check_seq_eq(s, t).map_err(|mismatch| mismatch.within(index))?;
    }
    Ok(())
}

/// Returns `true` if both sequences have equal length and equal elements.
pub fn seq_eq<A, B>(source: A, target: B) -> bool
where
    A: IntoIterator,
    B: IntoIterator,
    A::Item: PartialEq<B::Item>,
{
    check_seq_eq(source, target).is_ok()
}

/// Returns `true` if both sequences of sequences are equal at every level.
pub fn nested_seq_eq<A, B>(source: A, target: B) -> bool
where
    A: IntoIterator,
    B: IntoIterator,
    A::Item: IntoIterator,
    B::Item: IntoIterator,
    <A::Item as IntoIterator>::Item: PartialEq<<B::Item as IntoIterator>::Item>,
{
    check_nested_seq_eq(source, target).is_ok()
}

/// Assert that two sequences are equal.
///
/// # Panics
///
/// Panics with the first mismatch if the sequences differ.
///
/// # Example
///
/// ```rust
/// use testkit_assert::assert_seq_eq;
///
/// assert_seq_eq!(vec![1, 2, 3], [1, 2, 3]);
/// assert_seq_eq!(["a", "b"], vec!["a", "b"], "tags for {}", "user 1");
/// ```
#[macro_export]
macro_rules! assert_seq_eq {
    ($source:expr, $target:expr) => {{
        if let Err(mismatch) = $crate::assertions::check_seq_eq($source, $target) {
            panic!("assertion failed: sequences differ: {}", mismatch);
        }
    }};
    ($source:expr, $target:expr, $($arg:tt)+) => {{
        if let Err(mismatch) = $crate::assertions::check_seq_eq($source, $target) {
            panic!(
                "assertion failed: sequences differ: {}: {}",
                mismatch,
                format_args!($($arg)+)
            );
        }
    }};
}

/// Assert that two sequences of sequences are equal at every level.
///
/// # Panics
///
/// Panics with the first mismatch if the sequences differ.
///
/// # Example
///
/// ```rust
/// use testkit_assert::assert_nested_seq_eq;
///
/// assert_nested_seq_eq!(&vec![vec![1, 2], vec![3]], [&[1, 2][..], &[3][..]]);
/// ```
#[macro_export]
macro_rules! assert_nested_seq_eq {
    ($source:expr, $target:expr) => {{
        if let Err(mismatch) = $crate::assertions::check_nested_seq_eq($source, $target) {
            panic!("assertion failed: sequences differ: {}", mismatch);
        }
    }};
    ($source:expr, $target:expr, $($arg:tt)+) => {{
        if let Err(mismatch) = $crate::assertions::check_nested_seq_eq($source, $target) {
            panic!(
                "assertion failed: sequences differ: {}: {}",
                mismatch,
                format_args!($($arg)+)
            );
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: [i32; 3] = [1, 2, 3];

    #[test]
    fn test_flat_equal() {
        assert!(seq_eq(SOURCE, [1, 2, 3]));
        assert!(seq_eq(&vec![1, 2, 3], &[1, 2, 3]));
        assert!(seq_eq(Vec::<i32>::new(), Vec::<i32>::new()));
    }

    #[test]
    fn test_flat_element_differs() {
        assert_eq!(
            check_seq_eq(SOURCE, [1, 4, 3]),
            Err(Mismatch::Element { path: vec![1] })
        );
    }

    #[test]
    fn test_flat_length_differs() {
        assert_eq!(
            check_seq_eq(SOURCE, [1, 2]),
            Err(Mismatch::Length {
                path: vec![],
                source: 3,
                target: 2,
            })
        );
        assert!(!seq_eq(SOURCE, [1, 2, 3, 4]));
    }

    #[test]
    fn test_length_reported_before_elements() {
        assert_eq!(
            check_seq_eq([9, 2, 3], [1, 2]),
            Err(Mismatch::Length {
                path: vec![],
                source: 3,
                target: 2,
            })
        );
    }

    #[test]
    fn test_nested_equal_across_containers() {
        let source = vec![vec![1, 2, 3], vec![4, 5, 6]];
        let target: [&[i32]; 2] = [&[1, 2, 3], &[4, 5, 6]];
        assert!(nested_seq_eq(&source, target));
        assert!(nested_seq_eq(&[[1, 2, 3], [4, 5, 6]], &source));
    }

    #[test]
    fn test_nested_outer_length() {
        let source = vec![vec![1, 2, 3], vec![4, 5, 6]];
        assert_eq!(
            check_nested_seq_eq(&source, &vec![vec![1, 2, 3]]),
            Err(Mismatch::Length {
                path: vec![],
                source: 2,
                target: 1,
            })
        );
        assert!(!nested_seq_eq(
            &source,
            &vec![vec![1, 2, 3], vec![4, 5, 6], vec![4, 5, 6]]
        ));
    }

    #[test]
    fn test_nested_inner_length() {
        let source = vec![vec![1, 2, 3], vec![4, 5, 6]];
        assert_eq!(
            check_nested_seq_eq(&source, &vec![vec![1, 2], vec![4, 5, 6]]),
            Err(Mismatch::Length {
                path: vec![0],
                source: 3,
                target: 2,
            })
        );
        assert!(!nested_seq_eq(
            &source,
            &vec![vec![1, 2, 3, 4], vec![4, 5, 6]]
        ));
    }

    #[test]
    fn test_nested_inner_element() {
        let source = vec![vec![1, 2, 3], vec![4, 5, 6]];
        let mismatch = check_nested_seq_eq(&source, &[[1, 2, 3], [4, 0, 6]]).unwrap_err();
        assert_eq!(mismatch.path(), &[1, 1]);
        assert_eq!(mismatch.to_string(), "elements differ at [1, 1]");
    }

    #[test]
    fn test_deeper_nesting_uses_item_equality() {
        let source = vec![vec![vec![1], vec![2]], vec![vec![3]]];
        assert!(nested_seq_eq(&source, &source));
        assert!(!nested_seq_eq(
            &source,
            &vec![vec![vec![1], vec![2]], vec![vec![4]]]
        ));
    }

    #[test]
    fn test_length_display() {
        let mismatch = Mismatch::Length {
            path: vec![2],
            source: 3,
            target: 1,
        };
        assert_eq!(mismatch.to_string(), "length 3 != 1 at [2]");
    }

    #[test]
    fn test_assert_seq_eq_success() {
        assert_seq_eq!(SOURCE, vec![1, 2, 3]);
        assert_nested_seq_eq!(vec![SOURCE], [[1, 2, 3]]);
    }

    #[test]
    #[should_panic(expected = "sequences differ: elements differ at [1]: ids")]
    fn test_assert_seq_eq_failure() {
        assert_seq_eq!(SOURCE, [1, 4, 3], "ids");
    }

    #[test]
    #[should_panic(expected = "sequences differ: length 2 != 3 at [0]")]
    fn test_assert_nested_seq_eq_failure() {
        assert_nested_seq_eq!([vec![1, 2]], [vec![1, 2, 3]]);
    }
}
