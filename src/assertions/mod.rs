//! Assertions for query handlers, validating actions and collections.
//!
//! This module provides:
//!
//! - [`validate_filter_applied`] - Check a query handler honours every filter field
//! - [`validate_required_fields`] - Check an action rejects models with cleared fields
//! - [`seq_eq`] / [`nested_seq_eq`] - Deep sequence equality
//! - [`expect_failure`] / [`rewrap`] - Small helpers for fallible futures
//!
//! Each check returns [`crate::Result`]; the `assert_*!` macros panic instead.
//!
//! # Filter Assertions
//!
//! ```rust,ignore
//! use testkit_assert::assert_filter_applied;
//!
//! assert_filter_applied!(correct_filter, wrong_filter, search_users, 1);
//! ```
//!
//! # Required Fields
//!
//! ```rust,ignore
//! use testkit_assert::assert_required_fields;
//!
//! assert_required_fields!(new_user, create_user, ["name", "email"]);
//! ```
//!
//! # Sequences
//!
//! ```rust
//! use testkit_assert::{assert_nested_seq_eq, assert_seq_eq};
//!
//! assert_seq_eq!(vec![1, 2, 3], [1, 2, 3]);
//! assert_nested_seq_eq!(vec![vec![1], vec![2, 3]], [vec![1], vec![2, 3]]);
//! ```

mod failure;
mod filter;
mod required;
mod sequence;

pub use failure::{expect_failure, rewrap, rewrap_async};
pub use filter::{try_validate_filter_applied, validate_filter_applied, RecordCount};
pub use required::{validate_required_fields, validate_required_fields_with, RequiredFieldOptions};
pub use sequence::{check_nested_seq_eq, check_seq_eq, nested_seq_eq, seq_eq, Mismatch};
