//! # testkit-assert
//!
//! > Assertion helpers for async Rust tests
//!
//! **testkit-assert** checks that query handlers actually apply their filters,
//! that actions reject models with required fields missing, and that nested
//! collections are equal.
//!
//! ## Quick Start
//!
//! ```rust
//! use testkit_assert::prelude::*;
//! use std::future::ready;
//!
//! #[derive(Debug, Default, Clone, FieldSet)]
//! struct UserFilter {
//!     id: Option<u32>,
//!     name: Option<String>,
//! }
//!
//! struct User {
//!     id: u32,
//!     name: String,
//! }
//!
//! fn search(users: &[User], filter: &UserFilter) -> Vec<u32> {
//!     users
//!         .iter()
//!         .filter(|u| filter.id.map_or(true, |id| u.id == id))
//!         .filter(|u| filter.name.as_ref().map_or(true, |n| &u.name == n))
//!         .map(|u| u.id)
//!         .collect()
//! }
//!
//! let users = vec![User { id: 1, name: "test".into() }];
//!
//! let result = futures::executor::block_on(validate_filter_applied(
//!     || UserFilter { id: Some(1), name: Some("test".into()) },
//!     || UserFilter { id: Some(2), name: Some("test2".into()) },
//!     |filter: UserFilter| ready(search(&users, &filter)),
//!     1,
//! ));
//! assert!(result.is_ok());
//! ```
//!
//! ## Features
//!
//! - **Filter checks** - Every filter field must narrow the query on its own
//! - **Required fields** - Clearing a required field must make the action fail
//! - **Sequence equality** - Length and element checks across nested containers
//! - **Field descriptors** - `#[derive(FieldSet)]` instead of runtime reflection
//! - **Call logs** - See exactly what a validator passed to your handler

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assertions;
pub mod error;
pub mod fields;
pub mod mock;

/// Prelude for convenient imports
///
/// ```rust
/// use testkit_assert::prelude::*;
/// ```
pub mod prelude {
    pub use crate::assertions::{
        check_nested_seq_eq, check_seq_eq, expect_failure, nested_seq_eq, rewrap, rewrap_async,
        seq_eq, try_validate_filter_applied, validate_filter_applied, validate_required_fields,
        validate_required_fields_with, Mismatch, RecordCount, RequiredFieldOptions,
    };
    pub use crate::error::{Error, Result};
    pub use crate::fields::{with_field, Field, FieldSet};
    pub use crate::mock::CallLog;
}

// Re-exports
pub use error::{Error, Result};
