//! Statically-typed field descriptors.
//!
//! The validators never inspect a type at runtime. Instead a model or filter
//! type publishes its fields through [`FieldSet`], usually by deriving it:
//!
//! ```rust
//! use testkit_assert::fields::{FieldSet, with_field};
//!
//! #[derive(Debug, Default, Clone, PartialEq, FieldSet)]
//! struct UserFilter {
//!     id: Option<u32>,
//!     name: Option<String>,
//! }
//!
//! let names: Vec<_> = UserFilter::fields().iter().map(|f| f.name()).collect();
//! assert_eq!(names, ["id", "name"]);
//!
//! let wrong = UserFilter { id: Some(7), name: Some("nobody".into()) };
//! let id = UserFilter::field("id").unwrap();
//! let single = with_field(UserFilter::default(), &id, &wrong);
//! assert_eq!(single, UserFilter { id: Some(7), name: None });
//! ```
//!
//! Hand-written implementations use [`Field::new`] with a pair of accessors:
//!
//! ```rust
//! use testkit_assert::fields::{Field, FieldSet};
//!
//! #[derive(Default)]
//! struct Page {
//!     size: u32,
//! }
//!
//! impl FieldSet for Page {
//!     fn fields() -> Vec<Field<Self>> {
//!         vec![Field::new("size", |p: &Self| &p.size, |p: &mut Self| &mut p.size)]
//!     }
//! }
//! ```

use std::fmt::{self, Debug};
use std::sync::Arc;

#[cfg(feature = "derive")]
pub use testkit_assert_macros::FieldSet;

type CopyFn<T> = dyn Fn(&T, &mut T) + Send + Sync;
type ClearFn<T> = dyn Fn(&mut T) + Send + Sync;
type DescribeFn<T> = dyn Fn(&T) -> String + Send + Sync;

/// A named, settable field of `T`.
///
/// Erases the field's value type so fields of different types can live in
/// one list. Cloning is cheap.
pub struct Field<T> {
    name: &'static str,
    copy: Arc<CopyFn<T>>,
    clear: Arc<ClearFn<T>>,
    describe: Arc<DescribeFn<T>>,
}

impl<T: 'static> Field<T> {
    /// Create a field from its name and a pair of accessors.
    ///
    /// Clearing resets the value to `V::default()`. Both accessors are `fn`
    /// pointers, so closures passed here must not capture anything.
    pub fn new<V>(name: &'static str, get: fn(&T) -> &V, get_mut: fn(&mut T) -> &mut V) -> Self
    where
        V: Clone + Default + Debug + 'static,
    {
        Self {
            name,
            copy: Arc::new(move |source: &T, target: &mut T| {
                *get_mut(target) = get(source).clone();
            }),
            clear: Arc::new(move |model: &mut T| {
                *get_mut(model) = V::default();
            }),
            describe: Arc::new(move |model: &T| format!("{:?}", get(model))),
        }
    }
}

impl<T> Field<T> {
    /// The field's name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Copy this field's value from `source` onto `target`, leaving every
    /// other field of `target` untouched.
    pub fn copy_from(&self, source: &T, target: &mut T) {
        (self.copy)(source, target);
    }

    /// Reset this field of `model` to its default value.
    pub fn clear(&self, model: &mut T) {
        (self.clear)(model);
    }

    /// `Debug` rendering of this field's value in `model`.
    #[must_use]
    pub fn describe(&self, model: &T) -> String {
        (self.describe)(model)
    }

    /// Return `target` with this field replaced by the value from `source`.
    #[must_use]
    pub fn apply(&self, mut target: T, source: &T) -> T {
        self.copy_from(source, &mut target);
        target
    }

    /// Return `model` with this field cleared.
    #[must_use]
    pub fn cleared(&self, mut model: T) -> T {
        self.clear(&mut model);
        model
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            copy: Arc::clone(&self.copy),
            clear: Arc::clone(&self.clear),
            describe: Arc::clone(&self.describe),
        }
    }
}

impl<T> Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A type whose fields can be enumerated, copied and cleared one at a time.
///
/// `Default` is the unconstrained value: a default filter must not narrow
/// a query at all.
pub trait FieldSet: Default + Sized + 'static {
    /// Every field, in declaration order.
    fn fields() -> Vec<Field<Self>>;

    /// Look up a field by name.
    #[must_use]
    fn field(name: &str) -> Option<Field<Self>> {
        Self::fields().into_iter().find(|f| f.name() == name)
    }
}

/// Return `target` with `field` copied over from `source`.
///
/// This is how the filter validator builds a single-field filter from a
/// default one.
#[must_use]
pub fn with_field<T>(target: T, field: &Field<T>, source: &T) -> T {
    field.apply(target, source)
}
