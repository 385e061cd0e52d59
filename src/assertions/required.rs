//! Required-field validation.
//!
//! For each named field, a fresh model is built, that field is cleared (reset
//! to its `Default`), and the action under test must reject the model.
//!
//! ```rust
//! use testkit_assert::assertions::validate_required_fields;
//! use testkit_assert::fields::FieldSet;
//!
//! #[derive(Debug, Default, Clone, FieldSet)]
//! struct NewUser {
//!     id: u32,
//!     name: String,
//! }
//!
//! async fn create(user: NewUser) -> Result<(), &'static str> {
//!     if user.name.is_empty() {
//!         return Err("name is required");
//!     }
//!     Ok(())
//! }
//!
//! let factory = || NewUser { id: 1, name: "x".into() };
//! futures::executor::block_on(async {
//!     assert!(validate_required_fields(factory, create, &["name"]).await.is_ok());
//!     assert!(validate_required_fields(factory, create, &["id"]).await.is_err());
//! });
//! ```

use std::fmt::{self, Debug};
use std::future::Future;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::fields::FieldSet;

type FailurePredicate<E> = Box<dyn Fn(&E) -> bool + Send + Sync>;
type MessageBuilder = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Options for [`validate_required_fields_with`].
///
/// By default any error counts as the expected failure and no message is
/// attached.
///
/// # Example
///
/// ```rust
/// use testkit_assert::assertions::RequiredFieldOptions;
///
/// #[derive(Debug)]
/// enum CreateError {
///     Missing(&'static str),
///     Conflict,
/// }
///
/// let options = RequiredFieldOptions::new()
///     .expect(|err: &CreateError| matches!(err, CreateError::Missing(_)))
///     .message_with(|field| format!("{field} must be mandatory"));
/// ```
pub struct RequiredFieldOptions<E> {
    expected: Option<FailurePredicate<E>>,
    message: Option<MessageBuilder>,
}

impl<E> RequiredFieldOptions<E> {
    /// Create options that accept any failure.
    #[must_use]
    pub fn new() -> Self {
        Self {
            expected: None,
            message: None,
        }
    }

    /// Only accept errors for which `predicate` returns `true`.
    #[must_use]
    pub fn expect<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.expected = Some(Box::new(predicate));
        self
    }

    /// Attach a fixed message to [`Error::MissingFailure`].
    #[must_use]
    pub fn message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.message_with(move |_| message.clone())
    }

    /// Build the [`Error::MissingFailure`] message from the offending field.
    #[must_use]
    pub fn message_with<M>(mut self, builder: M) -> Self
    where
        M: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.message = Some(Box::new(builder));
        self
    }

    fn accepts(&self, err: &E) -> bool {
        self.expected.as_ref().map_or(true, |predicate| predicate(err))
    }

    fn message_for(&self, field: &str) -> String {
        self.message
            .as_ref()
            .map_or_else(String::new, |builder| builder(field))
    }
}

impl<E> Default for RequiredFieldOptions<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Debug for RequiredFieldOptions<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequiredFieldOptions")
            .field("expects_kind", &self.expected.is_some())
            .field("has_message", &self.message.is_some())
            .finish()
    }
}

/// Validate that `action` fails whenever one of `fields` is cleared.
///
/// Any error returned by the action counts. With no fields the check
/// passes without calling `factory` or `action`.
///
/// # Errors
///
/// - [`Error::UnknownField`] if a name is not a field of `M`.
/// - [`Error::MissingFailure`] for the first field whose clearing the action
///   accepted.
pub async fn validate_required_fields<M, Fa, A, Fut, T, E>(
    factory: Fa,
    action: A,
    fields: &[&str],
) -> Result<()>
where
    M: FieldSet,
    Fa: FnMut() -> M,
    A: FnMut(M) -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: Debug,
{
    validate_required_fields_with(factory, action, fields, RequiredFieldOptions::new()).await
}

/// Like [`validate_required_fields`], with an expected failure kind and a
/// custom message.
///
/// # Errors
///
/// Everything [`validate_required_fields`] reports, plus
/// [`Error::UnexpectedFailure`] when the action fails with an error the
/// options do not expect.
pub async fn validate_required_fields_with<M, Fa, A, Fut, T, E>(
    mut factory: Fa,
    mut action: A,
    fields: &[&str],
    options: RequiredFieldOptions<E>,
) -> Result<()>
where
    M: FieldSet,
    Fa: FnMut() -> M,
    A: FnMut(M) -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: Debug,
{
    if fields.is_empty() {
        return Ok(());
    }

    let known = M::fields();
    debug!(fields = fields.len(), "checking required fields");

    for &name in fields {
        let field = known
            .iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| Error::UnknownField(name.to_string()))?;

        let model = field.cleared(factory());
        match action(model).await {
            Ok(_) => {
                return Err(Error::MissingFailure {
                    field: name.to_string(),
                    message: options.message_for(name),
                });
            }
            Err(err) if options.accepts(&err) => {
                trace!(field = name, error = ?err, "action rejected cleared field");
            }
            Err(err) => {
                return Err(Error::UnexpectedFailure {
                    field: name.to_string(),
                    error: format!("{err:?}"),
                });
            }
        }
    }

    Ok(())
}

/// Assert that an action rejects a model with any of the given fields cleared.
///
/// Awaits [`validate_required_fields`](crate::assertions::validate_required_fields),
/// so it must be used inside an async context.
///
/// # Panics
///
/// Panics with the validation error if any check fails.
///
/// # Example
///
/// ```rust,ignore
/// assert_required_fields!(factory, create_user, ["name", "email"]);
/// ```
#[macro_export]
macro_rules! assert_required_fields {
    ($factory:expr, $action:expr, [$($field:expr),* $(,)?]) => {{
        if let Err(err) = $crate::assertions::validate_required_fields(
            $factory, $action, &[$($field),*],
        )
        .await
        {
            panic!("assertion failed: {}", err);
        }
    }};
    ($factory:expr, $action:expr, [$($field:expr),* $(,)?], $($arg:tt)+) => {{
        if let Err(err) = $crate::assertions::validate_required_fields(
            $factory, $action, &[$($field),*],
        )
        .await
        {
            panic!("assertion failed: {}: {}", err, format_args!($($arg)+));
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Field;
    use crate::mock::CallLog;
    use std::future::{ready, Ready};

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Model {
        id: i32,
        name: Option<String>,
    }

    impl FieldSet for Model {
        fn fields() -> Vec<Field<Self>> {
            vec![
                Field::new("id", |m: &Self| &m.id, |m: &mut Self| &mut m.id),
                Field::new("name", |m: &Self| &m.name, |m: &mut Self| &mut m.name),
            ]
        }
    }

    #[derive(Debug, PartialEq)]
    enum SaveError {
        MissingName,
        Conflict,
    }

    fn full() -> Model {
        Model {
            id: 1,
            name: Some("x".to_string()),
        }
    }

    fn reject_empty_name(model: Model) -> Ready<std::result::Result<(), SaveError>> {
        ready(match model.name.as_deref() {
            None | Some("") => Err(SaveError::MissingName),
            Some(_) => Ok(()),
        })
    }

    #[tokio::test]
    async fn test_rejected_field_passes() {
        let result = validate_required_fields(full, reject_empty_name, &["name"]).await;
        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn test_accepted_field_is_missing_failure() {
        let result = validate_required_fields(full, reject_empty_name, &["id"]).await;
        assert_eq!(
            result,
            Err(Error::MissingFailure {
                field: "id".to_string(),
                message: String::new(),
            })
        );
    }

    #[tokio::test]
    async fn test_no_fields_never_calls_action() {
        let log = CallLog::new();
        let action = log.wrap(reject_empty_name);

        let result = validate_required_fields(full, action, &[]).await;

        assert_eq!(result, Ok(()));
        assert!(!log.was_called());
    }

    #[tokio::test]
    async fn test_each_field_cleared_on_fresh_model() {
        let log = CallLog::new();
        let action = log.wrap(|_model: Model| ready(Err::<(), _>(SaveError::Conflict)));

        validate_required_fields(full, action, &["id", "name"])
            .await
            .unwrap();

        assert_eq!(
            log.calls(),
            vec![
                Model {
                    id: 0,
                    name: Some("x".to_string()),
                },
                Model { id: 1, name: None },
            ]
        );
    }

    #[tokio::test]
    async fn test_first_violation_stops_run() {
        let log = CallLog::new();
        let action = log.wrap(reject_empty_name);

        let result = validate_required_fields(full, action, &["id", "name"]).await;

        assert_eq!(result.unwrap_err().field(), Some("id"));
        assert!(log.was_called_times(1));
    }

    #[tokio::test]
    async fn test_unknown_field() {
        let result = validate_required_fields(full, reject_empty_name, &["email"]).await;
        assert_eq!(result, Err(Error::UnknownField("email".to_string())));
    }

    #[tokio::test]
    async fn test_expected_kind_matches() {
        let options = RequiredFieldOptions::new()
            .expect(|err: &SaveError| *err == SaveError::MissingName);
        let result =
            validate_required_fields_with(full, reject_empty_name, &["name"], options).await;
        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn test_unexpected_kind() {
        let options = RequiredFieldOptions::new()
            .expect(|err: &SaveError| *err == SaveError::MissingName);
        let conflict = |_model: Model| ready(Err::<(), _>(SaveError::Conflict));

        let result = validate_required_fields_with(full, conflict, &["name"], options).await;

        assert_eq!(
            result,
            Err(Error::UnexpectedFailure {
                field: "name".to_string(),
                error: "Conflict".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_message_built_from_field() {
        let options = RequiredFieldOptions::new().message_with(|field| format!("{field} is required"));
        let result = validate_required_fields_with(full, reject_empty_name, &["id"], options).await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "required field `id` was cleared but the action succeeded: id is required"
        );
    }

    #[test]
    fn test_options_debug() {
        let options = RequiredFieldOptions::<SaveError>::default().message("required");
        assert_eq!(
            format!("{options:?}"),
            "RequiredFieldOptions { expects_kind: false, has_message: true }"
        );
    }

    #[tokio::test]
    async fn test_assert_required_fields_success() {
        assert_required_fields!(full, reject_empty_name, ["name"]);
    }

    #[tokio::test]
    #[should_panic(expected = "required field `id` was cleared but the action succeeded")]
    async fn test_assert_required_fields_failure() {
        assert_required_fields!(full, reject_empty_name, ["name", "id"], "creating a model");
    }
}
