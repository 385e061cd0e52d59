//! Error definitions
//!
//! This module provides the failure type shared by every check in testkit-assert.
//! A check returns `Err` on its first violation; nothing is aggregated.

use thiserror::Error;

use crate::assertions::Mismatch;

/// Main error type for testkit-assert
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The unfiltered query did not return the expected baseline count.
    #[error("unfiltered query returned {actual} record(s), expected {expected}")]
    UnexpectedResultCount {
        /// Expected baseline record count.
        expected: usize,
        /// Records actually returned.
        actual: usize,
    },

    /// A filter holding only one known-wrong field still matched records.
    #[error("filter field `{field}` set to {value} matched {matched} record(s), expected none")]
    SpuriousMatch {
        /// Name of the field under test.
        field: String,
        /// `Debug` rendering of the wrong value.
        value: String,
        /// Records returned.
        matched: usize,
    },

    /// The fully correct filter matched nothing.
    #[error("filter with every field set to a matching value returned no records")]
    NoMatch,

    /// The action accepted a model whose required field was cleared.
    #[error("required field `{field}` was cleared but the action succeeded{}", note(.message))]
    MissingFailure {
        /// Name of the cleared field.
        field: String,
        /// Caller-supplied message, possibly empty.
        message: String,
    },

    /// The action failed, but not with the expected kind of error.
    #[error("required field `{field}` was cleared and the action failed with an unexpected error: {error}")]
    UnexpectedFailure {
        /// Name of the cleared field.
        field: String,
        /// `Debug` rendering of the error the action returned.
        error: String,
    },

    /// A field name that the model type does not declare.
    #[error("unknown field `{0}`")]
    UnknownField(String),

    /// A collaborator (query handler) returned an error.
    #[error("query handler failed during {stage}: {error}")]
    Collaborator {
        /// Validation step that was running.
        stage: String,
        /// Display rendering of the handler error.
        error: String,
    },

    /// Two sequences were not equal.
    #[error("sequences differ: {0}")]
    SequenceMismatch(Mismatch),

    /// Assertion failed
    #[error("Assertion failed: {0}")]
    AssertionFailed(String),
}

impl Error {
    /// Create an assertion failed error.
    #[must_use]
    pub fn assertion_failed(message: impl Into<String>) -> Self {
        Self::AssertionFailed(message.into())
    }

    /// Create a collaborator error for the given validation stage.
    #[must_use]
    pub fn collaborator(stage: impl Into<String>, error: impl std::fmt::Display) -> Self {
        Self::Collaborator {
            stage: stage.into(),
            error: error.to_string(),
        }
    }

    /// Name of the field this error concerns, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::SpuriousMatch { field, .. }
            | Self::MissingFailure { field, .. }
            | Self::UnexpectedFailure { field, .. }
            | Self::UnknownField(field) => Some(field),
            _ => None,
        }
    }
}

impl From<Mismatch> for Error {
    fn from(mismatch: Mismatch) -> Self {
        Self::SequenceMismatch(mismatch)
    }
}

fn note(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(": {message}")
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
