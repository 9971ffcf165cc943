use crate::{
    db::{
        cursor::CursorError,
        query::{PageArgsError, PageArgsValidationError},
    },
    value::SortValue,
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// PageError
///
/// Outcome of a failed page computation. A page either completes with a
/// consistent window or fails with exactly one of these; nothing is retried.
///

#[derive(Debug, ThisError)]
pub enum PageError {
    #[error(transparent)]
    InvalidCursor(#[from] CursorError),

    #[error(transparent)]
    InvalidPaginationArguments(#[from] PageArgsError),

    /// The row source returned a value that does not fit the declared column type.
    #[error("malformed sort value for '{column}' on row {rowid}: found {found:?}")]
    MalformedSortValue {
        rowid: i64,
        column: String,
        found: Option<SortValue>,
    },

    #[error("page computation cancelled before attempt {attempt}")]
    Cancelled { attempt: u32 },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl PageError {
    pub(crate) fn malformed_sort_value(
        rowid: i64,
        column: impl Into<String>,
        found: Option<SortValue>,
    ) -> Self {
        Self::MalformedSortValue {
            rowid,
            column: column.into(),
            found,
        }
    }

    /// Stable classification for transport-level status mapping.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidCursor(_) | Self::InvalidPaginationArguments(_) => ErrorClass::Client,
            Self::MalformedSortValue { .. } => ErrorClass::Corruption,
            Self::Cancelled { .. } => ErrorClass::Cancelled,
            Self::Internal(err) => err.class,
        }
    }

    /// Whether the caller caused this failure and should fix the request.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self.class(), ErrorClass::Client)
    }
}

impl From<PageArgsValidationError> for PageError {
    fn from(err: PageArgsValidationError) -> Self {
        match err {
            PageArgsValidationError::Arguments(err) => Self::InvalidPaginationArguments(err),
            PageArgsValidationError::Cursor(err) => Self::InvalidCursor(err),
        }
    }
}

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Raised for row-source failures and contract violations, never for
/// caller mistakes.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Construct a source-origin internal error (I/O, driver, pool exhaustion).
    pub fn source_internal(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, ErrorOrigin::Source, message)
    }

    /// Construct a source-origin invariant violation (ordering or bound contract broken).
    pub fn source_invariant(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvariantViolation, ErrorOrigin::Source, message)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Client,
    Corruption,
    InvariantViolation,
    Internal,
    Cancelled,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Client => "client",
            Self::Corruption => "corruption",
            Self::InvariantViolation => "invariant_violation",
            Self::Internal => "internal",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Source,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Source => "source",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
