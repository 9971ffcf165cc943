//! Module: query
//! Responsibility: validate Relay-style window arguments into executor-ready form.
//! Does not own: sort resolution or cursor/sort compatibility.
//! Boundary: the only place transport-level `first`/`last`/`after`/`before` are interpreted.

use crate::{
    config::PaginationConfig,
    db::cursor::{Cursor, CursorError},
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// PageRequest
///
/// Window arguments exactly as received from the transport layer.
/// A request supplies `first` with an optional `after`, or `last` with an
/// optional `before`.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PageRequest {
    pub first: Option<i32>,
    pub after: Option<String>,
    pub last: Option<i32>,
    pub before: Option<String>,
}

impl PageRequest {
    #[must_use]
    pub fn first(count: i32) -> Self {
        Self {
            first: Some(count),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn last(count: i32) -> Self {
        Self {
            last: Some(count),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    #[must_use]
    pub fn before(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self
    }
}

///
/// PageArgsError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PageArgsError {
    #[error("invalid pagination arguments: one of `first` or `last` is required")]
    MissingLimit,

    #[error("invalid pagination arguments: `first` and `last` are mutually exclusive")]
    ConflictingLimits,

    #[error("invalid pagination arguments: `{argument}` must be positive, found {value}")]
    NonPositiveLimit { argument: &'static str, value: i32 },

    #[error("invalid pagination arguments: `{argument}` = {value} exceeds the maximum page size {max}")]
    LimitTooLarge {
        argument: &'static str,
        value: i32,
        max: u32,
    },

    #[error("invalid pagination arguments: `{cursor}` cannot be combined with `{limit}`")]
    MismatchedCursor {
        cursor: &'static str,
        limit: &'static str,
    },
}

///
/// Window
///
/// Validated window: which end of the ordering the page grows from.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Window {
    Forward { limit: u32, after: Option<Cursor> },
    Backward { limit: u32, before: Option<Cursor> },
}

///
/// PageArgs
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageArgs {
    pub window: Window,
}

impl PageArgs {
    #[must_use]
    pub const fn forward(limit: u32, after: Option<Cursor>) -> Self {
        Self {
            window: Window::Forward { limit, after },
        }
    }

    #[must_use]
    pub const fn backward(limit: u32, before: Option<Cursor>) -> Self {
        Self {
            window: Window::Backward { limit, before },
        }
    }

    /// Validate raw arguments against the configured limits and decode the cursor.
    ///
    /// Argument shape is checked before the cursor is decoded, so a request
    /// with both a bad limit and a bad cursor reports the limit.
    pub fn from_request(
        request: &PageRequest,
        config: &PaginationConfig,
    ) -> Result<Self, PageArgsValidationError> {
        let (limit, forward) = match (request.first, request.last) {
            (Some(_), Some(_)) => return Err(PageArgsError::ConflictingLimits.into()),
            (None, None) => return Err(PageArgsError::MissingLimit.into()),
            (Some(first), None) => (validate_limit("first", first, config)?, true),
            (None, Some(last)) => (validate_limit("last", last, config)?, false),
        };

        if forward {
            if request.before.is_some() {
                return Err(PageArgsError::MismatchedCursor {
                    cursor: "before",
                    limit: "first",
                }
                .into());
            }
            let after = decode_optional(request.after.as_deref())?;

            Ok(Self::forward(limit, after))
        } else {
            if request.after.is_some() {
                return Err(PageArgsError::MismatchedCursor {
                    cursor: "after",
                    limit: "last",
                }
                .into());
            }
            let before = decode_optional(request.before.as_deref())?;

            Ok(Self::backward(limit, before))
        }
    }

    #[must_use]
    pub const fn limit(&self) -> u32 {
        match &self.window {
            Window::Forward { limit, .. } | Window::Backward { limit, .. } => *limit,
        }
    }

    /// The `after` or `before` cursor, whichever this window carries.
    #[must_use]
    pub const fn boundary(&self) -> Option<&Cursor> {
        match &self.window {
            Window::Forward { after, .. } => after.as_ref(),
            Window::Backward { before, .. } => before.as_ref(),
        }
    }

    #[must_use]
    pub const fn is_backward(&self) -> bool {
        matches!(self.window, Window::Backward { .. })
    }
}

///
/// PageArgsValidationError
///
/// Either half of request validation; each maps to its own client error.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PageArgsValidationError {
    #[error(transparent)]
    Arguments(#[from] PageArgsError),

    #[error(transparent)]
    Cursor(#[from] CursorError),
}

// Positive and within the configured maximum.
fn validate_limit(
    argument: &'static str,
    value: i32,
    config: &PaginationConfig,
) -> Result<u32, PageArgsError> {
    let limit = u32::try_from(value)
        .ok()
        .filter(|limit| *limit > 0)
        .ok_or(PageArgsError::NonPositiveLimit { argument, value })?;

    if limit > config.max_page_size {
        return Err(PageArgsError::LimitTooLarge {
            argument,
            value,
            max: config.max_page_size,
        });
    }

    Ok(limit)
}

fn decode_optional(token: Option<&str>) -> Result<Option<Cursor>, CursorError> {
    token
        .map(|token| Cursor::decode(token).map_err(CursorError::from))
        .transpose()
}

///
/// TESTS
///
