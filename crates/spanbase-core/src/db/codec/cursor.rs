//! Cursor codec helpers.
//!
//! This module owns the opaque wire-token format used for resume cursors:
//! `base64("{rowid}")` for rowid-only cursors and
//! `base64("{rowid}:{TAG}:{value}")` for sorted ones. Only the first two
//! colons delimit, so STRING values may contain `:`.
//!
//! It contains only token encoding/decoding logic and no query semantics.

use crate::{
    db::cursor::Cursor,
    value::{self, SortValueParseError, SortValueTag, UnknownSortValueTag},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use thiserror::Error as ThisError;

// Decode bound for untrusted cursor token input.
const MAX_CURSOR_TOKEN_LEN: usize = 8 * 1024;

const SEPARATOR: char = ':';

///
/// CursorDecodeError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CursorDecodeError {
    #[error("cursor token is empty")]
    Empty,

    #[error("cursor token exceeds max length: {len} chars (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("cursor token is not valid base64")]
    InvalidBase64,

    #[error("cursor payload is not valid UTF-8")]
    InvalidUtf8,

    #[error("cursor rowid '{text}' is not an integer")]
    InvalidRowid { text: String },

    #[error("cursor payload '{payload}' has a sort tag but no value field")]
    MissingValue { payload: String },

    #[error(transparent)]
    UnknownTag(#[from] UnknownSortValueTag),

    #[error(transparent)]
    InvalidValue(#[from] SortValueParseError),
}

/// Encode a cursor as its opaque wire token.
#[must_use]
pub fn encode_cursor(cursor: &Cursor) -> String {
    let payload = match &cursor.sort {
        None => cursor.rowid.to_string(),
        Some(sort) => format!(
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            cursor.rowid,
            sort.tag().label(),
            value::format(sort)
        ),
    };

    STANDARD.encode(payload)
}

/// Decode an opaque wire token into a cursor.
///
/// The token may include surrounding whitespace, which is trimmed.
pub fn decode_cursor(token: &str) -> Result<Cursor, CursorDecodeError> {
    let token = token.trim();

    if token.is_empty() {
        return Err(CursorDecodeError::Empty);
    }

    if token.len() > MAX_CURSOR_TOKEN_LEN {
        return Err(CursorDecodeError::TooLong {
            len: token.len(),
            max: MAX_CURSOR_TOKEN_LEN,
        });
    }

    let bytes = STANDARD
        .decode(token)
        .map_err(|_| CursorDecodeError::InvalidBase64)?;
    let payload = String::from_utf8(bytes).map_err(|_| CursorDecodeError::InvalidUtf8)?;

    decode_payload(&payload)
}

// Split the decoded payload on its first two separators.
fn decode_payload(payload: &str) -> Result<Cursor, CursorDecodeError> {
    let mut parts = payload.splitn(3, SEPARATOR);
    let rowid_text = parts.next().unwrap_or_default();
    let rowid = rowid_text
        .parse::<i64>()
        .map_err(|_| CursorDecodeError::InvalidRowid {
            text: rowid_text.to_string(),
        })?;

    let Some(tag_text) = parts.next() else {
        return Ok(Cursor::new(rowid));
    };
    let Some(value_text) = parts.next() else {
        return Err(CursorDecodeError::MissingValue {
            payload: payload.to_string(),
        });
    };

    let tag: SortValueTag = tag_text.parse()?;
    let sort = value::parse(tag, value_text)?;

    Ok(Cursor::with_sort(rowid, sort))
}

///
/// TESTS
///
