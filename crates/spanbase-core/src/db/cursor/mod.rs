//! Module: cursor
//! Responsibility: resume positions and their compatibility with a sort spec.
//! Does not own: the wire text (see `db::codec::cursor`) or key ordering (see `db::order`).

mod error;


use crate::{
    db::{
        codec::cursor::{CursorDecodeError, decode_cursor, encode_cursor},
        order::SortKey,
        sort::SortSpec,
    },
    value::SortValue,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

// re-exports
pub use error::CursorError;

///
/// Cursor
///
/// Opaque resume position: the row's identifier plus the sort value it was
/// ordered by. `sort = None` means the listing is ordered by rowid alone.
/// Cursors carry no server-side state and live for one request/response.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cursor {
    pub rowid: i64,
    pub sort: Option<SortValue>,
}

impl Cursor {
    /// Rowid-only cursor for unsorted listings.
    #[must_use]
    pub const fn new(rowid: i64) -> Self {
        Self { rowid, sort: None }
    }

    #[must_use]
    pub const fn with_sort(rowid: i64, sort: SortValue) -> Self {
        Self {
            rowid,
            sort: Some(sort),
        }
    }

    /// Borrowed comparator key for bound checks.
    #[must_use]
    pub const fn key(&self) -> SortKey<'_> {
        SortKey::new(self.sort.as_ref(), self.rowid)
    }

    #[must_use]
    pub fn encode(&self) -> String {
        encode_cursor(self)
    }

    pub fn decode(token: &str) -> Result<Self, CursorDecodeError> {
        decode_cursor(token)
    }

    /// Check that this cursor can resume a listing ordered by `sort`.
    pub fn validate_for(&self, sort: &SortSpec) -> Result<(), CursorError> {
        match (sort.column.kind(), &self.sort) {
            (None, None) => Ok(()),
            (None, Some(_)) => Err(CursorError::UnexpectedSortValue { rowid: self.rowid }),
            (Some(_), None) => Err(CursorError::MissingSortValue {
                column: sort.column.label(),
            }),
            (Some(kind), Some(value)) if value.conforms_to(kind) => Ok(()),
            (Some(kind), Some(value)) => Err(CursorError::SortTypeMismatch {
                column: sort.column.label(),
                expected: kind,
                found: value.tag(),
            }),
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Cursor {
    type Err = CursorDecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

// Cursors cross the transport boundary only in their opaque string form.
impl Serialize for Cursor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Cursor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;

        Self::decode(&token).map_err(serde::de::Error::custom)
    }
}
