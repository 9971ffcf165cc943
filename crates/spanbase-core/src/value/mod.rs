mod compare;
mod tag;
mod wire;


use chrono::{DateTime, FixedOffset};
use derive_more::Display;
use std::cmp::Ordering;

// re-exports
pub use compare::compare;
pub use tag::{SortValueTag, UnknownSortValueTag};
pub use wire::{SortValueParseError, format, parse};

///
/// SortValue
///
/// One comparable sort-key value read from a native column or resolved
/// through a join. NULL carries no payload and always sorts last.
///

#[derive(Clone, Debug)]
pub enum SortValue {
    Int(i64),
    Float(f64),
    String(String),
    DateTime(DateTime<FixedOffset>),
    Null,
}

impl SortValue {
    #[must_use]
    pub const fn tag(&self) -> SortValueTag {
        match self {
            Self::Int(_) => SortValueTag::Int,
            Self::Float(_) => SortValueTag::Float,
            Self::String(_) => SortValueTag::String,
            Self::DateTime(_) => SortValueTag::DateTime,
            Self::Null => SortValueTag::Null,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Total comparison; see [`compare`].
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        compare(self, other)
    }

    /// Whether this value may appear in a column declared as `kind`.
    ///
    /// NULL fits every kind, and INT/FLOAT are interchangeable.
    #[must_use]
    pub const fn conforms_to(&self, kind: SortValueKind) -> bool {
        match self {
            Self::Null => true,
            Self::Int(_) | Self::Float(_) => kind.is_numeric(),
            Self::String(_) => matches!(kind, SortValueKind::String),
            Self::DateTime(_) => matches!(kind, SortValueKind::DateTime),
        }
    }

    /// Build a value from an optional joined result, mapping absence to NULL.
    #[must_use]
    pub fn from_joined(value: Option<impl Into<Self>>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

// Tags are part of identity so a cursor round-trips to the same variant.
impl PartialEq for SortValue {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::Null, Self::Null) => true,
            _ => false,
        }
    }
}

impl Eq for SortValue {}

impl From<i64> for SortValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for SortValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for SortValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<DateTime<FixedOffset>> for SortValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::DateTime(value)
    }
}

///
/// SortValueKind
///
/// Declared type of a sort column. Values read for that column must
/// conform to it (see [`SortValue::conforms_to`]).
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum SortValueKind {
    #[display("INT")]
    Int,
    #[display("FLOAT")]
    Float,
    #[display("STRING")]
    String,
    #[display("DATETIME")]
    DateTime,
}

impl SortValueKind {
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }
}
