use crate::value::SortValue;
use derive_more::Display;
use std::str::FromStr;
use thiserror::Error as ThisError;

///
/// SortValueTag
///
/// Stable wire tag for one `SortValue` variant.
///
/// IMPORTANT:
/// Labels are embedded in every issued cursor and must never change.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum SortValueTag {
    #[display("INT")]
    Int,
    #[display("FLOAT")]
    Float,
    #[display("STRING")]
    String,
    #[display("DATETIME")]
    DateTime,
    #[display("NULL")]
    Null,
}

impl SortValueTag {
    pub const ALL: [Self; 5] = [
        Self::Int,
        Self::Float,
        Self::String,
        Self::DateTime,
        Self::Null,
    ];

    /// Stable wire label for this tag.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Int => "INT",
            Self::Float => "FLOAT",
            Self::String => "STRING",
            Self::DateTime => "DATETIME",
            Self::Null => "NULL",
        }
    }

    // Mixed-tag fallback rank. Numeric tags share a rank because they compare by value.
    pub(crate) const fn rank(self) -> u8 {
        match self {
            Self::Int | Self::Float => 0,
            Self::String => 1,
            Self::DateTime => 2,
            Self::Null => 3,
        }
    }
}

impl FromStr for SortValueTag {
    type Err = UnknownSortValueTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.label() == s)
            .ok_or_else(|| UnknownSortValueTag(s.to_string()))
    }
}

impl From<&SortValue> for SortValueTag {
    fn from(value: &SortValue) -> Self {
        value.tag()
    }
}

///
/// UnknownSortValueTag
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("unknown sort value tag '{0}'")]
pub struct UnknownSortValueTag(pub String);
