//! Module: sort
//! Responsibility: what a listing is ordered by, and the declared type of that key.
//! Does not own: resolving joined values (the row source does that).

mod catalog;

use crate::{
    db::direction::Direction,
    value::{SortValue, SortValueKind},
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// re-exports
pub use catalog::{SessionSortColumn, SpanSortColumn};

///
/// SortSpec
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortSpec {
    pub column: SortColumn,
    pub direction: Direction,
}

impl SortSpec {
    #[must_use]
    pub const fn new(column: SortColumn, direction: Direction) -> Self {
        Self { column, direction }
    }

    /// Unsorted listing ordered by rowid alone.
    #[must_use]
    pub const fn rowid(direction: Direction) -> Self {
        Self::new(SortColumn::Rowid, direction)
    }

    /// Whether a row's sort value fits this spec.
    ///
    /// Rowid listings carry no value; every other column carries one, and
    /// NULL fits any column.
    #[must_use]
    pub const fn conforms(&self, value: Option<&SortValue>) -> bool {
        match (self.column.kind(), value) {
            (None, None) => true,
            (Some(kind), Some(value)) => value.conforms_to(kind),
            _ => false,
        }
    }
}

///
/// SortColumn
///
/// One sort key. Native columns live on the paginated entity; joined keys
/// are resolved by the row source from an associated table.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SortColumn {
    Rowid,
    Native {
        name: Cow<'static, str>,
        kind: SortValueKind,
    },
    Joined(JoinedSortKey),
}

impl SortColumn {
    #[must_use]
    pub fn native(name: impl Into<Cow<'static, str>>, kind: SortValueKind) -> Self {
        Self::Native {
            name: name.into(),
            kind,
        }
    }

    /// Declared value kind, or `None` for rowid ordering.
    #[must_use]
    pub const fn kind(&self) -> Option<SortValueKind> {
        match self {
            Self::Rowid => None,
            Self::Native { kind, .. } => Some(*kind),
            Self::Joined(key) => Some(key.attribute.kind()),
        }
    }

    /// Diagnostic label used in errors and logs.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Rowid => "rowid".to_string(),
            Self::Native { name, .. } => name.to_string(),
            Self::Joined(key) => key.to_string(),
        }
    }
}

///
/// JoinedSortKey
///
/// Sort key read from an associated table by name and attribute, such as
/// the score of the annotation named `correctness` on each span. When
/// several joined rows match, the row source picks the most recent one;
/// when none match the value is NULL.
///

#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
#[display("{source}[{name}].{attribute}")]
pub struct JoinedSortKey {
    pub source: JoinSource,
    pub name: String,
    pub attribute: JoinedAttribute,
}

impl JoinedSortKey {
    #[must_use]
    pub fn annotation(name: impl Into<String>, attribute: JoinedAttribute) -> Self {
        Self {
            source: JoinSource::Annotation,
            name: name.into(),
            attribute,
        }
    }

    #[must_use]
    pub fn evaluation(name: impl Into<String>, attribute: JoinedAttribute) -> Self {
        Self {
            source: JoinSource::Evaluation,
            name: name.into(),
            attribute,
        }
    }
}

///
/// JoinSource
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinSource {
    #[display("annotation")]
    Annotation,
    #[display("evaluation")]
    Evaluation,
}

///
/// JoinedAttribute
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinedAttribute {
    #[display("score")]
    Score,
    #[display("label")]
    Label,
}

impl JoinedAttribute {
    #[must_use]
    pub const fn kind(self) -> SortValueKind {
        match self {
            Self::Score => SortValueKind::Float,
            Self::Label => SortValueKind::String,
        }
    }
}

///
/// TESTS
///
