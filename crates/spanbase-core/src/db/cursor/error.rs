use crate::{
    db::codec::cursor::CursorDecodeError,
    value::{SortValueKind, SortValueTag},
};
use thiserror::Error as ThisError;

///
/// CursorError
///
/// A supplied `after` / `before` cursor is unusable: it failed to decode,
/// or it decodes to a position that cannot belong to the requested ordering.
/// Always a client error.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CursorError {
    #[error("invalid cursor: {0}")]
    Decode(#[from] CursorDecodeError),

    #[error("invalid cursor: row {rowid} carries a sort value but the listing is ordered by rowid")]
    UnexpectedSortValue { rowid: i64 },

    #[error("invalid cursor: listing is sorted by '{column}' but the cursor has no sort value")]
    MissingSortValue { column: String },

    #[error("invalid cursor: {found} value does not fit sort column '{column}' ({expected})")]
    SortTypeMismatch {
        column: String,
        expected: SortValueKind,
        found: SortValueTag,
    },
}
