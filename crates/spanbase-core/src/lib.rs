//! Core runtime for spanbase: sort values, opaque cursors, and the keyset
//! paginators behind every span, session, and experiment-run listing.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod db;
pub mod error;
pub mod obs;
pub mod value;

pub use spanbase_config as config;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No executors, sources, or errors are re-exported here.
///

pub mod prelude {
    pub use crate::{
        db::{
            cursor::Cursor,
            direction::Direction,
            query::PageRequest,
            response::{Connection, Edge, PageInfo},
            sort::{SortColumn, SortSpec},
        },
        value::{SortValue, SortValueKind},
    };
}
