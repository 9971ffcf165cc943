//! Keyset pagination over externally stored, externally filtered rows.
//!
//! Layering, leaves first:
//! - `cursor` / `codec`: opaque resume positions and their wire form
//! - `order`: the (sort value, rowid) total order
//! - `sort` / `query`: what the caller asked for
//! - `source`: the storage seam rows come through
//! - `executor`: windowing, edges, and page metadata
//! - `response`: the finished connection

pub mod codec;
pub mod cursor;
pub mod direction;
pub mod executor;
pub mod order;
pub mod query;
pub mod response;
pub mod sort;
pub mod source;

// re-exports
pub use executor::{CancelSignal, IndirectPaginator, NeverCancel, Paginator};
