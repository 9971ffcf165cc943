//! Module: source
//! Responsibility: the storage-facing contract rows reach the paginators through.
//! Does not own: filtering, joins, or consistency; those belong to the storage layer.
//! Boundary: implementors honor `FetchRequest` exactly; paginators verify what they can.

mod memory;


use crate::{
    db::{
        order::{KeyOrder, SortKey},
        sort::SortSpec,
    },
    error::InternalError,
    value::SortValue,
};
use chrono::{DateTime, FixedOffset};

// re-exports
pub use memory::{
    ConnectionStats, MemoryChildConnection, MemoryChildSource, MemoryConnection, MemoryRowSource,
};

///
/// RowSource
///
/// Supplies ordered, bounded rows. A connection is acquired for each query
/// and released when the returned guard drops, so release happens on every
/// exit path including errors raised before any row is read.
///

pub trait RowSource {
    type Node;
    type Connection<'a>: RowConnection<Node = Self::Node>
    where
        Self: 'a;

    fn acquire(&self) -> Result<Self::Connection<'_>, InternalError>;
}

///
/// RowConnection
///

pub trait RowConnection {
    type Node;

    /// Return at most `request.limit` rows in `request.order`, each strictly
    /// past `request.bound` when one is given.
    fn fetch(
        &mut self,
        request: &FetchRequest<'_>,
    ) -> Result<Vec<SourceRow<Self::Node>>, InternalError>;
}

///
/// FetchRequest
///

#[derive(Clone, Copy, Debug)]
pub struct FetchRequest<'a> {
    pub sort: &'a SortSpec,
    pub order: KeyOrder,
    pub bound: Option<SortKey<'a>>,
    pub limit: u32,
}

///
/// SourceRow
///
/// One row as produced by storage. `sort` is `None` for rowid listings and
/// `Some(SortValue::Null)` when a nullable or joined key is absent.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceRow<N> {
    pub rowid: i64,
    pub node: N,
    pub sort: Option<SortValue>,
}

impl<N> SourceRow<N> {
    #[must_use]
    pub const fn new(rowid: i64, node: N, sort: Option<SortValue>) -> Self {
        Self { rowid, node, sort }
    }

    #[must_use]
    pub const fn key(&self) -> SortKey<'_> {
        SortKey::new(self.sort.as_ref(), self.rowid)
    }
}

///
/// ChildSource
///
/// Eligible child rows for a batch of parents, used by representative-child
/// pagination. Eligibility (e.g. "is a root span") is the source's concern;
/// choosing the representative is the paginator's.
///
/// Lookups go through a scoped connection with the same release-on-drop
/// contract as `RowSource`.
///

pub trait ChildSource {
    type Child;
    type Connection<'a>: ChildConnection<Child = Self::Child>
    where
        Self: 'a;

    fn acquire(&self) -> Result<Self::Connection<'_>, InternalError>;
}

///
/// ChildConnection
///

pub trait ChildConnection {
    type Child;

    /// Every eligible child of the given parents, in any order.
    fn eligible_children(
        &mut self,
        parent_rowids: &[i64],
    ) -> Result<Vec<ChildCandidate<Self::Child>>, InternalError>;
}

///
/// ChildCandidate
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChildCandidate<C> {
    pub parent_rowid: i64,
    pub rowid: i64,
    pub start_time: DateTime<FixedOffset>,
    pub node: C,
}
