use crate::{
    db::{
        order::SortKey,
        sort::{SortColumn, SortSpec},
        source::{
            ChildCandidate, ChildConnection, ChildSource, FetchRequest, RowConnection, RowSource,
            SourceRow,
        },
    },
    error::InternalError,
    value::SortValue,
};
use std::{
    collections::BTreeSet,
    sync::atomic::{AtomicU32, Ordering as AtomicOrdering},
};

type Resolver<N> = Box<dyn Fn(&N, &SortColumn) -> SortValue + Send + Sync>;

///
/// ConnectionStats
///
/// Point-in-time connection accounting for a memory source.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ConnectionStats {
    pub acquired: u32,
    pub released: u32,
    pub queries: u32,
}

impl ConnectionStats {
    /// Every acquired connection has been released.
    #[must_use]
    pub const fn is_balanced(&self) -> bool {
        self.acquired == self.released
    }
}

#[derive(Debug, Default)]
struct Counters {
    acquired: AtomicU32,
    released: AtomicU32,
    queries: AtomicU32,
}

impl Counters {
    fn bump(counter: &AtomicU32) {
        counter.fetch_add(1, AtomicOrdering::Relaxed);
    }

    fn snapshot(&self) -> ConnectionStats {
        ConnectionStats {
            acquired: self.acquired.load(AtomicOrdering::Relaxed),
            released: self.released.load(AtomicOrdering::Relaxed),
            queries: self.queries.load(AtomicOrdering::Relaxed),
        }
    }
}

///
/// MemoryRowSource
///
/// In-process row source that orders rows with the engine comparator.
/// Sort values are produced by a resolver so native and joined keys can be
/// modelled the same way; a resolver returns `SortValue::Null` for absent
/// joined rows.
///

pub struct MemoryRowSource<N> {
    rows: Vec<(i64, N)>,
    resolve: Resolver<N>,
    fail_with: Option<String>,
    counters: Counters,
}

impl<N> MemoryRowSource<N> {
    pub fn new(
        rows: impl IntoIterator<Item = (i64, N)>,
        resolve: impl Fn(&N, &SortColumn) -> SortValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            rows: rows.into_iter().collect(),
            resolve: Box::new(resolve),
            fail_with: None,
            counters: Counters::default(),
        }
    }

    /// Make every fetch fail after the connection is acquired.
    #[must_use]
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(message.into());
        self
    }

    #[must_use]
    pub fn stats(&self) -> ConnectionStats {
        self.counters.snapshot()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn sort_value(&self, node: &N, sort: &SortSpec) -> Option<SortValue> {
        match sort.column {
            SortColumn::Rowid => None,
            ref column => Some((self.resolve)(node, column)),
        }
    }
}

impl<N: Clone> RowSource for MemoryRowSource<N> {
    type Node = N;
    type Connection<'a>
        = MemoryConnection<'a, N>
    where
        Self: 'a;

    fn acquire(&self) -> Result<Self::Connection<'_>, InternalError> {
        Counters::bump(&self.counters.acquired);

        Ok(MemoryConnection { source: self })
    }
}

///
/// MemoryConnection
///
/// Scoped handle; dropping it records the release.
///

pub struct MemoryConnection<'a, N> {
    source: &'a MemoryRowSource<N>,
}

impl<N: Clone> RowConnection for MemoryConnection<'_, N> {
    type Node = N;

    fn fetch(&mut self, request: &FetchRequest<'_>) -> Result<Vec<SourceRow<N>>, InternalError> {
        Counters::bump(&self.source.counters.queries);

        if let Some(message) = &self.source.fail_with {
            return Err(InternalError::source_internal(message.clone()));
        }

        let mut keyed: Vec<(i64, &N, Option<SortValue>)> = self
            .source
            .rows
            .iter()
            .map(|(rowid, node)| (*rowid, node, self.source.sort_value(node, request.sort)))
            .collect();

        if let Some(bound) = request.bound {
            keyed.retain(|(rowid, _, sort)| {
                request
                    .order
                    .advances(SortKey::new(sort.as_ref(), *rowid), bound)
            });
        }
        request.order.sort_by_key(&mut keyed, |(rowid, _, sort)| {
            SortKey::new(sort.as_ref(), *rowid)
        });

        let limit = usize::try_from(request.limit).unwrap_or(usize::MAX);

        Ok(keyed
            .into_iter()
            .take(limit)
            .map(|(rowid, node, sort)| SourceRow::new(rowid, node.clone(), sort))
            .collect())
    }
}

impl<N> Drop for MemoryConnection<'_, N> {
    fn drop(&mut self) {
        Counters::bump(&self.source.counters.released);
    }
}

///
/// MemoryChildSource
///
/// In-process child source: every stored candidate is eligible.
///

pub struct MemoryChildSource<C> {
    candidates: Vec<ChildCandidate<C>>,
    fail_with: Option<String>,
    counters: Counters,
}

impl<C> MemoryChildSource<C> {
    pub fn new(candidates: impl IntoIterator<Item = ChildCandidate<C>>) -> Self {
        Self {
            candidates: candidates.into_iter().collect(),
            fail_with: None,
            counters: Counters::default(),
        }
    }

    /// Make every lookup fail after the connection is acquired.
    #[must_use]
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(message.into());
        self
    }

    #[must_use]
    pub fn stats(&self) -> ConnectionStats {
        self.counters.snapshot()
    }

    /// Number of `eligible_children` lookups served.
    #[must_use]
    pub fn lookups(&self) -> u32 {
        self.counters.snapshot().queries
    }
}

impl<C: Clone> ChildSource for MemoryChildSource<C> {
    type Child = C;
    type Connection<'a>
        = MemoryChildConnection<'a, C>
    where
        Self: 'a;

    fn acquire(&self) -> Result<Self::Connection<'_>, InternalError> {
        Counters::bump(&self.counters.acquired);

        Ok(MemoryChildConnection { source: self })
    }
}

///
/// MemoryChildConnection
///

pub struct MemoryChildConnection<'a, C> {
    source: &'a MemoryChildSource<C>,
}

impl<C: Clone> ChildConnection for MemoryChildConnection<'_, C> {
    type Child = C;

    fn eligible_children(
        &mut self,
        parent_rowids: &[i64],
    ) -> Result<Vec<ChildCandidate<C>>, InternalError> {
        Counters::bump(&self.source.counters.queries);

        if let Some(message) = &self.source.fail_with {
            return Err(InternalError::source_internal(message.clone()));
        }

        let parents: BTreeSet<i64> = parent_rowids.iter().copied().collect();

        Ok(self
            .source
            .candidates
            .iter()
            .filter(|candidate| parents.contains(&candidate.parent_rowid))
            .cloned()
            .collect())
    }
}

impl<C> Drop for MemoryChildConnection<'_, C> {
    fn drop(&mut self) {
        Counters::bump(&self.source.counters.released);
    }
}
