use crate::{
    config::PaginationConfig,
    db::{
        cursor::Cursor,
        executor::{
            CancelSignal, NeverCancel,
            paginator::{FetchedWindow, fetch_window, page_flags, traversal_order},
        },
        query::{PageArgs, PageRequest},
        response::{Connection, Edge},
        sort::SortSpec,
        source::{ChildCandidate, ChildConnection, ChildSource, RowSource},
    },
    error::PageError,
    obs::{self, PaginationEvent, PaginationMode, PaginationSink},
};
use std::collections::{BTreeMap, btree_map::Entry};

///
/// IndirectPaginator
///
/// Pages over parents (e.g. traces ordered by start time) while emitting one
/// representative child per parent (e.g. the trace's earliest root span).
///
/// Parents without an eligible child contribute nothing, so a batch of
/// parents can yield fewer children than requested. When that happens and
/// more parents remain, the next attempt resumes after the last scanned
/// parent with an amplified batch, up to `IndirectConfig::max_attempts`
/// attempts in total. Scanning stops once the page is full, and the page
/// reports more data when unscanned parents remain. Running out of parents
/// or attempts yields a short page with `has_next_page = false`.
///
/// Edge cursors name the parent, so the next page resumes parent scanning.
///

#[derive(Clone, Copy)]
pub struct IndirectPaginator<'a> {
    config: &'a PaginationConfig,
    sink: Option<&'a dyn PaginationSink>,
    cancel: &'a dyn CancelSignal,
}

impl<'a> IndirectPaginator<'a> {
    #[must_use]
    pub const fn new(config: &'a PaginationConfig) -> Self {
        Self {
            config,
            sink: None,
            cancel: &NeverCancel,
        }
    }

    #[must_use]
    pub const fn with_sink(mut self, sink: &'a dyn PaginationSink) -> Self {
        self.sink = Some(sink);
        self
    }

    #[must_use]
    pub const fn with_cancel(mut self, cancel: &'a dyn CancelSignal) -> Self {
        self.cancel = cancel;
        self
    }

    /// Validate raw request arguments and compute one page of representatives.
    pub fn paginate<P, C>(
        &self,
        parents: &P,
        children: &C,
        parent_sort: &SortSpec,
        request: &PageRequest,
    ) -> Result<Connection<C::Child>, PageError>
    where
        P: RowSource,
        C: ChildSource,
    {
        let args = PageArgs::from_request(request, self.config)?;

        self.paginate_args(parents, children, parent_sort, &args)
    }

    /// Compute one page of representatives from already-validated arguments.
    pub fn paginate_args<P, C>(
        &self,
        parents: &P,
        children: &C,
        parent_sort: &SortSpec,
        args: &PageArgs,
    ) -> Result<Connection<C::Child>, PageError>
    where
        P: RowSource,
        C: ChildSource,
    {
        if let Some(cursor) = args.boundary() {
            cursor.validate_for(parent_sort)?;
        }

        let requested = args.limit();
        let order = traversal_order(parent_sort, args);
        let indirect = &self.config.indirect;

        let page_len = usize::try_from(requested).unwrap_or(usize::MAX);

        obs::emit(
            self.sink,
            PaginationEvent::Start {
                mode: PaginationMode::Indirect,
                limit: requested,
                backward: args.is_backward(),
                resumed: args.boundary().is_some(),
            },
        );

        let mut resume: Option<Cursor> = args.boundary().cloned();
        let mut edges: Vec<Edge<C::Child>> = Vec::new();
        let mut has_more = false;

        for attempt in 0..indirect.max_attempts {
            if self.cancel.is_cancelled() {
                tracing::debug!(attempt, "indirect pagination cancelled");
                return Err(PageError::Cancelled { attempt });
            }

            let batch_size = indirect.batch_size(attempt, requested);
            let FetchedWindow {
                rows,
                has_more: parents_remain,
            } = fetch_window(
                parents,
                parent_sort,
                order,
                resume.as_ref().map(Cursor::key),
                batch_size,
                self.sink,
            )?;

            let mut representatives = if rows.is_empty() {
                BTreeMap::new()
            } else {
                let parent_rowids: Vec<i64> = rows.iter().map(|row| row.rowid).collect();
                let candidates = {
                    let mut connection = children.acquire()?;
                    connection.eligible_children(&parent_rowids)?
                };
                select_representatives(candidates)
            };

            let mut scanned = 0;
            for parent in &rows {
                if edges.len() == page_len {
                    break;
                }
                scanned += 1;
                if let Some(child) = representatives.remove(&parent.rowid) {
                    let cursor = Cursor {
                        rowid: parent.rowid,
                        sort: parent.sort.clone(),
                    };
                    edges.push(Edge::new(child.node, cursor));
                }
            }

            tracing::debug!(
                attempt,
                batch_size,
                parents = rows.len(),
                collected = edges.len(),
                parents_remain,
                "indirect pagination attempt"
            );
            obs::emit(
                self.sink,
                PaginationEvent::Attempt {
                    attempt,
                    batch_size,
                    collected: obs::count(edges.len()),
                },
            );

            if edges.len() == page_len {
                // Full page: more data means parents past the last one scanned.
                has_more = scanned < rows.len() || parents_remain;
                break;
            }
            if !parents_remain {
                break;
            }
            if attempt + 1 == indirect.max_attempts {
                tracing::warn!(
                    attempts = indirect.max_attempts,
                    collected = edges.len(),
                    requested,
                    "indirect pagination exhausted its attempt budget with parents remaining"
                );
                break;
            }

            resume = rows.last().map(|row| Cursor {
                rowid: row.rowid,
                sort: row.sort.clone(),
            });
        }

        if args.is_backward() {
            edges.reverse();
        }
        let (has_previous_page, has_next_page) = page_flags(args, has_more);

        tracing::debug!(
            column = %parent_sort.column.label(),
            direction = ?parent_sort.direction,
            limit = requested,
            edges = edges.len(),
            has_next_page,
            has_previous_page,
            "computed indirect page"
        );
        obs::emit(
            self.sink,
            PaginationEvent::Finish {
                mode: PaginationMode::Indirect,
                edges: obs::count(edges.len()),
                has_next_page,
                has_previous_page,
            },
        );

        Ok(Connection::new(edges, has_previous_page, has_next_page))
    }
}

/// Pick one representative per parent: earliest start time, ties to the greater child rowid.
pub(crate) fn select_representatives<C>(
    candidates: Vec<ChildCandidate<C>>,
) -> BTreeMap<i64, ChildCandidate<C>> {
    let mut chosen: BTreeMap<i64, ChildCandidate<C>> = BTreeMap::new();

    for candidate in candidates {
        match chosen.entry(candidate.parent_rowid) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
            Entry::Occupied(mut slot) => {
                let current = slot.get();
                let earlier = candidate.start_time < current.start_time;
                let tie_wins =
                    candidate.start_time == current.start_time && candidate.rowid > current.rowid;
                if earlier || tie_wins {
                    slot.insert(candidate);
                }
            }
        }
    }

    chosen
}
