use crate::{
    config::PaginationConfig,
    db::{
        cursor::Cursor,
        executor::window::compute_page_window,
        order::{KeyOrder, SortKey},
        query::{PageArgs, PageRequest},
        response::{Connection, Edge},
        sort::SortSpec,
        source::{FetchRequest, RowConnection, RowSource, SourceRow},
    },
    error::{InternalError, PageError},
    obs::{self, PaginationEvent, PaginationMode, PaginationSink},
};
use std::cmp::Ordering;

///
/// Paginator
///
/// Keyset pagination over one row source. Each page costs exactly one
/// bounded query: the cursor becomes a strict bound pushed down to the
/// source, and one over-fetched row answers "is there more?" without a
/// count query.
///

#[derive(Clone, Copy)]
pub struct Paginator<'a> {
    config: &'a PaginationConfig,
    sink: Option<&'a dyn PaginationSink>,
}

impl<'a> Paginator<'a> {
    #[must_use]
    pub const fn new(config: &'a PaginationConfig) -> Self {
        Self { config, sink: None }
    }

    #[must_use]
    pub const fn with_sink(mut self, sink: &'a dyn PaginationSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Validate raw request arguments and compute one page.
    pub fn paginate<S: RowSource>(
        &self,
        source: &S,
        sort: &SortSpec,
        request: &PageRequest,
    ) -> Result<Connection<S::Node>, PageError> {
        let args = PageArgs::from_request(request, self.config)?;

        self.paginate_args(source, sort, &args)
    }

    /// Compute one page from already-validated arguments.
    pub fn paginate_args<S: RowSource>(
        &self,
        source: &S,
        sort: &SortSpec,
        args: &PageArgs,
    ) -> Result<Connection<S::Node>, PageError> {
        let boundary = args.boundary();
        if let Some(cursor) = boundary {
            cursor.validate_for(sort)?;
        }

        let order = traversal_order(sort, args);
        obs::emit(
            self.sink,
            PaginationEvent::Start {
                mode: PaginationMode::Direct,
                limit: args.limit(),
                backward: args.is_backward(),
                resumed: boundary.is_some(),
            },
        );

        let FetchedWindow { mut rows, has_more } = fetch_window(
            source,
            sort,
            order,
            boundary.map(Cursor::key),
            args.limit(),
            self.sink,
        )?;
        if args.is_backward() {
            rows.reverse();
        }

        let edges: Vec<Edge<S::Node>> = rows.into_iter().map(SourceRow::into_edge).collect();
        let (has_previous_page, has_next_page) = page_flags(args, has_more);

        tracing::debug!(
            column = %sort.column.label(),
            direction = ?sort.direction,
            limit = args.limit(),
            backward = args.is_backward(),
            edges = edges.len(),
            has_next_page,
            has_previous_page,
            "computed page"
        );
        obs::emit(
            self.sink,
            PaginationEvent::Finish {
                mode: PaginationMode::Direct,
                edges: obs::count(edges.len()),
                has_next_page,
                has_previous_page,
            },
        );

        Ok(Connection::new(edges, has_previous_page, has_next_page))
    }
}

impl<N> SourceRow<N> {
    // The edge cursor repeats exactly the key the row was ordered by.
    fn into_edge(self) -> Edge<N> {
        let cursor = Cursor {
            rowid: self.rowid,
            sort: self.sort,
        };

        Edge::new(self.node, cursor)
    }
}

///
/// FetchedWindow
///
/// Verified rows of one bounded query, in traversal order, with the
/// over-fetched row already dropped.
///

pub(crate) struct FetchedWindow<N> {
    pub(crate) rows: Vec<SourceRow<N>>,
    pub(crate) has_more: bool,
}

// Walk backward for `last`/`before`, forward otherwise.
pub(crate) const fn traversal_order(sort: &SortSpec, args: &PageArgs) -> KeyOrder {
    if args.is_backward() {
        KeyOrder::backward(sort.direction)
    } else {
        KeyOrder::forward(sort.direction)
    }
}

// (has_previous_page, has_next_page). The side the page grew toward is answered
// by the over-fetch; the side it grew from is answered by whether a cursor was given.
pub(crate) const fn page_flags(args: &PageArgs, has_more: bool) -> (bool, bool) {
    let resumed = args.boundary().is_some();

    if args.is_backward() {
        (has_more, resumed)
    } else {
        (resumed, has_more)
    }
}

/// Issue one bounded query for `limit + 1` rows and verify the source honored it.
///
/// The connection guard is scoped to the query, so it is released before
/// verification and on every error path.
pub(crate) fn fetch_window<S: RowSource>(
    source: &S,
    sort: &SortSpec,
    order: KeyOrder,
    bound: Option<SortKey<'_>>,
    limit: u32,
    sink: Option<&dyn PaginationSink>,
) -> Result<FetchedWindow<S::Node>, PageError> {
    let window = compute_page_window(limit, true);
    let request = FetchRequest {
        sort,
        order,
        bound,
        limit: window.fetch_count,
    };

    let mut rows = {
        let mut connection = source.acquire()?;
        connection.fetch(&request)?
    };

    verify_rows(&rows, &request)?;

    tracing::trace!(
        requested = request.limit,
        returned = rows.len(),
        resumed = bound.is_some(),
        "fetched rows"
    );
    obs::emit(
        sink,
        PaginationEvent::Fetch {
            limit: request.limit,
            rows: obs::count(rows.len()),
        },
    );

    let has_more = rows.len() > window.keep_count;
    rows.truncate(window.keep_count);

    Ok(FetchedWindow { rows, has_more })
}

// Check the row-source contract: typed values, strict bound, strict order, limit.
fn verify_rows<N>(rows: &[SourceRow<N>], request: &FetchRequest<'_>) -> Result<(), PageError> {
    let limit = usize::try_from(request.limit).unwrap_or(usize::MAX);
    if rows.len() > limit {
        return Err(InternalError::source_invariant(format!(
            "row source returned {} rows for a limit of {limit}",
            rows.len()
        ))
        .into());
    }

    for row in rows {
        if !request.sort.conforms(row.sort.as_ref()) {
            return Err(PageError::malformed_sort_value(
                row.rowid,
                request.sort.column.label(),
                row.sort.clone(),
            ));
        }
    }

    if let (Some(bound), Some(first)) = (request.bound, rows.first())
        && !request.order.advances(first.key(), bound)
    {
        return Err(InternalError::source_invariant(format!(
            "row source returned row {} at or before the requested bound",
            first.rowid
        ))
        .into());
    }

    for pair in rows.windows(2) {
        if request.order.compare(pair[0].key(), pair[1].key()) != Ordering::Less {
            return Err(InternalError::source_invariant(format!(
                "row source returned row {} out of order after row {}",
                pair[1].rowid, pair[0].rowid
            ))
            .into());
        }
    }

    Ok(())
}
