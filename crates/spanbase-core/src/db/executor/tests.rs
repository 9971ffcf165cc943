use crate::{
    config::{IndirectConfig, PaginationConfig},
    db::{
        cursor::{Cursor, CursorError},
        direction::Direction,
        executor::{IndirectPaginator, Paginator, indirect::select_representatives},
        order::{KeyOrder, SortKey},
        query::{PageArgsError, PageRequest},
        response::Connection,
        sort::{JoinedAttribute, JoinedSortKey, SortColumn, SortSpec},
        source::{
            ChildCandidate, FetchRequest, MemoryChildSource, MemoryRowSource, RowConnection,
            RowSource, SourceRow,
        },
    },
    error::{ErrorClass, InternalError, PageError},
    obs::{PaginationEvent, PaginationMode, PaginationSink},
    value::{SortValue, SortValueKind},
};
use chrono::{DateTime, FixedOffset, Utc};
use proptest::prelude::*;
use std::{
    collections::BTreeSet,
    sync::{Mutex, atomic::AtomicBool},
};

//
// Fixtures
//

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<PaginationEvent>>,
}

impl RecordingSink {
    fn events(&self) -> Vec<PaginationEvent> {
        self.events.lock().expect("sink lock").clone()
    }

    fn attempt_batch_sizes(&self) -> Vec<u32> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                PaginationEvent::Attempt { batch_size, .. } => Some(batch_size),
                _ => None,
            })
            .collect()
    }
}

impl PaginationSink for RecordingSink {
    fn on_event(&self, event: PaginationEvent) {
        self.events.lock().expect("sink lock").push(event);
    }
}

// Rows returned verbatim regardless of the request, for contract-violation tests.
struct ScriptedSource {
    rows: Vec<SourceRow<i64>>,
}

struct ScriptedConnection<'a> {
    rows: &'a [SourceRow<i64>],
}

impl RowSource for ScriptedSource {
    type Node = i64;
    type Connection<'a>
        = ScriptedConnection<'a>
    where
        Self: 'a;

    fn acquire(&self) -> Result<Self::Connection<'_>, InternalError> {
        Ok(ScriptedConnection { rows: &self.rows })
    }
}

impl RowConnection for ScriptedConnection<'_> {
    type Node = i64;

    fn fetch(&mut self, _: &FetchRequest<'_>) -> Result<Vec<SourceRow<i64>>, InternalError> {
        Ok(self.rows.to_vec())
    }
}

fn config() -> PaginationConfig {
    PaginationConfig::default()
}

fn at(second: i64) -> DateTime<FixedOffset> {
    DateTime::<Utc>::from_timestamp(1_700_000_000 + second, 0)
        .expect("fixture timestamp")
        .fixed_offset()
}

// Spans 1..=n whose node is their rowid, ordered by rowid alone.
fn spans(n: i64) -> MemoryRowSource<i64> {
    MemoryRowSource::new((1..=n).map(|rowid| (rowid, rowid)), |rowid: &i64, _| {
        SortValue::Int(*rowid)
    })
}

// Spans with an integer column value per rowid.
fn valued_spans(values: &[(i64, Option<i64>)]) -> MemoryRowSource<Option<i64>> {
    MemoryRowSource::new(values.iter().copied(), |value: &Option<i64>, _| {
        SortValue::from_joined(*value)
    })
}

fn latency(direction: Direction) -> SortSpec {
    SortSpec::new(SortColumn::native("latency_ms", SortValueKind::Int), direction)
}

fn page<S: RowSource>(source: &S, sort: &SortSpec, request: &PageRequest) -> Connection<S::Node> {
    Paginator::new(&config())
        .paginate(source, sort, request)
        .expect("page should compute")
}

fn end_cursor<N>(connection: &Connection<N>) -> String {
    connection
        .page_info
        .end_cursor
        .as_ref()
        .expect("non-empty page has an end cursor")
        .encode()
}

//
// Direct pagination
//

#[test]
fn first_page_of_rowid_listing() {
    let source = spans(15);
    let connection = page(&source, &SortSpec::rowid(Direction::Asc), &PageRequest::first(2));

    assert_eq!(connection.cursor_rowids(), vec![1, 2]);
    assert!(connection.page_info.has_next_page);
    assert!(!connection.page_info.has_previous_page);
    assert_eq!(connection.page_info.start_cursor, Some(Cursor::new(1)));
    assert_eq!(connection.page_info.end_cursor, Some(Cursor::new(2)));
}

#[test]
fn resuming_near_the_end_reports_no_next_page() {
    let source = spans(15);
    let request = PageRequest::first(2).after(Cursor::new(13).encode());
    let connection = page(&source, &SortSpec::rowid(Direction::Asc), &request);

    assert_eq!(connection.cursor_rowids(), vec![14, 15]);
    assert!(!connection.page_info.has_next_page);
    assert!(connection.page_info.has_previous_page);
}

#[test]
fn exact_fit_page_has_no_next_page() {
    let source = spans(4);
    let connection = page(&source, &SortSpec::rowid(Direction::Asc), &PageRequest::first(4));

    assert_eq!(connection.len(), 4);
    assert!(!connection.page_info.has_next_page);
}

#[test]
fn empty_source_yields_empty_page() {
    let source = spans(0);
    let connection = page(&source, &SortSpec::rowid(Direction::Asc), &PageRequest::first(3));

    assert!(connection.is_empty());
    assert_eq!(connection.page_info.start_cursor, None);
    assert_eq!(connection.page_info.end_cursor, None);
    assert!(!connection.page_info.has_next_page);
}

#[test]
fn descending_ties_break_by_descending_rowid() {
    let mut values: Vec<(i64, Option<i64>)> = (1..=13).map(|rowid| (rowid, Some(rowid))).collect();
    values.extend([(14, Some(382)), (15, Some(382))]);
    let source = valued_spans(&values);

    let connection = page(&source, &latency(Direction::Desc), &PageRequest::first(2));

    assert_eq!(connection.cursor_rowids(), vec![15, 14]);
    assert_eq!(
        connection.page_info.end_cursor,
        Some(Cursor::with_sort(14, SortValue::Int(382)))
    );
}

#[test]
fn ascending_ties_break_by_ascending_rowid() {
    let source = valued_spans(&[(1, Some(5)), (2, Some(0)), (3, Some(0)), (4, Some(9))]);

    let connection = page(&source, &latency(Direction::Asc), &PageRequest::first(2));

    assert_eq!(connection.cursor_rowids(), vec![2, 3]);
}

#[test]
fn resuming_inside_a_tie_continues_with_the_tied_rows() {
    let source = valued_spans(&[(1, Some(7)), (2, Some(7)), (3, Some(7)), (4, Some(1))]);
    let request =
        PageRequest::first(5).after(Cursor::with_sort(3, SortValue::Int(7)).encode());

    let connection = page(&source, &latency(Direction::Desc), &request);

    assert_eq!(connection.cursor_rowids(), vec![2, 1, 4]);
}

#[test]
fn null_joined_scores_trail_descending_and_page_through() {
    let quality = SortSpec::new(
        SortColumn::Joined(JoinedSortKey::annotation(
            "quality",
            JoinedAttribute::Score,
        )),
        Direction::Desc,
    );
    let source = MemoryRowSource::new(
        [(1, Some(0.9)), (2, None), (3, None)],
        |score: &Option<f64>, _| SortValue::from_joined(*score),
    );

    let first = page(&source, &quality, &PageRequest::first(2));
    assert_eq!(first.cursor_rowids(), vec![1, 3]);
    assert!(first.page_info.has_next_page);
    assert_eq!(
        first.page_info.end_cursor,
        Some(Cursor::with_sort(3, SortValue::Null))
    );

    let second = page(&source, &quality, &PageRequest::first(2).after(end_cursor(&first)));
    assert_eq!(second.cursor_rowids(), vec![2]);
    assert!(!second.page_info.has_next_page);
    assert!(second.page_info.has_previous_page);
}

#[test]
fn null_values_trail_ascending_too() {
    let source = valued_spans(&[(1, None), (2, Some(3)), (3, Some(1))]);

    let connection = page(&source, &latency(Direction::Asc), &PageRequest::first(3));

    assert_eq!(connection.cursor_rowids(), vec![3, 2, 1]);
}

#[test]
fn last_without_cursor_returns_the_tail_in_sort_order() {
    let source = spans(15);
    let connection = page(&source, &SortSpec::rowid(Direction::Asc), &PageRequest::last(2));

    assert_eq!(connection.cursor_rowids(), vec![14, 15]);
    assert!(connection.page_info.has_previous_page);
    assert!(!connection.page_info.has_next_page);
}

#[test]
fn last_before_cursor_returns_the_rows_just_before_it() {
    let source = spans(15);
    let request = PageRequest::last(2).before(Cursor::new(5).encode());
    let connection = page(&source, &SortSpec::rowid(Direction::Asc), &request);

    assert_eq!(connection.cursor_rowids(), vec![3, 4]);
    assert!(connection.page_info.has_previous_page);
    assert!(connection.page_info.has_next_page);
}

#[test]
fn backward_paging_keeps_nulls_at_the_end() {
    let source = valued_spans(&[(1, None), (2, Some(3)), (3, Some(1)), (4, None)]);

    let tail = page(&source, &latency(Direction::Asc), &PageRequest::last(3));
    assert_eq!(tail.cursor_rowids(), vec![2, 1, 4]);

    let start = tail
        .page_info
        .start_cursor
        .as_ref()
        .expect("tail page has a start cursor")
        .encode();
    let head = page(&source, &latency(Direction::Asc), &PageRequest::last(3).before(start));
    assert_eq!(head.cursor_rowids(), vec![3]);
    assert!(!head.page_info.has_previous_page);
    assert!(head.page_info.has_next_page);
}

//
// Errors
//

#[test]
fn invalid_arguments_fail_before_touching_the_source() {
    let source = spans(3);
    let err = Paginator::new(&config())
        .paginate(&source, &SortSpec::rowid(Direction::Asc), &PageRequest::first(0))
        .expect_err("zero limit should fail");

    assert!(matches!(
        err,
        PageError::InvalidPaginationArguments(PageArgsError::NonPositiveLimit { .. })
    ));
    assert_eq!(source.stats().acquired, 0);
}

#[test]
fn oversized_limit_is_rejected_against_configured_maximum() {
    let config = PaginationConfig {
        max_page_size: 10,
        ..PaginationConfig::default()
    };
    let err = Paginator::new(&config)
        .paginate(&spans(3), &SortSpec::rowid(Direction::Asc), &PageRequest::first(11))
        .expect_err("oversized limit should fail");

    assert!(err.is_client_error());
}

#[test]
fn garbage_cursor_is_invalid_cursor() {
    let request = PageRequest::first(2).after("not a cursor!");
    let err = Paginator::new(&config())
        .paginate(&spans(3), &SortSpec::rowid(Direction::Asc), &request)
        .expect_err("garbage cursor should fail");

    assert!(matches!(err, PageError::InvalidCursor(CursorError::Decode(_))));
}

#[test]
fn rowid_cursor_cannot_resume_a_sorted_listing() {
    let source = valued_spans(&[(1, Some(1))]);
    let request = PageRequest::first(2).after(Cursor::new(1).encode());
    let err = Paginator::new(&config())
        .paginate(&source, &latency(Direction::Asc), &request)
        .expect_err("rowid-only cursor should fail on sorted listing");

    assert!(matches!(
        err,
        PageError::InvalidCursor(CursorError::MissingSortValue { .. })
    ));
    assert_eq!(source.stats().acquired, 0);
}

#[test]
fn cursor_of_wrong_type_is_rejected() {
    let start_time = SortSpec::new(
        SortColumn::native("start_time", SortValueKind::DateTime),
        Direction::Asc,
    );
    let cursor = Cursor::with_sort(1, SortValue::Float(1.5));
    let request = PageRequest::first(2).after(cursor.encode());
    let err = Paginator::new(&config())
        .paginate(&spans(3), &start_time, &request)
        .expect_err("float cursor should not resume a datetime listing");

    assert!(matches!(
        err,
        PageError::InvalidCursor(CursorError::SortTypeMismatch { .. })
    ));
}

#[test]
fn mistyped_row_value_is_malformed_and_releases_the_connection() {
    let source = MemoryRowSource::new([(1, ()), (2, ())], |_: &(), _| {
        SortValue::String("fast".into())
    });
    let err = Paginator::new(&config())
        .paginate(&source, &latency(Direction::Asc), &PageRequest::first(2))
        .expect_err("string value in int column should fail");

    match err {
        PageError::MalformedSortValue { rowid, column, found } => {
            assert_eq!(rowid, 1);
            assert_eq!(column, "latency_ms");
            assert_eq!(found, Some(SortValue::String("fast".into())));
        }
        other => panic!("expected MalformedSortValue, got {other:?}"),
    }
    assert!(source.stats().is_balanced());
}

#[test]
fn source_failure_propagates_and_releases_the_connection() {
    let source = spans(3).failing("connection reset");
    let err = Paginator::new(&config())
        .paginate(&source, &SortSpec::rowid(Direction::Asc), &PageRequest::first(2))
        .expect_err("failing source should fail the page");

    assert_eq!(err.class(), ErrorClass::Internal);
    let stats = source.stats();
    assert_eq!(stats.acquired, 1);
    assert!(stats.is_balanced());
}

#[test]
fn out_of_order_rows_are_an_invariant_violation() {
    let source = ScriptedSource {
        rows: vec![SourceRow::new(2, 2, None), SourceRow::new(1, 1, None)],
    };
    let err = Paginator::new(&config())
        .paginate(&source, &SortSpec::rowid(Direction::Asc), &PageRequest::first(5))
        .expect_err("unordered rows should fail");

    assert_eq!(err.class(), ErrorClass::InvariantViolation);
}

#[test]
fn rows_at_the_bound_are_an_invariant_violation() {
    let source = ScriptedSource {
        rows: vec![SourceRow::new(3, 3, None), SourceRow::new(4, 4, None)],
    };
    let request = PageRequest::first(2).after(Cursor::new(3).encode());
    let err = Paginator::new(&config())
        .paginate(&source, &SortSpec::rowid(Direction::Asc), &request)
        .expect_err("row equal to the bound should fail");

    assert_eq!(err.class(), ErrorClass::InvariantViolation);
}

#[test]
fn rows_beyond_the_fetch_limit_are_an_invariant_violation() {
    let source = ScriptedSource {
        rows: (1..=5).map(|rowid| SourceRow::new(rowid, rowid, None)).collect(),
    };
    let err = Paginator::new(&config())
        .paginate(&source, &SortSpec::rowid(Direction::Asc), &PageRequest::first(2))
        .expect_err("more than limit + 1 rows should fail");

    assert_eq!(err.class(), ErrorClass::InvariantViolation);
}

#[test]
fn sink_observes_one_fetch_per_direct_page() {
    let sink = RecordingSink::default();
    let source = spans(5);
    let config = config();

    Paginator::new(&config)
        .with_sink(&sink)
        .paginate(&source, &SortSpec::rowid(Direction::Asc), &PageRequest::first(2))
        .expect("page should compute");

    assert_eq!(
        sink.events(),
        vec![
            PaginationEvent::Start {
                mode: PaginationMode::Direct,
                limit: 2,
                backward: false,
                resumed: false,
            },
            PaginationEvent::Fetch { limit: 3, rows: 3 },
            PaginationEvent::Finish {
                mode: PaginationMode::Direct,
                edges: 2,
                has_next_page: true,
                has_previous_page: false,
            },
        ]
    );
    assert_eq!(source.stats().queries, 1);
}

//
// Chained pages
//

fn arb_values() -> impl Strategy<Value = Vec<Option<i64>>> {
    prop::collection::vec(prop::option::of(0_i64..4), 0..24)
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Asc), Just(Direction::Desc)]
}

// Walk a listing by chaining end cursors (or start cursors when backward).
fn walk(
    source: &MemoryRowSource<Option<i64>>,
    sort: &SortSpec,
    page_size: i32,
    backward: bool,
) -> Vec<i64> {
    let mut pages: Vec<Vec<i64>> = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let mut request = if backward {
            PageRequest::last(page_size)
        } else {
            PageRequest::first(page_size)
        };
        match (&cursor, backward) {
            (Some(token), true) => request = request.before(token.clone()),
            (Some(token), false) => request = request.after(token.clone()),
            (None, _) => {}
        }

        let connection = page(source, sort, &request);
        let more = if backward {
            connection.page_info.has_previous_page
        } else {
            connection.page_info.has_next_page
        };
        cursor = if backward {
            connection.page_info.start_cursor.as_ref().map(Cursor::encode)
        } else {
            connection.page_info.end_cursor.as_ref().map(Cursor::encode)
        };
        pages.push(connection.cursor_rowids());

        if !more {
            break;
        }
    }

    if backward {
        pages.reverse();
    }

    pages.into_iter().flatten().collect()
}

proptest! {
    #[test]
    fn chained_pages_visit_every_row_once_in_order(
        values in arb_values(),
        direction in arb_direction(),
        page_size in 1_i32..5,
        backward in any::<bool>(),
    ) {
        let rows: Vec<(i64, Option<i64>)> = values.iter().copied().zip(1..).map(|(v, r)| (r, v)).collect();
        let source = valued_spans(&rows);
        let sort = latency(direction);

        let visited = walk(&source, &sort, page_size, backward);

        let unique: BTreeSet<i64> = visited.iter().copied().collect();
        prop_assert_eq!(unique.len(), visited.len());
        prop_assert_eq!(unique, rows.iter().map(|(rowid, _)| *rowid).collect::<BTreeSet<_>>());

        let order = KeyOrder::forward(direction);
        let keyed: Vec<SortValue> = visited
            .iter()
            .map(|rowid| {
                let index = usize::try_from(*rowid - 1).expect("rowid index");
                SortValue::from_joined(rows[index].1)
            })
            .collect();
        for (pair, ids) in keyed.windows(2).zip(visited.windows(2)) {
            let left = SortKey::new(Some(&pair[0]), ids[0]);
            let right = SortKey::new(Some(&pair[1]), ids[1]);
            prop_assert!(order.advances(right, left));
        }
        prop_assert!(source.stats().is_balanced());
    }
}

//
// Indirect pagination
//

// Parents 1..=n starting one second apart.
fn traces(n: i64) -> MemoryRowSource<DateTime<FixedOffset>> {
    MemoryRowSource::new((1..=n).map(|rowid| (rowid, at(rowid))), |start: &DateTime<FixedOffset>, _| {
        SortValue::DateTime(*start)
    })
}

fn trace_start(direction: Direction) -> SortSpec {
    SortSpec::new(
        SortColumn::native("start_time", SortValueKind::DateTime),
        direction,
    )
}

// One root span per listed parent; child rowid is parent * 100.
fn root_spans(parents: &[i64]) -> MemoryChildSource<String> {
    MemoryChildSource::new(parents.iter().map(|parent| ChildCandidate {
        parent_rowid: *parent,
        rowid: parent * 100,
        start_time: at(*parent),
        node: format!("span-{}", parent * 100),
    }))
}

#[test]
fn representative_page_skips_parents_without_children() {
    let parents = traces(5);
    let children = root_spans(&[1, 3, 5]);

    let connection = IndirectPaginator::new(&config())
        .paginate(
            &parents,
            &children,
            &trace_start(Direction::Asc),
            &PageRequest::first(10),
        )
        .expect("indirect page should compute");

    assert_eq!(connection.len(), 3);
    assert!(!connection.page_info.has_next_page);
    assert_eq!(connection.cursor_rowids(), vec![1, 3, 5]);
    assert_eq!(
        connection.edges[1].cursor,
        Cursor::with_sort(3, SortValue::DateTime(at(3)))
    );
    assert_eq!(connection.edges[1].node, "span-300");
}

#[test]
fn representative_page_amplifies_sparse_batches() {
    let config = PaginationConfig {
        indirect: IndirectConfig {
            max_attempts: 10,
            amplified_batch_size: 4,
        },
        ..PaginationConfig::default()
    };
    let sink = RecordingSink::default();
    let parents = traces(12);
    let children = root_spans(&[10, 11, 12]);
    let sort = trace_start(Direction::Asc);
    let paginator = IndirectPaginator::new(&config).with_sink(&sink);

    let first = paginator
        .paginate(&parents, &children, &sort, &PageRequest::first(2))
        .expect("indirect page should compute");

    assert_eq!(first.cursor_rowids(), vec![10, 11]);
    assert!(first.page_info.has_next_page);
    assert_eq!(sink.attempt_batch_sizes(), vec![2, 4, 4, 4]);
    assert!(parents.stats().is_balanced());

    let second = paginator
        .paginate(
            &parents,
            &children,
            &sort,
            &PageRequest::first(2).after(end_cursor(&first)),
        )
        .expect("indirect page should compute");

    assert_eq!(second.cursor_rowids(), vec![12]);
    assert!(!second.page_info.has_next_page);
    assert!(second.page_info.has_previous_page);
}

#[test]
fn representative_page_stops_at_the_attempt_cap() {
    let config = PaginationConfig {
        indirect: IndirectConfig {
            max_attempts: 2,
            amplified_batch_size: 2,
        },
        ..PaginationConfig::default()
    };
    let sink = RecordingSink::default();
    let parents = traces(10);
    let children = root_spans(&[10]);

    let connection = IndirectPaginator::new(&config)
        .with_sink(&sink)
        .paginate(
            &parents,
            &children,
            &trace_start(Direction::Asc),
            &PageRequest::first(1),
        )
        .expect("exhausted attempts still produce a page");

    assert!(connection.is_empty());
    assert!(!connection.page_info.has_next_page);
    assert_eq!(sink.attempt_batch_sizes(), vec![1, 2]);
    assert_eq!(parents.stats().queries, 2);
    assert_eq!(children.lookups(), 2);
}

#[test]
fn full_representative_page_stops_scanning_parents() {
    let config = PaginationConfig {
        indirect: IndirectConfig {
            max_attempts: 2,
            amplified_batch_size: 100,
        },
        ..PaginationConfig::default()
    };
    let sink = RecordingSink::default();
    let parents = traces(20);
    let children = root_spans(&[1, 2, 20]);
    let sort = trace_start(Direction::Asc);
    let paginator = IndirectPaginator::new(&config).with_sink(&sink);

    let first = paginator
        .paginate(&parents, &children, &sort, &PageRequest::first(2))
        .expect("indirect page should compute");

    assert_eq!(first.cursor_rowids(), vec![1, 2]);
    assert!(first.page_info.has_next_page);
    assert_eq!(sink.attempt_batch_sizes(), vec![2]);
    assert_eq!(parents.stats().queries, 1);
    assert_eq!(children.lookups(), 1);

    let second = paginator
        .paginate(
            &parents,
            &children,
            &sort,
            &PageRequest::first(2).after(end_cursor(&first)),
        )
        .expect("indirect page should compute");

    assert_eq!(second.cursor_rowids(), vec![20]);
    assert!(!second.page_info.has_next_page);
    assert!(second.page_info.has_previous_page);
    assert!(parents.stats().is_balanced());
    assert!(children.stats().is_balanced());
}

#[test]
fn full_page_mid_batch_reports_the_unscanned_parents() {
    let parents = traces(6);
    let children = root_spans(&[1, 2, 6]);

    // The second batch holds every remaining parent; the page fills at parent 2.
    let connection = IndirectPaginator::new(&config())
        .paginate(
            &parents,
            &children,
            &trace_start(Direction::Desc),
            &PageRequest::first(2),
        )
        .expect("indirect page should compute");

    assert_eq!(connection.cursor_rowids(), vec![6, 2]);
    assert!(connection.page_info.has_next_page);
    assert_eq!(parents.stats().queries, 2);
}

#[test]
fn child_source_failure_propagates_and_releases_both_connections() {
    let parents = traces(3);
    let children = root_spans(&[1]).failing("span index unavailable");

    let err = IndirectPaginator::new(&config())
        .paginate(
            &parents,
            &children,
            &trace_start(Direction::Asc),
            &PageRequest::first(2),
        )
        .expect_err("failing child source should fail the page");

    assert_eq!(err.class(), ErrorClass::Internal);
    assert_eq!(children.stats().acquired, 1);
    assert!(children.stats().is_balanced());
    assert!(parents.stats().is_balanced());
}

#[test]
fn representative_page_walks_backward() {
    let parents = traces(5);
    let children = root_spans(&[1, 3, 5]);

    let connection = IndirectPaginator::new(&config())
        .paginate(
            &parents,
            &children,
            &trace_start(Direction::Asc),
            &PageRequest::last(2),
        )
        .expect("indirect page should compute");

    assert_eq!(connection.cursor_rowids(), vec![3, 5]);
    assert!(connection.page_info.has_previous_page);
    assert!(!connection.page_info.has_next_page);
}

#[test]
fn cancelled_representative_page_fails_before_querying() {
    let cancel = AtomicBool::new(true);
    let parents = traces(5);
    let children = root_spans(&[1]);
    let config = config();

    let err = IndirectPaginator::new(&config)
        .with_cancel(&cancel)
        .paginate(
            &parents,
            &children,
            &trace_start(Direction::Asc),
            &PageRequest::first(2),
        )
        .expect_err("cancelled page should fail");

    assert!(matches!(err, PageError::Cancelled { attempt: 0 }));
    assert_eq!(err.class(), ErrorClass::Cancelled);
    assert_eq!(parents.stats().acquired, 0);
}

#[test]
fn representative_page_rejects_cursor_of_wrong_type() {
    let request = PageRequest::first(2).after(Cursor::with_sort(1, SortValue::Int(1)).encode());
    let err = IndirectPaginator::new(&config())
        .paginate(
            &traces(3),
            &root_spans(&[1]),
            &trace_start(Direction::Asc),
            &request,
        )
        .expect_err("int cursor should not resume a datetime listing");

    assert!(err.is_client_error());
}

#[test]
fn earliest_child_represents_its_parent_with_ties_to_greater_rowid() {
    let candidate = |parent_rowid, rowid, second| ChildCandidate {
        parent_rowid,
        rowid,
        start_time: at(second),
        node: rowid,
    };

    let chosen = select_representatives(vec![
        candidate(1, 5, 9),
        candidate(1, 2, 3),
        candidate(1, 3, 3),
        candidate(2, 7, 1),
    ]);

    assert_eq!(chosen.len(), 2);
    assert_eq!(chosen[&1].rowid, 3);
    assert_eq!(chosen[&2].rowid, 7);
}
