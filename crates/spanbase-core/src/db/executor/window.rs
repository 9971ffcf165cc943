///
/// PageWindow
///
/// Page window sizing in usize-domain.
/// `keep_count` is the requested limit, and `fetch_count` adds one extra row
/// when the caller needs to know whether more rows follow.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PageWindow {
    pub(crate) fetch_count: u32,
    pub(crate) keep_count: usize,
}

/// Compute page window counts from a validated limit.
#[must_use]
pub(crate) fn compute_page_window(limit: u32, needs_extra: bool) -> PageWindow {
    let fetch_count = limit.saturating_add(u32::from(needs_extra));
    let keep_count = usize::try_from(limit).unwrap_or(usize::MAX);

    PageWindow {
        fetch_count,
        keep_count,
    }
}

///
/// TESTS
///
