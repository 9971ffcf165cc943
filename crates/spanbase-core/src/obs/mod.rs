//! Pagination tracing boundary.
//!
//! Sinks are optional, injected by the caller, and must not affect execution
//! semantics. Structured logs go through `tracing` independently of sinks.

///
/// PaginationSink
///

pub trait PaginationSink: Send + Sync {
    fn on_event(&self, event: PaginationEvent);
}

///
/// PaginationMode
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PaginationMode {
    Direct,
    Indirect,
}

///
/// PaginationEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PaginationEvent {
    Start {
        mode: PaginationMode,
        limit: u32,
        backward: bool,
        resumed: bool,
    },
    Fetch {
        limit: u32,
        rows: u32,
    },
    Attempt {
        attempt: u32,
        batch_size: u32,
        collected: u32,
    },
    Finish {
        mode: PaginationMode,
        edges: u32,
        has_next_page: bool,
        has_previous_page: bool,
    },
}

// Forward one event to an optional sink.
pub(crate) fn emit(sink: Option<&dyn PaginationSink>, event: PaginationEvent) {
    if let Some(sink) = sink {
        sink.on_event(event);
    }
}

// Saturating usize -> u32 for event payloads.
pub(crate) fn count(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
