//! Module: executor
//! Responsibility: turn validated window arguments into finished pages.
//! Does not own: argument validation (`db::query`) or storage access (`db::source`).

mod indirect;
mod paginator;
mod window;

#[cfg(test)]
mod tests;

use std::sync::atomic::{AtomicBool, Ordering};

// re-exports
pub use indirect::IndirectPaginator;
pub use paginator::Paginator;

///
/// CancelSignal
///
/// Caller-owned cancellation flag consulted before every parent query of
/// an indirect page. The engine holds no cancellation state of its own.
///

pub trait CancelSignal {
    fn is_cancelled(&self) -> bool;
}

///
/// NeverCancel
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NeverCancel;

impl CancelSignal for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl CancelSignal for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}
