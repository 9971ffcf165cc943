//! Module: order
//! Responsibility: the total order over `(sort value, rowid)` keys.
//! Does not own: value-level comparison (see `value::compare`).
//! Boundary: every bound check, row-source ordering, and page window uses this order.

use crate::{
    db::direction::Direction,
    value::{SortValue, compare},
};
use std::cmp::Ordering;

///
/// SortKey
///
/// Borrowed comparator key for one row or cursor. A `None` value means the
/// listing is ordered by rowid alone.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SortKey<'a> {
    pub value: Option<&'a SortValue>,
    pub rowid: i64,
}

impl<'a> SortKey<'a> {
    #[must_use]
    pub const fn new(value: Option<&'a SortValue>, rowid: i64) -> Self {
        Self { value, rowid }
    }
}

///
/// KeyOrder
///
/// Traversal order over sort keys.
///
/// The requested order places non-null values in `direction`, every NULL
/// after every non-null value regardless of direction, and breaks ties
/// (NULL/NULL included) by rowid in `direction`. `reversed` walks that
/// exact sequence from the other end, which is how `last`/`before` pages
/// are fetched.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct KeyOrder {
    pub direction: Direction,
    pub reversed: bool,
}

impl KeyOrder {
    /// Requested order, walked front to back.
    #[must_use]
    pub const fn forward(direction: Direction) -> Self {
        Self {
            direction,
            reversed: false,
        }
    }

    /// Requested order, walked back to front.
    #[must_use]
    pub const fn backward(direction: Direction) -> Self {
        Self {
            direction,
            reversed: true,
        }
    }

    /// Compare two keys under this traversal.
    #[must_use]
    pub fn compare(&self, left: SortKey<'_>, right: SortKey<'_>) -> Ordering {
        let ordering = self.compare_requested(left, right);

        if self.reversed {
            ordering.reverse()
        } else {
            ordering
        }
    }

    /// Whether `key` lies strictly after `bound` in this traversal.
    #[must_use]
    pub fn advances(&self, key: SortKey<'_>, bound: SortKey<'_>) -> bool {
        self.compare(key, bound) == Ordering::Greater
    }

    /// Sort keyed items in place under this traversal.
    pub fn sort_by_key<T>(&self, items: &mut [T], key_of: impl Fn(&T) -> SortKey<'_>) {
        items.sort_by(|left, right| self.compare(key_of(left), key_of(right)));
    }

    // Requested order before any traversal reversal.
    fn compare_requested(&self, left: SortKey<'_>, right: SortKey<'_>) -> Ordering {
        let primary = match (left.value, right.value) {
            (None, None) => Ordering::Equal,
            (Some(left), Some(right)) => self.compare_values(left, right),
            // Rowid-only keys never mix with sorted keys once cursors are validated;
            // a missing value is placed with NULLs so the order stays total.
            (None, Some(right)) => self.compare_values(&SortValue::Null, right),
            (Some(left), None) => self.compare_values(left, &SortValue::Null),
        };

        if primary != Ordering::Equal {
            return primary;
        }

        self.direction.apply(left.rowid.cmp(&right.rowid))
    }

    // NULL placement is direction-independent; only non-null pairs follow direction.
    fn compare_values(&self, left: &SortValue, right: &SortValue) -> Ordering {
        match (left.is_null(), right.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.direction.apply(compare(left, right)),
        }
    }
}

///
/// TESTS
///
