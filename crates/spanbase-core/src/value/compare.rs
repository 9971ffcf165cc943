use crate::value::SortValue;
use std::cmp::Ordering;

// 2^63, the first f64 magnitude outside the i64 range.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Total comparator over sort values.
///
/// Ordering rules:
/// 1. NULL is greater than every non-null value
/// 2. INT and FLOAT compare by exact numeric value, regardless of tag
/// 3. Same-family values compare naturally (strings bytewise, datetimes by instant)
/// 4. Mismatched non-numeric families fall back to a deterministic tag rank
///
/// Direction is not applied here; the key comparator owns it.
#[must_use]
pub fn compare(left: &SortValue, right: &SortValue) -> Ordering {
    match (left, right) {
        (SortValue::Null, SortValue::Null) => Ordering::Equal,
        (SortValue::Null, _) => Ordering::Greater,
        (_, SortValue::Null) => Ordering::Less,
        (SortValue::Int(a), SortValue::Int(b)) => a.cmp(b),
        (SortValue::Float(a), SortValue::Float(b)) => compare_floats(*a, *b),
        (SortValue::Int(a), SortValue::Float(b)) => compare_int_float(*a, *b),
        (SortValue::Float(a), SortValue::Int(b)) => compare_int_float(*b, *a).reverse(),
        (SortValue::String(a), SortValue::String(b)) => a.cmp(b),
        (SortValue::DateTime(a), SortValue::DateTime(b)) => a.cmp(b),
        _ => left.tag().rank().cmp(&right.tag().rank()),
    }
}

// Numeric float order with -0.0 == 0.0; NaN sorts after every number.
fn compare_floats(left: f64, right: f64) -> Ordering {
    left.partial_cmp(&right)
        .unwrap_or_else(|| left.is_nan().cmp(&right.is_nan()))
}

// Exact i64-vs-f64 comparison without routing the integer through a lossy cast.
#[expect(clippy::cast_possible_truncation)]
fn compare_int_float(int: i64, float: f64) -> Ordering {
    if float.is_nan() {
        return Ordering::Less;
    }
    if float >= I64_BOUND {
        return Ordering::Less;
    }
    if float < -I64_BOUND {
        return Ordering::Greater;
    }

    let whole = float.trunc();
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => compare_floats(0.0, float - whole),
        ordering => ordering,
    }
}

///
/// TESTS
///
