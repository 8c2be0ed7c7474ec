//! Stage functions for the odd/triple/successor pipeline.
//!
//! Predicates take a reference so they plug straight into
//! [`pipe::filter`](crate::pipe::filter) and `Iterator::filter`.

/// `n % 2 == 1`; negative odd numbers have remainder -1 and are not kept
pub fn is_odd(n: &i64) -> bool {
    n % 2 == 1
}

pub fn is_even(n: &i64) -> bool {
    n % 2 == 0
}

/// Wraps on overflow
pub fn triple(e: i64) -> i64 {
    e.wrapping_mul(3)
}

/// Wraps on overflow
pub fn successor(e: i64) -> i64 {
    e.wrapping_add(1)
}
