#![forbid(unsafe_code)]

//! Axis ordering for positioned items.

use std::cmp::Ordering;

use crate::direction::Axis;
use crate::geometry::Vec2;

/// Stable sort by position along `axis` (ascending), ties broken by the
/// complementary axis in *descending* order.
///
/// The descending tie-break is deliberate: for a row sorted on X, items
/// sharing a column come out top-first in a y-up world.
pub fn sort_by_axis_then_other<T>(items: &mut [T], axis: Axis, position: impl Fn(&T) -> Vec2) {
    items.sort_by(|a, b| compare_axis_then_other(position(a), position(b), axis));
}

/// Comparator behind [`sort_by_axis_then_other`].
#[must_use]
pub fn compare_axis_then_other(a: Vec2, b: Vec2, axis: Axis) -> Ordering {
    let other = axis.other();
    axis.component(a)
        .total_cmp(&axis.component(b))
        .then_with(|| other.component(b).total_cmp(&other.component(a)))
}
