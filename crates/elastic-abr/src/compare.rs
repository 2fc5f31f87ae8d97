//! Deterministic ordering primitives for rendition ladders.
//!
//! Missing attributes rank as the largest representable value, so renditions
//! without a `BANDWIDTH` sort last ascending and first descending.

use std::cmp::Ordering;

use crate::types::Rendition;

/// Orders renditions by advertised bandwidth, missing bandwidth last.
pub fn compare_bandwidth(left: &Rendition, right: &Rendition) -> Ordering {
    left.ranked_bandwidth().cmp(&right.ranked_bandwidth())
}

/// Orders renditions by picture width, missing width last.
///
/// Equal widths fall back to bandwidth when both renditions advertise one.
pub fn compare_resolution_width(left: &Rendition, right: &Rendition) -> Ordering {
    let left_width = left.width().unwrap_or(u32::MAX);
    let right_width = right.width().unwrap_or(u32::MAX);

    match (left_width.cmp(&right_width), left.bandwidth, right.bandwidth) {
        (Ordering::Equal, Some(l), Some(r)) => l.cmp(&r),
        (ord, _, _) => ord,
    }
}

/// Sorts `items` by `cmp`, keeping the original relative order of equal elements.
///
/// `slice::sort_by` is a stable merge sort, so ties resolve by original index
/// for inputs of any size.
pub fn stable_sort<T, F>(items: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    items.sort_by(|a, b| cmp(a, b));
}
