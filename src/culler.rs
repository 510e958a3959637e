use alloc::vec::Vec;
use core::ops::RangeInclusive;

use crate::Rect;

/// The outcome of a culling pass: which slice of the source stays rendered and how tall the
/// leading spacer must be to stand in for everything above it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cull {
    pub first: usize,
    /// Inclusive.
    pub last: usize,
    pub spacer_height: f64,
}

impl Cull {
    pub fn range(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }

    /// Replaces `display` in place with `source[first..=last]`.
    pub fn apply<T: Clone>(&self, source: &[T], display: &mut Vec<T>) {
        let Some(slice) = source.get(self.range()) else {
            vwarn!(
                first = self.first,
                last = self.last,
                len = source.len(),
                "Cull::apply: range outside source"
            );
            return;
        };
        display.clear();
        display.extend_from_slice(slice);
    }
}

/// An item stays rendered while it lies within one viewport height above or below the viewport.
///
/// Both bounds are inclusive.
pub fn is_visible(item: Rect, window: Rect) -> bool {
    item.bottom >= window.top - window.height && item.top <= window.bottom + window.height
}

/// First and last indexes of visible items, scanning in source order.
///
/// Unmeasured slots are skipped.
pub fn visible_range(items: &[Option<Rect>], window: Rect) -> Option<(usize, usize)> {
    let mut range: Option<(usize, usize)> = None;
    for (i, rect) in items.iter().enumerate() {
        let Some(rect) = rect else {
            continue;
        };
        if !is_visible(*rect, window) {
            continue;
        }
        range = Some(match range {
            Some((first, _)) => (first, i),
            None => (i, i),
        });
    }
    range
}

/// Computes the render slice and spacer for the current geometry.
///
/// Returns `None` when the measurements do not cover the whole source (a reconcile is still
/// settling) or when nothing is visible; callers keep their previous window and spacer then.
pub fn cull(
    items: &[Option<Rect>],
    window: Rect,
    container: Rect,
    source_len: usize,
) -> Option<Cull> {
    if items.len() != source_len {
        vtrace!(
            measured = items.len(),
            source_len,
            "cull: skipped, measurements do not match source"
        );
        return None;
    }

    let (first, last) = visible_range(items, window)?;
    let spacer_height = match items[first] {
        Some(rect) => rect.top - container.top,
        None => 0.0,
    };

    Some(Cull {
        first,
        last,
        spacer_height,
    })
}
