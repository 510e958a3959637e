use crate::{Rect, ScrollStatus};

/// Classifies the current scroll movement and whether the display window touches either end of
/// the source collection.
///
/// `previous` is the window rect of the preceding check cycle. A missing sample, or one taken
/// while the region rested at its very top, counts as "scrolling down" so that a short list
/// keeps asking for its first pages.
pub fn evaluate<T, K: PartialEq>(
    previous: Option<Rect>,
    current: Rect,
    display: &[T],
    source: Option<&[T]>,
    item_key: impl Fn(&T) -> K,
) -> ScrollStatus {
    let (is_scrolling_up, is_scrolling_down) = match previous {
        Some(prev) if prev.top > 0.0 => (current.top < prev.top, current.top > prev.top),
        _ => (false, true),
    };

    let same = |a: Option<&T>, b: Option<&T>| match (a, b) {
        (Some(a), Some(b)) => item_key(a) == item_key(b),
        _ => false,
    };

    let (is_start_reached, is_end_reached) = match source {
        Some(source) if !source.is_empty() && !display.is_empty() => (
            same(display.first(), source.first()),
            same(display.last(), source.last()),
        ),
        _ => (false, true),
    };

    ScrollStatus {
        is_scrolling_up,
        is_scrolling_down,
        is_start_reached,
        is_end_reached,
    }
}
