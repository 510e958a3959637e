use alloc::vec::Vec;

use crate::{PageDirection, Rect};

/// The latest geometry snapshot taken by a check cycle.
///
/// `items[i]` is the last known rect of source item `i`, or `None` if it was never rendered.
/// The vector is only as long as the highest measured index, so `items.len()` equals the source
/// length once the tail of the list has been measured at least once.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub window: Rect,
    pub container: Rect,
    pub items: Vec<Option<Rect>>,
}

/// Per-direction "fetch in flight" flags, exposed for spinners and similar affordances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingState {
    pub is_pending_next: bool,
    pub is_pending_previous: bool,
}

impl PendingState {
    pub fn is_pending(&self, direction: PageDirection) -> bool {
        match direction {
            PageDirection::Next => self.is_pending_next,
            PageDirection::Previous => self.is_pending_previous,
        }
    }

    pub(crate) fn set(&mut self, direction: PageDirection, pending: bool) {
        match direction {
            PageDirection::Next => self.is_pending_next = pending,
            PageDirection::Previous => self.is_pending_previous = pending,
        }
    }
}
