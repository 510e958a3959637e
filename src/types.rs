/// A measured vertical extent in the engine's normalized coordinate space.
///
/// `bottom == top + height` always holds; construct through [`Rect::new`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
    pub height: f64,
}

impl Rect {
    /// Builds a rect from its top edge and height.
    ///
    /// Non-finite input (detached or zero-sized elements in some hosts) yields the all-zero rect.
    pub fn new(top: f64, height: f64) -> Self {
        if !top.is_finite() || !height.is_finite() {
            return Self::default();
        }
        Self {
            top,
            bottom: top + height,
            height,
        }
    }

    /// Shifts the rect vertically by `dy`.
    pub fn translate(self, dy: f64) -> Self {
        Self::new(self.top + dy, self.height)
    }
}

/// Which end of the list a page request targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageDirection {
    /// Items after the last one in the source collection.
    Next,
    /// Items before the first one in the source collection.
    Previous,
}

/// Scroll direction and edge flags derived on every check cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollStatus {
    pub is_scrolling_up: bool,
    pub is_scrolling_down: bool,
    /// The first displayed item is the first item of the source collection.
    pub is_start_reached: bool,
    /// The last displayed item is the last item of the source collection.
    pub is_end_reached: bool,
}
