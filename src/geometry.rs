use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::key::{KeyCacheKey, KeyRectMap, KeySet};
use crate::{ItemKeyFn, Rect};

/// A scrollable region: the page itself or a nested scroll container.
///
/// Implementations are expected to be cheap reads of the host's current layout.
pub trait Viewport {
    /// Current scroll offset of the region.
    fn scroll_top(&self) -> f64;

    /// Visible height of the region.
    fn height(&self) -> f64;

    /// Starts (`true`) or stops (`false`) forwarding scroll events to the engine.
    ///
    /// The engine calls this once on construction and once on dispose.
    fn listen(&self, _enabled: bool) {}
}

/// The host-side view of the rendered list.
///
/// All positions are reported in page coordinates; the engine normalizes them when a custom
/// viewport is configured.
pub trait Layout<T> {
    /// The page-level viewport.
    fn page(&self) -> &dyn Viewport;

    /// Position and height of the element containing the rendered rows, if it is attached.
    fn container(&self) -> Option<Rect>;

    /// Reports every currently rendered row together with its measured rect.
    fn for_each_rendered_item(&self, f: &mut dyn FnMut(&T, Rect));
}

/// Reads viewport, container and item geometry and keeps the last known rect of every item.
///
/// Item rects are cached by identity, so an item keeps its geometry when it is culled from the
/// render set or shifts position after a prepend.
pub struct GeometryProbe<K> {
    custom: Option<Arc<dyn Viewport>>,
    rects: KeyRectMap<K>,
}

impl<K: KeyCacheKey> GeometryProbe<K> {
    pub fn new(custom: Option<Arc<dyn Viewport>>) -> Self {
        Self {
            custom,
            rects: KeyRectMap::<K>::default(),
        }
    }

    /// The region whose scroll position drives the engine.
    pub fn viewport<'a>(&'a self, page: &'a dyn Viewport) -> &'a dyn Viewport {
        match &self.custom {
            Some(v) => v.as_ref(),
            None => page,
        }
    }

    /// Offset added to page coordinates to express them in the viewport's space.
    fn shift(&self, page: &dyn Viewport) -> f64 {
        match &self.custom {
            Some(v) => {
                let shift = v.scroll_top() - page.scroll_top();
                if shift.is_finite() { shift } else { 0.0 }
            }
            None => 0.0,
        }
    }

    pub fn measure_window(&self, page: &dyn Viewport) -> Rect {
        let viewport = self.viewport(page);
        Rect::new(viewport.scroll_top(), viewport.height())
    }

    pub fn measure_container<T>(&self, layout: &dyn Layout<T>) -> Rect {
        match layout.container() {
            Some(rect) => rect.translate(self.shift(layout.page())),
            None => Rect::default(),
        }
    }

    /// Measures rendered items and projects the cache onto `source` positions.
    ///
    /// The result is truncated after the last known index.
    pub fn measure_items<T>(
        &mut self,
        layout: &dyn Layout<T>,
        source: &[T],
        item_key: &ItemKeyFn<T, K>,
    ) -> Vec<Option<Rect>> {
        let shift = self.shift(layout.page());
        let rects = &mut self.rects;
        layout.for_each_rendered_item(&mut |item, rect| {
            rects.insert(item_key(item), rect.translate(shift));
        });

        let mut out: Vec<Option<Rect>> = source
            .iter()
            .map(|item| self.rects.get(&item_key(item)).copied())
            .collect();
        let len = out.iter().rposition(Option::is_some).map_or(0, |i| i + 1);
        out.truncate(len);
        out
    }

    /// Forgets rects of items that are no longer in the source.
    pub fn retain(&mut self, keys: &KeySet<K>) {
        self.rects.retain(|k, _| keys.contains(k));
    }

    pub fn cached_len(&self) -> usize {
        self.rects.len()
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }
}

impl<K> core::fmt::Debug for GeometryProbe<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GeometryProbe")
            .field("has_custom_viewport", &self.custom.is_some())
            .field("cached", &self.rects.len())
            .finish()
    }
}
