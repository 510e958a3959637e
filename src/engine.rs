use alloc::vec::Vec;
use core::mem;

use crate::culler;
use crate::key::{KeyCacheKey, KeySet};
use crate::status;
use crate::{
    CollectionReconciler, EngineConfig, EngineOptions, Error, Gate, GeometryProbe, Layout,
    PageDirection, PaginationController, PendingState, Reconciled, Rect, ScrollRateLimiter,
    ScrollStatus, SourceExpression, Timers, ViewportState,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Task {
    /// Post-update settle: clear pending flags and, for incremental updates, re-check.
    Settle,
}

/// A headless endless-scroll engine.
///
/// The engine never touches UI objects directly:
/// - geometry is read through the host's [`Layout`] and [`crate::Viewport`] implementations,
/// - rendering reads [`Self::display_window`] and [`Self::spacer_height`],
/// - time is explicit: every entry point that may arm or fire a timer takes `now_ms`, and the
///   host calls [`Self::tick`] (see [`Self::next_deadline`]) to run whatever became due.
///
/// Items are compared through the options' `item_key`, so "the same item" means the same key in
/// the reconciler, the edge checks and the geometry cache alike.
#[derive(Debug)]
pub struct ScrollEngine<T, K, L> {
    options: EngineOptions<T, K>,
    layout: L,
    expression: Option<SourceExpression>,

    probe: GeometryProbe<K>,
    reconciler: CollectionReconciler<T>,
    pagination: PaginationController,
    limiter: ScrollRateLimiter,
    timers: Timers<Task>,

    display: Vec<T>,
    spacer_height: f64,
    viewport_state: ViewportState,
    previous_window: Option<Rect>,
    status: ScrollStatus,

    settle_check: bool,
    disposed: bool,
}

impl<T: Clone, K: KeyCacheKey, L: Layout<T>> ScrollEngine<T, K, L> {
    /// Creates an engine bound to `layout` and starts listening on its viewport.
    ///
    /// Fails when the configuration cannot be interpreted (non-finite edge offset, malformed
    /// source expression).
    pub fn new(options: EngineOptions<T, K>, layout: L) -> Result<Self, Error> {
        let config = options.config;
        if !config.edge_offset.is_finite() {
            return Err(Error::InvalidEdgeOffset(config.edge_offset));
        }
        let expression = options
            .source_expression
            .as_deref()
            .map(SourceExpression::parse)
            .transpose()?;

        vdebug!(
            edge_offset = config.edge_offset,
            scroll_throttle_ms = config.scroll_throttle_ms,
            pending_timeout_ms = config.pending_timeout_ms,
            custom_viewport = options.viewport.is_some(),
            "ScrollEngine::new"
        );

        let engine = Self {
            probe: GeometryProbe::new(options.viewport.clone()),
            reconciler: CollectionReconciler::new(config.replace_policy),
            pagination: PaginationController::new(config.pending_timeout_ms),
            limiter: ScrollRateLimiter::new(config.scroll_throttle_ms),
            timers: Timers::new(),
            display: Vec::new(),
            spacer_height: 0.0,
            viewport_state: ViewportState::default(),
            previous_window: None,
            status: ScrollStatus::default(),
            settle_check: false,
            disposed: false,
            expression,
            options,
            layout,
        };
        engine.probe.viewport(engine.layout.page()).listen(true);
        Ok(engine)
    }

    pub fn options(&self) -> &EngineOptions<T, K> {
        &self.options
    }

    pub fn config(&self) -> &EngineConfig {
        &self.options.config
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut L {
        &mut self.layout
    }

    /// The parsed binding expression, if one was configured.
    pub fn source_expression(&self) -> Option<&SourceExpression> {
        self.expression.as_ref()
    }

    /// The items to render, in order.
    pub fn display_window(&self) -> &[T] {
        &self.display
    }

    /// Height of the placeholder rendered before the first displayed item.
    pub fn spacer_height(&self) -> f64 {
        self.spacer_height
    }

    pub fn pending_state(&self) -> PendingState {
        self.pagination.state()
    }

    pub fn scroll_status(&self) -> ScrollStatus {
        self.status
    }

    pub fn viewport_state(&self) -> &ViewportState {
        &self.viewport_state
    }

    /// The source collection from the last update.
    pub fn source(&self) -> Option<&[T]> {
        self.reconciler.snapshot()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Runs a full measurement and pagination cycle.
    pub fn check(&mut self, now_ms: u64) {
        if self.disposed {
            vwarn!("check: engine disposed");
            return;
        }

        let window = self.probe.measure_window(self.layout.page());
        let item_key = &self.options.item_key;
        self.status = status::evaluate(
            self.previous_window,
            window,
            &self.display,
            self.reconciler.snapshot(),
            |item| item_key(item),
        );
        self.previous_window = Some(window);

        let container = self.probe.measure_container::<T>(&self.layout);
        self.viewport_state.window = window;
        self.viewport_state.container = container;

        self.clean();

        let status = self.status;
        let edge_offset = self.options.config.edge_offset;
        vtrace!(
            window_top = window.top,
            window_bottom = window.bottom,
            container_top = container.top,
            container_bottom = container.bottom,
            ?status,
            "check"
        );

        if status.is_end_reached
            && status.is_scrolling_down
            && container.bottom + edge_offset <= window.bottom
        {
            self.request_next(now_ms);
        }

        if status.is_start_reached
            && status.is_scrolling_up
            && container.top - edge_offset >= window.top
        {
            self.request_previous(now_ms);
        }
    }

    /// Measures rendered items and culls the display window to the visible slice.
    ///
    /// Uses the window and container rects of the last check cycle.
    pub fn clean(&mut self) {
        if self.disposed {
            return;
        }

        let source = self.reconciler.snapshot().unwrap_or(&[]);
        let items = self
            .probe
            .measure_items(&self.layout, source, &self.options.item_key);

        let culled = culler::cull(
            &items,
            self.viewport_state.window,
            self.viewport_state.container,
            source.len(),
        );
        if let Some(cull) = culled {
            vtrace!(
                first = cull.first,
                last = cull.last,
                spacer_height = cull.spacer_height,
                "clean"
            );
            cull.apply(source, &mut self.display);
            self.spacer_height = cull.spacer_height;
        }
        self.viewport_state.items = items;
    }

    /// Asks the host for the next page unless one is already pending.
    ///
    /// Returns `true` if the host was notified.
    pub fn request_next(&mut self, now_ms: u64) -> bool {
        self.request(PageDirection::Next, now_ms)
    }

    /// Asks the host for the previous page unless one is already pending.
    ///
    /// Returns `true` if the host was notified.
    pub fn request_previous(&mut self, now_ms: u64) -> bool {
        self.request(PageDirection::Previous, now_ms)
    }

    fn request(&mut self, direction: PageDirection, now_ms: u64) -> bool {
        if self.disposed || !self.pagination.request(direction, now_ms) {
            return false;
        }
        let callback = match direction {
            PageDirection::Next => &self.options.on_request_next,
            PageDirection::Previous => &self.options.on_request_previous,
        };
        if let Some(cb) = callback {
            cb();
        }
        true
    }

    /// Clears a pending flag without notifying the host.
    pub fn clear_pending(&mut self, direction: PageDirection) {
        self.pagination.clear(direction);
    }

    /// Feeds a scroll signal through the rate limiter.
    ///
    /// Returns `true` if a check ran synchronously.
    pub fn on_scroll(&mut self, now_ms: u64) -> bool {
        if self.disposed {
            return false;
        }
        let gate = self.limiter.hit(now_ms);
        vtrace!(now_ms, ?gate, "on_scroll");
        if gate != Gate::Run {
            return false;
        }
        self.check(now_ms);
        true
    }

    /// Feeds the latest authoritative collection.
    ///
    /// The display window is merged immediately. Pending flags are cleared on the next
    /// [`Self::tick`], which also runs a check unless this was the initial load.
    pub fn on_source_collection_changed(&mut self, source: Vec<T>, now_ms: u64) -> Reconciled {
        if self.disposed {
            vwarn!("on_source_collection_changed: engine disposed");
            return Reconciled::default();
        }

        let item_key = &self.options.item_key;
        let result = self
            .reconciler
            .update(source, &mut self.display, |item| item_key(item));

        let keys: KeySet<K> = self
            .reconciler
            .snapshot()
            .unwrap_or(&[])
            .iter()
            .map(|item| item_key(item))
            .collect();
        self.probe.retain(&keys);

        if result.reset {
            self.spacer_height = 0.0;
        }

        self.settle_check |= result.incremental;
        self.timers.schedule(Task::Settle, now_ms, 0);
        result
    }

    /// Runs every timer due at `now_ms`: pending-flag expiry, the post-update settle and the
    /// trailing throttled check.
    pub fn tick(&mut self, now_ms: u64) {
        if self.disposed {
            return;
        }

        self.pagination.poll(now_ms);

        while let Some(task) = self.timers.pop_due(now_ms) {
            match task {
                Task::Settle => {
                    self.pagination.clear_all();
                    if mem::take(&mut self.settle_check) {
                        self.check(now_ms);
                    }
                }
            }
        }

        if self.limiter.poll(now_ms) {
            self.check(now_ms);
        }
    }

    /// The earliest time at which [`Self::tick`] has work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        [
            self.pagination.next_deadline(),
            self.timers.next_deadline(),
            self.limiter.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Stops listening for scroll events, cancels every timer and drops cached item geometry.
    ///
    /// Every later call on the engine is a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        vdebug!("dispose");
        self.probe.viewport(self.layout.page()).listen(false);
        self.pagination.clear_all();
        self.limiter.cancel();
        self.timers.clear();
        self.probe.clear();
        self.settle_check = false;
        self.disposed = true;
    }
}
