use alloc::string::String;
use alloc::sync::Arc;

use crate::{ArcKey, Viewport};

/// A callback fired when the engine asks the host for another page.
///
/// It fires once per Idle→Pending transition of the corresponding direction.
pub type RequestCallback = Arc<dyn Fn() + Send + Sync>;

/// Maps an item to the identity used for edge detection, merging and geometry lookups.
pub type ItemKeyFn<T, K> = Arc<dyn Fn(&T) -> K + Send + Sync>;

/// What the reconciler does when a new source shares no anchor with the previous one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReplacePolicy {
    /// Replace the display window with the new source when neither the previous first item nor
    /// the previous last item occurs in it.
    #[default]
    Reset,
    /// Only ever prepend/append. Items gone from the source are still dropped.
    Merge,
}

/// Plain-data tuning knobs.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize` and missing fields
/// fall back to their defaults, so it can be embedded in a host's config file.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Distance from the container edge at which a page request triggers.
    ///
    /// Negative values trigger before the physical edge is reached.
    pub edge_offset: f64,
    /// Minimum interval between scroll-driven check cycles.
    pub scroll_throttle_ms: u64,
    /// How long a pending flag may stay set before it clears itself.
    pub pending_timeout_ms: u64,
    pub replace_policy: ReplacePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            edge_offset: -100.0,
            scroll_throttle_ms: 300,
            pending_timeout_ms: 5000,
            replace_policy: ReplacePolicy::Reset,
        }
    }
}

/// Configuration for [`crate::ScrollEngine`].
///
/// Closures and the viewport are stored in `Arc`s, so cloning is cheap.
pub struct EngineOptions<T, K = T> {
    pub config: EngineConfig,
    /// A non-page scroll region. `None` measures against [`crate::Layout::page`].
    pub viewport: Option<Arc<dyn Viewport>>,
    pub item_key: ItemKeyFn<T, K>,
    pub on_request_next: Option<RequestCallback>,
    pub on_request_previous: Option<RequestCallback>,
    /// Optional `item in collection [track by expr]` binding expression, validated by
    /// `ScrollEngine::new` and exposed to binders through `ScrollEngine::source_expression`.
    pub source_expression: Option<String>,
}

impl<T, K> Clone for EngineOptions<T, K> {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            viewport: self.viewport.clone(),
            item_key: Arc::clone(&self.item_key),
            on_request_next: self.on_request_next.clone(),
            on_request_previous: self.on_request_previous.clone(),
            source_expression: self.source_expression.clone(),
        }
    }
}

impl<K: Clone + 'static> EngineOptions<K, K> {
    /// Options for items that are their own identity (ids, interned handles, small values).
    pub fn new() -> Self {
        Self::new_with_key(|item: &K| item.clone())
    }
}

impl<K: Clone + 'static> Default for EngineOptions<K, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized + 'static> EngineOptions<Arc<T>, ArcKey> {
    /// Options for `Arc`-shared items compared by reference identity.
    pub fn new_shared() -> Self {
        Self::new_with_key(ArcKey::of)
    }
}

impl<T, K> EngineOptions<T, K> {
    /// Creates options with a custom identity mapping.
    ///
    /// `item_key` must return the same key for the same logical item across source updates.
    pub fn new_with_key(item_key: impl Fn(&T) -> K + Send + Sync + 'static) -> Self {
        Self {
            config: EngineConfig::default(),
            viewport: None,
            item_key: Arc::new(item_key),
            on_request_next: None,
            on_request_previous: None,
            source_expression: None,
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_edge_offset(mut self, edge_offset: f64) -> Self {
        self.config.edge_offset = edge_offset;
        self
    }

    pub fn with_scroll_throttle_ms(mut self, throttle_ms: u64) -> Self {
        self.config.scroll_throttle_ms = throttle_ms;
        self
    }

    pub fn with_pending_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.pending_timeout_ms = timeout_ms;
        self
    }

    pub fn with_replace_policy(mut self, policy: ReplacePolicy) -> Self {
        self.config.replace_policy = policy;
        self
    }

    /// Measures against a custom scroll region instead of the page.
    pub fn with_viewport(mut self, viewport: Option<Arc<dyn Viewport>>) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_on_request_next(
        mut self,
        on_request_next: Option<impl Fn() + Send + Sync + 'static>,
    ) -> Self {
        self.on_request_next = on_request_next.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_request_previous(
        mut self,
        on_request_previous: Option<impl Fn() + Send + Sync + 'static>,
    ) -> Self {
        self.on_request_previous = on_request_previous.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_source_expression(mut self, expression: impl Into<String>) -> Self {
        self.source_expression = Some(expression.into());
        self
    }
}

impl<T, K> core::fmt::Debug for EngineOptions<T, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EngineOptions")
            .field("config", &self.config)
            .field("has_custom_viewport", &self.viewport.is_some())
            .field("source_expression", &self.source_expression)
            .finish_non_exhaustive()
    }
}
