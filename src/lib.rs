//! A headless endless-scroll engine.
//!
//! Given a large ordered collection bound to a scrollable region, the engine:
//! - asks the host for the next/previous page as the user approaches either end of the list,
//! - merges newly supplied pages into the displayed items without duplicates or jumps,
//! - culls off-screen items from the render set and reports a spacer height that keeps the total
//!   scroll height stable.
//!
//! It is UI-agnostic. A TUI/GUI/DOM layer is expected to provide:
//! - a [`Viewport`] (scroll offset and visible height of the scrolling region)
//! - a [`Layout`] (container rect and the rects of the rows it rendered)
//! - timestamps (`now_ms`) for scroll signals and periodic [`ScrollEngine::tick`] calls
//!
//! and to render [`ScrollEngine::display_window`] after a leading placeholder of
//! [`ScrollEngine::spacer_height`].
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod culler;
mod engine;
mod error;
mod expression;
mod geometry;
mod key;
mod options;
mod pagination;
mod reconcile;
mod state;
mod status;
mod throttle;
mod timer;
mod types;


pub use culler::{Cull, cull, is_visible, visible_range};
pub use engine::ScrollEngine;
pub use error::Error;
pub use expression::SourceExpression;
pub use geometry::{GeometryProbe, Layout, Viewport};
pub use key::ArcKey;
pub use options::{EngineConfig, EngineOptions, ItemKeyFn, ReplacePolicy, RequestCallback};
pub use pagination::PaginationController;
pub use reconcile::{CollectionReconciler, Reconciled};
pub use state::{PendingState, ViewportState};
pub use status::evaluate as evaluate_scroll_status;
pub use throttle::{Gate, ScrollRateLimiter};
pub use timer::Timers;
pub use types::{PageDirection, Rect, ScrollStatus};

#[doc(hidden)]
pub use key::KeyCacheKey;
