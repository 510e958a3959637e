use alloc::vec::Vec;

use crate::ReplacePolicy;
use crate::key::{KeyCacheKey, KeySet};

/// What a reconcile pass did to the display window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reconciled {
    /// Items inserted before the previous first item.
    pub prepended: usize,
    /// Items inserted after the previous last item.
    pub appended: usize,
    /// Displayed items dropped because they are gone from the new source.
    pub dropped: usize,
    /// The display window was replaced wholesale by the new source.
    pub reset: bool,
    /// Both a previous and a new snapshot existed (not the initial load).
    pub incremental: bool,
}

/// Merges successive source snapshots into the display window.
///
/// Only growth at the head or tail is detected: the previous first item anchors the "before"
/// batch and the previous last item anchors the "after" batch.
#[derive(Clone, Debug)]
pub struct CollectionReconciler<T> {
    snapshot: Option<Vec<T>>,
    policy: ReplacePolicy,
}

impl<T: Clone> CollectionReconciler<T> {
    pub fn new(policy: ReplacePolicy) -> Self {
        Self {
            snapshot: None,
            policy,
        }
    }

    /// The source collection retained from the last update.
    pub fn snapshot(&self) -> Option<&[T]> {
        self.snapshot.as_deref()
    }

    /// Applies `source` to the display `window` and retains it as the new snapshot.
    pub fn update<K: KeyCacheKey>(
        &mut self,
        source: Vec<T>,
        window: &mut Vec<T>,
        item_key: impl Fn(&T) -> K,
    ) -> Reconciled {
        let mut out = Reconciled::default();
        let old = self.snapshot.take();

        let mut before = 0..0;
        let mut after = source.len()..source.len();
        let mut anchored = true;
        if let Some(old) = &old {
            out.incremental = true;
            let first = old.first().map(&item_key);
            let last = old.last().map(&item_key);

            let first_common = first
                .as_ref()
                .and_then(|k| source.iter().position(|it| item_key(it) == *k));
            let last_common = last
                .as_ref()
                .and_then(|k| source.iter().rposition(|it| item_key(it) == *k));

            // A match at index 0 means nothing was prepended.
            if let Some(i) = first_common.filter(|&i| i > 0) {
                before = 0..i;
            }
            if let Some(j) = last_common {
                after = j + 1..source.len();
            }
            anchored = old.is_empty() || first_common.is_some() || last_common.is_some();
        }

        if window.is_empty() {
            window.extend_from_slice(&source);
            out.reset = true;
        } else if !anchored && self.policy == ReplacePolicy::Reset {
            vdebug!(
                displayed = window.len(),
                source_len = source.len(),
                "reconcile: source replaced, resetting display window"
            );
            window.clear();
            window.extend_from_slice(&source);
            out.reset = true;
        } else {
            out.prepended = before.len();
            out.appended = after.len();
            window.splice(0..0, source[before].iter().cloned());
            window.extend_from_slice(&source[after]);

            let keys: KeySet<K> = source.iter().map(&item_key).collect();
            let len = window.len();
            window.retain(|it| keys.contains(&item_key(it)));
            out.dropped = len - window.len();
            if window.is_empty() && !source.is_empty() {
                window.extend_from_slice(&source);
                out.reset = true;
            }
        }

        vdebug!(
            prepended = out.prepended,
            appended = out.appended,
            dropped = out.dropped,
            reset = out.reset,
            incremental = out.incremental,
            "reconcile"
        );

        self.snapshot = Some(source);
        out
    }
}
