use alloc::sync::Arc;

#[cfg(not(feature = "std"))]
use alloc::collections::{BTreeMap, BTreeSet};
#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};

use crate::Rect;

#[cfg(feature = "std")]
pub(crate) type KeyRectMap<K> = HashMap<K, Rect>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyRectMap<K> = BTreeMap<K, Rect>;

#[cfg(feature = "std")]
pub(crate) type KeySet<K> = HashSet<K>;
#[cfg(not(feature = "std"))]
pub(crate) type KeySet<K> = BTreeSet<K>;

#[cfg(feature = "std")]
#[doc(hidden)]
pub trait KeyCacheKey: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq> KeyCacheKey for K {}

#[cfg(not(feature = "std"))]
#[doc(hidden)]
pub trait KeyCacheKey: Ord {}
#[cfg(not(feature = "std"))]
impl<K: Ord> KeyCacheKey for K {}

/// Reference identity of an `Arc`-shared item.
///
/// Two `ArcKey`s are equal iff they were taken from clones of the same allocation, which is the
/// "same item" notion used when a host hands out shared records rather than values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArcKey(usize);

impl ArcKey {
    pub fn of<T: ?Sized>(item: &Arc<T>) -> Self {
        Self(Arc::as_ptr(item) as *const () as usize)
    }
}
