use alloc::vec::Vec;

/// A keyed set of one-shot deadlines driven by host-supplied timestamps.
///
/// Scheduling under a key replaces whatever was armed under it, so at most one timer per key
/// exists at any time. Nothing runs on its own: the owner calls [`Timers::pop_due`] with the
/// current time and dispatches on the returned key.
#[derive(Clone, Debug)]
pub struct Timers<K> {
    armed: Vec<(K, u64)>,
}

impl<K> Default for Timers<K> {
    fn default() -> Self {
        Self { armed: Vec::new() }
    }
}

impl<K: Copy + Eq> Timers<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms `key` to fire at `now_ms + delay_ms`, cancelling any timer already under `key`.
    pub fn schedule(&mut self, key: K, now_ms: u64, delay_ms: u64) {
        self.cancel(key);
        self.armed.push((key, now_ms.saturating_add(delay_ms)));
    }

    /// Returns `true` if a timer was armed under `key`.
    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.armed.len();
        self.armed.retain(|(k, _)| *k != key);
        self.armed.len() != before
    }

    pub fn clear(&mut self) {
        self.armed.clear();
    }

    pub fn is_scheduled(&self, key: K) -> bool {
        self.armed.iter().any(|(k, _)| *k == key)
    }

    pub fn deadline(&self, key: K) -> Option<u64> {
        self.armed.iter().find(|(k, _)| *k == key).map(|&(_, at)| at)
    }

    /// The earliest armed deadline.
    pub fn next_deadline(&self) -> Option<u64> {
        self.armed.iter().map(|&(_, at)| at).min()
    }

    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }

    /// Removes and returns the earliest timer due at `now_ms`.
    ///
    /// Ties fire in the order they were armed.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<K> {
        let mut best: Option<usize> = None;
        for (i, &(_, at)) in self.armed.iter().enumerate() {
            if at > now_ms {
                continue;
            }
            match best {
                Some(b) if self.armed[b].1 <= at => {}
                _ => best = Some(i),
            }
        }
        best.map(|i| self.armed.remove(i).0)
    }
}
