use crate::Timers;

/// What [`ScrollRateLimiter::hit`] decided for one scroll signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    /// Run a check now.
    Run,
    /// A trailing check was armed; it runs from [`ScrollRateLimiter::poll`].
    Deferred,
    /// A trailing check is already armed and will cover this signal.
    Coalesced,
}

/// Bounds how often scroll signals turn into check cycles.
///
/// The first signal after a quiet period runs immediately; signals inside the window collapse
/// into a single trailing run at the end of it.
#[derive(Clone, Debug)]
pub struct ScrollRateLimiter {
    interval_ms: u64,
    last_run_ms: Option<u64>,
    trailing: Timers<()>,
}

impl ScrollRateLimiter {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_run_ms: None,
            trailing: Timers::new(),
        }
    }

    pub fn hit(&mut self, now_ms: u64) -> Gate {
        let elapsed = self.last_run_ms.map(|last| now_ms.saturating_sub(last));
        match elapsed {
            Some(elapsed) if elapsed < self.interval_ms => {
                if self.trailing.is_scheduled(()) {
                    return Gate::Coalesced;
                }
                self.trailing
                    .schedule((), now_ms, self.interval_ms - elapsed);
                Gate::Deferred
            }
            _ => {
                self.trailing.cancel(());
                self.last_run_ms = Some(now_ms);
                Gate::Run
            }
        }
    }

    /// Returns `true` when the trailing run is due; the caller runs the check.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if self.trailing.pop_due(now_ms).is_none() {
            return false;
        }
        self.last_run_ms = Some(now_ms);
        true
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.trailing.next_deadline()
    }

    pub fn cancel(&mut self) {
        self.trailing.clear();
    }
}
