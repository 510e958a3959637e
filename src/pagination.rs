use crate::{PageDirection, PendingState, Timers};

/// The per-direction Idle/Pending state machine.
///
/// A request moves a direction to Pending and arms an auto-clear timer; the timer is a liveness
/// fail-safe for hosts whose fetch failed silently, not a retry. Clearing never notifies anyone.
#[derive(Clone, Debug)]
pub struct PaginationController {
    state: PendingState,
    timers: Timers<PageDirection>,
    timeout_ms: u64,
}

impl PaginationController {
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            state: PendingState::default(),
            timers: Timers::new(),
            timeout_ms,
        }
    }

    pub fn state(&self) -> PendingState {
        self.state
    }

    pub fn is_pending(&self, direction: PageDirection) -> bool {
        self.state.is_pending(direction)
    }

    /// Moves `direction` to Pending.
    ///
    /// Returns `true` on an Idle→Pending transition, i.e. when the host must be notified.
    pub fn request(&mut self, direction: PageDirection, now_ms: u64) -> bool {
        if self.state.is_pending(direction) {
            vtrace!(?direction, "pagination: request suppressed, already pending");
            return false;
        }
        self.state.set(direction, true);
        self.timers.schedule(direction, now_ms, self.timeout_ms);
        vdebug!(?direction, now_ms, "pagination: pending");
        true
    }

    /// Returns `direction` to Idle and cancels its timer.
    pub fn clear(&mut self, direction: PageDirection) {
        self.timers.cancel(direction);
        self.state.set(direction, false);
    }

    pub fn clear_all(&mut self) {
        self.timers.clear();
        self.state = PendingState::default();
    }

    /// Expires every pending flag whose timer is due.
    pub fn poll(&mut self, now_ms: u64) {
        while let Some(direction) = self.timers.pop_due(now_ms) {
            vdebug!(?direction, now_ms, "pagination: pending flag timed out");
            self.state.set(direction, false);
        }
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }
}
