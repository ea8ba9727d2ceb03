//! Readiness poll — wait for the host's loading indicator to go away.
//!
//! The host drives the poll by calling `poll` with the current time; a check
//! runs once per interval. Hosts that can tell the guide directly when
//! loading has finished should do so and `cancel` the poll instead.


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Waiting,
    Ready,
    Cancelled,
}


/// Fixed-interval check that completes the first time the page reports
/// it is no longer loading.
#[derive(Debug, Clone)]
pub struct ReadinessPoll {
    interval_ms: u64,
    last_check: Option<u64>,
    state: PollState,
}


impl ReadinessPoll {
    pub fn new(interval_ms: u64) -> Self {
        ReadinessPoll {
            interval_ms,
            last_check: None,
            state: PollState::Waiting,
        }
    }

    /// Whether a check is due at `now_ms`. The first check is due one full
    /// interval after the first call, matching a repeating timer.
    pub fn is_due(&self, now_ms: u64) -> bool {
        if self.state != PollState::Waiting {
            return false;
        }
        match self.last_check {
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms,
            None => false,
        }
    }

    /// Advance the poll. `loading` is consulted only when a check is due.
    /// Returns true exactly once: on the check that sees loading finished.
    pub fn poll(&mut self, now_ms: u64, loading: impl FnOnce() -> bool) -> bool {
        if self.state != PollState::Waiting {
            return false;
        }
        if self.last_check.is_none() {
            self.last_check = Some(now_ms);
            return false;
        }
        if !self.is_due(now_ms) {
            return false;
        }
        self.last_check = Some(now_ms);
        if loading() {
            return false;
        }
        self.state = PollState::Ready;
        true
    }

    /// Complete the poll from an explicit ready signal.
    pub fn resolve(&mut self) -> bool {
        if self.state != PollState::Waiting {
            return false;
        }
        self.state = PollState::Ready;
        true
    }

    /// Stop polling. A cancelled poll never becomes ready.
    pub fn cancel(&mut self) {
        if self.state == PollState::Waiting {
            self.state = PollState::Cancelled;
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
