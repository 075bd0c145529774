// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debounce state machine.
//!
//! ## States
//!
//! ```text
//!            request            begin (now >= deadline)
//!   Idle ──────────────▶ Pending ───────────────────────▶ Running
//!    ▲                    │  ▲ request: coalesced            │
//!    │                    └──┘                               │ request: dropped
//!    └───────────────────────────── finish ◀─────────────────┘
//! ```
//!
//! Only one deadline is ever stored. Re-requesting while pending does not
//! push the deadline back: the first request in a burst decides when the run
//! happens. Requests made while running are dropped rather than queued, so a
//! run can never schedule itself.

/// Current state of a [`Debouncer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DebounceState {
    /// Nothing scheduled.
    #[default]
    Idle,
    /// A run is scheduled for `deadline` (milliseconds).
    Pending {
        /// Time at or after which the run may begin.
        deadline: u64,
    },
    /// A run is in progress.
    Running,
}

/// What happened to a call to [`Debouncer::request`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A new deadline was armed.
    Armed,
    /// A run was already pending; the request was folded into it.
    Coalesced,
    /// A run is in progress; the request was discarded.
    Dropped,
}

/// Coalesces bursts of requests into a single delayed run.
#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    delay: u64,
    state: DebounceState,
}

impl Debouncer {
    /// Creates an idle debouncer with the given delay in milliseconds.
    #[must_use]
    pub fn new(delay: u64) -> Self {
        Self {
            delay,
            state: DebounceState::Idle,
        }
    }

    /// Returns the configured delay in milliseconds.
    #[must_use]
    pub fn delay(&self) -> u64 {
        self.delay
    }

    /// Changes the delay used for future requests.
    ///
    /// An already pending deadline is left untouched.
    pub fn set_delay(&mut self, delay: u64) {
        self.delay = delay;
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> DebounceState {
        self.state
    }

    /// Returns `true` when nothing is pending or running.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == DebounceState::Idle
    }

    /// Returns `true` while a run is in progress.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == DebounceState::Running
    }

    /// Returns the pending deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        match self.state {
            DebounceState::Pending { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Requests a run at `now + delay`.
    pub fn request(&mut self, now: u64) -> RequestOutcome {
        match self.state {
            DebounceState::Idle => {
                self.state = DebounceState::Pending {
                    deadline: now.saturating_add(self.delay),
                };
                RequestOutcome::Armed
            }
            DebounceState::Pending { .. } => RequestOutcome::Coalesced,
            DebounceState::Running => RequestOutcome::Dropped,
        }
    }

    /// Returns `true` when a pending run's deadline has been reached.
    #[must_use]
    pub fn is_due(&self, now: u64) -> bool {
        matches!(self.state, DebounceState::Pending { deadline } if now >= deadline)
    }

    /// Enters [`DebounceState::Running`] if a pending run is due.
    ///
    /// Returns `false` (and changes nothing) when nothing is due.
    pub fn begin(&mut self, now: u64) -> bool {
        if self.is_due(now) {
            self.state = DebounceState::Running;
            true
        } else {
            false
        }
    }

    /// Enters [`DebounceState::Running`] immediately, absorbing any pending
    /// request.
    ///
    /// Returns `false` if a run is already in progress.
    pub fn begin_now(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = DebounceState::Running;
        true
    }

    /// Leaves [`DebounceState::Running`] and returns to idle.
    ///
    /// Calling this in any other state is a no-op.
    pub fn finish(&mut self) {
        if self.is_running() {
            self.state = DebounceState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DebounceState, Debouncer, RequestOutcome};

    #[test]
    fn burst_is_coalesced_into_one_deadline() {
        let mut d = Debouncer::new(100);
        assert_eq!(d.request(0), RequestOutcome::Armed);
        for t in 1..50 {
            assert_eq!(d.request(t), RequestOutcome::Coalesced);
        }
        // The first request of the burst decides the deadline.
        assert_eq!(d.deadline(), Some(100));
    }

    #[test]
    fn begin_waits_for_deadline() {
        let mut d = Debouncer::new(100);
        d.request(10);
        assert!(!d.is_due(109));
        assert!(!d.begin(109));
        assert_eq!(d.state(), DebounceState::Pending { deadline: 110 });
        assert!(d.begin(110));
        assert!(d.is_running());
    }

    #[test]
    fn requests_while_running_are_dropped() {
        let mut d = Debouncer::new(100);
        d.request(0);
        assert!(d.begin(100));
        assert_eq!(d.request(100), RequestOutcome::Dropped);
        d.finish();
        assert!(d.is_idle());
        assert_eq!(d.deadline(), None);
    }

    #[test]
    fn request_after_window_schedules_second_run() {
        let mut d = Debouncer::new(100);
        d.request(0);
        assert!(d.begin(150));
        d.finish();
        assert_eq!(d.request(200), RequestOutcome::Armed);
        assert_eq!(d.deadline(), Some(300));
    }

    #[test]
    fn begin_now_absorbs_pending_and_rejects_reentry() {
        let mut d = Debouncer::new(100);
        d.request(0);
        assert!(d.begin_now());
        assert!(!d.begin_now());
        d.finish();
        assert!(d.is_idle());
    }

    #[test]
    fn finish_outside_run_is_noop() {
        let mut d = Debouncer::new(100);
        d.request(0);
        d.finish();
        assert_eq!(d.deadline(), Some(100));
    }

    #[test]
    fn zero_delay_is_due_immediately() {
        let mut d = Debouncer::new(0);
        d.request(42);
        assert!(d.begin(42));
    }

    #[test]
    fn deadline_saturates() {
        let mut d = Debouncer::new(100);
        d.request(u64::MAX - 1);
        assert_eq!(d.deadline(), Some(u64::MAX));
    }
}
