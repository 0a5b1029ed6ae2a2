// Copyright 2025 the Travelmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marker enter/exit transitions.
//!
//! Every marker handle moves through a small state machine:
//!
//! ```text
//! Entering ──(enter delay)──▶ Active ──(deselected)──▶ Exiting ──(exit delay)──▶ Removed
//! ```
//!
//! A marker that is deselected while still entering goes straight to
//! `Exiting`. How long each timed phase lasts is decided by a
//! [`TransitionScheduler`]; completions are queued in a [`TimerQueue`] and
//! fired when the host advances time. Queue entries are keyed by
//! [`MarkerId`], never by photo identity, so a completion that fires late can
//! only ever touch the marker it was scheduled for.

use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::{Ordering, Reverse};

use crate::MarkerId;

/// Lifecycle phase of a marker handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerPhase {
    /// Freshly created; the enter animation is running.
    Entering,
    /// Fully shown.
    Active,
    /// Deselected; the exit animation is running.
    Exiting,
    /// Detached from the render layer. Terminal.
    Removed,
}

impl MarkerPhase {
    /// Returns the phase that follows a completed timed phase.
    ///
    /// `Active` and `Removed` are not timed and return `None`.
    #[must_use]
    pub fn completed(self) -> Option<Self> {
        match self {
            Self::Entering => Some(Self::Active),
            Self::Exiting => Some(Self::Removed),
            Self::Active | Self::Removed => None,
        }
    }
}

/// Decides how long timed phases last.
///
/// Implementations must be deterministic for a given phase; the sampler calls
/// this once per transition it starts.
pub trait TransitionScheduler {
    /// Returns the duration of `phase` in milliseconds, or `None` to complete
    /// it immediately.
    fn delay(&self, phase: MarkerPhase) -> Option<u64>;
}

/// Completes every transition immediately.
///
/// Useful for headless hosts and tests where there is nothing to animate.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateTransitions;

impl TransitionScheduler for ImmediateTransitions {
    fn delay(&self, _phase: MarkerPhase) -> Option<u64> {
        None
    }
}

/// Fixed enter and exit durations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedDelay {
    /// Enter animation length in milliseconds.
    pub enter_ms: u64,
    /// Exit animation length in milliseconds.
    pub exit_ms: u64,
}

impl FixedDelay {
    /// Creates a scheduler with the given enter and exit durations.
    #[must_use]
    pub const fn new(enter_ms: u64, exit_ms: u64) -> Self {
        Self { enter_ms, exit_ms }
    }
}

impl Default for FixedDelay {
    /// A short fade: 20 ms to let the enter class apply, 300 ms exit.
    fn default() -> Self {
        Self::new(20, 300)
    }
}

impl TransitionScheduler for FixedDelay {
    fn delay(&self, phase: MarkerPhase) -> Option<u64> {
        let ms = match phase {
            MarkerPhase::Entering => self.enter_ms,
            MarkerPhase::Exiting => self.exit_ms,
            MarkerPhase::Active | MarkerPhase::Removed => return None,
        };
        (ms > 0).then_some(ms)
    }
}

/// A queued phase completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timer {
    /// Time at which the phase completes, in milliseconds.
    pub deadline: u64,
    /// Marker the completion belongs to.
    pub marker: MarkerId,
    /// Phase that completes at the deadline.
    pub phase: MarkerPhase,
    seq: u64,
}

impl Ord for Timer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.deadline
            .cmp(&other.deadline)
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Deadline-ordered queue of phase completions.
///
/// Timers with equal deadlines fire in the order they were pushed. The queue
/// does not know whether a marker still exists; consumers must treat timers
/// for unknown markers as stale.
#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<Timer>>,
    next_seq: u64,
}

impl TimerQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `phase` of `marker` to complete at `deadline`.
    pub fn push(&mut self, deadline: u64, marker: MarkerId, phase: MarkerPhase) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Timer {
            deadline,
            marker,
            phase,
            seq,
        }));
    }

    /// Removes and returns every timer due at or before `now`, earliest first.
    pub fn pop_due(&mut self, now: u64) -> Vec<Timer> {
        let mut due = Vec::new();
        while let Some(Reverse(timer)) = self.heap.peek() {
            if timer.deadline > now {
                break;
            }
            if let Some(Reverse(timer)) = self.heap.pop() {
                due.push(timer);
            }
        }
        due
    }

    /// Returns the earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse(t)| t.deadline)
    }

    /// Returns the number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if no timer is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drops every pending timer.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
