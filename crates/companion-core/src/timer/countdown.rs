//! Countdown session implementation.
//!
//! A countdown counts down from a fixed duration to zero (a Pomodoro work
//! or break phase). It operates on wall-clock deltas -- no internal thread.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused -> Done
//! ```
//!
//! `stop()` returns to `Idle` from any non-idle state.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::now_ms;
use crate::events::Event;

/// Durations below one minute are clamped up so a session can never be
/// zero-length and instantly complete.
pub const MIN_DURATION_MIN: u64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Running,
    Paused,
    Done,
}

/// Countdown timer state machine.
///
/// Commands return `Option<Event>`; a command issued in the wrong state is
/// a silent no-op returning `None`. The terminal `CountdownCompleted` event
/// is emitted exactly once per session lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownSession {
    state: SessionState,
    /// Target duration in milliseconds.
    total_ms: u64,
    /// Remaining time in milliseconds, floored at zero.
    remaining_ms: u64,
    /// Timestamp (ms since epoch) of the last charged tick. `None` unless
    /// running.
    #[serde(default)]
    last_tick_ms: Option<u64>,
}

impl CountdownSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            total_ms: 0,
            remaining_ms: 0,
            last_tick_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    /// 0.0 .. 1.0 progress toward completion.
    pub fn progress(&self) -> f64 {
        if self.total_ms == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_ms as f64 / self.total_ms as f64)
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self, duration_min: u64) -> Option<Event> {
        self.start_at(duration_min, now_ms())
    }

    /// Start a countdown of `duration_min` minutes, clamped to at least
    /// [`MIN_DURATION_MIN`]. Only valid from `Idle` or `Done`.
    pub fn start_at(&mut self, duration_min: u64, now_ms: u64) -> Option<Event> {
        match self.state {
            SessionState::Idle | SessionState::Done => {
                let minutes = duration_min.max(MIN_DURATION_MIN);
                self.total_ms = minutes.saturating_mul(60_000);
                self.remaining_ms = self.total_ms;
                self.state = SessionState::Running;
                self.last_tick_ms = Some(now_ms);
                Some(Event::CountdownStarted {
                    total_ms: self.total_ms,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.pause_at(now_ms())
    }

    pub fn pause_at(&mut self, now_ms: u64) -> Option<Event> {
        match self.state {
            SessionState::Running => {
                // Charge elapsed time up to the pause instant.
                self.flush_elapsed(now_ms);
                self.state = SessionState::Paused;
                self.last_tick_ms = None;
                Some(Event::CountdownPaused {
                    remaining_ms: self.remaining_ms,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn resume(&mut self) -> Option<Event> {
        self.resume_at(now_ms())
    }

    /// Resume from `Paused`. Resets the tick anchor so the paused interval
    /// is never charged as elapsed time.
    pub fn resume_at(&mut self, now_ms: u64) -> Option<Event> {
        match self.state {
            SessionState::Paused => {
                self.state = SessionState::Running;
                self.last_tick_ms = Some(now_ms);
                Some(Event::CountdownResumed {
                    remaining_ms: self.remaining_ms,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Force `Idle` and discard remaining time. The caller decides whether
    /// anything gets logged; a manual stop never counts as completion.
    pub fn stop(&mut self) -> Option<Event> {
        if self.state == SessionState::Idle {
            return None;
        }
        let remaining_ms = self.remaining_ms;
        self.state = SessionState::Idle;
        self.total_ms = 0;
        self.remaining_ms = 0;
        self.last_tick_ms = None;
        Some(Event::CountdownStopped {
            remaining_ms,
            at: Utc::now(),
        })
    }

    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(now_ms())
    }

    /// Call periodically. While running, subtracts the wall-clock delta and
    /// reports progress; on reaching zero, transitions to `Done` and emits
    /// the terminal event. While paused, re-reports progress without
    /// subtracting time. No-op otherwise.
    pub fn tick_at(&mut self, now_ms: u64) -> Option<Event> {
        match self.state {
            SessionState::Running => {
                self.flush_elapsed(now_ms);
                if self.remaining_ms == 0 {
                    self.state = SessionState::Done;
                    self.last_tick_ms = None;
                    return Some(Event::CountdownCompleted {
                        total_ms: self.total_ms,
                        at: Utc::now(),
                    });
                }
                Some(Event::CountdownTick {
                    remaining_ms: self.remaining_ms,
                    progress: self.progress(),
                    at: Utc::now(),
                })
            }
            SessionState::Paused => Some(Event::CountdownTick {
                remaining_ms: self.remaining_ms,
                progress: self.progress(),
                at: Utc::now(),
            }),
            _ => None,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn flush_elapsed(&mut self, now_ms: u64) {
        if let Some(last) = self.last_tick_ms {
            let elapsed = now_ms.saturating_sub(last);
            self.remaining_ms = self.remaining_ms.saturating_sub(elapsed);
            self.last_tick_ms = Some(now_ms);
        }
    }
}

impl Default for CountdownSession {
    fn default() -> Self {
        Self::new()
    }
}
