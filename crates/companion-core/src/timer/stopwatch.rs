//! Stopwatch session implementation.
//!
//! A stopwatch counts up with no fixed endpoint. There is no terminal
//! `Done` state; `stop()` reports the final accumulated snapshot and
//! returns to `Idle`.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{now_ms, SessionState};
use crate::events::Event;

/// Sessions shorter than one minute are not loggable toward focus-time
/// statistics; they still produce a final snapshot.
const LOGGABLE_MIN_MS: u64 = 60_000;

/// Stopwatch state machine.
///
/// Mirrors [`super::CountdownSession`] with accumulation instead of
/// depletion. The `Done` state is never entered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopwatchSession {
    state: SessionState,
    /// Accumulated elapsed time in milliseconds.
    elapsed_ms: u64,
    #[serde(default)]
    last_tick_ms: Option<u64>,
}

impl StopwatchSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            elapsed_ms: 0,
            last_tick_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Whole accumulated minutes.
    pub fn elapsed_min(&self) -> u64 {
        self.elapsed_ms / 60_000
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.start_at(now_ms())
    }

    pub fn start_at(&mut self, now_ms: u64) -> Option<Event> {
        match self.state {
            SessionState::Idle => {
                self.elapsed_ms = 0;
                self.state = SessionState::Running;
                self.last_tick_ms = Some(now_ms);
                Some(Event::StopwatchStarted { at: Utc::now() })
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
                self.flush_elapsed(now_ms);
                self.state = SessionState::Paused;
                self.last_tick_ms = None;
                Some(Event::StopwatchPaused {
                    elapsed_ms: self.elapsed_ms,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn resume(&mut self) -> Option<Event> {
        self.resume_at(now_ms())
    }

    pub fn resume_at(&mut self, now_ms: u64) -> Option<Event> {
        match self.state {
            SessionState::Paused => {
                self.state = SessionState::Running;
                self.last_tick_ms = Some(now_ms);
                Some(Event::StopwatchResumed {
                    elapsed_ms: self.elapsed_ms,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn stop(&mut self) -> Option<Event> {
        self.stop_at(now_ms())
    }

    /// Stop and report the final accumulated value, then reset to zero.
    pub fn stop_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.state == SessionState::Idle {
            return None;
        }
        if self.state == SessionState::Running {
            self.flush_elapsed(now_ms);
        }
        let elapsed_ms = self.elapsed_ms;
        self.state = SessionState::Idle;
        self.elapsed_ms = 0;
        self.last_tick_ms = None;
        Some(Event::StopwatchStopped {
            elapsed_ms,
            loggable: elapsed_ms >= LOGGABLE_MIN_MS,
            at: Utc::now(),
        })
    }

    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(now_ms())
    }

    pub fn tick_at(&mut self, now_ms: u64) -> Option<Event> {
        match self.state {
            SessionState::Running => {
                self.flush_elapsed(now_ms);
                Some(Event::StopwatchTick {
                    elapsed_ms: self.elapsed_ms,
                    at: Utc::now(),
                })
            }
            SessionState::Paused => Some(Event::StopwatchTick {
                elapsed_ms: self.elapsed_ms,
                at: Utc::now(),
            }),
            _ => None,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn flush_elapsed(&mut self, now_ms: u64) {
        if let Some(last) = self.last_tick_ms {
            let elapsed = now_ms.saturating_sub(last);
            self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed);
            self.last_tick_ms = Some(now_ms);
        }
    }
}

impl Default for StopwatchSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_elapsed_time() {
        let mut s = StopwatchSession::new();
        s.start_at(0);
        s.tick_at(200);
        s.tick_at(1_000);
        assert_eq!(s.elapsed_ms(), 1_000);
    }

    #[test]
    fn pause_freezes_elapsed() {
        let mut s = StopwatchSession::new();
        s.start_at(0);
        s.pause_at(5_000);
        assert_eq!(s.elapsed_ms(), 5_000);
        s.tick_at(20_000);
        assert_eq!(s.elapsed_ms(), 5_000);
        s.resume_at(20_000);
        s.tick_at(25_000);
        assert_eq!(s.elapsed_ms(), 10_000);
    }

    #[test]
    fn stop_reports_final_value_and_resets() {
        let mut s = StopwatchSession::new();
        s.start_at(0);
        s.tick_at(90_000);
        match s.stop_at(120_000) {
            Some(Event::StopwatchStopped {
                elapsed_ms,
                loggable,
                ..
            }) => {
                assert_eq!(elapsed_ms, 120_000);
                assert!(loggable);
            }
            other => panic!("expected stopped, got {other:?}"),
        }
        assert_eq!(s.state(), SessionState::Idle);
        assert_eq!(s.elapsed_ms(), 0);
    }

    #[test]
    fn sub_minute_session_is_not_loggable() {
        let mut s = StopwatchSession::new();
        s.start_at(0);
        match s.stop_at(59_000) {
            Some(Event::StopwatchStopped { loggable, .. }) => assert!(!loggable),
            other => panic!("expected stopped, got {other:?}"),
        }
    }

    #[test]
    fn wrong_state_commands_are_noops() {
        let mut s = StopwatchSession::new();
        assert!(s.pause_at(0).is_none());
        assert!(s.resume_at(0).is_none());
        assert!(s.stop_at(0).is_none());
        s.start_at(0);
        assert!(s.start_at(100).is_none());
        assert!(s.resume_at(100).is_none());
    }
}
