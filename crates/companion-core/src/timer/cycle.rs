//! Pomodoro cycle orchestrator.
//!
//! Sequences alternating work/break countdown sessions for a configured
//! repeat count. Exactly one countdown is active at a time; work and break
//! never run concurrently.
//!
//! ## State Transitions
//!
//! ```text
//! Configured -> Running(session=1, work) -> ... -> Finished
//! ```
//!
//! A work phase always hands off to a break phase, including in the final
//! session: `total_sessions == 1` still runs work -> break -> finished.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::countdown::CountdownSession;
use super::now_ms;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePhase {
    Work,
    Break,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleState {
    Configured,
    Running,
    Finished,
}

/// Work/break cycle orchestrator.
///
/// Owns the countdown for the current phase. Transition events
/// (`WorkCompleted`, `PhaseStarted`, ...) are returned from `tick_at` and
/// `skip_at` as a batch, in occurrence order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroCycle {
    total_sessions: u32,
    work_min: u64,
    break_min: u64,
    state: CycleState,
    /// 1-indexed; increments only on the break -> work transition.
    current_session: u32,
    phase: CyclePhase,
    countdown: CountdownSession,
}

impl PomodoroCycle {
    /// Configure a cycle. All parameters clamp to a minimum of 1.
    pub fn new(total_sessions: u32, work_min: u64, break_min: u64) -> Self {
        Self {
            total_sessions: total_sessions.max(1),
            work_min: work_min.max(1),
            break_min: break_min.max(1),
            state: CycleState::Configured,
            current_session: 1,
            phase: CyclePhase::Work,
            countdown: CountdownSession::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn current_session(&self) -> u32 {
        self.current_session
    }

    pub fn total_sessions(&self) -> u32 {
        self.total_sessions
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    pub fn work_min(&self) -> u64 {
        self.work_min
    }

    pub fn break_min(&self) -> u64 {
        self.break_min
    }

    pub fn countdown(&self) -> &CountdownSession {
        &self.countdown
    }

    fn phase_duration_min(&self, phase: CyclePhase) -> u64 {
        match phase {
            CyclePhase::Work => self.work_min,
            CyclePhase::Break => self.break_min,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.start_at(now_ms())
    }

    /// Begin the first work phase. Only valid from `Configured`.
    pub fn start_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.state != CycleState::Configured {
            return None;
        }
        self.state = CycleState::Running;
        self.current_session = 1;
        self.phase = CyclePhase::Work;
        self.countdown = CountdownSession::new();
        self.countdown.start_at(self.work_min, now_ms);
        Some(Event::PhaseStarted {
            session: 1,
            phase: CyclePhase::Work,
            duration_min: self.work_min,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.pause_at(now_ms())
    }

    pub fn pause_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.state != CycleState::Running {
            return None;
        }
        self.countdown.pause_at(now_ms)
    }

    pub fn resume(&mut self) -> Option<Event> {
        self.resume_at(now_ms())
    }

    pub fn resume_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.state != CycleState::Running {
            return None;
        }
        self.countdown.resume_at(now_ms)
    }

    pub fn tick(&mut self) -> Vec<Event> {
        self.tick_at(now_ms())
    }

    /// Call periodically. Ordinary ticks pass through the countdown's
    /// progress event; a phase completion triggers the phase transition and
    /// returns the transition events in order.
    pub fn tick_at(&mut self, now_ms: u64) -> Vec<Event> {
        if self.state != CycleState::Running {
            return Vec::new();
        }
        match self.countdown.tick_at(now_ms) {
            Some(Event::CountdownCompleted { .. }) => self.advance(now_ms, false),
            Some(event) => vec![event],
            None => Vec::new(),
        }
    }

    pub fn skip(&mut self) -> Vec<Event> {
        self.skip_at(now_ms())
    }

    /// Force the current phase through its completion path immediately.
    /// Emits a skip event rather than a completion event; the distinction
    /// matters for statistics and must not be conflated.
    pub fn skip_at(&mut self, now_ms: u64) -> Vec<Event> {
        if self.state != CycleState::Running {
            return Vec::new();
        }
        self.advance(now_ms, true)
    }

    /// Abort the cycle from any state and return to `Configured`. The
    /// in-progress phase is discarded without logging completion.
    pub fn stop(&mut self) -> Option<Event> {
        if self.state == CycleState::Configured {
            return None;
        }
        self.state = CycleState::Configured;
        self.current_session = 1;
        self.phase = CyclePhase::Work;
        self.countdown = CountdownSession::new();
        Some(Event::CycleStopped { at: Utc::now() })
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Shared transition logic for natural completion and manual skip.
    fn advance(&mut self, now_ms: u64, skipped: bool) -> Vec<Event> {
        let mut events = Vec::new();
        let session = self.current_session;
        let at = Utc::now();
        match self.phase {
            CyclePhase::Work => {
                events.push(if skipped {
                    Event::WorkSkipped { session, at }
                } else {
                    Event::WorkCompleted { session, at }
                });
                self.phase = CyclePhase::Break;
                self.countdown = CountdownSession::new();
                self.countdown.start_at(self.break_min, now_ms);
                events.push(Event::PhaseStarted {
                    session,
                    phase: CyclePhase::Break,
                    duration_min: self.break_min,
                    at: Utc::now(),
                });
            }
            CyclePhase::Break => {
                events.push(if skipped {
                    Event::BreakSkipped { session, at }
                } else {
                    Event::BreakCompleted { session, at }
                });
                if session >= self.total_sessions {
                    self.state = CycleState::Finished;
                    self.countdown = CountdownSession::new();
                    events.push(Event::CycleFinished {
                        total_sessions: self.total_sessions,
                        at: Utc::now(),
                    });
                } else {
                    self.current_session = session + 1;
                    self.phase = CyclePhase::Work;
                    self.countdown = CountdownSession::new();
                    self.countdown.start_at(self.work_min, now_ms);
                    events.push(Event::PhaseStarted {
                        session: self.current_session,
                        phase: CyclePhase::Work,
                        duration_min: self.work_min,
                        at: Utc::now(),
                    });
                }
            }
        }
        events
    }
}
