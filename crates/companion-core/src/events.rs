use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::CyclePhase;

/// Every observable state change produces an Event.
///
/// Sessions never call back into the UI; commands and ticks return event
/// values and the caller decides what to do with them (print, notify, write
/// a logbook entry). Terminal events (`CountdownCompleted`,
/// `StopwatchStopped`, `CycleFinished`) are emitted at most once per
/// session lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    CountdownStarted {
        total_ms: u64,
        at: DateTime<Utc>,
    },
    /// Periodic progress report. Also emitted while paused, re-reporting
    /// the frozen remaining time.
    CountdownTick {
        remaining_ms: u64,
        progress: f64,
        at: DateTime<Utc>,
    },
    CountdownPaused {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    CountdownResumed {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    /// Manual stop; remaining time is discarded, nothing is logged.
    CountdownStopped {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    /// Natural completion; terminal for the session.
    CountdownCompleted {
        total_ms: u64,
        at: DateTime<Utc>,
    },

    StopwatchStarted {
        at: DateTime<Utc>,
    },
    StopwatchTick {
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    StopwatchPaused {
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    StopwatchResumed {
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    /// Final snapshot. `loggable` is false for sub-minute sessions, which
    /// do not count toward focus-time statistics.
    StopwatchStopped {
        elapsed_ms: u64,
        loggable: bool,
        at: DateTime<Utc>,
    },

    PhaseStarted {
        session: u32,
        phase: CyclePhase,
        duration_min: u64,
        at: DateTime<Utc>,
    },
    /// A work phase ran down naturally. The only event that counts toward
    /// the pomodoro-completion metric.
    WorkCompleted {
        session: u32,
        at: DateTime<Utc>,
    },
    /// A work phase was skipped; logged distinctly from completion.
    WorkSkipped {
        session: u32,
        at: DateTime<Utc>,
    },
    BreakCompleted {
        session: u32,
        at: DateTime<Utc>,
    },
    BreakSkipped {
        session: u32,
        at: DateTime<Utc>,
    },
    CycleFinished {
        total_sessions: u32,
        at: DateTime<Utc>,
    },
    CycleStopped {
        at: DateTime<Utc>,
    },

    ReminderFired {
        reminder_id: i64,
        text: String,
        use_tts: bool,
        use_notif: bool,
        at: DateTime<Utc>,
    },
}
