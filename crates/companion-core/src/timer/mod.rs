//! Timer sessions.
//!
//! All sessions are wall-clock-based state machines with no internal
//! threads. The caller is responsible for calling `tick()` periodically at
//! [`TICK_INTERVAL_MS`]; each tick recomputes elapsed time from the
//! wall-clock delta since the previous tick, so a delayed tick only delays
//! the next progress report and never desynchronizes total elapsed time.

mod countdown;
mod cycle;
mod stopwatch;

pub use countdown::{CountdownSession, SessionState, MIN_DURATION_MIN};
pub use cycle::{CyclePhase, CycleState, PomodoroCycle};
pub use stopwatch::StopwatchSession;

/// Nominal tick interval. Ticks are drift-corrected, so this is a polling
/// cadence, not a unit of time accounting.
pub const TICK_INTERVAL_MS: u64 = 200;

/// Current wall-clock time as epoch milliseconds.
pub(crate) fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
