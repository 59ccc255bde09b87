pub mod config;
pub mod feedback;
pub mod journal;
pub mod profile;
pub mod reminder;
pub mod stats;
pub mod stopwatch;
pub mod timer;

use companion_core::storage::{Config, Database, Logbook};
use companion_core::Event;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the logbook with the CSV sink toggled per config.
pub(crate) fn open_logbook(config: &Config) -> Result<Logbook, Box<dyn std::error::Error>> {
    Ok(Logbook::new(Logbook::default_path()?, config.logbook_csv))
}

/// Translate a timer/reminder event into its logbook triples.
///
/// Completed work sessions also log their focus minutes so the daily
/// wellness score picks them up; sub-minute stopwatch runs log nothing.
pub(crate) fn log_event(log: &Logbook, db: &Database, event: &Event, work_min: u64) {
    match event {
        Event::PhaseStarted {
            phase: companion_core::CyclePhase::Work,
            ..
        } => log.record(db, "timer", "pomodoro_start", ""),
        Event::WorkCompleted { .. } => {
            log.record(db, "timer", "pomodoro_complete", "");
            log.record(db, "timer", "pomodoro_count", "1");
            log.record(db, "timer", "focus_minutes", &work_min.to_string());
        }
        Event::WorkSkipped { .. } => log.record(db, "timer", "pomodoro_skip", ""),
        Event::BreakCompleted { .. } => log.record(db, "timer", "break_complete", ""),
        Event::BreakSkipped { .. } => log.record(db, "timer", "break_skip", ""),
        Event::CycleFinished { total_sessions, .. } => {
            log.record(db, "timer", "cycle_finish", &total_sessions.to_string())
        }
        Event::StopwatchStarted { .. } => log.record(db, "timer", "stopwatch_start", ""),
        Event::StopwatchStopped {
            elapsed_ms,
            loggable: true,
            ..
        } => {
            log.record(db, "timer", "stopwatch_count", "1");
            log.record(
                db,
                "timer",
                "focus_minutes",
                &(elapsed_ms / 60_000).to_string(),
            );
        }
        Event::ReminderFired { text, .. } => log.record(db, "reminder", "fire", text),
        _ => {}
    }
}

/// `companion-cli log <category> <event> [value]`
pub fn log(category: &str, event: &str, value: &str) -> CliResult {
    let config = Config::load()?;
    let db = Database::open()?;
    let logbook = open_logbook(&config)?;
    logbook.record(&db, category, event, value);
    println!("ok");
    Ok(())
}
