use std::thread;
use std::time::Duration;

use clap::Subcommand;
use companion_core::storage::{Config, Database};
use companion_core::timer::TICK_INTERVAL_MS;
use companion_core::{CycleState, PomodoroCycle};

use super::{log_event, open_logbook, CliResult};

const CYCLE_KEY: &str = "pomodoro_cycle";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Configure and start a new pomodoro cycle
    Start {
        /// Work/break repeat count
        #[arg(long)]
        sessions: Option<u32>,
        /// Work phase length in minutes
        #[arg(long)]
        work: Option<u64>,
        /// Break phase length in minutes
        #[arg(long = "break")]
        break_min: Option<u64>,
    },
    /// Pause the current phase
    Pause,
    /// Resume a paused phase
    Resume,
    /// Skip the current phase
    Skip,
    /// Abandon the cycle
    Stop,
    /// Print current cycle state as JSON
    Status,
    /// Run the cycle in the foreground, ticking until it finishes
    Watch,
}

fn load_cycle(db: &Database) -> Option<PomodoroCycle> {
    let json = db.kv_get(CYCLE_KEY).ok()??;
    serde_json::from_str(&json).ok()
}

fn save_cycle(db: &Database, cycle: &PomodoroCycle) -> CliResult {
    let json = serde_json::to_string(cycle)?;
    db.kv_set(CYCLE_KEY, &json)?;
    Ok(())
}

fn print_events(events: &[companion_core::Event]) -> CliResult {
    for event in events {
        println!("{}", serde_json::to_string_pretty(event)?);
    }
    Ok(())
}

pub fn run(action: TimerAction) -> CliResult {
    let config = Config::load()?;
    let db = Database::open()?;
    let logbook = open_logbook(&config)?;

    match action {
        TimerAction::Start {
            sessions,
            work,
            break_min,
        } => {
            let mut cycle = PomodoroCycle::new(
                sessions.unwrap_or(config.timer.sessions),
                work.unwrap_or(config.timer.work_min),
                break_min.unwrap_or(config.timer.break_min),
            );
            if let Some(event) = cycle.start() {
                log_event(&logbook, &db, &event, cycle.work_min());
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
            save_cycle(&db, &cycle)?;
        }
        TimerAction::Pause => {
            let mut cycle = load_cycle(&db).ok_or("no cycle running")?;
            if let Some(event) = cycle.pause() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
            save_cycle(&db, &cycle)?;
        }
        TimerAction::Resume => {
            let mut cycle = load_cycle(&db).ok_or("no cycle running")?;
            if let Some(event) = cycle.resume() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
            save_cycle(&db, &cycle)?;
        }
        TimerAction::Skip => {
            let mut cycle = load_cycle(&db).ok_or("no cycle running")?;
            let work_min = cycle.work_min();
            let events = cycle.skip();
            for event in &events {
                log_event(&logbook, &db, event, work_min);
            }
            print_events(&events)?;
            save_cycle(&db, &cycle)?;
        }
        TimerAction::Stop => {
            let mut cycle = load_cycle(&db).ok_or("no cycle running")?;
            if let Some(event) = cycle.stop() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
            save_cycle(&db, &cycle)?;
        }
        TimerAction::Status => match load_cycle(&db) {
            Some(cycle) => println!("{}", serde_json::to_string_pretty(&cycle)?),
            None => println!("{{\"state\": \"idle\"}}"),
        },
        TimerAction::Watch => {
            let mut cycle = load_cycle(&db).ok_or("no cycle running")?;
            let work_min = cycle.work_min();
            while cycle.state() == CycleState::Running {
                thread::sleep(Duration::from_millis(TICK_INTERVAL_MS));
                let events = cycle.tick();
                for event in &events {
                    log_event(&logbook, &db, event, work_min);
                }
                // Ticks are noisy; only surface transitions.
                let transitions: Vec<_> = events
                    .into_iter()
                    .filter(|e| !matches!(e, companion_core::Event::CountdownTick { .. }))
                    .collect();
                print_events(&transitions)?;
            }
            save_cycle(&db, &cycle)?;
        }
    }
    Ok(())
}
