use clap::Subcommand;
use companion_core::storage::{Config, Database};
use companion_core::StopwatchSession;

use super::{log_event, open_logbook, CliResult};

const STOPWATCH_KEY: &str = "stopwatch";

#[derive(Subcommand)]
pub enum StopwatchAction {
    /// Start counting up from zero
    Start,
    /// Pause the stopwatch
    Pause,
    /// Resume a paused stopwatch
    Resume,
    /// Stop and log the elapsed focus time
    Stop,
    /// Print current stopwatch state as JSON
    Status,
}

fn load_stopwatch(db: &Database) -> StopwatchSession {
    if let Ok(Some(json)) = db.kv_get(STOPWATCH_KEY) {
        if let Ok(session) = serde_json::from_str(&json) {
            return session;
        }
    }
    StopwatchSession::new()
}

fn save_stopwatch(db: &Database, session: &StopwatchSession) -> CliResult {
    let json = serde_json::to_string(session)?;
    db.kv_set(STOPWATCH_KEY, &json)?;
    Ok(())
}

pub fn run(action: StopwatchAction) -> CliResult {
    let config = Config::load()?;
    let db = Database::open()?;
    let logbook = open_logbook(&config)?;
    let mut session = load_stopwatch(&db);

    let event = match action {
        StopwatchAction::Start => session.start(),
        StopwatchAction::Pause => session.pause(),
        StopwatchAction::Resume => session.resume(),
        StopwatchAction::Stop => session.stop(),
        StopwatchAction::Status => {
            println!("{}", serde_json::to_string_pretty(&session)?);
            return Ok(());
        }
    };

    if let Some(event) = event {
        log_event(&logbook, &db, &event, 0);
        println!("{}", serde_json::to_string_pretty(&event)?);
    }
    save_stopwatch(&db, &session)?;
    Ok(())
}
