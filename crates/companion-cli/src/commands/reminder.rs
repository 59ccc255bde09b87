use std::thread;
use std::time::Duration;

use clap::Subcommand;
use companion_core::reminders::NewReminder;
use companion_core::storage::{Config, Database, ReminderPatch};
use companion_core::timer::TICK_INTERVAL_MS;
use companion_core::ReminderScheduler;

use super::{log_event, open_logbook, CliResult};

#[derive(Subcommand)]
pub enum ReminderAction {
    /// Add a reminder
    Add {
        /// Reminder text, up to 120 characters
        text: String,
        /// Interval in minutes (1-1440)
        #[arg(long)]
        interval: Option<u32>,
        /// Speak the reminder aloud
        #[arg(long)]
        tts: Option<bool>,
        /// Show a desktop notification
        #[arg(long)]
        notify: Option<bool>,
    },
    /// List all reminders
    List,
    /// Edit a reminder
    Edit {
        id: i64,
        #[arg(long)]
        text: Option<String>,
        /// Interval in minutes (1-1440)
        #[arg(long)]
        interval: Option<u32>,
        /// Enable or disable the reminder
        #[arg(long)]
        active: Option<bool>,
        #[arg(long)]
        tts: Option<bool>,
        #[arg(long)]
        notify: Option<bool>,
    },
    /// Remove a reminder
    Remove { id: i64 },
    /// Run the scheduler in the foreground, firing reminders as they come due
    Run,
}

pub fn run(action: ReminderAction) -> CliResult {
    let config = Config::load()?;
    let db = Database::open()?;

    match action {
        ReminderAction::Add {
            text,
            interval,
            tts,
            notify,
        } => {
            let defaults = &config.reminders;
            let reminder = db.create_reminder(&NewReminder {
                text,
                interval_min: interval.unwrap_or(defaults.default_interval_min),
                active: true,
                use_tts: tts.unwrap_or(defaults.use_tts),
                use_notif: notify.unwrap_or(defaults.use_notif),
            })?;
            println!("{}", serde_json::to_string_pretty(&reminder)?);
        }
        ReminderAction::List => {
            let reminders = db.list_reminders()?;
            println!("{}", serde_json::to_string_pretty(&reminders)?);
        }
        ReminderAction::Edit {
            id,
            text,
            interval,
            active,
            tts,
            notify,
        } => {
            let reminder = db.update_reminder(
                id,
                &ReminderPatch {
                    text,
                    interval_min: interval,
                    active,
                    use_tts: tts,
                    use_notif: notify,
                },
            )?;
            println!("{}", serde_json::to_string_pretty(&reminder)?);
        }
        ReminderAction::Remove { id } => {
            db.delete_reminder(id)?;
            println!("ok");
        }
        ReminderAction::Run => {
            let logbook = open_logbook(&config)?;
            let mut scheduler = ReminderScheduler::new();
            scheduler.set_reminders(&db.list_reminders()?);
            if scheduler.trigger_count() == 0 {
                println!("no active reminders");
                return Ok(());
            }
            loop {
                thread::sleep(Duration::from_millis(TICK_INTERVAL_MS));
                for event in scheduler.tick() {
                    log_event(&logbook, &db, &event, 0);
                    println!("{}", serde_json::to_string_pretty(&event)?);
                }
            }
        }
    }
    Ok(())
}
