use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "companion-cli", version, about = "Ambient companion CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pomodoro cycle control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Free-running stopwatch control
    Stopwatch {
        #[command(subcommand)]
        action: commands::stopwatch::StopwatchAction,
    },
    /// Wellness reminder management
    Reminder {
        #[command(subcommand)]
        action: commands::reminder::ReminderAction,
    },
    /// Journal entries
    Journal {
        #[command(subcommand)]
        action: commands::journal::JournalAction,
    },
    /// Profile management
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Activity statistics and exports
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Mood feedback
    Feedback {
        #[command(subcommand)]
        action: commands::feedback::FeedbackAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Append a logbook entry by hand
    Log {
        /// Event category (e.g. "timer", "reminder")
        category: String,
        /// Event name
        event: String,
        /// Free-form value
        #[arg(default_value = "")]
        value: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Stopwatch { action } => commands::stopwatch::run(action),
        Commands::Reminder { action } => commands::reminder::run(action),
        Commands::Journal { action } => commands::journal::run(action),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Feedback { action } => commands::feedback::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Log {
            category,
            event,
            value,
        } => commands::log(&category, &event, &value),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
