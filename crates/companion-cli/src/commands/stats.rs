use chrono::Utc;
use clap::Subcommand;
use companion_core::export;
use companion_core::stats::{summarize, StatsRange};
use companion_core::storage::Database;

use super::CliResult;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Aggregated counters and the wellness score
    Show {
        /// Reporting window: "today" or "7d"
        #[arg(long, default_value = "today")]
        range: String,
    },
    /// Events from the last 24 hours as CSV
    ExportDaily,
    /// One-row daily summary as CSV
    ExportSummary,
}

fn parse_range(range: &str) -> Result<StatsRange, Box<dyn std::error::Error>> {
    match range {
        "today" => Ok(StatsRange::Today),
        "7d" => Ok(StatsRange::Last7Days),
        other => Err(format!("unknown range: {other} (expected \"today\" or \"7d\")").into()),
    }
}

pub fn run(action: StatsAction) -> CliResult {
    let db = Database::open()?;
    let now = Utc::now();

    match action {
        StatsAction::Show { range } => {
            let since = parse_range(&range)?.since(now);
            let summary = summarize(&db.events_since(since)?, since);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        StatsAction::ExportDaily => {
            let since = StatsRange::Last24Hours.since(now);
            let records = db.events_since(since)?;
            print!("{}", export::daily_events_csv(&records)?);
        }
        StatsAction::ExportSummary => {
            let since = StatsRange::Today.since(now);
            let summary = summarize(&db.events_since(since)?, since);
            print!("{}", export::daily_summary_csv(now, &summary)?);
        }
    }
    Ok(())
}
