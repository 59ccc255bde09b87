use clap::Subcommand;
use companion_core::export;
use companion_core::storage::Database;

use super::CliResult;

#[derive(Subcommand)]
pub enum FeedbackAction {
    /// Record a feedback entry
    Add {
        /// Feedback text, up to 2000 characters
        text: String,
        /// Optional mood rating
        #[arg(long)]
        mood: Option<i64>,
    },
    /// List all feedback entries
    List,
    /// Export all feedback as CSV
    Export,
}

pub fn run(action: FeedbackAction) -> CliResult {
    let db = Database::open()?;

    match action {
        FeedbackAction::Add { text, mood } => {
            db.add_feedback(mood, &text)?;
            println!("ok");
        }
        FeedbackAction::List => {
            let entries = db.list_feedback()?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        FeedbackAction::Export => {
            let entries = db.list_feedback()?;
            print!("{}", export::feedback_csv(&entries)?);
        }
    }
    Ok(())
}
