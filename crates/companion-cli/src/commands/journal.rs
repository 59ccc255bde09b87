use clap::Subcommand;
use companion_core::storage::Database;

use super::CliResult;

#[derive(Subcommand)]
pub enum JournalAction {
    /// Add a journal entry
    Add {
        /// Entry body
        content: String,
        /// Optional title
        #[arg(long)]
        title: Option<String>,
    },
    /// List entries, newest first
    List,
    /// Show one entry
    Show { id: i64 },
    /// Edit an entry
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete an entry
    Remove { id: i64 },
}

pub fn run(action: JournalAction) -> CliResult {
    let db = Database::open()?;

    match action {
        JournalAction::Add { content, title } => {
            let entry = db.create_journal(title.as_deref().unwrap_or(""), &content)?;
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        JournalAction::List => {
            let entries = db.list_journals()?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        JournalAction::Show { id } => {
            let entry = db.get_journal(id)?;
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        JournalAction::Edit { id, title, content } => {
            let entry = db.update_journal(id, title.as_deref(), content.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        JournalAction::Remove { id } => {
            db.delete_journal(id)?;
            println!("ok");
        }
    }
    Ok(())
}
