use clap::Subcommand;
use companion_core::storage::{
    Database, ProfileMode, ProfileMood, ProfilePatch, ProfileTheme,
};

use super::CliResult;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Create a profile
    Add {
        /// Profile name, up to 50 characters
        name: String,
        /// Mode: study, relax, exam, work or custom
        #[arg(long, default_value = "study")]
        mode: String,
        /// Theme: pastel, gruvbox or catppuccin
        #[arg(long, default_value = "pastel")]
        theme: String,
        /// Mood: focus, cozy or zen
        #[arg(long, default_value = "focus")]
        mood: String,
        /// UI font scale factor
        #[arg(long, default_value = "1.0")]
        font_scale: f64,
    },
    /// List all profiles
    List,
    /// Show the active profile
    Current,
    /// Make a profile the active one
    Activate { id: i64 },
    /// Edit a profile
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        mode: Option<String>,
        #[arg(long)]
        theme: Option<String>,
        #[arg(long)]
        mood: Option<String>,
        #[arg(long)]
        font_scale: Option<f64>,
    },
    /// Delete a profile
    Remove { id: i64 },
}

pub fn run(action: ProfileAction) -> CliResult {
    let db = Database::open()?;

    match action {
        ProfileAction::Add {
            name,
            mode,
            theme,
            mood,
            font_scale,
        } => {
            let profile = db.create_profile(
                &name,
                ProfileMode::parse(&mode),
                ProfileTheme::parse(&theme),
                ProfileMood::parse(&mood),
                font_scale,
            )?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        ProfileAction::List => {
            let profiles = db.list_profiles()?;
            println!("{}", serde_json::to_string_pretty(&profiles)?);
        }
        ProfileAction::Current => match db.active_profile()? {
            Some(profile) => println!("{}", serde_json::to_string_pretty(&profile)?),
            None => println!("null"),
        },
        ProfileAction::Activate { id } => {
            let profile = db.activate_profile(id)?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        ProfileAction::Edit {
            id,
            name,
            mode,
            theme,
            mood,
            font_scale,
        } => {
            let profile = db.update_profile(
                id,
                &ProfilePatch {
                    name,
                    mode: mode.as_deref().map(ProfileMode::parse),
                    theme: theme.as_deref().map(ProfileTheme::parse),
                    mood: mood.as_deref().map(ProfileMood::parse),
                    font_scale,
                },
            )?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        ProfileAction::Remove { id } => {
            db.delete_profile(id)?;
            println!("ok");
        }
    }
    Ok(())
}
