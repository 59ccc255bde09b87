//! SQLite-backed store.
//!
//! Provides persistent storage for:
//! - The event logbook (`events` table, mirrored from the CSV logbook)
//! - Reminders, journals, profiles and feedback
//! - A key-value store used by the CLI to persist session state
//!
//! The schema is created with `CREATE TABLE IF NOT EXISTS` on open; there
//! is no migration framework.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{CoreError, DatabaseError, ValidationError};
use crate::reminders::{validate_interval, validate_text, NewReminder, Reminder};

/// One `(category, event, value)` logbook entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub ts: DateTime<Utc>,
    pub category: String,
    pub event: String,
    pub value: String,
}

/// A long-form journal note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileMode {
    Study,
    Relax,
    Exam,
    Work,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileTheme {
    Pastel,
    Gruvbox,
    Catppuccin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileMood {
    Focus,
    Cozy,
    Zen,
}

impl ProfileMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileMode::Study => "study",
            ProfileMode::Relax => "relax",
            ProfileMode::Exam => "exam",
            ProfileMode::Work => "work",
            ProfileMode::Custom => "custom",
        }
    }

    /// Unknown values fall back to the default mode.
    pub fn parse(s: &str) -> Self {
        match s {
            "relax" => ProfileMode::Relax,
            "exam" => ProfileMode::Exam,
            "work" => ProfileMode::Work,
            "custom" => ProfileMode::Custom,
            _ => ProfileMode::Study,
        }
    }
}

impl ProfileTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileTheme::Pastel => "pastel",
            ProfileTheme::Gruvbox => "gruvbox",
            ProfileTheme::Catppuccin => "catppuccin",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "gruvbox" => ProfileTheme::Gruvbox,
            "catppuccin" => ProfileTheme::Catppuccin,
            _ => ProfileTheme::Pastel,
        }
    }
}

impl ProfileMood {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileMood::Focus => "focus",
            ProfileMood::Cozy => "cozy",
            ProfileMood::Zen => "zen",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "cozy" => ProfileMood::Cozy,
            "zen" => ProfileMood::Zen,
            _ => ProfileMood::Focus,
        }
    }
}

/// A user profile. Exactly one profile is active at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub mode: ProfileMode,
    pub theme: ProfileTheme,
    pub mood: ProfileMood,
    pub font_scale: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Partial update for a profile; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub mode: Option<ProfileMode>,
    pub theme: Option<ProfileTheme>,
    pub mood: Option<ProfileMood>,
    pub font_scale: Option<f64>,
}

/// Partial update for a reminder; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ReminderPatch {
    pub text: Option<String>,
    pub interval_min: Option<u32>,
    pub active: Option<bool>,
    pub use_tts: Option<bool>,
    pub use_notif: Option<bool>,
}

/// A mood/feedback entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub id: i64,
    pub mood: Option<i64>,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

const MAX_PROFILE_NAME_LEN: usize = 50;
const MAX_FEEDBACK_TEXT_LEN: usize = 2000;

/// SQLite store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/companion/companion.db`.
    ///
    /// Creates the database file and schema if they don't exist, and seeds
    /// a default profile when none are present.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or initialized.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("companion.db");
        Self::open_at(&path)
    }

    /// Open the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, CoreError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Open an in-memory database (tests and ephemeral use).
    pub fn open_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<(), CoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS events (
                id       INTEGER PRIMARY KEY AUTOINCREMENT,
                ts       TEXT NOT NULL,
                category TEXT NOT NULL,
                event    TEXT NOT NULL,
                value    TEXT NOT NULL DEFAULT ''
            );

            CREATE TABLE IF NOT EXISTS reminders (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                text         TEXT NOT NULL,
                interval_min INTEGER NOT NULL,
                active       INTEGER NOT NULL DEFAULT 1,
                use_tts      INTEGER NOT NULL DEFAULT 1,
                use_notif    INTEGER NOT NULL DEFAULT 0,
                created_at   TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS journals (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                title      TEXT NOT NULL DEFAULT '',
                content    TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS profiles (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                name       TEXT NOT NULL,
                mode       TEXT NOT NULL,
                theme      TEXT NOT NULL,
                mood       TEXT NOT NULL,
                font_scale REAL NOT NULL DEFAULT 1.0,
                is_active  INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS feedback (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                mood       INTEGER,
                text       TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_events_ts ON events(ts);
            CREATE INDEX IF NOT EXISTS idx_events_category ON events(category);",
        ).map_err(DatabaseError::from)?;

        // Seed a default profile so there is always an active one.
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM profiles", [], |row| row.get(0))
            .map_err(DatabaseError::from)?;
        if count == 0 {
            self.conn
                .execute(
                    "INSERT INTO profiles (name, mode, theme, mood, font_scale, is_active, created_at)
                     VALUES ('Default', 'study', 'pastel', 'focus', 1.0, 1, ?1)",
                    params![Utc::now().to_rfc3339()],
                )
                .map_err(DatabaseError::from)?;
        }
        Ok(())
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Append a `(category, event, value)` triple to the events table.
    pub fn append_event(&self, category: &str, event: &str, value: &str) -> Result<(), CoreError> {
        let category = if category.is_empty() { "info" } else { category };
        self.conn
            .execute(
                "INSERT INTO events (ts, category, event, value) VALUES (?1, ?2, ?3, ?4)",
                params![Utc::now().to_rfc3339(), category, event, value],
            )
            .map_err(DatabaseError::from)?;
        Ok(())
    }

    /// All events at or after `since`, oldest first. Rows with unparseable
    /// timestamps are skipped rather than failing the query.
    pub fn events_since(&self, since: DateTime<Utc>) -> Result<Vec<EventRecord>, CoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT ts, category, event, value FROM events WHERE ts >= ?1 ORDER BY id")
            .map_err(DatabaseError::from)?;
        let rows = stmt
            .query_map(params![since.to_rfc3339()], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })
            .map_err(DatabaseError::from)?;

        let mut records = Vec::new();
        for row in rows {
            let (ts, category, event, value) = row.map_err(DatabaseError::from)?;
            if let Ok(ts) = DateTime::parse_from_rfc3339(&ts) {
                records.push(EventRecord {
                    ts: ts.with_timezone(&Utc),
                    category,
                    event,
                    value,
                });
            }
        }
        Ok(records)
    }

    // ── Reminders ────────────────────────────────────────────────────

    pub fn create_reminder(&self, new: &NewReminder) -> Result<Reminder, CoreError> {
        validate_text(&new.text)?;
        validate_interval(new.interval_min)?;
        self.conn
            .execute(
                "INSERT INTO reminders (text, interval_min, active, use_tts, use_notif, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    new.text.trim(),
                    new.interval_min,
                    new.active,
                    new.use_tts,
                    new.use_notif,
                    Utc::now().to_rfc3339(),
                ],
            )
            .map_err(DatabaseError::from)?;
        self.get_reminder(self.conn.last_insert_rowid())
    }

    pub fn get_reminder(&self, id: i64) -> Result<Reminder, CoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, text, interval_min, active, use_tts, use_notif, created_at
                 FROM reminders WHERE id = ?1",
            )
            .map_err(DatabaseError::from)?;
        stmt.query_row(params![id], reminder_from_row)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => CoreError::Database(
                    DatabaseError::NotFound {
                        entity: "reminder",
                        id,
                    },
                ),
                e => CoreError::Database(e.into()),
            })
    }

    /// All reminders, newest first.
    pub fn list_reminders(&self) -> Result<Vec<Reminder>, CoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, text, interval_min, active, use_tts, use_notif, created_at
                 FROM reminders ORDER BY id DESC",
            )
            .map_err(DatabaseError::from)?;
        let rows = stmt
            .query_map([], reminder_from_row)
            .map_err(DatabaseError::from)?;
        collect_rows(rows)
    }

    pub fn update_reminder(&self, id: i64, patch: &ReminderPatch) -> Result<Reminder, CoreError> {
        // Validate before touching the row.
        if let Some(text) = &patch.text {
            validate_text(text)?;
        }
        if let Some(interval) = patch.interval_min {
            validate_interval(interval)?;
        }
        let current = self.get_reminder(id)?;
        self.conn
            .execute(
                "UPDATE reminders SET text = ?1, interval_min = ?2, active = ?3,
                 use_tts = ?4, use_notif = ?5 WHERE id = ?6",
                params![
                    patch.text.as_deref().map(str::trim).unwrap_or(&current.text),
                    patch.interval_min.unwrap_or(current.interval_min),
                    patch.active.unwrap_or(current.active),
                    patch.use_tts.unwrap_or(current.use_tts),
                    patch.use_notif.unwrap_or(current.use_notif),
                    id,
                ],
            )
            .map_err(DatabaseError::from)?;
        self.get_reminder(id)
    }

    pub fn delete_reminder(&self, id: i64) -> Result<(), CoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM reminders WHERE id = ?1", params![id])
            .map_err(DatabaseError::from)?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                entity: "reminder",
                id,
            }
            .into());
        }
        Ok(())
    }

    // ── Journals ─────────────────────────────────────────────────────

    pub fn create_journal(&self, title: &str, content: &str) -> Result<JournalEntry, CoreError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "content",
                message: "content required".into(),
            }
            .into());
        }
        let now = Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO journals (title, content, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?3)",
                params![title.trim(), content, now],
            )
            .map_err(DatabaseError::from)?;
        self.get_journal(self.conn.last_insert_rowid())
    }

    pub fn get_journal(&self, id: i64) -> Result<JournalEntry, CoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, title, content, created_at, updated_at FROM journals WHERE id = ?1",
            )
            .map_err(DatabaseError::from)?;
        stmt.query_row(params![id], journal_from_row)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => CoreError::Database(
                    DatabaseError::NotFound {
                        entity: "journal",
                        id,
                    },
                ),
                e => CoreError::Database(e.into()),
            })
    }

    pub fn list_journals(&self) -> Result<Vec<JournalEntry>, CoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, title, content, created_at, updated_at
                 FROM journals ORDER BY id DESC",
            )
            .map_err(DatabaseError::from)?;
        let rows = stmt
            .query_map([], journal_from_row)
            .map_err(DatabaseError::from)?;
        collect_rows(rows)
    }

    pub fn update_journal(
        &self,
        id: i64,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<JournalEntry, CoreError> {
        if let Some(content) = content {
            if content.trim().is_empty() {
                return Err(ValidationError::InvalidValue {
                    field: "content",
                    message: "content required".into(),
                }
                .into());
            }
        }
        let current = self.get_journal(id)?;
        self.conn
            .execute(
                "UPDATE journals SET title = ?1, content = ?2, updated_at = ?3 WHERE id = ?4",
                params![
                    title.map(str::trim).unwrap_or(&current.title),
                    content.map(str::trim).unwrap_or(&current.content),
                    Utc::now().to_rfc3339(),
                    id,
                ],
            )
            .map_err(DatabaseError::from)?;
        self.get_journal(id)
    }

    pub fn delete_journal(&self, id: i64) -> Result<(), CoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM journals WHERE id = ?1", params![id])
            .map_err(DatabaseError::from)?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                entity: "journal",
                id,
            }
            .into());
        }
        Ok(())
    }

    // ── Profiles ─────────────────────────────────────────────────────

    pub fn create_profile(
        &self,
        name: &str,
        mode: ProfileMode,
        theme: ProfileTheme,
        mood: ProfileMood,
        font_scale: f64,
    ) -> Result<Profile, CoreError> {
        let name = name.trim();
        if name.is_empty() || name.len() > MAX_PROFILE_NAME_LEN {
            return Err(ValidationError::InvalidValue {
                field: "name",
                message: format!("must be 1..={MAX_PROFILE_NAME_LEN} characters"),
            }
            .into());
        }
        self.conn
            .execute(
                "INSERT INTO profiles (name, mode, theme, mood, font_scale, is_active, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)",
                params![
                    name,
                    mode.as_str(),
                    theme.as_str(),
                    mood.as_str(),
                    font_scale,
                    Utc::now().to_rfc3339(),
                ],
            )
            .map_err(DatabaseError::from)?;
        self.get_profile(self.conn.last_insert_rowid())
    }

    pub fn get_profile(&self, id: i64) -> Result<Profile, CoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, name, mode, theme, mood, font_scale, is_active, created_at
                 FROM profiles WHERE id = ?1",
            )
            .map_err(DatabaseError::from)?;
        stmt.query_row(params![id], profile_from_row)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => CoreError::Database(
                    DatabaseError::NotFound {
                        entity: "profile",
                        id,
                    },
                ),
                e => CoreError::Database(e.into()),
            })
    }

    /// All profiles, active first.
    pub fn list_profiles(&self) -> Result<Vec<Profile>, CoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, name, mode, theme, mood, font_scale, is_active, created_at
                 FROM profiles ORDER BY is_active DESC, id DESC",
            )
            .map_err(DatabaseError::from)?;
        let rows = stmt
            .query_map([], profile_from_row)
            .map_err(DatabaseError::from)?;
        collect_rows(rows)
    }

    pub fn active_profile(&self) -> Result<Option<Profile>, CoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, name, mode, theme, mood, font_scale, is_active, created_at
                 FROM profiles WHERE is_active = 1 LIMIT 1",
            )
            .map_err(DatabaseError::from)?;
        match stmt.query_row([], profile_from_row) {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(CoreError::Database(e.into())),
        }
    }

    /// Make `id` the single active profile.
    pub fn activate_profile(&self, id: i64) -> Result<Profile, CoreError> {
        self.get_profile(id)?;
        self.conn
            .execute("UPDATE profiles SET is_active = 0", [])
            .map_err(DatabaseError::from)?;
        self.conn
            .execute(
                "UPDATE profiles SET is_active = 1 WHERE id = ?1",
                params![id],
            )
            .map_err(DatabaseError::from)?;
        self.get_profile(id)
    }

    pub fn update_profile(&self, id: i64, patch: &ProfilePatch) -> Result<Profile, CoreError> {
        if let Some(name) = &patch.name {
            let name = name.trim();
            if name.is_empty() || name.len() > MAX_PROFILE_NAME_LEN {
                return Err(ValidationError::InvalidValue {
                    field: "name",
                    message: format!("must be 1..={MAX_PROFILE_NAME_LEN} characters"),
                }
                .into());
            }
        }
        let current = self.get_profile(id)?;
        self.conn
            .execute(
                "UPDATE profiles SET name = ?1, mode = ?2, theme = ?3, mood = ?4, font_scale = ?5
                 WHERE id = ?6",
                params![
                    patch.name.as_deref().map(str::trim).unwrap_or(&current.name),
                    patch.mode.unwrap_or(current.mode).as_str(),
                    patch.theme.unwrap_or(current.theme).as_str(),
                    patch.mood.unwrap_or(current.mood).as_str(),
                    patch.font_scale.unwrap_or(current.font_scale),
                    id,
                ],
            )
            .map_err(DatabaseError::from)?;
        self.get_profile(id)
    }

    /// Delete a profile. The last remaining profile and the active profile
    /// cannot be deleted.
    pub fn delete_profile(&self, id: i64) -> Result<(), CoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM profiles", [], |row| row.get(0))
            .map_err(DatabaseError::from)?;
        if count <= 1 {
            return Err(ValidationError::InvalidValue {
                field: "profile",
                message: "cannot delete the last profile".into(),
            }
            .into());
        }
        let profile = self.get_profile(id)?;
        if profile.is_active {
            return Err(ValidationError::InvalidValue {
                field: "profile",
                message: "cannot delete the active profile".into(),
            }
            .into());
        }
        self.conn
            .execute("DELETE FROM profiles WHERE id = ?1", params![id])
            .map_err(DatabaseError::from)?;
        Ok(())
    }

    // ── Feedback ─────────────────────────────────────────────────────

    pub fn add_feedback(&self, mood: Option<i64>, text: &str) -> Result<(), CoreError> {
        let text = text.trim();
        if text.len() > MAX_FEEDBACK_TEXT_LEN {
            return Err(ValidationError::InvalidValue {
                field: "text",
                message: format!("must be at most {MAX_FEEDBACK_TEXT_LEN} characters"),
            }
            .into());
        }
        self.conn
            .execute(
                "INSERT INTO feedback (mood, text, created_at) VALUES (?1, ?2, ?3)",
                params![mood, text, Utc::now().to_rfc3339()],
            )
            .map_err(DatabaseError::from)?;
        Ok(())
    }

    /// All feedback entries, newest first.
    pub fn list_feedback(&self) -> Result<Vec<FeedbackEntry>, CoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, mood, text, created_at FROM feedback ORDER BY id DESC")
            .map_err(DatabaseError::from)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(FeedbackEntry {
                    id: row.get(0)?,
                    mood: row.get(1)?,
                    text: row.get(2)?,
                    created_at: parse_ts(row, 3)?,
                })
            })
            .map_err(DatabaseError::from)?;
        collect_rows(rows)
    }

    // ── Key-value store ──────────────────────────────────────────────

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM kv WHERE key = ?1")
            .map_err(DatabaseError::from)?;
        match stmt.query_row(params![key], |row| row.get::<_, String>(0)) {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(CoreError::Database(e.into())),
        }
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                params![key, value],
            )
            .map_err(DatabaseError::from)?;
        Ok(())
    }
}

fn parse_ts(row: &Row<'_>, idx: usize) -> Result<DateTime<Utc>, rusqlite::Error> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

fn reminder_from_row(row: &Row<'_>) -> Result<Reminder, rusqlite::Error> {
    Ok(Reminder {
        id: row.get(0)?,
        text: row.get(1)?,
        interval_min: row.get(2)?,
        active: row.get(3)?,
        use_tts: row.get(4)?,
        use_notif: row.get(5)?,
        created_at: parse_ts(row, 6)?,
    })
}

fn journal_from_row(row: &Row<'_>) -> Result<JournalEntry, rusqlite::Error> {
    Ok(JournalEntry {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        created_at: parse_ts(row, 3)?,
        updated_at: parse_ts(row, 4)?,
    })
}

fn profile_from_row(row: &Row<'_>) -> Result<Profile, rusqlite::Error> {
    Ok(Profile {
        id: row.get(0)?,
        name: row.get(1)?,
        mode: ProfileMode::parse(&row.get::<_, String>(2)?),
        theme: ProfileTheme::parse(&row.get::<_, String>(3)?),
        mood: ProfileMood::parse(&row.get::<_, String>(4)?),
        font_scale: row.get(5)?,
        is_active: row.get(6)?,
        created_at: parse_ts(row, 7)?,
    })
}

fn collect_rows<T>(
    rows: impl Iterator<Item = Result<T, rusqlite::Error>>,
) -> Result<Vec<T>, CoreError> {
    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(DatabaseError::from)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn events_append_and_query_window() {
        let db = Database::open_memory().unwrap();
        db.append_event("timer", "pomodoro_start", "").unwrap();
        db.append_event("", "noise", "x").unwrap();
        let records = db.events_since(Utc::now() - Duration::hours(1)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].category, "timer");
        // Empty categories default to "info".
        assert_eq!(records[1].category, "info");

        let future = db.events_since(Utc::now() + Duration::hours(1)).unwrap();
        assert!(future.is_empty());
    }

    #[test]
    fn reminder_crud_round_trip() {
        let db = Database::open_memory().unwrap();
        let created = db
            .create_reminder(&NewReminder {
                text: "drink water".into(),
                interval_min: 30,
                ..NewReminder::default()
            })
            .unwrap();
        assert!(created.active);

        let updated = db
            .update_reminder(
                created.id,
                &ReminderPatch {
                    interval_min: Some(45),
                    active: Some(false),
                    ..ReminderPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.interval_min, 45);
        assert!(!updated.active);
        assert_eq!(updated.text, "drink water");

        db.delete_reminder(created.id).unwrap();
        assert!(db.list_reminders().unwrap().is_empty());
        assert!(db.delete_reminder(created.id).is_err());
    }

    #[test]
    fn reminder_validation_rejects_bad_input() {
        let db = Database::open_memory().unwrap();
        assert!(db
            .create_reminder(&NewReminder {
                text: "".into(),
                ..NewReminder::default()
            })
            .is_err());
        assert!(db
            .create_reminder(&NewReminder {
                text: "ok".into(),
                interval_min: 0,
                ..NewReminder::default()
            })
            .is_err());
    }

    #[test]
    fn journal_requires_content() {
        let db = Database::open_memory().unwrap();
        assert!(db.create_journal("title", "  ").is_err());
        let entry = db.create_journal("", "wrote some thoughts").unwrap();
        let updated = db
            .update_journal(entry.id, Some("day one"), None)
            .unwrap();
        assert_eq!(updated.title, "day one");
        assert_eq!(updated.content, "wrote some thoughts");
        assert!(db.update_journal(entry.id, None, Some(" ")).is_err());
    }

    #[test]
    fn default_profile_is_seeded_and_guarded() {
        let db = Database::open_memory().unwrap();
        let active = db.active_profile().unwrap().expect("seeded profile");
        assert_eq!(active.name, "Default");
        // The last profile cannot be deleted.
        assert!(db.delete_profile(active.id).is_err());
    }

    #[test]
    fn activation_is_exclusive() {
        let db = Database::open_memory().unwrap();
        let second = db
            .create_profile(
                "Deep Work",
                ProfileMode::Work,
                ProfileTheme::Gruvbox,
                ProfileMood::Zen,
                1.2,
            )
            .unwrap();
        assert!(!second.is_active);
        db.activate_profile(second.id).unwrap();
        let profiles = db.list_profiles().unwrap();
        assert_eq!(profiles.iter().filter(|p| p.is_active).count(), 1);
        assert!(profiles[0].is_active);
        assert_eq!(profiles[0].id, second.id);
        // Now the active profile is guarded instead.
        assert!(db.delete_profile(second.id).is_err());
    }

    #[test]
    fn unknown_profile_strings_fall_back() {
        assert_eq!(ProfileMode::parse("unknown"), ProfileMode::Study);
        assert_eq!(ProfileTheme::parse("unknown"), ProfileTheme::Pastel);
        assert_eq!(ProfileMood::parse("unknown"), ProfileMood::Focus);
    }

    #[test]
    fn feedback_length_limit() {
        let db = Database::open_memory().unwrap();
        db.add_feedback(Some(4), "went well").unwrap();
        assert!(db.add_feedback(None, &"x".repeat(2001)).is_err());
        let entries = db.list_feedback().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].mood, Some(4));
    }

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("cycle").unwrap().is_none());
        db.kv_set("cycle", "{}").unwrap();
        assert_eq!(db.kv_get("cycle").unwrap().unwrap(), "{}");
    }
}
