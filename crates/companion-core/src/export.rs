//! CSV exports.
//!
//! Renders logbook windows, the daily summary and feedback entries as CSV
//! documents. The append-only logbook file itself doubles as the full
//! export; these builders cover the derived views.

use chrono::{DateTime, Utc};

use crate::error::CoreError;
use crate::stats::Summary;
use crate::storage::{EventRecord, FeedbackEntry};

/// Events from the last 24 hours as `timestamp,type,event,value` rows.
pub fn daily_events_csv(records: &[EventRecord]) -> Result<String, CoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["timestamp", "type", "event", "value"])?;
    for r in records {
        writer.write_record([
            r.ts.to_rfc3339().as_str(),
            r.category.as_str(),
            r.event.as_str(),
            r.value.as_str(),
        ])?;
    }
    into_string(writer)
}

/// One-row daily summary with the calculated stats.
pub fn daily_summary_csv(date: DateTime<Utc>, summary: &Summary) -> Result<String, CoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Date",
        "Pomodoros",
        "Stopwatch Sessions",
        "Total Focus Sessions",
        "Focus Minutes",
        "Reminders",
        "Sounds",
        "Hydration",
        "Breaks",
        "Wellness Score",
    ])?;
    writer.write_record([
        date.format("%Y-%m-%d").to_string(),
        summary.pomodoro_count.to_string(),
        summary.stopwatch_count.to_string(),
        summary.focus_sessions.to_string(),
        summary.focus_minutes.to_string(),
        summary.reminder_count.to_string(),
        summary.sound_count.to_string(),
        summary.hydration_count.to_string(),
        summary.break_count.to_string(),
        summary.wellness_score.to_string(),
    ])?;
    into_string(writer)
}

/// Feedback entries as `created_at,mood,text` rows.
pub fn feedback_csv(entries: &[FeedbackEntry]) -> Result<String, CoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["created_at", "mood", "text"])?;
    for entry in entries {
        writer.write_record([
            entry.created_at.to_rfc3339(),
            entry.mood.map(|m| m.to_string()).unwrap_or_default(),
            entry.text.clone(),
        ])?;
    }
    into_string(writer)
}

fn into_string(writer: csv::Writer<Vec<u8>>) -> Result<String, CoreError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Custom(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CoreError::Custom(e.to_string()))
}
