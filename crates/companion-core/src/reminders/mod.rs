//! Wellness reminders.
//!
//! A reminder is owned by the persisted store; the scheduler holds a
//! derived, disposable projection that is fully rebuilt whenever the source
//! list changes.

mod scheduler;

pub use scheduler::ReminderScheduler;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Interval bounds in minutes.
pub const MIN_INTERVAL_MIN: u32 = 1;
pub const MAX_INTERVAL_MIN: u32 = 1440;
/// Maximum reminder text length.
pub const MAX_TEXT_LEN: usize = 120;

/// A persisted reminder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub text: String,
    pub interval_min: u32,
    pub active: bool,
    pub use_tts: bool,
    pub use_notif: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a reminder; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReminder {
    pub text: String,
    pub interval_min: u32,
    pub active: bool,
    pub use_tts: bool,
    pub use_notif: bool,
}

impl Default for NewReminder {
    fn default() -> Self {
        Self {
            text: String::new(),
            interval_min: 30,
            active: true,
            use_tts: true,
            use_notif: false,
        }
    }
}

pub fn validate_text(text: &str) -> Result<(), ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_TEXT_LEN {
        return Err(ValidationError::InvalidValue {
            field: "text",
            message: format!("must be 1..={MAX_TEXT_LEN} characters"),
        });
    }
    Ok(())
}

pub fn validate_interval(interval_min: u32) -> Result<(), ValidationError> {
    if !(MIN_INTERVAL_MIN..=MAX_INTERVAL_MIN).contains(&interval_min) {
        return Err(ValidationError::OutOfRange {
            field: "interval_min",
            min: MIN_INTERVAL_MIN as i64,
            max: MAX_INTERVAL_MIN as i64,
            got: interval_min as i64,
        });
    }
    Ok(())
}
