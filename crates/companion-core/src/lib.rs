//! # Companion Core Library
//!
//! This library provides the core logic for Ambient Companion, a personal
//! focus and wellness tool. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary, with any dashboard
//! being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Timer sessions**: wall-clock-based state machines (countdown,
//!   stopwatch, Pomodoro cycle) that require the caller to periodically
//!   invoke `tick()` for progress updates
//! - **Reminder scheduler**: interval triggers with a global pause switch,
//!   rebuilt wholesale from the persisted reminder list
//! - **Storage**: SQLite store for events, reminders, journals, profiles
//!   and feedback, plus TOML-based configuration
//! - **Stats**: event aggregation and the wellness score
//!
//! ## Key Components
//!
//! - [`CountdownSession`] / [`StopwatchSession`]: single-session state machines
//! - [`PomodoroCycle`]: work/break orchestrator
//! - [`ReminderScheduler`]: recurring reminder triggers
//! - [`Database`]: persistence and the event logbook backing store
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod export;
pub mod reminders;
pub mod stats;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use reminders::{Reminder, ReminderScheduler};
pub use stats::{StatsRange, Summary};
pub use storage::{Config, Database, Logbook};
pub use timer::{
    CountdownSession, CyclePhase, CycleState, PomodoroCycle, SessionState, StopwatchSession,
};
