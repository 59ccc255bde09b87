//! Reminder scheduler.
//!
//! Holds one recurring trigger per active reminder, each firing on its own
//! fixed period, with a single global mute switch. Like the timer sessions
//! it has no internal thread; the caller ticks it periodically.
//!
//! Rebuilds are guarded by a generation counter: `set_reminders` bumps the
//! generation and installs a fresh trigger set, and any trigger from an
//! older generation is inert. A stale trigger can therefore never fire
//! after a rebuild begins, without relying on teardown ordering.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::Reminder;
use crate::events::Event;
use crate::timer::now_ms;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Trigger {
    reminder_id: i64,
    text: String,
    use_tts: bool,
    use_notif: bool,
    interval_ms: u64,
    /// Next period boundary, epoch milliseconds.
    next_fire_ms: u64,
    /// Generation this trigger was installed under.
    generation: u64,
}

/// Interval trigger scheduler with a global pause switch.
///
/// Triggers fire independently per reminder; there is no staggering,
/// jitter or catch-up. A fire landing while paused is swallowed and its
/// period advances; it is never queued for later delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderScheduler {
    paused: bool,
    generation: u64,
    triggers: Vec<Trigger>,
}

impl ReminderScheduler {
    pub fn new() -> Self {
        Self {
            paused: false,
            generation: 0,
            triggers: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn set_reminders(&mut self, reminders: &[Reminder]) {
        self.set_reminders_at(reminders, now_ms())
    }

    /// Atomically replace the whole trigger set: one trigger per entry with
    /// `active == true`, each anchored to `now_ms`. This is a full rebuild,
    /// not an incremental update.
    pub fn set_reminders_at(&mut self, reminders: &[Reminder], now_ms: u64) {
        self.generation += 1;
        self.triggers = reminders
            .iter()
            .filter(|r| r.active)
            .map(|r| {
                let interval_ms = u64::from(r.interval_min) * 60_000;
                Trigger {
                    reminder_id: r.id,
                    text: r.text.clone(),
                    use_tts: r.use_tts,
                    use_notif: r.use_notif,
                    interval_ms,
                    next_fire_ms: now_ms + interval_ms,
                    generation: self.generation,
                }
            })
            .collect();
    }

    /// Set the global mute. Underlying triggers keep their periods; fires
    /// landing while paused are dropped in `tick_at`.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.resume_at(now_ms())
    }

    /// Clear the global mute. Every trigger is re-anchored to one full
    /// interval after the resume tick, so the next fire is neither
    /// immediate nor double-counted.
    pub fn resume_at(&mut self, now_ms: u64) {
        if !self.paused {
            return;
        }
        self.paused = false;
        for trigger in &mut self.triggers {
            trigger.next_fire_ms = now_ms + trigger.interval_ms;
        }
    }

    pub fn tick(&mut self) -> Vec<Event> {
        self.tick_at(now_ms())
    }

    /// Call periodically. Returns a fire event per trigger whose period
    /// boundary has passed, at most one per trigger per tick. While paused,
    /// due fires advance their period and are dropped.
    pub fn tick_at(&mut self, now_ms: u64) -> Vec<Event> {
        let generation = self.generation;
        let paused = self.paused;
        let mut fires = Vec::new();
        for trigger in &mut self.triggers {
            if trigger.generation != generation || now_ms < trigger.next_fire_ms {
                continue;
            }
            // Advance past `now`; overdue periods are lost, not replayed.
            while trigger.next_fire_ms <= now_ms {
                trigger.next_fire_ms += trigger.interval_ms;
            }
            if paused {
                continue;
            }
            fires.push(Event::ReminderFired {
                reminder_id: trigger.reminder_id,
                text: trigger.text.clone(),
                use_tts: trigger.use_tts,
                use_notif: trigger.use_notif,
                at: Utc::now(),
            });
        }
        fires
    }
}

impl Default for ReminderScheduler {
    fn default() -> Self {
        Self::new()
    }
}
