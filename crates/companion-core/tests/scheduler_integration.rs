//! Integration tests for the reminder scheduler against the reminder store.

use chrono::Utc;
use companion_core::events::Event;
use companion_core::reminders::{NewReminder, Reminder, ReminderScheduler};
use companion_core::storage::Database;

fn reminder(id: i64, text: &str, interval_min: u32) -> Reminder {
    Reminder {
        id,
        text: text.to_string(),
        interval_min,
        active: true,
        use_tts: true,
        use_notif: false,
        created_at: Utc::now(),
    }
}

fn fired_ids(events: &[Event]) -> Vec<i64> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::ReminderFired { reminder_id, .. } => Some(*reminder_id),
            _ => None,
        })
        .collect()
}

#[test]
fn rebuild_drops_removed_reminders_before_they_fire() {
    let mut sched = ReminderScheduler::new();
    sched.set_reminders_at(&[reminder(1, "water", 1), reminder(2, "stretch", 2)], 0);

    // Remove reminder 1 just before its first fire would be due.
    sched.set_reminders_at(&[reminder(2, "stretch", 2)], 59_000);

    let mut fired = Vec::new();
    for now in (0..=180_000).step_by(200) {
        fired.extend(sched.tick_at(now));
    }
    // Only reminder 2 ever fires, re-anchored to the rebuild instant.
    assert_eq!(fired_ids(&fired), vec![2]);
    match &fired[0] {
        Event::ReminderFired { text, .. } => assert_eq!(text, "stretch"),
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn edits_take_effect_through_a_rebuild() {
    let mut sched = ReminderScheduler::new();
    sched.set_reminders_at(&[reminder(1, "water", 5)], 0);

    // Shorten the interval at t=60s; the next fire moves to t=120s.
    sched.set_reminders_at(&[reminder(1, "water", 1)], 60_000);

    let mut first_fire = None;
    for now in (60_000..=300_000u64).step_by(200) {
        if !sched.tick_at(now).is_empty() {
            first_fire = Some(now);
            break;
        }
    }
    assert_eq!(first_fire, Some(120_000));
}

#[test]
fn global_pause_spans_multiple_periods_without_backlog() {
    let mut sched = ReminderScheduler::new();
    sched.set_reminders_at(&[reminder(1, "water", 1)], 0);

    sched.pause();
    let mut fired = Vec::new();
    for now in (0..=240_000u64).step_by(200) {
        fired.extend(sched.tick_at(now));
    }
    assert!(fired.is_empty());

    sched.resume_at(240_000);
    let mut first_fire = None;
    for now in (240_000..=360_000u64).step_by(200) {
        if !sched.tick_at(now).is_empty() {
            first_fire = Some(now);
            break;
        }
    }
    // One full interval after resume, not a burst of missed fires.
    assert_eq!(first_fire, Some(300_000));
}

#[test]
fn scheduler_follows_the_reminder_store() {
    let db = Database::open_memory().expect("open db");
    let a = db
        .create_reminder(&NewReminder {
            text: "drink water".to_string(),
            interval_min: 1,
            ..NewReminder::default()
        })
        .expect("add");
    let b = db
        .create_reminder(&NewReminder {
            text: "stand up".to_string(),
            interval_min: 2,
            ..NewReminder::default()
        })
        .expect("add");

    let mut sched = ReminderScheduler::new();
    sched.set_reminders_at(&db.list_reminders().expect("list"), 0);

    let mut fired = Vec::new();
    for now in (0..=120_000u64).step_by(200) {
        fired.extend(sched.tick_at(now));
    }
    let ids = fired_ids(&fired);
    assert_eq!(ids.iter().filter(|&&id| id == a.id).count(), 2);
    assert_eq!(ids.iter().filter(|&&id| id == b.id).count(), 1);

    // Deactivate the short reminder and rebuild; only the other survives.
    db.update_reminder(
        a.id,
        &companion_core::storage::ReminderPatch {
            active: Some(false),
            ..Default::default()
        },
    )
    .expect("update");
    sched.set_reminders_at(&db.list_reminders().expect("list"), 120_000);

    let mut fired = Vec::new();
    for now in (120_000..=300_000u64).step_by(200) {
        fired.extend(sched.tick_at(now));
    }
    assert_eq!(fired_ids(&fired), vec![b.id]);
}
