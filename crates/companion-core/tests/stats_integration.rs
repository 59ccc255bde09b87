//! End-to-end: logbook records flow into the database, out through the
//! aggregator, and into the export CSVs.

use chrono::{Duration, Utc};
use companion_core::export;
use companion_core::stats::{summarize, StatsRange};
use companion_core::storage::{Database, Logbook};

fn logbook(dir: &tempfile::TempDir) -> Logbook {
    Logbook::new(dir.path().join("logs.csv"), true)
}

#[test]
fn a_focus_day_scores_through_the_pipeline() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = Database::open_memory().expect("open db");
    let log = logbook(&dir);

    // One pomodoro, one stopwatch hour, a couple of wellness reminders.
    log.record(&db, "timer", "pomodoro_start", "");
    log.record(&db, "timer", "pomodoro_count", "1");
    log.record(&db, "timer", "focus_minutes", "25");
    log.record(&db, "timer", "stopwatch_start", "");
    log.record(&db, "timer", "stopwatch_count", "1");
    log.record(&db, "timer", "focus_minutes", "60");
    log.record(&db, "reminder", "fire", "Hydrate!");
    log.record(&db, "reminder", "fire", "Stand up and stretch");
    log.record(&db, "sound", "play", "rain");

    let now = Utc::now();
    let records = db.events_since(StatsRange::Today.since(now)).expect("events");
    assert_eq!(records.len(), 9);

    let summary = summarize(&records, StatsRange::Today.since(now));
    assert_eq!(summary.focus_sessions, 2);
    assert_eq!(summary.focus_minutes, 85);
    assert_eq!(summary.pomodoro_count, 1);
    assert_eq!(summary.stopwatch_count, 1);
    assert_eq!(summary.hydration_count, 1);
    assert_eq!(summary.break_count, 1);
    assert_eq!(summary.sound_count, 1);
    // 20 sessions + 5 hydration + 5 break + 20 minutes (85/25 = 3, capped)
    assert_eq!(summary.wellness_score, 50);

    let csv = export::daily_summary_csv(now, &summary).expect("summary csv");
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Date,Pomodoros,Stopwatch Sessions,Total Focus Sessions,Focus Minutes,\
         Reminders,Sounds,Hydration,Breaks,Wellness Score"
    );
    assert_eq!(
        lines.next().unwrap(),
        format!("{},1,1,2,85,2,1,1,1,50", now.format("%Y-%m-%d"))
    );
}

#[test]
fn logbook_mirrors_to_csv_and_database() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = Database::open_memory().expect("open db");
    let log = logbook(&dir);

    log.record(&db, "timer", "pomodoro_start", "");
    log.record(&db, "reminder", "fire", "Hydrate!");

    let csv = std::fs::read_to_string(log.path()).expect("read csv");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "timestamp,type,event,value");
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains(",timer,pomodoro_start,"));
    assert!(lines[2].contains(",reminder,fire,Hydrate!"));

    let records = db
        .events_since(Utc::now() - Duration::hours(1))
        .expect("events");
    assert_eq!(records.len(), 2);
}

#[test]
fn events_export_includes_every_window_record() {
    let db = Database::open_memory().expect("open db");
    db.append_event("timer", "pomodoro_start", "").expect("append");
    db.append_event("sound", "play", "rain").expect("append");

    let records = db
        .events_since(Utc::now() - Duration::hours(1))
        .expect("events");
    let csv = export::daily_events_csv(&records).expect("events csv");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "timestamp,type,event,value");
    assert_eq!(lines.len(), 3);
}

#[test]
fn empty_window_exports_header_only() {
    let db = Database::open_memory().expect("open db");
    let records = db
        .events_since(Utc::now() - Duration::hours(1))
        .expect("events");
    let summary = summarize(&records, Utc::now() - Duration::hours(1));
    assert_eq!(summary.wellness_score, 0);

    let csv = export::daily_events_csv(&records).expect("events csv");
    assert_eq!(csv.lines().count(), 1);
}
