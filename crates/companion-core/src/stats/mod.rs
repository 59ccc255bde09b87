//! Statistics over the event logbook.
//!
//! Aggregates `(category, event, value)` records into daily/weekly counts
//! and the wellness score. Aggregation is deterministic and tolerant of
//! malformed values (unparseable numbers are skipped, not errors).

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::EventRecord;

/// Reporting window for [`summarize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsRange {
    Today,
    /// Rolling 24-hour window, used by the daily events export.
    #[serde(rename = "24h")]
    Last24Hours,
    #[serde(rename = "7d")]
    Last7Days,
}

impl StatsRange {
    /// Inclusive lower bound of the window relative to `now`.
    pub fn since(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            StatsRange::Today => Utc
                .with_ymd_and_hms(now.year(), now.month(), now.day(), 0, 0, 0)
                .single()
                .unwrap_or(now),
            StatsRange::Last24Hours => now - Duration::hours(24),
            StatsRange::Last7Days => now - Duration::days(7),
        }
    }
}

/// Aggregated counters for one reporting window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    pub totals: HashMap<String, u64>,
    pub focus_minutes: u64,
    pub focus_sessions: u64,
    pub pomodoro_count: u64,
    pub stopwatch_count: u64,
    pub reminder_count: u64,
    pub sound_count: u64,
    pub hydration_count: u64,
    pub break_count: u64,
    pub wellness_score: u64,
}

/// Aggregate records at or after `since` into a [`Summary`].
pub fn summarize(records: &[EventRecord], since: DateTime<Utc>) -> Summary {
    let mut s = Summary::default();
    for r in records {
        if r.ts < since {
            continue;
        }
        if !r.category.is_empty() {
            *s.totals.entry(r.category.clone()).or_insert(0) += 1;
        }
        match r.event.as_str() {
            "focus_minutes" => s.focus_minutes += parse_count(&r.value),
            "pomodoro_count" => s.pomodoro_count += parse_count(&r.value),
            "stopwatch_count" => s.stopwatch_count += parse_count(&r.value),
            _ => {}
        }
        if r.category == "timer"
            && matches!(r.event.as_str(), "pomodoro_start" | "stopwatch_start" | "start")
        {
            s.focus_sessions += 1;
        }
        if r.category == "reminder" {
            s.reminder_count += 1;
            let value = r.value.to_lowercase();
            if value.contains("hydrat") {
                s.hydration_count += 1;
            }
            if value.contains("break") || value.contains("stretch") || value.contains("stand") {
                s.break_count += 1;
            }
        }
        if r.category == "sound" && r.event == "play" {
            s.sound_count += 1;
        }
    }
    s.wellness_score = wellness_score(
        s.focus_sessions,
        s.hydration_count,
        s.break_count,
        s.focus_minutes,
    );
    s
}

/// Weighted wellness score, 0-100.
///
/// Focus sessions contribute up to 30 points (10 each), hydration and
/// break reminders up to 25 each (5 per event), and every 25 focus minutes
/// adds 10 points up to 20.
pub fn wellness_score(
    focus_sessions: u64,
    hydration_count: u64,
    break_count: u64,
    focus_minutes: u64,
) -> u64 {
    let mut score = 0;
    if focus_sessions > 0 {
        score += (focus_sessions * 10).min(30);
    }
    if hydration_count > 0 {
        score += (hydration_count * 5).min(25);
    }
    if break_count > 0 {
        score += (break_count * 5).min(25);
    }
    if focus_minutes >= 25 {
        score += ((focus_minutes / 25) * 10).min(20);
    }
    score.min(100)
}

/// Values are free-form strings; accept integers and floats, skip garbage.
fn parse_count(value: &str) -> u64 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: &str, event: &str, value: &str, ts: DateTime<Utc>) -> EventRecord {
        EventRecord {
            ts,
            category: category.into(),
            event: event.into(),
            value: value.into(),
        }
    }

    #[test]
    fn score_is_zero_without_activity() {
        assert_eq!(wellness_score(0, 0, 0, 0), 0);
    }

    #[test]
    fn score_components_cap() {
        assert_eq!(wellness_score(10, 0, 0, 0), 30);
        assert_eq!(wellness_score(0, 10, 0, 0), 25);
        assert_eq!(wellness_score(0, 0, 10, 0), 25);
        assert_eq!(wellness_score(0, 0, 0, 500), 20);
        assert_eq!(wellness_score(10, 10, 10, 500), 100);
    }

    #[test]
    fn sub_threshold_focus_minutes_score_nothing() {
        assert_eq!(wellness_score(0, 0, 0, 24), 0);
        assert_eq!(wellness_score(0, 0, 0, 25), 10);
        assert_eq!(wellness_score(0, 0, 0, 50), 20);
    }

    #[test]
    fn summarize_counts_and_keywords() {
        let now = Utc::now();
        let records = vec![
            record("timer", "pomodoro_start", "", now),
            record("timer", "focus_minutes", "25", now),
            record("reminder", "fire", "Hydrate!", now),
            record("reminder", "fire", "Stand up and stretch", now),
            record("sound", "play", "rain", now),
            record("info", "noise", "", now),
        ];
        let s = summarize(&records, now - Duration::hours(1));
        assert_eq!(s.focus_sessions, 1);
        assert_eq!(s.focus_minutes, 25);
        assert_eq!(s.reminder_count, 2);
        assert_eq!(s.hydration_count, 1);
        assert_eq!(s.break_count, 1);
        assert_eq!(s.sound_count, 1);
        assert_eq!(s.totals.get("reminder"), Some(&2));
        // 10 (session) + 5 (hydration) + 5 (break) + 10 (minutes)
        assert_eq!(s.wellness_score, 30);
    }

    #[test]
    fn summarize_skips_records_before_window() {
        let now = Utc::now();
        let records = vec![
            record("timer", "focus_minutes", "25", now - Duration::days(2)),
            record("timer", "focus_minutes", "30", now),
        ];
        let s = summarize(&records, now - Duration::hours(1));
        assert_eq!(s.focus_minutes, 30);
    }

    #[test]
    fn malformed_values_are_skipped() {
        let now = Utc::now();
        let records = vec![
            record("timer", "focus_minutes", "abc", now),
            record("timer", "focus_minutes", "12.9", now),
        ];
        let s = summarize(&records, now - Duration::hours(1));
        assert_eq!(s.focus_minutes, 12);
    }

    #[test]
    fn today_range_starts_at_midnight() {
        let now = Utc.with_ymd_and_hms(2026, 8, 28, 15, 30, 0).unwrap();
        let since = StatsRange::Today.since(now);
        assert_eq!(since, Utc.with_ymd_and_hms(2026, 8, 28, 0, 0, 0).unwrap());
    }

    #[test]
    fn rolling_24h_window_keeps_yesterday_evening() {
        // Taken in the morning, the daily window still covers last night's
        // events; midnight must not be a cutoff.
        let now = Utc.with_ymd_and_hms(2026, 8, 28, 9, 0, 0).unwrap();
        assert_eq!(
            StatsRange::Last24Hours.since(now),
            Utc.with_ymd_and_hms(2026, 8, 27, 9, 0, 0).unwrap()
        );

        let records = vec![record(
            "timer",
            "focus_minutes",
            "25",
            now - Duration::hours(12),
        )];
        let daily = summarize(&records, StatsRange::Last24Hours.since(now));
        assert_eq!(daily.focus_minutes, 25);
        let today = summarize(&records, StatsRange::Today.since(now));
        assert_eq!(today.focus_minutes, 0);
    }
}
