//! Integration tests for the Pomodoro cycle orchestrator.
//!
//! These tests drive full cycles with simulated wall-clock ticks at the
//! nominal interval and check the emitted event sequences end to end.

use companion_core::events::Event;
use companion_core::timer::{CyclePhase, CycleState, PomodoroCycle, TICK_INTERVAL_MS};

/// Tick the cycle from `from_ms` until it finishes or `limit_ms` passes,
/// collecting every emitted event.
fn run_to_finish(cycle: &mut PomodoroCycle, from_ms: u64, limit_ms: u64) -> Vec<Event> {
    let mut events = Vec::new();
    let mut now = from_ms;
    while cycle.state() != CycleState::Finished && now < from_ms + limit_ms {
        now += TICK_INTERVAL_MS;
        events.extend(cycle.tick_at(now));
    }
    events
}

fn count<F: Fn(&Event) -> bool>(events: &[Event], pred: F) -> usize {
    events.iter().filter(|e| pred(e)).count()
}

#[test]
fn full_cycle_emits_n_work_completions_and_n_breaks() {
    for n in [1u32, 4, 10] {
        let mut cycle = PomodoroCycle::new(n, 1, 1);
        cycle.start_at(0);
        let limit = u64::from(n) * 2 * 60_000 + 60_000;
        let events = run_to_finish(&mut cycle, 0, limit);

        assert_eq!(cycle.state(), CycleState::Finished, "n = {n}");
        assert_eq!(
            count(&events, |e| matches!(e, Event::WorkCompleted { .. })),
            n as usize
        );
        assert_eq!(
            count(&events, |e| matches!(
                e,
                Event::PhaseStarted {
                    phase: CyclePhase::Break,
                    ..
                }
            )),
            n as usize
        );
        assert_eq!(
            count(&events, |e| matches!(e, Event::CycleFinished { .. })),
            1
        );
    }
}

#[test]
fn skipping_every_phase_still_counts_sessions() {
    let mut cycle = PomodoroCycle::new(4, 25, 5);
    cycle.start_at(0);
    let mut events = Vec::new();
    let mut now = 0;
    while cycle.state() == CycleState::Running {
        now += 1_000;
        events.extend(cycle.skip_at(now));
    }
    assert_eq!(
        count(&events, |e| matches!(e, Event::WorkSkipped { .. })),
        4
    );
    assert_eq!(
        count(&events, |e| matches!(e, Event::BreakSkipped { .. })),
        4
    );
    // Skips never masquerade as completions.
    assert_eq!(
        count(&events, |e| matches!(e, Event::WorkCompleted { .. })),
        0
    );
    assert_eq!(cycle.state(), CycleState::Finished);
}

#[test]
fn skip_during_final_break_goes_straight_to_finished() {
    let mut cycle = PomodoroCycle::new(2, 1, 1);
    cycle.start_at(0);
    // Work 1, break 1, work 2 complete naturally.
    let mut now = 0;
    while !(cycle.current_session() == 2 && cycle.phase() == CyclePhase::Break) {
        now += TICK_INTERVAL_MS;
        cycle.tick_at(now);
    }
    let events = cycle.skip_at(now + 1_000);
    assert!(matches!(events[0], Event::BreakSkipped { session: 2, .. }));
    assert!(matches!(events[1], Event::CycleFinished { .. }));
    // No new work phase was started.
    assert!(!events
        .iter()
        .any(|e| matches!(e, Event::PhaseStarted { phase: CyclePhase::Work, .. })));
}

#[test]
fn stop_and_restart_does_not_leak_events() {
    let mut cycle = PomodoroCycle::new(1, 1, 1);
    cycle.start_at(0);
    cycle.tick_at(59_800); // almost through the work phase
    cycle.stop();

    // Restart: the first work phase must run its full duration again, and
    // no completion from the aborted run may surface.
    cycle.start_at(60_000);
    let events = cycle.tick_at(60_200);
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], Event::CountdownTick { .. }));

    let events = run_to_finish(&mut cycle, 60_200, 5 * 60_000);
    assert_eq!(
        count(&events, |e| matches!(e, Event::WorkCompleted { .. })),
        1
    );
}

#[test]
fn pause_stretches_the_work_phase() {
    let mut cycle = PomodoroCycle::new(1, 1, 1);
    cycle.start_at(0);
    cycle.tick_at(30_000);
    cycle.pause_at(30_000);
    cycle.tick_at(90_000); // a minute on the wall, frozen on the clock
    cycle.resume_at(90_000);

    // 30s of work remain; completion lands at t=120s.
    let mut now = 90_000;
    let mut completed_at = None;
    while completed_at.is_none() && now < 300_000 {
        now += TICK_INTERVAL_MS;
        if cycle
            .tick_at(now)
            .iter()
            .any(|e| matches!(e, Event::WorkCompleted { .. }))
        {
            completed_at = Some(now);
        }
    }
    assert_eq!(completed_at, Some(120_000));
}
