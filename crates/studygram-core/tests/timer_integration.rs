//! Integration tests for the focus timer and daily goal.

use proptest::prelude::*;
use studygram_core::timer::{
    format_remaining, parse_remaining, ManualTickSource, ManualTicker, Preset, TimerController,
    TimerEngine, TimerSettings, TimerState,
};
use studygram_core::Event;

fn controller_at(secs: i64) -> (TimerController<ManualTickSource>, ManualTicker) {
    let source = ManualTickSource::new();
    let ticker = source.ticker();
    let mut ctl = TimerController::new(source, TimerSettings::default()).unwrap();
    ctl.reset_to_preset(secs / 60);
    (ctl, ticker)
}

#[test]
fn study_sprint_first_minute() {
    let source = ManualTickSource::new();
    let ticker = source.ticker();
    let mut ctl = TimerController::new(source, TimerSettings::default()).unwrap();
    let before = ctl.progress().completed_minutes;

    ctl.toggle();
    ticker.fire(60);
    ctl.pump();

    assert_eq!(ctl.remaining_secs(), 1440);
    assert_eq!(ctl.progress().completed_minutes, before + 1);
    assert_eq!(ctl.format_remaining(), "24:00");
    assert!(ctl.is_running());
}

#[test]
fn ticking_down_from_125_crosses_120_then_60() {
    let (mut ctl, ticker) = controller_at(180);
    ctl.start();
    ticker.fire(55);
    ctl.pump();
    assert_eq!(ctl.remaining_secs(), 125);
    let before = ctl.progress().completed_minutes;

    // Pre-tick values 125..=61 hold a single multiple of sixty.
    ticker.fire(65);
    let events = ctl.pump();
    assert_eq!(events.iter().filter(|e| e.is_minute_elapsed()).count(), 1);
    assert_eq!(ctl.progress().completed_minutes, before + 1);
    assert_eq!(ctl.remaining_secs(), 60);
    assert_eq!(ctl.format_remaining(), "1:00");

    ticker.fire(1);
    ctl.pump();
    assert_eq!(ctl.progress().completed_minutes, before + 2);
    assert_eq!(ctl.remaining_secs(), 59);
}

#[test]
fn paused_ticks_change_nothing() {
    let (mut ctl, ticker) = controller_at(300);
    ctl.start();
    ticker.fire(3);
    ctl.pump();
    ctl.pause();
    let snapshot = (ctl.remaining_secs(), ctl.progress());

    ticker.fire(10);
    ctl.pump();
    for _ in 0..10 {
        ctl.on_tick();
    }
    assert_eq!((ctl.remaining_secs(), ctl.progress()), snapshot);
    assert!(!ctl.is_running());
}

#[test]
fn goal_progress_from_seeded_history() {
    let ctl = controller_at(1500).0;
    let p = ctl.progress();
    assert_eq!(p.completed_minutes, 240);
    assert_eq!(p.daily_goal_minutes, 360);
    assert_eq!(p.remaining_minutes, 120);
    assert_eq!(p.percent_complete, 66);
}

#[test]
fn finishing_the_daily_goal_caps_progress() {
    let settings = TimerSettings {
        completed_minutes: 350,
        ..TimerSettings::default()
    };
    let source = ManualTickSource::new();
    let ticker = source.ticker();
    let mut ctl = TimerController::new(source, settings).unwrap();
    ctl.reset_to(Preset::Study);
    ctl.start();
    ticker.fire(1500);
    let events = ctl.pump();

    assert!(events.last().is_some_and(Event::is_completed));
    let p = ctl.progress();
    assert_eq!(p.completed_minutes, 375);
    assert_eq!(p.remaining_minutes, 0);
    assert_eq!(p.percent_complete, 100);
    assert_eq!(ctl.engine().state(), TimerState::Idle);
}

#[tokio::test(start_paused = true)]
async fn interval_source_drives_a_real_sprint() {
    use std::time::Duration;
    use studygram_core::timer::IntervalTickSource;

    let source = IntervalTickSource::new(Duration::from_secs(1)).unwrap();
    let mut ctl = TimerController::new(source, TimerSettings::default()).unwrap();
    ctl.reset_to_preset(2);
    ctl.start();

    let mut ticks = 0;
    while let Some(report) = ctl.next_tick().await {
        ticks += 1;
        if report.event.as_ref().is_some_and(Event::is_completed) {
            break;
        }
    }
    assert_eq!(ticks, 120);
    assert_eq!(ctl.progress().completed_minutes, 242);
    assert!(ctl.next_tick().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn pausing_stops_interval_delivery() {
    use std::time::Duration;
    use studygram_core::timer::IntervalTickSource;

    let source = IntervalTickSource::new(Duration::from_secs(1)).unwrap();
    let mut ctl = TimerController::new(source, TimerSettings::default()).unwrap();
    ctl.start();
    for _ in 0..5 {
        ctl.next_tick().await;
    }
    ctl.pause();
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(ctl.pump().is_empty());
    assert_eq!(ctl.remaining_secs(), 1495);
}

proptest! {
    #[test]
    fn n_ticks_from_n_reach_idle(n in 1u64..5000) {
        let mut engine = TimerEngine::with_preset(n);
        engine.start();
        for _ in 0..n {
            engine.tick();
        }
        prop_assert_eq!(engine.remaining_secs(), 0);
        prop_assert!(!engine.is_running());
        prop_assert_eq!(engine.state(), TimerState::Idle);
    }

    #[test]
    fn reset_always_lands_paused(preset in 1u64..100_000, ticks in 0usize..200, run in any::<bool>()) {
        let mut engine = TimerEngine::new();
        if run {
            engine.start();
        }
        for _ in 0..ticks {
            engine.tick();
        }
        engine.reset(preset);
        prop_assert_eq!(engine.remaining_secs(), preset);
        prop_assert!(!engine.is_running());
    }

    #[test]
    fn format_parse_roundtrip(s in 0u64..6000) {
        prop_assert_eq!(parse_remaining(&format_remaining(s)), Some(s));
    }

    #[test]
    fn minute_events_match_multiples_of_sixty(start in 1u64..4000) {
        let mut engine = TimerEngine::with_preset(start);
        engine.start();
        let minutes = (0..start)
            .filter_map(|_| engine.tick())
            .filter(Event::is_minute_elapsed)
            .count() as u64;
        prop_assert_eq!(minutes, start / 60);
    }
}
