//! Integration tests for TOML configuration files.

use studygram_core::timer::{ManualTickSource, Preset, TimerController};
use studygram_core::Config;

#[test]
fn save_and_load_preserve_edits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut cfg = Config::default();
    cfg.set("timer.break_minutes", "10").unwrap();
    cfg.set("goal.seed_completed_minutes", "0").unwrap();
    cfg.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.timer.break_minutes, 10);
    assert_eq!(loaded.goal.seed_completed_minutes, 0);
    assert_eq!(loaded.goal.daily_goal_minutes, 360);
}

#[test]
fn malformed_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[timer\nstudy_minutes = ").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to load configuration"));
}

#[test]
fn configured_presets_drive_the_controller() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[timer]\nstudy_minutes = 50\nbreak_minutes = 10\n").unwrap();

    let cfg = Config::load_from(&path).unwrap();
    let mut ctl = TimerController::new(ManualTickSource::new(), cfg.timer_settings()).unwrap();
    assert_eq!(ctl.format_remaining(), "50:00");
    ctl.reset_to(Preset::Break);
    assert_eq!(ctl.format_remaining(), "10:00");
}

#[test]
fn zero_daily_goal_is_rejected() {
    let mut cfg = Config::default();
    cfg.set("goal.daily_goal_minutes", "0").unwrap();
    assert!(TimerController::new(ManualTickSource::new(), cfg.timer_settings()).is_err());
}
