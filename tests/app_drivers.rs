use std::path::PathBuf;
use thermoflora_lib::app::{App, FixedRateClock};
use thermoflora_lib::model::config::{AppConfig, HeatModel};

fn config() -> AppConfig {
    let mut config = AppConfig::default();
    config.world.width = 120;
    config.world.seed = Some(99);
    config
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("thermoflora-{}-{}", std::process::id(), name))
}

#[test]
fn test_headless_runs_both_cadences() {
    let mut app = App::new(config()).unwrap();
    let summary = app.run_headless(1.0).unwrap();

    assert_eq!(summary.fast_ticks, 60);
    assert_eq!(summary.slow_ticks, 20);
    assert_eq!(app.metrics.slow_ticks(), 20);
    assert_eq!(app.metrics.fast_ticks(), 60);
    assert_eq!(summary.fingerprint, app.config.fingerprint());
}

#[test]
fn test_fast_ticks_run_before_slow_tick() {
    let mut app = App::new(config()).unwrap();
    app.sim.nudge_agent(60.0, 0.0);
    let x0 = app.sim.agent().x;

    let reports = app.advance(3.0 / 60.0).unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(app.sim.fast_ticks(), 3);
    assert!((app.sim.agent().x - (x0 + 3.0)).abs() < 1e-9);
}

#[test]
fn test_one_large_advance_matches_many_small_ones() {
    let mut batched = App::new(config()).unwrap();
    let mut stepped = App::new(config()).unwrap();

    let reports = batched.advance(1.0).unwrap();
    for _ in 0..60 {
        stepped.advance(1.0 / 60.0).unwrap();
    }

    assert_eq!(reports.len(), 20);
    assert_ne!(stepped.sim.agent_velocity().vy_lift, 0.0);
    assert_eq!(batched.sim.fast_ticks(), stepped.sim.fast_ticks());
    assert_eq!(batched.sim.slow_ticks(), stepped.sim.slow_ticks());
    assert_eq!(batched.sim.agent().y, stepped.sim.agent().y);
}

#[test]
fn test_headless_rejects_negative_duration() {
    let mut app = App::new(config()).unwrap();
    assert!(app.run_headless(-1.0).is_err());
    assert!(app.run_headless(f64::NAN).is_err());
}

#[test]
fn test_invalid_config_rejected_before_run() {
    let mut bad = config();
    bad.schedule.slow_hz = 0.0;
    assert!(App::new(bad).is_err());
}

#[test]
fn test_headless_runs_are_reproducible() {
    let a = App::new(config()).unwrap().run_headless(2.0).unwrap();
    let b = App::new(config()).unwrap().run_headless(2.0).unwrap();
    assert_eq!(a.plants, b.plants);
    assert_eq!(a.births, b.births);
    assert_eq!(a.deaths, b.deaths);
    assert_eq!(a.air_mean, b.air_mean);
    assert_eq!(a.agent_y, b.agent_y);
}

#[test]
fn test_clock_matches_config_rates() {
    let config = config();
    let mut fast = FixedRateClock::new(config.schedule.fast_hz).unwrap();
    let mut slow = FixedRateClock::new(config.schedule.slow_hz).unwrap();
    assert_eq!(fast.advance(0.5), 30);
    assert_eq!(slow.advance(0.5), 10);
}

#[test]
fn test_missing_config_file_uses_defaults() {
    let config = App::load_config(temp_path("does-not-exist.toml")).unwrap();
    assert_eq!(config.world.width, AppConfig::default().world.width);
}

#[test]
fn test_config_file_is_loaded_and_validated() {
    let good = temp_path("good.toml");
    std::fs::write(
        &good,
        "[world]\nwidth = 64\nseed = 5\n\n[thermal]\nheat_model = \"shade\"\n",
    )
    .unwrap();
    let config = App::load_config(&good).unwrap();
    assert_eq!(config.world.width, 64);
    assert_eq!(config.thermal.heat_model, HeatModel::Shade);
    std::fs::remove_file(&good).ok();

    let bad = temp_path("bad.toml");
    std::fs::write(&bad, "[air]\ndiffusion_offset = 0\n").unwrap();
    let err = App::load_config(&bad).unwrap_err();
    assert!(format!("{err:#}").contains("Diffusion offset"));
    std::fs::remove_file(&bad).ok();
}

#[tokio::test]
async fn test_realtime_stops_after_duration() {
    let mut app = App::new(config()).unwrap();
    let summary = app.run_realtime(Some(0.3)).await.unwrap();
    assert!(summary.slow_ticks >= 1, "No physics ticks in 0.3 s");
    assert!(summary.fast_ticks >= summary.slow_ticks);
}
