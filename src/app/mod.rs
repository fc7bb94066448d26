pub mod clock;
pub mod render;
pub mod state;

pub use clock::FixedRateClock;
pub use render::StripRenderer;
pub use state::{App, RunSummary};

use anyhow::Result;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};

impl App {
    /// Runs `seconds` of simulated time as fast as possible, stepping
    /// virtual time one motion period at a time.
    pub fn run_headless(&mut self, seconds: f64) -> Result<RunSummary> {
        anyhow::ensure!(
            seconds.is_finite() && seconds >= 0.0,
            "Duration must be a non-negative number of seconds"
        );
        let step = self.config.fast_dt();
        let steps = (seconds / step + 1e-9).floor() as u64;
        tracing::info!(seconds, steps, "Headless run started");

        for _ in 0..steps {
            self.advance(step)?;
        }

        let summary = self.summary();
        tracing::info!(
            slow_ticks = summary.slow_ticks,
            plants = summary.plants,
            births = summary.births,
            deaths = summary.deaths,
            "Headless run finished"
        );
        Ok(summary)
    }

    /// Drives both cadences from wall-clock timers, passing the measured
    /// interval as `dt`. Stops on Ctrl-C or once `seconds` have passed.
    pub async fn run_realtime(&mut self, seconds: Option<f64>) -> Result<RunSummary> {
        let mut fast = time::interval(Duration::from_secs_f64(self.config.fast_dt()));
        let mut slow = time::interval(Duration::from_secs_f64(self.config.slow_dt()));
        fast.set_missed_tick_behavior(MissedTickBehavior::Delay);
        slow.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // The first tick of an interval completes immediately.
        let mut last_fast = fast.tick().await;
        let mut last_slow = slow.tick().await;

        let deadline = match seconds {
            Some(s) => {
                anyhow::ensure!(
                    s.is_finite() && s >= 0.0,
                    "Duration must be a non-negative number of seconds"
                );
                Some(Instant::now() + Duration::from_secs_f64(s))
            }
            None => None,
        };
        let stop = async move {
            match deadline {
                Some(at) => time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::pin!(stop);
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        tracing::info!(?seconds, "Realtime run started");
        loop {
            tokio::select! {
                biased;
                _ = &mut ctrl_c => {
                    tracing::info!("Ctrl+C received, stopping");
                    break;
                }
                () = &mut stop => break,
                now = fast.tick() => {
                    let dt = (now - last_fast).as_secs_f64();
                    last_fast = now;
                    if dt > 0.0 {
                        self.step_fast(dt)?;
                    }
                }
                now = slow.tick() => {
                    let dt = (now - last_slow).as_secs_f64();
                    last_slow = now;
                    if dt > 0.0 {
                        self.step_slow(dt)?;
                    }
                }
            }
        }

        let summary = self.summary();
        tracing::info!(
            slow_ticks = summary.slow_ticks,
            plants = summary.plants,
            "Realtime run finished"
        );
        Ok(summary)
    }
}
