//! Headless demo run
//!
//! Drives the simulation with the autopilot at a fixed display rate, with no
//! window or GPU. Used by the native binary and as an end-to-end check.

use serde::Serialize;

use crate::settings::Settings;
use crate::sim::{FrameInput, GameEvent, GamePhase, Simulation};

/// How a demo run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Every block destroyed
    Cleared,
    /// Ball fell out of the field
    GameOver,
    /// Ran out of demo time with blocks left
    TimeUp,
}

/// Result of [`run_headless`]
#[derive(Debug, Clone, Serialize)]
pub struct DemoSummary {
    pub outcome: Outcome,
    pub score: u32,
    pub blocks_remaining: usize,
    /// Rendered frames
    pub frames: u64,
    /// Fixed physics steps
    pub steps: u64,
    /// Simulated seconds
    pub elapsed: f32,
}

/// Play one game with the autopilot until it ends or time runs out
pub fn run_headless(settings: &Settings) -> DemoSummary {
    let frame_dt = 1.0 / settings.demo_frame_rate.max(1.0);
    let max_frames = (settings.demo_seconds.max(0.0) / frame_dt).ceil() as u64;
    let input = FrameInput {
        autopilot: true,
        ..Default::default()
    };

    let mut sim = Simulation::new();
    let mut frames = 0;
    let mut steps = 0u64;
    let mut elapsed = 0.0f32;

    log::info!(
        "Demo: {} s at {} fps (seed {})",
        settings.demo_seconds,
        settings.demo_frame_rate,
        settings.seed
    );

    let outcome = loop {
        if sim.state.blocks.is_cleared() {
            break Outcome::Cleared;
        }
        if sim.state.phase == GamePhase::GameOver {
            break Outcome::GameOver;
        }
        if frames >= max_frames {
            break Outcome::TimeUp;
        }

        let wall_time = settings.seed as f64 + elapsed as f64;
        steps += sim.frame(frame_dt, wall_time, &input) as u64;
        frames += 1;
        elapsed += frame_dt;

        for event in sim.state.drain_events() {
            match event {
                GameEvent::BlockDestroyed { column, row, points } => {
                    log::debug!("Block ({column}, {row}) +{points}");
                }
                GameEvent::WallBounce => {}
                other => log::debug!("{other:?}"),
            }
        }
    };

    let summary = DemoSummary {
        outcome,
        score: sim.state.score,
        blocks_remaining: sim.state.blocks.alive_count(),
        frames,
        steps,
        elapsed,
    };
    log::info!(
        "Demo finished: {:?}, score {} after {} steps",
        summary.outcome,
        summary.score,
        summary.steps
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn settings(seconds: f32, rate: f32) -> Settings {
        Settings {
            demo_seconds: seconds,
            demo_frame_rate: rate,
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_length_demo() {
        let summary = run_headless(&settings(0.0, 60.0));
        assert_eq!(summary.outcome, Outcome::TimeUp);
        assert_eq!(summary.frames, 0);
        assert_eq!(summary.steps, 0);
        assert_eq!(summary.score, 0);
        assert_eq!(summary.blocks_remaining, GRID_COLUMNS * GRID_ROWS);
    }

    #[test]
    fn test_short_demo_runs_physics() {
        let summary = run_headless(&settings(1.0, 60.0));
        assert_eq!(summary.frames, 60);
        // First frame only launches
        assert!(summary.steps >= 55 && summary.steps <= 60, "{}", summary.steps);
    }

    #[test]
    fn test_summary_is_consistent() {
        let summary = run_headless(&settings(30.0, 144.0));

        let destroyed = GRID_COLUMNS * GRID_ROWS - summary.blocks_remaining;
        // Every block is worth at least 2
        assert!(summary.score as usize >= destroyed * 2);
        assert!(summary.score as usize <= destroyed * 8);
        match summary.outcome {
            Outcome::Cleared => assert_eq!(summary.blocks_remaining, 0),
            Outcome::TimeUp => assert!(summary.elapsed >= 29.9),
            Outcome::GameOver => {}
        }
    }

    #[test]
    fn test_same_settings_same_result() {
        let a = run_headless(&settings(10.0, 90.0));
        let b = run_headless(&settings(10.0, 90.0));
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.score, b.score);
        assert_eq!(a.steps, b.steps);
    }

    #[test]
    fn test_summary_serializes() {
        let summary = run_headless(&settings(0.0, 60.0));
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"outcome\":\"time_up\""));
    }
}
