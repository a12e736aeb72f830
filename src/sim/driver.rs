//! Fixed-step driver
//!
//! Real frame time is accumulated and spent in whole fixed steps; whatever is
//! left over (less than one step) becomes the blend factor the renderer uses
//! to interpolate between the previous and current physics state. This keeps
//! the physics identical at any display refresh rate.

use super::state::{GamePhase, GameState, Snapshot};
use super::tick::{TickInput, launch, tick, update_idle};
use crate::consts::{MAX_FRAME_DT, SIM_DT};
use crate::lerp;

/// Input sampled once per rendered frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Left key held
    pub left: bool,
    /// Right key held
    pub right: bool,
    /// Launch key went down this frame (edge, not level)
    pub launch: bool,
    /// Demo mode
    pub autopilot: bool,
}

impl FrameInput {
    fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            autopilot: self.autopilot,
        }
    }
}

/// Owns the game state and the time accumulator
#[derive(Debug, Clone)]
pub struct Simulation {
    pub state: GameState,
    accumulator: f32,
    step: f32,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    pub fn new() -> Self {
        Self::with_state(GameState::new())
    }

    pub fn with_state(state: GameState) -> Self {
        Self {
            state,
            accumulator: 0.0,
            step: SIM_DT,
        }
    }

    /// Advance by one rendered frame of `frame_dt` seconds
    ///
    /// `wall_time` is monotonic seconds, only used for the idle sweep.
    /// Returns how many fixed steps were simulated.
    pub fn frame(&mut self, frame_dt: f32, wall_time: f64, input: &FrameInput) -> u32 {
        match self.state.phase {
            GamePhase::Idle => {
                update_idle(&mut self.state, wall_time);
                if input.launch || input.autopilot {
                    launch(&mut self.state);
                }
            }
            GamePhase::GameOver => {
                if input.launch {
                    self.state.restart();
                    self.accumulator = 0.0;
                    log::info!("Restarted");
                }
            }
            GamePhase::Playing => {
                self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);
            }
        }

        let tick_input = input.tick_input();
        let mut steps = 0;
        while self.accumulator >= self.step && self.state.phase == GamePhase::Playing {
            tick(&mut self.state, &tick_input, self.step);
            self.accumulator -= self.step;
            steps += 1;
        }

        if self.state.phase != GamePhase::Playing {
            self.accumulator = 0.0;
        }

        steps
    }

    /// Fraction of a step left in the accumulator, in [0, 1)
    pub fn blend_factor(&self) -> f32 {
        self.accumulator / self.step
    }

    /// Ball/paddle positions to draw this frame
    pub fn interpolated(&self) -> Snapshot {
        let alpha = self.blend_factor();
        let previous = self.state.previous;
        let current = self.state.snapshot();
        Snapshot {
            ball_pos: previous.ball_pos.lerp(current.ball_pos, alpha),
            paddle_x: lerp(previous.paddle_x, current.paddle_x, alpha),
        }
    }

    /// Seed the accumulator directly (tests)
    #[cfg(test)]
    pub(crate) fn add_accumulated_time(&mut self, seconds: f32) {
        self.accumulator += seconds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::GameEvent;
    use glam::Vec2;

    fn launch_input() -> FrameInput {
        FrameInput {
            launch: true,
            ..Default::default()
        }
    }

    fn playing() -> Simulation {
        let mut sim = Simulation::new();
        sim.frame(0.0, std::f64::consts::FRAC_PI_2, &launch_input());
        assert_eq!(sim.state.phase, GamePhase::Playing);
        sim
    }

    #[test]
    fn test_idle_frame_accumulates_nothing() {
        let mut sim = Simulation::new();
        let steps = sim.frame(1.0, 0.5, &FrameInput::default());

        assert_eq!(steps, 0);
        assert_eq!(sim.blend_factor(), 0.0);
        assert_eq!(sim.state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_launch_from_centre() {
        // cos(pi/2) == 0: the sweep puts the ball at the start position
        let sim = playing();

        assert!((sim.state.ball.pos.x - FIELD_SIZE / 2.0).abs() < 1e-4);
        assert!((sim.state.ball.dir - Vec2::new(0.0, 1.0)).length() < 1e-4);
    }

    #[test]
    fn test_frame_runs_whole_steps() {
        let mut sim = playing();

        let steps = sim.frame(SIM_DT * 2.5, 0.0, &FrameInput::default());
        assert_eq!(steps, 2);
        assert!((sim.blend_factor() - 0.5).abs() < 1e-3);

        let steps = sim.frame(SIM_DT * 0.6, 0.0, &FrameInput::default());
        assert_eq!(steps, 1);
        assert!((sim.blend_factor() - 0.1).abs() < 1e-3);
    }

    #[test]
    fn test_short_frame_leaves_state_untouched() {
        let mut sim = playing();
        let before = sim.state.clone();

        let steps = sim.frame(SIM_DT * 0.4, 0.0, &FrameInput::default());

        assert_eq!(steps, 0);
        assert_eq!(sim.state.ball, before.ball);
        assert_eq!(sim.state.paddle, before.paddle);
        assert_eq!(sim.state.previous, before.previous);
        assert_eq!(sim.state.time_ticks, before.time_ticks);
        assert!((sim.blend_factor() - 0.4).abs() < 1e-3);
    }

    #[test]
    fn test_long_stall_is_clamped() {
        let mut sim = playing();
        let steps = sim.frame(5.0, 0.0, &FrameInput::default());
        // 0.25 s is fifteen steps, give or take float rounding
        assert!((14..=15).contains(&steps));
    }

    #[test]
    fn test_interpolation_blends_previous_and_current() {
        let mut sim = playing();
        sim.frame(SIM_DT, 0.0, &FrameInput::default());

        let previous = sim.state.previous.ball_pos;
        let current = sim.state.ball.pos;
        assert_ne!(previous, current);

        sim.add_accumulated_time(SIM_DT * 0.5);
        let view = sim.interpolated();
        assert!((view.ball_pos - (previous + current) * 0.5).length() < 1e-3);
    }

    #[test]
    fn test_game_over_then_restart() {
        let mut sim = playing();
        sim.state.ball.pos = Vec2::new(100.0, FIELD_SIZE + GAME_OVER_MARGIN - 0.1);
        sim.state.ball.dir = Vec2::new(0.0, 1.0);
        sim.state.score = 30;

        sim.frame(SIM_DT * 3.5, 0.0, &FrameInput::default());
        assert_eq!(sim.state.phase, GamePhase::GameOver);
        assert_eq!(sim.blend_factor(), 0.0);

        // Frozen: further frames do nothing without the launch key
        let frozen = sim.state.ball;
        sim.frame(SIM_DT * 3.0, 0.0, &FrameInput::default());
        assert_eq!(sim.state.ball, frozen);
        assert_eq!(sim.state.phase, GamePhase::GameOver);

        sim.frame(SIM_DT, 0.0, &launch_input());
        assert_eq!(sim.state.phase, GamePhase::Idle);
        assert_eq!(sim.state.score, 0);
        assert_eq!(sim.state.blocks.alive_count(), GRID_COLUMNS * GRID_ROWS);
        assert_eq!(sim.state.paddle.x, FIELD_SIZE / 2.0 - PADDLE_WIDTH / 2.0);
        assert_eq!(sim.state.ball.pos, Vec2::new(FIELD_SIZE / 2.0, BALL_START_Y));

        let events = sim.state.drain_events();
        assert_eq!(events.iter().filter(|e| **e == GameEvent::GameOver).count(), 1);
        assert_eq!(events.last(), Some(&GameEvent::Restarted));
    }

    #[test]
    fn test_autopilot_launches_from_idle() {
        let mut sim = Simulation::new();
        let input = FrameInput {
            autopilot: true,
            ..Default::default()
        };
        sim.frame(SIM_DT, 0.0, &input);
        assert_eq!(sim.state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_same_inputs_same_result() {
        let mut a = playing();
        let mut b = playing();
        let inputs = [
            FrameInput {
                left: true,
                ..Default::default()
            },
            FrameInput::default(),
            FrameInput {
                right: true,
                ..Default::default()
            },
        ];

        // Same total time split into different frame lengths
        for input in &inputs {
            a.frame(SIM_DT * 2.0, 0.0, input);
            for _ in 0..4 {
                b.frame(SIM_DT * 0.5, 0.0, input);
            }
        }

        assert_eq!(a.state.time_ticks, b.state.time_ticks);
        assert!((a.state.ball.pos - b.state.ball.pos).length() < 1e-3);
        assert!((a.state.paddle.x - b.state.paddle.x).abs() < 1e-3);
    }
}
