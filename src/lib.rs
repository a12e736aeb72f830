//! Breakout - a paddle, a ball and a wall of blocks
//!
//! Core modules:
//! - `sim`: Deterministic simulation (fixed-step physics, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline and draw-list construction
//! - `audio`: Sound effects triggered by simulation events
//! - `settings`: User preferences
//! - `demo`: Headless autopilot run used by the native binary

pub mod audio;
pub mod demo;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::Error;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta fed into the accumulator (stalls beyond this are dropped)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Play field is a square, origin top-left, y pointing down
    pub const FIELD_SIZE: f32 = 320.0;

    /// Window defaults
    pub const WINDOW_TITLE: &str = "breakout";
    pub const WINDOW_SIZE: u32 = 750;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 50.0;
    pub const PADDLE_HEIGHT: f32 = 6.0;
    /// Top edge of the paddle
    pub const PADDLE_POS_Y: f32 = 260.0;
    pub const PADDLE_SPEED: f32 = 100.0;

    /// Ball defaults
    pub const BALL_SPEED: f32 = 130.0;
    pub const BALL_RADIUS: f32 = 4.0;
    pub const BALL_START_Y: f32 = 160.0;

    /// Block grid
    pub const GRID_COLUMNS: usize = 10;
    pub const GRID_ROWS: usize = 8;
    pub const BLOCK_WIDTH: f32 = 20.0;
    pub const BLOCK_HEIGHT: f32 = 10.0;
    pub const GRID_ORIGIN_X: f32 = 60.0;
    pub const GRID_ORIGIN_Y: f32 = 40.0;

    /// How far below the field the ball must fall before the run ends
    pub const GAME_OVER_MARGIN: f32 = BALL_RADIUS * 6.0;

    /// Horizontal reach of the idle sweep around the field centre
    pub const IDLE_SWEEP_AMPLITUDE: f32 = FIELD_SIZE / 2.5;
}

/// Linear interpolation between two scalars
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
