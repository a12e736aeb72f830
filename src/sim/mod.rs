//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (column-major over the block grid)
//! - No rendering or platform dependencies
//!
//! The one exception is the idle sweep, which reads the wall clock handed in
//! by the caller and only ever runs while no ball is in play.

pub mod autopilot;
pub mod collision;
pub mod driver;
pub mod state;
pub mod tick;

pub use collision::{Rect, WallHits, circle_rect_overlap, reflect};
pub use driver::{FrameInput, Simulation};
pub use state::{
    Ball, BlockGrid, GameEvent, GamePhase, GameState, Paddle, ROW_STYLES, RowStyle, Snapshot,
};
pub use tick::{TickInput, launch, tick, update_idle};
