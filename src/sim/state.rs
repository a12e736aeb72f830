//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball sweeps across the field, waiting for launch input
    Idle,
    /// Active gameplay
    Playing,
    /// Ball fell out of the field; simulation is frozen until restart
    GameOver,
}

/// Something the front end may want to react to (sound, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Launched,
    WallBounce,
    PaddleHit,
    BlockDestroyed { column: usize, row: usize, points: u32 },
    GameOver,
    Restarted,
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Unit direction of travel
    pub dir: Vec2,
    pub speed: f32,
    pub radius: f32,
}

impl Ball {
    /// Ball resting at the start position, not moving
    pub fn at_start() -> Self {
        Self {
            pos: Vec2::new(FIELD_SIZE / 2.0, BALL_START_Y),
            dir: Vec2::ZERO,
            speed: BALL_SPEED,
            radius: BALL_RADIUS,
        }
    }

    /// Integrate position along the current direction
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.dir * self.speed * dt;
    }
}

/// The player's paddle; only its horizontal position changes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: FIELD_SIZE / 2.0 - PADDLE_WIDTH / 2.0,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
        }
    }
}

impl Paddle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, PADDLE_POS_Y, self.width, self.height)
    }

    /// Middle of the paddle's top edge (launch aim point)
    pub fn middle(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, PADDLE_POS_Y)
    }

    /// Move by `velocity * dt`, staying inside the field
    pub fn move_by(&mut self, velocity: f32, dt: f32) {
        self.x = (self.x + velocity * dt).clamp(0.0, FIELD_SIZE - self.width);
    }
}

/// Colour and value of one block row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowStyle {
    /// RGBA, 0-255
    pub color: [u8; 4],
    pub points: u32,
}

const RED: RowStyle = RowStyle {
    color: [230, 41, 55, 255],
    points: 8,
};
const ORANGE: RowStyle = RowStyle {
    color: [255, 161, 0, 255],
    points: 6,
};
const GREEN: RowStyle = RowStyle {
    color: [0, 228, 48, 255],
    points: 4,
};
const YELLOW: RowStyle = RowStyle {
    color: [253, 249, 0, 255],
    points: 2,
};

/// Row styles, top row first
pub const ROW_STYLES: [RowStyle; GRID_ROWS] = [
    RED, RED, ORANGE, ORANGE, GREEN, GREEN, YELLOW, YELLOW,
];

/// Alive flags for the block wall, indexed `[column][row]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockGrid {
    alive: [[bool; GRID_ROWS]; GRID_COLUMNS],
}

impl Default for BlockGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockGrid {
    /// A full wall
    pub fn new() -> Self {
        Self {
            alive: [[true; GRID_ROWS]; GRID_COLUMNS],
        }
    }

    /// Screen rectangle of the block at (column, row)
    pub fn block_rect(column: usize, row: usize) -> Rect {
        Rect::new(
            GRID_ORIGIN_X + column as f32 * BLOCK_WIDTH,
            GRID_ORIGIN_Y + row as f32 * BLOCK_HEIGHT,
            BLOCK_WIDTH,
            BLOCK_HEIGHT,
        )
    }

    /// Whether a block exists at (column, row); anything off the grid does not
    pub fn is_alive(&self, column: i32, row: i32) -> bool {
        if column < 0 || column >= GRID_COLUMNS as i32 {
            return false;
        }
        if row < 0 || row >= GRID_ROWS as i32 {
            return false;
        }
        self.alive[column as usize][row as usize]
    }

    /// Kill a block. Returns false if it was already dead or off the grid.
    pub fn remove(&mut self, column: usize, row: usize) -> bool {
        match self.alive.get_mut(column).and_then(|c| c.get_mut(row)) {
            Some(cell) if *cell => {
                *cell = false;
                true
            }
            _ => false,
        }
    }

    pub fn alive_count(&self) -> usize {
        self.alive.iter().flatten().filter(|&&alive| alive).count()
    }

    pub fn is_cleared(&self) -> bool {
        self.alive_count() == 0
    }

    /// Alive blocks in column-major order (the order collisions are scanned)
    pub fn iter_alive(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.alive.iter().enumerate().flat_map(|(column, rows)| {
            rows.iter()
                .enumerate()
                .filter(|(_, alive)| **alive)
                .map(move |(row, _)| (column, row))
        })
    }
}

/// Ball/paddle positions at the start of the last step, used for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub ball_pos: Vec2,
    pub paddle_x: f32,
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Never decreases within a run
    pub score: u32,
    pub ball: Ball,
    pub paddle: Paddle,
    pub blocks: BlockGrid,
    /// Render interpolation only; physics never reads it
    pub previous: Snapshot,
    /// Fixed steps simulated since the last restart
    pub time_ticks: u64,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh run: full wall, centred paddle, ball at the start position
    pub fn new() -> Self {
        let ball = Ball::at_start();
        let paddle = Paddle::default();
        Self {
            phase: GamePhase::Idle,
            score: 0,
            ball,
            paddle,
            blocks: BlockGrid::new(),
            previous: Snapshot {
                ball_pos: ball.pos,
                paddle_x: paddle.x,
            },
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Reset everything back to `Idle` with all blocks restored
    pub fn restart(&mut self) {
        let events = std::mem::take(&mut self.events);
        *self = Self::new();
        self.events = events;
        self.events.push(GameEvent::Restarted);
    }

    /// Current ball/paddle positions
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            ball_pos: self.ball.pos,
            paddle_x: self.paddle.x,
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
