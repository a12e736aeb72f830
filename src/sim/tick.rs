//! Fixed timestep simulation tick
//!
//! Advances the game by exactly one step. Only the `Playing` phase is
//! simulated; the idle sweep and launch live here too but are driven per
//! frame by the driver.

use glam::Vec2;

use super::autopilot;
use super::collision::{block_normal, circle_rect_overlap, reflect, resolve_paddle, resolve_walls};
use super::state::{BlockGrid, GameEvent, GamePhase, GameState, ROW_STYLES};
use crate::consts::*;

/// Held-key state for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Demo mode - the paddle steers itself
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    state.previous = state.snapshot();
    let prev_ball = state.previous.ball_pos;

    state.ball.advance(dt);
    if resolve_walls(&mut state.ball, FIELD_SIZE).any() {
        state.events.push(GameEvent::WallBounce);
    }

    if state.ball.pos.y > FIELD_SIZE + GAME_OVER_MARGIN {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver);
        log::info!(
            "Game over: score {}, {} blocks left",
            state.score,
            state.blocks.alive_count()
        );
        return;
    }

    // Paddle
    let (left, right) = if input.autopilot {
        autopilot::steer(state)
    } else {
        (input.left, input.right)
    };
    let mut velocity = 0.0;
    if left {
        velocity -= state.paddle.speed;
    }
    if right {
        velocity += state.paddle.speed;
    }
    state.paddle.move_by(velocity, dt);

    let paddle_rect = state.paddle.rect();
    if circle_rect_overlap(state.ball.pos, state.ball.radius, &paddle_rect) {
        let normal = resolve_paddle(prev_ball, &mut state.ball, &paddle_rect);
        if normal != Vec2::ZERO {
            state.ball.dir = reflect(state.ball.dir, normal);
        }
        state.events.push(GameEvent::PaddleHit);
    }

    hit_first_block(state, prev_ball);
}

/// Destroy at most one block: the first overlapping one in column-major order
fn hit_first_block(state: &mut GameState, prev_ball: Vec2) {
    let ball = state.ball;
    let hit = state.blocks.iter_alive().find(|&(column, row)| {
        circle_rect_overlap(ball.pos, ball.radius, &BlockGrid::block_rect(column, row))
    });
    let Some((column, row)) = hit else {
        return;
    };

    let normal = block_normal(prev_ball, &BlockGrid::block_rect(column, row));
    let normal = suppress_blocked_axes(&state.blocks, column, row, normal);
    if normal != Vec2::ZERO {
        state.ball.dir = reflect(state.ball.dir, normal);
    }

    let points = ROW_STYLES[row].points;
    state.blocks.remove(column, row);
    state.score += points;
    state.events.push(GameEvent::BlockDestroyed {
        column,
        row,
        points,
    });
    log::debug!("Block ({column}, {row}) destroyed, score {}", state.score);
}

/// Drop normal components that point into a neighbouring live block
///
/// A ball sliding along the face of a row would otherwise pick up a sideways
/// component from the seam between two blocks and bounce back out.
pub(crate) fn suppress_blocked_axes(
    grid: &BlockGrid,
    column: usize,
    row: usize,
    normal: Vec2,
) -> Vec2 {
    let (column, row) = (column as i32, row as i32);
    let mut normal = normal;

    if grid.is_alive(column + normal.x as i32, row) {
        normal.x = 0.0;
    }
    if grid.is_alive(column, row + normal.y as i32) {
        normal.y = 0.0;
    }

    normal
}

/// Sweep the waiting ball across the field, driven by wall-clock seconds
pub fn update_idle(state: &mut GameState, wall_time: f64) {
    if state.phase != GamePhase::Idle {
        return;
    }
    let x = FIELD_SIZE / 2.0 + wall_time.cos() as f32 * IDLE_SWEEP_AMPLITUDE;
    state.ball.pos = Vec2::new(x, BALL_START_Y);
    state.previous.ball_pos = state.ball.pos;
}

/// Fire the ball from wherever the sweep put it toward the paddle's middle
pub fn launch(state: &mut GameState) {
    if state.phase != GamePhase::Idle {
        return;
    }
    state.ball.dir = (state.paddle.middle() - state.ball.pos).normalize_or_zero();
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::Launched);
    log::debug!("Launched from {:?} toward {:?}", state.ball.pos, state.ball.dir);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_state(pos: Vec2, dir: Vec2) -> GameState {
        let mut state = GameState::new();
        state.phase = GamePhase::Playing;
        state.ball.pos = pos;
        state.ball.dir = dir.normalize();
        state.previous = state.snapshot();
        state
    }

    fn kill_column_except(state: &mut GameState, column: usize, keep_row: usize) {
        for row in 0..GRID_ROWS {
            if row != keep_row {
                state.blocks.remove(column, row);
            }
        }
    }

    #[test]
    fn test_tick_idle_does_nothing() {
        let mut state = GameState::new();
        let before = state.clone();

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.ball, before.ball);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_launch_aims_at_paddle_middle() {
        let mut state = GameState::new();
        launch(&mut state);

        assert_eq!(state.phase, GamePhase::Playing);
        // Ball starts straight above the centred paddle
        assert!((state.ball.dir - Vec2::new(0.0, 1.0)).length() < 1e-6);
        assert_eq!(state.drain_events(), vec![GameEvent::Launched]);
    }

    #[test]
    fn test_launch_from_sweep_position() {
        let mut state = GameState::new();
        update_idle(&mut state, 0.0);
        assert_eq!(
            state.ball.pos,
            Vec2::new(FIELD_SIZE / 2.0 + IDLE_SWEEP_AMPLITUDE, BALL_START_Y)
        );

        launch(&mut state);

        let expected = (state.paddle.middle() - state.ball.pos).normalize();
        assert!((state.ball.dir - expected).length() < 1e-6);
        assert!((state.ball.dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_idle_sweep_keeps_previous_in_sync() {
        let mut state = GameState::new();
        update_idle(&mut state, 1.3);
        assert_eq!(state.previous.ball_pos, state.ball.pos);
        assert_eq!(state.ball.pos.y, BALL_START_Y);
    }

    #[test]
    fn test_game_over_triggers_once() {
        let start_y = FIELD_SIZE + GAME_OVER_MARGIN - 0.5;
        let mut state = playing_state(Vec2::new(100.0, start_y), Vec2::new(0.0, 1.0));

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        let frozen = state.ball;

        tick(&mut state, &TickInput::default(), SIM_DT);
        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.ball, frozen);
        let game_overs = state
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::GameOver)
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_ball_inside_margin_keeps_playing() {
        let mut state = playing_state(Vec2::new(100.0, FIELD_SIZE + 1.0), Vec2::new(0.0, 1.0));
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_paddle_moves_with_keys() {
        let mut state = playing_state(Vec2::new(160.0, 200.0), Vec2::new(0.0, -1.0));
        let start_x = state.paddle.x;

        let input = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!((state.paddle.x - (start_x - PADDLE_SPEED * SIM_DT)).abs() < 1e-4);

        // Both keys cancel out
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        let x = state.paddle.x;
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.paddle.x, x);
    }

    #[test]
    fn test_paddle_bounce_sends_ball_up() {
        let mut state = playing_state(
            Vec2::new(160.0, PADDLE_POS_Y - BALL_RADIUS - 1.0),
            Vec2::new(0.3, 1.0),
        );
        tick(&mut state, &TickInput::default(), SIM_DT);

        assert!(state.ball.dir.y < 0.0);
        assert_eq!(state.ball.pos.y, PADDLE_POS_Y - BALL_RADIUS);
        assert!(state.drain_events().contains(&GameEvent::PaddleHit));
    }

    #[test]
    fn test_score_red_plus_yellow() {
        let mut state = GameState::new();
        state.phase = GamePhase::Playing;

        // Yellow: bottom row of column 0, hit from below
        let yellow = BlockGrid::block_rect(0, 7);
        state.ball.pos = Vec2::new(yellow.center().x, yellow.bottom() + BALL_RADIUS + 1.0);
        state.ball.dir = Vec2::new(0.0, -1.0);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.score, 2);
        assert!(state.ball.dir.y > 0.0);

        // Red: clear a path up column 5 to its top block
        kill_column_except(&mut state, 5, 0);
        let red = BlockGrid::block_rect(5, 0);
        state.ball.pos = Vec2::new(red.center().x, red.bottom() + BALL_RADIUS + 1.0);
        state.ball.dir = Vec2::new(0.0, -1.0);
        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.score, 10);
        assert!(!state.blocks.is_alive(0, 7));
        assert!(!state.blocks.is_alive(5, 0));
    }

    #[test]
    fn test_one_block_per_step_column_major() {
        // Straddles the seam between columns 2 and 3 of the bottom row
        let seam_x = BlockGrid::block_rect(3, 7).left();
        let bottom = BlockGrid::block_rect(3, 7).bottom();
        let mut state = playing_state(Vec2::new(seam_x, bottom + 2.0), Vec2::new(0.0, -1.0));

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(!state.blocks.is_alive(2, 7));
        assert!(state.blocks.is_alive(3, 7));
        assert_eq!(state.score, 2);

        // The other block goes on the following step
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(!state.blocks.is_alive(3, 7));
        assert_eq!(state.score, 4);
    }

    #[test]
    fn test_dead_block_never_hit_again() {
        let mut state = playing_state(Vec2::new(70.0, 125.0), Vec2::new(0.0, -1.0));
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.score, 2);

        // Put the ball straight back inside the dead block's rectangle
        state.ball.pos = BlockGrid::block_rect(0, 7).center();
        state.ball.dir = Vec2::new(1.0, 0.0);
        state.previous = state.snapshot();
        tick(&mut state, &TickInput::default(), SIM_DT);

        assert!(!state.blocks.is_alive(0, 7));
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_neighbours_suppress_normal() {
        let mut grid = BlockGrid::new();

        // Surrounded: both components point into live blocks
        let normal = suppress_blocked_axes(&grid, 3, 6, Vec2::new(-1.0, 1.0));
        assert_eq!(normal, Vec2::ZERO);

        grid.remove(3, 7);
        let normal = suppress_blocked_axes(&grid, 3, 6, Vec2::new(-1.0, 1.0));
        assert_eq!(normal, Vec2::new(0.0, 1.0));

        // Grid edge counts as empty
        let normal = suppress_blocked_axes(&grid, 0, 0, Vec2::new(-1.0, -1.0));
        assert_eq!(normal, Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn test_time_ticks_counts_steps() {
        let mut state = playing_state(Vec2::new(160.0, 200.0), Vec2::new(0.0, -1.0));
        for _ in 0..5 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.time_ticks, 5);
    }
}
