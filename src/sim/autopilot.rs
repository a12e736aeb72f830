//! Demo-mode steering: the paddle chases the ball

use super::state::GameState;

/// Paddle stops steering once its middle is this close to the target
const DEAD_ZONE: f32 = 2.0;

/// Which of the two direction keys the autopilot holds this step
pub fn steer(state: &GameState) -> (bool, bool) {
    // Sway the aim point across the paddle so the ball does not settle
    // into a loop that never reaches some blocks
    let sway = (state.time_ticks as f32 * 0.02).sin() * state.paddle.width * 0.3;
    let target = state.ball.pos.x + sway;
    let delta = target - state.paddle.middle().x;

    if delta < -DEAD_ZONE {
        (true, false)
    } else if delta > DEAD_ZONE {
        (false, true)
    } else {
        (false, false)
    }
}
