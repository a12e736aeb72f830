//! Builds the frame's triangle list from game state

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::PADDLE_POS_Y;
use crate::sim::{BlockGrid, GameState, ROW_STYLES, Rect, Snapshot};

/// Segments used for the ball outline
const BALL_SEGMENTS: u32 = 16;
/// Width of the block bevel lines
const BEVEL_WIDTH: f32 = 1.0;

/// Draw list for one frame
///
/// `view` carries the interpolated ball/paddle positions; everything else
/// comes straight from the state.
pub fn build_scene(state: &GameState, view: &Snapshot) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(64 + state.blocks.alive_count() * 30);

    let paddle = Rect::new(
        view.paddle_x,
        PADDLE_POS_Y,
        state.paddle.width,
        state.paddle.height,
    );
    vertices.extend(shapes::rect(&paddle, colors::PADDLE));
    vertices.extend(shapes::circle(
        view.ball_pos,
        state.ball.radius,
        colors::BALL,
        BALL_SEGMENTS,
    ));

    for (column, row) in state.blocks.iter_alive() {
        let r = BlockGrid::block_rect(column, row);
        vertices.extend(shapes::rect(&r, colors::rgba(ROW_STYLES[row].color)));
        vertices.extend(bevel(&r));
    }

    vertices
}

/// Highlight on the top/left edges, shadow on the bottom/right
fn bevel(r: &Rect) -> Vec<Vertex> {
    let top_left = glam::Vec2::new(r.left(), r.top());
    let top_right = glam::Vec2::new(r.right(), r.top());
    let bottom_left = glam::Vec2::new(r.left(), r.bottom());
    let bottom_right = glam::Vec2::new(r.right(), r.bottom());

    let mut vertices = Vec::with_capacity(24);
    vertices.extend(shapes::line(top_left, top_right, BEVEL_WIDTH, colors::BEVEL_LIGHT));
    vertices.extend(shapes::line(top_left, bottom_left, BEVEL_WIDTH, colors::BEVEL_LIGHT));
    vertices.extend(shapes::line(top_right, bottom_right, BEVEL_WIDTH, colors::BEVEL_SHADOW));
    vertices.extend(shapes::line(bottom_left, bottom_right, BEVEL_WIDTH, colors::BEVEL_SHADOW));
    vertices
}
