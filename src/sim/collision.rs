//! Collision detection and response for the play field
//!
//! The ball is a circle, everything it can hit (paddle, blocks, walls) is an
//! axis-aligned rectangle. Responses are reflection-based: the ball keeps its
//! speed, only the direction changes.
//!
//! Collision normals are not derived from the exact contact point. Instead
//! the ball's position at the start of the step is compared against the
//! rectangle's edges on each axis independently, and a unit component is
//! accumulated for every edge the ball was outside of.

use glam::Vec2;

use super::state::Ball;

/// Axis-aligned rectangle, origin top-left, y pointing down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Point of the rectangle closest to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.left(), self.right()),
            p.y.clamp(self.top(), self.bottom()),
        )
    }
}

/// Circle vs rectangle overlap test (touching counts as overlapping)
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = rect.closest_point(center);
    center.distance_squared(closest) <= radius * radius
}

/// Reflect a direction off a surface and renormalize it
///
/// Standard reflection: d' = d - 2(d·n)n, with n normalized first so
/// composite (corner) normals like (1, -1) work too.
#[inline]
pub fn reflect(dir: Vec2, normal: Vec2) -> Vec2 {
    let n = normal.normalize_or_zero();
    (dir - 2.0 * dir.dot(n) * n).normalize_or_zero()
}

/// Which walls the ball bounced off during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    pub left: bool,
    pub right: bool,
    pub top: bool,
}

impl WallHits {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top
    }
}

/// Bounce the ball off the left, right and top walls
///
/// The ball is clamped so its leading edge lies exactly on the wall, then its
/// direction is reflected about the wall's inward normal. The bottom is open.
pub fn resolve_walls(ball: &mut Ball, field_width: f32) -> WallHits {
    let mut hits = WallHits::default();

    if ball.pos.x + ball.radius > field_width {
        ball.pos.x = field_width - ball.radius;
        ball.dir = reflect(ball.dir, Vec2::new(-1.0, 0.0));
        hits.right = true;
    }

    if ball.pos.x - ball.radius < 0.0 {
        ball.pos.x = ball.radius;
        ball.dir = reflect(ball.dir, Vec2::new(1.0, 0.0));
        hits.left = true;
    }

    if ball.pos.y - ball.radius < 0.0 {
        ball.pos.y = ball.radius;
        ball.dir = reflect(ball.dir, Vec2::new(0.0, 1.0));
        hits.top = true;
    }

    hits
}

/// Collision normal for the paddle, pushing the ball out vertically
///
/// Both vertical tests compare against the paddle's bottom edge: a ball that
/// was anywhere above it is put back on top, so a fast paddle sweeping into
/// the ball from the side still bounces it upwards instead of swallowing it.
pub fn resolve_paddle(prev: Vec2, ball: &mut Ball, paddle: &Rect) -> Vec2 {
    let mut normal = Vec2::ZERO;

    if prev.y < paddle.bottom() {
        normal += Vec2::new(0.0, -1.0);
        ball.pos.y = paddle.top() - ball.radius;
    }

    if prev.y > paddle.bottom() {
        normal += Vec2::new(0.0, 1.0);
        ball.pos.y = paddle.bottom() + ball.radius;
    }

    if prev.x < paddle.left() {
        normal += Vec2::new(-1.0, 0.0);
    }

    if prev.x > paddle.right() {
        normal += Vec2::new(1.0, 0.0);
    }

    normal
}

/// Collision normal for a block, from where the ball was before the step
pub fn block_normal(prev: Vec2, block: &Rect) -> Vec2 {
    let mut normal = Vec2::ZERO;

    if prev.y < block.top() {
        normal += Vec2::new(0.0, -1.0);
    }
    if prev.y > block.bottom() {
        normal += Vec2::new(0.0, 1.0);
    }
    if prev.x < block.left() {
        normal += Vec2::new(-1.0, 0.0);
    }
    if prev.x > block.right() {
        normal += Vec2::new(1.0, 0.0);
    }

    normal
}
