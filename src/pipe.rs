//! Pipe pairs: the obstacles that scroll toward the bird.

use crate::entities::Body;

/// A top/bottom pipe pair. The body spans the full screen height; the gap is
/// carved out of it by `gap_center_y` and `gap_height`.
#[derive(Clone, Debug)]
pub struct Pipe {
    body: Body,
    gap_center_y: f32,
    gap_height: f32,
    /// Leftward speed magnitude in pixels per second.
    speed: f32,
    scored: bool,
}

impl Pipe {
    pub fn new(
        x: f32,
        gap_center_y: f32,
        gap_height: f32,
        speed: f32,
        width: f32,
        screen_height: f32,
    ) -> Self {
        Pipe {
            body: Body::new(x, 0.0, width, screen_height),
            gap_center_y,
            gap_height,
            speed: speed.abs(),
            scored: false,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.body.x -= self.speed * dt;
    }

    pub fn is_off_screen(&self) -> bool {
        self.body.right() < 0.0
    }

    /// Bottom edge of the top segment (top of the gap).
    pub fn top_edge(&self) -> f32 {
        self.gap_center_y - self.gap_height / 2.0
    }

    /// Top edge of the bottom segment (bottom of the gap).
    pub fn bottom_edge(&self) -> f32 {
        self.gap_center_y + self.gap_height / 2.0
    }

    pub fn has_scored(&self) -> bool {
        self.scored
    }

    pub fn set_scored(&mut self, scored: bool) {
        self.scored = scored;
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.abs();
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn x(&self) -> f32 {
        self.body.x
    }

    pub fn width(&self) -> f32 {
        self.body.width
    }

    pub fn gap_center_y(&self) -> f32 {
        self.gap_center_y
    }

    pub fn gap_height(&self) -> f32 {
        self.gap_height
    }
}
