//! The player-controlled bird.
//!
//! Physics run on the fixed tick (`config::TICK_RATE`): gravity and flap force are
//! per-tick velocities, so `update` takes no delta time.

use std::f32::consts::PI;

use crate::config::{Scale, Tunables};
use crate::entities::Body;

/// Nose-up limit in radians (rising).
pub const MAX_UP_ROTATION: f32 = -30.0 * PI / 180.0;
/// Nose-down limit in radians (falling).
pub const MAX_DOWN_ROTATION: f32 = 70.0 * PI / 180.0;

pub const ANIMATION_FRAMES: usize = 3;

#[derive(Clone, Debug)]
pub struct Bird {
    body: Body,
    screen_width: f32,
    screen_height: f32,
    initial_y: f32,

    velocity_y: f32,
    gravity: f32,
    flap_force: f32,
    max_fall_speed: f32,

    frame: usize,
    frame_timer: u32,
    animation_ticks: u32,

    rotation: f32,
    rotation_blend: f32,
    rotation_enabled: bool,
}

impl Bird {
    /// `frame_size` is one sprite-sheet frame in source pixels; `None` uses the
    /// tunable fallback so physics never depend on art being present.
    pub fn new(
        screen_width: f32,
        screen_height: f32,
        frame_size: Option<(f32, f32)>,
        tunables: &Tunables,
    ) -> Self {
        let scale = Scale::for_screen(screen_width, screen_height);
        let (frame_w, frame_h) = frame_size.unwrap_or(tunables.bird_frame_size);
        let width = frame_w * scale.x * tunables.bird_size_factor;
        let height = frame_h * scale.y * tunables.bird_size_factor;
        let initial_y = screen_height * tunables.bird_initial_y_ratio;

        Bird {
            body: Body::new(screen_width / 2.0 - width / 2.0, initial_y, width, height),
            screen_width,
            screen_height,
            initial_y,
            velocity_y: 0.0,
            gravity: tunables.bird_gravity * scale.y,
            flap_force: tunables.bird_flap_force * scale.y,
            max_fall_speed: tunables.bird_max_fall_speed * scale.y,
            frame: 0,
            frame_timer: 0,
            animation_ticks: tunables.bird_animation_ticks.max(1),
            rotation: 0.0,
            rotation_blend: tunables.bird_rotation_blend,
            rotation_enabled: true,
        }
    }

    /// Advance one tick.
    pub fn update(&mut self) {
        self.velocity_y += self.gravity;
        self.body.y += self.velocity_y;
        self.velocity_y = self.velocity_y.min(self.max_fall_speed);

        self.frame_timer += 1;
        if self.frame_timer >= self.animation_ticks {
            self.frame = (self.frame + 1) % ANIMATION_FRAMES;
            self.frame_timer = 0;
        }

        if self.rotation_enabled {
            let target = if self.velocity_y < 0.0 {
                MAX_UP_ROTATION
            } else {
                MAX_DOWN_ROTATION
            };
            self.rotation += (target - self.rotation) * self.rotation_blend;
            self.rotation = self.rotation.clamp(MAX_UP_ROTATION, MAX_DOWN_ROTATION);
        } else {
            self.rotation = 0.0;
        }
    }

    /// Replace the vertical velocity with the flap force.
    pub fn flap(&mut self) {
        self.velocity_y = self.flap_force;
        self.frame = 0;
        self.frame_timer = 0;
    }

    pub fn reset(&mut self) {
        self.body.x = self.screen_width / 2.0 - self.body.width / 2.0;
        self.body.y = self.initial_y;
        self.velocity_y = 0.0;
        self.frame = 0;
        self.frame_timer = 0;
        self.rotation = 0.0;
    }

    /// Pull the body back inside `[0, screen_height]`. Only used once a round has
    /// ended; during play leaving the screen is a game over instead.
    pub fn keep_on_screen(&mut self) {
        let max_y = (self.screen_height - self.body.height).max(0.0);
        self.body.y = self.body.y.clamp(0.0, max_y);
    }

    pub fn set_rotation_enabled(&mut self, on: bool) {
        self.rotation_enabled = on;
        if !on {
            self.rotation = 0.0;
        }
    }

    pub fn is_rotation_enabled(&self) -> bool {
        self.rotation_enabled
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn velocity_y(&self) -> f32 {
        self.velocity_y
    }

    pub fn flap_force(&self) -> f32 {
        self.flap_force
    }

    pub fn max_fall_speed(&self) -> f32 {
        self.max_fall_speed
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn initial_y(&self) -> f32 {
        self.initial_y
    }
}
