//! Pure gameplay math.
//!
//! Nothing here owns state. Randomness comes in through an injected `Rng` so
//! callers control determinism (tests pass a seeded `StdRng`).

use rand::Rng;

use crate::entities::Body;
use crate::pipe::Pipe;

// ── Collision ─────────────────────────────────────────────────────────────────

/// Hitbox shrink, as fractions of the bird's size. The top is forgiving and the
/// bottom tight on purpose.
pub const HITBOX_MARGIN_SIDES: f32 = 0.20;
pub const HITBOX_MARGIN_TOP: f32 = 0.35;
pub const HITBOX_MARGIN_BOTTOM: f32 = 0.13;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hitbox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

pub fn hitbox(bird: &Body) -> Hitbox {
    let side = bird.width * HITBOX_MARGIN_SIDES;
    Hitbox {
        x1: bird.x + side,
        y1: bird.y + bird.height * HITBOX_MARGIN_TOP,
        x2: bird.right() - side,
        y2: bird.bottom() - bird.height * HITBOX_MARGIN_BOTTOM,
    }
}

/// True when the shrunk bird box overlaps either segment of `pipe`.
pub fn check_collision(bird: &Body, pipe: &Pipe) -> bool {
    let hb = hitbox(bird);
    let overlaps_x = hb.x1 < pipe.body().right() && hb.x2 > pipe.x();
    overlaps_x && (hb.y1 < pipe.top_edge() || hb.y2 > pipe.bottom_edge())
}

/// The full body touches the bottom of the screen.
pub fn hits_ground(bird: &Body, screen_height: f32) -> bool {
    bird.bottom() >= screen_height
}

/// The ceiling only counts once the hitbox top has left the screen.
pub fn hits_ceiling(bird: &Body) -> bool {
    bird.y + bird.height * HITBOX_MARGIN_TOP <= 0.0
}

/// The bird's x has passed the pipe's trailing edge.
pub fn has_cleared(bird: &Body, pipe: &Pipe) -> bool {
    bird.x > pipe.body().right()
}

// ── Pipe generation ───────────────────────────────────────────────────────────

/// Allowed range for a gap center. Collapses to the screen middle when the
/// margins do not fit.
pub fn gap_bounds(screen_height: f32, margin: f32) -> (f32, f32) {
    let min = margin;
    let max = screen_height - margin;
    if min <= max {
        (min, max)
    } else {
        let mid = screen_height / 2.0;
        (mid, mid)
    }
}

pub fn uniform_gap_center(rng: &mut impl Rng, (min, max): (f32, f32)) -> f32 {
    rng.gen_range(min..=max)
}

/// Uniform pick, plus bounded jitter, clamped back into range. The clamp piles a
/// little extra weight onto the extremes compared to a plain uniform draw.
pub fn jittered_gap_center(rng: &mut impl Rng, bounds: (f32, f32), jitter: f32) -> f32 {
    let (min, max) = bounds;
    let mut center = uniform_gap_center(rng, bounds);
    let jitter = jitter.abs();
    if jitter > 0.0 {
        center += rng.gen_range(-jitter..=jitter);
    }
    center.clamp(min, max)
}

/// Seconds between spawns that keep `spacing` pixels between pipes at `speed`.
pub fn spawn_interval(spacing: f32, speed: f32) -> f32 {
    let speed = speed.abs();
    if speed > 0.0 {
        spacing / speed
    } else {
        f32::INFINITY
    }
}

// ── Background ────────────────────────────────────────────────────────────────

/// Width of the background once scaled to cover the screen, keeping aspect.
pub fn background_fill_width(background: (f32, f32), screen: (f32, f32)) -> f32 {
    let bg_w = background.0.max(1.0);
    let bg_h = background.1.max(1.0);
    bg_w * (screen.0 / bg_w).max(screen.1 / bg_h)
}

/// Keep a leftward scroll offset within `(-width, 0]`.
pub fn wrap_scroll(mut offset: f32, width: f32) -> f32 {
    if width <= 0.0 {
        return 0.0;
    }
    while offset <= -width {
        offset += width;
    }
    offset
}

// ── Levels ────────────────────────────────────────────────────────────────────

/// Level a score has earned, clamped to the last available level.
pub fn level_for_score(score: u32, points_per_level: u32, level_count: usize) -> usize {
    if level_count == 0 {
        return 0;
    }
    let earned = (score / points_per_level.max(1)) as usize;
    earned.min(level_count - 1)
}
