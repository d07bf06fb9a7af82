use traveling_dragon::bird::*;
use traveling_dragon::config::Tunables;

fn make_bird() -> Bird {
    Bird::new(1280.0, 720.0, None, &Tunables::default())
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

// ── construction ──────────────────────────────────────────────────────────────

#[test]
fn new_bird_is_centered_at_forty_percent_height() {
    let bird = make_bird();
    let body = bird.body();
    assert!(approx(body.width, 34.0 * 1.2));
    assert!(approx(body.height, 24.0 * 1.2));
    assert!(approx(body.x, 640.0 - body.width / 2.0));
    assert!(approx(body.y, 288.0));
    assert_eq!(bird.velocity_y(), 0.0);
    assert_eq!(bird.frame(), 0);
}

#[test]
fn sprite_frame_size_overrides_fallback() {
    let bird = Bird::new(1280.0, 720.0, Some((50.0, 40.0)), &Tunables::default());
    assert!(approx(bird.body().width, 60.0));
    assert!(approx(bird.body().height, 48.0));
}

#[test]
fn physics_scale_with_screen_height() {
    let bird = Bird::new(800.0, 600.0, None, &Tunables::default());
    let sy = 600.0 / 720.0;
    assert!(approx(bird.flap_force(), -6.0 * sy));
    assert!(approx(bird.max_fall_speed(), 10.0 * sy));
    assert!(approx(bird.body().height, 24.0 * sy * 1.2));
    assert!(approx(bird.initial_y(), 240.0));
}

// ── update ────────────────────────────────────────────────────────────────────

#[test]
fn update_applies_gravity_then_moves() {
    let mut bird = make_bird();
    bird.update();
    assert!(approx(bird.velocity_y(), 0.2));
    assert!(approx(bird.body().y, 288.2));
    bird.update();
    assert!(approx(bird.velocity_y(), 0.4));
    assert!(approx(bird.body().y, 288.6));
}

#[test]
fn fall_speed_is_capped() {
    let mut bird = make_bird();
    for _ in 0..200 {
        bird.update();
        assert!(bird.velocity_y() <= bird.max_fall_speed() + 1e-4);
    }
    assert!(approx(bird.velocity_y(), 10.0));
}

#[test]
fn flap_replaces_velocity() {
    let mut bird = make_bird();
    for _ in 0..30 {
        bird.update();
    }
    bird.flap();
    assert_eq!(bird.velocity_y(), bird.flap_force());
    bird.update();
    assert!(approx(bird.velocity_y(), -5.8));
}

#[test]
fn animation_advances_every_eight_ticks() {
    let mut bird = make_bird();
    for _ in 0..7 {
        bird.update();
    }
    assert_eq!(bird.frame(), 0);
    bird.update();
    assert_eq!(bird.frame(), 1);
    for _ in 0..16 {
        bird.update();
    }
    assert_eq!(bird.frame(), 0);
}

// ── rotation ──────────────────────────────────────────────────────────────────

#[test]
fn rotation_tilts_up_while_rising() {
    let mut bird = make_bird();
    bird.flap();
    bird.update();
    assert!(bird.rotation() < 0.0);
    assert!(bird.rotation() >= MAX_UP_ROTATION);
}

#[test]
fn rotation_stays_within_limits_while_falling() {
    let mut bird = make_bird();
    for _ in 0..100 {
        bird.update();
        assert!(bird.rotation() <= MAX_DOWN_ROTATION + 1e-5);
    }
    assert!(bird.rotation() > 0.0);
}

#[test]
fn disabled_rotation_stays_level() {
    let mut bird = make_bird();
    bird.set_rotation_enabled(false);
    bird.flap();
    for _ in 0..20 {
        bird.update();
        assert_eq!(bird.rotation(), 0.0);
    }
    assert!(!bird.is_rotation_enabled());
}

// ── reset / keep_on_screen ────────────────────────────────────────────────────

#[test]
fn reset_restores_start_state() {
    let mut bird = make_bird();
    let start = *bird.body();
    for _ in 0..40 {
        bird.update();
    }
    bird.reset();
    assert_eq!(*bird.body(), start);
    assert_eq!(bird.velocity_y(), 0.0);
    assert_eq!(bird.frame(), 0);
    assert_eq!(bird.rotation(), 0.0);
}

#[test]
fn keep_on_screen_clamps_below_ground() {
    let mut bird = make_bird();
    for _ in 0..200 {
        bird.update();
    }
    assert!(bird.body().bottom() > 720.0);
    bird.keep_on_screen();
    assert!(approx(bird.body().bottom(), 720.0));
}

#[test]
fn keep_on_screen_clamps_above_ceiling() {
    let mut bird = make_bird();
    for _ in 0..100 {
        bird.flap();
        bird.update();
    }
    assert!(bird.body().y < 0.0);
    bird.keep_on_screen();
    assert_eq!(bird.body().y, 0.0);
}
