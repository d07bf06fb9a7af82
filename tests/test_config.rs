use std::collections::HashMap;
use std::path::Path;

use traveling_dragon::config::*;
use traveling_dragon::error::GameError;

#[test]
fn parse_resolution_accepts_common_forms() {
    assert_eq!(parse_resolution("800x600").unwrap(), (800, 600));
    assert_eq!(parse_resolution("1920X1080").unwrap(), (1920, 1080));
    assert_eq!(parse_resolution(" 1280 x 720 ").unwrap(), (1280, 720));
}

#[test]
fn parse_resolution_rejects_garbage() {
    for raw in ["800", "0x600", "800x0", "axb", "", "800x600x2"] {
        assert!(
            matches!(parse_resolution(raw), Err(GameError::InvalidResolution(_))),
            "{raw:?} should be rejected"
        );
    }
}

#[test]
fn presets_all_parse_back() {
    for (w, h) in RESOLUTION_PRESETS {
        assert_eq!(parse_resolution(&format!("{w}x{h}")).unwrap(), (w, h));
    }
}

#[test]
fn scale_is_relative_to_design_resolution() {
    let s = Scale::for_screen(1280.0, 720.0);
    assert_eq!((s.x, s.y), (1.0, 1.0));
    let s = Scale::for_screen(640.0, 1440.0);
    assert_eq!((s.x, s.y), (0.5, 2.0));
}

#[test]
fn tick_is_one_sixtieth() {
    assert!((TICK * TICK_RATE as f32 - 1.0).abs() < 1e-6);
}

#[test]
fn default_tunables_match_the_classic_feel() {
    let t = Tunables::default();
    assert_eq!(t.bird_gravity, 0.2);
    assert_eq!(t.bird_flap_force, -6.0);
    assert_eq!(t.bird_max_fall_speed, 10.0);
    assert_eq!(t.pipe_spacing, 420.0);
    assert_eq!(t.gap_height, 250.0);
    assert_eq!(t.max_pipes, 15);
    assert_eq!(t.points_per_level, 15);
    assert_eq!(t.transition_secs, 1.5);
}

#[test]
fn seven_numbered_levels_by_default() {
    let levels = default_levels();
    assert_eq!(levels.len(), 7);
    assert_eq!(levels[0].background, "background1.png");
    assert_eq!(levels[6].pipe, "pipe7.png");
    assert_eq!(levels[3].music, "level4.ogg");
}

#[test]
fn default_config_uses_design_resolution() {
    let c = GameConfig::default();
    assert_eq!(c.screen_size(), (1280.0, 720.0));
    assert!(c.save_path.ends_with("players.txt"));
    assert!(c.seed.is_none());

    let c = c.with_resolution(800, 600);
    assert_eq!((c.width, c.height), (800, 600));
}

// ── environment overrides ─────────────────────────────────────────────────────

fn from_pairs(pairs: &[(&str, &str)]) -> (GameConfig, Vec<GameError>) {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    GameConfig::from_vars(|key| vars.get(key).cloned())
}

#[test]
fn no_overrides_gives_defaults() {
    let (c, rejected) = from_pairs(&[]);
    assert!(rejected.is_empty());
    assert_eq!((c.width, c.height), (1280, 720));
    assert!(c.seed.is_none());
}

#[test]
fn valid_overrides_apply() {
    let (c, rejected) = from_pairs(&[
        (ENV_RESOLUTION, "800x600"),
        (ENV_SEED, " 42 "),
        (ENV_SAVE, "/tmp/dragon/players.txt"),
        (ENV_LOG, "/tmp/dragon/game.log"),
    ]);
    assert!(rejected.is_empty());
    assert_eq!((c.width, c.height), (800, 600));
    assert_eq!(c.seed, Some(42));
    assert_eq!(c.save_path, Path::new("/tmp/dragon/players.txt"));
    assert_eq!(c.log_path, Path::new("/tmp/dragon/game.log"));
}

#[test]
fn bad_overrides_are_returned_and_defaults_kept() {
    let (c, rejected) = from_pairs(&[(ENV_RESOLUTION, "huge"), (ENV_SEED, "-3")]);
    assert_eq!((c.width, c.height), (1280, 720));
    assert!(c.seed.is_none());
    assert_eq!(rejected.len(), 2);
    assert!(matches!(&rejected[0], GameError::InvalidResolution(_)));
    assert!(matches!(&rejected[1], GameError::InvalidSeed(s) if s == "-3"));
}
