//! Tick rate, gameplay tunables and session configuration.
//!
//! Every distance in `Tunables` is expressed at the 1280×720 design resolution and
//! scaled by `Scale` for the actual screen size.

use std::path::PathBuf;

use crate::error::{GameError, GameResult};

/// Simulation ticks per second. Bird physics constants are per tick at this rate.
pub const TICK_RATE: u32 = 60;

/// Fixed timestep handed to `update` every tick, in seconds.
pub const TICK: f32 = 1.0 / TICK_RATE as f32;

pub const DESIGN_WIDTH: f32 = 1280.0;
pub const DESIGN_HEIGHT: f32 = 720.0;

/// Resolutions offered by the picker before the main loop.
pub const RESOLUTION_PRESETS: [(u32, u32); 4] = [(800, 600), (1280, 720), (1600, 900), (1920, 1080)];

pub const ENV_RESOLUTION: &str = "TRAVELING_DRAGON_RESOLUTION";
pub const ENV_SAVE: &str = "TRAVELING_DRAGON_SAVE";
pub const ENV_LOG: &str = "TRAVELING_DRAGON_LOG";
pub const ENV_SEED: &str = "TRAVELING_DRAGON_SEED";

// ── Scale ─────────────────────────────────────────────────────────────────────

/// Ratio between the screen and the design resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

impl Scale {
    pub fn for_screen(width: f32, height: f32) -> Self {
        Scale {
            x: width / DESIGN_WIDTH,
            y: height / DESIGN_HEIGHT,
        }
    }
}

// ── Tunables ──────────────────────────────────────────────────────────────────

/// Gameplay constants. Bird values are per tick, pipe speeds per second.
#[derive(Clone, Debug, PartialEq)]
pub struct Tunables {
    pub bird_gravity: f32,
    pub bird_flap_force: f32,
    pub bird_max_fall_speed: f32,
    /// Sprite frame size used when no sprite sheet is known.
    pub bird_frame_size: (f32, f32),
    /// Extra enlargement applied on top of the screen scale.
    pub bird_size_factor: f32,
    pub bird_initial_y_ratio: f32,
    pub bird_animation_ticks: u32,
    pub bird_rotation_blend: f32,

    pub pipe_width: f32,
    pub pipe_spacing: f32,
    pub pipe_initial_speed: f32,
    pub gap_height: f32,
    /// Distance kept between a gap center and the top/bottom of the screen.
    pub gap_margin: f32,
    pub gap_jitter: f32,
    /// Where the first seeded pipe sits, as a fraction of the screen width.
    pub first_pipe_ratio: f32,
    pub max_pipes: usize,
    pub background_scroll_per_tick: f32,

    pub points_per_level: u32,
    pub level_speed_increase_pct: f32,
    pub transition_secs: f32,
    pub warning_secs: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            bird_gravity: 0.2,
            bird_flap_force: -6.0,
            bird_max_fall_speed: 10.0,
            bird_frame_size: (34.0, 24.0),
            bird_size_factor: 1.2,
            bird_initial_y_ratio: 0.4,
            bird_animation_ticks: 8,
            bird_rotation_blend: 0.25,

            pipe_width: 538.0 * 0.25,
            pipe_spacing: 420.0,
            pipe_initial_speed: 150.0,
            gap_height: 250.0,
            gap_margin: 200.0,
            gap_jitter: 80.0,
            first_pipe_ratio: 0.75,
            max_pipes: 15,
            background_scroll_per_tick: 1.0,

            points_per_level: 15,
            level_speed_increase_pct: 10.0,
            transition_secs: 1.5,
            warning_secs: 3.0,
        }
    }
}

// ── Levels ────────────────────────────────────────────────────────────────────

/// Art and music for one level. Only `background_size` feeds the simulation
/// (background scroll wrap); the rest is passed through to the front end.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelTheme {
    pub background: String,
    pub pipe: String,
    pub music: String,
    /// Native size of the background art. `None` disables scrolling.
    pub background_size: Option<(f32, f32)>,
}

impl LevelTheme {
    pub fn numbered(n: usize) -> Self {
        LevelTheme {
            background: format!("background{n}.png"),
            pipe: format!("pipe{n}.png"),
            music: format!("level{n}.ogg"),
            background_size: Some((DESIGN_WIDTH, DESIGN_HEIGHT)),
        }
    }
}

pub fn default_levels() -> Vec<LevelTheme> {
    (1..=7).map(LevelTheme::numbered).collect()
}

// ── Session config ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    pub save_path: PathBuf,
    pub log_path: PathBuf,
    /// Fixed seed for every random draw of the session; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub tunables: Tunables,
    pub levels: Vec<LevelTheme>,
}

impl Default for GameConfig {
    fn default() -> Self {
        let dir = data_dir();
        Self {
            width: DESIGN_WIDTH as u32,
            height: DESIGN_HEIGHT as u32,
            save_path: dir.join("players.txt"),
            log_path: dir.join("traveling_dragon.log"),
            seed: None,
            tunables: Tunables::default(),
            levels: default_levels(),
        }
    }
}

impl GameConfig {
    /// Defaults overridden by `TRAVELING_DRAGON_*` environment variables.
    /// Rejected values keep their default and come back as errors for the
    /// caller to log once a subscriber is installed.
    pub fn from_env() -> (Self, Vec<GameError>) {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<GameError>) {
        let mut config = GameConfig::default();
        let mut rejected = Vec::new();

        if let Some(raw) = lookup(ENV_RESOLUTION) {
            match parse_resolution(&raw) {
                Ok((w, h)) => {
                    config.width = w;
                    config.height = h;
                }
                Err(err) => rejected.push(err),
            }
        }
        if let Some(path) = lookup(ENV_SAVE) {
            config.save_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(ENV_LOG) {
            config.log_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup(ENV_SEED) {
            match raw.trim().parse() {
                Ok(seed) => config.seed = Some(seed),
                Err(_) => rejected.push(GameError::InvalidSeed(raw)),
            }
        }
        (config, rejected)
    }

    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn screen_size(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }
}

/// Parse `"WIDTHxHEIGHT"` (case-insensitive `x`), rejecting zero sizes.
pub fn parse_resolution(raw: &str) -> GameResult<(u32, u32)> {
    let invalid = || GameError::InvalidResolution(raw.to_string());
    let lower = raw.trim().to_ascii_lowercase();
    let (w, h) = lower.split_once('x').ok_or_else(invalid)?;
    let w: u32 = w.trim().parse().map_err(|_| invalid())?;
    let h: u32 = h.trim().parse().map_err(|_| invalid())?;
    if w == 0 || h == 0 {
        return Err(invalid());
    }
    Ok((w, h))
}

fn data_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".traveling_dragon")
}
