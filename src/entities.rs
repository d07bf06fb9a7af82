//! Shared entity types: plain data with small accessors.

// ── Positioned, sized body ────────────────────────────────────────────────────

/// Axis-aligned box in screen pixels, origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Body { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

// ── Screens ───────────────────────────────────────────────────────────────────

/// Which screen is active. Exactly one at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameState {
    Menu,
    /// Fade-in before the first tick of a round.
    StartingRound,
    Playing,
    GameOver,
    Ranking,
    ConfigScreen,
}

/// Per-round lifecycle inside a `Scenario`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundPhase {
    /// Pipes seeded, no tick has run yet.
    Populated,
    Running,
    GameOver,
}

// ── Player record ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub nickname: String,
    games_played: u32,
    high_score: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, nickname: impl Into<String>) -> Self {
        Player {
            name: name.into(),
            nickname: nickname.into(),
            games_played: 0,
            high_score: 0,
        }
    }

    /// Rebuild a record exactly as it was stored.
    pub fn from_stored(name: String, nickname: String, games_played: u32, high_score: u32) -> Self {
        Player {
            name,
            nickname,
            games_played,
            high_score,
        }
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Count one finished round; the high score never decreases.
    pub fn record_round(&mut self, score: u32) {
        self.games_played += 1;
        self.high_score = self.high_score.max(score);
    }
}

// ── Round outcome ─────────────────────────────────────────────────────────────

/// What the game-over screen shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundSummary {
    pub score: u32,
    /// The player's best before this round.
    pub personal_best: u32,
    /// Best across all known players before this round.
    pub global_best: u32,
    pub beat_personal: bool,
    pub beat_global: bool,
}

impl RoundSummary {
    pub fn new(score: u32, personal_best: u32, global_best: u32) -> Self {
        RoundSummary {
            score,
            personal_best,
            global_best,
            beat_personal: score > personal_best,
            beat_global: score > global_best,
        }
    }
}

// ── Presentation cues ─────────────────────────────────────────────────────────

/// One-shot effects the front end may react to (sound, flashes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Flap,
    Point,
    Die,
    LevelUp,
}

/// Background music the front end should be playing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Track {
    Menu,
    Level(usize),
}
