//! Top-level state machine: which screen is active, what a tick does on it, level
//! progression, and writing finished rounds to the player store.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace, warn};

use crate::compute::level_for_score;
use crate::config::{GameConfig, LevelTheme, RESOLUTION_PRESETS};
use crate::entities::{Cue, GameState, Player, RoundSummary, Track};
use crate::menu::Menu;
use crate::players::PlayerManager;
use crate::scenario::{Backdrop, Scenario};

/// Input, already mapped from raw keys/clicks by the front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    // Menu
    Play,
    OpenRanking,
    OpenConfig,
    Quit,
    TypeChar(char),
    Backspace,
    /// Enter in the nickname field; same as `Play`.
    Submit,
    // Playing
    Flap,
    Escape,
    // Game over
    Retry,
    BackToMenu,
    // Ranking / config
    Back,
    NextResolution,
    PrevResolution,
}

pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    scenario: Scenario,
    players: PlayerManager,
    menu: Menu,
    /// Nickname of the player the next or current round belongs to.
    current_player: Option<String>,
    level: usize,
    /// Seconds into the running fade (round start or level change), if any.
    transition: Option<f32>,
    round_prepared: bool,
    last_round: Option<RoundSummary>,
    cues: Vec<Cue>,
    track: Track,
    quit: bool,
    /// Source of every scenario seed, so a fixed config seed replays a session.
    seeds: StdRng,
}

impl GameEngine {
    pub fn new(config: GameConfig, players: PlayerManager) -> Self {
        let mut seeds = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let scenario = build_scenario(&config, 0, seeds.gen());
        GameEngine {
            config,
            state: GameState::Menu,
            scenario,
            players,
            menu: Menu::new(),
            current_player: None,
            level: 0,
            transition: None,
            round_prepared: false,
            last_round: None,
            cues: Vec::new(),
            track: Track::Menu,
            quit: false,
            seeds,
        }
    }

    // ── Input ────────────────────────────────────────────────────────────────

    pub fn handle(&mut self, action: Action) {
        match (self.state, action) {
            (GameState::Menu, Action::TypeChar(c)) => self.menu.type_char(c),
            (GameState::Menu, Action::Backspace) => self.menu.backspace(),
            (GameState::Menu, Action::Play | Action::Submit) => self.try_start_round(),
            (GameState::Menu, Action::OpenRanking) => {
                let nickname = self.menu.nickname();
                self.current_player = self.players.find(nickname).map(|p| p.nickname.clone());
                self.state = GameState::Ranking;
            }
            (GameState::Menu, Action::OpenConfig) => self.state = GameState::ConfigScreen,
            (GameState::Menu, Action::Quit) => {
                info!("quit requested");
                self.quit = true;
            }

            (GameState::Playing, Action::Flap) => {
                if self.transition.is_none() && !self.scenario.is_game_over() {
                    self.scenario.flap();
                    self.cues.push(Cue::Flap);
                }
            }
            (GameState::Playing, Action::Escape) => {
                debug!(score = self.scenario.score(), "round abandoned");
                self.transition = None;
                self.go_to_menu();
            }

            (GameState::GameOver, Action::Retry) => self.start_playing(),
            (GameState::GameOver, Action::BackToMenu | Action::Escape) => self.go_to_menu(),

            (GameState::Ranking | GameState::ConfigScreen, Action::Back | Action::Escape) => {
                self.go_to_menu()
            }
            (GameState::ConfigScreen, Action::NextResolution) => self.cycle_resolution(1),
            (GameState::ConfigScreen, Action::PrevResolution) => {
                self.cycle_resolution(RESOLUTION_PRESETS.len() - 1)
            }

            (state, action) => trace!(?state, ?action, "action ignored"),
        }
    }

    fn try_start_round(&mut self) {
        let nickname = self.menu.nickname().to_string();
        if nickname.is_empty() {
            self.menu
                .display_warning("Enter a nickname to play!", self.config.tunables.warning_secs);
            return;
        }
        match self.players.find_or_register(&nickname) {
            Ok(_) => {
                self.current_player = Some(nickname);
                self.state = GameState::StartingRound;
                self.transition = Some(0.0);
                self.round_prepared = false;
            }
            Err(err) => {
                warn!(%err, "could not get a player record");
                self.menu
                    .display_warning("Could not create player!", self.config.tunables.warning_secs);
            }
        }
    }

    /// Step through the presets. Takes effect from the next round.
    fn cycle_resolution(&mut self, step: usize) {
        let current = (self.config.width, self.config.height);
        let next = match RESOLUTION_PRESETS.iter().position(|&p| p == current) {
            Some(i) => (i + step) % RESOLUTION_PRESETS.len(),
            None => 0,
        };
        let (width, height) = RESOLUTION_PRESETS[next];
        self.config.width = width;
        self.config.height = height;
        info!(width, height, "resolution changed");
    }

    fn go_to_menu(&mut self) {
        self.state = GameState::Menu;
        self.track = Track::Menu;
    }

    /// Fresh scenario at level 0, straight into play.
    fn start_playing(&mut self) {
        self.rebuild_scenario();
        self.transition = None;
        self.state = GameState::Playing;
        info!(player = ?self.current_player, "round started");
    }

    fn rebuild_scenario(&mut self) {
        self.level = 0;
        self.scenario = build_scenario(&self.config, 0, self.seeds.gen());
        self.track = Track::Level(0);
    }

    // ── Tick ─────────────────────────────────────────────────────────────────

    /// Run one tick of whatever the active screen does.
    pub fn update(&mut self, dt: f32) {
        match self.state {
            GameState::Menu => {
                self.track = Track::Menu;
                self.menu.update(dt);
            }
            GameState::StartingRound => self.update_starting_round(dt),
            GameState::Playing => self.update_playing(dt),
            GameState::GameOver | GameState::Ranking | GameState::ConfigScreen => {
                self.track = Track::Menu;
            }
        }
    }

    fn update_starting_round(&mut self, dt: f32) {
        if !self.round_prepared {
            self.rebuild_scenario();
            self.round_prepared = true;
        }
        let elapsed = self.transition.unwrap_or(0.0) + dt;
        if elapsed >= self.config.tunables.transition_secs {
            self.transition = None;
            self.state = GameState::Playing;
            info!(player = ?self.current_player, "round started");
        } else {
            self.transition = Some(elapsed);
        }
    }

    fn update_playing(&mut self, dt: f32) {
        if let Some(elapsed) = self.transition {
            let elapsed = elapsed + dt;
            if elapsed >= self.config.tunables.transition_secs {
                self.advance_level();
            } else {
                self.transition = Some(elapsed);
            }
            return;
        }

        self.scenario.set_infinite_pipes(self.is_final_level());
        self.scenario.update(dt);

        if self.scenario.has_scored_point() {
            self.cues.push(Cue::Point);
            self.scenario.reset_point_flag();
            let earned = level_for_score(
                self.scenario.score(),
                self.config.tunables.points_per_level,
                self.level_count(),
            );
            if earned > self.level {
                debug!(score = self.scenario.score(), earned, "level threshold crossed");
                self.transition = Some(0.0);
                self.cues.push(Cue::LevelUp);
            }
        }

        if self.scenario.is_game_over() {
            self.finish_round();
        }
    }

    fn advance_level(&mut self) {
        self.level = (self.level + 1).min(self.level_count().saturating_sub(1));
        self.scenario
            .increase_speed_by_percent(self.config.tunables.level_speed_increase_pct);
        if let Some(theme) = self.config.levels.get(self.level) {
            self.scenario
                .change_background_and_pipe(Backdrop::from(theme), theme.pipe.clone());
        }
        self.scenario.set_current_level(self.level);
        self.scenario.set_infinite_pipes(self.is_final_level());
        self.track = Track::Level(self.level);
        self.transition = None;
        info!(
            level = self.level,
            speed = self.scenario.pipe_speed(),
            score = self.scenario.score(),
            "level up"
        );
    }

    fn finish_round(&mut self) {
        let score = self.scenario.score();
        let personal_best = match self.current_player.as_deref().and_then(|n| self.players.find(n)) {
            Some(player) => player.high_score(),
            None => {
                warn!(player = ?self.current_player, "player record missing at game over, using 0 as personal best");
                0
            }
        };
        let global_best = self.players.global_best();
        let summary = RoundSummary::new(score, personal_best, global_best);

        if let Some(nickname) = self.current_player.as_deref() {
            if !self.players.record_round(nickname, score) {
                warn!(nickname, "round not recorded, player record missing");
            }
        }
        if let Err(err) = self.players.save() {
            warn!(%err, "could not save players");
        }

        info!(
            score,
            personal_best,
            global_best,
            level = self.level,
            "game over"
        );
        self.cues.push(Cue::Die);
        self.last_round = Some(summary);
        self.transition = None;
        self.state = GameState::GameOver;
        self.track = Track::Menu;
    }

    // ── Read-only views ──────────────────────────────────────────────────────

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn players(&self) -> &PlayerManager {
        &self.players
    }

    /// For editing the store outside a round (admin tools, tests).
    pub fn players_mut(&mut self) -> &mut PlayerManager {
        &mut self.players
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn current_player(&self) -> Option<&str> {
        self.current_player.as_deref()
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn level_count(&self) -> usize {
        self.config.levels.len().max(1)
    }

    pub fn is_final_level(&self) -> bool {
        self.level + 1 >= self.level_count()
    }

    pub fn level_theme(&self) -> Option<&LevelTheme> {
        self.config.levels.get(self.level)
    }

    pub fn last_round(&self) -> Option<&RoundSummary> {
        self.last_round.as_ref()
    }

    pub fn track(&self) -> Track {
        self.track
    }

    pub fn in_level_transition(&self) -> bool {
        self.state == GameState::Playing && self.transition.is_some()
    }

    /// Opacity of the black fade overlay: fading in while a round starts, fading
    /// out during a level change, 0 otherwise.
    pub fn transition_alpha(&self) -> f32 {
        let Some(elapsed) = self.transition else {
            return 0.0;
        };
        let progress = (elapsed / self.config.tunables.transition_secs).clamp(0.0, 1.0);
        match self.state {
            GameState::StartingRound => 1.0 - progress,
            GameState::Playing => progress,
            _ => 0.0,
        }
    }

    /// Ranking for display plus the highlighted player's 1-based position.
    pub fn ranking(&self) -> (Vec<&Player>, Option<usize>) {
        let rank = self
            .current_player
            .as_deref()
            .and_then(|n| self.players.rank_of(n));
        (self.players.ranking(), rank)
    }

    /// Effects raised since the last call.
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }
}

fn build_scenario(config: &GameConfig, level: usize, seed: u64) -> Scenario {
    let (width, height) = config.screen_size();
    let mut scenario = match config.levels.get(level) {
        Some(theme) => Scenario::with_theme(width, height, &config.tunables, theme, seed),
        None => Scenario::new(width, height, &config.tunables, seed),
    };
    scenario.set_current_level(level);
    scenario.set_infinite_pipes(level + 1 >= config.levels.len());
    scenario
}
