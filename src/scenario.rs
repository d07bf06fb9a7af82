//! The gameplay simulation: one bird, a scrolling row of pipes, scoring and
//! round-end detection.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::bird::Bird;
use crate::compute::{self, gap_bounds};
use crate::config::{LevelTheme, Scale, Tunables};
use crate::entities::RoundPhase;
use crate::pipe::Pipe;

/// Background art reference. Only the size matters to the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct Backdrop {
    pub name: String,
    pub size: Option<(f32, f32)>,
}

impl Backdrop {
    pub fn none() -> Self {
        Backdrop {
            name: String::new(),
            size: None,
        }
    }
}

impl From<&LevelTheme> for Backdrop {
    fn from(theme: &LevelTheme) -> Self {
        Backdrop {
            name: theme.background.clone(),
            size: theme.background_size,
        }
    }
}

/// Why a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Crash {
    Pipe,
    Ground,
    Ceiling,
}

#[derive(Clone, Debug)]
pub struct Scenario {
    bird: Bird,
    /// Spawn order, which is also left-to-right order on screen.
    pipes: Vec<Pipe>,
    screen_width: f32,
    screen_height: f32,
    scale: Scale,
    tunables: Tunables,

    background: Backdrop,
    pipe_sprite: String,
    scroll_offset: f32,

    phase: RoundPhase,
    crash: Option<Crash>,
    score: u32,
    scored_point: bool,

    /// Pixels per second, positive.
    pipe_speed: f32,
    spawn_timer: f32,
    spawn_interval: f32,
    spawned_this_level: usize,
    infinite_pipes: bool,
    level: usize,

    rng: StdRng,
}

impl Scenario {
    /// A fresh round at level 0 speed, pipes already seeded.
    pub fn new(screen_width: f32, screen_height: f32, tunables: &Tunables, seed: u64) -> Self {
        let scale = Scale::for_screen(screen_width, screen_height);
        let mut bird = Bird::new(screen_width, screen_height, None, tunables);
        bird.set_rotation_enabled(false);
        let pipe_speed = tunables.pipe_initial_speed * scale.x;

        let mut scenario = Scenario {
            bird,
            pipes: Vec::with_capacity(tunables.max_pipes),
            screen_width,
            screen_height,
            scale,
            tunables: tunables.clone(),
            background: Backdrop::none(),
            pipe_sprite: String::new(),
            scroll_offset: 0.0,
            phase: RoundPhase::Populated,
            crash: None,
            score: 0,
            scored_point: false,
            pipe_speed,
            spawn_timer: 0.0,
            spawn_interval: compute::spawn_interval(tunables.pipe_spacing * scale.x, pipe_speed),
            spawned_this_level: 0,
            infinite_pipes: false,
            level: 0,
            rng: StdRng::seed_from_u64(seed),
        };
        scenario.reset();
        scenario
    }

    /// Same as `new`, dressed with a level's art.
    pub fn with_theme(
        screen_width: f32,
        screen_height: f32,
        tunables: &Tunables,
        theme: &LevelTheme,
        seed: u64,
    ) -> Self {
        let mut scenario = Scenario::new(screen_width, screen_height, tunables, seed);
        scenario.background = Backdrop::from(theme);
        scenario.pipe_sprite = theme.pipe.clone();
        scenario
    }

    // ── Round lifecycle ──────────────────────────────────────────────────────

    /// Start the round over: layout, bird and score. Pipe speed is kept.
    pub fn reset(&mut self) {
        self.reset_layout();
        self.score = 0;
    }

    /// Bird, pipes, timers and flags back to their round-start state. The score
    /// survives so a level change does not wipe the run.
    fn reset_layout(&mut self) {
        self.bird.reset();
        self.pipes.clear();
        self.phase = RoundPhase::Populated;
        self.crash = None;
        self.scored_point = false;
        self.scroll_offset = 0.0;
        self.spawned_this_level = 0;
        self.spawn_interval = compute::spawn_interval(self.pipe_spacing(), self.pipe_speed);

        let bounds = self.gap_bounds();
        let start_x = self.screen_width * self.tunables.first_pipe_ratio;
        for i in 0..self.tunables.max_pipes {
            let gap_center = compute::uniform_gap_center(&mut self.rng, bounds);
            let x = start_x + i as f32 * self.pipe_spacing();
            self.push_pipe(x, gap_center);
        }

        self.spawn_timer = self.spawn_interval;
    }

    /// Advance the simulation by `dt` seconds (one tick). Does nothing once the
    /// round is over.
    pub fn update(&mut self, dt: f32) {
        if self.is_game_over() {
            return;
        }
        self.phase = RoundPhase::Running;

        self.bird.update();

        self.spawn_interval = compute::spawn_interval(self.pipe_spacing(), self.pipe_speed);
        self.spawn_timer -= dt;
        if self.spawn_timer <= 0.0 {
            self.spawn_pipe();
            self.spawn_timer = self.spawn_interval;
        }

        let bird = *self.bird.body();
        let mut hit_pipe = false;
        for pipe in self.pipes.iter_mut() {
            pipe.set_speed(self.pipe_speed);
            pipe.update(dt);

            if !pipe.has_scored() && compute::has_cleared(&bird, pipe) {
                self.score += 1;
                pipe.set_scored(true);
                self.scored_point = true;
                trace!(score = self.score, "pipe cleared");
            }

            if compute::check_collision(&bird, pipe) {
                hit_pipe = true;
                break;
            }
        }
        if hit_pipe {
            self.end_round(Crash::Pipe);
            return;
        }

        if compute::hits_ground(&bird, self.screen_height) {
            self.end_round(Crash::Ground);
            return;
        }
        if compute::hits_ceiling(&bird) {
            self.end_round(Crash::Ceiling);
            return;
        }

        self.cull_pipes();
        self.scroll_background();
    }

    fn end_round(&mut self, crash: Crash) {
        self.phase = RoundPhase::GameOver;
        self.crash = Some(crash);
        self.bird.keep_on_screen();
        debug!(?crash, score = self.score, level = self.level, "round over");
    }

    // ── Pipes ────────────────────────────────────────────────────────────────

    /// Add one pipe pair after the last one. Returns `false` when the per-level
    /// cap is reached and infinite pipes are off.
    pub fn spawn_pipe(&mut self) -> bool {
        if !self.infinite_pipes && self.spawned_this_level >= self.tunables.max_pipes {
            debug!(spawned = self.spawned_this_level, "pipe cap reached, not spawning");
            return false;
        }

        let bounds = self.gap_bounds();
        let jitter = self.tunables.gap_jitter * self.scale.y;
        let gap_center = compute::jittered_gap_center(&mut self.rng, bounds, jitter);
        let x = match self.pipes.last() {
            Some(last) => last.x() + self.pipe_spacing(),
            None => self.screen_width,
        };
        self.push_pipe(x, gap_center);
        trace!(x, gap_center, "pipe spawned");
        true
    }

    fn push_pipe(&mut self, x: f32, gap_center: f32) {
        self.pipes.push(Pipe::new(
            x,
            gap_center,
            self.tunables.gap_height * self.scale.y,
            self.pipe_speed,
            self.tunables.pipe_width * self.scale.x,
            self.screen_height,
        ));
        self.spawned_this_level += 1;
    }

    fn cull_pipes(&mut self) {
        self.pipes.retain(|p| !p.is_off_screen());
    }

    fn gap_bounds(&self) -> (f32, f32) {
        gap_bounds(self.screen_height, self.tunables.gap_margin * self.scale.y)
    }

    // ── Background ───────────────────────────────────────────────────────────

    fn scroll_background(&mut self) {
        let Some(size) = self.background.size else {
            return;
        };
        let width = compute::background_fill_width(size, (self.screen_width, self.screen_height));
        self.scroll_offset -= self.tunables.background_scroll_per_tick;
        self.scroll_offset = compute::wrap_scroll(self.scroll_offset, width);
    }

    // ── Difficulty and levels ────────────────────────────────────────────────

    /// Speed pipes up by `percent` while keeping their on-screen spacing.
    pub fn increase_speed_by_percent(&mut self, percent: f32) {
        self.pipe_speed *= 1.0 + percent / 100.0;
        self.spawn_interval = compute::spawn_interval(self.pipe_spacing(), self.pipe_speed);
    }

    /// Swap level art. Always restarts the pipe layout.
    pub fn change_background_and_pipe(&mut self, background: Backdrop, pipe_sprite: impl Into<String>) {
        self.background = background;
        self.pipe_sprite = pipe_sprite.into();
        self.reset_layout();
    }

    pub fn set_current_level(&mut self, level: usize) {
        self.level = level;
    }

    pub fn set_infinite_pipes(&mut self, on: bool) {
        self.infinite_pipes = on;
    }

    // ── Input ────────────────────────────────────────────────────────────────

    pub fn flap(&mut self) {
        if !self.is_game_over() {
            self.bird.flap();
        }
    }

    pub fn set_bird_rotation(&mut self, on: bool) {
        self.bird.set_rotation_enabled(on);
    }

    // ── Read-only views ──────────────────────────────────────────────────────

    pub fn is_game_over(&self) -> bool {
        self.phase == RoundPhase::GameOver
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn crash(&self) -> Option<Crash> {
        self.crash
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Set when a pipe was cleared; stays set until `reset_point_flag`.
    pub fn has_scored_point(&self) -> bool {
        self.scored_point
    }

    pub fn reset_point_flag(&mut self) {
        self.scored_point = false;
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn pipe_speed(&self) -> f32 {
        self.pipe_speed
    }

    pub fn pipe_spacing(&self) -> f32 {
        self.tunables.pipe_spacing * self.scale.x
    }

    pub fn spawn_interval(&self) -> f32 {
        self.spawn_interval
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    pub fn spawned_this_level(&self) -> usize {
        self.spawned_this_level
    }

    pub fn infinite_pipes(&self) -> bool {
        self.infinite_pipes
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn background(&self) -> &Backdrop {
        &self.background
    }

    pub fn pipe_sprite(&self) -> &str {
        &self.pipe_sprite
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn screen_size(&self) -> (f32, f32) {
        (self.screen_width, self.screen_height)
    }
}
