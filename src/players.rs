//! Player records and their text store.
//!
//! One record per line: `name nickname gamesPlayed highScore`. The whole file is
//! read at startup and rewritten on every save.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::entities::Player;
use crate::error::{GameError, GameResult};

#[derive(Clone, Debug, Default)]
pub struct PlayerManager {
    /// `None` keeps everything in memory; `save` is then a no-op.
    path: Option<PathBuf>,
    players: Vec<Player>,
}

impl PlayerManager {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the store at `path`. A missing or unreadable file gives an empty
    /// store. A malformed line stops parsing; the records before it are kept
    /// instead of dropping the whole file.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let players = match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let (players, error) = parse_records(&contents);
                if let Some(err) = error {
                    warn!(path = %path.display(), %err, kept = players.len(), "player store is malformed");
                }
                players
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no player store yet, starting empty");
                Vec::new()
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "could not read player store, starting empty");
                Vec::new()
            }
        };
        debug!(count = players.len(), "players loaded");
        PlayerManager {
            path: Some(path),
            players,
        }
    }

    /// Rewrite the whole store, creating its directory if needed.
    pub fn save(&self) -> GameResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| GameError::io(dir, e))?;
        }
        std::fs::write(path, self.to_records()).map_err(|e| GameError::io(path, e))?;
        debug!(path = %path.display(), count = self.players.len(), "players saved");
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // ── Lookup and mutation ──────────────────────────────────────────────────

    pub fn find(&self, nickname: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.nickname == nickname)
    }

    /// Add a new player. Both fields must be single non-empty tokens and the
    /// nickname must be unused.
    pub fn register(&mut self, name: &str, nickname: &str) -> GameResult<&Player> {
        if !is_token(name) {
            return Err(GameError::InvalidName(name.to_string()));
        }
        if !is_token(nickname) {
            return Err(GameError::InvalidNickname(nickname.to_string()));
        }
        if self.find(nickname).is_some() {
            return Err(GameError::DuplicatePlayer(nickname.to_string()));
        }
        info!(nickname, "registering player");
        let index = self.players.len();
        self.players.push(Player::new(name, nickname));
        Ok(&self.players[index])
    }

    /// Existing player for `nickname`, or a new one named after it.
    pub fn find_or_register(&mut self, nickname: &str) -> GameResult<&Player> {
        match self.players.iter().position(|p| p.nickname == nickname) {
            Some(i) => Ok(&self.players[i]),
            None => self.register(nickname, nickname),
        }
    }

    /// Count a finished round. Returns `false` if no such player exists.
    pub fn record_round(&mut self, nickname: &str, score: u32) -> bool {
        match self.players.iter_mut().find(|p| p.nickname == nickname) {
            Some(player) => {
                player.record_round(score);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, nickname: &str) -> Option<Player> {
        let i = self.players.iter().position(|p| p.nickname == nickname)?;
        Some(self.players.remove(i))
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Highest score across every known player, 0 when there are none.
    pub fn global_best(&self) -> u32 {
        self.players.iter().map(Player::high_score).max().unwrap_or(0)
    }

    /// Players by high score, best first. Ties keep registration order.
    pub fn ranking(&self) -> Vec<&Player> {
        let mut ranked: Vec<&Player> = self.players.iter().collect();
        ranked.sort_by(|a, b| b.high_score().cmp(&a.high_score()));
        ranked
    }

    /// 1-based position of `nickname` in `ranking`.
    pub fn rank_of(&self, nickname: &str) -> Option<usize> {
        self.ranking()
            .iter()
            .position(|p| p.nickname == nickname)
            .map(|i| i + 1)
    }

    pub fn to_records(&self) -> String {
        let mut out = String::new();
        for p in &self.players {
            let _ = writeln!(
                out,
                "{} {} {} {}",
                p.name,
                p.nickname,
                p.games_played(),
                p.high_score()
            );
        }
        out
    }
}

fn is_token(s: &str) -> bool {
    !s.is_empty() && !s.chars().any(char::is_whitespace)
}

/// Parse one stored line.
pub fn parse_record(line: &str, line_no: usize) -> GameResult<Player> {
    let malformed = |reason: &str| GameError::MalformedRecord {
        line: line_no,
        reason: reason.to_string(),
    };
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [name, nickname, games, best] = fields[..] else {
        return Err(malformed("expected 4 fields"));
    };
    let games: u32 = games
        .parse()
        .map_err(|_| malformed("games played is not a number"))?;
    let best: u32 = best
        .parse()
        .map_err(|_| malformed("high score is not a number"))?;
    Ok(Player::from_stored(
        name.to_string(),
        nickname.to_string(),
        games,
        best,
    ))
}

/// Records up to the first malformed line, plus the error that stopped parsing.
/// Blank lines are skipped.
pub fn parse_records(contents: &str) -> (Vec<Player>, Option<GameError>) {
    let mut players = Vec::new();
    for (i, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_record(line, i + 1) {
            Ok(player) => players.push(player),
            Err(err) => return (players, Some(err)),
        }
    }
    (players, None)
}
