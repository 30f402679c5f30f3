//! Data exchanged with score keeping: per-player decision stats, puzzle
//! scores, the submission a finished game produces, and leaderboard ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Game tag stored on every puzzle score.
pub const PUZZLE_GAME: &str = "15Puzzle";

/// Number of rows a leaderboard shows.
pub const LEADERBOARD_LIMIT: usize = 20;

/// Win/loss counters kept on a player's document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionStats {
    pub dp_wins: u32,
    pub dp_losses: u32,
    pub dp_total_games: u32,
    /// Percentage in `0.0..=100.0`.
    pub dp_win_rate: f64,
}

impl DecisionStats {
    /// Counts one more finished game.
    pub fn record(&mut self, did_win: bool) {
        if did_win {
            self.dp_wins += 1;
        } else {
            self.dp_losses += 1;
        }
        self.dp_total_games += 1;
        self.dp_win_rate = f64::from(self.dp_wins) / f64::from(self.dp_total_games) * 100.0;
    }

    pub fn recorded(mut self, did_win: bool) -> Self {
        self.record(did_win);
        self
    }
}

/// A player's document as the decision leaderboard reads it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub email: String,
    #[serde(flatten)]
    pub stats: DecisionStats,
}

impl PlayerRecord {
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.email)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleScore {
    pub game: String,
    pub user_email: String,
    pub moves: u32,
    pub time_in_seconds: u32,
}

impl PuzzleScore {
    pub fn new(user_email: impl Into<String>, moves: u32, time_in_seconds: u32) -> Self {
        Self {
            game: PUZZLE_GAME.to_owned(),
            user_email: user_email.into(),
            moves,
            time_in_seconds,
        }
    }
}

/// What a caller forwards once a game has ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "camelCase")]
pub enum ScoreSubmission {
    #[serde(rename_all = "camelCase")]
    DecisionPoint {
        did_win: bool,
        accepted_value: u16,
        best_value: u16,
    },
    #[serde(rename = "15Puzzle", rename_all = "camelCase")]
    Puzzle { moves: u32, time_in_seconds: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ranked<'a, T> {
    pub rank: usize,
    pub entry: &'a T,
}

/// Decision leaderboard: players with a positive win rate, best rate first, more games breaking ties.
pub fn decision_leaderboard(players: &[PlayerRecord]) -> Vec<Ranked<'_, PlayerRecord>> {
    let mut entries: Vec<_> = players
        .iter()
        .filter(|player| player.stats.dp_win_rate > 0.0)
        .collect();
    entries.sort_by(|a, b| {
        b.stats
            .dp_win_rate
            .partial_cmp(&a.stats.dp_win_rate)
            .unwrap_or(Ordering::Equal)
            .then(b.stats.dp_total_games.cmp(&a.stats.dp_total_games))
    });
    rank(entries)
}

/// Puzzle leaderboard: fewest moves first, faster time breaking ties.
pub fn puzzle_leaderboard(scores: &[PuzzleScore]) -> Vec<Ranked<'_, PuzzleScore>> {
    let mut entries: Vec<_> = scores
        .iter()
        .filter(|score| score.game == PUZZLE_GAME)
        .collect();
    entries.sort_by_key(|score| (score.moves, score.time_in_seconds));
    rank(entries)
}

fn rank<T>(entries: Vec<&T>) -> Vec<Ranked<'_, T>> {
    entries
        .into_iter()
        .take(LEADERBOARD_LIMIT)
        .enumerate()
        .map(|(i, entry)| Ranked { rank: i + 1, entry })
        .collect()
}

/// `m:ss`, as shown on the leaderboard.
pub fn format_clock(total_seconds: u32) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// `MM:SS`, as shown by the running puzzle timer.
pub fn format_timer(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string(value)
}

pub fn from_json<'a, T: Deserialize<'a>>(json: &'a str) -> serde_json::Result<T> {
    serde_json::from_str(json)
}
