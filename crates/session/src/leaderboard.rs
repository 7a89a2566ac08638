//! Leaderboard - ranking of players by their best recorded game.

use std::cmp::Ordering;
use std::collections::HashMap;

use tetris_arcade_store::{HistoryStore, ScoreEntry, StoreError};

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    /// 1-based position.
    pub rank: usize,
    /// The player's best game: highest score, earliest among equal scores.
    pub best: ScoreEntry,
    /// Number of recorded games for this player.
    pub plays: usize,
}

impl Standing {
    pub fn name(&self) -> &str {
        &self.best.name
    }

    pub fn score(&self) -> u32 {
        self.best.score
    }
}

/// Read-only view over a history store.
#[derive(Debug)]
pub struct Leaderboard<'a, H: ?Sized> {
    history: &'a H,
}

impl<'a, H: HistoryStore + ?Sized> Leaderboard<'a, H> {
    pub fn new(history: &'a H) -> Self {
        Self { history }
    }

    /// Up to `n` players' best entries, highest score first.
    pub fn top_scores(&self, n: usize) -> Result<Vec<ScoreEntry>, StoreError> {
        Ok(self
            .standings(n)?
            .into_iter()
            .map(|standing| standing.best)
            .collect())
    }

    /// Same ordering as [`top_scores`](Self::top_scores) with rank and play counts.
    pub fn standings(&self, n: usize) -> Result<Vec<Standing>, StoreError> {
        let entries = self.history.entries()?;
        let mut standings = rank_best(&entries);
        standings.truncate(n);
        Ok(standings)
    }
}

/// Collapse `entries` to one best entry per player and rank them.
///
/// Order is score descending, then earliest `played_at`, then name.
pub fn rank_best(entries: &[ScoreEntry]) -> Vec<Standing> {
    let mut best: HashMap<&str, (&ScoreEntry, usize)> = HashMap::new();
    for entry in entries {
        best.entry(entry.name.as_str())
            .and_modify(|(current, plays)| {
                *plays += 1;
                if beats(entry, current) == Ordering::Less {
                    *current = entry;
                }
            })
            .or_insert((entry, 1));
    }

    let mut rows: Vec<(&ScoreEntry, usize)> = best.into_values().collect();
    rows.sort_by(|a, b| beats(a.0, b.0));

    rows.into_iter()
        .enumerate()
        .map(|(i, (entry, plays))| Standing {
            rank: i + 1,
            best: entry.clone(),
            plays,
        })
        .collect()
}

/// `Less` means `a` ranks above `b`.
fn beats(a: &ScoreEntry, b: &ScoreEntry) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.played_at.cmp(&b.played_at))
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use tetris_arcade_store::MemoryHistoryStore;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn entry(name: &str, score: u32, secs: i64) -> ScoreEntry {
        ScoreEntry::new(name, score, at(secs))
    }

    #[test]
    fn test_best_per_player() {
        let history = MemoryHistoryStore::with_entries(vec![
            entry("Ada", 100, 1),
            entry("Ada", 300, 2),
            entry("Ada", 200, 3),
            entry("Bo", 250, 4),
        ]);
        let board = Leaderboard::new(&history);

        let top: Vec<(String, u32)> = board
            .top_scores(2)
            .unwrap()
            .into_iter()
            .map(|e| (e.name, e.score))
            .collect();
        assert_eq!(top, vec![("Ada".into(), 300), ("Bo".into(), 250)]);

        let standings = board.standings(10).unwrap();
        assert_eq!(standings[0].plays, 3);
        assert_eq!(standings[0].best.played_at, at(2));
        assert_eq!(standings[1].rank, 2);
        assert_eq!(standings[1].plays, 1);
    }

    #[test]
    fn test_equal_scores_rank_by_time() {
        let history = MemoryHistoryStore::with_entries(vec![
            entry("Cy", 500, 20),
            entry("Ada", 500, 30),
            entry("Cy", 500, 10),
            entry("Bo", 500, 15),
        ]);
        let standings = Leaderboard::new(&history).standings(10).unwrap();

        let order: Vec<&str> = standings.iter().map(Standing::name).collect();
        assert_eq!(order, vec!["Cy", "Bo", "Ada"]);
        assert_eq!(standings[0].best.played_at, at(10));
        assert_eq!(standings[0].plays, 2);
    }

    #[test]
    fn test_limit_and_empty() {
        let empty = MemoryHistoryStore::new();
        assert!(Leaderboard::new(&empty).top_scores(5).unwrap().is_empty());

        let history = MemoryHistoryStore::with_entries(vec![entry("Ada", 1, 0), entry("Bo", 2, 0)]);
        let board = Leaderboard::new(&history);
        assert_eq!(board.top_scores(1).unwrap().len(), 1);
        assert!(board.top_scores(0).unwrap().is_empty());
    }
}
