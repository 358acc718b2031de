/// Top-10 highscore table and its persistence.
///
/// The table is kept sorted by descending score; equal scores keep their
/// insertion order (an older entry stays ahead of a newer one).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const MAX_ENTRIES: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreTable {
    entries: Vec<HighScoreEntry>,
}

impl HighScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn best(&self) -> u32 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }

    /// Insert a score.  Returns its 0-based rank, or `None` when it did not
    /// make the table.
    pub fn insert(&mut self, name: &str, score: u32) -> Option<usize> {
        let rank = self
            .entries
            .iter()
            .position(|e| e.score < score)
            .unwrap_or(self.entries.len());
        if rank >= MAX_ENTRIES {
            return None;
        }
        self.entries.insert(
            rank,
            HighScoreEntry {
                name: name.to_string(),
                score,
            },
        );
        self.entries.truncate(MAX_ENTRIES);
        Some(rank)
    }

    /// Re-establish the ordering and size invariants on data read from disk.
    fn normalized(mut self) -> Self {
        // Stable sort keeps file order for ties.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_ENTRIES);
        self
    }
}

// ── Persistence ──────────────────────────────────────────────────────────────

pub trait ScoreStore {
    fn load(&self) -> Result<HighScoreTable>;
    fn save(&mut self, table: &HighScoreTable) -> Result<()>;
}

/// JSON file store.  A missing file reads as an empty table.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> Result<HighScoreTable> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(HighScoreTable::new());
            }
            Err(e) => return Err(e.into()),
        };
        let table: HighScoreTable = serde_json::from_str(&text)?;
        Ok(table.normalized())
    }

    fn save(&mut self, table: &HighScoreTable) -> Result<()> {
        let text = serde_json::to_string_pretty(table)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

/// Keeps the table in memory only.
#[derive(Default)]
pub struct MemoryStore {
    table: HighScoreTable,
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<HighScoreTable> {
        Ok(self.table.clone())
    }

    fn save(&mut self, table: &HighScoreTable) -> Result<()> {
        self.table = table.clone();
        Ok(())
    }
}

/// Default location: `$HOME/.astro_strike_scores.json`.
pub fn default_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".astro_strike_scores.json")
}

/// Load the table, treating unreadable data as empty.
pub fn load_or_empty(store: &dyn ScoreStore) -> HighScoreTable {
    store.load().unwrap_or_else(|err| {
        tracing::warn!(%err, "could not read highscores; starting empty");
        HighScoreTable::new()
    })
}

/// Offer a finished session's score and return the resulting top-10.
/// Storage failures are logged; the returned table is still up to date.
pub fn submit(store: &mut dyn ScoreStore, name: &str, score: u32) -> HighScoreTable {
    let mut table = load_or_empty(store);
    match table.insert(name, score) {
        Some(rank) => {
            tracing::info!(name, score, rank = rank + 1, "highscore recorded");
            if let Err(err) = store.save(&table) {
                tracing::warn!(%err, "could not save highscores");
            }
        }
        None => tracing::info!(name, score, "score did not make the table"),
    }
    table
}

/// Record a session the player quit before it ended.  Scoreless runs are
/// not offered to the table.
pub fn submit_unfinished(
    store: &mut dyn ScoreStore,
    name: &str,
    score: u32,
) -> Option<HighScoreTable> {
    if score == 0 {
        return None;
    }
    Some(submit(store, name, score))
}
