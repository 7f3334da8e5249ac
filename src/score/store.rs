//! Persistent high score storage
//!
//! One integer lives in a small JSON file (`{"highscore": N}`). Loading
//! never fails: a missing or unreadable file simply means no record yet.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HighScoreRecord {
    highscore: u32,
}

/// Owns the high score file and the best score seen so far
#[derive(Debug)]
pub struct HighScoreStore {
    path: PathBuf,
    best: u32,
}

impl HighScoreStore {
    /// Open the store at `path`, falling back to a best of 0 when the file
    /// is missing or corrupt
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = Self::read_best(&path).unwrap_or(0);
        Self { path, best }
    }

    fn read_best(path: &Path) -> Option<u32> {
        let text = fs::read_to_string(path).ok()?;
        let record: HighScoreRecord = serde_json::from_str(&text).ok()?;
        Some(record.highscore)
    }

    /// Best score on record
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Offer a finished session's score
    ///
    /// Only a strict improvement is kept and written back; returns whether
    /// a new record was set.
    pub fn record(&mut self, score: u32) -> Result<bool> {
        if score <= self.best {
            return Ok(false);
        }

        self.best = score;
        self.save()?;
        Ok(true)
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        let record = HighScoreRecord {
            highscore: self.best,
        };
        let json = serde_json::to_string(&record).context("Failed to serialize high score")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;
        Ok(())
    }
}
