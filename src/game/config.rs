use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of fruit needed to advance one level
pub const FRUIT_PER_LEVEL: u32 = 5;

/// Difficulty preset selected before a session starts
///
/// Fixed for the lifetime of a session; changing it in the options screen
/// only affects sessions started afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// Simulation rate for this preset
    pub fn ticks_per_second(&self) -> u64 {
        match self {
            Self::Easy => 5,
            Self::Normal => 10,
            Self::Hard => 15,
        }
    }

    /// Time between simulation ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1000 / self.ticks_per_second())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Normal
    }
}

/// Configuration for one game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Difficulty preset driving the tick rate
    pub difficulty: Difficulty,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 15,
            initial_snake_length: 3,
            difficulty: Difficulty::default(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }
}
