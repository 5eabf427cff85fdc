use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Most seats one 52-card deck can serve: 2 hole cards each, 5 board, 3 burns.
pub const MAX_SEATS: usize = 22;

/// Table stakes and seating limits for a hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    /// Posted by every seat before the blinds; 0 disables antes
    pub ante: u32,
    pub min_players: usize,
    pub max_players: usize,
    pub starting_stack: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: 10,
            big_blind: 20,
            ante: 0,
            min_players: 2,
            max_players: 9,
            starting_stack: 1_000,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl TableConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: TableConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.big_blind == 0 {
            return Err(ConfigError::Invalid("big_blind must be positive".into()));
        }
        if self.small_blind > self.big_blind {
            return Err(ConfigError::Invalid(format!(
                "small_blind {} exceeds big_blind {}",
                self.small_blind, self.big_blind
            )));
        }
        if self.min_players < 2 || self.min_players > self.max_players {
            return Err(ConfigError::Invalid(format!(
                "min_players {} must be in [2, max_players {}]",
                self.min_players, self.max_players
            )));
        }
        if self.starting_stack == 0 {
            return Err(ConfigError::Invalid("starting_stack must be positive".into()));
        }
        if self.max_players > MAX_SEATS {
            return Err(ConfigError::Invalid(format!(
                "max_players {} exceeds {} seats",
                self.max_players, MAX_SEATS
            )));
        }
        Ok(())
    }
}
