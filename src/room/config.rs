//! Room configuration models.

use serde::{Deserialize, Serialize};

use crate::game::constants::{
    DEFAULT_BIG_BLIND, DEFAULT_SMALL_BLIND, DEFAULT_STARTING_CHIPS, MAX_PLAYERS,
    MAX_STARTING_CHIPS, MIN_STARTING_CHIPS,
};
use crate::game::entities::{Blinds, Chips};

/// Room configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Room name
    pub name: String,

    /// Maximum number of seats (hard cap: [`MAX_PLAYERS`])
    pub max_players: usize,

    /// Stack each player sits down with
    pub starting_chips: Chips,

    /// Small blind amount
    pub small_blind: Chips,

    /// Big blind amount
    pub big_blind: Chips,

    /// Whether losing showdown hands stay in broadcast hand results
    pub reveal_losing_hands: bool,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            name: "Default Room".to_string(),
            max_players: MAX_PLAYERS,
            starting_chips: DEFAULT_STARTING_CHIPS,
            small_blind: DEFAULT_SMALL_BLIND,
            big_blind: DEFAULT_BIG_BLIND,
            reveal_losing_hands: true,
        }
    }
}

impl RoomConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.big_blind <= self.small_blind {
            return Err("Big blind must be greater than small blind".to_string());
        }

        if self.max_players < 2 || self.max_players > MAX_PLAYERS {
            return Err(format!("Max players must be between 2 and {MAX_PLAYERS}"));
        }

        if self.starting_chips < MIN_STARTING_CHIPS || self.starting_chips > MAX_STARTING_CHIPS {
            return Err(format!(
                "Starting chips must be between {MIN_STARTING_CHIPS} and {MAX_STARTING_CHIPS}"
            ));
        }

        if self.starting_chips < self.big_blind {
            return Err("Starting chips must cover at least the big blind".to_string());
        }

        Ok(())
    }

    /// The blind structure hands are dealt with
    #[must_use]
    pub fn blinds(&self) -> Blinds {
        Blinds {
            small: self.small_blind,
            big: self.big_blind,
        }
    }
}
