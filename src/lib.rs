//! # Holdem Engine
//!
//! A Texas Hold'em game engine for live multiplayer rooms.
//!
//! The core is a synchronous, single-writer state machine: one [`Game`]
//! per room tracks chips, cards, betting rounds, and showdowns, and
//! applies exactly one action at a time. Transport, presentation, and
//! session management are external collaborators that consume the
//! engine's snapshots and hand results.
//!
//! ## Architecture
//!
//! - [`game`]: entities, hand evaluation, pot accounting, seat
//!   rotation, and the betting state machine
//! - [`room`]: a per-room actor that serializes all access to one
//!   `Game` behind a message inbox, and rebinds reconnecting sessions
//!   to their stable player identity
//!
//! ## Example
//!
//! ```
//! use holdem_engine::entities::{Blinds, Nickname, Player, PlayerAction};
//! use holdem_engine::Game;
//!
//! let players = vec![
//!     Player::new(Nickname::new("alice"), 1000),
//!     Player::new(Nickname::new("bob"), 1000),
//! ];
//! let mut game = Game::new(players, Blinds::default());
//! game.start_game().unwrap();
//!
//! // The first actor folds; the hand concludes uncontested.
//! let actor = game.current_turn_id().unwrap();
//! let result = game.player_action(actor, PlayerAction::Fold).unwrap();
//! assert!(result.is_some());
//! ```

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    Game, GameError, GameEvent, GamePhase, GameSnapshot, HandResult,
    constants::{self, DEFAULT_BIG_BLIND, DEFAULT_SMALL_BLIND, DEFAULT_STARTING_CHIPS, MAX_PLAYERS},
    entities,
};

/// Per-room actor serializing access to a single game.
pub mod room;
pub use room::{RoomActor, RoomConfig, RoomHandle, RoomMessage, RoomResponse, SessionId};
