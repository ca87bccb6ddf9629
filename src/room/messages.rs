//! Room actor message types.

use serde::{Deserialize, Serialize};
use std::fmt::{self};
use tokio::sync::oneshot;

use crate::game::entities::{Card, Chips, Nickname, PlayerAction, PlayerId};
use crate::game::state_machine::{GameSnapshot, HandResult};

/// Transient, connection-scoped identity (e.g. a socket id). A player
/// keeps their stable [`PlayerId`] across reconnects; only the session
/// bound to it changes.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Messages that can be sent to a RoomActor
#[derive(Debug)]
pub enum RoomMessage {
    /// Take a seat (mid-hand joiners sit out until the next deal)
    Join {
        session: SessionId,
        nickname: String,
        response: oneshot::Sender<RoomResponse>,
    },

    /// Give up the seat; committed chips stay in the pot
    Leave {
        session: SessionId,
        response: oneshot::Sender<RoomResponse>,
    },

    /// Deal the next hand (room creator only); covers both the first
    /// deal from the lobby and the hand after a showdown
    StartHand {
        session: SessionId,
        response: oneshot::Sender<RoomResponse>,
    },

    /// Player action (fold, check, call, raise, all-in)
    TakeAction {
        session: SessionId,
        action: PlayerAction,
        response: oneshot::Sender<RoomResponse>,
    },

    /// Get the public table state for broadcasting
    GetSnapshot {
        response: oneshot::Sender<GameSnapshot>,
    },

    /// Get the requesting session's own hole cards
    GetHoleCards {
        session: SessionId,
        response: oneshot::Sender<Option<Vec<Card>>>,
    },

    /// Rebind a reconnecting player's seat to a new session; a no-op
    /// when the old session is unknown
    Reconnect {
        old_session: SessionId,
        new_session: SessionId,
        response: oneshot::Sender<RoomResponse>,
    },

    /// Revert the table to the lobby (room creator only)
    ResetGame {
        session: SessionId,
        response: oneshot::Sender<RoomResponse>,
    },

    /// Finish the game and rank everyone by stack (room creator only)
    EndGame {
        session: SessionId,
        response: oneshot::Sender<RoomResponse>,
    },

    /// Shut the room down
    Close {
        response: oneshot::Sender<RoomResponse>,
    },
}

/// Final standings entry when a game is ended.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub player_id: PlayerId,
    pub nickname: Nickname,
    pub chips: Chips,
}

/// Response from room operations
#[derive(Debug)]
pub enum RoomResponse {
    /// Operation succeeded
    Ack,

    /// Seat taken
    Joined {
        player_id: PlayerId,
        is_creator: bool,
    },

    /// An action or deal went through; `result` is set when the hand
    /// concluded
    HandUpdate { result: Option<HandResult> },

    /// Final standings, best stack first
    Leaderboard(Vec<LeaderboardEntry>),

    /// Operation failed
    Error(String),
}

impl RoomResponse {
    /// Check if the response is a success
    #[must_use]
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Error(_))
    }

    /// Get the error message if the response is an error
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}
