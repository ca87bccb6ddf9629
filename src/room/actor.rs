//! Room actor with async message handling.
//!
//! One actor owns one [`Game`] and is its only writer: every socket
//! handler talks to the room through a [`RoomHandle`], so actions for a
//! room are applied strictly one at a time. The actor keeps no timers;
//! reconnection grace periods and inactivity policies belong to the
//! surrounding system, which tells the room what to do via messages.

use super::{
    config::RoomConfig,
    messages::{LeaderboardEntry, RoomMessage, RoomResponse, SessionId},
};
use crate::game::{
    Game, GameError, GamePhase, HandResult,
    entities::{Nickname, Player, PlayerAction, PlayerId},
};
use std::collections::HashMap;
use tokio::sync::mpsc;

/// Room actor handle for sending messages
#[derive(Clone)]
pub struct RoomHandle {
    sender: mpsc::Sender<RoomMessage>,
}

impl RoomHandle {
    /// Create a new room handle
    #[must_use]
    pub fn new(sender: mpsc::Sender<RoomMessage>) -> Self {
        Self { sender }
    }

    /// Send a message to the room
    pub async fn send(&self, message: RoomMessage) -> Result<(), String> {
        self.sender
            .send(message)
            .await
            .map_err(|_| "Room is closed".to_string())
    }
}

/// Room actor managing a single table
pub struct RoomActor {
    /// Room configuration
    config: RoomConfig,

    /// The authoritative game state
    game: Game,

    /// Message inbox
    inbox: mpsc::Receiver<RoomMessage>,

    /// Session to stable player identity mapping
    sessions: HashMap<SessionId, PlayerId>,

    /// Session of the room creator, who may deal and reset
    creator: Option<SessionId>,

    /// Is the room closed
    is_closed: bool,
}

impl RoomActor {
    /// Create a new room actor and a handle for sending it messages
    #[must_use]
    pub fn new(config: RoomConfig) -> (Self, RoomHandle) {
        let (sender, inbox) = mpsc::channel(100);
        let game = Game::new(Vec::new(), config.blinds());
        let actor = Self {
            config,
            game,
            inbox,
            sessions: HashMap::new(),
            creator: None,
            is_closed: false,
        };
        (actor, RoomHandle::new(sender))
    }

    /// Run the room actor event loop
    pub async fn run(mut self) {
        log::info!("Room '{}' starting", self.config.name);

        while let Some(message) = self.inbox.recv().await {
            self.handle_message(message);
            self.drain_game_events();
            if self.is_closed {
                break;
            }
        }

        log::info!("Room '{}' closed", self.config.name);
    }

    /// Handle a room message. The engine is synchronous, so every
    /// message resolves before the next is received.
    fn handle_message(&mut self, message: RoomMessage) {
        match message {
            RoomMessage::Join {
                session,
                nickname,
                response,
            } => {
                let result = self.handle_join(session, &nickname);
                let _ = response.send(result);
            }

            RoomMessage::Leave { session, response } => {
                let result = self.handle_leave(&session);
                let _ = response.send(result);
            }

            RoomMessage::StartHand { session, response } => {
                let result = self.handle_start(&session);
                let _ = response.send(result);
            }

            RoomMessage::TakeAction {
                session,
                action,
                response,
            } => {
                let result = self.handle_action(&session, action);
                let _ = response.send(result);
            }

            RoomMessage::GetSnapshot { response } => {
                let _ = response.send(self.game.snapshot());
            }

            RoomMessage::GetHoleCards { session, response } => {
                let cards = self
                    .sessions
                    .get(&session)
                    .and_then(|id| self.game.hole_cards(*id))
                    .map(<[_]>::to_vec);
                let _ = response.send(cards);
            }

            RoomMessage::Reconnect {
                old_session,
                new_session,
                response,
            } => {
                self.handle_reconnect(&old_session, new_session);
                let _ = response.send(RoomResponse::Ack);
            }

            RoomMessage::ResetGame { session, response } => {
                let result = self.handle_reset(&session);
                let _ = response.send(result);
            }

            RoomMessage::EndGame { session, response } => {
                let result = self.handle_end(&session);
                let _ = response.send(result);
            }

            RoomMessage::Close { response } => {
                self.is_closed = true;
                let _ = response.send(RoomResponse::Ack);
            }
        }
    }

    /// Handle a join request
    fn handle_join(&mut self, session: SessionId, nickname: &str) -> RoomResponse {
        let nickname = Nickname::new(nickname);
        if nickname.is_empty() {
            return RoomResponse::Error("Nickname must not be blank".to_string());
        }
        if self.sessions.contains_key(&session) {
            return RoomResponse::Error("Already in this room".to_string());
        }
        if self.sessions.len() >= self.config.max_players {
            return RoomResponse::Error("Room is full".to_string());
        }

        let player = Player::new(nickname.clone(), self.config.starting_chips);
        let player_id = player.id;
        if let Err(e) = self.game.add_player(player) {
            return RoomResponse::Error(e.to_string());
        }

        let is_creator = self.creator.is_none();
        if is_creator {
            self.creator = Some(session.clone());
        }
        self.sessions.insert(session, player_id);
        log::info!(
            "{} joined room '{}' with {} chips",
            nickname,
            self.config.name,
            self.config.starting_chips
        );
        RoomResponse::Joined {
            player_id,
            is_creator,
        }
    }

    /// Handle a leave request
    fn handle_leave(&mut self, session: &SessionId) -> RoomResponse {
        let Some(player_id) = self.sessions.remove(session) else {
            return RoomResponse::Error("Not in this room".to_string());
        };

        let outcome = match self.game.remove_player(player_id) {
            Ok(outcome) => outcome,
            Err(e) => return RoomResponse::Error(e.to_string()),
        };

        // The creator mantle passes to any remaining session.
        if self.creator.as_ref() == Some(session) {
            self.creator = self.sessions.keys().next().cloned();
            if let Some(new_creator) = &self.creator {
                log::info!("Room '{}' creator left, now {}", self.config.name, new_creator);
            }
        }

        if outcome.should_reset {
            log::info!(
                "Room '{}' below two seats, back to the lobby",
                self.config.name
            );
            self.game.reset_to_waiting();
        }

        RoomResponse::HandUpdate {
            result: outcome.hand_result.map(|r| self.redact(r)),
        }
    }

    /// Handle a deal request: the first hand from the lobby, or the
    /// next hand after a showdown.
    fn handle_start(&mut self, session: &SessionId) -> RoomResponse {
        if self.creator.as_ref() != Some(session) {
            return RoomResponse::Error("Only the room creator can deal".to_string());
        }

        let outcome = match self.game.phase() {
            GamePhase::Waiting => self.game.start_game(),
            GamePhase::ShowdownComplete => {
                let prepared = self.game.prepare_next_hand();
                if prepared == Err(GameError::NotEnoughPlayers) {
                    // Not enough funded stacks to keep playing.
                    self.game.end_game();
                }
                prepared
            }
            phase => Err(GameError::InvalidPhase(phase)),
        };

        match outcome {
            Ok(result) => RoomResponse::HandUpdate {
                result: result.map(|r| self.redact(r)),
            },
            Err(e) => RoomResponse::Error(e.to_string()),
        }
    }

    /// Handle a player action
    fn handle_action(&mut self, session: &SessionId, action: PlayerAction) -> RoomResponse {
        let Some(player_id) = self.sessions.get(session) else {
            return RoomResponse::Error("Not in this room".to_string());
        };

        match self.game.player_action(*player_id, action) {
            Ok(result) => RoomResponse::HandUpdate {
                result: result.map(|r| self.redact(r)),
            },
            Err(e) => RoomResponse::Error(e.to_string()),
        }
    }

    /// Rebind a seat to a reconnecting session. Unknown old sessions and
    /// already-bound new sessions are silently ignored.
    fn handle_reconnect(&mut self, old_session: &SessionId, new_session: SessionId) {
        if self.sessions.contains_key(&new_session) {
            return;
        }
        let Some(player_id) = self.sessions.remove(old_session) else {
            return;
        };
        if self.creator.as_ref() == Some(old_session) {
            self.creator = Some(new_session.clone());
        }
        log::info!(
            "Room '{}': session {} rebound to {}",
            self.config.name,
            old_session,
            new_session
        );
        self.sessions.insert(new_session, player_id);
    }

    /// Handle a reset-to-lobby request
    fn handle_reset(&mut self, session: &SessionId) -> RoomResponse {
        if self.creator.as_ref() != Some(session) {
            return RoomResponse::Error("Only the room creator can reset".to_string());
        }
        if self.sessions.len() < 2 {
            return RoomResponse::Error("Need 2+ players to reset".to_string());
        }
        self.game.reset_to_waiting();
        RoomResponse::Ack
    }

    /// Handle an end-game request: final standings by stack size.
    fn handle_end(&mut self, session: &SessionId) -> RoomResponse {
        if self.creator.as_ref() != Some(session) {
            return RoomResponse::Error("Only the room creator can end the game".to_string());
        }
        if matches!(self.game.phase(), GamePhase::Waiting | GamePhase::GameOver) {
            return RoomResponse::Error("No game in progress".to_string());
        }

        self.game.end_game();
        let mut leaderboard: Vec<LeaderboardEntry> = self
            .game
            .players()
            .iter()
            .map(|p| LeaderboardEntry {
                player_id: p.id,
                nickname: p.nickname.clone(),
                chips: p.chips,
            })
            .collect();
        leaderboard.sort_by(|a, b| b.chips.cmp(&a.chips));
        RoomResponse::Leaderboard(leaderboard)
    }

    /// Apply the room's reveal setting: winners always show, losing
    /// hands and the comparison table only when configured to.
    fn redact(&self, mut result: HandResult) -> HandResult {
        if self.config.reveal_losing_hands {
            return result;
        }
        let winner_ids: Vec<PlayerId> = result.winners.iter().map(|w| w.player_id).collect();
        result
            .players_hands
            .retain(|hand| winner_ids.contains(&hand.player_id));
        result.hand_comparison.clear();
        result
    }

    /// Log what happened inside the engine since the last message.
    fn drain_game_events(&mut self) {
        for event in self.game.drain_events() {
            log::debug!("Room '{}': {}", self.config.name, event);
        }
    }
}
