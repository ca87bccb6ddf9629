//! The authoritative betting state machine for one table.
//!
//! A [`Game`] owns the seats, deck, community cards, and pot for a room
//! and applies one action at a time: the surrounding layer serializes
//! access (one writer per room) and the engine never blocks or keeps
//! timers. Rejected operations return an error without mutating state;
//! the two fatal kinds ([`GameError::DeckExhausted`] and
//! [`GameError::InvariantViolation`]) abort the hand rather than let
//! chip counts drift.

use chrono::{DateTime, Utc};
use log::{debug, error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fmt::{self};
use thiserror::Error;

use super::constants::MAX_PLAYERS;
use super::entities::{
    Blinds, BlindKind, Card, Chips, Deck, Nickname, Player, PlayerAction, PlayerId, PlayerStatus,
};
use super::eval::{HandCategory, HandValue, evaluate};
use super::pot::{Pot, PotManager};
use super::seating::{
    self, SeatIndex, advance_dealer, blind_seats, first_to_act_postflop, first_to_act_preflop,
    next_seat_where,
};

/// Phases of a hand, in strict order. `Waiting` is the lobby state of a
/// freshly formed or reset table; `GameOver` is terminal for the current
/// table composition.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    Waiting,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    ShowdownComplete,
    GameOver,
}

impl GamePhase {
    /// Phases in which voluntary actions are accepted.
    #[must_use]
    pub fn is_betting(self) -> bool {
        matches!(self, Self::Preflop | Self::Flop | Self::Turn | Self::River)
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Waiting => "waiting",
            Self::Preflop => "pre-flop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
            Self::Showdown => "showdown",
            Self::ShowdownComplete => "showdown-complete",
            Self::GameOver => "game-over",
        };
        write!(f, "{repr}")
    }
}

/// Errors that can occur while driving a game.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("need 2+ players")]
    NotEnoughPlayers,
    #[error("not your turn")]
    NotYourTurn,
    #[error("no actions allowed in the {0} phase")]
    InvalidPhase(GamePhase),
    #[error("illegal action: {0}")]
    IllegalAction(String),
    #[error("player is not seated at this table")]
    UnknownPlayer,
    #[error("table is full")]
    CapacityReached,
    #[error("deck exhausted mid-hand")]
    DeckExhausted,
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

/// Notable moments of a hand, drained by the room layer for logging.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    HandStarted { hand_no: u64 },
    BlindPosted { nickname: Nickname, kind: BlindKind, amount: Chips },
    PlayerActed { nickname: Nickname, action: PlayerAction },
    StreetDealt { phase: GamePhase, cards: Vec<Card> },
    PotAwarded { nickname: Nickname, amount: Chips },
    PlayerJoined { nickname: Nickname },
    PlayerRemoved { nickname: Nickname },
    HandFinished { hand_no: u64 },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::HandStarted { hand_no } => format!("hand #{hand_no} started"),
            Self::BlindPosted {
                nickname,
                kind,
                amount,
            } => format!("{nickname} posts the {kind} ({amount})"),
            Self::PlayerActed { nickname, action } => format!("{nickname} {action}"),
            Self::StreetDealt { phase, cards } => {
                let cards = cards
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("{phase} dealt: {cards}")
            }
            Self::PotAwarded { nickname, amount } => format!("{nickname} wins {amount}"),
            Self::PlayerJoined { nickname } => format!("{nickname} joined the table"),
            Self::PlayerRemoved { nickname } => format!("{nickname} left the table"),
            Self::HandFinished { hand_no } => format!("hand #{hand_no} finished"),
        };
        write!(f, "{repr}")
    }
}

/// One winner's share of a concluded hand. The hand fields are `None`
/// for an uncontested pot (no cards were compared).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WinnerSummary {
    pub player_id: PlayerId,
    pub nickname: Nickname,
    pub amount: Chips,
    pub hand_description: Option<String>,
    pub hand_category: Option<HandCategory>,
    pub hand_strength: Option<u32>,
}

/// A contender's revealed hole cards and evaluated strength.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RevealedHand {
    pub player_id: PlayerId,
    pub nickname: Nickname,
    pub hole_cards: Vec<Card>,
    pub description: String,
    pub strength: u32,
}

/// Everything the broadcaster needs about a concluded hand. Built once
/// per hand, never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HandResult {
    pub winners: Vec<WinnerSummary>,
    pub community_cards: Vec<Card>,
    /// Revealed hands of everyone who reached showdown; empty for an
    /// uncontested pot.
    pub players_hands: Vec<RevealedHand>,
    /// Showdown hands ordered strongest first.
    pub hand_comparison: Vec<RevealedHand>,
    pub finished_at: DateTime<Utc>,
}

/// Outcome of removing a player.
#[derive(Debug, Default)]
pub struct RemoveOutcome {
    /// Too few seats remain; the caller should revert the table to
    /// `Waiting`.
    pub should_reset: bool,
    /// Set when the departure ended the hand (everyone else had folded).
    pub hand_result: Option<HandResult>,
}

/// Per-player public fields for broadcasting. Hole cards are delivered
/// out-of-band, never through the snapshot.
#[derive(Clone, Debug, Serialize)]
pub struct PlayerPublic {
    pub id: PlayerId,
    pub nickname: Nickname,
    pub chips: Chips,
    pub street_bet: Chips,
    pub total_bet: Chips,
    pub status: PlayerStatus,
    pub has_acted: bool,
}

/// Read-only view of the table for broadcasting.
#[derive(Clone, Debug, Serialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub hand_no: u64,
    pub community_cards: Vec<Card>,
    pub main_pot: Chips,
    pub side_pots: Vec<Pot>,
    pub current_bet: Chips,
    pub blinds: Blinds,
    pub dealer_seat: SeatIndex,
    pub small_blind_seat: SeatIndex,
    pub big_blind_seat: SeatIndex,
    pub current_turn: Option<PlayerId>,
    pub players: Vec<PlayerPublic>,
}

#[derive(Debug)]
pub struct Game {
    players: Vec<Player>,
    deck: Deck,
    community_cards: Vec<Card>,
    pot: PotManager,
    blinds: Blinds,
    phase: GamePhase,
    /// Highest street bet at the table this round.
    current_bet: Chips,
    dealer: SeatIndex,
    small_blind_seat: SeatIndex,
    big_blind_seat: SeatIndex,
    /// Seat to act, `None` between hands.
    turn: Option<SeatIndex>,
    last_raiser: Option<SeatIndex>,
    hand_no: u64,
    events: VecDeque<GameEvent>,
    rng: StdRng,
}

impl Game {
    #[must_use]
    pub fn new(initial_players: Vec<Player>, blinds: Blinds) -> Self {
        Self::with_rng(initial_players, blinds, StdRng::from_os_rng())
    }

    /// Deterministic deck order for tests.
    #[must_use]
    pub fn seeded(initial_players: Vec<Player>, blinds: Blinds, seed: u64) -> Self {
        Self::with_rng(initial_players, blinds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(initial_players: Vec<Player>, blinds: Blinds, rng: StdRng) -> Self {
        Self {
            players: initial_players,
            deck: Deck::default(),
            community_cards: Vec::with_capacity(5),
            pot: PotManager::new(),
            blinds,
            phase: GamePhase::Waiting,
            current_bet: 0,
            dealer: 0,
            small_blind_seat: 0,
            big_blind_seat: 0,
            turn: None,
            last_raiser: None,
            hand_no: 0,
            events: VecDeque::new(),
            rng,
        }
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn current_turn_id(&self) -> Option<PlayerId> {
        self.turn.map(|seat| self.players[seat].id)
    }

    /// A player's own hole cards, for out-of-band delivery.
    #[must_use]
    pub fn hole_cards(&self, player_id: PlayerId) -> Option<&[Card]> {
        self.players
            .iter()
            .find(|p| p.id == player_id)
            .map(|p| p.hole_cards.as_slice())
    }

    pub fn drain_events(&mut self) -> VecDeque<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Seat a player. Mid-hand joiners sit out until the next deal.
    pub fn add_player(&mut self, player: Player) -> Result<(), GameError> {
        if self.players.len() >= MAX_PLAYERS {
            return Err(GameError::CapacityReached);
        }
        if self.players.iter().any(|p| p.id == player.id) {
            return Err(GameError::IllegalAction("player already seated".to_string()));
        }
        info!("{} takes a seat with {} chips", player.nickname, player.chips);
        self.events.push_back(GameEvent::PlayerJoined {
            nickname: player.nickname.clone(),
        });
        self.players.push(player);
        Ok(())
    }

    /// Unseat a player in any phase. Chips they already committed this
    /// hand stay in the pot; if everyone else has folded the hand ends
    /// with an uncontested award on the spot.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<RemoveOutcome, GameError> {
        let seat = self.seat_of(player_id).ok_or(GameError::UnknownPlayer)?;
        let mut outcome = RemoveOutcome::default();

        if self.phase.is_betting() && self.players[seat].is_contender() {
            self.players[seat].status = PlayerStatus::Folded;
            if self.turn == Some(seat) {
                outcome.hand_result = self.resolve_after_action(seat)?;
            } else if self.contender_count() == 1 {
                // The departure leaves a lone contender out of turn.
                outcome.hand_result = Some(self.finish_uncontested()?);
            } else if self.round_complete() {
                outcome.hand_result = self.advance_street()?;
            }
        }

        // Committed chips are forfeited, not refunded: sweep any street
        // bet that hasn't been collected yet before the seat disappears.
        self.pot.collect_player(&mut self.players[seat]);
        let removed = self.players.remove(seat);
        info!("{} removed from the table", removed.nickname);
        self.events.push_back(GameEvent::PlayerRemoved {
            nickname: removed.nickname,
        });

        let len = self.players.len();
        self.dealer = shift_anchor(self.dealer, seat, len);
        self.small_blind_seat = shift_anchor(self.small_blind_seat, seat, len);
        self.big_blind_seat = shift_anchor(self.big_blind_seat, seat, len);
        self.turn = self.turn.and_then(|t| shift_seat(t, seat));
        self.last_raiser = self.last_raiser.and_then(|t| shift_seat(t, seat));

        if len < 2 {
            outcome.should_reset = true;
        }
        Ok(outcome)
    }

    /// Revert the table to the lobby state after the caller decided a
    /// reset is in order (e.g. too few seats mid-hand).
    pub fn reset_to_waiting(&mut self) {
        for player in &mut self.players {
            player.reset_for_hand();
        }
        self.community_cards.clear();
        self.pot.reset();
        self.current_bet = 0;
        self.turn = None;
        self.last_raiser = None;
        self.phase = GamePhase::Waiting;
    }

    /// Mark the table finished for its current composition.
    pub fn end_game(&mut self) {
        self.phase = GamePhase::GameOver;
        self.turn = None;
    }

    /// Begin the first hand from the lobby. In the rare case that every
    /// dealt-in player is all-in from the blinds the hand resolves
    /// immediately and its result is returned.
    pub fn start_game(&mut self) -> Result<Option<HandResult>, GameError> {
        if self.phase != GamePhase::Waiting {
            return Err(GameError::InvalidPhase(self.phase));
        }
        self.begin_hand()
    }

    /// Deal the next hand after a showdown. `NotEnoughPlayers` signals
    /// the caller to take the table to `GameOver` or back to the lobby.
    pub fn prepare_next_hand(&mut self) -> Result<Option<HandResult>, GameError> {
        if self.phase != GamePhase::ShowdownComplete {
            return Err(GameError::InvalidPhase(self.phase));
        }
        self.begin_hand()
    }

    fn begin_hand(&mut self) -> Result<Option<HandResult>, GameError> {
        let funded = self.players.iter().filter(|p| p.chips > 0).count();
        if funded < 2 {
            return Err(GameError::NotEnoughPlayers);
        }

        for player in &mut self.players {
            player.reset_for_hand();
        }
        self.community_cards.clear();
        self.pot.reset();
        self.current_bet = 0;
        self.last_raiser = None;
        self.hand_no += 1;
        self.events.push_back(GameEvent::HandStarted {
            hand_no: self.hand_no,
        });

        self.deck = Deck::default();
        self.deck.shuffle(&mut self.rng);

        self.dealer = advance_dealer(&self.players, self.dealer).ok_or(GameError::NotEnoughPlayers)?;
        let (small, big) = blind_seats(&self.players, self.dealer).ok_or(GameError::NotEnoughPlayers)?;
        self.small_blind_seat = small;
        self.big_blind_seat = big;

        // Hole cards first, clockwise from the small blind.
        let mut seat = self.small_blind_seat;
        for _ in 0..self.players.len() {
            if self.players[seat].can_act() {
                let cards = self.deck.deal(2).ok_or(GameError::DeckExhausted)?;
                self.players[seat].hole_cards = cards;
            }
            seat = (seat + 1) % self.players.len();
        }

        self.post_blind(self.small_blind_seat, BlindKind::Small);
        self.post_blind(self.big_blind_seat, BlindKind::Big);
        self.current_bet = self.blinds.big;

        self.phase = GamePhase::Preflop;
        info!(
            "hand #{} under way, dealer seat {}, blinds {}",
            self.hand_no, self.dealer, self.blinds
        );

        self.turn = first_to_act_preflop(&self.players, self.big_blind_seat);
        if self.turn.is_none() {
            // Blinds put everyone all-in: no betting, run the board out.
            return self.advance_street();
        }
        Ok(None)
    }

    fn post_blind(&mut self, seat: SeatIndex, kind: BlindKind) {
        let amount = match kind {
            BlindKind::Small => self.blinds.small,
            BlindKind::Big => self.blinds.big,
        };
        // Short stacks post an all-in blind for whatever they have.
        let posted = self.players[seat].commit(amount);
        self.events.push_back(GameEvent::BlindPosted {
            nickname: self.players[seat].nickname.clone(),
            kind,
            amount: posted,
        });
    }

    /// Validate and apply one action for the acting player. Returns the
    /// hand's result when this action concludes it. A rejected action
    /// leaves the game untouched.
    pub fn player_action(
        &mut self,
        player_id: PlayerId,
        action: PlayerAction,
    ) -> Result<Option<HandResult>, GameError> {
        if !self.phase.is_betting() {
            return Err(GameError::InvalidPhase(self.phase));
        }
        let seat = self.seat_of(player_id).ok_or(GameError::UnknownPlayer)?;
        if self.turn != Some(seat) {
            return Err(GameError::NotYourTurn);
        }

        // Full legality check before any mutation.
        self.validate_action(seat, action)?;

        let to_call = self.current_bet - self.players[seat].street_bet;
        match action {
            PlayerAction::Fold => {
                self.players[seat].status = PlayerStatus::Folded;
            }
            PlayerAction::Check => {
                self.players[seat].has_acted = true;
            }
            PlayerAction::Call => {
                self.players[seat].commit(to_call);
                self.players[seat].has_acted = true;
            }
            PlayerAction::Raise { to } => {
                let additional = to - self.players[seat].street_bet;
                self.players[seat].commit(additional);
                self.register_raise(seat);
            }
            PlayerAction::AllIn => {
                let stack = self.players[seat].chips;
                self.players[seat].commit(stack);
                if self.players[seat].street_bet > self.current_bet {
                    self.register_raise(seat);
                } else {
                    // Under-call all-in: no new betting obligation.
                    self.players[seat].has_acted = true;
                }
            }
        }

        debug!("{} {}", self.players[seat].nickname, action);
        self.events.push_back(GameEvent::PlayerActed {
            nickname: self.players[seat].nickname.clone(),
            action,
        });

        self.resolve_after_action(seat)
    }

    fn validate_action(&self, seat: SeatIndex, action: PlayerAction) -> Result<(), GameError> {
        let player = &self.players[seat];
        if !player.can_act() {
            return Err(GameError::IllegalAction(format!(
                "cannot act while {}",
                player.status
            )));
        }
        let to_call = self.current_bet - player.street_bet;
        match action {
            PlayerAction::Fold => Ok(()),
            PlayerAction::Check => {
                if to_call > 0 {
                    return Err(GameError::IllegalAction(format!(
                        "cannot check facing a bet of {to_call}"
                    )));
                }
                Ok(())
            }
            PlayerAction::Call => {
                if to_call == 0 {
                    return Err(GameError::IllegalAction("nothing to call".to_string()));
                }
                Ok(())
            }
            PlayerAction::Raise { to } => {
                let minimum = if self.current_bet == 0 {
                    self.blinds.big
                } else {
                    2 * self.current_bet
                };
                if to < minimum {
                    return Err(GameError::IllegalAction(format!(
                        "raise must be to at least {minimum}"
                    )));
                }
                let additional = to - player.street_bet;
                if additional > player.chips {
                    return Err(GameError::IllegalAction(format!(
                        "raise of {additional} exceeds stack of {}",
                        player.chips
                    )));
                }
                Ok(())
            }
            PlayerAction::AllIn => {
                if player.chips == 0 {
                    return Err(GameError::IllegalAction("no chips left".to_string()));
                }
                Ok(())
            }
        }
    }

    fn register_raise(&mut self, seat: SeatIndex) {
        self.current_bet = self.players[seat].street_bet;
        self.last_raiser = Some(seat);
        for (i, player) in self.players.iter_mut().enumerate() {
            if i != seat && player.can_act() {
                player.has_acted = false;
            }
        }
        self.players[seat].has_acted = true;
    }

    /// Shared tail of every action (including a removal-triggered fold):
    /// award uncontested, advance the street, or pass the turn.
    fn resolve_after_action(
        &mut self,
        seat: SeatIndex,
    ) -> Result<Option<HandResult>, GameError> {
        if self.contender_count() == 1 {
            return Ok(Some(self.finish_uncontested()?));
        }
        if self.round_complete() {
            return self.advance_street();
        }
        self.turn = next_seat_where(&self.players, seat, Player::can_act);
        Ok(None)
    }

    /// A street is settled once every player who can still act has done
    /// so at the current price.
    fn round_complete(&self) -> bool {
        self.players
            .iter()
            .filter(|p| p.can_act())
            .all(|p| p.has_acted && p.street_bet == self.current_bet)
    }

    fn advance_street(&mut self) -> Result<Option<HandResult>, GameError> {
        self.pot.collect_street(&mut self.players);
        self.current_bet = 0;
        self.last_raiser = None;
        for player in &mut self.players {
            if player.can_act() {
                player.has_acted = false;
            }
        }

        let next = match self.phase {
            GamePhase::Preflop => (GamePhase::Flop, 3),
            GamePhase::Flop => (GamePhase::Turn, 1),
            GamePhase::Turn => (GamePhase::River, 1),
            GamePhase::River => {
                return Ok(Some(self.showdown()?));
            }
            phase => {
                return Err(GameError::InvariantViolation(format!(
                    "street advance out of {phase}"
                )));
            }
        };

        let (phase, count) = next;
        let cards = self.deck.deal(count).ok_or(GameError::DeckExhausted)?;
        self.community_cards.extend_from_slice(&cards);
        self.phase = phase;
        self.events.push_back(GameEvent::StreetDealt { phase, cards });
        debug!("dealt the {phase}");

        self.turn = first_to_act_postflop(&self.players, self.dealer);
        if self.turn.is_none() {
            // Everyone left is all-in: keep dealing.
            return self.advance_street();
        }
        Ok(None)
    }

    fn showdown(&mut self) -> Result<HandResult, GameError> {
        self.phase = GamePhase::Showdown;
        self.turn = None;

        let mut rankings: HashMap<PlayerId, HandValue> = HashMap::new();
        for player in self.players.iter().filter(|p| p.is_contender()) {
            let value = evaluate(&player.hole_cards, &self.community_cards);
            rankings.insert(player.id, value);
        }

        let pots = self.pot.pots(&self.players);
        let order = seating::payout_order(&self.players, self.dealer);
        let payouts = PotManager::award(&pots, &rankings, &order);

        let paid: Chips = payouts.iter().map(|p| p.amount).sum();
        let collected = self.pot.total();
        if paid != collected {
            error!("showdown paid {paid} of a {collected} pot");
            return Err(GameError::InvariantViolation(format!(
                "payouts ({paid}) do not match the pot ({collected})"
            )));
        }

        let mut winners = Vec::with_capacity(payouts.len());
        for payout in &payouts {
            let player = self
                .players
                .iter_mut()
                .find(|p| p.id == payout.player_id)
                .ok_or_else(|| {
                    GameError::InvariantViolation("payout to a vacated seat".to_string())
                })?;
            player.chips += payout.amount;
            self.events.push_back(GameEvent::PotAwarded {
                nickname: player.nickname.clone(),
                amount: payout.amount,
            });
            let value = &rankings[&payout.player_id];
            winners.push(WinnerSummary {
                player_id: payout.player_id,
                nickname: player.nickname.clone(),
                amount: payout.amount,
                hand_description: Some(value.describe()),
                hand_category: Some(value.category),
                hand_strength: Some(value.strength()),
            });
        }

        let mut players_hands: Vec<RevealedHand> = self
            .players
            .iter()
            .filter(|p| p.is_contender())
            .map(|p| {
                let value = &rankings[&p.id];
                RevealedHand {
                    player_id: p.id,
                    nickname: p.nickname.clone(),
                    hole_cards: p.hole_cards.clone(),
                    description: value.describe(),
                    strength: value.strength(),
                }
            })
            .collect();
        let mut hand_comparison = players_hands.clone();
        hand_comparison.sort_by(|a, b| b.strength.cmp(&a.strength));
        players_hands.sort_by(|a, b| b.strength.cmp(&a.strength));

        self.finish_hand();
        Ok(HandResult {
            winners,
            community_cards: self.community_cards.clone(),
            players_hands,
            hand_comparison,
            finished_at: Utc::now(),
        })
    }

    /// Everyone else folded: the last contender takes the whole pot with
    /// no evaluation and no reveal.
    fn finish_uncontested(&mut self) -> Result<HandResult, GameError> {
        self.pot.collect_street(&mut self.players);
        self.turn = None;

        let winner = self
            .players
            .iter_mut()
            .find(|p| p.is_contender())
            .ok_or_else(|| {
                GameError::InvariantViolation("no contender left for the pot".to_string())
            })?;
        let amount = self.pot.total();
        winner.chips += amount;
        let summary = WinnerSummary {
            player_id: winner.id,
            nickname: winner.nickname.clone(),
            amount,
            hand_description: None,
            hand_category: None,
            hand_strength: None,
        };
        self.events.push_back(GameEvent::PotAwarded {
            nickname: summary.nickname.clone(),
            amount,
        });
        info!("{} wins {} uncontested", summary.nickname, amount);

        self.finish_hand();
        Ok(HandResult {
            winners: vec![summary],
            community_cards: self.community_cards.clone(),
            players_hands: Vec::new(),
            hand_comparison: Vec::new(),
            finished_at: Utc::now(),
        })
    }

    fn finish_hand(&mut self) {
        self.phase = GamePhase::ShowdownComplete;
        self.turn = None;
        self.events.push_back(GameEvent::HandFinished {
            hand_no: self.hand_no,
        });
    }

    /// Read-only view for broadcasting; calling it twice without an
    /// intervening action yields identical snapshots.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let pots = self.pot.pots(&self.players);
        let (main_pot, side_pots) = match pots.split_first() {
            Some((main, rest)) => (main.amount, rest.to_vec()),
            None => (0, Vec::new()),
        };
        GameSnapshot {
            phase: self.phase,
            hand_no: self.hand_no,
            community_cards: self.community_cards.clone(),
            main_pot,
            side_pots,
            current_bet: self.current_bet,
            blinds: self.blinds,
            dealer_seat: self.dealer,
            small_blind_seat: self.small_blind_seat,
            big_blind_seat: self.big_blind_seat,
            current_turn: self.current_turn_id(),
            players: self
                .players
                .iter()
                .map(|p| PlayerPublic {
                    id: p.id,
                    nickname: p.nickname.clone(),
                    chips: p.chips,
                    street_bet: p.street_bet,
                    total_bet: p.total_bet,
                    status: p.status,
                    has_acted: p.has_acted,
                })
                .collect(),
        }
    }

    fn seat_of(&self, player_id: PlayerId) -> Option<SeatIndex> {
        self.players.iter().position(|p| p.id == player_id)
    }

    fn contender_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_contender()).count()
    }
}

/// Re-anchor a stored seat index after `removed` left the table. An
/// anchor pointing at the removed seat moves one seat back so the next
/// clockwise scan still starts in the right place.
fn shift_anchor(anchor: SeatIndex, removed: SeatIndex, len_after: usize) -> SeatIndex {
    if len_after == 0 {
        return 0;
    }
    if anchor > removed {
        anchor - 1
    } else if anchor == removed {
        if removed == 0 { len_after - 1 } else { removed - 1 }
    } else {
        anchor
    }
}

/// Shift a turn-like index; a reference to the removed seat is dropped.
fn shift_seat(seat: SeatIndex, removed: SeatIndex) -> Option<SeatIndex> {
    match seat.cmp(&removed) {
        std::cmp::Ordering::Greater => Some(seat - 1),
        std::cmp::Ordering::Equal => None,
        std::cmp::Ordering::Less => Some(seat),
    }
}
