//! Poker game engine - the per-table state machine and its parts.
//!
//! This module provides the authoritative Texas Hold'em implementation:
//! - Cards, deck, players, and betting actions ([`entities`])
//! - Five-card hand evaluation ([`eval`])
//! - Main/side pot accounting and payouts ([`pot`])
//! - Dealer, blind, and acting-order rotation ([`seating`])
//! - The betting state machine that ties them together
//!   ([`state_machine`])

pub mod constants;
pub mod entities;
pub mod eval;
pub mod pot;
pub mod seating;
pub mod state_machine;

pub use state_machine::{
    Game, GameError, GameEvent, GamePhase, GameSnapshot, HandResult, PlayerPublic, RemoveOutcome,
    RevealedHand, WinnerSummary,
};
