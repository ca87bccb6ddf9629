//! Property-based tests for chip conservation and turn validity.
//!
//! Random tables play random-but-legal action sequences; at every step
//! the chips in play must sum to the starting total and the acting seat
//! must be one that can actually act.

use holdem_engine::entities::{Blinds, Chips, Nickname, Player, PlayerAction};
use holdem_engine::{Game, GamePhase};
use proptest::prelude::*;

fn total_chips(game: &Game) -> Chips {
    let snapshot = game.snapshot();
    let stacks: Chips = snapshot.players.iter().map(|p| p.chips).sum();
    let street: Chips = snapshot.players.iter().map(|p| p.street_bet).sum();
    let pots: Chips =
        snapshot.main_pot + snapshot.side_pots.iter().map(|p| p.amount).sum::<Chips>();
    stacks + street + pots
}

/// Pick a legal action for the current actor from a random byte.
fn choose_action(game: &Game, choice: u8) -> PlayerAction {
    let snapshot = game.snapshot();
    let id = snapshot.current_turn.expect("someone to act");
    let actor = snapshot.players.iter().find(|p| p.id == id).unwrap();
    let to_call = snapshot.current_bet - actor.street_bet;

    let min_raise_to = if snapshot.current_bet == 0 {
        snapshot.blinds.big
    } else {
        2 * snapshot.current_bet
    };
    let can_raise = actor.chips >= min_raise_to - actor.street_bet;

    if to_call > 0 {
        match choice % 4 {
            0 => PlayerAction::Fold,
            1 => PlayerAction::Call,
            2 if can_raise => PlayerAction::Raise { to: min_raise_to },
            _ => PlayerAction::AllIn,
        }
    } else {
        match choice % 4 {
            0 | 1 => PlayerAction::Check,
            2 if can_raise => PlayerAction::Raise { to: min_raise_to },
            _ => PlayerAction::Check,
        }
    }
}

fn stacks_strategy() -> impl Strategy<Value = Vec<Chips>> {
    prop::collection::vec(30u32..=2000, 2..=6)
}

proptest! {
    #[test]
    fn chips_are_conserved_through_any_hand(
        stacks in stacks_strategy(),
        seed in any::<u64>(),
        choices in prop::collection::vec(any::<u8>(), 200),
    ) {
        let players: Vec<Player> = stacks
            .iter()
            .enumerate()
            .map(|(i, &c)| Player::new(Nickname::new(&format!("p{i}")), c))
            .collect();
        let mut game = Game::seeded(players, Blinds::default(), seed);
        let start: Chips = stacks.iter().sum();

        game.start_game().unwrap();
        prop_assert_eq!(total_chips(&game), start);

        for &choice in &choices {
            if !game.phase().is_betting() {
                break;
            }
            let action = choose_action(&game, choice);
            let id = game.snapshot().current_turn.unwrap();
            game.player_action(id, action).unwrap();
            prop_assert_eq!(total_chips(&game), start);
        }

        // 200 choices is far more than any single hand can absorb.
        prop_assert!(!game.phase().is_betting());
        prop_assert_eq!(total_chips(&game), start);
    }

    #[test]
    fn the_acting_seat_can_always_act(
        stacks in stacks_strategy(),
        seed in any::<u64>(),
        choices in prop::collection::vec(any::<u8>(), 200),
    ) {
        let players: Vec<Player> = stacks
            .iter()
            .enumerate()
            .map(|(i, &c)| Player::new(Nickname::new(&format!("p{i}")), c))
            .collect();
        let mut game = Game::seeded(players, Blinds::default(), seed);
        game.start_game().unwrap();

        for &choice in &choices {
            if !game.phase().is_betting() {
                break;
            }
            let snapshot = game.snapshot();
            let id = snapshot.current_turn.expect("betting phase has an actor");
            let actor = snapshot.players.iter().find(|p| p.id == id).unwrap();
            prop_assert_eq!(
                actor.status,
                holdem_engine::entities::PlayerStatus::InHand
            );

            let action = choose_action(&game, choice);
            game.player_action(id, action).unwrap();
        }
    }

    #[test]
    fn a_street_settles_only_at_matched_bets(
        stacks in stacks_strategy(),
        seed in any::<u64>(),
        choices in prop::collection::vec(any::<u8>(), 200),
    ) {
        let players: Vec<Player> = stacks
            .iter()
            .enumerate()
            .map(|(i, &c)| Player::new(Nickname::new(&format!("p{i}")), c))
            .collect();
        let mut game = Game::seeded(players, Blinds::default(), seed);
        game.start_game().unwrap();
        let mut last_phase = game.phase();

        for &choice in &choices {
            if !game.phase().is_betting() {
                break;
            }
            let action = choose_action(&game, choice);
            let id = game.snapshot().current_turn.unwrap();
            game.player_action(id, action).unwrap();

            let phase = game.phase();
            if phase != last_phase && phase.is_betting() {
                // A fresh street: bets reset, waiting players unacted.
                let snapshot = game.snapshot();
                prop_assert_eq!(snapshot.current_bet, 0);
                for player in &snapshot.players {
                    prop_assert_eq!(player.street_bet, 0);
                }
            }
            last_phase = phase;
        }
    }

    #[test]
    fn showdown_payouts_match_contributions(
        stacks in stacks_strategy(),
        seed in any::<u64>(),
        choices in prop::collection::vec(any::<u8>(), 200),
    ) {
        let players: Vec<Player> = stacks
            .iter()
            .enumerate()
            .map(|(i, &c)| Player::new(Nickname::new(&format!("p{i}")), c))
            .collect();
        let mut game = Game::seeded(players, Blinds::default(), seed);
        game.start_game().unwrap();

        let mut result = None;
        for &choice in &choices {
            if !game.phase().is_betting() {
                break;
            }
            let action = choose_action(&game, choice);
            let id = game.snapshot().current_turn.unwrap();
            result = game.player_action(id, action).unwrap();
        }

        prop_assert_eq!(game.phase(), GamePhase::ShowdownComplete);
        let result = result.expect("hand concluded");
        let paid: Chips = result.winners.iter().map(|w| w.amount).sum();
        let contributed: Chips = game
            .snapshot()
            .players
            .iter()
            .map(|p| p.total_bet)
            .sum();
        prop_assert_eq!(paid, contributed);
    }
}
