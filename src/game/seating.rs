//! Seat rotation: dealer button movement, blind assignment, acting
//! order, and the clockwise payout order used for odd chips.

use super::entities::{Player, PlayerId};

/// Type alias for seat positions at the table.
pub type SeatIndex = usize;

/// First seat clockwise after `from` (exclusive) matching `pred`,
/// wrapping around and ending on `from` itself.
pub fn next_seat_where<F>(players: &[Player], from: SeatIndex, pred: F) -> Option<SeatIndex>
where
    F: Fn(&Player) -> bool,
{
    if players.is_empty() {
        return None;
    }
    (1..=players.len())
        .map(|offset| (from + offset) % players.len())
        .find(|&seat| pred(&players[seat]))
}

/// Move the button one seat clockwise among seats dealt into the hand.
/// Folded-out and sitting-out seats are skipped, never given the button.
pub fn advance_dealer(players: &[Player], previous: SeatIndex) -> Option<SeatIndex> {
    next_seat_where(players, previous, Player::can_act)
}

/// Small and big blind seats for a hand with the given dealer. Heads-up
/// the dealer posts the small blind; otherwise the blinds are the next
/// two dealt-in seats clockwise.
pub fn blind_seats(players: &[Player], dealer: SeatIndex) -> Option<(SeatIndex, SeatIndex)> {
    let dealt_in = players.iter().filter(|p| p.can_act()).count();
    if dealt_in < 2 {
        return None;
    }
    if dealt_in == 2 {
        let big = next_seat_where(players, dealer, Player::can_act)?;
        return Some((dealer, big));
    }
    let small = next_seat_where(players, dealer, Player::can_act)?;
    let big = next_seat_where(players, small, Player::can_act)?;
    Some((small, big))
}

/// First voluntary actor pre-flop: left of the big blind.
pub fn first_to_act_preflop(players: &[Player], big_blind: SeatIndex) -> Option<SeatIndex> {
    next_seat_where(players, big_blind, Player::can_act)
}

/// First actor on later streets: left of the dealer.
pub fn first_to_act_postflop(players: &[Player], dealer: SeatIndex) -> Option<SeatIndex> {
    next_seat_where(players, dealer, Player::can_act)
}

/// Seats in clockwise order starting immediately after the dealer, the
/// order odd chips are handed out in.
pub fn payout_order(players: &[Player], dealer: SeatIndex) -> Vec<PlayerId> {
    if players.is_empty() {
        return Vec::new();
    }
    (1..=players.len())
        .map(|offset| (dealer + offset) % players.len())
        .map(|seat| players[seat].id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::{Nickname, PlayerStatus};

    fn table(statuses: &[PlayerStatus]) -> Vec<Player> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, &status)| {
                let mut player = Player::new(Nickname::new(&format!("p{i}")), 1000);
                player.status = status;
                player
            })
            .collect()
    }

    use PlayerStatus::{AllIn, Folded, InHand, SittingOut};

    #[test]
    fn test_dealer_advances_one_seat() {
        let players = table(&[InHand, InHand, InHand]);
        assert_eq!(advance_dealer(&players, 0), Some(1));
        assert_eq!(advance_dealer(&players, 2), Some(0));
    }

    #[test]
    fn test_dealer_skips_sitting_out_seats() {
        let players = table(&[InHand, SittingOut, InHand]);
        assert_eq!(advance_dealer(&players, 0), Some(2));
    }

    #[test]
    fn test_dealer_none_when_nobody_dealt_in() {
        let players = table(&[SittingOut, SittingOut]);
        assert_eq!(advance_dealer(&players, 0), None);
    }

    #[test]
    fn test_blinds_follow_dealer() {
        let players = table(&[InHand, InHand, InHand, InHand]);
        assert_eq!(blind_seats(&players, 0), Some((1, 2)));
        assert_eq!(blind_seats(&players, 3), Some((0, 1)));
    }

    #[test]
    fn test_heads_up_dealer_posts_small_blind() {
        let players = table(&[InHand, InHand]);
        assert_eq!(blind_seats(&players, 0), Some((0, 1)));
        assert_eq!(blind_seats(&players, 1), Some((1, 0)));
    }

    #[test]
    fn test_blinds_skip_sitting_out() {
        let players = table(&[InHand, SittingOut, InHand, InHand]);
        assert_eq!(blind_seats(&players, 0), Some((2, 3)));
    }

    #[test]
    fn test_preflop_action_starts_left_of_big_blind() {
        let players = table(&[InHand, InHand, InHand, InHand]);
        // Dealer 0, blinds 1/2: seat 3 opens.
        assert_eq!(first_to_act_preflop(&players, 2), Some(3));
    }

    #[test]
    fn test_heads_up_preflop_dealer_opens() {
        let players = table(&[InHand, InHand]);
        // Dealer 0 posts small blind, seat 1 the big: dealer opens.
        assert_eq!(first_to_act_preflop(&players, 1), Some(0));
    }

    #[test]
    fn test_postflop_action_starts_left_of_dealer() {
        let players = table(&[InHand, InHand, InHand]);
        assert_eq!(first_to_act_postflop(&players, 0), Some(1));
    }

    #[test]
    fn test_acting_order_skips_folded_and_all_in() {
        let players = table(&[InHand, Folded, AllIn, InHand]);
        assert_eq!(next_seat_where(&players, 0, Player::can_act), Some(3));
        assert_eq!(next_seat_where(&players, 3, Player::can_act), Some(0));
    }

    #[test]
    fn test_payout_order_starts_after_dealer() {
        let players = table(&[InHand, InHand, InHand, InHand]);
        let order = payout_order(&players, 1);
        let expected: Vec<PlayerId> = [2, 3, 0, 1].iter().map(|&i| players[i].id).collect();
        assert_eq!(order, expected);
    }
}
