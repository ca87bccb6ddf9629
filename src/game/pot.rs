//! Pot accounting: per-hand contributions, all-in tiers, payouts.
//!
//! Contributions are tracked per player for the whole hand. At showdown
//! they are partitioned into tiers by ascending all-in amount; each tier
//! forms a pot eligible only to the still-contesting players who covered
//! it. Every chip that entered the hand leaves through a payout.

use serde::Serialize;
use std::collections::HashMap;

use super::entities::{Chips, Player, PlayerId};
use super::eval::HandValue;

/// One contribution tier: the main pot is the lowest tier, side pots
/// follow in increasing tier order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Pot {
    pub amount: Chips,
    pub eligible: Vec<PlayerId>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Payout {
    pub player_id: PlayerId,
    pub amount: Chips,
}

#[derive(Debug, Default)]
pub struct PotManager {
    /// Chips each player has put into the hand, folded players included.
    contributions: HashMap<PlayerId, Chips>,
}

impl PotManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.contributions.clear();
    }

    /// Fold every player's street bet into the hand contributions and
    /// zero the street bets for the next street. Whole-hand totals on
    /// the players are left alone until showdown.
    pub fn collect_street(&mut self, players: &mut [Player]) {
        for player in players.iter_mut() {
            if player.street_bet > 0 {
                *self.contributions.entry(player.id).or_default() += player.street_bet;
                player.street_bet = 0;
            }
        }
    }

    /// Sweep a single player's pending street bet, used when a seat
    /// vacates mid-street.
    pub fn collect_player(&mut self, player: &mut Player) {
        if player.street_bet > 0 {
            *self.contributions.entry(player.id).or_default() += player.street_bet;
            player.street_bet = 0;
        }
    }

    #[must_use]
    pub fn contribution(&self, player_id: PlayerId) -> Chips {
        self.contributions.get(&player_id).copied().unwrap_or(0)
    }

    /// Chips collected so far, street bets not yet swept excluded.
    #[must_use]
    pub fn total(&self) -> Chips {
        self.contributions.values().sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Partition the contributions into pots. Tier boundaries come from
    /// the distinct totals of players still contesting the hand; dead
    /// money from folded or departed contributors fills the tiers it
    /// reaches and anything beyond the top boundary sweeps into the
    /// final pot.
    #[must_use]
    pub fn pots(&self, players: &[Player]) -> Vec<Pot> {
        let mut levels: Vec<Chips> = players
            .iter()
            .filter(|p| p.is_contender())
            .map(|p| self.contribution(p.id))
            .filter(|&c| c > 0)
            .collect();
        levels.sort_unstable();
        levels.dedup();
        let Some(&top) = levels.last() else {
            return Vec::new();
        };
        let mut pots = Vec::with_capacity(levels.len());
        let mut prev_level = 0;
        for &level in &levels {
            let mut amount = 0;
            for &contribution in self.contributions.values() {
                if level == top {
                    // Final tier absorbs everything above the boundary.
                    amount += contribution.saturating_sub(prev_level);
                } else {
                    amount += contribution.min(level).saturating_sub(prev_level);
                }
            }
            let eligible: Vec<PlayerId> = players
                .iter()
                .filter(|p| p.is_contender() && self.contribution(p.id) >= level)
                .map(|p| p.id)
                .collect();
            if amount > 0 && !eligible.is_empty() {
                pots.push(Pot { amount, eligible });
            }
            prev_level = level;
        }
        pots
    }

    /// Pay out every pot. Each pot goes to the best `HandValue` among
    /// its eligible players, split evenly on exact ties; odd chips go
    /// one at a time following `payout_order` (seats clockwise starting
    /// immediately after the dealer).
    #[must_use]
    pub fn award(
        pots: &[Pot],
        rankings: &HashMap<PlayerId, HandValue>,
        payout_order: &[PlayerId],
    ) -> Vec<Payout> {
        let mut totals: HashMap<PlayerId, Chips> = HashMap::new();

        for pot in pots {
            let best = pot
                .eligible
                .iter()
                .filter_map(|id| rankings.get(id))
                .max();
            let Some(best) = best else { continue };

            let mut winners: Vec<PlayerId> = payout_order
                .iter()
                .filter(|id| pot.eligible.contains(id))
                .filter(|id| rankings.get(id) == Some(best))
                .copied()
                .collect();
            if winners.is_empty() {
                // Eligible players outside the payout order would strand
                // chips; keep the order authoritative.
                winners = pot
                    .eligible
                    .iter()
                    .filter(|id| rankings.get(id) == Some(best))
                    .copied()
                    .collect();
            }

            let share = pot.amount / winners.len() as Chips;
            let remainder = pot.amount % winners.len() as Chips;
            for (i, winner) in winners.iter().enumerate() {
                let extra = Chips::from((i as Chips) < remainder);
                *totals.entry(*winner).or_default() += share + extra;
            }
        }

        payout_order
            .iter()
            .filter_map(|id| {
                totals.remove(id).map(|amount| Payout {
                    player_id: *id,
                    amount,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::{Card, Nickname, PlayerStatus, Suit};
    use crate::game::eval::evaluate;

    fn seated(nickname: &str, chips: Chips) -> Player {
        let mut player = Player::new(Nickname::new(nickname), chips);
        player.status = PlayerStatus::InHand;
        player
    }

    fn bet(manager: &mut PotManager, players: &mut [Player], amounts: &[Chips]) {
        for (player, &amount) in players.iter_mut().zip(amounts) {
            player.commit(amount);
        }
        manager.collect_street(players);
    }

    #[test]
    fn test_collect_street_resets_street_bets() {
        let mut manager = PotManager::new();
        let mut players = vec![seated("a", 500), seated("b", 500)];
        bet(&mut manager, &mut players, &[40, 40]);

        assert_eq!(manager.total(), 80);
        assert!(players.iter().all(|p| p.street_bet == 0));
        assert!(players.iter().all(|p| p.total_bet == 40));
    }

    #[test]
    fn test_equal_contributions_make_single_main_pot() {
        let mut manager = PotManager::new();
        let mut players = vec![seated("a", 500), seated("b", 500), seated("c", 500)];
        bet(&mut manager, &mut players, &[100, 100, 100]);

        let pots = manager.pots(&players);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, 300);
        assert_eq!(pots[0].eligible.len(), 3);
    }

    #[test]
    fn test_short_all_in_splits_main_and_side_pot() {
        // Contributions [100, 100, 50]: main pot of 150 for everyone,
        // side pot of 100 for the two full contributors.
        let mut manager = PotManager::new();
        let mut players = vec![seated("a", 500), seated("b", 500), seated("c", 50)];
        bet(&mut manager, &mut players, &[100, 100, 50]);
        assert_eq!(players[2].status, PlayerStatus::AllIn);

        let pots = manager.pots(&players);
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, 150);
        assert_eq!(pots[0].eligible.len(), 3);
        assert_eq!(pots[1].amount, 100);
        assert_eq!(pots[1].eligible.len(), 2);
        assert!(!pots[1].eligible.contains(&players[2].id));
    }

    #[test]
    fn test_three_tier_all_ins() {
        // Stacks 25/75/150/150 all-in: pots of 100, 150, and 150.
        let mut manager = PotManager::new();
        let mut players = vec![
            seated("a", 25),
            seated("b", 75),
            seated("c", 150),
            seated("d", 150),
        ];
        bet(&mut manager, &mut players, &[25, 75, 150, 150]);

        let pots = manager.pots(&players);
        assert_eq!(
            pots.iter().map(|p| p.amount).collect::<Vec<_>>(),
            vec![100, 150, 150]
        );
        assert_eq!(
            pots.iter().map(|p| p.eligible.len()).collect::<Vec<_>>(),
            vec![4, 3, 2]
        );
        let total: Chips = pots.iter().map(|p| p.amount).sum();
        assert_eq!(total, manager.total());
    }

    #[test]
    fn test_folded_contribution_is_dead_money() {
        let mut manager = PotManager::new();
        let mut players = vec![seated("a", 500), seated("b", 500), seated("c", 500)];
        bet(&mut manager, &mut players, &[100, 100, 60]);
        players[2].status = PlayerStatus::Folded;

        let pots = manager.pots(&players);
        // One tier (both contenders at 100); the folder's 60 rides along.
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, 260);
        assert_eq!(pots[0].eligible.len(), 2);
    }

    #[test]
    fn test_uncalled_overbet_returns_via_solo_side_pot() {
        // A short call of a bigger all-in: the excess comes back to the
        // big stack as a pot only they are eligible for.
        let mut manager = PotManager::new();
        let mut players = vec![seated("a", 500), seated("b", 300)];
        bet(&mut manager, &mut players, &[500, 300]);

        let pots = manager.pots(&players);
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, 600);
        assert_eq!(pots[1].amount, 200);
        assert_eq!(pots[1].eligible, vec![players[0].id]);
    }

    fn rank(cards: &[(u8, Suit)]) -> HandValue {
        let cards: Vec<Card> = cards.iter().map(|&(v, s)| Card(v, s)).collect();
        evaluate(&cards, &[])
    }

    use Suit::{Club as C, Diamond as D, Heart as H, Spade as S};

    #[test]
    fn test_award_single_winner_takes_pot() {
        let mut manager = PotManager::new();
        let mut players = vec![seated("a", 500), seated("b", 500)];
        bet(&mut manager, &mut players, &[100, 100]);

        let mut rankings = HashMap::new();
        rankings.insert(
            players[0].id,
            rank(&[(14, S), (14, H), (9, C), (5, D), (2, S)]),
        );
        rankings.insert(
            players[1].id,
            rank(&[(13, S), (13, H), (9, D), (5, C), (2, H)]),
        );
        let order = vec![players[0].id, players[1].id];

        let payouts = PotManager::award(&manager.pots(&players), &rankings, &order);
        assert_eq!(payouts, vec![Payout { player_id: players[0].id, amount: 200 }]);
    }

    #[test]
    fn test_award_odd_chip_goes_clockwise_from_dealer() {
        // Pot of 101 split between two exact ties: 51 to the first seat
        // in payout order, 50 to the other. The odd chip exists because
        // a third player folded after posting one chip.
        let mut manager = PotManager::new();
        let mut players = vec![seated("a", 500), seated("b", 500), seated("c", 500)];
        bet(&mut manager, &mut players, &[50, 50, 1]);
        players[2].status = PlayerStatus::Folded;

        let tie_a = rank(&[(14, S), (13, S), (9, C), (5, D), (2, S)]);
        let tie_b = rank(&[(14, H), (13, H), (9, D), (5, C), (2, H)]);
        assert_eq!(tie_a, tie_b);
        let mut rankings = HashMap::new();
        rankings.insert(players[0].id, tie_a);
        rankings.insert(players[1].id, tie_b);

        let pots = manager.pots(&players);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, 101);

        let order = vec![players[1].id, players[0].id];
        let payouts = PotManager::award(&pots, &rankings, &order);
        assert_eq!(
            payouts,
            vec![
                Payout { player_id: players[1].id, amount: 51 },
                Payout { player_id: players[0].id, amount: 50 },
            ]
        );
    }

    #[test]
    fn test_award_side_pot_winners_independent() {
        // Short stack holds the best hand: takes the main pot only; the
        // side pot goes to the better of the two covering players.
        let mut manager = PotManager::new();
        let mut players = vec![seated("a", 500), seated("b", 500), seated("c", 50)];
        bet(&mut manager, &mut players, &[100, 100, 50]);

        let mut rankings = HashMap::new();
        rankings.insert(
            players[2].id,
            rank(&[(14, S), (14, H), (14, C), (5, D), (2, S)]),
        );
        rankings.insert(
            players[0].id,
            rank(&[(13, S), (13, H), (9, C), (5, C), (2, H)]),
        );
        rankings.insert(
            players[1].id,
            rank(&[(12, S), (12, H), (9, D), (5, H), (2, C)]),
        );
        let order = vec![players[1].id, players[2].id, players[0].id];

        let payouts = PotManager::award(&manager.pots(&players), &rankings, &order);
        let by_id: HashMap<_, _> = payouts.iter().map(|p| (p.player_id, p.amount)).collect();
        assert_eq!(by_id[&players[2].id], 150);
        assert_eq!(by_id[&players[0].id], 100);
        assert!(!by_id.contains_key(&players[1].id));
    }

    #[test]
    fn test_award_conserves_every_chip() {
        let mut manager = PotManager::new();
        let mut players = vec![
            seated("a", 120),
            seated("b", 77),
            seated("c", 301),
            seated("d", 301),
        ];
        bet(&mut manager, &mut players, &[120, 77, 301, 250]);

        let mut rankings = HashMap::new();
        let hands = [
            rank(&[(14, S), (13, S), (9, C), (5, D), (2, S)]),
            rank(&[(14, H), (13, H), (9, D), (5, C), (2, H)]),
            rank(&[(7, S), (7, H), (9, H), (5, H), (2, C)]),
            rank(&[(4, S), (4, H), (9, S), (5, S), (3, C)]),
        ];
        for (player, hand) in players.iter().zip(hands) {
            rankings.insert(player.id, hand);
        }
        let order: Vec<PlayerId> = players.iter().map(|p| p.id).collect();

        let pots = manager.pots(&players);
        let payouts = PotManager::award(&pots, &rankings, &order);
        let paid: Chips = payouts.iter().map(|p| p.amount).sum();
        assert_eq!(paid, manager.total());
    }
}
