//! Five-card hand evaluation.
//!
//! `evaluate` enumerates every 5-card subset of the available cards
//! (2 hole + up to 5 community), classifies each by category and
//! kickers, and returns the maximum. `HandValue` is totally ordered so
//! showdown comparison and exact-tie detection are plain `Ord` calls.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::{self};

use super::entities::{Card, VALUE_ACE, Value};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum HandCategory {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::HighCard => "High Card",
            Self::OnePair => "Pair",
            Self::TwoPair => "Two Pair",
            Self::ThreeOfAKind => "Three of a Kind",
            Self::Straight => "Straight",
            Self::Flush => "Flush",
            Self::FullHouse => "Full House",
            Self::FourOfAKind => "Four of a Kind",
            Self::StraightFlush => "Straight Flush",
        };
        write!(f, "{repr}")
    }
}

/// Strength of a best five-card hand. Ordering and equality consider the
/// category and kicker values only, never suits, so hands that differ
/// only by suit are exact ties and split the pot.
#[derive(Clone, Debug, Serialize)]
pub struct HandValue {
    pub category: HandCategory,
    /// Kicker values in descending significance, zero-padded.
    tiebreak: [Value; 5],
    /// The five cards the strength was read from, grouped then kicked.
    pub best_five: Vec<Card>,
}

impl HandValue {
    fn key(&self) -> (HandCategory, [Value; 5]) {
        (self.category, self.tiebreak)
    }

    /// Single ordered integer for broadcast-side comparison displays.
    #[must_use]
    pub fn strength(&self) -> u32 {
        let mut packed = self.category as u32;
        for value in self.tiebreak {
            packed = (packed << 4) | u32::from(value);
        }
        packed
    }

    /// Human-readable description, e.g. "Full House, Kings full of Tens".
    #[must_use]
    pub fn describe(&self) -> String {
        let t = &self.tiebreak;
        match self.category {
            HandCategory::StraightFlush if t[0] == VALUE_ACE => "Royal Flush".to_string(),
            HandCategory::StraightFlush => {
                format!("Straight Flush, {} high", value_name(t[0]))
            }
            HandCategory::FourOfAKind => format!("Four of a Kind, {}", value_plural(t[0])),
            HandCategory::FullHouse => format!(
                "Full House, {} full of {}",
                value_plural(t[0]),
                value_plural(t[1])
            ),
            HandCategory::Flush => format!("Flush, {} high", value_name(t[0])),
            HandCategory::Straight => format!("Straight, {} high", value_name(t[0])),
            HandCategory::ThreeOfAKind => {
                format!("Three of a Kind, {}", value_plural(t[0]))
            }
            HandCategory::TwoPair => format!(
                "Two Pair, {} and {}",
                value_plural(t[0]),
                value_plural(t[1])
            ),
            HandCategory::OnePair => format!("Pair of {}", value_plural(t[0])),
            HandCategory::HighCard => format!("High Card {}", value_name(t[0])),
        }
    }
}

impl PartialEq for HandValue {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for HandValue {}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

fn value_name(value: Value) -> &'static str {
    match value {
        14 => "Ace",
        13 => "King",
        12 => "Queen",
        11 => "Jack",
        10 => "Ten",
        9 => "Nine",
        8 => "Eight",
        7 => "Seven",
        6 => "Six",
        5 => "Five",
        4 => "Four",
        3 => "Three",
        _ => "Two",
    }
}

fn value_plural(value: Value) -> String {
    match value {
        6 => "Sixes".to_string(),
        v => format!("{}s", value_name(v)),
    }
}

/// Best five-card hand out of hole + community cards.
///
/// Works for any 1..=7 cards; with fewer than five available (pre-river
/// strength hints) the partial set is classified as-is. The post-river
/// 7-card path is the one showdown uses.
#[must_use]
pub fn evaluate(hole_cards: &[Card], community_cards: &[Card]) -> HandValue {
    let mut cards = Vec::with_capacity(hole_cards.len() + community_cards.len());
    cards.extend_from_slice(hole_cards);
    cards.extend_from_slice(community_cards);
    debug_assert!(
        (1..=7).contains(&cards.len()),
        "evaluate expects 1 to 7 cards"
    );

    let n = cards.len();
    if n <= 5 {
        return score_cards(&cards);
    }

    let mut best: Option<HandValue> = None;
    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let value = score_cards(&five);
                        if best.as_ref().is_none_or(|b| value > *b) {
                            best = Some(value);
                        }
                    }
                }
            }
        }
    }
    best.expect("at least one 5-card subset")
}

/// Classify exactly the given cards (1..=5 of them).
fn score_cards(cards: &[Card]) -> HandValue {
    // Count cards per value.
    let mut counts = [0u8; 15];
    for card in cards {
        counts[card.0 as usize] += 1;
    }

    // Groups sorted by count descending, then value descending.
    let mut groups: Vec<(u8, Value)> = (2..=VALUE_ACE)
        .rev()
        .filter(|&v| counts[v as usize] > 0)
        .map(|v| (counts[v as usize], v))
        .collect();
    groups.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

    let is_flush = cards.len() == 5 && cards.iter().all(|c| c.1 == cards[0].1);
    let straight_high = straight_high_value(&groups);

    let pattern: Vec<u8> = groups.iter().map(|(count, _)| *count).collect();

    let (category, tiebreak) = if let Some(high) = straight_high {
        let category = if is_flush {
            HandCategory::StraightFlush
        } else {
            HandCategory::Straight
        };
        (category, straight_tiebreak(high))
    } else if pattern.first() == Some(&4) {
        (
            HandCategory::FourOfAKind,
            pad([groups[0].1, groups[1].1].as_slice()),
        )
    } else if pattern.len() >= 2 && pattern[0] == 3 && pattern[1] == 2 {
        (
            HandCategory::FullHouse,
            pad([groups[0].1, groups[1].1].as_slice()),
        )
    } else if is_flush {
        let values: Vec<Value> = groups.iter().map(|(_, v)| *v).collect();
        (HandCategory::Flush, pad(&values))
    } else if pattern.first() == Some(&3) {
        let values: Vec<Value> = groups.iter().map(|(_, v)| *v).collect();
        (HandCategory::ThreeOfAKind, pad(&values))
    } else if pattern.len() >= 2 && pattern[0] == 2 && pattern[1] == 2 {
        let values: Vec<Value> = groups.iter().map(|(_, v)| *v).collect();
        (HandCategory::TwoPair, pad(&values))
    } else if pattern.first() == Some(&2) {
        let values: Vec<Value> = groups.iter().map(|(_, v)| *v).collect();
        (HandCategory::OnePair, pad(&values))
    } else {
        let values: Vec<Value> = groups.iter().map(|(_, v)| *v).collect();
        (HandCategory::HighCard, pad(&values))
    };

    // Keep the cards in grouped-then-kicker order for display.
    let mut best_five = cards.to_vec();
    best_five.sort_by(|a, b| {
        let ka = (counts[a.0 as usize], a.0);
        let kb = (counts[b.0 as usize], b.0);
        kb.cmp(&ka)
    });

    HandValue {
        category,
        tiebreak,
        best_five,
    }
}

/// High value of a straight formed by exactly five distinct values, or
/// `None`. The wheel (A-2-3-4-5) counts with a high card of five, which
/// keeps it below the 6-high straight.
fn straight_high_value(groups: &[(u8, Value)]) -> Option<Value> {
    if groups.len() != 5 {
        return None;
    }
    let mut values: Vec<Value> = groups.iter().map(|(_, v)| *v).collect();
    values.sort_unstable();
    if values[4] - values[0] == 4 {
        return Some(values[4]);
    }
    if values == [2, 3, 4, 5, VALUE_ACE] {
        return Some(5);
    }
    None
}

fn straight_tiebreak(high: Value) -> [Value; 5] {
    if high == 5 {
        // Wheel: the ace plays low.
        return [5, 4, 3, 2, 1];
    }
    [high, high - 1, high - 2, high - 3, high - 4]
}

fn pad(values: &[Value]) -> [Value; 5] {
    let mut padded = [0; 5];
    for (slot, value) in padded.iter_mut().zip(values) {
        *slot = *value;
    }
    padded
}
