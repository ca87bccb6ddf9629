use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{self};
use uuid::Uuid;

use super::constants;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Club,
    Spade,
    Diamond,
    Heart,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Club, Self::Spade, Self::Diamond, Self::Heart];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "♣",
            Self::Spade => "♠",
            Self::Diamond => "♦",
            Self::Heart => "♥",
        };
        write!(f, "{repr}")
    }
}

/// Placeholder for card values. Deuce is 2, ace is always 14.
pub type Value = u8;

pub const VALUE_MIN: Value = 2;
pub const VALUE_ACE: Value = 14;

/// A card is a tuple of a uInt8 value (2u8=deuce ... 14u8=ace) and a suit.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub Value, pub Suit);

pub fn value_symbol(value: Value) -> String {
    match value {
        VALUE_ACE => "A".to_string(),
        13 => "K".to_string(),
        12 => "Q".to_string(),
        11 => "J".to_string(),
        v => v.to_string(),
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = format!("{}{}", value_symbol(self.0), self.1);
        write!(f, "{repr}")
    }
}

/// The 52 distinct cards behind a deal cursor. Shuffled once per hand,
/// never mid-hand; running out of cards is an invariant violation the
/// state machine treats as fatal.
#[derive(Debug)]
pub struct Deck {
    cards: [Card; 52],
    deal_idx: usize,
}

impl Deck {
    /// Uniform random permutation with the cursor back at the top.
    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        self.cards.shuffle(rng);
        self.deal_idx = 0;
    }

    /// Deal the next `n` cards, or `None` if fewer remain.
    pub fn deal(&mut self, n: usize) -> Option<Vec<Card>> {
        if self.remaining() < n {
            return None;
        }
        let dealt = self.cards[self.deal_idx..self.deal_idx + n].to_vec();
        self.deal_idx += n;
        Some(dealt)
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        52 - self.deal_idx
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = std::array::from_fn(|i| {
            let value = VALUE_MIN + (i / 4) as Value;
            Card(value, Suit::ALL[i % 4])
        });
        Self {
            cards,
            deal_idx: 0,
        }
    }
}

/// Type alias for whole chips. All bets and player stacks are integer
/// chip counts; pot splits never produce fractions.
pub type Chips = u32;

/// Stable identity of a player for the lifetime of their seat. Survives
/// reconnection; the transient session id is bound to it by the room.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerId(Uuid);

impl PlayerId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Nickname(String);

impl Nickname {
    pub fn new(s: &str) -> Self {
        let mut nickname: String = s
            .trim()
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        nickname.truncate(constants::MAX_NICKNAME_LENGTH);
        Self(nickname)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for Nickname {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<String> for Nickname {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for Nickname {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Blinds {
    pub small: Chips,
    pub big: Chips,
}

impl Default for Blinds {
    fn default() -> Self {
        Self {
            small: constants::DEFAULT_SMALL_BLIND,
            big: constants::DEFAULT_BIG_BLIND,
        }
    }
}

impl fmt::Display for Blinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = format!("{}/{}", self.small, self.big);
        write!(f, "{repr}")
    }
}

/// Which blind a forced bet was.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum BlindKind {
    Small,
    Big,
}

impl fmt::Display for BlindKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Small => "small blind",
            Self::Big => "big blind",
        };
        write!(f, "{repr}")
    }
}

/// A seat's standing within the current hand.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerStatus {
    /// Still has decisions to make this hand.
    InHand,
    /// Forfeited their contribution for the hand.
    Folded,
    /// Whole stack committed; contests the pot but acts no more.
    AllIn,
    /// Seated but not dealt in (joined mid-hand or busted).
    SittingOut,
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::InHand => "in-game",
            Self::Folded => "folded",
            Self::AllIn => "all-in",
            Self::SittingOut => "sitting-out",
        };
        write!(f, "{repr}")
    }
}

/// A voluntary betting action. `Raise { to }` names the street total the
/// raiser is raising *to*, not the increment.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum PlayerAction {
    Fold,
    Check,
    Call,
    Raise { to: Chips },
    AllIn,
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Fold => "folds".to_string(),
            Self::Check => "checks".to_string(),
            Self::Call => "calls".to_string(),
            Self::Raise { to } => format!("raises to {to}"),
            Self::AllIn => "goes all-in".to_string(),
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub nickname: Nickname,
    pub chips: Chips,
    /// Hole cards: empty between hands, two while dealt in.
    pub hole_cards: Vec<Card>,
    pub status: PlayerStatus,
    /// Chips committed on the current street.
    pub street_bet: Chips,
    /// Chips committed across the whole hand.
    pub total_bet: Chips,
    pub has_acted: bool,
}

impl Player {
    #[must_use]
    pub fn new(nickname: Nickname, chips: Chips) -> Self {
        Self {
            id: PlayerId::new(),
            nickname,
            chips,
            hole_cards: Vec::with_capacity(2),
            status: PlayerStatus::SittingOut,
            street_bet: 0,
            total_bet: 0,
            has_acted: false,
        }
    }

    /// Clear per-hand fields; chips and seat stay put.
    pub fn reset_for_hand(&mut self) {
        self.hole_cards.clear();
        self.status = if self.chips > 0 {
            PlayerStatus::InHand
        } else {
            PlayerStatus::SittingOut
        };
        self.street_bet = 0;
        self.total_bet = 0;
        self.has_acted = false;
    }

    /// Still contesting the pot (may or may not have actions left).
    #[must_use]
    pub fn is_contender(&self) -> bool {
        matches!(self.status, PlayerStatus::InHand | PlayerStatus::AllIn)
    }

    /// Has decisions left this street.
    #[must_use]
    pub fn can_act(&self) -> bool {
        matches!(self.status, PlayerStatus::InHand)
    }

    /// Move `amount` (capped at the stack) from chips into the bet
    /// fields, flipping to all-in when the stack empties. Returns the
    /// amount actually committed.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let committed = amount.min(self.chips);
        self.chips -= committed;
        self.street_bet += committed;
        self.total_bet += committed;
        if self.chips == 0 {
            self.status = PlayerStatus::AllIn;
        }
        committed
    }
}
