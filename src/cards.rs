use serde::{Deserialize, Serialize};
use std::fmt;

/// A card value in `0..=9`.
///
/// Cards are plain integers: a card in hand can attack, seed a new accumulator
/// through a swap, or (when every card in hand is a face) enable a Boom.
pub type Card = u8;

/// The face card. It cannot store life and cannot be attacked.
pub const FACE: Card = 0;

/// Highest card value that can be drawn.
pub const MAX_CARD: Card = 9;

/// Number of distinct card values (`0..=9`).
pub const CARD_VALUES: usize = MAX_CARD as usize + 1;

/// A life-storage slot on a player's board.
///
/// `original_value` never changes after creation; damage is recorded as an
/// ordered list of attack amounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accumulator {
    original_value: Card,
    #[serde(default)]
    attacks: Vec<Card>,
}

impl Accumulator {
    /// A fresh accumulator with no attacks recorded.
    ///
    /// ```
    /// use boom_rs::cards::Accumulator;
    ///
    /// let acc = Accumulator::new(7);
    /// assert_eq!(acc.remaining(), 7);
    /// assert!(!acc.is_attacked());
    /// ```
    pub fn new(original_value: Card) -> Self {
        Self { original_value, attacks: Vec::new() }
    }

    /// Build an accumulator with attacks already applied (snapshots, tests).
    pub fn with_attacks(original_value: Card, attacks: Vec<Card>) -> Self {
        Self { original_value, attacks }
    }

    pub fn original_value(&self) -> Card {
        self.original_value
    }

    pub fn attacks(&self) -> &[Card] {
        &self.attacks
    }

    pub fn is_attacked(&self) -> bool {
        !self.attacks.is_empty()
    }

    /// Face accumulators (original value 0) hold no life and cannot be attacked.
    pub fn is_face(&self) -> bool {
        self.original_value == FACE
    }

    /// Remaining HP, floored at zero.
    pub fn remaining(&self) -> u32 {
        let damage: u32 = self.attacks.iter().map(|&a| u32::from(a)).sum();
        u32::from(self.original_value).saturating_sub(damage)
    }

    /// A real accumulator whose life has been fully spent.
    pub fn is_depleted(&self) -> bool {
        !self.is_face() && self.remaining() == 0
    }

    pub(crate) fn record_attack(&mut self, amount: Card) {
        self.attacks.push(amount);
    }
}

impl fmt::Display for Accumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.attacks.is_empty() {
            write!(f, "{}", self.original_value)
        } else {
            write!(f, "{}/{}", self.remaining(), self.original_value)
        }
    }
}

/// Total remaining HP over a set of accumulators.
///
/// ```
/// use boom_rs::cards::{remaining_hp, Accumulator};
///
/// let board = [Accumulator::new(5), Accumulator::with_attacks(4, vec![3]), Accumulator::new(0)];
/// assert_eq!(remaining_hp(&board), 6);
/// ```
pub fn remaining_hp(accumulators: &[Accumulator]) -> u32 {
    accumulators.iter().map(Accumulator::remaining).sum()
}

/// Accumulators still on the board: positive HP, or face accumulators which
/// are never removed. Indices are true positions in `accumulators`.
pub fn active_accumulators(
    accumulators: &[Accumulator],
) -> impl Iterator<Item = (usize, &Accumulator)> + '_ {
    accumulators.iter().enumerate().filter(|(_, a)| a.is_face() || a.remaining() > 0)
}
