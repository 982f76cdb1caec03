use crate::cards::Card;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four action kinds a player can take on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Attack,
    Swap,
    Discard,
    Boom,
}

impl ActionKind {
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Attack => "Attack",
            ActionKind::Swap => "Swap",
            ActionKind::Discard => "Discard",
            ActionKind::Boom => "Boom",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An action request together with its parameters.
///
/// Serialized as `{"action": "attack", "params": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "params", rename_all = "lowercase")]
pub enum Action {
    /// Damage another player's accumulator with a hand card.
    #[serde(rename_all = "camelCase")]
    Attack { target_player_id: String, source_hand_index: usize, target_accumulator_index: usize },
    /// Exchange a hand card with one of the actor's own untouched accumulators.
    #[serde(rename_all = "camelCase")]
    Swap { source_hand_index: usize, target_accumulator_index: usize },
    /// Replace a hand card with a fresh one.
    #[serde(rename_all = "camelCase")]
    Discard { source_hand_index: usize },
    /// Destroy every accumulator on the board whose remaining HP equals `target_value`.
    #[serde(rename_all = "camelCase")]
    Boom { target_value: u32 },
}

impl Action {
    pub fn attack(target_player_id: impl Into<String>, hand: usize, accumulator: usize) -> Self {
        Action::Attack {
            target_player_id: target_player_id.into(),
            source_hand_index: hand,
            target_accumulator_index: accumulator,
        }
    }

    pub fn swap(hand: usize, accumulator: usize) -> Self {
        Action::Swap { source_hand_index: hand, target_accumulator_index: accumulator }
    }

    pub fn discard(hand: usize) -> Self {
        Action::Discard { source_hand_index: hand }
    }

    pub fn boom(target_value: u32) -> Self {
        Action::Boom { target_value }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Attack { .. } => ActionKind::Attack,
            Action::Swap { .. } => ActionKind::Swap,
            Action::Discard { .. } => ActionKind::Discard,
            Action::Boom { .. } => ActionKind::Boom,
        }
    }
}

/// Which list an out-of-range index pointed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Slot {
    Hand,
    Accumulator,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Hand => f.write_str("hand"),
            Slot::Accumulator => f.write_str("accumulator"),
        }
    }
}

/// Rule-specific reasons an otherwise well-formed action is illegal.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IllegalTarget {
    #[error("cannot attack yourself")]
    SelfAttack,
    #[error("no player with id '{0}' in this game")]
    UnknownPlayer(String),
    #[error("face accumulators cannot be attacked")]
    FaceAccumulator,
    #[error("a face card does nothing against an already attacked accumulator")]
    ZeroOnAttacked,
    #[error("attack of {value} exceeds remaining value {remaining}")]
    ExceedsRemaining { remaining: u32, value: Card },
    #[error("cannot swap with an accumulator that has been attacked")]
    SwapAttacked,
    #[error("boom requires every card in hand to be a face card")]
    HandNotAllFaces,
    #[error("boom target must be positive, got {0}")]
    NonPositiveBoomTarget(u32),
}

/// Why an action was rejected. Rejections never mutate the game.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("no game in progress")]
    NoActiveGame,
    #[error("game has already ended")]
    GameAlreadyEnded,
    #[error("not {got}'s turn: waiting for {expected}")]
    NotPlayersTurn { expected: String, got: String },
    #[error("malformed parameters: {0}")]
    MalformedParams(&'static str),
    #[error("{slot} index {index} out of range (len {len})")]
    IndexOutOfRange { slot: Slot, index: usize, len: usize },
    #[error("illegal target: {0}")]
    IllegalTarget(#[from] IllegalTarget),
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}
