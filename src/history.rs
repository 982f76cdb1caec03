//! Chronological record of accepted actions.
//!
//! Every accepted action appends exactly one [`HistoryEntry`], tagged with the
//! turn it was played on and the acting player. The per-action
//! [`ActionRecord`] keeps just enough to describe the move to a human.

use crate::action::ActionKind;
use crate::cards::Card;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackRecord {
    pub target_player_id: String,
    pub source_hand_value: Card,
    /// Remaining value of the target before the attack landed.
    pub target_accumulator_value: u32,
    /// Value of the bonus accumulator earned by a one-hit kill.
    pub obtained_extra_accumulator: Option<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRecord {
    pub source_hand_value: Card,
    /// Original value of the accumulator that went back to the hand.
    pub target_accumulator_value: Card,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscardRecord {
    pub source_hand_value: Card,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoomRecord {
    pub target_value: u32,
    pub accumulators_destroyed_quantity: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "lowercase")]
pub enum ActionRecord {
    Attack(AttackRecord),
    Swap(SwapRecord),
    Discard(DiscardRecord),
    Boom(BoomRecord),
}

impl ActionRecord {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionRecord::Attack(_) => ActionKind::Attack,
            ActionRecord::Swap(_) => ActionKind::Swap,
            ActionRecord::Discard(_) => ActionKind::Discard,
            ActionRecord::Boom(_) => ActionKind::Boom,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub turn: u64,
    pub source_player_id: String,
    /// Flattened on the wire as `"action"` plus `"data"`.
    #[serde(flatten)]
    pub record: ActionRecord,
}

/// How a log line should be highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Tone {
    Info,
    Warning,
    Success,
    Error,
}

impl HistoryEntry {
    pub fn action(&self) -> ActionKind {
        self.record.kind()
    }

    pub fn tone(&self) -> Tone {
        match &self.record {
            ActionRecord::Attack(_) => Tone::Warning,
            ActionRecord::Swap(_) | ActionRecord::Discard(_) => Tone::Info,
            ActionRecord::Boom(b) if b.accumulators_destroyed_quantity > 0 => Tone::Success,
            ActionRecord::Boom(_) => Tone::Error,
        }
    }

    /// One-line description, e.g. `"Paco attacked Quinn with card 3 against accumulator 5"`.
    ///
    /// `name_of` resolves player ids to display names; unknown ids fall back to
    /// `Player <last four chars of id>`.
    pub fn describe<'a, F>(&self, name_of: F) -> String
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let who = display_name(&self.source_player_id, &name_of);
        let details = match &self.record {
            ActionRecord::Attack(a) => {
                let target = display_name(&a.target_player_id, &name_of);
                let mut s = format!(
                    "attacked {target} with card {} against accumulator {}",
                    a.source_hand_value, a.target_accumulator_value
                );
                if let Some(extra) = a.obtained_extra_accumulator {
                    s.push_str(&format!(", obtaining extra accumulator {extra}"));
                }
                s
            }
            ActionRecord::Swap(s) => format!(
                "swapped hand card {} with accumulator {}",
                s.source_hand_value, s.target_accumulator_value
            ),
            ActionRecord::Discard(d) => {
                format!("discarded hand card with value {}", d.source_hand_value)
            }
            ActionRecord::Boom(b) => format!(
                "targeted value {}, destroyed {} accumulator(s)",
                b.target_value, b.accumulators_destroyed_quantity
            ),
        };
        format!("{who} {details}")
    }
}

fn display_name<'a, F>(id: &str, name_of: &F) -> String
where
    F: Fn(&str) -> Option<&'a str>,
{
    match name_of(id) {
        Some(name) => name.to_string(),
        None => {
            let tail: String = {
                let chars: Vec<char> = id.chars().collect();
                chars[chars.len().saturating_sub(4)..].iter().collect()
            };
            format!("Player {tail}")
        }
    }
}

/// The last `n` entries, oldest first.
pub fn recent(history: &[HistoryEntry], n: usize) -> &[HistoryEntry] {
    recent_offset(history, n, 0)
}

/// A window of `n` entries ending `offset` entries before the newest one.
/// The offset is clamped so the window never runs off the start.
pub fn recent_offset(history: &[HistoryEntry], n: usize, offset: usize) -> &[HistoryEntry] {
    if n == 0 || history.is_empty() {
        return &[];
    }
    let len = history.len();
    let max_offset = len.saturating_sub(n);
    let offset = offset.min(max_offset);
    let end = len - offset;
    let start = end.saturating_sub(n);
    &history[start..end]
}

/// Entries grouped by turn number, ascending.
pub fn group_by_turn(history: &[HistoryEntry]) -> Vec<(u64, Vec<&HistoryEntry>)> {
    let mut groups: Vec<(u64, Vec<&HistoryEntry>)> = Vec::new();
    for entry in history {
        match groups.iter_mut().find(|(turn, _)| *turn == entry.turn) {
            Some((_, entries)) => entries.push(entry),
            None => groups.push((entry.turn, vec![entry])),
        }
    }
    groups.sort_by_key(|(turn, _)| *turn);
    groups
}
