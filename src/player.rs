//! Lobby-level player records.
//!
//! The rule engine only needs the `id` of each player; the remaining fields
//! travel alongside the game for front ends (names and colours in the log,
//! the AI strategy tag for bot seats, the owning session for bot control).

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub color: String,
    /// Name of the AI strategy driving this player, `None` for humans.
    #[serde(default)]
    pub ai_strategy: Option<String>,
    /// Session that controls this player.
    #[serde(default)]
    pub owner: String,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: PREDEFINED_COLORS[0].to_string(),
            ai_strategy: None,
            owner: String::new(),
        }
    }

    /// A player with a random name and colour from the predefined pools.
    pub fn random<R: Rng + ?Sized>(id: impl Into<String>, rng: &mut R) -> Self {
        let name = PREDEFINED_NAMES.choose(rng).copied().unwrap_or("Player");
        let color = PREDEFINED_COLORS.choose(rng).copied().unwrap_or("#FFFFFF");
        Self::new(id, name).with_color(color)
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_ai(mut self, strategy: impl Into<String>) -> Self {
        self.ai_strategy = Some(strategy.into());
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    pub fn is_bot(&self) -> bool {
        self.ai_strategy.is_some()
    }
}

pub const PREDEFINED_COLORS: [&str; 20] = [
    "#FF0000", "#0000FF", "#008000", "#FFFF00", "#800080", "#FFA500", "#FFC0CB", "#00FFFF",
    "#FF00FF", "#00FF00", "#4B0082", "#008080", "#A52A2A", "#000080", "#800000", "#808000",
    "#C0C0C0", "#FFD700", "#FF7F50", "#DC143C",
];

pub const PREDEFINED_NAMES: [&str; 30] = [
    "Igordo",
    "Polete",
    "Romesro",
    "La Juana",
    "Hinoko",
    "Saumelio",
    "Arandanos",
    "Bielo",
    "Paco",
    "Poya",
    "Alex",
    "Jordan",
    "Casey",
    "Morgan",
    "Taylor",
    "Riley",
    "Avery",
    "Quinn",
    "Blake",
    "Sage",
    "River",
    "Phoenix",
    "Rowan",
    "Emery",
    "Dakota",
    "Skyler",
    "Cameron",
    "Hayden",
    "Parker",
    "Reese",
];

/// Parse a `#RRGGBB` colour into its components.
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some((r, g, b))
}
