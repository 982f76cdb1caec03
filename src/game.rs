use crate::action::ActionError;
use crate::cards::{remaining_hp, Accumulator, Card};
use crate::deck::{random_card, random_life_card};
use crate::history::{self, ActionRecord, HistoryEntry};
use crate::player::Player;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_HAND_CARDS_COUNT: usize = 3;
pub const DEFAULT_INITIAL_ACCUMULATORS_COUNT: usize = 3;
pub const DEFAULT_AI_DELAY_MS: u64 = 500;

/// Parameters for a new game.
///
/// ```
/// use boom_rs::game::GameConfig;
///
/// let cfg = GameConfig::default().with_hand_cards_count(4);
/// assert_eq!(cfg.hand_cards_count, 4);
/// assert_eq!(cfg.initial_accumulators_count, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[non_exhaustive]
pub struct GameConfig {
    pub initial_accumulators_count: usize,
    pub hand_cards_count: usize,
    /// Pause before a bot's first attempt in a turn.
    #[serde(rename = "aiDelay")]
    pub ai_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_accumulators_count: DEFAULT_INITIAL_ACCUMULATORS_COUNT,
            hand_cards_count: DEFAULT_HAND_CARDS_COUNT,
            ai_delay_ms: DEFAULT_AI_DELAY_MS,
        }
    }
}

impl GameConfig {
    pub fn with_initial_accumulators_count(mut self, n: usize) -> Self {
        self.initial_accumulators_count = n;
        self
    }

    pub fn with_hand_cards_count(mut self, n: usize) -> Self {
        self.hand_cards_count = n;
        self
    }

    pub fn with_ai_delay_ms(mut self, ms: u64) -> Self {
        self.ai_delay_ms = ms;
        self
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SetupError {
    #[error("a game needs at least two players, got {got}")]
    NotEnoughPlayers { got: usize },
    #[error("player id '{0}' appears more than once")]
    DuplicatePlayerId(String),
    #[error("hand size must be at least one card")]
    EmptyHand,
    #[error("players must start with at least one accumulator")]
    NoAccumulators,
}

/// A player's seat in a running game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePlayer {
    pub(crate) id: String,
    pub(crate) hand: Vec<Card>,
    pub(crate) accumulators: Vec<Accumulator>,
}

impl GamePlayer {
    pub fn new(id: impl Into<String>, hand: Vec<Card>, accumulators: Vec<Accumulator>) -> Self {
        Self { id: id.into(), hand, accumulators }
    }

    /// Returns the player's id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the cards in hand, in slot order
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// Returns the accumulators on this player's board
    pub fn accumulators(&self) -> &[Accumulator] {
        &self.accumulators
    }

    pub fn remaining_hp(&self) -> u32 {
        remaining_hp(&self.accumulators)
    }

    pub fn is_alive(&self) -> bool {
        self.remaining_hp() > 0
    }

    /// Boom is only available with a hand made entirely of face cards.
    pub fn has_all_faces(&self) -> bool {
        self.hand.iter().all(|&c| c == crate::cards::FACE)
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Winner(String),
    /// Every player was eliminated by the same action.
    Draw,
}

/// Where a game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus<'a> {
    InProgress,
    Won(&'a str),
    Draw,
}

/// A game of Boom.
///
/// Turn order is the order of `players`, fixed at creation. The acting player
/// is `players[turn % players.len()]`; `turn` only ever grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Game {
    pub(crate) players: Vec<GamePlayer>,
    pub(crate) hand_cards_count: usize,
    #[serde(rename = "aiDelay", default = "default_ai_delay_ms")]
    pub(crate) ai_delay_ms: u64,
    pub(crate) turn: u64,
    #[serde(rename = "winnerId", default, skip_serializing_if = "Option::is_none", with = "winner_id")]
    pub(crate) outcome: Option<Outcome>,
    #[serde(default)]
    history: Vec<HistoryEntry>,
}

impl Game {
    /// Deal a new game for `players`.
    ///
    /// Turn order is a uniform shuffle of the given players. Each player gets
    /// `hand_cards_count` random cards and `initial_accumulators_count`
    /// accumulators drawn without the face card.
    pub fn create<R: Rng + ?Sized>(
        players: &[Player],
        config: &GameConfig,
        rng: &mut R,
    ) -> Result<Self, SetupError> {
        if players.len() < 2 {
            return Err(SetupError::NotEnoughPlayers { got: players.len() });
        }
        if config.hand_cards_count == 0 {
            return Err(SetupError::EmptyHand);
        }
        if config.initial_accumulators_count == 0 {
            return Err(SetupError::NoAccumulators);
        }
        let mut seen = HashSet::with_capacity(players.len());
        for p in players {
            if !seen.insert(p.id.as_str()) {
                return Err(SetupError::DuplicatePlayerId(p.id.clone()));
            }
        }

        let mut ids: Vec<&str> = players.iter().map(|p| p.id.as_str()).collect();
        ids.shuffle(rng);
        let players = ids
            .into_iter()
            .map(|id| {
                let hand = (0..config.hand_cards_count).map(|_| random_card(rng)).collect();
                let accumulators = (0..config.initial_accumulators_count)
                    .map(|_| Accumulator::new(random_life_card(rng)))
                    .collect();
                GamePlayer::new(id, hand, accumulators)
            })
            .collect();

        Ok(Self {
            players,
            hand_cards_count: config.hand_cards_count,
            ai_delay_ms: config.ai_delay_ms,
            turn: 0,
            outcome: None,
            history: Vec::new(),
        })
    }

    /// Assemble a game from explicit seats, in turn order. Intended for
    /// restoring positions and for tests; no dealing happens.
    pub fn from_players(players: Vec<GamePlayer>, hand_cards_count: usize) -> Self {
        Self {
            players,
            hand_cards_count,
            ai_delay_ms: DEFAULT_AI_DELAY_MS,
            turn: 0,
            outcome: None,
            history: Vec::new(),
        }
    }

    /// Returns the seats in turn order
    pub fn players(&self) -> &[GamePlayer] {
        &self.players
    }

    /// Returns the hand size every player is kept at
    pub fn hand_cards_count(&self) -> usize {
        self.hand_cards_count
    }

    /// Returns the bot pacing delay for this game
    pub fn ai_delay_ms(&self) -> u64 {
        self.ai_delay_ms
    }

    /// Returns the turn counter
    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn status(&self) -> GameStatus<'_> {
        match &self.outcome {
            None => GameStatus::InProgress,
            Some(Outcome::Winner(id)) => GameStatus::Won(id),
            Some(Outcome::Draw) => GameStatus::Draw,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn winner_id(&self) -> Option<&str> {
        match &self.outcome {
            Some(Outcome::Winner(id)) => Some(id),
            _ => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self.outcome, Some(Outcome::Draw))
    }

    /// Seat index of the acting player. `None` only for a game with no players.
    pub fn current_index(&self) -> Option<usize> {
        let n = self.players.len() as u64;
        if n == 0 {
            return None;
        }
        Some((self.turn % n) as usize)
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> Option<&GamePlayer> {
        self.current_index().and_then(|i| self.players.get(i))
    }

    pub fn player(&self, id: &str) -> Option<&GamePlayer> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_index(&self, id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// Players with remaining HP, in turn order.
    pub fn alive_players(&self) -> impl Iterator<Item = &GamePlayer> + '_ {
        self.players.iter().filter(|p| p.is_alive())
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn history_recent(&self, n: usize) -> Vec<HistoryEntry> {
        history::recent(&self.history, n).to_vec()
    }

    pub fn history_recent_offset(&self, n: usize, offset: usize) -> Vec<HistoryEntry> {
        history::recent_offset(&self.history, n, offset).to_vec()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Resolve the end of an action: declare a winner or a draw, or move the
    /// turn counter to the next player that is still alive.
    pub(crate) fn advance_turn(&mut self) -> Result<(), ActionError> {
        let alive: Vec<String> = self.alive_players().take(2).map(|p| p.id.clone()).collect();
        match alive.as_slice() {
            [] => {
                self.outcome = Some(Outcome::Draw);
                return Ok(());
            }
            [only] => {
                self.outcome = Some(Outcome::Winner(only.clone()));
                return Ok(());
            }
            _ => {}
        }
        let n = self.players.len() as u64;
        for step in 1..=n {
            let next = self.turn + step;
            if self.players[(next % n) as usize].is_alive() {
                self.turn = next;
                return Ok(());
            }
        }
        let msg = format!("no alive player found after {n} attempts from turn {}", self.turn);
        log::error!("{msg}");
        Err(ActionError::InternalInvariant(msg))
    }

    pub(crate) fn record_history(&mut self, turn: u64, player_id: &str, record: ActionRecord) {
        let entry = HistoryEntry { turn, source_player_id: player_id.to_string(), record };
        self.history.push(entry);
    }
}

fn default_ai_delay_ms() -> u64 {
    DEFAULT_AI_DELAY_MS
}

mod winner_id {
    use super::Outcome;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        outcome: &Option<Outcome>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match outcome {
            Some(Outcome::Winner(id)) => s.serialize_str(id),
            Some(Outcome::Draw) | None => s.serialize_none(),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<Outcome>, D::Error> {
        let id: Option<String> = Option::deserialize(d)?;
        Ok(Some(match id {
            Some(id) => Outcome::Winner(id),
            None => Outcome::Draw,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn roster(n: usize) -> Vec<Player> {
        (1..=n).map(|i| Player::new(format!("p{i}"), format!("P{i}"))).collect()
    }

    fn seat(id: &str, accs: &[Card]) -> GamePlayer {
        GamePlayer::new(id, vec![1, 2, 3], accs.iter().map(|&v| Accumulator::new(v)).collect())
    }

    #[test]
    fn create_deals_configured_sizes() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let cfg = GameConfig::default().with_hand_cards_count(4).with_initial_accumulators_count(2);
        let g = Game::create(&roster(3), &cfg, &mut rng).unwrap();
        assert_eq!(g.players.len(), 3);
        for p in &g.players {
            assert_eq!(p.hand.len(), 4);
            assert_eq!(p.accumulators.len(), 2);
            assert!(p.accumulators.iter().all(|a| a.original_value() > 0 && !a.is_attacked()));
        }
        assert_eq!(g.turn, 0);
        assert!(g.outcome.is_none());
        assert!(g.history.is_empty());
    }

    #[test]
    fn create_rejects_bad_setups() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let cfg = GameConfig::default();
        assert_eq!(
            Game::create(&roster(1), &cfg, &mut rng),
            Err(SetupError::NotEnoughPlayers { got: 1 })
        );
        let dup = vec![Player::new("a", "A"), Player::new("a", "B")];
        assert_eq!(
            Game::create(&dup, &cfg, &mut rng),
            Err(SetupError::DuplicatePlayerId("a".into()))
        );
        let empty = cfg.clone().with_hand_cards_count(0);
        assert_eq!(Game::create(&roster(2), &empty, &mut rng), Err(SetupError::EmptyHand));
    }

    #[test]
    fn advance_skips_eliminated_players() {
        let mut g = Game::from_players(vec![seat("a", &[3]), seat("b", &[]), seat("c", &[2])], 3);
        g.advance_turn().unwrap();
        assert_eq!(g.turn, 2, "b has no hp and is skipped");
        g.advance_turn().unwrap();
        assert_eq!(g.turn, 3);
        assert_eq!(g.current_player().unwrap().id(), "a");
    }

    #[test]
    fn advance_declares_winner_and_draw() {
        let mut g = Game::from_players(vec![seat("a", &[3]), seat("b", &[0])], 3);
        g.advance_turn().unwrap();
        assert_eq!(g.winner_id(), Some("a"));
        assert_eq!(g.turn, 0, "turn is not moved once the game ends");

        let mut g = Game::from_players(vec![seat("a", &[]), seat("b", &[0])], 3);
        g.advance_turn().unwrap();
        assert!(g.is_draw());
    }

    #[test]
    fn advance_with_several_alive_keeps_playing() {
        let mut g = Game::from_players(vec![seat("a", &[3]), seat("b", &[4]), seat("c", &[1])], 3);
        g.advance_turn().unwrap();
        assert!(g.outcome.is_none());
        assert_eq!(g.current_player().unwrap().id(), "b");
    }

    #[test]
    fn current_player_on_empty_game_is_none() {
        let g = Game::from_players(Vec::new(), 3);
        assert!(g.current_player().is_none());
    }
}
