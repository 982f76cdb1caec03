use crate::action::{Action, ActionError};
use crate::cards::{Accumulator, Card, FACE};
use crate::engine::GameEngine;
use crate::game::Game;
use crate::history::HistoryEntry;
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use std::time::{Duration, Instant};

use super::{AgentKind, PlayerAgent};

/// Attempts a strategy gets per turn unless it asks for more.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// One player's side of the board as seen by a strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub player_id: String,
    pub accumulators: Vec<Accumulator>,
}

impl BoardView {
    pub fn remaining_hp(&self) -> u32 {
        crate::cards::remaining_hp(&self.accumulators)
    }
}

/// Everything a strategy may look at when choosing a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub board: Vec<BoardView>,
    pub turn: u64,
    pub player_id: String,
    pub player_hand: Vec<Card>,
    pub history: Vec<HistoryEntry>,
}

impl Scenario {
    /// Snapshot `game` from `player_id`'s seat. `None` if the player is not seated.
    pub fn from_game(game: &Game, player_id: &str) -> Option<Self> {
        let me = game.player(player_id)?;
        Some(Self {
            board: game
                .players()
                .iter()
                .map(|p| BoardView {
                    player_id: p.id().to_string(),
                    accumulators: p.accumulators().to_vec(),
                })
                .collect(),
            turn: game.turn(),
            player_id: player_id.to_string(),
            player_hand: me.hand().to_vec(),
            history: game.history().to_vec(),
        })
    }

    pub fn own_board(&self) -> Option<&BoardView> {
        self.board.iter().find(|b| b.player_id == self.player_id)
    }

    /// Boards of every other player still holding HP.
    pub fn opponents(&self) -> impl Iterator<Item = &BoardView> + '_ {
        self.board.iter().filter(|b| b.player_id != self.player_id && b.remaining_hp() > 0)
    }
}

/// A named move-picking policy. Strategies may return illegal moves; the bot
/// runner retries up to `max_attempts` times and then falls back to a discard.
pub trait Strategy {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn max_attempts(&self) -> usize {
        DEFAULT_MAX_ATTEMPTS
    }
    fn choose(&self, scenario: &Scenario, rng: &mut dyn RngCore) -> Action;
}

/// Attacks a random accumulator of a random player with a random card.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAttack;

impl Strategy for RandomAttack {
    fn name(&self) -> &'static str {
        "Random attack"
    }
    fn description(&self) -> &'static str {
        "Completely random, occasionally brilliant, mostly chaos."
    }
    fn max_attempts(&self) -> usize {
        50
    }
    fn choose(&self, scenario: &Scenario, rng: &mut dyn RngCore) -> Action {
        let target = match scenario.board.len() {
            0 => None,
            n => scenario.board.get(rng.random_range(0..n)),
        };
        let (target_id, acc_len) = match target {
            Some(b) => (b.player_id.clone(), b.accumulators.len()),
            None => (String::new(), 0),
        };
        let acc = if acc_len == 0 { 0 } else { rng.random_range(0..acc_len) };
        let hand = random_index(scenario.player_hand.len(), rng);
        Action::attack(target_id, hand, acc)
    }
}

/// Greedy play: good booms, one-hit kills, pressure on the weakest opponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Opportunist;

impl Opportunist {
    fn best_boom(scenario: &Scenario) -> Option<Action> {
        if scenario.player_hand.is_empty() || scenario.player_hand.iter().any(|&c| c != FACE) {
            return None;
        }
        let mut best: Option<(i64, u32)> = None;
        for value in 1..=u32::from(crate::cards::MAX_CARD) {
            let mut score = 0i64;
            for b in &scenario.board {
                let hits = b.accumulators.iter().filter(|a| a.remaining() == value).count() as i64;
                if b.player_id == scenario.player_id {
                    score -= hits;
                } else {
                    score += hits;
                }
            }
            if score > 0 && best.map_or(true, |(s, _)| score > s) {
                best = Some((score, value));
            }
        }
        best.map(|(_, value)| Action::boom(value))
    }

    fn one_hit_kill(scenario: &Scenario) -> Option<Action> {
        let mut best: Option<(Card, Action)> = None;
        for (hand, &card) in scenario.player_hand.iter().enumerate() {
            if card == FACE {
                continue;
            }
            for b in scenario.opponents() {
                for (i, acc) in b.accumulators.iter().enumerate() {
                    let kills = !acc.is_face() && !acc.is_attacked() && acc.original_value() == card;
                    if kills && best.as_ref().map_or(true, |(c, _)| card > *c) {
                        best = Some((card, Action::attack(b.player_id.clone(), hand, i)));
                    }
                }
            }
        }
        best.map(|(_, a)| a)
    }

    fn pressure_weakest(scenario: &Scenario) -> Option<Action> {
        let weakest = scenario.opponents().min_by_key(|b| b.remaining_hp())?;
        let mut best: Option<(Card, u32, Action)> = None;
        for (hand, &card) in scenario.player_hand.iter().enumerate() {
            if card == FACE {
                continue;
            }
            for (i, acc) in weakest.accumulators.iter().enumerate() {
                let remaining = acc.remaining();
                if acc.is_face() || remaining < u32::from(card) {
                    continue;
                }
                let leftover = remaining - u32::from(card);
                let better = match &best {
                    None => true,
                    Some((c, l, _)) => card > *c || (card == *c && leftover < *l),
                };
                if better {
                    best = Some((card, leftover, Action::attack(weakest.player_id.clone(), hand, i)));
                }
            }
        }
        best.map(|(_, _, a)| a)
    }

    fn upgrade_swap(scenario: &Scenario) -> Option<Action> {
        let own = scenario.own_board()?;
        let (acc, low) = own
            .accumulators
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.is_attacked())
            .min_by_key(|(_, a)| a.original_value())?;
        let (hand, &card) = scenario.player_hand.iter().enumerate().max_by_key(|(_, &c)| c)?;
        (card > low.original_value()).then(|| Action::swap(hand, acc))
    }

    fn discard_lowest(scenario: &Scenario) -> Action {
        let hand = scenario
            .player_hand
            .iter()
            .enumerate()
            .filter(|(_, &c)| c != FACE)
            .min_by_key(|(_, &c)| c)
            .map(|(i, _)| i)
            .unwrap_or(0);
        Action::discard(hand)
    }
}

impl Strategy for Opportunist {
    fn name(&self) -> &'static str {
        "Opportunist"
    }
    fn description(&self) -> &'static str {
        "Takes the biggest swing available and goes after whoever is closest to dying."
    }
    fn choose(&self, scenario: &Scenario, _rng: &mut dyn RngCore) -> Action {
        Self::best_boom(scenario)
            .or_else(|| Self::one_hit_kill(scenario))
            .or_else(|| Self::pressure_weakest(scenario))
            .or_else(|| Self::upgrade_swap(scenario))
            .unwrap_or_else(|| Self::discard_lowest(scenario))
    }
}

/// Every built-in strategy, in menu order.
pub fn strategies() -> Vec<Box<dyn Strategy>> {
    vec![Box::new(RandomAttack), Box::new(Opportunist)]
}

pub fn strategy_by_name(name: &str) -> Option<Box<dyn Strategy>> {
    strategies().into_iter().find(|s| s.name() == name)
}

/// Configuration for a bot's strategy and pacing.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct BotProfile {
    pub strategy: String,
    /// Random extra wait on top of the game's AI delay.
    pub jitter_ms: u64,
    pub rng_seed: Option<u64>,
}

impl BotProfile {
    pub fn for_strategy(name: impl Into<String>) -> Self {
        Self { strategy: name.into(), jitter_ms: 0, rng_seed: None }
    }

    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_jitter_ms(mut self, jitter_ms: u64) -> Self {
        self.jitter_ms = jitter_ms;
        self
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self::for_strategy(RandomAttack.name())
    }
}

#[derive(Debug)]
struct BotState {
    rng: StdRng,
}

impl BotState {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(v) => StdRng::seed_from_u64(v),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                StdRng::from_seed(seed)
            }
        };
        Self { rng }
    }
}

/// Drives a player with a [`Strategy`].
///
/// The first time a bot sees its turn it waits `ai_delay_ms` (plus jitter)
/// without acting. Then it asks its strategy for moves until one is accepted
/// or the attempts run out, and finally discards a random card so the game
/// never stalls.
pub struct BotAgent {
    profile: BotProfile,
    strategy: Option<Box<dyn Strategy>>,
    state: BotState,
    next_action_at: Option<Instant>,
}

impl BotAgent {
    pub fn new(profile: BotProfile) -> Self {
        let strategy = strategy_by_name(&profile.strategy);
        if strategy.is_none() {
            log::error!("unknown AI strategy '{}', bot will only discard", profile.strategy);
        }
        let state = BotState::new(profile.rng_seed);
        Self { profile, strategy, state, next_action_at: None }
    }

    pub fn profile(&self) -> &BotProfile {
        &self.profile
    }

    fn fallback(
        &mut self,
        engine: &mut dyn GameEngine,
        player_id: &str,
        hand_len: usize,
    ) -> Result<bool, ActionError> {
        let hand = random_index(hand_len, &mut self.state.rng);
        log::info!("{player_id} falls back to discarding hand card {hand}");
        engine.submit(player_id, &Action::discard(hand)).map(|_| true)
    }
}

impl PlayerAgent for BotAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }
    fn on_turn(
        &mut self,
        engine: &mut dyn GameEngine,
        player_id: &str,
    ) -> Result<bool, ActionError> {
        if engine.is_over() {
            self.next_action_at = None;
            return Ok(false);
        }
        if engine.current_player_id() != Some(player_id) {
            return Ok(false);
        }
        let Some(scenario) = engine.game().and_then(|g| Scenario::from_game(g, player_id)) else {
            return Ok(false);
        };
        let now = Instant::now();
        let base = engine.game().map_or(0, Game::ai_delay_ms);
        let delay = choose_delay_ms(base, &self.profile, &mut self.state);
        if delay > 0 {
            match self.next_action_at {
                None => {
                    self.next_action_at = Some(now + Duration::from_millis(delay));
                    return Ok(false);
                }
                Some(next) if now < next => {
                    return Ok(false);
                }
                Some(_) => {}
            }
        }
        self.next_action_at = None;

        let hand_len = scenario.player_hand.len();
        let Some(strategy) = self.strategy.as_ref() else {
            return self.fallback(engine, player_id, hand_len);
        };
        let attempts = strategy.max_attempts();
        for attempt in 1..=attempts {
            let action = strategy.choose(&scenario, &mut self.state.rng);
            match engine.submit(player_id, &action) {
                Ok(()) => return Ok(true),
                Err(e) => log::debug!("{player_id} attempt {attempt}/{attempts} rejected: {e}"),
            }
        }
        log::warn!("{} found no legal move in {attempts} attempts", strategy.name());
        self.fallback(engine, player_id, hand_len)
    }
}

fn choose_delay_ms(base: u64, profile: &BotProfile, state: &mut BotState) -> u64 {
    if profile.jitter_ms == 0 {
        base
    } else {
        base + state.rng.random_range(0..=profile.jitter_ms)
    }
}

fn random_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> usize {
    if len == 0 {
        0
    } else {
        rng.random_range(0..len)
    }
}
