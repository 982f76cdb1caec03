//! Agents: pluggable controllers for the players of a game (bots, humans via a
//! front end).
//!
//! `PlayerAgent` is the small trait every controller implements and
//! `AgentTable` maps player ids to agents and drives whichever one owns the
//! current turn. It lives in the library so front ends stay thin and do not
//! need to implement bot coordination.

use crate::action::{Action, ActionError};
use crate::engine::GameEngine;
use core::fmt;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Kinds of agents attached to players.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
}

/// A controller that can act for a player when it is their turn.
pub trait PlayerAgent {
    /// Called when `player_id` owns the current turn. Implementations may
    /// throttle internally and return `Ok(false)` when they did not act.
    fn on_turn(
        &mut self,
        engine: &mut dyn GameEngine,
        player_id: &str,
    ) -> Result<bool, ActionError>;
    /// The kind of this agent (human, bot, etc.).
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    /// Optionally queue an action chosen elsewhere; default is to ignore it.
    fn receive(&mut self, _action: Action) -> bool {
        false
    }
}

pub mod bots;

pub use bots::{strategies, strategy_by_name, BotAgent, BotProfile, Scenario, Strategy};

/// Plays actions queued by a front end, one per turn.
pub struct HumanAgent {
    pending: Option<Action>,
}

impl HumanAgent {
    pub fn new() -> Self {
        Self { pending: None }
    }
}

impl Default for HumanAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerAgent for HumanAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    fn receive(&mut self, action: Action) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(action);
        true
    }
    fn on_turn(
        &mut self,
        engine: &mut dyn GameEngine,
        player_id: &str,
    ) -> Result<bool, ActionError> {
        if engine.is_over() {
            self.pending = None;
            return Ok(false);
        }
        if engine.current_player_id() != Some(player_id) {
            return Ok(false);
        }
        match self.pending.take() {
            Some(action) => engine.submit(player_id, &action).map(|_| true),
            None => Ok(false),
        }
    }
}

/// Agents keyed by player id. Players without an agent are simply never driven.
pub struct AgentTable {
    agents: HashMap<String, Box<dyn PlayerAgent>>,
    min_action_delay: Duration,
    next_action_at: Option<Instant>,
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<String> = self
            .agents
            .iter()
            .map(|(id, a)| {
                let flag = if a.kind() == AgentKind::Bot { 'B' } else { 'H' };
                format!("{id}:{flag}")
            })
            .collect();
        ids.sort();
        write!(f, "AgentTable({})", ids.join(","))
    }
}

impl Default for AgentTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentTable {
    pub fn new() -> Self {
        Self {
            agents: HashMap::new(),
            min_action_delay: Duration::from_millis(0),
            next_action_at: None,
        }
    }

    /// Assign an agent to a player (or remove it when `None`).
    pub fn set_agent(&mut self, player_id: impl Into<String>, agent: Option<Box<dyn PlayerAgent>>) {
        let player_id = player_id.into();
        match agent {
            Some(agent) => {
                self.agents.insert(player_id, agent);
            }
            None => {
                self.agents.remove(&player_id);
            }
        }
    }

    /// Return the kind of agent controlling a player, if any.
    pub fn agent_kind(&self, player_id: &str) -> Option<AgentKind> {
        self.agents.get(player_id).map(|a| a.kind())
    }

    /// Queue an action for a specific player's agent, if any.
    pub fn receive(&mut self, player_id: &str, action: Action) -> bool {
        match self.agents.get_mut(player_id) {
            Some(agent) => agent.receive(action),
            None => false,
        }
    }

    /// Whether any bot agents are assigned.
    pub fn any_bots(&self) -> bool {
        self.agents.values().any(|a| a.kind() == AgentKind::Bot)
    }

    /// Set a global minimum delay between any two actions at the table.
    pub fn set_min_action_delay_ms(&mut self, delay_ms: u64) {
        self.min_action_delay = Duration::from_millis(delay_ms);
    }

    /// Drive the agent of the current player, if any.
    pub fn on_turn(&mut self, engine: &mut dyn GameEngine) -> Result<bool, ActionError> {
        let Some(player_id) = engine.current_player_id().map(str::to_owned) else {
            return Ok(false);
        };
        let Some(agent) = self.agents.get_mut(&player_id) else {
            return Ok(false);
        };
        let now = Instant::now();
        if agent.kind() == AgentKind::Bot {
            if let Some(next) = self.next_action_at {
                if now < next {
                    return Ok(false);
                }
            }
        }
        let acted = agent.on_turn(engine, &player_id)?;
        if acted && self.min_action_delay > Duration::from_millis(0) {
            self.next_action_at = Some(now + self.min_action_delay);
        }
        Ok(acted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GameStore;
    use crate::game::GameConfig;
    use crate::player::Player;

    fn started(seed: u64) -> GameStore {
        let mut store = GameStore::with_seed(seed);
        let players = vec![Player::new("p1", "Paco"), Player::new("p2", "Quinn")];
        store.start_game(&players, &GameConfig::default()).unwrap();
        store
    }

    #[test]
    fn human_acts_only_on_own_turn() {
        let mut store = started(4);
        let current = store.current_player_id().unwrap().to_string();
        let other = if current == "p1" { "p2" } else { "p1" };

        let mut human = HumanAgent::new();
        assert!(human.receive(Action::discard(0)));
        assert!(!human.receive(Action::discard(1)), "one pending action at a time");
        assert!(!human.on_turn(&mut store, other).unwrap());
        assert!(human.on_turn(&mut store, &current).unwrap());
        assert_eq!(store.current_player_id(), Some(other));
    }

    #[test]
    fn table_ignores_players_without_agents() {
        let mut store = started(5);
        let mut table = AgentTable::new();
        assert!(!table.on_turn(&mut store).unwrap());
        assert!(!table.any_bots());
        assert_eq!(store.game().unwrap().history_len(), 0);
    }

    #[test]
    fn table_routes_to_current_player() {
        let mut store = started(6);
        let current = store.current_player_id().unwrap().to_string();
        let mut table = AgentTable::new();
        table.set_agent(current.clone(), Some(Box::new(HumanAgent::new())));
        assert_eq!(table.agent_kind(&current), Some(AgentKind::Human));
        assert!(table.receive(&current, Action::discard(2)));
        assert!(table.on_turn(&mut store).unwrap());
        assert_eq!(store.game().unwrap().history_len(), 1);
    }
}
