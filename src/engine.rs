// Game engine API boundary. The trait exposes the operations a front end or a
// bot needs to drive a game without depending on how the state is stored. It
// is implemented by `GameStore`, the single writer that owns the current game.

use crate::action::{Action, ActionError};
use crate::game::{Game, GameConfig, GamePlayer, SetupError};
use crate::player::Player;
use crate::rules;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub trait GameEngine {
    // Queries
    fn game(&self) -> Option<&Game>;
    fn current_player_id(&self) -> Option<&str> {
        self.game().and_then(Game::current_player).map(GamePlayer::id)
    }
    fn is_over(&self) -> bool {
        self.game().is_some_and(Game::is_over)
    }

    // Actions
    fn submit(&mut self, player_id: &str, action: &Action) -> Result<(), ActionError>;
}

/// Holds the current game, if any, and serializes every change to it.
///
/// Actions are applied one at a time against the stored state; a rejected
/// action leaves the store exactly as it was.
#[derive(Debug, Clone)]
pub struct GameStore {
    game: Option<Game>,
    roster: Vec<Player>,
    rng: ChaCha8Rng,
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStore {
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// A store whose deals and draws are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self { game: None, roster: Vec::new(), rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Deal a new game, replacing any game in progress.
    pub fn start_game(
        &mut self,
        players: &[Player],
        config: &GameConfig,
    ) -> Result<&Game, SetupError> {
        let game = Game::create(players, config, &mut self.rng)?;
        log::info!(
            "new game: {} players, {} cards in hand, {} accumulators",
            players.len(),
            config.hand_cards_count,
            config.initial_accumulators_count
        );
        self.roster = players.to_vec();
        Ok(self.game.insert(game))
    }

    /// Adopt a game received from elsewhere, e.g. a deserialized snapshot.
    pub fn load(&mut self, game: Game, roster: Vec<Player>) {
        self.game = Some(game);
        self.roster = roster;
    }

    /// Apply an action to the stored game and return the new state.
    pub fn attempt_action(
        &mut self,
        player_id: &str,
        action: &Action,
    ) -> Result<&Game, ActionError> {
        let next = rules::attempt_action(self.game.as_ref(), player_id, action, &mut self.rng)?;
        Ok(self.game.insert(next))
    }

    /// Like [`attempt_action`](Self::attempt_action) but only reports whether
    /// the action was accepted. The stored game is the current state either way.
    pub fn try_action(&mut self, player_id: &str, action: &Action) -> bool {
        self.attempt_action(player_id, action).is_ok()
    }

    /// Drop the current game.
    pub fn finish_game(&mut self) {
        if self.game.take().is_some() {
            log::info!("game finished");
        }
    }

    pub fn current_player(&self) -> Option<&GamePlayer> {
        self.game.as_ref().and_then(Game::current_player)
    }

    /// Lobby records for the players of the current game.
    pub fn roster(&self) -> &[Player] {
        &self.roster
    }

    /// Display name for a player id, if it is in the roster.
    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.roster.iter().find(|p| p.id == id).map(|p| p.name.as_str())
    }

    pub fn lobby_player(&self, id: &str) -> Option<&Player> {
        self.roster.iter().find(|p| p.id == id)
    }
}

impl GameEngine for GameStore {
    fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    fn submit(&mut self, player_id: &str, action: &Action) -> Result<(), ActionError> {
        self.attempt_action(player_id, action).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lobby() -> Vec<Player> {
        vec![Player::new("p1", "Paco"), Player::new("p2", "Quinn")]
    }

    #[test]
    fn no_game_rejects_actions() {
        let mut store = GameStore::with_seed(1);
        assert_eq!(store.attempt_action("p1", &Action::discard(0)), Err(ActionError::NoActiveGame));
        assert!(!store.try_action("p1", &Action::discard(0)));
        assert!(store.current_player_id().is_none());
    }

    #[test]
    fn discard_by_current_player_advances() {
        let mut store = GameStore::with_seed(2);
        store.start_game(&lobby(), &GameConfig::default()).unwrap();
        let first = store.current_player_id().unwrap().to_string();
        assert!(store.try_action(&first, &Action::discard(0)));
        assert_ne!(store.current_player_id().unwrap(), first);
        assert_eq!(store.game().unwrap().history_len(), 1);
        assert_eq!(store.name_of("p2"), Some("Quinn"));
    }

    #[test]
    fn finish_resets_store() {
        let mut store = GameStore::with_seed(3);
        store.start_game(&lobby(), &GameConfig::default()).unwrap();
        store.finish_game();
        assert!(store.game().is_none());
        assert!(!store.is_over());
    }
}
