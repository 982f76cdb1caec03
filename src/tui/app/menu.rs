use crate::agents::{strategies, AgentTable, BotAgent, BotProfile, HumanAgent};
use crate::game::GameConfig;
use crate::player::{Player, PREDEFINED_COLORS};

use super::{AppState, HUMAN_ID};

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    Players,
    HandCards,
    Accumulators,
    BotStrategy,
    BotDelayMs,
    BotJitterMs,
}

const MENU_ITEMS: [MenuItem; 6] = [
    MenuItem::Players,
    MenuItem::HandCards,
    MenuItem::Accumulators,
    MenuItem::BotStrategy,
    MenuItem::BotDelayMs,
    MenuItem::BotJitterMs,
];

const PLAYERS_RANGE: (usize, usize) = (2, 8);
const HAND_CARDS_RANGE: (usize, usize) = (1, 5);
const ACCUMULATORS_RANGE: (usize, usize) = (1, 6);

fn strategy_names() -> Vec<&'static str> {
    strategies().iter().map(|s| s.name()).collect()
}

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::Players => format!("Players: {}", app.cfg_num_players),
            MenuItem::HandCards => format!("Cards in hand: {}", app.cfg_hand_cards),
            MenuItem::Accumulators => format!("Starting accumulators: {}", app.cfg_accumulators),
            MenuItem::BotStrategy => format!("Bot strategy: {}", app.bot_strategy_name()),
            MenuItem::BotDelayMs => format!("Bot delay (ms): {}", app.cfg_bot_delay_ms),
            MenuItem::BotJitterMs => format!("Bot jitter (ms): {}", app.cfg_bot_jitter_ms),
        }
    }

    fn inc(self, app: &mut AppState) {
        match self {
            MenuItem::Players => {
                app.cfg_num_players = (app.cfg_num_players + 1).min(PLAYERS_RANGE.1);
            }
            MenuItem::HandCards => {
                app.cfg_hand_cards = (app.cfg_hand_cards + 1).min(HAND_CARDS_RANGE.1);
            }
            MenuItem::Accumulators => {
                app.cfg_accumulators = (app.cfg_accumulators + 1).min(ACCUMULATORS_RANGE.1);
            }
            MenuItem::BotStrategy => {
                let n = strategy_names().len().max(1);
                app.cfg_bot_strategy = (app.cfg_bot_strategy + 1) % n;
            }
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_add(100);
            }
            MenuItem::BotJitterMs => {
                app.cfg_bot_jitter_ms = app.cfg_bot_jitter_ms.saturating_add(100);
            }
        }
    }

    fn dec(self, app: &mut AppState) {
        match self {
            MenuItem::Players => {
                app.cfg_num_players = app.cfg_num_players.saturating_sub(1).max(PLAYERS_RANGE.0);
            }
            MenuItem::HandCards => {
                app.cfg_hand_cards = app.cfg_hand_cards.saturating_sub(1).max(HAND_CARDS_RANGE.0);
            }
            MenuItem::Accumulators => {
                app.cfg_accumulators =
                    app.cfg_accumulators.saturating_sub(1).max(ACCUMULATORS_RANGE.0);
            }
            MenuItem::BotStrategy => {
                let n = strategy_names().len().max(1);
                app.cfg_bot_strategy = (app.cfg_bot_strategy + n - 1) % n;
            }
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_sub(100);
            }
            MenuItem::BotJitterMs => {
                app.cfg_bot_jitter_ms = app.cfg_bot_jitter_ms.saturating_sub(100);
            }
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn bot_strategy_name(&self) -> &'static str {
        let names = strategy_names();
        names.get(self.cfg_bot_strategy).copied().unwrap_or("Random attack")
    }

    pub fn toggle_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.scene = match self.scene {
            super::Scene::Menu => super::Scene::Table,
            _ => {
                self.open_menu();
                super::Scene::Menu
            }
        };
    }

    // --- Menu operations ---
    pub fn open_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.menu_index = 0;
        self.scene = super::Scene::Menu;
    }

    pub fn apply_menu(&mut self) {
        self.cfg_num_players = self.cfg_num_players.clamp(PLAYERS_RANGE.0, PLAYERS_RANGE.1);
        self.cfg_hand_cards = self.cfg_hand_cards.clamp(HAND_CARDS_RANGE.0, HAND_CARDS_RANGE.1);
        self.cfg_accumulators =
            self.cfg_accumulators.clamp(ACCUMULATORS_RANGE.0, ACCUMULATORS_RANGE.1);
        self.store.finish_game();
        self.start_new_game();
        self.scene = super::Scene::Table;
    }

    pub fn cancel_menu(&mut self) {
        self.scene = super::Scene::Table;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }

    pub(crate) fn game_config(&self) -> GameConfig {
        GameConfig::default()
            .with_hand_cards_count(self.cfg_hand_cards)
            .with_initial_accumulators_count(self.cfg_accumulators)
            .with_ai_delay_ms(self.cfg_bot_delay_ms)
    }

    /// The local human plus `cfg_num_players - 1` bots with random names.
    pub(crate) fn build_roster(&self) -> Vec<Player> {
        let mut rng = rand::rng();
        let strategy = self.bot_strategy_name();
        let mut roster = Vec::with_capacity(self.cfg_num_players);
        roster.push(Player::new(HUMAN_ID, "You").with_color(PREDEFINED_COLORS[0]).with_owner("local"));
        for i in 1..self.cfg_num_players {
            let bot = Player::random(format!("bot{i}"), &mut rng).with_ai(strategy).with_owner("local");
            roster.push(bot);
        }
        roster
    }

    /// Seat a fresh roster, deal, and wire up agents.
    pub(crate) fn start_new_game(&mut self) {
        let roster = self.build_roster();
        if let Err(err) = self.store.start_game(&roster, &self.game_config()) {
            log::error!("could not start a game: {err}");
            self.set_action_error(err.to_string());
            return;
        }
        self.agents = AgentTable::new();
        self.agents.set_min_action_delay_ms(150);
        for p in &roster {
            match &p.ai_strategy {
                Some(name) => {
                    let profile = BotProfile::for_strategy(name.clone())
                        .with_jitter_ms(self.cfg_bot_jitter_ms);
                    self.agents.set_agent(p.id.clone(), Some(Box::new(BotAgent::new(profile))));
                }
                None => self.agents.set_agent(p.id.clone(), Some(Box::new(HumanAgent::new()))),
            }
        }
        self.reset_selection();
    }
}
