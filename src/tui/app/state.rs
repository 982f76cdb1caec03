use crate::action::Action;
use crate::agents::{AgentKind, AgentTable};
use crate::engine::{GameEngine, GameStore};
use crate::game::{
    Game, GamePlayer, DEFAULT_AI_DELAY_MS, DEFAULT_HAND_CARDS_COUNT,
    DEFAULT_INITIAL_ACCUMULATORS_COUNT,
};
use std::time::{Duration, Instant};

/// Player id of the local human seat.
pub const HUMAN_ID: &str = "you";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Table,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    HistoryUp,
    HistoryDown,
    NewGame,
    SelectCard(usize),
    TargetNext,
    TargetPrev,
    AccumulatorNext,
    AccumulatorPrev,
    Attack,
    Swap,
    Discard,
    BoomOpen,
    BoomDigit(u8),
    BoomBackspace,
    BoomSubmit,
    BoomCancel,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    pub started: Instant,
    pub store: GameStore,
    pub agents: AgentTable,
    // Selection on the board: a hand card, a player and one of their accumulators
    pub selected_card: Option<usize>,
    pub target_player: usize,
    pub target_accumulator: usize,
    // Menu config being edited
    pub menu_index: usize,
    pub cfg_num_players: usize,
    pub cfg_hand_cards: usize,
    pub cfg_accumulators: usize,
    pub cfg_bot_strategy: usize,
    pub cfg_bot_delay_ms: u64,
    pub cfg_bot_jitter_ms: u64,
    help_open: bool,
    history_open: bool,
    history_offset: usize,
    boom_entry: Option<String>,
    boom_entry_error: Option<String>,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
}

impl Default for AppState {
    fn default() -> Self {
        let mut app = Self {
            scene: Scene::Menu,
            started: Instant::now(),
            store: GameStore::new(),
            agents: AgentTable::new(),
            selected_card: None,
            target_player: 0,
            target_accumulator: 0,
            menu_index: 0,
            cfg_num_players: 3,
            cfg_hand_cards: DEFAULT_HAND_CARDS_COUNT,
            cfg_accumulators: DEFAULT_INITIAL_ACCUMULATORS_COUNT,
            cfg_bot_strategy: 0,
            cfg_bot_delay_ms: DEFAULT_AI_DELAY_MS,
            cfg_bot_jitter_ms: 0,
            help_open: false,
            history_open: false,
            history_offset: 0,
            boom_entry: None,
            boom_entry_error: None,
            action_error: None,
            action_error_at: None,
        };
        app.start_new_game();
        app
    }
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(3);

    /// The game on the table, if one is running.
    pub fn game(&self) -> Option<&Game> {
        self.store.game()
    }

    /// The local player's seat, if seated in the current game.
    pub fn human(&self) -> Option<&GamePlayer> {
        self.game().and_then(|g| g.player(HUMAN_ID))
    }

    fn can_act(&self) -> bool {
        self.scene == Scene::Table
            && !self.store.is_over()
            && self.store.current_player_id() == Some(HUMAN_ID)
    }

    fn queue_action(&mut self, action: Action) -> bool {
        if !self.can_act() {
            return false;
        }
        self.clear_action_error();
        self.agents.receive(HUMAN_ID, action)
    }

    pub(crate) fn set_action_error(&mut self, msg: impl Into<String>) {
        self.action_error = Some(msg.into());
        self.action_error_at = Some(Instant::now());
    }

    fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    pub fn boom_entry_active(&self) -> bool {
        self.boom_entry.is_some()
    }

    pub fn boom_entry_text(&self) -> Option<&str> {
        self.boom_entry.as_deref()
    }

    pub fn boom_entry_error(&self) -> Option<&str> {
        self.boom_entry_error.as_deref()
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub(crate) fn close_help(&mut self) {
        self.help_open = false;
    }

    pub(crate) fn close_history(&mut self) {
        self.history_open = false;
    }

    /// Strategy label for a bot-controlled player.
    pub fn bot_label(&self, player_id: &str) -> Option<&str> {
        if self.agents.agent_kind(player_id) != Some(AgentKind::Bot) {
            return None;
        }
        self.store.lobby_player(player_id).and_then(|p| p.ai_strategy.as_deref())
    }

    /// Display name for a player id, falling back to the id itself.
    pub fn display_name<'a>(&'a self, player_id: &'a str) -> &'a str {
        self.store.name_of(player_id).unwrap_or(player_id)
    }

    fn selected_card_index(&mut self) -> Option<usize> {
        if self.selected_card.is_none() {
            self.set_action_error("Select a hand card first (1-9)");
        }
        self.selected_card
    }

    fn target(&self) -> Option<&GamePlayer> {
        self.game().and_then(|g| g.players().get(self.target_player))
    }

    fn select_card(&mut self, index: usize) {
        let len = self.human().map_or(0, |p| p.hand().len());
        if index >= len {
            return;
        }
        self.selected_card = if self.selected_card == Some(index) { None } else { Some(index) };
    }

    fn cycle_target(&mut self, forward: bool) {
        let n = self.game().map_or(0, |g| g.players().len());
        if n == 0 {
            return;
        }
        self.target_player = if forward {
            (self.target_player + 1) % n
        } else {
            (self.target_player + n - 1) % n
        };
        self.target_accumulator = 0;
    }

    fn cycle_accumulator(&mut self, forward: bool) {
        let n = self.target().map_or(0, |p| p.accumulators().len());
        if n == 0 {
            self.target_accumulator = 0;
            return;
        }
        self.target_accumulator = if forward {
            (self.target_accumulator + 1) % n
        } else {
            (self.target_accumulator + n - 1) % n
        };
    }

    fn attack(&mut self) -> bool {
        let Some(card) = self.selected_card_index() else {
            return false;
        };
        let Some(target_id) = self.target().map(|p| p.id().to_string()) else {
            return false;
        };
        self.queue_action(Action::attack(target_id, card, self.target_accumulator))
    }

    fn swap(&mut self) -> bool {
        let Some(card) = self.selected_card_index() else {
            return false;
        };
        if self.target().map(GamePlayer::id) != Some(HUMAN_ID) {
            self.set_action_error("Swap works on your own accumulators");
            return false;
        }
        self.queue_action(Action::swap(card, self.target_accumulator))
    }

    fn discard(&mut self) -> bool {
        let Some(card) = self.selected_card_index() else {
            return false;
        };
        self.queue_action(Action::discard(card))
    }

    fn open_boom_entry(&mut self) -> bool {
        if !self.can_act() {
            return false;
        }
        self.boom_entry = Some(String::new());
        self.boom_entry_error = None;
        true
    }

    fn boom_entry_push_digit(&mut self, digit: u8) {
        if let Some(buf) = self.boom_entry.as_mut() {
            if !buf.is_empty() {
                return;
            }
            buf.push(char::from(b'0' + digit));
        }
        self.boom_entry_error = None;
    }

    fn boom_entry_backspace(&mut self) {
        if let Some(buf) = self.boom_entry.as_mut() {
            buf.pop();
        }
        self.boom_entry_error = None;
    }

    fn boom_entry_submit(&mut self) -> bool {
        let Some(buf) = self.boom_entry.as_ref() else {
            return false;
        };
        let value = match buf.parse::<u32>() {
            Ok(v) if v > 0 => v,
            _ => {
                self.boom_entry_error = Some("Enter a value from 1 to 9".to_string());
                return false;
            }
        };
        if self.queue_action(Action::boom(value)) {
            self.boom_entry = None;
            self.boom_entry_error = None;
            return true;
        }
        self.boom_entry_error = Some("Action not allowed".to_string());
        false
    }

    fn boom_entry_cancel(&mut self) {
        self.boom_entry = None;
        self.boom_entry_error = None;
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    self.history_open = false;
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Table {
                    self.help_open = false;
                    if !self.history_open {
                        self.history_offset = 0;
                    }
                    self.history_open = !self.history_open;
                }
                false
            }
            InputAction::HistoryUp => {
                if self.scene == Scene::Table && self.history_open {
                    let len = self.game().map_or(0, Game::history_len);
                    let max_offset = len.saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.scene == Scene::Table && self.history_open && self.history_offset > 0 {
                    self.history_offset -= 1;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    self.apply_menu();
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::NewGame => {
                if self.scene == Scene::Table {
                    self.new_game();
                }
                false
            }
            InputAction::SelectCard(i) => {
                if self.scene == Scene::Table {
                    self.select_card(i);
                }
                false
            }
            InputAction::TargetNext => {
                self.cycle_target(true);
                false
            }
            InputAction::TargetPrev => {
                self.cycle_target(false);
                false
            }
            InputAction::AccumulatorNext => {
                self.cycle_accumulator(true);
                false
            }
            InputAction::AccumulatorPrev => {
                self.cycle_accumulator(false);
                false
            }
            InputAction::Attack => self.attack(),
            InputAction::Swap => self.swap(),
            InputAction::Discard => self.discard(),
            InputAction::BoomOpen => self.open_boom_entry(),
            InputAction::BoomDigit(d) => {
                self.boom_entry_push_digit(d);
                false
            }
            InputAction::BoomBackspace => {
                self.boom_entry_backspace();
                false
            }
            InputAction::BoomSubmit => self.boom_entry_submit(),
            InputAction::BoomCancel => {
                self.boom_entry_cancel();
                false
            }
        }
    }

    /// Deal again once the current game is over.
    pub fn new_game(&mut self) {
        if self.game().is_some_and(|g| !g.is_over()) {
            return;
        }
        self.store.finish_game();
        self.start_new_game();
    }

    /// Clear card, target and popup state, e.g. after a new deal.
    pub fn reset_selection(&mut self) {
        self.selected_card = None;
        self.target_player = 0;
        self.target_accumulator = 0;
        self.history_offset = 0;
        self.boom_entry = None;
        self.boom_entry_error = None;
    }

    pub fn agents_on_turn(&mut self) {
        if self.scene != Scene::Table || self.game().is_none() {
            return;
        }
        if let Some(at) = self.action_error_at {
            if at.elapsed() >= Self::ACTION_ERROR_TTL {
                self.clear_action_error();
            }
        }
        let actor = self.store.current_player_id().map(str::to_owned);
        match self.agents.on_turn(&mut self.store) {
            Ok(true) => {
                self.clear_action_error();
                if actor.as_deref() == Some(HUMAN_ID) {
                    self.selected_card = None;
                }
                self.cycle_accumulator_into_range();
            }
            Ok(false) => {}
            Err(err) => self.set_action_error(err.to_string()),
        }
    }

    // Accumulators disappear as they are destroyed; keep the cursor on the board.
    fn cycle_accumulator_into_range(&mut self) {
        let n = self.target().map_or(0, |p| p.accumulators().len());
        if self.target_accumulator >= n {
            self.target_accumulator = n.saturating_sub(1);
        }
    }
}
