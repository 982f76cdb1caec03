use crate::tui::app::{AppState, InputAction, Scene};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key.code) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.agents_on_turn();
            last_tick = Instant::now();
        }
    }
    Ok(())
}

/// Apply a queued human action right away instead of waiting for the next tick.
fn act(app: &mut AppState, action: InputAction) {
    if app.handle_input(action) {
        app.agents_on_turn();
    }
}

pub fn handle_key(app: &mut AppState, code: KeyCode) -> bool {
    let help_toggle = matches!(code, KeyCode::Char('?'));
    let history_toggle = matches!(code, KeyCode::Char('h') | KeyCode::Char('H'));
    if app.boom_entry_active() {
        match code {
            KeyCode::Esc => {
                let _ = app.handle_input(InputAction::BoomCancel);
            }
            KeyCode::Enter => act(app, InputAction::BoomSubmit),
            KeyCode::Backspace => {
                let _ = app.handle_input(InputAction::BoomBackspace);
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let _ = app.handle_input(InputAction::BoomDigit(c as u8 - b'0'));
            }
            _ => {}
        }
        return false;
    }
    if help_toggle {
        let _ = app.handle_input(InputAction::ToggleHelp);
        return false;
    }
    if history_toggle {
        let _ = app.handle_input(InputAction::ToggleHistory);
        return false;
    }
    if app.help_open() {
        if matches!(code, KeyCode::Esc) {
            let _ = app.handle_input(InputAction::ToggleHelp);
        }
        return false;
    }
    if app.history_open() {
        match code {
            KeyCode::Up => {
                let _ = app.handle_input(InputAction::HistoryUp);
            }
            KeyCode::Down => {
                let _ = app.handle_input(InputAction::HistoryDown);
            }
            KeyCode::Esc => {
                let _ = app.handle_input(InputAction::ToggleHistory);
            }
            _ => {}
        }
        return false;
    }

    match app.scene {
        Scene::Menu => match code {
            KeyCode::Up => {
                let _ = app.handle_input(InputAction::MenuPrev);
            }
            KeyCode::Down => {
                let _ = app.handle_input(InputAction::MenuNext);
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
                let _ = app.handle_input(InputAction::MenuInc);
            }
            KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Left => {
                let _ = app.handle_input(InputAction::MenuDec);
            }
            KeyCode::Enter => {
                let _ = app.handle_input(InputAction::MenuApply);
            }
            KeyCode::Esc => {
                let _ = app.handle_input(InputAction::MenuCancel);
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                let _ = app.handle_input(InputAction::ToggleMenu);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            _ => {}
        },
        Scene::Table => match code {
            KeyCode::Char('m') | KeyCode::Char('M') => {
                let _ = app.handle_input(InputAction::ToggleMenu);
            }
            KeyCode::Char(' ') => {
                let _ = app.handle_input(InputAction::NewGame);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let idx = (c as u8 - b'1') as usize;
                let _ = app.handle_input(InputAction::SelectCard(idx));
            }
            KeyCode::Right | KeyCode::Char(']') => {
                let _ = app.handle_input(InputAction::TargetNext);
            }
            KeyCode::Left | KeyCode::Char('[') => {
                let _ = app.handle_input(InputAction::TargetPrev);
            }
            KeyCode::Down => {
                let _ = app.handle_input(InputAction::AccumulatorNext);
            }
            KeyCode::Up => {
                let _ = app.handle_input(InputAction::AccumulatorPrev);
            }
            KeyCode::Char('a') | KeyCode::Char('A') => act(app, InputAction::Attack),
            KeyCode::Char('s') | KeyCode::Char('S') => act(app, InputAction::Swap),
            KeyCode::Char('d') | KeyCode::Char('D') => act(app, InputAction::Discard),
            KeyCode::Char('b') | KeyCode::Char('B') => {
                let _ = app.handle_input(InputAction::BoomOpen);
            }
            _ => {}
        },
    }
    false
}
