use crate::cards::{Card, FACE};
use crate::game::{Game, GamePlayer, GameStatus};
use crate::history::Tone;
use crate::player::parse_hex_color;
use crate::tui::app::{AppState, HUMAN_ID};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, columns, inner};

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(6),    // boards
            Constraint::Length(5), // hand
            Constraint::Length(5), // status bar
        ])
        .split(size);

    let Some(game) = app.game() else {
        let para = Paragraph::new("No game in progress: press M for the menu.")
            .block(Block::default().title("boom-rs").borders(Borders::ALL));
        f.render_widget(para, size);
        return;
    };

    let header = Paragraph::new(header_line(app, game))
        .block(Block::default().title("boom-rs").borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    draw_boards(f, chunks[1], app, game);
    draw_hand(f, chunks[2], app);
    draw_status(f, chunks[3], app, game);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app, game);
    } else if app.boom_entry_active() {
        draw_boom_entry(f, app);
    }
}

fn header_line<'a>(app: &'a AppState, game: &'a Game) -> Line<'a> {
    match game.status() {
        GameStatus::Won(id) => Line::from(Span::styled(
            format!("{} wins! Press Space for a new game.", app.display_name(id)),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        GameStatus::Draw => Line::from(Span::styled(
            "Everyone went boom. Draw! Press Space for a new game.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        GameStatus::InProgress => {
            let acting = game.current_player().map(|p| app.display_name(p.id())).unwrap_or("?");
            Line::from(format!(
                "Turn {}   Acting: {}   Alive: {}/{}",
                game.turn(),
                acting,
                game.alive_players().count(),
                game.players().len()
            ))
        }
    }
}

fn player_color(app: &AppState, id: &str) -> Color {
    app.store
        .lobby_player(id)
        .and_then(|p| parse_hex_color(&p.color))
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::White)
}

fn draw_boards(f: &mut Frame, area: Rect, app: &AppState, game: &Game) {
    let total = game.players().len();
    if total == 0 {
        return;
    }
    // Two rows once the table gets crowded.
    let rows = if total > 4 { 2 } else { 1 };
    let per_row = (total + rows - 1) / rows;
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints((0..rows).map(|_| Constraint::Ratio(1, rows as u32)).collect::<Vec<_>>())
        .split(area);
    for (r, row_area) in row_areas.iter().enumerate() {
        let start = r * per_row;
        let end = (start + per_row).min(total);
        if start >= end {
            continue;
        }
        let cols = columns(*row_area, end - start);
        for (c, idx) in (start..end).enumerate() {
            render_board(f, cols[c], app, game, idx);
        }
    }
}

fn render_board(f: &mut Frame, area: Rect, app: &AppState, game: &Game, idx: usize) {
    let p = &game.players()[idx];
    let is_current = game.current_index() == Some(idx) && !game.is_over();
    let is_target = idx == app.target_player;

    let mut title = app.display_name(p.id()).to_string();
    if p.id() == HUMAN_ID {
        title.push_str(" [You]");
    }
    if let Some(label) = app.bot_label(p.id()) {
        title.push_str(&format!(" [BOT:{label}]"));
    }
    if is_current {
        title.push_str(" [Act]");
    }
    let mut block = Block::default()
        .title(Span::styled(title, Style::default().fg(player_color(app, p.id()))))
        .borders(Borders::ALL);
    if !p.is_alive() {
        block = block.border_style(Style::default().fg(Color::DarkGray));
    } else if game.winner_id() == Some(p.id()) {
        block = block.border_style(Style::default().fg(Color::Green));
    } else if is_target && is_current {
        block = block.border_style(Style::default().fg(Color::Magenta));
    } else if is_current {
        block = block.border_style(Style::default().fg(Color::Yellow));
    } else if is_target {
        block = block.border_style(Style::default().fg(Color::Cyan));
    }

    let mut lines: Vec<Line> = Vec::with_capacity(3);
    lines.push(Line::from(format!("HP: {}", p.remaining_hp())));
    lines.push(accumulator_line(p, is_target.then_some(app.target_accumulator)));
    if !p.is_alive() {
        lines.push(Line::from(Span::styled("Eliminated", Style::default().fg(Color::DarkGray))));
    }
    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, area);
}

fn accumulator_line(p: &GamePlayer, cursor: Option<usize>) -> Line<'static> {
    if p.accumulators().is_empty() {
        return Line::from(Span::styled("--", Style::default().add_modifier(Modifier::DIM)));
    }
    let mut spans = Vec::with_capacity(p.accumulators().len() * 2);
    for (i, acc) in p.accumulators().iter().enumerate() {
        let mut style = if acc.is_face() {
            Style::default().fg(Color::DarkGray)
        } else if acc.is_attacked() {
            Style::default().fg(Color::LightRed)
        } else {
            Style::default().fg(Color::LightGreen)
        };
        if cursor == Some(i) {
            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }
        spans.push(Span::styled(format!("[{acc}]"), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn draw_hand(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default().title("Your hand").borders(Borders::ALL);
    let hand_inner = inner(area);
    f.render_widget(block, area);
    let Some(me) = app.human() else {
        f.render_widget(Paragraph::new("Spectating"), hand_inner);
        return;
    };
    let cards = me.hand();
    let slots = columns(hand_inner, cards.len().max(1));
    for (i, &card) in cards.iter().enumerate() {
        let border = if app.selected_card == Some(i) { Some(Color::Yellow) } else { None };
        render_card_widget(f, slots[i], i, card, border);
    }
}

fn render_card_widget(f: &mut Frame, area: Rect, slot: usize, card: Card, border: Option<Color>) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{}", slot + 1))
        .title_alignment(Alignment::Center);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color).add_modifier(Modifier::BOLD));
    }
    let style = if card == FACE {
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let text = if card == FACE { "☺ 0".to_string() } else { card.to_string() };
    let para = Paragraph::new(Line::from(Span::styled(text, style)))
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(para, area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &AppState, game: &Game) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let status_inner = inner(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(status_inner);

    let my_turn = !game.is_over() && game.current_player().map(GamePlayer::id) == Some(HUMAN_ID);
    let mut left_info = Vec::new();
    if game.is_over() {
        left_info.push(Line::from("Game over: press Space to deal again."));
    } else if my_turn {
        let target = game
            .players()
            .get(app.target_player)
            .map(|p| app.display_name(p.id()))
            .unwrap_or("?");
        let card = app
            .selected_card
            .and_then(|i| app.human().and_then(|p| p.hand().get(i)))
            .map(|c| c.to_string())
            .unwrap_or_else(|| "--".to_string());
        left_info.push(Line::from(format!(
            "Your turn. Card: {card}   Target: {target} #{}",
            app.target_accumulator + 1
        )));
    } else {
        left_info.push(Line::from("Waiting for the other players..."));
    }
    if let Some(last) = game.history().last() {
        left_info.push(history_line(app, last));
    }
    if let Some(err) = app.action_error() {
        left_info.push(Line::from(Span::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red),
        )));
    }

    let action_style = if my_turn {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    let right_keys = vec![
        Line::from(Span::styled("A attack • S swap • D discard • B boom", action_style)),
        Line::from("1-9 card • ←/→ player • ↑/↓ slot"),
        Line::from("? help • H history • M menu"),
    ];
    let left_para = Paragraph::new(left_info).wrap(Wrap { trim: true });
    let right_para =
        Paragraph::new(right_keys).wrap(Wrap { trim: true }).alignment(Alignment::Right);
    f.render_widget(left_para, cols[0]);
    f.render_widget(right_para, cols[1]);
}

fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Info => Style::default().fg(Color::Gray),
        Tone::Warning => Style::default().fg(Color::Yellow),
        Tone::Success => Style::default().fg(Color::Green),
        Tone::Error => Style::default().fg(Color::Red),
    }
}

fn history_line(app: &AppState, entry: &crate::history::HistoryEntry) -> Line<'static> {
    let text = entry.describe(|id| app.store.name_of(id));
    Line::from(Span::styled(format!("T{}: {text}", entry.turn), tone_style(entry.tone())))
}

fn draw_history(f: &mut Frame, app: &AppState, game: &Game) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("History").borders(Borders::ALL);
    let mut lines: Vec<Line> = Vec::new();
    let entries = game.history_recent_offset(AppState::HISTORY_PAGE_SIZE, app.history_offset());
    if entries.is_empty() {
        lines.push(Line::from("No history yet."));
    } else {
        for entry in &entries {
            lines.push(history_line(app, entry));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down scroll • Close: H or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Rules:", bold)),
        Line::from("- Attack: hit another player's accumulator with a card no bigger than what is left"),
        Line::from("- Exact hit on an untouched accumulator earns you a new one"),
        Line::from("- Swap: trade a card for one of your untouched accumulators"),
        Line::from("- Boom: with a hand of faces (0), destroy every accumulator at the chosen value"),
        Line::from(""),
        Line::from(Span::styled("Table:", bold)),
        Line::from("- 1-9: select hand card"),
        Line::from("- ← / → or [ / ]: choose player"),
        Line::from("- ↑ / ↓: choose accumulator"),
        Line::from("- A: attack • S: swap • D: discard • B: boom"),
        Line::from("- Space: new game (after game over)"),
        Line::from("- H: history"),
        Line::from(""),
        Line::from(Span::styled("Boom Entry:", bold)),
        Line::from("- 1-9: target value • Enter: submit • Esc: cancel"),
        Line::from(""),
        Line::from(Span::styled("Menu:", bold)),
        Line::from("- M: open / close menu"),
        Line::from("- Up / Down: move selection • + / -: adjust value"),
        Line::from("- Enter: apply • Esc: cancel • Q: quit (menu)"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn draw_boom_entry(f: &mut Frame, app: &AppState) {
    let area = centered_rect(50, 30, f.area());
    let current = app.boom_entry_text().unwrap_or("");
    let lines = vec![
        Line::from(format!("Target value: {current}")),
        Line::from("Every accumulator with exactly this much left is destroyed"),
        Line::from("Digits to edit, Backspace to delete"),
        Line::from("Enter submit, Esc cancel"),
    ];
    let block = Block::default().title("Boom").borders(Borders::ALL);
    let inner_area = inner(area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner_area);
    let para = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, chunks[0]);
    let error = app.boom_entry_error().unwrap_or("");
    let error_line = Line::from(Span::styled(error, Style::default().fg(Color::Red)));
    let error_para = Paragraph::new(error_line).alignment(Alignment::Center);
    f.render_widget(error_para, chunks[1]);
}
