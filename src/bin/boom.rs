use boom_rs::tui::{app::AppState, controller};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::prelude::*;
use std::io::{self, IsTerminal, Stdout};
use std::str::FromStr;
use std::time::Duration;

/// Log to `logs/<unix-seconds>.log`; the terminal belongs to the TUI.
/// Level comes from `BOOM_LOG` (default `info`). Runs without a logger if the
/// file cannot be created.
fn init_logging() {
    let level = std::env::var("BOOM_LOG")
        .ok()
        .and_then(|v| log::LevelFilter::from_str(&v).ok())
        .unwrap_or(log::LevelFilter::Info);
    if std::fs::create_dir_all("logs").is_err() {
        return;
    }
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let Ok(file) = std::fs::File::create(format!("logs/{time}.log")) else {
        return;
    };
    let _ = simplelog::WriteLogger::init(level, config, file);
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> io::Result<()> {
    if !io::stdout().is_terminal() {
        println!(
            "boom-rs TUI requires a real terminal (TTY).\nRun in Terminal and press q to quit. Version: {}",
            boom_rs::VERSION
        );
        return Ok(());
    }
    init_logging();
    log::info!("boom-rs {} starting", boom_rs::VERSION);
    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(100);
    let mut app = AppState::default();

    let res = controller::run(&mut terminal, &mut app, tick_rate);

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    res
}
