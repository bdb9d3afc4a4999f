pub mod app;
pub mod ui;

use std::io;

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use planner_core::time::today;
use planner_core::FileDayRecordRepository;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;

use crate::tui::app::{App, InputMode, Screen};

pub fn run(repo: FileDayRecordRepository, selected: NaiveDate) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(repo, today(), selected);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("planner closed");
    res?;
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    while !app.should_quit {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if event::poll(std::time::Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    match app.screen {
        Screen::Calendar => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
            KeyCode::Left | KeyCode::Char('h') => app.move_day(-1),
            KeyCode::Right | KeyCode::Char('l') => app.move_day(1),
            KeyCode::Up | KeyCode::Char('k') => app.move_day(-7),
            KeyCode::Down | KeyCode::Char('j') => app.move_day(7),
            KeyCode::Char('n') | KeyCode::PageDown => app.move_month(1),
            KeyCode::Char('p') | KeyCode::PageUp => app.move_month(-1),
            KeyCode::Char('t') => app.jump_today(),
            KeyCode::Enter | KeyCode::Char(' ') => app.open_selected(),
            _ => {}
        },
        Screen::CorruptPrompt => match key.code {
            KeyCode::Char('r') => app.reset_corrupt(),
            _ => app.cancel_corrupt(),
        },
        Screen::Editor => match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => app.close_editor(),
                KeyCode::Tab => app.next_section(),
                KeyCode::BackTab => app.prev_section(),
                KeyCode::Down | KeyCode::Char('j') => app.next_item(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_item(),
                KeyCode::Left | KeyCode::Char('h') => app.cursor_left(),
                KeyCode::Right | KeyCode::Char('l') => app.cursor_right(),
                KeyCode::Char(' ') | KeyCode::Enter => app.activate(),
                KeyCode::Char('a') => app.start_add(),
                KeyCode::Char('e') => app.start_edit(),
                KeyCode::Char('d') | KeyCode::Delete => app.remove_selected(),
                KeyCode::Char(c @ '1'..='8') => app.select_number(c as u8 - b'0'),
                _ => {}
            },
            InputMode::Adding(_) | InputMode::Editing(..) => match key.code {
                KeyCode::Enter => app.submit_input(),
                KeyCode::Esc => app.cancel_input(),
                KeyCode::Char(c) => app.input.input_char(c),
                KeyCode::Backspace => app.input.delete_char(),
                KeyCode::Left => app.input.move_cursor_left(),
                KeyCode::Right => app.input.move_cursor_right(),
                KeyCode::Home => app.input.move_cursor_home(),
                KeyCode::End => app.input.move_cursor_end(),
                _ => {}
            },
            InputMode::Notes => match key.code {
                KeyCode::Esc => app.stop_notes(),
                KeyCode::Enter => app.notes_push('\n'),
                KeyCode::Char(c) => app.notes_push(c),
                KeyCode::Backspace => app.notes_backspace(),
                _ => {}
            },
        },
    }
}
