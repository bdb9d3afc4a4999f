use chrono::Datelike;
use planner_core::time::month_weeks;
use planner_core::{CheckItem, DayEntry, DayRecord, MAX_SLEEP_HOURS, WATER_GLASSES};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, InputMode, Screen, Section};

const WEEKDAY_HEADER: &str = " Mo  Tu  We  Th  Fr  Sa  Su ";

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    // Header and Main Content Split
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    let title = match app.screen {
        Screen::Editor => format!("Planner - {}", app.selected.format("%Y-%m-%d")),
        _ => "DAILY PLANNER".to_string(),
    };
    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    match app.screen {
        Screen::Calendar => draw_calendar_screen(f, app, main_chunks[1]),
        Screen::Editor => draw_editor(f, app, main_chunks[1]),
        Screen::CorruptPrompt => {
            draw_calendar_screen(f, app, main_chunks[1]);
            draw_corrupt_prompt(f, app, main_chunks[1]);
        }
    }

    if let Some(status) = &app.status {
        let status_line = Paragraph::new(status.as_str()).style(Style::default().fg(Color::Red));
        f.render_widget(status_line, main_chunks[2]);
    }

    let footer = Paragraph::new(help_text(app))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[3]);
}

fn help_text(app: &App) -> &'static str {
    match (app.screen, app.input_mode) {
        (Screen::Calendar, _) => "arrows/hjkl: Move | n/p: Month | t: Today | Enter: Open | q: Quit",
        (Screen::CorruptPrompt, _) => "r: Reset to default | any key: Cancel",
        (Screen::Editor, InputMode::Normal) => match app.section {
            Section::Checklist | Section::Vitamins => {
                "Tab: Section | j/k: Select | Space: Done | a: Add | e: Edit | d: Delete | Esc: Close"
            }
            Section::Water => "Tab: Section | h/l: Move | Space/1-8: Toggle glass | Esc: Close",
            Section::Sleep => "Tab: Section | h/l: Move | Space/1-8: Select hours | Esc: Close",
            Section::Notes => "Tab: Section | Enter: Write notes | Esc: Close",
        },
        (Screen::Editor, InputMode::Notes) => "Typing saves as you go | Esc: Stop writing",
        (Screen::Editor, _) => "Enter: Save | Esc: Cancel",
    }
}

fn draw_calendar_screen(f: &mut Frame, app: &App, area: Rect) {
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(20)])
        .split(area);

    draw_month(f, app, content_chunks[0]);
    draw_preview(f, app, content_chunks[1]);
}

fn draw_month(f: &mut Frame, app: &App, area: Rect) {
    let (year, month) = (app.selected.year(), app.selected.month());
    let mut lines = vec![
        Line::from(Span::styled(WEEKDAY_HEADER, Style::default().fg(Color::Yellow))),
    ];

    for week in month_weeks(year, month) {
        let spans: Vec<Span> = week
            .iter()
            .map(|cell| {
                let Some(date) = cell else {
                    return Span::raw("    ");
                };
                let entry = app.overview.as_ref().and_then(|o| o.days.get(date));
                let marker = if entry.is_some() { '•' } else { ' ' };
                let mut style = match entry {
                    Some(DayEntry::Corrupt(_)) => Style::default().fg(Color::Red),
                    Some(DayEntry::Unreadable(_)) => Style::default().fg(Color::Magenta),
                    Some(DayEntry::Summary(_)) => Style::default().fg(Color::Green),
                    None => Style::default(),
                };
                if *date == app.today {
                    style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                }
                if *date == app.selected {
                    style = style.bg(Color::Cyan).fg(Color::Black);
                }
                Span::styled(format!(" {:>2}{}", date.day(), marker), style)
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let title = format!(" {} ", app.selected.format("%B %Y"));
    let calendar = Paragraph::new(lines)
        .block(Block::default().title(title).borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(calendar, area);
}

fn draw_preview(f: &mut Frame, app: &App, area: Rect) {
    let label = |s: &'static str| Span::styled(s, Style::default().fg(Color::Blue));
    let mut text = vec![
        Line::from(Span::styled(
            app.selected.format("%A, %d %B %Y").to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    match app.selected_entry() {
        Some(DayEntry::Summary(s)) => {
            text.push(Line::from(vec![
                label("Checklist: "),
                Span::raw(format!("{}/{} done", s.checklist_done, s.checklist_total)),
            ]));
            text.push(Line::from(vec![
                label("Vitamins: "),
                Span::raw(format!("{}/{} taken", s.vitamins_done, s.vitamins_total)),
            ]));
            text.push(Line::from(vec![
                label("Water: "),
                Span::raw(format!("{}/{} glasses", s.water, WATER_GLASSES)),
            ]));
            let sleep = if s.sleep == 0 { "-".to_string() } else { format!("{}h", s.sleep) };
            text.push(Line::from(vec![label("Sleep: "), Span::raw(sleep)]));
            text.push(Line::from(vec![
                label("Notes: "),
                Span::raw(if s.has_notes { "yes" } else { "-" }),
            ]));
            if s.all_done() {
                text.push(Line::from(""));
                text.push(Line::from(Span::styled("All done ✔", Style::default().fg(Color::Green))));
            }
        }
        Some(DayEntry::Corrupt(reason)) => {
            text.push(Line::from(Span::styled("Record is corrupt:", Style::default().fg(Color::Red))));
            text.push(Line::from(reason.as_str()));
        }
        Some(DayEntry::Unreadable(reason)) => {
            text.push(Line::from(Span::styled("Record cannot be read:", Style::default().fg(Color::Magenta))));
            text.push(Line::from(reason.as_str()));
        }
        None => text.push(Line::from(Span::styled(
            "Nothing recorded yet.",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    let preview = Paragraph::new(text)
        .block(Block::default().title(" Day ").borders(Borders::ALL).border_type(BorderType::Rounded))
        .wrap(Wrap { trim: true });
    f.render_widget(preview, area);
}

fn draw_corrupt_prompt(f: &mut Frame, app: &App, area: Rect) {
    let popup = centered(area, 60, 7);
    let text = vec![
        Line::from(format!("The record for {} cannot be read:", app.selected.format("%Y-%m-%d"))),
        Line::from(Span::styled(
            app.corrupt_reason.clone().unwrap_or_default(),
            Style::default().fg(Color::Red),
        )),
        Line::from(""),
        Line::from("Press r to replace it with an empty day, any other key to cancel."),
    ];
    let prompt = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(" Corrupt record ").borders(Borders::ALL).border_type(BorderType::Double));
    f.render_widget(Clear, popup);
    f.render_widget(prompt, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn section_block(app: &App, section: Section) -> Block<'static> {
    let focused = app.section == section;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .title(format!(" {} ", section.title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
}

fn draw_editor(f: &mut Frame, app: &App, area: Rect) {
    let Some(record) = app.record() else {
        return;
    };
    let editing = matches!(app.input_mode, InputMode::Adding(_) | InputMode::Editing(..));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),                                          // Checklist
            Constraint::Length(if editing { 3 } else { 0 }),             // Input
            Constraint::Length(3),                                       // Water
            Constraint::Length(record.vitamins.len().min(8) as u16 + 2), // Vitamins
            Constraint::Length(3),                                       // Sleep
            Constraint::Min(4),                                          // Notes
        ])
        .split(area);

    draw_items(f, app, Section::Checklist, &record.checklist, chunks[0]);
    if editing {
        draw_input(f, app, chunks[1]);
    }
    draw_water(f, app, record, chunks[2]);
    draw_items(f, app, Section::Vitamins, &record.vitamins, chunks[3]);
    draw_sleep(f, app, record, chunks[4]);
    draw_notes(f, app, record, chunks[5]);
}

fn draw_items(f: &mut Frame, app: &App, section: Section, items: &[CheckItem], area: Rect) {
    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let (icon, style) = if item.done {
                ("✔ ", Style::default().fg(Color::Green).add_modifier(Modifier::CROSSED_OUT))
            } else {
                ("☐ ", Style::default())
            };
            ListItem::new(Line::from(vec![Span::raw(icon), Span::styled(item.text.clone(), style)]))
        })
        .collect();

    let list = List::new(list_items)
        .block(section_block(app, section))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    let mut state = ListState::default();
    if app.section == section && !items.is_empty() {
        state.select(Some(app.item_cursor));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let title = match app.input_mode {
        InputMode::Adding(_) => " Add new checklist item... ",
        _ => " Edit item ",
    };
    let input = Paragraph::new(app.input.text.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().title(title).borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(input, area);

    let offset = app.input.before_cursor().width() as u16;
    f.set_cursor_position((area.x + 1 + offset, area.y + 1));
}

fn draw_water(f: &mut Frame, app: &App, record: &DayRecord, area: Rect) {
    let focused = app.section == Section::Water;
    let mut spans = Vec::new();
    for i in 0..WATER_GLASSES {
        let filled = i < record.water;
        let mut style = if filled {
            Style::default().fg(Color::LightBlue)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if focused && i == app.water_cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(if filled { " ● " } else { " ○ " }, style));
    }
    spans.push(Span::raw(format!("  {}/{}", record.water, WATER_GLASSES)));

    let water = Paragraph::new(Line::from(spans)).block(section_block(app, Section::Water));
    f.render_widget(water, area);
}

fn draw_sleep(f: &mut Frame, app: &App, record: &DayRecord, area: Rect) {
    let focused = app.section == Section::Sleep;
    let mut spans = Vec::new();
    for hours in 1..=MAX_SLEEP_HOURS {
        let mut style = if hours == record.sleep {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default()
        };
        if focused && hours == app.sleep_cursor {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        }
        spans.push(Span::styled(format!(" {} ", hours), style));
    }

    let sleep = Paragraph::new(Line::from(spans)).block(section_block(app, Section::Sleep));
    f.render_widget(sleep, area);
}

fn draw_notes(f: &mut Frame, app: &App, record: &DayRecord, area: Rect) {
    let writing = app.input_mode == InputMode::Notes;
    let mut lines: Vec<Line> = record.notes.split('\n').map(Line::from).collect();

    if writing {
        if let Some(last) = lines.last_mut() {
            last.push_span(Span::styled("▏", Style::default().fg(Color::Yellow)));
        }
    } else if record.notes.is_empty() {
        lines = vec![Line::from(Span::styled(
            "Write your thoughts...",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let notes = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(section_block(app, Section::Notes));
    f.render_widget(notes, area);
}
