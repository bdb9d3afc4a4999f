use chrono::{Datelike, Duration, NaiveDate};
use planner_core::time::add_months;
use planner_core::{
    DayEditor, DayEntry, DayRecord, FileDayRecordRepository, ListKind, MonthOverview,
    MonthOverviewUseCase, PlannerError, PlannerResult, MAX_SLEEP_HOURS, WATER_GLASSES,
};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Calendar,
    Editor,
    CorruptPrompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Checklist,
    Water,
    Vitamins,
    Sleep,
    Notes,
}

const SECTIONS: [Section; 5] = [
    Section::Checklist,
    Section::Water,
    Section::Vitamins,
    Section::Sleep,
    Section::Notes,
];

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::Checklist => "Checklist",
            Section::Water => "Water Tracker",
            Section::Vitamins => "Multivitamins",
            Section::Sleep => "Hours of Sleep",
            Section::Notes => "Notes",
        }
    }

    fn list_kind(self) -> Option<ListKind> {
        match self {
            Section::Checklist => Some(ListKind::Checklist),
            Section::Vitamins => Some(ListKind::Vitamins),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Adding(ListKind),
    Editing(ListKind, usize),
    Notes,
}

/// Single-line text field with a char-based cursor.
#[derive(Debug, Default)]
pub struct InputLine {
    pub text: String,
    pub cursor_position: usize,
}

impl InputLine {
    pub fn reset(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor_position = text.chars().count();
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.text.chars().take(chars).map(|c| c.len_utf8()).sum()
    }

    /// Text left of the cursor, for placing the terminal cursor.
    pub fn before_cursor(&self) -> &str {
        &self.text[..self.byte_index(self.cursor_position)]
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.byte_index(self.cursor_position);
        self.text.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index = self.byte_index(self.cursor_position - 1);
            self.text.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.text.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.text.chars().count();
    }
}

pub struct App {
    repo: FileDayRecordRepository,
    pub today: NaiveDate,
    pub selected: NaiveDate,
    pub overview: Option<MonthOverview>,
    pub screen: Screen,
    pub editor: Option<DayEditor<FileDayRecordRepository>>,
    pub corrupt_reason: Option<String>,
    pub section: Section,
    pub item_cursor: usize,
    pub water_cursor: u8,
    pub sleep_cursor: u8,
    pub input_mode: InputMode,
    pub input: InputLine,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(repo: FileDayRecordRepository, today: NaiveDate, selected: NaiveDate) -> App {
        let mut app = App {
            repo,
            today,
            selected,
            overview: None,
            screen: Screen::Calendar,
            editor: None,
            corrupt_reason: None,
            section: Section::Checklist,
            item_cursor: 0,
            water_cursor: 0,
            sleep_cursor: 1,
            input_mode: InputMode::Normal,
            input: InputLine::default(),
            status: None,
            should_quit: false,
        };
        app.reload_overview();
        app
    }

    // Calendar

    fn reload_overview(&mut self) {
        let usecase = MonthOverviewUseCase::new(&self.repo);
        match usecase.overview(self.selected.year(), self.selected.month()) {
            Ok(overview) => self.overview = Some(overview),
            Err(e) => {
                warn!(error = %e, "could not build month overview");
                self.overview = None;
                self.status = Some(e.to_string());
            }
        }
    }

    fn select_date(&mut self, date: NaiveDate) {
        let month_changed = (date.year(), date.month()) != (self.selected.year(), self.selected.month());
        self.selected = date;
        if month_changed {
            self.reload_overview();
        }
    }

    pub fn move_day(&mut self, days: i64) {
        self.select_date(self.selected + Duration::days(days));
    }

    pub fn move_month(&mut self, months: i32) {
        self.select_date(add_months(self.selected, months));
    }

    pub fn jump_today(&mut self) {
        self.select_date(self.today);
    }

    pub fn selected_entry(&self) -> Option<&DayEntry> {
        self.overview.as_ref()?.days.get(&self.selected)
    }

    pub fn open_selected(&mut self) {
        match DayEditor::open(self.repo.clone(), self.selected) {
            Ok(editor) => self.enter_editor(editor),
            Err(PlannerError::CorruptRecord { reason, .. }) => {
                self.corrupt_reason = Some(reason);
                self.screen = Screen::CorruptPrompt;
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn enter_editor(&mut self, editor: DayEditor<FileDayRecordRepository>) {
        self.water_cursor = editor.record().water.saturating_sub(1);
        self.sleep_cursor = editor.record().sleep.max(1);
        self.editor = Some(editor);
        self.screen = Screen::Editor;
        self.section = Section::Checklist;
        self.item_cursor = 0;
        self.input_mode = InputMode::Normal;
        self.status = None;
    }

    /// Overwrites the corrupt file with the default record and opens it.
    pub fn reset_corrupt(&mut self) {
        self.corrupt_reason = None;
        match DayEditor::open_fresh(self.repo.clone(), self.selected) {
            Ok(editor) => self.enter_editor(editor),
            Err(e) => {
                self.screen = Screen::Calendar;
                self.status = Some(e.to_string());
            }
        }
    }

    pub fn cancel_corrupt(&mut self) {
        self.corrupt_reason = None;
        self.screen = Screen::Calendar;
        self.status = Some(format!("Left {} untouched", self.selected));
    }

    pub fn close_editor(&mut self) {
        if let Some(editor) = self.editor.take() {
            let date = editor.date();
            let record = editor.close();
            debug!(%date, water = record.water, sleep = record.sleep, "closed day editor");
        }
        self.input_mode = InputMode::Normal;
        self.screen = Screen::Calendar;
        self.reload_overview();
    }

    // Editor

    pub fn record(&self) -> Option<&DayRecord> {
        self.editor.as_ref().map(|e| e.record())
    }

    fn apply<T>(
        &mut self,
        op: impl FnOnce(&mut DayEditor<FileDayRecordRepository>) -> PlannerResult<T>,
    ) -> Option<T> {
        let editor = self.editor.as_mut()?;
        match op(editor) {
            Ok(value) => {
                self.status = None;
                Some(value)
            }
            Err(e) => {
                self.status = Some(e.to_string());
                None
            }
        }
    }

    fn list_len(&self) -> usize {
        match (self.section.list_kind(), self.record()) {
            (Some(kind), Some(record)) => record.list(kind).len(),
            _ => 0,
        }
    }

    fn clamp_item_cursor(&mut self) {
        let len = self.list_len();
        if self.item_cursor >= len {
            self.item_cursor = len.saturating_sub(1);
        }
    }

    fn focus(&mut self, section: Section) {
        self.section = section;
        self.item_cursor = 0;
    }

    pub fn next_section(&mut self) {
        let pos = SECTIONS.iter().position(|s| *s == self.section).unwrap_or(0);
        self.focus(SECTIONS[(pos + 1) % SECTIONS.len()]);
    }

    pub fn prev_section(&mut self) {
        let pos = SECTIONS.iter().position(|s| *s == self.section).unwrap_or(0);
        self.focus(SECTIONS[(pos + SECTIONS.len() - 1) % SECTIONS.len()]);
    }

    pub fn next_item(&mut self) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        self.item_cursor = if self.item_cursor >= len - 1 { 0 } else { self.item_cursor + 1 };
    }

    pub fn previous_item(&mut self) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        self.item_cursor = if self.item_cursor == 0 { len - 1 } else { self.item_cursor - 1 };
    }

    pub fn cursor_left(&mut self) {
        match self.section {
            Section::Water => self.water_cursor = self.water_cursor.saturating_sub(1),
            Section::Sleep => self.sleep_cursor = (self.sleep_cursor - 1).max(1),
            _ => {}
        }
    }

    pub fn cursor_right(&mut self) {
        match self.section {
            Section::Water => self.water_cursor = (self.water_cursor + 1).min(WATER_GLASSES - 1),
            Section::Sleep => self.sleep_cursor = (self.sleep_cursor + 1).min(MAX_SLEEP_HOURS),
            _ => {}
        }
    }

    /// Space/Enter on the focused section.
    pub fn activate(&mut self) {
        match self.section {
            Section::Checklist | Section::Vitamins => {
                if let Some(kind) = self.section.list_kind() {
                    let index = self.item_cursor;
                    if index < self.list_len() {
                        self.apply(|e| e.toggle_done(kind, index));
                    }
                }
            }
            Section::Water => {
                let index = self.water_cursor;
                self.apply(|e| e.toggle_water(index));
            }
            Section::Sleep => {
                let hours = self.sleep_cursor;
                self.apply(|e| e.select_sleep(hours));
            }
            Section::Notes => self.input_mode = InputMode::Notes,
        }
    }

    /// Digit keys 1-8 act on the glass or hour with that number.
    pub fn select_number(&mut self, n: u8) {
        if n == 0 {
            return;
        }
        match self.section {
            Section::Water if n <= WATER_GLASSES => {
                self.water_cursor = n - 1;
                self.apply(|e| e.toggle_water(n - 1));
            }
            Section::Sleep if n <= MAX_SLEEP_HOURS => {
                self.sleep_cursor = n;
                self.apply(|e| e.select_sleep(n));
            }
            _ => {}
        }
    }

    pub fn start_add(&mut self) {
        match self.section {
            Section::Checklist => {
                self.input.reset("");
                self.input_mode = InputMode::Adding(ListKind::Checklist);
            }
            Section::Vitamins => {
                if let Some(index) = self.apply(|e| e.add_blank_vitamin()) {
                    self.item_cursor = index;
                    self.start_edit();
                }
            }
            _ => {}
        }
    }

    pub fn start_edit(&mut self) {
        let Some(kind) = self.section.list_kind() else {
            return;
        };
        let index = self.item_cursor;
        let text = match self.record().and_then(|r| r.list(kind).get(index)) {
            Some(item) => item.text.clone(),
            None => return,
        };
        self.input.reset(&text);
        self.input_mode = InputMode::Editing(kind, index);
    }

    pub fn remove_selected(&mut self) {
        let Some(kind) = self.section.list_kind() else {
            return;
        };
        let index = self.item_cursor;
        if index < self.list_len() {
            self.apply(|e| e.remove_item(kind, index));
            self.clamp_item_cursor();
        }
    }

    pub fn submit_input(&mut self) {
        let text = std::mem::take(&mut self.input.text);
        match self.input_mode {
            InputMode::Adding(kind) => {
                if let Some(Some(index)) = self.apply(|e| e.add_item(kind, &text)) {
                    self.item_cursor = index;
                }
            }
            InputMode::Editing(kind, index) => {
                self.apply(|e| e.edit_text(kind, index, &text));
            }
            InputMode::Normal | InputMode::Notes => {}
        }
        self.input.reset("");
        self.input_mode = InputMode::Normal;
    }

    pub fn cancel_input(&mut self) {
        self.input.reset("");
        self.input_mode = InputMode::Normal;
    }

    pub fn notes_push(&mut self, c: char) {
        let Some(mut notes) = self.record().map(|r| r.notes.clone()) else {
            return;
        };
        notes.push(c);
        self.apply(|e| e.set_notes(&notes));
    }

    pub fn notes_backspace(&mut self) {
        let Some(mut notes) = self.record().map(|r| r.notes.clone()) else {
            return;
        };
        if notes.pop().is_some() {
            self.apply(|e| e.set_notes(&notes));
        }
    }

    pub fn stop_notes(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}
