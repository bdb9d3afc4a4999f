use chrono::NaiveDate;
use tracing::{error, info};

use crate::error::PlannerResult;
use crate::model::day_record::{DayRecord, ListKind, NEW_VITAMIN_TEXT};
use crate::repository::DayRecordRepository;

/// Owns the in-memory record of one open day and writes it back through
/// the repository after every change.
pub struct DayEditor<R: DayRecordRepository> {
    repo: R,
    date: NaiveDate,
    record: DayRecord,
}

impl<R: DayRecordRepository> DayEditor<R> {
    pub fn open(repo: R, date: NaiveDate) -> PlannerResult<Self> {
        let record = repo.load(date)?;
        info!(%date, "opened day record");
        Ok(Self { repo, date, record })
    }

    /// Replaces whatever is stored for `date` with the default record.
    pub fn open_fresh(repo: R, date: NaiveDate) -> PlannerResult<Self> {
        let editor = Self {
            repo,
            date,
            record: DayRecord::default(),
        };
        editor.persist()?;
        info!(%date, "reset day record to default");
        Ok(editor)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn record(&self) -> &DayRecord {
        &self.record
    }

    pub fn close(self) -> DayRecord {
        self.record
    }

    fn persist(&self) -> PlannerResult<()> {
        self.repo.save(self.date, &self.record).inspect_err(|e| {
            error!(date = %self.date, error = %e, "failed to save record");
        })
    }

    /// Trims `text` and appends it. Blank input is ignored and nothing is saved.
    pub fn add_item(&mut self, kind: ListKind, text: &str) -> PlannerResult<Option<usize>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let index = self.record.add_item(kind, text, false);
        self.persist()?;
        Ok(Some(index))
    }

    pub fn add_blank_vitamin(&mut self) -> PlannerResult<usize> {
        let index = self.record.add_item(ListKind::Vitamins, NEW_VITAMIN_TEXT, false);
        self.persist()?;
        Ok(index)
    }

    pub fn edit_text(&mut self, kind: ListKind, index: usize, text: &str) -> PlannerResult<()> {
        self.record.edit_text(kind, index, text)?;
        self.persist()
    }

    pub fn toggle_done(&mut self, kind: ListKind, index: usize) -> PlannerResult<bool> {
        let done = self.record.toggle_done(kind, index)?;
        self.persist()?;
        Ok(done)
    }

    pub fn remove_item(&mut self, kind: ListKind, index: usize) -> PlannerResult<()> {
        self.record.remove_item(kind, index)?;
        self.persist()
    }

    pub fn toggle_water(&mut self, index: u8) -> PlannerResult<u8> {
        let water = self.record.toggle_water(index)?;
        self.persist()?;
        Ok(water)
    }

    pub fn select_sleep(&mut self, hours: u8) -> PlannerResult<()> {
        self.record.select_sleep(hours)?;
        self.persist()
    }

    pub fn set_notes(&mut self, notes: &str) -> PlannerResult<()> {
        self.record.set_notes(notes);
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MockRepo {
        records: Rc<RefCell<HashMap<NaiveDate, DayRecord>>>,
        saves: Rc<RefCell<usize>>,
        fail_writes: bool,
    }

    impl DayRecordRepository for MockRepo {
        fn load(&self, date: NaiveDate) -> PlannerResult<DayRecord> {
            Ok(self.records.borrow().get(&date).cloned().unwrap_or_default())
        }

        fn save(&self, date: NaiveDate, record: &DayRecord) -> PlannerResult<()> {
            if self.fail_writes {
                return Err(PlannerError::WriteFailure {
                    date,
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
                });
            }
            *self.saves.borrow_mut() += 1;
            self.records.borrow_mut().insert(date, record.clone());
            Ok(())
        }

        fn list_dates(&self) -> PlannerResult<Vec<NaiveDate>> {
            let mut dates: Vec<_> = self.records.borrow().keys().cloned().collect();
            dates.sort();
            Ok(dates)
        }
    }

    struct CorruptRepo;

    impl DayRecordRepository for CorruptRepo {
        fn load(&self, date: NaiveDate) -> PlannerResult<DayRecord> {
            Err(PlannerError::CorruptRecord { date, reason: "bad".into() })
        }
        fn save(&self, _date: NaiveDate, _record: &DayRecord) -> PlannerResult<()> { Ok(()) }
        fn list_dates(&self) -> PlannerResult<Vec<NaiveDate>> { Ok(vec![]) }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn stored(repo: &MockRepo) -> DayRecord {
        repo.records.borrow().get(&day()).cloned().unwrap()
    }

    #[test]
    fn test_open_does_not_save() {
        let repo = MockRepo::default();
        let editor = DayEditor::open(repo.clone(), day()).unwrap();
        assert_eq!(editor.record(), &DayRecord::default());
        assert_eq!(*repo.saves.borrow(), 0);
    }

    #[test]
    fn test_add_then_remove_persists_empty_list() {
        let repo = MockRepo::default();
        let mut editor = DayEditor::open(repo.clone(), day()).unwrap();

        let index = editor.add_item(ListKind::Checklist, "Buy milk").unwrap().unwrap();
        assert_eq!(stored(&repo).checklist.len(), 1);

        editor.remove_item(ListKind::Checklist, index).unwrap();
        assert!(editor.record().checklist.is_empty());
        assert!(stored(&repo).checklist.is_empty());
        assert_eq!(*repo.saves.borrow(), 2);
    }

    #[test]
    fn test_blank_item_is_ignored() {
        let repo = MockRepo::default();
        let mut editor = DayEditor::open(repo.clone(), day()).unwrap();

        assert_eq!(editor.add_item(ListKind::Checklist, "   ").unwrap(), None);
        assert_eq!(*repo.saves.borrow(), 0);

        editor.add_item(ListKind::Checklist, "  Stretch ").unwrap();
        assert_eq!(editor.record().checklist[0].text, "Stretch");
    }

    #[test]
    fn test_every_mutation_saves() {
        let repo = MockRepo::default();
        let mut editor = DayEditor::open(repo.clone(), day()).unwrap();

        editor.add_blank_vitamin().unwrap();
        editor.edit_text(ListKind::Vitamins, 5, "Zinc").unwrap();
        editor.toggle_done(ListKind::Vitamins, 0).unwrap();
        editor.toggle_water(2).unwrap();
        editor.select_sleep(7).unwrap();
        editor.set_notes("h").unwrap();
        editor.set_notes("hi").unwrap();
        assert_eq!(*repo.saves.borrow(), 7);

        let record = stored(&repo);
        assert_eq!(record.vitamins[5].text, "Zinc");
        assert!(record.vitamins[0].done);
        assert_eq!(record.water, 3);
        assert_eq!(record.sleep, 7);
        assert_eq!(record.notes, "hi");
        assert_eq!(&record, editor.record());
    }

    #[test]
    fn test_water_and_sleep_through_editor() {
        let repo = MockRepo::default();
        let mut editor = DayEditor::open(repo.clone(), day()).unwrap();

        editor.toggle_water(2).unwrap();
        assert_eq!(editor.toggle_water(2).unwrap(), 2);
        assert_eq!(editor.toggle_water(5).unwrap(), 6);

        editor.select_sleep(5).unwrap();
        editor.select_sleep(3).unwrap();
        assert_eq!(stored(&repo).sleep, 3);
    }

    #[test]
    fn test_invalid_edit_does_not_save() {
        let repo = MockRepo::default();
        let mut editor = DayEditor::open(repo.clone(), day()).unwrap();

        assert!(editor.toggle_done(ListKind::Checklist, 0).is_err());
        assert!(editor.select_sleep(0).is_err());
        assert_eq!(*repo.saves.borrow(), 0);
    }

    #[test]
    fn test_write_failure_surfaces_and_keeps_change() {
        let repo = MockRepo { fail_writes: true, ..MockRepo::default() };
        let mut editor = DayEditor::open(repo, day()).unwrap();

        let err = editor.toggle_water(0).unwrap_err();
        assert!(matches!(err, PlannerError::WriteFailure { .. }));
        assert_eq!(editor.record().water, 1);
    }

    #[test]
    fn test_corrupt_record_and_reset() {
        assert!(DayEditor::open(CorruptRepo, day()).err().unwrap().is_corrupt());

        let repo = MockRepo::default();
        repo.records.borrow_mut().insert(day(), DayRecord { water: 4, ..DayRecord::default() });
        let editor = DayEditor::open_fresh(repo.clone(), day()).unwrap();
        assert_eq!(editor.record(), &DayRecord::default());
        assert_eq!(stored(&repo), DayRecord::default());
    }

    #[test]
    fn test_close_returns_record() {
        let repo = MockRepo::default();
        let mut editor = DayEditor::open(repo, day()).unwrap();
        editor.set_notes("done for today").unwrap();
        assert_eq!(editor.close().notes, "done for today");
    }
}
