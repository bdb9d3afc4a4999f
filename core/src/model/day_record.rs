use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};
use crate::model::summary::DaySummary;

pub const WATER_GLASSES: u8 = 8;
pub const MAX_SLEEP_HOURS: u8 = 8;
pub const NEW_VITAMIN_TEXT: &str = "New Vitamin";

const DEFAULT_VITAMINS: [&str; 5] = [
    "Vitamin B",
    "Vitamin C",
    "Iron",
    "Omega 3 Fatty Acid",
    "Biotin",
];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CheckItem {
    pub text: String,
    pub done: bool,
}

impl CheckItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }
}

/// Which item list of a record an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Checklist,
    Vitamins,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::Checklist => write!(f, "Checklist"),
            ListKind::Vitamins => write!(f, "Vitamins"),
        }
    }
}

/// Everything tracked for a single calendar date.
///
/// Field order here is the field order on disk. Only `notes` may be absent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DayRecord {
    pub checklist: Vec<CheckItem>,
    pub water: u8,
    pub vitamins: Vec<CheckItem>,
    pub sleep: u8,
    #[serde(default)]
    pub notes: String,
}

impl Default for DayRecord {
    fn default() -> Self {
        Self {
            checklist: Vec::new(),
            water: 0,
            vitamins: DEFAULT_VITAMINS.iter().map(|v| CheckItem::new(*v)).collect(),
            sleep: 0,
            notes: String::new(),
        }
    }
}

impl DayRecord {
    pub fn list(&self, kind: ListKind) -> &[CheckItem] {
        match kind {
            ListKind::Checklist => &self.checklist,
            ListKind::Vitamins => &self.vitamins,
        }
    }

    fn list_mut(&mut self, kind: ListKind) -> &mut Vec<CheckItem> {
        match kind {
            ListKind::Checklist => &mut self.checklist,
            ListKind::Vitamins => &mut self.vitamins,
        }
    }

    fn item_mut(&mut self, kind: ListKind, index: usize) -> PlannerResult<&mut CheckItem> {
        self.list_mut(kind)
            .get_mut(index)
            .ok_or(PlannerError::ItemNotFound { kind, index })
    }

    /// Appends an item and returns its position.
    pub fn add_item(&mut self, kind: ListKind, text: impl Into<String>, done: bool) -> usize {
        let list = self.list_mut(kind);
        list.push(CheckItem {
            text: text.into(),
            done,
        });
        list.len() - 1
    }

    pub fn edit_text(&mut self, kind: ListKind, index: usize, text: impl Into<String>) -> PlannerResult<()> {
        self.item_mut(kind, index)?.text = text.into();
        Ok(())
    }

    /// Flips the done flag and returns the new value.
    pub fn toggle_done(&mut self, kind: ListKind, index: usize) -> PlannerResult<bool> {
        let item = self.item_mut(kind, index)?;
        item.done = !item.done;
        Ok(item.done)
    }

    pub fn remove_item(&mut self, kind: ListKind, index: usize) -> PlannerResult<CheckItem> {
        let list = self.list_mut(kind);
        if index >= list.len() {
            return Err(PlannerError::ItemNotFound { kind, index });
        }
        Ok(list.remove(index))
    }

    /// Clicking glass `index` fills up to and including it, unless it is
    /// already the topmost filled glass, in which case it is emptied.
    pub fn toggle_water(&mut self, index: u8) -> PlannerResult<u8> {
        if index >= WATER_GLASSES {
            return Err(PlannerError::InvalidValue(format!(
                "water glass {} is outside 0..{}",
                index, WATER_GLASSES
            )));
        }
        self.water = if self.water == index + 1 { index } else { index + 1 };
        Ok(self.water)
    }

    pub fn select_sleep(&mut self, hours: u8) -> PlannerResult<()> {
        if hours == 0 || hours > MAX_SLEEP_HOURS {
            return Err(PlannerError::InvalidValue(format!(
                "sleep hours {} is outside 1..={}",
                hours, MAX_SLEEP_HOURS
            )));
        }
        self.sleep = hours;
        Ok(())
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Checks the ranges serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.water > WATER_GLASSES {
            return Err(format!("water {} exceeds {}", self.water, WATER_GLASSES));
        }
        if self.sleep > MAX_SLEEP_HOURS {
            return Err(format!("sleep {} exceeds {}", self.sleep, MAX_SLEEP_HOURS));
        }
        Ok(())
    }

    /// The exact text the file store writes.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn summary(&self) -> DaySummary {
        let done = |items: &[CheckItem]| items.iter().filter(|i| i.done).count();
        DaySummary {
            checklist_done: done(&self.checklist),
            checklist_total: self.checklist.len(),
            vitamins_done: done(&self.vitamins),
            vitamins_total: self.vitamins.len(),
            water: self.water,
            sleep: self.sleep,
            has_notes: !self.notes.trim().is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record() {
        let record = DayRecord::default();
        assert!(record.checklist.is_empty());
        assert_eq!(record.water, 0);
        assert_eq!(record.sleep, 0);
        assert_eq!(record.notes, "");

        let names: Vec<&str> = record.vitamins.iter().map(|v| v.text.as_str()).collect();
        assert_eq!(names, vec!["Vitamin B", "Vitamin C", "Iron", "Omega 3 Fatty Acid", "Biotin"]);
        assert!(record.vitamins.iter().all(|v| !v.done));
    }

    #[test]
    fn test_water_toggle_retracts_topmost() {
        let mut record = DayRecord { water: 3, ..DayRecord::default() };
        assert_eq!(record.toggle_water(2).unwrap(), 2);
    }

    #[test]
    fn test_water_toggle_sets_level() {
        let mut record = DayRecord { water: 3, ..DayRecord::default() };
        assert_eq!(record.toggle_water(5).unwrap(), 6);

        // Lower glass than the current level also just sets the level.
        assert_eq!(record.toggle_water(0).unwrap(), 1);
        assert_eq!(record.toggle_water(0).unwrap(), 0);
    }

    #[test]
    fn test_water_toggle_out_of_range() {
        let mut record = DayRecord::default();
        assert!(record.toggle_water(8).is_err());
        assert_eq!(record.water, 0);
    }

    #[test]
    fn test_sleep_is_exclusive() {
        let mut record = DayRecord::default();
        record.select_sleep(5).unwrap();
        record.select_sleep(3).unwrap();
        assert_eq!(record.sleep, 3);

        assert!(record.select_sleep(0).is_err());
        assert!(record.select_sleep(9).is_err());
        assert_eq!(record.sleep, 3);
    }

    #[test]
    fn test_list_edits() {
        let mut record = DayRecord::default();
        let idx = record.add_item(ListKind::Checklist, "Buy milk", false);
        assert_eq!(idx, 0);

        assert!(record.toggle_done(ListKind::Checklist, 0).unwrap());
        record.edit_text(ListKind::Checklist, 0, "Buy oat milk").unwrap();
        assert_eq!(record.checklist[0], CheckItem { text: "Buy oat milk".into(), done: true });

        let removed = record.remove_item(ListKind::Checklist, 0).unwrap();
        assert_eq!(removed.text, "Buy oat milk");
        assert!(record.checklist.is_empty());

        // Vitamins are untouched by checklist edits.
        assert_eq!(record.vitamins.len(), 5);
    }

    #[test]
    fn test_missing_item() {
        let mut record = DayRecord::default();
        let err = record.remove_item(ListKind::Checklist, 0).unwrap_err();
        assert!(matches!(err, PlannerError::ItemNotFound { kind: ListKind::Checklist, index: 0 }));
        assert!(record.toggle_done(ListKind::Vitamins, 5).is_err());
    }

    #[test]
    fn test_serialized_field_order() {
        let json = serde_json::to_string(&DayRecord::default()).unwrap();
        let positions: Vec<usize> = ["\"checklist\"", "\"water\"", "\"vitamins\"", "\"sleep\"", "\"notes\""]
            .iter()
            .map(|k| json.find(k).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_validate() {
        let record = DayRecord { water: 9, ..DayRecord::default() };
        assert!(record.validate().is_err());
        let record = DayRecord { sleep: 12, ..DayRecord::default() };
        assert!(record.validate().is_err());
        assert!(DayRecord::default().validate().is_ok());
    }
}
