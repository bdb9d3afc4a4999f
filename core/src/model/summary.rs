#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DaySummary {
    pub checklist_done: usize,
    pub checklist_total: usize,
    pub vitamins_done: usize,
    pub vitamins_total: usize,
    pub water: u8,
    pub sleep: u8,
    pub has_notes: bool,
}

impl DaySummary {
    /// True when every tracked list item is checked off.
    pub fn all_done(&self) -> bool {
        self.checklist_done == self.checklist_total && self.vitamins_done == self.vitamins_total
    }
}
