use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use tracing::warn;

use crate::error::{PlannerError, PlannerResult};
use crate::model::summary::DaySummary;
use crate::repository::DayRecordRepository;

#[derive(Debug, Clone, PartialEq)]
pub enum DayEntry {
    Summary(DaySummary),
    Corrupt(String),
    /// The file exists but could not be read at all.
    Unreadable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthOverview {
    pub year: i32,
    pub month: u32,
    pub days: BTreeMap<NaiveDate, DayEntry>,
}

impl MonthOverview {
    pub fn has_record(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }
}

pub struct MonthOverviewUseCase<'a, R: DayRecordRepository> {
    repo: &'a R,
}

impl<'a, R: DayRecordRepository> MonthOverviewUseCase<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub fn overview(&self, year: i32, month: u32) -> PlannerResult<MonthOverview> {
        let mut days = BTreeMap::new();

        let dates = self
            .repo
            .list_dates()?
            .into_iter()
            .filter(|d| d.year() == year && d.month() == month);

        for date in dates {
            // One unreadable day should not hide the rest of the month.
            let entry = match self.repo.load(date) {
                Ok(record) => DayEntry::Summary(record.summary()),
                Err(PlannerError::CorruptRecord { reason, .. }) => {
                    warn!(%date, %reason, "corrupt record in month overview");
                    DayEntry::Corrupt(reason)
                }
                Err(e) => {
                    warn!(%date, error = %e, "unreadable record in month overview");
                    DayEntry::Unreadable(e.to_string())
                }
            };
            days.insert(date, entry);
        }

        Ok(MonthOverview { year, month, days })
    }
}
