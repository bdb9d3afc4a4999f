use chrono::NaiveDate;

use crate::error::PlannerResult;
use crate::model::day_record::DayRecord;

pub trait DayRecordRepository {
    /// Returns the stored record, or the default record when none exists.
    fn load(&self, date: NaiveDate) -> PlannerResult<DayRecord>;
    /// Replaces the whole stored record for `date`.
    fn save(&self, date: NaiveDate, record: &DayRecord) -> PlannerResult<()>;
    /// Dates that have a stored record, ascending.
    fn list_dates(&self) -> PlannerResult<Vec<NaiveDate>>;
}
