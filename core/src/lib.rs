pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use error::{PlannerError, PlannerResult};
pub use model::day_record::{CheckItem, DayRecord, ListKind, MAX_SLEEP_HOURS, WATER_GLASSES};
pub use model::summary::DaySummary;
pub use repository::{default_data_dir, DayRecordRepository, FileDayRecordRepository};
pub use service::day_editor::DayEditor;
pub use time::{parse_day, parse_month};
pub use usecase::month_overview::{DayEntry, MonthOverview, MonthOverviewUseCase};
