pub mod file;
pub mod traits;

// Re-export
pub use file::{default_data_dir, FileDayRecordRepository};
pub use traits::DayRecordRepository;
