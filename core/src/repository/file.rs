use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::error::{PlannerError, PlannerResult};
use crate::model::day_record::DayRecord;
use crate::repository::traits::DayRecordRepository;

const DEFAULT_DIR_NAME: &str = ".planner_data";
const DATE_FORMAT: &str = "%Y-%m-%d";
const RECORD_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "json.tmp";

/// Stores one pretty-printed JSON file per date, named `YYYY-MM-DD.json`.
#[derive(Clone, Debug)]
pub struct FileDayRecordRepository {
    base_dir: PathBuf,
}

pub fn default_data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(DEFAULT_DIR_NAME))
}

impl FileDayRecordRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let path = match base_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        fs::create_dir_all(&path)?;
        debug!(dir = %path.display(), "using planner data directory");
        Ok(FileDayRecordRepository { base_dir: path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn record_path(&self, date: NaiveDate) -> PathBuf {
        self.base_dir
            .join(format!("{}.{}", date.format(DATE_FORMAT), RECORD_EXTENSION))
    }

    fn temp_path(&self, date: NaiveDate) -> PathBuf {
        self.base_dir
            .join(format!("{}.{}", date.format(DATE_FORMAT), TEMP_EXTENSION))
    }

    fn write_atomic(&self, date: NaiveDate, record: &DayRecord) -> io::Result<()> {
        let temp = self.temp_path(date);
        let result = (|| {
            let file = File::create(&temp)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, record)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
            fs::rename(&temp, self.record_path(date))
        })();

        if result.is_err() && temp.exists() {
            if let Err(e) = fs::remove_file(&temp) {
                warn!(path = %temp.display(), error = %e, "could not remove temp file");
            }
        }
        result
    }
}

fn parse_record_name(path: &Path) -> Option<NaiveDate> {
    if path.extension().and_then(|s| s.to_str()) != Some(RECORD_EXTENSION) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    NaiveDate::parse_from_str(stem, DATE_FORMAT).ok()
}

impl DayRecordRepository for FileDayRecordRepository {
    fn load(&self, date: NaiveDate) -> PlannerResult<DayRecord> {
        let path = self.record_path(date);
        // Raw bytes, so invalid UTF-8 is a parse error rather than an io error.
        let content = match fs::read(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(%date, "no record on disk, using default");
                return Ok(DayRecord::default());
            }
            Err(source) => return Err(PlannerError::ReadFailure { date, source }),
        };

        let record: DayRecord = serde_json::from_slice(&content).map_err(|e| {
            PlannerError::CorruptRecord {
                date,
                reason: e.to_string(),
            }
        })?;
        record
            .validate()
            .map_err(|reason| PlannerError::CorruptRecord { date, reason })?;
        Ok(record)
    }

    fn save(&self, date: NaiveDate, record: &DayRecord) -> PlannerResult<()> {
        self.write_atomic(date, record)
            .map_err(|source| PlannerError::WriteFailure { date, source })?;
        debug!(%date, "record saved");
        Ok(())
    }

    fn list_dates(&self) -> PlannerResult<Vec<NaiveDate>> {
        let mut dates = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if let Some(date) = parse_record_name(&path) {
                dates.push(date);
            }
        }
        dates.sort();
        Ok(dates)
    }
}
