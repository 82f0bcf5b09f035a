use crate::error::{PulseError, Result};
use crate::model::{WeekSnapshot, SCHEMA_VERSION};
use crate::week::week_start;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// Snapshot persistence over a directory of `YYYY-MM-DD.json` records, one
/// per ISO week, keyed by the week's Monday. The same directory is what
/// the static site serves, so the records are its data contract.
pub struct SnapshotStore {
    data_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        fs::create_dir_all(data_dir.as_ref())?;
        Ok(Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn record_path(&self, week_date: NaiveDate) -> PathBuf {
        self.data_dir
            .join(format!("{}.json", week_date.format("%Y-%m-%d")))
    }

    /// Write or wholesale-overwrite the record for the snapshot's week.
    /// The write goes through a temp file and a rename, so a failed run
    /// never leaves a partial record behind.
    pub fn put(&self, snapshot: &WeekSnapshot) -> Result<()> {
        let path = self.record_path(snapshot.week_date);
        let body = serde_json::to_string_pretty(snapshot)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, body)
            .and_then(|_| fs::rename(&tmp, &path))
            .map_err(|e| {
                let _ = fs::remove_file(&tmp);
                PulseError::StoreWrite(format!("{}: {e}", path.display()))
            })
    }

    /// Load the snapshot for the week containing `date`. Any date within
    /// the week resolves to the same record.
    pub fn get(&self, date: NaiveDate) -> Result<WeekSnapshot> {
        let week_date = week_start(date);
        let path = self.record_path(week_date);
        let raw = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PulseError::NotFound(format!("no snapshot stored for week {week_date}"))
            } else {
                PulseError::Io(e)
            }
        })?;
        let snapshot: WeekSnapshot = serde_json::from_str(&raw)?;
        if snapshot.version != SCHEMA_VERSION {
            return Err(PulseError::StoreWrite(format!(
                "schema version mismatch in {}: expected {SCHEMA_VERSION}, found {}",
                path.display(),
                snapshot.version
            )));
        }
        Ok(snapshot)
    }

    /// All stored week dates, ascending.
    pub fn list_dates(&self) -> Result<Vec<NaiveDate>> {
        let mut dates = Vec::new();
        for entry in fs::read_dir(&self.data_dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(stem) = name.to_str().and_then(|n| n.strip_suffix(".json")) else {
                continue;
            };
            if let Ok(date) = NaiveDate::parse_from_str(stem, "%Y-%m-%d") {
                dates.push(date);
            }
        }
        dates.sort_unstable();
        Ok(dates)
    }

    pub fn latest(&self) -> Result<Option<NaiveDate>> {
        Ok(self.list_dates()?.into_iter().next_back())
    }
}
