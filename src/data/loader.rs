use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, anyhow};
use thiserror::Error;

use super::model::{Category, MeasurementRecord, MeasurementTable};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    /// Nothing at the expected path.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The file exists but is not a usable measurement table.
    #[error(transparent)]
    Parse(#[from] anyhow::Error),
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Columns every measurement file must provide.
const REQUIRED_COLUMNS: [&str; 6] = [
    "code",
    "muscle",
    "position",
    "health_status",
    "time_days",
    "value",
];

/// Load a measurement table from a comma-separated file with a header row.
///
/// Extra columns are ignored. Row order is kept as in the file.
pub fn load_csv(path: &Path) -> Result<MeasurementTable, LoadError> {
    let mut reader = match csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
    {
        Ok(reader) => reader,
        Err(e) if is_not_found(&e) => {
            return Err(LoadError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(anyhow::Error::new(e).context("opening CSV").into()),
    };

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(anyhow!("CSV missing '{required}' column").into());
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<MeasurementRecord>().enumerate() {
        // 1-based file line; the header occupies line 1.
        let line = row_no + 2;
        let record = result.with_context(|| format!("CSV line {line}"))?;
        records.push(record);
    }

    let table = MeasurementTable::from_records(records);
    log::info!(
        "Loaded {} rows from {} ({} patients, {} muscles, {} positions, {} health statuses)",
        table.len(),
        path.display(),
        table.options(Category::Patient).len(),
        table.options(Category::Muscle).len(),
        table.options(Category::Position).len(),
        table.options(Category::HealthStatus).len(),
    );
    Ok(table)
}

fn is_not_found(err: &csv::Error) -> bool {
    matches!(err.kind(), csv::ErrorKind::Io(e) if e.kind() == io::ErrorKind::NotFound)
}

// ---------------------------------------------------------------------------
// Path-keyed cache
// ---------------------------------------------------------------------------

/// Memoises successful loads for the lifetime of the process.
///
/// Failures are never cached, so a retry after placing the file works.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, Arc<MeasurementTable>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table for `path`, reading it on first use.
    pub fn load(&mut self, path: &Path) -> Result<Arc<MeasurementTable>, LoadError> {
        if let Some(table) = self.entries.get(path) {
            log::debug!("Cache hit for {}", path.display());
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(load_csv(path)?);
        self.entries.insert(path.to_path_buf(), Arc::clone(&table));
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = "\
code,muscle,position,health_status,time_days,value,notes
101,biceps,rest,healthy,0,10.5,a
101,biceps,rest,healthy,30,11.0,
202,triceps,flex,injured,0,7.25,b
";

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_rows_in_file_order_with_text_codes() {
        let file = write_csv(SAMPLE);
        let table = load_csv(file.path()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.records[0].code, "101");
        assert_eq!(table.records[1].time_days, 30.0);
        assert_eq!(table.records[2].code, "202");
        assert_eq!(table.records[2].value, 7.25);
        assert!(table.options(Category::Patient).contains("101"));
    }

    #[test]
    fn padded_fields_are_trimmed() {
        let file = write_csv(
            "code , muscle,position,health_status,time_days,value\n 007 , biceps ,rest,healthy, 0 ,1.5\n",
        );
        let table = load_csv(file.path()).unwrap();
        assert_eq!(table.records[0].code, "007");
        assert_eq!(table.records[0].muscle, "biceps");
        assert_eq!(table.records[0].time_days, 0.0);
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");

        match load_csv(&path) {
            Err(LoadError::FileNotFound { path: reported }) => assert_eq!(reported, path),
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn missing_column_is_a_parse_error() {
        let file = write_csv("code,muscle,position,time_days,value\n1,a,b,0,1\n");
        let err = load_csv(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
        assert!(err.to_string().contains("health_status"));
    }

    #[test]
    fn non_numeric_value_reports_the_file_line() {
        let file = write_csv(
            "code,muscle,position,health_status,time_days,value\n1,a,b,h,0,1\n1,a,b,h,5,oops\n",
        );
        match load_csv(file.path()) {
            // Header is line 1, the bad row is the second record.
            Err(LoadError::Parse(e)) => assert!(format!("{e:#}").contains("CSV line 3")),
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn cache_returns_prior_result_without_rereading() {
        let file = write_csv(SAMPLE);
        let path = file.path().to_path_buf();
        let mut cache = DatasetCache::new();

        let first = cache.load(&path).unwrap();
        assert!(cache.entries.contains_key(&path));

        // Removing the file proves the second call never touches the disk.
        drop(file);
        assert!(!path.exists());

        let second = cache.load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn failures_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.csv");
        let mut cache = DatasetCache::new();

        assert!(matches!(
            cache.load(&path),
            Err(LoadError::FileNotFound { .. })
        ));
        assert!(!cache.entries.contains_key(&path));

        std::fs::write(&path, SAMPLE).unwrap();
        assert_eq!(cache.load(&path).unwrap().len(), 3);
    }
}
