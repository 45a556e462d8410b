//! Immutable ground-truth dataset loaded from CSV at startup.

use std::collections::HashMap;
use std::path::Path;

use crate::entry::Entry;
use crate::error::{Error, Result};

/// Map from key to `(value, cost)`, loaded once and shared read-only for the
/// lifetime of the server process.
#[derive(Debug, Default)]
pub struct Dataset {
    records: HashMap<String, Entry>,
}

impl Dataset {
    /// Loads a dataset from a headerless, three-column CSV file: `key,value,cost`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened, and
    /// [`Error::MalformedData`] if any row is missing a column or has a
    /// non-numeric cost. A malformed row aborts the entire load.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)?;

        let mut records = HashMap::new();
        for (line, result) in reader.records().enumerate() {
            let row = result.map_err(|e| {
                Error::MalformedData(format!("{}:{}: {e}", path.display(), line + 1))
            })?;

            let key = row.get(0).ok_or_else(|| {
                Error::MalformedData(format!("{}:{}: missing key column", path.display(), line + 1))
            })?;
            let value = row.get(1).ok_or_else(|| {
                Error::MalformedData(format!(
                    "{}:{}: missing value column",
                    path.display(),
                    line + 1
                ))
            })?;
            let cost_raw = row.get(2).ok_or_else(|| {
                Error::MalformedData(format!("{}:{}: missing cost column", path.display(), line + 1))
            })?;
            let cost: u64 = cost_raw.trim().parse().map_err(|_| {
                Error::MalformedData(format!(
                    "{}:{}: cost '{cost_raw}' is not a non-negative integer",
                    path.display(),
                    line + 1
                ))
            })?;

            records.insert(key.to_string(), Entry::new(value, cost));
        }

        tracing::info!(rows = records.len(), path = %path.display(), "loaded dataset");
        Ok(Self { records })
    }

    /// Looks up a key in the ground-truth dataset.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.records.get(key)
    }

    /// Number of records in the dataset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the dataset has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn loads_valid_rows() {
        let file = write_csv("k1,v1,7\nk2,v2,4\n");
        let dataset = Dataset::load(file.path()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get("k1").unwrap().value, "v1");
        assert_eq!(dataset.get("k1").unwrap().cost, 7);
        assert_eq!(dataset.get("k2").unwrap().cost, 4);
        assert!(dataset.get("missing").is_none());
    }

    #[test]
    fn aborts_on_malformed_cost() {
        let file = write_csv("k1,v1,not-a-number\n");
        let err = Dataset::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::MalformedData(_)));
    }

    #[test]
    fn aborts_on_missing_column() {
        let file = write_csv("k1,v1\n");
        let err = Dataset::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::MalformedData(_)));
    }
}
