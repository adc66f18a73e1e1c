//! JSON file helpers with atomic writes
//!
//! A document is either fully replaced or left untouched: writes go to a
//! sibling temp file which is synced and renamed over the target.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::PennywiseError;

fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T, PennywiseError> {
    let file = File::open(path).map_err(|e| {
        PennywiseError::Storage(format!("Failed to open {}: {}", path.display(), e))
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        PennywiseError::Storage(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Read a JSON document, `None` if the file does not exist
pub fn read_json_opt<T, P>(path: P) -> Result<Option<T>, PennywiseError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    parse_file(path).map(Some)
}

/// Read a JSON document, falling back to `T::default()` if it is missing
pub fn read_json<T, P>(path: P) -> Result<T, PennywiseError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    Ok(read_json_opt(path)?.unwrap_or_default())
}

/// Read a JSON document that must exist
pub fn read_json_required<T, P>(path: P) -> Result<T, PennywiseError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    read_json_opt(path)?.ok_or_else(|| {
        PennywiseError::Storage(format!("File not found: {}", path.display()))
    })
}

/// Write a JSON document atomically (temp file, sync, rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), PennywiseError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            PennywiseError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| PennywiseError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| PennywiseError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| PennywiseError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| PennywiseError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        PennywiseError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetFrequency, BudgetSettings, LabelList, Money};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget.json");

        let budget: BudgetSettings = read_json(&path).unwrap();
        assert_eq!(budget, BudgetSettings::default());
        assert!(read_json_opt::<BudgetSettings, _>(&path).unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget.json");
        let budget = BudgetSettings::new(Money::from_cents(80_000), BudgetFrequency::Yearly);

        write_json_atomic(&path, &budget).unwrap();

        let loaded: BudgetSettings = read_json_required(&path).unwrap();
        assert_eq!(loaded, budget);
        assert!(!temp_dir.path().join("budget.json.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir
            .path()
            .join("users")
            .join("alice")
            .join("settings")
            .join("transaction_types.json");

        write_json_atomic(&path, &LabelList::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_required_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_json_required::<LabelList, _>(temp_dir.path().join("nope.json"))
            .unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_json::<BudgetSettings, _>(&path).unwrap_err();
        assert!(matches!(err, PennywiseError::Storage(_)));
    }
}
