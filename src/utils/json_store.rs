//! JSON-file-backed storage implementation
//!
//! Whole-snapshot persistence: the file is read once on open and rewritten
//! after every mutation, so reads always reflect resolved writes.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::traits::*;
use crate::types::*;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    employees: BTreeMap<String, Employee>,
    #[serde(default)]
    events: Vec<Event>,
}

/// Event store persisted as a single JSON file
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    snapshot: Snapshot,
}

impl JsonFileStore {
    /// Open a store at the given path, loading the existing snapshot if the
    /// file is present and starting empty otherwise.
    pub fn open(path: impl AsRef<Path>) -> ReconResult<Self> {
        let path = path.as_ref().to_path_buf();
        let snapshot = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| ReconError::Storage(format!("Failed to read {}: {e}", path.display())))?;
            serde_json::from_str(&raw)
                .map_err(|e| ReconError::Storage(format!("Failed to parse {}: {e}", path.display())))?
        } else {
            Snapshot::default()
        };

        Ok(Self { path, snapshot })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> ReconResult<()> {
        let raw = serde_json::to_string_pretty(&self.snapshot)
            .map_err(|e| ReconError::Storage(format!("Failed to serialize snapshot: {e}")))?;
        std::fs::write(&self.path, raw)
            .map_err(|e| ReconError::Storage(format!("Failed to write {}: {e}", self.path.display())))
    }
}

fn in_range(date: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    start.is_none_or(|s| date >= s) && end.is_none_or(|e| date <= e)
}

#[async_trait]
impl EventStore for JsonFileStore {
    async fn append_event(&mut self, event: &Event) -> ReconResult<()> {
        self.snapshot.events.push(event.clone());
        self.persist()
    }

    async fn list_events(
        &self,
        employee_key: Option<&str>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> ReconResult<Vec<Event>> {
        let filtered: Vec<Event> = self
            .snapshot
            .events
            .iter()
            .filter(|event| {
                employee_key.is_none_or(|key| event.employee_key == key)
                    && in_range(event.date, start_date, end_date)
            })
            .cloned()
            .collect();
        Ok(filtered)
    }

    async fn list_employee_keys(&self) -> ReconResult<Vec<String>> {
        let keys: BTreeSet<String> = self
            .snapshot
            .events
            .iter()
            .map(|event| event.employee_key.clone())
            .collect();
        Ok(keys.into_iter().collect())
    }

    async fn save_employee(&mut self, employee: &Employee) -> ReconResult<()> {
        self.snapshot
            .employees
            .insert(employee.key.clone(), employee.clone());
        self.persist()
    }

    async fn get_employee(&self, key: &str) -> ReconResult<Option<Employee>> {
        Ok(self.snapshot.employees.get(key).cloned())
    }

    async fn list_employees(&self) -> ReconResult<Vec<Employee>> {
        Ok(self.snapshot.employees.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_snapshot_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recon.json");

        let event = Event::new(
            "EMP001",
            date(2025, 3, 26),
            BigDecimal::from(10000),
            BigDecimal::from(0),
        );
        let employee = Employee::new(
            "EMP001",
            "Mayank Sharma",
            "mayank.sharma@company.com",
            "Collections",
        );

        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.append_event(&event).await.unwrap();
            store.save_employee(&employee).await.unwrap();
        }

        let reopened = JsonFileStore::open(&path).unwrap();
        let events = reopened.list_events(Some("EMP001"), None, None).await.unwrap();
        assert_eq!(events, vec![event]);
        assert_eq!(reopened.get_employee("EMP001").await.unwrap(), Some(employee));
    }

    #[tokio::test]
    async fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("fresh.json")).unwrap();

        assert!(store.list_events(None, None, None).await.unwrap().is_empty());
        assert!(store.list_employee_keys().await.unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "not json").unwrap();

        let result = JsonFileStore::open(&path);
        assert!(matches!(result, Err(ReconError::Storage(_))));
    }
}
