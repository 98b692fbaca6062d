//! Utility modules: storage backends and boundary validation

pub mod json_store;
pub mod memory_store;
pub mod validation;

pub use json_store::*;
pub use memory_store::*;
pub use validation::*;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::traits::EventStore;
use crate::types::*;

/// Configuration selecting which storage backend to open.
///
/// Backend choice is a deployment concern; the engine never branches on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreConfig {
    /// Volatile in-memory snapshot store
    Memory,
    /// Snapshot persisted to a JSON file at the given path
    JsonFile { path: PathBuf },
}

/// A configuration-selected storage backend
#[derive(Debug)]
pub enum Store {
    Memory(MemoryStore),
    JsonFile(JsonFileStore),
}

impl Store {
    /// Open the backend described by the configuration
    pub fn open(config: StoreConfig) -> ReconResult<Self> {
        match config {
            StoreConfig::Memory => Ok(Store::Memory(MemoryStore::new())),
            StoreConfig::JsonFile { path } => Ok(Store::JsonFile(JsonFileStore::open(path)?)),
        }
    }
}

#[async_trait]
impl EventStore for Store {
    async fn append_event(&mut self, event: &Event) -> ReconResult<()> {
        match self {
            Store::Memory(store) => store.append_event(event).await,
            Store::JsonFile(store) => store.append_event(event).await,
        }
    }

    async fn list_events(
        &self,
        employee_key: Option<&str>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> ReconResult<Vec<Event>> {
        match self {
            Store::Memory(store) => store.list_events(employee_key, start_date, end_date).await,
            Store::JsonFile(store) => store.list_events(employee_key, start_date, end_date).await,
        }
    }

    async fn list_employee_keys(&self) -> ReconResult<Vec<String>> {
        match self {
            Store::Memory(store) => store.list_employee_keys().await,
            Store::JsonFile(store) => store.list_employee_keys().await,
        }
    }

    async fn save_employee(&mut self, employee: &Employee) -> ReconResult<()> {
        match self {
            Store::Memory(store) => store.save_employee(employee).await,
            Store::JsonFile(store) => store.save_employee(employee).await,
        }
    }

    async fn get_employee(&self, key: &str) -> ReconResult<Option<Employee>> {
        match self {
            Store::Memory(store) => store.get_employee(key).await,
            Store::JsonFile(store) => store.get_employee(key).await,
        }
    }

    async fn list_employees(&self) -> ReconResult<Vec<Employee>> {
        match self {
            Store::Memory(store) => store.list_employees().await,
            Store::JsonFile(store) => store.list_employees().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    #[tokio::test]
    async fn test_config_selects_backend() {
        let memory = Store::open(StoreConfig::Memory).unwrap();
        assert!(matches!(memory, Store::Memory(_)));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut file_backed = Store::open(StoreConfig::JsonFile { path: path.clone() }).unwrap();
        assert!(matches!(file_backed, Store::JsonFile(_)));

        let event = Event::new(
            "EMP001",
            NaiveDate::from_ymd_opt(2025, 3, 26).unwrap(),
            BigDecimal::from(10000),
            BigDecimal::from(0),
        );
        file_backed.append_event(&event).await.unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_store_config_round_trips_through_serde() {
        let config = StoreConfig::JsonFile {
            path: PathBuf::from("/var/lib/recon/store.json"),
        };
        let raw = serde_json::to_string(&config).unwrap();
        let parsed: StoreConfig = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, config);
    }
}
