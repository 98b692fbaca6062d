//! In-memory storage implementation for testing and development

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory event store: the local snapshot backend
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    events: Arc<RwLock<Vec<Event>>>,
    employees: Arc<RwLock<BTreeMap<String, Employee>>>,
}

impl MemoryStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.events.write().unwrap().clear();
        self.employees.write().unwrap().clear();
    }
}

fn in_range(date: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    if let Some(start) = start {
        if date < start {
            return false;
        }
    }
    if let Some(end) = end {
        if date > end {
            return false;
        }
    }
    true
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn append_event(&mut self, event: &Event) -> ReconResult<()> {
        self.events.write().unwrap().push(event.clone());
        Ok(())
    }

    async fn list_events(
        &self,
        employee_key: Option<&str>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> ReconResult<Vec<Event>> {
        let events = self.events.read().unwrap();
        let filtered: Vec<Event> = events
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
        let events = self.events.read().unwrap();
        let keys: BTreeSet<String> = events
            .iter()
            .map(|event| event.employee_key.clone())
            .collect();
        Ok(keys.into_iter().collect())
    }

    async fn save_employee(&mut self, employee: &Employee) -> ReconResult<()> {
        self.employees
            .write()
            .unwrap()
            .insert(employee.key.clone(), employee.clone());
        Ok(())
    }

    async fn get_employee(&self, key: &str) -> ReconResult<Option<Employee>> {
        Ok(self.employees.read().unwrap().get(key).cloned())
    }

    async fn list_employees(&self) -> ReconResult<Vec<Employee>> {
        Ok(self.employees.read().unwrap().values().cloned().collect())
    }
}
