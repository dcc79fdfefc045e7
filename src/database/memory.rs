use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::{BugReport, BugStore, NewBugReport};
use crate::error::StoreError;

/// Process-local store, used when no database server is configured.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    bugs: Arc<DashMap<u64, BugReport>>,
    next_id: Arc<AtomicU64>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            bugs: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }
}

#[async_trait]
impl BugStore for MemoryStore {
    async fn create(&self, report: NewBugReport) -> Result<BugReport, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let bug = report.with_id(id);
        self.bugs.insert(id, bug.clone());
        Ok(bug)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<BugReport>, StoreError> {
        Ok(self.bugs.get(&id).map(|bug| bug.value().clone()))
    }

    async fn find_all(&self) -> Result<Vec<BugReport>, StoreError> {
        let mut bugs: Vec<BugReport> = self.bugs.iter().map(|bug| bug.value().clone()).collect();
        bugs.sort_by_key(|bug| bug.id);
        Ok(bugs)
    }

    async fn save(&self, report: &BugReport) -> Result<BugReport, StoreError> {
        match self.bugs.get_mut(&report.id) {
            Some(mut stored) => {
                *stored = report.clone();
                Ok(report.clone())
            }
            None => Err(StoreError::Missing(report.id)),
        }
    }
}
