pub mod bug_reports;
pub mod memory;
pub mod structures;

use async_trait::async_trait;

pub use bug_reports::MysqlStore;
pub use memory::MemoryStore;
pub use structures::*;

use crate::error::StoreError;

/// Persistence for bug reports.
///
/// The store never truncates: resolutions arrive already cut to
/// [`MAX_RESOLUTION_LEN`](crate::constants::MAX_RESOLUTION_LEN).
#[async_trait]
pub trait BugStore: Send + Sync {
    async fn create(&self, report: NewBugReport) -> Result<BugReport, StoreError>;

    async fn find_by_id(&self, id: u64) -> Result<Option<BugReport>, StoreError>;

    /// All reports, by ascending id.
    async fn find_all(&self) -> Result<Vec<BugReport>, StoreError>;

    /// Overwrites an existing report. Fails with [`StoreError::Missing`] if
    /// `report.id` is not stored.
    async fn save(&self, report: &BugReport) -> Result<BugReport, StoreError>;
}
