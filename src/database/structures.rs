use serde::{Deserialize, Serialize};

use crate::constants::MAX_RESOLUTION_LEN;

/// Keeps at most [`MAX_RESOLUTION_LEN`] characters. Shorter input is returned as is.
pub fn truncate_resolution(resolution: &str) -> String {
    match resolution.char_indices().nth(MAX_RESOLUTION_LEN) {
        Some((end, _)) => resolution[..end].to_string(),
        None => resolution.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugReport {
    pub id: u64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub resolution: Option<String>,
}

impl BugReport {
    pub fn set_resolution(&mut self, resolution: &str) {
        self.resolution = Some(truncate_resolution(resolution));
    }

    pub(crate) fn from_row(
        (id, title, description, resolution): (u64, Option<String>, Option<String>, Option<String>),
    ) -> Self {
        Self {
            id,
            title,
            description,
            resolution,
        }
    }
}

/// A bug report that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBugReport {
    pub title: Option<String>,
    pub description: Option<String>,
    pub resolution: Option<String>,
}

impl NewBugReport {
    pub fn new(title: Option<String>, description: Option<String>, resolution: &str) -> Self {
        Self {
            title,
            description,
            resolution: Some(truncate_resolution(resolution)),
        }
    }

    pub fn with_id(self, id: u64) -> BugReport {
        BugReport {
            id,
            title: self.title,
            description: self.description,
            resolution: self.resolution,
        }
    }
}
