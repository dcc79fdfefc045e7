//! Constants used by the resolution pipeline, the store and the HTTP surface

use std::time::Duration;

/// Name of the bug report table
pub const TABLE_BUG_REPORTS: &str = "bug_report";

/// Maximum number of characters kept in a stored resolution
pub const MAX_RESOLUTION_LEN: usize = 255;

/// Returned by the pipeline when the generation endpoint fails
pub const AI_UNAVAILABLE: &str = "AI resolution not available";
/// Prepended to a successful semantic search response
pub const SEARCH_PREFIX: &str = "🔍 Semantic search suggested related issues: \n";

/// Longest generation stream line kept in memory
pub const MAX_STREAM_LINE_BYTES: usize = 4 * 1024 * 1024;

pub const SEARCH_PATH: &str = "/search";
pub const GENERATE_PATH: &str = "/api/generate";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_SEARCH_URL: &str = "http://localhost:8383";
pub const DEFAULT_GENERATE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "mistral";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_DB_PORT: u16 = 3306;
pub const DEFAULT_AI_TIMEOUT: Duration = Duration::from_secs(30);

/// Env var checked before `RUST_LOG` for log directives
pub const LOG_ENV: &str = "BUG_RESOLVER_LOG";
