use crate::constants::{DEFAULT_ALLOW_USER_GROUPS, DEFAULT_SECURITY_LEVEL, ETL_TIMESTAMP_FORMAT};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::fmt;
use uuid::Uuid;

/// One decoded JSON record. Key order follows the input.
pub type Row = Map<String, Value>;

/// A UTC instant rendered in the ETL timestamp layout (`YYYY-DD-MM HH:MM:SS.ffffff +ZZZZ`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EtlTimestamp(pub DateTime<Utc>);

impl fmt::Display for EtlTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ETL_TIMESTAMP_FORMAT))
    }
}

/// Classification tags stamped on every row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RowTags {
    pub security_level: String,
    pub allow_user_groups: Vec<String>,
}

impl Default for RowTags {
    fn default() -> Self {
        Self {
            security_level: DEFAULT_SECURITY_LEVEL.to_string(),
            allow_user_groups: DEFAULT_ALLOW_USER_GROUPS
                .iter()
                .map(|g| g.to_string())
                .collect(),
        }
    }
}

impl RowTags {
    pub fn to_value(&self) -> Value {
        json!({
            "security_level": self.security_level,
            "allow_user_groups": self.allow_user_groups,
        })
    }
}

/// Per-run provenance shared by every row of a batch.
///
/// Built once when the run starts and passed by reference into the pipeline.
#[derive(Debug, Clone)]
pub struct BatchContext {
    batch_id: String,
    started_at: DateTime<Utc>,
    tags: RowTags,
}

impl BatchContext {
    /// Create a context with a fresh batch id, starting now.
    pub fn new(tags: RowTags) -> Self {
        Self::with_id(Uuid::new_v4().simple().to_string(), Utc::now(), tags)
    }

    pub fn with_id(batch_id: impl Into<String>, started_at: DateTime<Utc>, tags: RowTags) -> Self {
        Self {
            batch_id: batch_id.into(),
            started_at,
            tags,
        }
    }

    pub fn batch_id(&self) -> &str {
        &self.batch_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn tags(&self) -> &RowTags {
        &self.tags
    }
}

/// Counters for a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    pub lines_read: u64,
    pub accepted: u64,
    pub rejected: u64,
}

impl RunCounters {
    /// End-of-run report printed to the console.
    pub fn summary_report(&self) -> String {
        format!(
            "Read {} rows\nOK rows: {:04}, Rejected rows: {:04}",
            self.lines_read, self.accepted, self.rejected
        )
    }
}

/// Result of a complete run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub batch_id: String,
    pub counters: RunCounters,
    pub accepted_file: String,
    pub rejected_file: String,
    pub duration_secs: f64,
}
