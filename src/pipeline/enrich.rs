use crate::constants::{BATCH_ID_FIELD, MODIFIED_TIMESTAMP_FIELD, TAGS_FIELD};
use crate::types::{BatchContext, EtlTimestamp, Row};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Adds the ETL metadata columns to a row:
///   - `modified_timestamp`: when this row was processed
///   - `batch_id`: the run's batch identifier
///   - `tags`: classification tags for downstream access control
///
/// Existing columns with the same names are overwritten. This only writes,
/// so it cannot fail.
pub fn add_metadata(row: &mut Row, context: &BatchContext, now: DateTime<Utc>) {
    row.insert(
        MODIFIED_TIMESTAMP_FIELD.to_string(),
        Value::String(EtlTimestamp(now).to_string()),
    );
    row.insert(
        BATCH_ID_FIELD.to_string(),
        Value::String(context.batch_id().to_string()),
    );
    row.insert(TAGS_FIELD.to_string(), context.tags().to_value());
}
